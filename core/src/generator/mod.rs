use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait MineGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout>;
}
