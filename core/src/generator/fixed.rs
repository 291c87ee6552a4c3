use super::*;

/// Replays a known list of mine draws, used to reproduce a layout exactly.
///
/// Every entry counts as one draw, so repeated coordinates collapse into a
/// single mine the same way coinciding random draws do.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMineGenerator<'a> {
    mine_coords: &'a [Coord2],
}

impl<'a> FixedMineGenerator<'a> {
    pub fn new(mine_coords: &'a [Coord2]) -> Self {
        Self { mine_coords }
    }
}

impl MineGenerator for FixedMineGenerator<'_> {
    fn generate(self, config: &GameConfig) -> Result<MineLayout> {
        MineLayout::from_mine_coords(config.size, self.mine_coords)
    }
}
