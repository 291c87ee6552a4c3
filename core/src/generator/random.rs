use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement driven by an injected random source, following
/// the config's [`MinePlacement`].
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMineGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(mut self, config: &GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let mine_mask = match config.placement {
            MinePlacement::Independent => place_independent(&mut self.rng, config),
            MinePlacement::Distinct => place_distinct(&mut self.rng, config),
        };
        let layout = MineLayout::from_mine_mask(mine_mask);

        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        Ok(layout)
    }
}

/// Draws `mines` coordinate pairs without checking earlier draws.
fn place_independent<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Array2<bool> {
    let mut mine_mask: Array2<bool> = Array2::default((config.size, config.size).grid_index());

    for _ in 0..config.mines {
        let coords = (
            rng.random_range(0..config.size),
            rng.random_range(0..config.size),
        );
        log::trace!("Mine drawn at {:?}", coords);
        mine_mask[coords.grid_index()] = true;
    }

    mine_mask
}

/// Picks `mines` cells among the ones still free, so no draw is wasted.
fn place_distinct<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Array2<bool> {
    let mut mine_mask: Array2<bool> = Array2::default((config.size, config.size).grid_index());

    // optimize for full boards
    if config.mines >= config.total_cells() {
        mine_mask.fill(true);
        return mine_mask;
    }

    let mut free_cells = config.total_cells();
    for _ in 0..config.mines {
        let place = usize::from(rng.random_range(0..free_cells));
        if let Some(cell) = mine_mask.iter_mut().filter(|is_mine| !**is_mine).nth(place) {
            *cell = true;
        }
        free_cells -= 1;
    }

    mine_mask
}
