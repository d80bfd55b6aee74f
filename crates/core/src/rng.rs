use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Seeded RNG so simulated draws are reproducible.
#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Moves `amount` uniformly chosen items to the front of `items` and
    /// returns them; the rest of the slice is left in unspecified order.
    pub fn draw_sample<'a, T>(&mut self, items: &'a mut [T], amount: usize) -> &'a [T] {
        let (picked, _) = items.partial_shuffle(&mut self.rng, amount);
        picked
    }
}
