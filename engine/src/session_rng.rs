use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the only nondeterminism in the engine: picking one of several
/// equally good candidate cells.
pub trait RandomSource {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl RandomSource for SessionRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_produces_same_sequence() {
        let mut first = SessionRng::new(42);
        let mut second = SessionRng::new(42);
        let a: Vec<usize> = (0..20).map(|_| first.pick_index(4)).collect();
        let b: Vec<usize> = (0..20).map(|_| second.pick_index(4)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_index_stays_in_range() {
        let mut rng = SessionRng::from_random();
        for len in 1..10 {
            for _ in 0..50 {
                assert!(rng.pick_index(len) < len);
            }
        }
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(SessionRng::new(7).seed(), 7);
    }
}
