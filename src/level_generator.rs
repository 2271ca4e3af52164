use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Level Generator
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the set, the node is replicated to higher levels with a
/// certain probability as determined by a `LevelGenerator`.
///
/// Implementors only provide `flip`, a fair coin.  The provided `height` turns coin flips into a
/// node height: starting from 1, the height grows for as long as flips succeed and the cap has not
/// been reached.  No flip is spent once the height reaches the cap.
///
/// Supplying a generator with a fixed seed (or a scripted sequence of flips) makes the shape of the
/// set reproducible.
pub trait LevelGenerator {
    fn flip(&mut self) -> bool;

    fn height(&mut self, cap: usize) -> usize {
        let mut height = 1;
        while height < cap && self.flip() {
            height += 1;
        }
        height
    }
}

/// A level generator flipping a fair coin drawn from `R`.
#[derive(Clone, Debug)]
pub struct CoinFlipLevelGenerator<R = StdRng> {
    rng: R,
}

impl CoinFlipLevelGenerator<StdRng> {
    /// A generator seeded from the operating system's entropy source.
    pub fn new() -> Self {
        CoinFlipLevelGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator which always produces the same flips for the same `seed`.
    pub fn seeded(seed: u64) -> Self {
        CoinFlipLevelGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> CoinFlipLevelGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        CoinFlipLevelGenerator { rng: rng }
    }
}

impl Default for CoinFlipLevelGenerator<StdRng> {
    fn default() -> Self {
        CoinFlipLevelGenerator::new()
    }
}

impl<R: Rng> LevelGenerator for CoinFlipLevelGenerator<R> {
    fn flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoinFlipLevelGenerator, LevelGenerator};
    use std::collections::VecDeque;

    struct Script(VecDeque<bool>);

    impl LevelGenerator for Script {
        fn flip(&mut self) -> bool {
            self.0.pop_front().unwrap()
        }
    }

    #[test]
    fn height_follows_flips() {
        let mut script = Script(vec![true, true, false, false].into_iter().collect());
        assert_eq!(script.height(8), 3);
        assert_eq!(script.height(8), 1);
        assert!(script.0.is_empty());
    }

    #[test]
    fn height_stops_at_cap_without_flipping() {
        let mut script = Script(vec![true, true, true].into_iter().collect());
        assert_eq!(script.height(3), 3);
        assert_eq!(script.0.len(), 1);
        assert_eq!(script.height(1), 1);
        assert_eq!(script.0.len(), 1);
    }

    #[test]
    fn heights_within_bounds() {
        let mut lg = CoinFlipLevelGenerator::new();
        for cap in 1..12 {
            for _ in 0..100 {
                let h = lg.height(cap);
                assert!(h >= 1 && h <= cap);
            }
        }
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = CoinFlipLevelGenerator::seeded(42);
        let mut b = CoinFlipLevelGenerator::seeded(42);
        let ha: Vec<usize> = (0..200).map(|_| a.height(16)).collect();
        let hb: Vec<usize> = (0..200).map(|_| b.height(16)).collect();
        assert_eq!(ha, hb);
    }

    #[test]
    fn roughly_geometric() {
        let mut lg = CoinFlipLevelGenerator::seeded(7);
        let n = 10_000;
        let tall = (0..n).filter(|_| lg.height(16) >= 2).count();
        // expected n / 2
        assert!(tall > n * 2 / 5 && tall < n * 3 / 5);
    }
}
