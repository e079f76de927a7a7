//! Seeded randomness for rollout drivers.
//!
//! Stepping a grid never draws random numbers. Random actions come from a
//! `GameRng` owned by whoever drives the episode, so a rollout is replayed
//! exactly by reusing its seed.
//!
//! ```
//! use baba_sim::core::{Action, GameRng};
//!
//! let mut episodes = GameRng::new(42);
//! let mut first = episodes.fork();
//! let mut second = episodes.fork();
//! assert_ne!(first.seed(), second.seed());
//!
//! let action = *first.choose(&Action::ALL).unwrap();
//! assert!(Action::ALL.contains(&action));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment spreading fork seeds across the seed space.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 sampler with numbered forks, one per episode or worker.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Derive the next child sampler.
    ///
    /// Children depend only on the parent seed and how many forks came
    /// before, not on how much the parent has drawn.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index below `len`; `None` when `len` is zero.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Uniform element of `slice`.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        self.index(slice.len()).and_then(|i| slice.get(i))
    }

    /// Capture the sampler position so a rollout can resume later.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            forks: state.forks,
        }
    }
}

/// Saved `GameRng` position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word counter.
    pub word_pos: u128,
    pub forks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    fn rollout(rng: &mut GameRng, len: usize) -> Vec<Action> {
        (0..len).map(|_| *rng.choose(&Action::ALL).unwrap()).collect()
    }

    #[test]
    fn test_same_seed_same_rollout() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        assert_eq!(rollout(&mut a, 50), rollout(&mut b, 50));
    }

    #[test]
    fn test_seeds_differ() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);
        assert_ne!(rollout(&mut a, 50), rollout(&mut b, 50));
    }

    #[test]
    fn test_fork_ignores_parent_draws() {
        let mut busy = GameRng::new(9);
        rollout(&mut busy, 30);
        let mut idle = GameRng::new(9);

        let mut from_busy = busy.fork();
        let mut from_idle = idle.fork();
        assert_eq!(rollout(&mut from_busy, 20), rollout(&mut from_idle, 20));
    }

    #[test]
    fn test_forks_are_distinct() {
        let mut parent = GameRng::new(9);
        let mut first = parent.fork();
        let mut second = parent.fork();
        assert_ne!(rollout(&mut first, 20), rollout(&mut second, 20));
    }

    #[test]
    fn test_empty_choice() {
        let mut rng = GameRng::new(0);
        let none: [Action; 0] = [];
        assert!(rng.choose(&none).is_none());
        assert_eq!(rng.index(0), None);
        assert!(rng.index(5).is_some_and(|i| i < 5));
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = GameRng::new(3);
        rollout(&mut rng, 17);

        let mut resumed = GameRng::from_state(&rng.state());
        assert_eq!(rollout(&mut rng, 20), rollout(&mut resumed, 20));
    }
}
