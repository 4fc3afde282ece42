//! Seeded randomness for a single game.
//!
//! Library shuffles, the opening coin flip and the random fallbacks for
//! bottoming and discarding all draw from the one `GameRng` owned by the
//! state, so a seed fixes the whole game.
//!
//! ```
//! use mtg_rules::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.coin_flip(), b.coin_flip());
//! ```

use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `true` for the first seat.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.inner);
    }

    /// `amount` distinct elements in their original relative order.
    /// Asking for more than the slice holds returns all of it.
    pub fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        let amount = amount.min(items.len());
        let mut chosen = index::sample(&mut self.inner, items.len(), amount).into_vec();
        chosen.sort_unstable();
        chosen.into_iter().map(|i| items[i].clone()).collect()
    }
}
