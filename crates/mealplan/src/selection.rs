use glucoplan_shared::mealplan::Dish;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Number of most recent picks a slot avoids repeating.
pub const AVOID_LAST: usize = 3;

/// Source of uniform indices for dish selection.
pub trait Randomness {
    /// Returns an index in `0..len`. Callers never pass `0`.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Randomness + ?Sized> Randomness for &mut R {
    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

/// Thread-local generator, for interactive use.
pub struct ThreadRandom(ThreadRng);

impl Default for ThreadRandom {
    fn default() -> Self {
        Self(rand::rng())
    }
}

impl Randomness for ThreadRandom {
    fn index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Seedable generator. Same seed, same catalog, same picks.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Randomness for SeededRandom {
    fn index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Picks a dish uniformly, skipping ids among the last `avoid_last` entries
/// of `recent`.
///
/// Falls back to the whole pool when every dish was eaten recently.
///
/// # Panics
/// When `pool` is empty. Validated catalogs never produce an empty pool.
pub fn pick<'a, R: Randomness + ?Sized>(
    pool: &'a [Dish],
    recent: &[String],
    avoid_last: usize,
    rng: &mut R,
) -> &'a Dish {
    assert!(!pool.is_empty(), "cannot pick from an empty dish pool");

    let window = &recent[recent.len().saturating_sub(avoid_last)..];
    let fresh: Vec<&Dish> = pool
        .iter()
        .filter(|dish| !window.contains(&dish.id))
        .collect();

    if fresh.is_empty() {
        return &pool[rng.index(pool.len())];
    }

    fresh[rng.index(fresh.len())]
}
