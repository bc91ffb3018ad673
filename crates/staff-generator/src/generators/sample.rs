//! Sampling without replacement.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle a copy of `pool` and take between `min_len` and `max_len` items.
///
/// Both bounds are clamped to the pool size.
pub fn unique_sample<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[T],
    min_len: usize,
    max_len: usize,
) -> Vec<T> {
    if pool.is_empty() || max_len == 0 {
        return Vec::new();
    }

    let effective_max = max_len.min(pool.len());
    let effective_min = min_len.min(effective_max);
    let length = rng.random_range(effective_min..=effective_max);

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(length);
    shuffled
}
