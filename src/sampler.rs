use rand::prelude::*;
use rand::seq::index;

use crate::config::SamplingPolicy;
use crate::types::Seed;

#[derive(Debug, Clone)]
/// Small deterministic RNG used for reproducible sampling runs.
///
/// The generator is passed explicitly to every sampling call; there is no
/// process-wide random state.
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Generator whose stream is fixed by `seed`.
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    /// Seed a generator from the thread RNG, returning the seed so the run can be replayed.
    pub fn from_fresh_seed() -> (Self, Seed) {
        let seed: Seed = rand::random();
        (Self::new(seed), seed)
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Number of items a policy draws from a group of `len` items.
///
/// - `Fraction(f)`: `round(f * len)` with ties rounded to even, capped at `len`.
/// - `Count(n)`: `min(n, len)`; a group smaller than the count yields the whole group.
pub fn sample_size(policy: &SamplingPolicy, len: usize) -> usize {
    match *policy {
        SamplingPolicy::Fraction(fraction) => {
            let target = (fraction * len as f64).round_ties_even();
            if target <= 0.0 {
                0
            } else {
                (target as usize).min(len)
            }
        }
        SamplingPolicy::Count(n) => n.min(len),
    }
}

/// Draw `sample_size(policy, items.len())` items uniformly without replacement.
///
/// Items are returned in draw order.
pub fn sample<T, R>(items: &[T], policy: &SamplingPolicy, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let amount = sample_size(policy, items.len());
    if amount == 0 {
        return Vec::new();
    }
    index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|idx| items[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        let left: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_eq!(left, right);

        let mut c = SeededRng::new(8);
        assert_ne!(left[0], c.next_u64());
    }

    #[test]
    fn fill_bytes_covers_partial_words() {
        let mut rng = SeededRng::new(3);
        let mut buf = [0u8; 13];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|byte| *byte != 0));
    }

    #[test]
    fn fraction_size_rounds_half_to_even() {
        assert_eq!(sample_size(&SamplingPolicy::Fraction(0.5), 10), 5);
        assert_eq!(sample_size(&SamplingPolicy::Fraction(0.5), 5), 2);
        assert_eq!(sample_size(&SamplingPolicy::Fraction(0.5), 7), 4);
        assert_eq!(sample_size(&SamplingPolicy::Fraction(0.1), 30), 3);
        assert_eq!(sample_size(&SamplingPolicy::Fraction(0.01), 10), 0);
        assert_eq!(sample_size(&SamplingPolicy::Fraction(1.0), 9), 9);
        assert_eq!(sample_size(&SamplingPolicy::Fraction(0.3), 0), 0);
    }

    #[test]
    fn count_size_clamps_to_group() {
        assert_eq!(sample_size(&SamplingPolicy::Count(4), 10), 4);
        assert_eq!(sample_size(&SamplingPolicy::Count(40), 10), 10);
        assert_eq!(sample_size(&SamplingPolicy::Count(0), 10), 0);
        assert_eq!(sample_size(&SamplingPolicy::Count(3), 0), 0);
    }

    #[test]
    fn sample_draws_without_replacement() {
        let items: Vec<usize> = (0..50).collect();
        let mut rng = SeededRng::new(11);
        for policy in [
            SamplingPolicy::Fraction(0.3),
            SamplingPolicy::Count(20),
            SamplingPolicy::Count(500),
        ] {
            let drawn = sample(&items, &policy, &mut rng);
            assert_eq!(drawn.len(), sample_size(&policy, items.len()));
            let unique: HashSet<usize> = drawn.iter().copied().collect();
            assert_eq!(unique.len(), drawn.len());
            assert!(drawn.iter().all(|item| *item < 50));
        }
    }

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        let items: Vec<char> = "abcdefghijklmnop".chars().collect();
        let policy = SamplingPolicy::Count(5);
        let first = sample(&items, &policy, &mut SeededRng::new(99));
        let second = sample(&items, &policy, &mut SeededRng::new(99));
        assert_eq!(first, second);
    }

    #[test]
    fn sample_of_empty_group_is_empty() {
        let items: Vec<u8> = Vec::new();
        let mut rng = SeededRng::new(1);
        assert!(sample(&items, &SamplingPolicy::Count(3), &mut rng).is_empty());
        assert!(sample(&items, &SamplingPolicy::Fraction(1.0), &mut rng).is_empty());
    }

    #[test]
    fn sample_consumes_shared_rng_sequentially() {
        let items: Vec<usize> = (0..100).collect();
        let policy = SamplingPolicy::Count(10);
        let mut rng = SeededRng::new(5);
        let first = sample(&items, &policy, &mut rng);
        let second = sample(&items, &policy, &mut rng);
        assert_ne!(first, second);
    }
}
