use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};

/// Lower bound on the sample, whatever `sample_size` the caller asked for.
const MIN_SAMPLE: usize = 20;
/// Candidates scored per requested recommendation, at least.
const CANDIDATES_PER_RESULT: usize = 5;

/// Number of pool ids to score: `sample_size`, raised to `max(top_k * 5, 20)`,
/// capped by the pool.
#[must_use]
pub fn sample_target(pool_len: usize, top_k: usize, sample_size: usize) -> usize {
  let dynamic_floor = top_k.saturating_mul(CANDIDATES_PER_RESULT).max(MIN_SAMPLE);
  pool_len.min(sample_size.max(dynamic_floor))
}

/// Pick `target` ids from `pool` uniformly without replacement.
///
/// A pool no larger than `target` is returned whole and in order. With a
/// `seed` the pick is reproducible.
#[must_use]
pub fn draw_sample(pool: &[String], target: usize, seed: Option<u64>) -> Vec<String> {
  if pool.len() <= target {
    return pool.to_vec();
  }
  match seed {
    Some(seed) => pick(pool, target, &mut StdRng::seed_from_u64(seed)),
    None => pick(pool, target, &mut rand::thread_rng()),
  }
}

fn pick<R: Rng + ?Sized>(pool: &[String], target: usize, rng: &mut R) -> Vec<String> {
  index::sample(rng, pool.len(), target)
    .into_iter()
    .map(|i| pool[i].clone())
    .collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  fn pool(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item-{i}")).collect()
  }

  #[test]
  fn target_uses_dynamic_floor() {
    // floor of 20 beats a small sample_size
    assert_eq!(sample_target(1000, 1, 5), 20);
    // top_k * 5 beats both
    assert_eq!(sample_target(1000, 30, 100), 150);
    // sample_size wins when larger
    assert_eq!(sample_target(1000, 10, 100), 100);
  }

  #[test]
  fn target_is_capped_by_pool() {
    assert_eq!(sample_target(7, 10, 100), 7);
    assert_eq!(sample_target(0, 10, 100), 0);
  }

  #[test]
  fn small_pool_is_used_whole_and_in_order() {
    let ids = pool(5);
    assert_eq!(draw_sample(&ids, 5, None), ids);
    assert_eq!(draw_sample(&ids, 50, None), ids);
  }

  #[test]
  fn large_pool_is_sampled_without_replacement() {
    let ids = pool(500);
    let sample = draw_sample(&ids, 100, None);

    assert_eq!(sample.len(), 100);
    let unique: HashSet<_> = sample.iter().collect();
    assert_eq!(unique.len(), 100);
    assert!(sample.iter().all(|id| ids.contains(id)));
  }

  #[test]
  fn seeded_sampling_is_reproducible() {
    let ids = pool(500);
    let first = draw_sample(&ids, 40, Some(7));
    let second = draw_sample(&ids, 40, Some(7));
    assert_eq!(first, second);
  }
}
