//! Discrete (weighted) sampling.
//!
//! The only thing the model needs from its random source is a uniform
//! `f64` in `[0, 1)`; everything else happens here.

use rand::Rng;

use crate::error::{MarkovError, Result};

/// Maximum distance between the sum of a probability vector and 1.0.
pub const TOLERANCE: f64 = 1e-6;

/// Draws an index with probability `probabilities[i]`.
///
/// Walks the cumulative sum in index order and returns the first index
/// whose cumulative sum strictly exceeds a uniform draw `u` in `[0, 1)`.
///
/// # Errors
/// Returns `InvalidDistribution` if the vector is empty, contains a negative
/// or non-finite entry, or does not sum to 1 within `TOLERANCE`.
pub fn discrete<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> Result<usize> {
	validate(probabilities)?;
	let u: f64 = rng.random();
	Ok(select(probabilities, u))
}

/// Draws an index with probability proportional to `weights[i]`.
///
/// # Errors
/// Returns `InvalidDistribution` if `weights` is empty or all zero.
pub fn weighted<R: Rng + ?Sized>(weights: &[usize], rng: &mut R) -> Result<usize> {
	let total: usize = weights.iter().sum();
	if total == 0 {
		return Err(MarkovError::InvalidDistribution("weights sum to zero".to_owned()));
	}
	let total = total as f64;
	let probabilities: Vec<f64> = weights.iter().map(|&w| w as f64 / total).collect();
	discrete(&probabilities, rng)
}

fn validate(probabilities: &[f64]) -> Result<()> {
	if probabilities.is_empty() {
		return Err(MarkovError::InvalidDistribution("empty probability vector".to_owned()));
	}

	let mut sum = 0.0;
	for (index, &p) in probabilities.iter().enumerate() {
		if !p.is_finite() || p < 0.0 {
			return Err(MarkovError::InvalidDistribution(format!(
				"probability at index {index} is {p}"
			)));
		}
		sum += p;
	}

	if (sum - 1.0).abs() > TOLERANCE {
		return Err(MarkovError::InvalidDistribution(format!(
			"probabilities sum to {sum}, expected 1.0"
		)));
	}
	Ok(())
}

/// Cumulative walk for a validated vector.
///
/// Rounding can leave the final cumulative sum just below 1.0, so a draw
/// close to 1.0 may never be exceeded. In that case the last index with a
/// nonzero probability is returned instead of running off the end.
pub(crate) fn select(probabilities: &[f64], u: f64) -> usize {
	let mut cumulative = 0.0;
	let mut last_nonzero = 0;
	for (index, &p) in probabilities.iter().enumerate() {
		if p > 0.0 {
			last_nonzero = index;
		}
		cumulative += p;
		if cumulative > u {
			return index;
		}
	}
	last_nonzero
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn select_walks_cumulative_sum() {
		let probabilities = [0.25, 0.0, 0.5, 0.25];
		assert_eq!(select(&probabilities, 0.0), 0);
		assert_eq!(select(&probabilities, 0.2499), 0);
		assert_eq!(select(&probabilities, 0.25), 2);
		assert_eq!(select(&probabilities, 0.7499), 2);
		assert_eq!(select(&probabilities, 0.75), 3);
	}

	#[test]
	fn select_never_returns_zero_weight_index() {
		let probabilities = [0.0, 0.0, 1.0, 0.0];
		for u in [0.0, 0.3, 0.999_999] {
			assert_eq!(select(&probabilities, u), 2);
		}
	}

	#[test]
	fn rounding_shortfall_falls_back_to_last_nonzero() {
		// Ten 0.1 steps accumulate to slightly less than 1.0.
		let mut probabilities = vec![0.1; 10];
		probabilities.extend([0.0, 0.0]);
		let u = 1.0 - f64::EPSILON / 2.0;
		assert_eq!(select(&probabilities, u), 9);
	}

	#[test]
	fn shortfall_beyond_tolerance_is_still_guarded() {
		let probabilities = [0.5, 0.4999999, 0.0];
		assert_eq!(select(&probabilities, 0.99999995), 1);
	}

	#[test]
	fn rejects_invalid_distributions() {
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(discrete(&[], &mut rng), Err(MarkovError::InvalidDistribution(_))));
		assert!(matches!(discrete(&[0.5, -0.1, 0.6], &mut rng), Err(MarkovError::InvalidDistribution(_))));
		assert!(matches!(discrete(&[0.5, f64::NAN], &mut rng), Err(MarkovError::InvalidDistribution(_))));
		assert!(matches!(discrete(&[0.2, 0.2], &mut rng), Err(MarkovError::InvalidDistribution(_))));
		assert!(matches!(weighted(&[0, 0, 0], &mut rng), Err(MarkovError::InvalidDistribution(_))));
	}

	#[test]
	fn degenerate_distribution_always_hits() {
		let mut rng = StdRng::seed_from_u64(2);
		for _ in 0..1000 {
			assert_eq!(weighted(&[0, 0, 7, 0], &mut rng).unwrap(), 2);
		}
	}

	#[test]
	fn weighted_matches_proportions() {
		let mut rng = StdRng::seed_from_u64(3);
		let weights = [1, 0, 3];
		let draws = 10_000;
		let mut counts = [0usize; 3];
		for _ in 0..draws {
			counts[weighted(&weights, &mut rng).unwrap()] += 1;
		}
		assert_eq!(counts[1], 0);
		let first = counts[0] as f64 / draws as f64;
		let last = counts[2] as f64 / draws as f64;
		assert!((first - 0.25).abs() < 0.05, "expected ~0.25, got {first}");
		assert!((last - 0.75).abs() < 0.05, "expected ~0.75, got {last}");
	}
}
