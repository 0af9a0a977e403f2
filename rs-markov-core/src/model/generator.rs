use std::collections::VecDeque;

use log::{debug, trace};
use rand::Rng;

use super::frequency_model::FrequencyModel;
use crate::error::{MarkovError, Result};

/// Walks a `FrequencyModel` to produce a trajectory.
///
/// # Responsibilities
/// - Keep the last `k` symbols as the conditioning window
/// - Ask the model for the next symbol, append it, slide the window
///
/// # Invariants
/// - `window` always holds exactly `model.order()` symbols
/// - `output` starts with the seed and ends with `window`
///
/// A generator borrows its model read-only, so any number of them can run
/// over the same model.
#[derive(Debug)]
pub struct TrajectoryGenerator<'a> {
	model: &'a FrequencyModel,
	window: VecDeque<char>,
	output: String,
	/// Number of symbols in `output`, kept so lengths are O(1) on non-ASCII text.
	produced: usize,
}

impl<'a> TrajectoryGenerator<'a> {
	/// Starts a trajectory seeded with the first `k` symbols of `source`.
	///
	/// `source` should be the text the model was built from, which
	/// guarantees that every window reached later is a known k-gram.
	///
	/// # Errors
	/// Returns `InvalidInput` if `source` has fewer than `k` symbols.
	pub fn new(model: &'a FrequencyModel, source: &str) -> Result<Self> {
		let order = model.order();
		let window: VecDeque<char> = source.chars().take(order).collect();
		if window.len() < order {
			return Err(MarkovError::InvalidInput(format!(
				"seed needs {order} symbols, source has {}",
				window.len()
			)));
		}

		let output: String = window.iter().collect();
		Ok(Self { model, window, output, produced: order })
	}

	/// The current conditioning k-gram.
	pub fn window(&self) -> String {
		self.window.iter().collect()
	}

	/// The trajectory so far, seed included.
	pub fn output(&self) -> &str {
		&self.output
	}

	/// Number of symbols produced so far, seed included. Never below `k`.
	pub fn produced(&self) -> usize {
		self.produced
	}

	/// Consumes the generator and returns the trajectory so far.
	pub fn into_output(self) -> String {
		self.output
	}

	/// Predicts one symbol from the current window, appends it and slides
	/// the window forward.
	///
	/// # Errors
	/// Propagates `UnknownContext` when the window was never observed by
	/// the model (a model built from a different text than the seed). The
	/// generator is left unchanged in that case.
	pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<char> {
		let context = self.window();
		let next = self.model.predict_next(&context, rng)?;
		trace!("{context:?} -> {next:?}");

		self.output.push(next);
		self.produced += 1;
		self.window.pop_front();
		self.window.push_back(next);
		Ok(next)
	}

	/// Extends the trajectory until it holds `total_length` symbols and
	/// returns it.
	///
	/// # Errors
	/// - `InvalidLength` if `total_length` is below what is already produced
	///   (the order, for a fresh generator)
	/// - Any error from [`TrajectoryGenerator::step`]; the run is abandoned
	///   and no partial trajectory is returned
	pub fn run<R: Rng + ?Sized>(mut self, total_length: usize, rng: &mut R) -> Result<String> {
		if total_length < self.produced {
			return Err(MarkovError::InvalidLength { requested: total_length, minimum: self.produced });
		}

		let steps = total_length - self.produced;
		debug!("generating {steps} symbols from seed {:?}", self.window());
		for _ in 0..steps {
			self.step(rng)?;
		}
		Ok(self.output)
	}
}

/// Generates a trajectory of exactly `total_length` symbols from `model`,
/// seeded with the first `k` symbols of `source`.
///
/// # Errors
/// - `InvalidLength` if `total_length < k`
/// - `InvalidInput` if `source` has fewer than `k` symbols
/// - `UnknownContext` if a window is not a k-gram of the model
pub fn generate<R: Rng + ?Sized>(
	model: &FrequencyModel,
	source: &str,
	total_length: usize,
	rng: &mut R,
) -> Result<String> {
	let order = model.order();
	if total_length < order {
		return Err(MarkovError::InvalidLength { requested: total_length, minimum: order });
	}
	TrajectoryGenerator::new(model, source)?.run(total_length, rng)
}
