//! Configuration for model construction and trajectory generation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};
use crate::model::alphabet::Alphabet;

/// Number of symbols in the default alphabet (7-bit ASCII).
pub const DEFAULT_ALPHABET_SIZE: usize = 128;

/// Parameters of a `FrequencyModel`.
///
/// # Invariants
/// - `order >= 1`
/// - `alphabet_size` is a valid `Alphabet` size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
	/// Length of every k-gram (`k`).
	pub order: usize,
	/// Number of symbols (`A`); valid symbols have code points in `[0, A)`.
	pub alphabet_size: usize,
}

impl ModelConfig {
	/// Creates a configuration of order `order` over the ASCII alphabet.
	pub fn new(order: usize) -> Self {
		Self { order, ..Self::default() }
	}

	/// Replaces the alphabet size.
	#[must_use]
	pub fn with_alphabet_size(mut self, alphabet_size: usize) -> Self {
		self.alphabet_size = alphabet_size;
		self
	}

	/// Validates the configuration.
	///
	/// # Errors
	/// Returns `InvalidConfig` if the order is zero or the alphabet size is invalid.
	pub fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(MarkovError::InvalidConfig("order must be >= 1".to_owned()));
		}
		self.alphabet().map(|_| ())
	}

	/// Returns the alphabet described by `alphabet_size`.
	pub fn alphabet(&self) -> Result<Alphabet> {
		Alphabet::new(self.alphabet_size)
	}
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { order: 1, alphabet_size: DEFAULT_ALPHABET_SIZE }
	}
}

/// Parameters of a single generation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenerationConfig {
	/// Total number of symbols to produce (`T`), seed included.
	pub length: usize,
	/// Optional RNG seed. `None` draws a fresh seed from the thread RNG.
	pub seed: Option<u64>,
}

impl GenerationConfig {
	/// Creates an unseeded run of `length` symbols.
	pub fn new(length: usize) -> Self {
		Self { length, seed: None }
	}

	/// Fixes the RNG seed so that runs are reproducible.
	#[must_use]
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Builds the random source for this run.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_rng(&mut rand::rng()),
		}
	}
}
