//! Error type shared by the model, the sampler and the generator.

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = MarkovError> = std::result::Result<T, E>;

/// Failures raised while building a model or generating from it.
///
/// None of these are retried or recovered internally: every operation
/// returns the error to its immediate caller and leaves no partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkovError {
	/// The corpus (or a seed) cannot support a model of the requested order.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A queried k-gram does not have the model's order.
	#[error("k-gram must be of length {expected}, got {actual}")]
	InvalidArgument {
		/// The model's order.
		expected: usize,
		/// Length (in symbols) of the k-gram that was passed.
		actual: usize,
	},

	/// A trajectory was requested that is shorter than what is already produced.
	#[error("trajectory length {requested} is shorter than the minimum {minimum}")]
	InvalidLength {
		/// Requested total length.
		requested: usize,
		/// Smallest acceptable length (the order for a fresh run).
		minimum: usize,
	},

	/// Prediction was requested from a k-gram never seen in the corpus.
	#[error("k-gram {0:?} does not appear in the text")]
	UnknownContext(String),

	/// The corpus contains a symbol outside the model's alphabet.
	#[error("symbol {symbol:?} at position {position} is outside the alphabet of size {alphabet_size}")]
	SymbolOutOfRange {
		/// The offending symbol.
		symbol: char,
		/// Position of the symbol in the corpus (in symbols, not bytes).
		position: usize,
		/// Size of the alphabet the model was configured with.
		alphabet_size: usize,
	},

	/// A probability vector handed to the sampler is not a distribution.
	#[error("invalid distribution: {0}")]
	InvalidDistribution(String),

	/// Model configuration failed validation.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// Invariant violation that should not occur.
	#[error("internal error: {0}")]
	Internal(String),
}
