use serde::Serialize;

use crate::config::ModelConfig;

/// Serializable snapshot of a `FrequencyModel`, for diagnostics.
///
/// Not a persistence format: a summary cannot be turned back into a model.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModelSummary {
	pub config: ModelConfig,
	pub distinct_kgrams: usize,
	/// Equal to the length of the source text.
	pub total_occurrences: usize,
	/// One entry per k-gram, sorted lexicographically.
	pub contexts: Vec<ContextSummary>,
}

/// Counts for a single k-gram.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContextSummary {
	pub kgram: String,
	pub occurrences: usize,
	/// Observed followers and their counts, in ascending symbol order.
	pub followers: Vec<(char, usize)>,
}
