use rand::Rng;

use crate::error::Result;
use crate::sampling;

/// Statistics for one k-gram.
///
/// A `Context` is a node of the Markov chain: it counts how often its
/// k-gram occurred and, for every symbol of the alphabet, how often that
/// symbol came right after it.
///
/// ## Invariants
/// - `followers.len()` is the alphabet size
/// - `followers` sums to `occurrences`
/// - `occurrences >= 1` once the context is stored in a model
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Context {
	/// Number of times the k-gram occurred in the circular text.
	occurrences: usize,
	/// Dense follower counts indexed by symbol.
	followers: Vec<usize>,
}

impl Context {
	/// Creates an empty context for an alphabet of `alphabet_size` symbols.
	pub(crate) fn new(alphabet_size: usize) -> Self {
		Self { occurrences: 0, followers: vec![0; alphabet_size] }
	}

	/// Records one occurrence of the k-gram followed by symbol `index`.
	pub(crate) fn record(&mut self, index: usize) {
		self.occurrences += 1;
		self.followers[index] += 1;
	}

	pub(crate) fn occurrences(&self) -> usize {
		self.occurrences
	}

	/// Number of times symbol `index` followed the k-gram.
	pub(crate) fn count(&self, index: usize) -> usize {
		self.followers.get(index).copied().unwrap_or(0)
	}

	/// `(index, count)` pairs for every follower seen at least once, in
	/// ascending index order.
	pub(crate) fn nonzero(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.followers
			.iter()
			.enumerate()
			.filter(|(_, count)| **count > 0)
			.map(|(index, count)| (index, *count))
	}

	/// Conditional distribution of the next symbol.
	pub(crate) fn probabilities(&self) -> Vec<f64> {
		let total = self.occurrences as f64;
		self.followers.iter().map(|&count| count as f64 / total).collect()
	}

	/// Draws the index of the next symbol, weighted by follower counts.
	///
	/// The weights sum to `occurrences`, so each index is drawn with
	/// probability `followers[index] / occurrences`.
	pub(crate) fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
		sampling::weighted(&self.followers, rng)
	}
}
