use std::collections::HashMap;
use std::fmt;

use log::debug;
use rand::Rng;

use super::alphabet::Alphabet;
use super::context::Context;
use super::summary::{ContextSummary, ModelSummary};
use crate::config::ModelConfig;
use crate::error::{MarkovError, Result};

/// Fixed-order k-gram model of a circular text.
///
/// The text is read as if its end wrapped around to its beginning, so each
/// of its `len` positions yields one k-gram and one following symbol.
///
/// # Responsibilities
/// - Count every k-gram of the circular text
/// - Count, per k-gram, every symbol that follows it
/// - Draw the next symbol of a k-gram proportionally to those counts
///
/// # Invariants
/// - `order >= 1`, and every key of `contexts` has exactly `order` symbols
/// - Every symbol ever recorded lies in `alphabet`
/// - The occurrence counts of all contexts sum to the text length
/// - The model is never mutated after construction
#[derive(Clone, Debug)]
pub struct FrequencyModel {
	/// Length of every k-gram.
	order: usize,

	/// Symbol range of the text and of every prediction.
	alphabet: Alphabet,

	/// Statistics keyed by k-gram.
	contexts: HashMap<String, Context>,
}

impl FrequencyModel {
	/// Builds a model of order `order` over the ASCII alphabet.
	///
	/// # Errors
	/// See [`FrequencyModel::with_config`].
	pub fn new(text: &str, order: usize) -> Result<Self> {
		Self::with_config(text, &ModelConfig::new(order))
	}

	/// Builds a model from `text` with an explicit configuration.
	///
	/// # Errors
	/// - `InvalidConfig` if the configuration is invalid
	/// - `InvalidInput` if `text` is empty or shorter than the order
	/// - `SymbolOutOfRange` if `text` contains a symbol outside the alphabet
	pub fn with_config(text: &str, config: &ModelConfig) -> Result<Self> {
		config.validate()?;
		let alphabet = config.alphabet()?;
		let order = config.order;

		let symbols: Vec<char> = text.chars().collect();
		if symbols.is_empty() {
			return Err(MarkovError::InvalidInput("text is empty".to_owned()));
		}
		if order > symbols.len() {
			return Err(MarkovError::InvalidInput(format!(
				"order {order} exceeds the text length {}",
				symbols.len()
			)));
		}

		// Reject out-of-range symbols before anything is counted
		let indices = symbols
			.iter()
			.enumerate()
			.map(|(position, &symbol)| {
				alphabet.index_of(symbol).ok_or(MarkovError::SymbolOutOfRange {
					symbol,
					position,
					alphabet_size: alphabet.size(),
				})
			})
			.collect::<Result<Vec<usize>>>()?;

		let len = symbols.len();
		let mut contexts: HashMap<String, Context> = HashMap::new();
		let mut kgram = String::with_capacity(order);
		for i in 0..len {
			kgram.clear();
			kgram.extend((i..i + order).map(|j| symbols[j % len]));
			let next = indices[(i + order) % len];

			match contexts.get_mut(kgram.as_str()) {
				Some(context) => context.record(next),
				None => {
					let mut context = Context::new(alphabet.size());
					context.record(next);
					contexts.insert(kgram.clone(), context);
				}
			}
		}

		debug!(
			"built order-{order} model: {} distinct k-grams from {len} symbols",
			contexts.len()
		);

		Ok(Self { order, alphabet, contexts })
	}

	/// Returns the order of the model (`k`).
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the symbol range the model was built over.
	pub fn alphabet(&self) -> Alphabet {
		self.alphabet
	}

	/// Number of distinct k-grams observed.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Sum of all k-gram occurrences, equal to the length of the source text.
	pub fn total_occurrences(&self) -> usize {
		self.contexts.values().map(Context::occurrences).sum()
	}

	/// Whether `kgram` was observed. Never fails, whatever its length.
	pub fn contains(&self, kgram: &str) -> bool {
		self.contexts.contains_key(kgram)
	}

	/// Iterates over the observed k-grams in no particular order.
	pub fn kgrams(&self) -> impl Iterator<Item = &str> {
		self.contexts.keys().map(String::as_str)
	}

	/// Number of times `kgram` occurred in the text, 0 if never.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `kgram` does not have `order` symbols.
	pub fn frequency(&self, kgram: &str) -> Result<usize> {
		self.check_length(kgram)?;
		Ok(self.contexts.get(kgram).map_or(0, Context::occurrences))
	}

	/// Number of times `symbol` immediately followed `kgram`, 0 if never.
	///
	/// A symbol outside the alphabet can never have been observed, so it
	/// also yields 0.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `kgram` does not have `order` symbols.
	pub fn frequency_of(&self, kgram: &str, symbol: char) -> Result<usize> {
		self.check_length(kgram)?;
		let count = match (self.contexts.get(kgram), self.alphabet.index_of(symbol)) {
			(Some(context), Some(index)) => context.count(index),
			_ => 0,
		};
		Ok(count)
	}

	/// Conditional distribution of the symbol following `kgram`, one entry
	/// per alphabet symbol.
	///
	/// # Errors
	/// - `InvalidArgument` if `kgram` does not have `order` symbols
	/// - `UnknownContext` if `kgram` was never observed
	pub fn probabilities(&self, kgram: &str) -> Result<Vec<f64>> {
		Ok(self.context(kgram)?.probabilities())
	}

	/// Draws the symbol following `kgram`, with probability proportional to
	/// how often it followed `kgram` in the text.
	///
	/// Every call is an independent draw from `rng`.
	///
	/// # Errors
	/// - `InvalidArgument` if `kgram` does not have `order` symbols
	/// - `UnknownContext` if `kgram` was never observed
	/// - `Internal` if the sampled index maps to no symbol; unreachable, since
	///   only indices recorded from real symbols of the text carry weight
	pub fn predict_next<R: Rng + ?Sized>(&self, kgram: &str, rng: &mut R) -> Result<char> {
		let index = self.context(kgram)?.predict(rng)?;
		self.alphabet
			.symbol_at(index)
			.ok_or_else(|| MarkovError::Internal(format!("sampled index {index} has no symbol")))
	}

	/// Diagnostic view of the model, k-grams sorted lexicographically.
	pub fn summary(&self) -> ModelSummary {
		let contexts = self
			.sorted_contexts()
			.into_iter()
			.map(|(kgram, context)| ContextSummary {
				kgram: kgram.to_owned(),
				occurrences: context.occurrences(),
				followers: self.followers(context).collect(),
			})
			.collect();

		ModelSummary {
			config: ModelConfig { order: self.order, alphabet_size: self.alphabet.size() },
			distinct_kgrams: self.len(),
			total_occurrences: self.total_occurrences(),
			contexts,
		}
	}

	fn check_length(&self, kgram: &str) -> Result<()> {
		let actual = kgram.chars().count();
		if actual != self.order {
			return Err(MarkovError::InvalidArgument { expected: self.order, actual });
		}
		Ok(())
	}

	fn context(&self, kgram: &str) -> Result<&Context> {
		self.check_length(kgram)?;
		self.contexts
			.get(kgram)
			.ok_or_else(|| MarkovError::UnknownContext(kgram.to_owned()))
	}

	fn sorted_contexts(&self) -> Vec<(&str, &Context)> {
		let mut entries: Vec<(&str, &Context)> =
			self.contexts.iter().map(|(kgram, context)| (kgram.as_str(), context)).collect();
		entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
		entries
	}

	fn followers<'a>(&'a self, context: &'a Context) -> impl Iterator<Item = (char, usize)> + 'a {
		context
			.nonzero()
			.filter_map(|(index, count)| self.alphabet.symbol_at(index).map(|symbol| (symbol, count)))
	}
}

/// One line per k-gram in lexicographic order: the k-gram, a colon, then
/// each observed follower and its count in ascending symbol order.
///
/// `banana` at order 2 renders as:
/// ```text
/// ab: a 1
/// an: a 2
/// ba: n 1
/// na: b 1 n 1
/// ```
impl fmt::Display for FrequencyModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (kgram, context) in self.sorted_contexts() {
			write!(f, "{kgram}: ")?;
			for (symbol, count) in self.followers(context) {
				write!(f, "{symbol} {count} ")?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn banana_order_two() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		assert_eq!(model.order(), 2);
		// "ab" only exists through the wrap from the last 'a' to the first 'b'
		assert_eq!(model.len(), 4);
		assert_eq!(model.frequency("ab").unwrap(), 1);
		assert_eq!(model.frequency("ba").unwrap(), 1);
		assert_eq!(model.frequency("an").unwrap(), 2);
		assert_eq!(model.frequency("na").unwrap(), 2);
		assert_eq!(model.frequency_of("ba", 'n').unwrap(), 1);
		assert_eq!(model.frequency_of("an", 'a').unwrap(), 2);
		assert_eq!(model.frequency_of("na", 'b').unwrap(), 1);
		assert_eq!(model.frequency_of("na", 'n').unwrap(), 1);
		assert_eq!(model.frequency_of("na", 'a').unwrap(), 0);
	}

	#[test]
	fn banana_display_is_sorted() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		assert_eq!(model.to_string(), "ab: a 1 \nan: a 2 \nba: n 1 \nna: b 1 n 1 \n");
	}

	#[test]
	fn order_equal_to_length_wraps_fully() {
		let model = FrequencyModel::new("abc", 3).unwrap();
		assert_eq!(model.frequency("abc").unwrap(), 1);
		assert_eq!(model.frequency("bca").unwrap(), 1);
		assert_eq!(model.frequency("cab").unwrap(), 1);
		assert_eq!(model.frequency_of("abc", 'a').unwrap(), 1);
		assert_eq!(model.frequency_of("cab", 'c').unwrap(), 1);
	}

	#[test]
	fn single_symbol_text() {
		let model = FrequencyModel::new("x", 1).unwrap();
		assert_eq!(model.frequency("x").unwrap(), 1);
		assert_eq!(model.frequency_of("x", 'x').unwrap(), 1);
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(model.predict_next("x", &mut rng).unwrap(), 'x');
	}

	#[test]
	fn empty_text_is_invalid_input() {
		let err = FrequencyModel::new("", 1).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidInput(_)));
	}

	#[test]
	fn order_longer_than_text_is_invalid_input() {
		let err = FrequencyModel::new("abc", 4).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidInput(_)));
	}

	#[test]
	fn zero_order_is_invalid_config() {
		let err = FrequencyModel::new("abc", 0).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidConfig(_)));
	}

	#[test]
	fn non_ascii_symbol_is_rejected() {
		let err = FrequencyModel::new("caf\u{e9}", 1).unwrap_err();
		assert_eq!(
			err,
			MarkovError::SymbolOutOfRange { symbol: '\u{e9}', position: 3, alphabet_size: 128 }
		);
	}

	#[test]
	fn wider_alphabet_accepts_non_ascii() {
		let config = ModelConfig::new(1).with_alphabet_size(256);
		let model = FrequencyModel::with_config("caf\u{e9}", &config).unwrap();
		assert_eq!(model.frequency_of("f", '\u{e9}').unwrap(), 1);
		assert_eq!(model.frequency_of("\u{e9}", 'c').unwrap(), 1);
	}

	#[test]
	fn wrong_length_is_invalid_argument() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		let expected = MarkovError::InvalidArgument { expected: 2, actual: 3 };
		assert_eq!(model.frequency("ban").unwrap_err(), expected);
		assert_eq!(model.frequency_of("ban", 'a').unwrap_err(), expected);
		assert_eq!(model.predict_next("ban", &mut rng).unwrap_err(), expected);
		assert_eq!(
			model.frequency("b").unwrap_err(),
			MarkovError::InvalidArgument { expected: 2, actual: 1 }
		);
	}

	#[test]
	fn unseen_kgram_has_zero_frequency() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		assert_eq!(model.frequency("zz").unwrap(), 0);
		assert_eq!(model.frequency_of("zz", 'a').unwrap(), 0);
		assert_eq!(model.frequency_of("an", '\u{e9}').unwrap(), 0);
	}

	#[test]
	fn unseen_kgram_cannot_be_predicted() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(
			model.predict_next("zz", &mut rng).unwrap_err(),
			MarkovError::UnknownContext("zz".to_owned())
		);
		assert!(matches!(model.probabilities("zz"), Err(MarkovError::UnknownContext(_))));
	}

	#[test]
	fn probabilities_match_counts() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		let probabilities = model.probabilities("na").unwrap();
		assert_eq!(probabilities.len(), 128);
		assert_eq!(probabilities['b' as usize], 0.5);
		assert_eq!(probabilities['n' as usize], 0.5);
		assert_eq!(probabilities.iter().sum::<f64>(), 1.0);
	}

	#[test]
	fn predict_converges_to_frequencies() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		let mut rng = StdRng::seed_from_u64(126);
		let draws = 10_000;
		let mut b = 0;
		for _ in 0..draws {
			match model.predict_next("na", &mut rng).unwrap() {
				'b' => b += 1,
				'n' => (),
				other => panic!("unexpected prediction {other:?}"),
			}
		}
		let ratio = b as f64 / draws as f64;
		assert!((ratio - 0.5).abs() < 0.05, "expected ~0.5, got {ratio}");
	}

	#[test]
	fn summary_lists_sorted_contexts() {
		let model = FrequencyModel::new("banana", 2).unwrap();
		let summary = model.summary();
		assert_eq!(summary.distinct_kgrams, 4);
		assert_eq!(summary.total_occurrences, 6);
		let kgrams: Vec<&str> = summary.contexts.iter().map(|c| c.kgram.as_str()).collect();
		assert_eq!(kgrams, vec!["ab", "an", "ba", "na"]);
		assert_eq!(summary.contexts[3].followers, vec![('b', 1), ('n', 1)]);
	}

	#[test]
	fn model_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<FrequencyModel>();
	}
}
