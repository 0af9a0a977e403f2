use serde::Serialize;

use crate::error::{MarkovError, Result};

/// Number of Unicode code points (`char::MAX` + 1).
const CODE_POINTS: usize = 0x11_0000;

/// A fixed, finite symbol range `[0, size)` of Unicode code points.
///
/// Each symbol maps to the dense index equal to its code point, so a
/// frequency vector of length `size` can be indexed directly.
///
/// Only built through [`Alphabet::new`] (or `ASCII`), so `size` is always valid.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct Alphabet {
	size: usize,
}

impl Alphabet {
	/// The 128 code points of 7-bit ASCII.
	pub const ASCII: Alphabet = Alphabet { size: 128 };

	/// Creates an alphabet of `size` symbols.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `size` is zero or exceeds the Unicode range.
	pub fn new(size: usize) -> Result<Self> {
		if size == 0 || size > CODE_POINTS {
			return Err(MarkovError::InvalidConfig(format!(
				"alphabet size must be between 1 and {CODE_POINTS}, got {size}"
			)));
		}
		Ok(Self { size })
	}

	/// Number of symbols (`A`).
	pub fn size(&self) -> usize {
		self.size
	}

	/// Returns the dense index of `symbol`, or `None` if it is out of range.
	pub fn index_of(&self, symbol: char) -> Option<usize> {
		let index = symbol as usize;
		(index < self.size).then_some(index)
	}

	/// Returns the symbol stored at `index`.
	///
	/// `None` for indices outside the alphabet and for surrogate code points.
	pub fn symbol_at(&self, index: usize) -> Option<char> {
		if index >= self.size {
			return None;
		}
		u32::try_from(index).ok().and_then(char::from_u32)
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		Self::ASCII
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ascii_bounds() {
		let ascii = Alphabet::ASCII;
		assert_eq!(ascii.index_of('a'), Some(97));
		assert_eq!(ascii.index_of('\u{7f}'), Some(127));
		assert_eq!(ascii.index_of('é'), None);
		assert_eq!(ascii.symbol_at(98), Some('b'));
		assert_eq!(ascii.symbol_at(128), None);
	}

	#[test]
	fn wider_alphabet_accepts_latin1() {
		let latin1 = Alphabet::new(256).unwrap();
		assert_eq!(latin1.index_of('é'), Some(0xe9));
		assert_eq!(latin1.symbol_at(0xe9), Some('é'));
	}

	#[test]
	fn surrogates_have_no_symbol() {
		let full = Alphabet::new(0x11_0000).unwrap();
		assert_eq!(full.symbol_at(0xd800), None);
	}

	#[test]
	fn invalid_sizes() {
		assert!(Alphabet::new(0).is_err());
		assert!(Alphabet::new(0x11_0001).is_err());
	}
}
