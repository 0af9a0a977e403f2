use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads the whole corpus, from `path` if given, otherwise from stdin.
///
/// - Reads the entire input into memory
/// - Keeps line breaks: they are symbols like any other
pub(crate) fn read_corpus(path: Option<&Path>) -> io::Result<String> {
	let mut contents = String::new();
	match path {
		Some(path) => File::open(path)?.read_to_string(&mut contents)?,
		None => io::stdin().lock().read_to_string(&mut contents)?,
	};
	Ok(contents)
}
