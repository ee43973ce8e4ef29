use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ModelError;
use super::context_table::ContextTable;

/// Character-level window language model.
///
/// Learns, for every fixed-length window of a corpus, the distribution of
/// the character that follows it, and extends a seed text one character at a
/// time by weighted random sampling from those distributions.
///
/// # Responsibilities
/// - Build the context table from a corpus (`train`)
/// - Derive the per-window probabilities once the scan is complete
/// - Generate text by repeated weighted sampling (`generate`)
///
/// # Invariants
/// - The window length is at least 1 and never changes after construction
/// - The table is only written by `train`; `generate` reads it
/// - The random source is owned by the model, so seeded instances are
///   reproducible in isolation
#[derive(Debug)]
pub struct LanguageModel {
	/// Window length used as the predictive context.
	window_length: usize,
	/// Random source for sampling, seeded or OS-seeded at construction.
	rng: StdRng,
	/// The learned window-to-observations mapping.
	table: ContextTable,
}

impl LanguageModel {
	/// Creates a model with an OS-seeded random source.
	///
	/// Generating texts from this model multiple times produces different
	/// random texts.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidWindowLength`] if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self, ModelError> {
		Self::build(window_length, StdRng::from_os_rng())
	}

	/// Creates a model whose random source starts from `seed`.
	///
	/// Generating texts from this model multiple times with the same seed
	/// value produces the same random texts.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidWindowLength`] if `window_length` is 0.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self, ModelError> {
		Self::build(window_length, StdRng::seed_from_u64(seed))
	}

	fn build(window_length: usize, rng: StdRng) -> Result<Self, ModelError> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength);
		}
		Ok(Self { window_length, rng, table: ContextTable::new() })
	}

	/// Window length fixed at construction.
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Read-only view of the learned table.
	pub fn table(&self) -> &ContextTable {
		&self.table
	}

	/// Learns the corpus: counts every window/next-character pair, then
	/// derives the per-window probabilities.
	///
	/// # Behavior
	/// - Leading and trailing corpus whitespace is stripped before the scan.
	/// - An empty or too-short corpus leaves the table empty; this is not an
	///   error.
	/// - Probabilities are derived after the full scan, so every total
	///   reflects the final counts.
	/// - Training again accumulates further counts and recomputes the
	///   probabilities from the accumulated counts.
	pub fn train(&mut self, corpus: &str) {
		self.table.scan(corpus.trim(), self.window_length);
		self.table.derive_probabilities();
	}

	/// Generates text starting from `seed_text` until it is
	/// `target_length` characters long or the current window was never
	/// observed.
	///
	/// # Behavior
	/// - A seed with fewer characters than the window length is returned
	///   unchanged; no generation is attempted.
	/// - A `target_length` that does not exceed the seed's length returns
	///   the seed unchanged.
	/// - Otherwise the last window of the seed is looked up; each step draws
	///   one uniform value, samples the next character, appends it and
	///   slides the window forward by one character.
	/// - A window absent from the table ends generation with the text
	///   accumulated so far. This is an expected end, not an error.
	pub fn generate(&mut self, seed_text: &str, target_length: usize) -> String {
		let mut output: Vec<char> = seed_text.chars().collect();
		if output.len() < self.window_length {
			return seed_text.to_owned();
		}

		let mut window: Vec<char> = output[output.len() - self.window_length..].to_vec();
		while output.len() < target_length {
			let key: String = window.iter().collect();
			let Some(list) = self.table.get(&key) else {
				// Unseen window, generation ends here
				break;
			};

			let draw: f64 = self.rng.random();
			let Some(next) = list.sample(draw) else {
				break;
			};

			output.push(next);
			window.remove(0);
			window.push(next);
		}

		output.into_iter().collect()
	}
}

impl fmt::Display for LanguageModel {
	/// Renders every window and its observations, one window per line.
	///
	/// Diagnostic output only; the exact format is not stable.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (window, list) in self.table.iter() {
			writeln!(f, "{window} : {list}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_window_length_is_rejected() {
		assert_eq!(LanguageModel::new(0).unwrap_err(), ModelError::InvalidWindowLength);
		assert_eq!(LanguageModel::with_seed(0, 20).unwrap_err(), ModelError::InvalidWindowLength);
	}

	#[test]
	fn single_choice_corpus_generates_deterministically() {
		let mut model = LanguageModel::with_seed(1, 20).unwrap();
		model.train("aaaa");

		let list = model.table().get("a").unwrap();
		assert_eq!(list.total(), 3);
		let data = list.iter().next().unwrap();
		assert_eq!(data.chr, 'a');
		assert_eq!(data.p, 1.0);
		assert_eq!(data.cp, 1.0);

		// Every draw lands on the only observation
		assert_eq!(model.generate("a", 5), "aaaaa");
	}

	#[test]
	fn alternating_corpus_follows_its_only_transitions() {
		let mut model = LanguageModel::with_seed(1, 20).unwrap();
		// The trim makes the scan start at 'a' and end at 'b'
		model.train("  abab  ");

		assert_eq!(model.generate("a", 5), "ababa");
	}

	#[test]
	fn seed_shorter_than_the_window_is_returned_unchanged() {
		let mut model = LanguageModel::with_seed(4, 20).unwrap();
		model.train("abcdefgh");
		assert_eq!(model.generate("ab", 10), "ab");
	}

	#[test]
	fn unseen_window_returns_exactly_the_seed() {
		let mut model = LanguageModel::with_seed(3, 20).unwrap();
		model.train("abcabcabc");
		assert_eq!(model.generate("xyz", 10), "xyz");
	}

	#[test]
	fn target_not_above_seed_length_returns_the_seed() {
		let mut model = LanguageModel::with_seed(3, 20).unwrap();
		model.train("abcabcabc");
		assert_eq!(model.generate("abc", 2), "abc");
		assert_eq!(model.generate("abc", 3), "abc");
	}

	#[test]
	fn generation_reaches_the_target_length_on_a_cyclic_corpus() {
		let mut model = LanguageModel::with_seed(3, 20).unwrap();
		model.train("abcabcabc");

		// Every window of the cycle has exactly one continuation
		assert_eq!(model.generate("abc", 9), "abcabcabc");
	}

	#[test]
	fn equal_seeds_generate_equal_texts() {
		let corpus = "it was the best of times, it was the worst of times";

		let mut first = LanguageModel::with_seed(3, 42).unwrap();
		first.train(corpus);
		let mut second = LanguageModel::with_seed(3, 42).unwrap();
		second.train(corpus);

		assert_eq!(first.generate("it ", 40), second.generate("it ", 40));
	}

	#[test]
	fn retraining_accumulates_counts() {
		let mut model = LanguageModel::with_seed(1, 20).unwrap();
		model.train("ab");
		model.train("ab");

		let list = model.table().get("a").unwrap();
		assert_eq!(list.total(), 2);
		let data = list.iter().next().unwrap();
		assert_eq!(data.count, 2);
		assert_eq!(data.p, 1.0);
		assert_eq!(data.cp, 1.0);
	}

	#[test]
	fn dump_lists_every_window_with_its_counts() {
		let mut model = LanguageModel::with_seed(1, 20).unwrap();
		model.train("aaaa");

		let dump = format!("{model}");
		assert!(dump.contains("a : "));
		assert!(dump.contains("('a' 3 p=1.0000 cp=1.0000)"));
	}
}
