use std::collections::HashMap;

use super::observation::ObservationList;

/// The learned mapping from every observed window to its next-character
/// observations.
///
/// # Responsibilities
/// - Scan a corpus once, counting the character that follows each window
/// - Derive probabilities for every list after the scan is complete
/// - Serve read-only lookups during generation
///
/// # Invariants
/// - Every key has exactly the window length it was scanned with
/// - Every stored list holds at least one observation
#[derive(Debug, Default)]
pub struct ContextTable {
	windows: HashMap<String, ObservationList>,
}

impl ContextTable {
	/// Creates an empty table.
	pub(crate) fn new() -> Self {
		Self { windows: HashMap::new() }
	}

	/// Counts every window/next-character pair of `text`.
	///
	/// Windows are `window_length` characters long, counted in `char`s so
	/// multibyte text behaves like single-byte text. A text of
	/// `window_length` characters or fewer contributes nothing.
	///
	/// # Notes
	/// - Counts and first-seen ordering are fully deterministic for a fixed
	///   text and window length.
	/// - Scanning further text accumulates on top of the existing counts.
	pub(crate) fn scan(&mut self, text: &str, window_length: usize) {
		let chars: Vec<char> = text.chars().collect();
		if chars.len() <= window_length {
			// Too short, no window has a following character
			return;
		}

		for i in 0..chars.len() - window_length {
			let window: String = chars[i..i + window_length].iter().collect();
			let next = chars[i + window_length];
			self.windows
				.entry(window)
				.or_insert_with(ObservationList::new)
				.update(next);
		}
	}

	/// Derives `p` and `cp` for every list.
	///
	/// Runs once per training pass, after the full scan, so the totals
	/// reflect the final counts.
	pub(crate) fn derive_probabilities(&mut self) {
		for list in self.windows.values_mut() {
			list.derive_probabilities();
		}
	}

	/// Looks up the observations recorded for `window`.
	pub fn get(&self, window: &str) -> Option<&ObservationList> {
		self.windows.get(window)
	}

	/// Number of distinct windows seen so far.
	pub fn len(&self) -> usize {
		self.windows.len()
	}

	/// True when no window was recorded.
	pub fn is_empty(&self) -> bool {
		self.windows.is_empty()
	}

	/// Windows and their lists, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ObservationList)> {
		self.windows.iter().map(|(window, list)| (window.as_str(), list))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn counts_of(table: &ContextTable, window: &str) -> Vec<(char, u64)> {
		table
			.get(window)
			.map(|list| list.iter().map(|data| (data.chr, data.count)).collect())
			.unwrap_or_default()
	}

	#[test]
	fn scan_matches_manual_enumeration() {
		let mut table = ContextTable::new();
		table.scan("abcabcabc", 3);

		// Six start positions: "abc"->a twice, "bca"->b twice, "cab"->c twice
		assert_eq!(table.len(), 3);
		assert_eq!(counts_of(&table, "abc"), vec![('a', 2)]);
		assert_eq!(counts_of(&table, "bca"), vec![('b', 2)]);
		assert_eq!(counts_of(&table, "cab"), vec![('c', 2)]);
	}

	#[test]
	fn counts_conserve_window_occurrences() {
		let mut table = ContextTable::new();
		let text = "the theory of the thing";
		table.scan(text, 2);

		// "th" is followed by some character 4 times in the text
		let list = table.get("th").unwrap();
		assert_eq!(list.total(), 4);
		assert_eq!(counts_of(&table, "th"), vec![('e', 3), ('i', 1)]);
	}

	#[test]
	fn short_text_yields_an_empty_table() {
		let mut table = ContextTable::new();
		table.scan("", 3);
		assert!(table.is_empty());

		table.scan("ab", 3);
		assert!(table.is_empty());

		// Exactly one window long: still no following character
		table.scan("abc", 3);
		assert!(table.is_empty());
	}

	#[test]
	fn scan_accumulates_across_calls() {
		let mut table = ContextTable::new();
		table.scan("ab", 1);
		table.scan("ab", 1);
		assert_eq!(counts_of(&table, "a"), vec![('b', 2)]);
	}

	#[test]
	fn multibyte_text_is_counted_per_character() {
		let mut table = ContextTable::new();
		table.scan("ééè", 1);
		assert_eq!(counts_of(&table, "é"), vec![('é', 1), ('è', 1)]);
	}
}
