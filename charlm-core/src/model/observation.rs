use std::fmt;

/// A single observed next-character: the character itself, how many times it
/// followed the owning window, and the probabilities derived from the final
/// counts.
///
/// `p` and `cp` stay at 0.0 until [`ObservationList::derive_probabilities`]
/// has run; afterwards `p` is the character's share of the window's
/// observations and `cp` the running total up to and including this entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CharData {
	/// The observed character.
	pub chr: char,
	/// Number of times `chr` followed the owning window in the corpus.
	pub count: u64,
	/// Probability of `chr` among the window's observations.
	pub p: f64,
	/// Cumulative probability up to and including this entry.
	pub cp: f64,
}

impl CharData {
	fn new(chr: char) -> Self {
		Self { chr, count: 0, p: 0.0, cp: 0.0 }
	}
}

impl fmt::Display for CharData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "('{}' {} p={:.4} cp={:.4})", self.chr, self.count, self.p, self.cp)
	}
}

/// The observations recorded for one window, in first-seen order.
///
/// # Responsibilities
/// - Accumulate next-character occurrences during the corpus scan
/// - Convert the final counts into probabilities and a cumulative column
/// - Select a character from a uniform draw using the cumulative column
///
/// # Invariants
/// - Each distinct character appears at most once
/// - Entries keep the order in which their character was first observed;
///   they are never reordered by count or probability
/// - After derivation, `cp` is non-decreasing and the last entry is close
///   to 1.0 up to floating-point rounding
#[derive(Clone, Debug, Default)]
pub struct ObservationList {
	observations: Vec<CharData>,
}

impl ObservationList {
	/// Creates an empty list.
	pub(crate) fn new() -> Self {
		Self { observations: Vec::new() }
	}

	/// Records one occurrence of `chr`.
	///
	/// The first occurrence appends a fresh entry at the end of the list;
	/// later occurrences only increase its count.
	pub(crate) fn update(&mut self, chr: char) {
		if let Some(data) = self.observations.iter_mut().find(|data| data.chr == chr) {
			data.count += 1;
			return;
		}
		let mut data = CharData::new(chr);
		data.count = 1;
		self.observations.push(data);
	}

	/// Total number of recorded occurrences.
	pub fn total(&self) -> u64 {
		self.observations.iter().map(|data| data.count).sum()
	}

	/// Converts the final counts into `p` and `cp`, in list order.
	///
	/// Counts are divided as floating-point values. The cumulative column is
	/// recomputed from scratch, so running this again on the same counts
	/// yields the same values.
	pub(crate) fn derive_probabilities(&mut self) {
		let total = self.total();
		if total == 0 {
			// Lists only exist once an observation was recorded
			return;
		}
		let total = total as f64;
		let mut cumulative = 0.0;
		for data in &mut self.observations {
			data.p = data.count as f64 / total;
			cumulative += data.p;
			data.cp = cumulative;
		}
	}

	/// Selects a character for a uniform draw `r` in `[0, 1)`.
	///
	/// Scans in list order and returns the first entry whose cumulative
	/// probability is strictly greater than `r`. Rounding can leave the
	/// final cumulative value just below 1.0; such a draw falls through and
	/// gets the last entry's character, so the result always comes from the
	/// corpus.
	///
	/// Returns `None` only for an empty list, which training never produces.
	pub(crate) fn sample(&self, r: f64) -> Option<char> {
		for data in &self.observations {
			if data.cp > r {
				return Some(data.chr);
			}
		}
		self.observations.last().map(|data| data.chr)
	}

	/// Entries in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = &CharData> {
		self.observations.iter()
	}

	/// Number of distinct characters observed.
	pub fn len(&self) -> usize {
		self.observations.len()
	}

	/// True when nothing was recorded yet.
	pub fn is_empty(&self) -> bool {
		self.observations.is_empty()
	}
}

impl fmt::Display for ObservationList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for data in &self.observations {
			if !first {
				write!(f, " ")?;
			}
			write!(f, "{data}")?;
			first = false;
		}
		Ok(())
	}
}
