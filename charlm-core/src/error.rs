use thiserror::Error;

/// Errors reported by the model surface.
///
/// A window missing from the table during generation is not represented
/// here: it ends generation normally with the text accumulated so far.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
	/// The window length given at construction was zero.
	#[error("window length must be at least 1")]
	InvalidWindowLength,
}
