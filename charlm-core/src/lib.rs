//! Character-level window language model.
//!
//! This crate learns, for every fixed-length character window observed in a
//! corpus, the empirical distribution of the character that follows it, and
//! generates new text by repeatedly sampling from those distributions:
//! - Insertion-ordered per-window observation lists
//! - Count-to-probability derivation with a cumulative column
//! - Weighted random sampling driven by a model-owned random source
//!
//! Corpus loading, argument parsing and result printing are left to the
//! binaries built on top of this crate.

/// Core model types and generation logic.
///
/// This module exposes the trainable model interface together with the
/// observation bookkeeping it is built on.
pub mod model;

/// Error taxonomy of the model surface.
pub mod error;
