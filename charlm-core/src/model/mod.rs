//! Top-level module for the window model.
//!
//! This crate provides a character-level window language model, including:
//! - Per-window observation bookkeeping (`observation`)
//! - The learned window-to-observations mapping (`context_table`)
//! - The trainable, sampling model itself (`language_model`)

/// A single next-character observation and the per-window list of them.
///
/// Accumulates occurrence counts during training, derives probabilities and
/// cumulative probabilities, and serves weighted selection from a uniform
/// draw.
pub mod observation;

/// Mapping from every observed window to its observation list.
///
/// Built by scanning the corpus once; read-only during generation.
pub mod context_table;

/// The model itself: window length, random source and context table, with
/// the training and generation entry points.
pub mod language_model;
