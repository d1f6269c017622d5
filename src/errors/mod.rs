//! Error types and diagnostic rendering for the front end.
//!
//! This module defines the diagnostic values produced by the parser and the
//! formatter that turns a spanned diagnostic plus the original source lines
//! into a human-readable excerpt with caret underlines.

pub mod errors;
