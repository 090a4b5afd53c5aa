//! Values exchanged with graded callables, and their canonical text.
//!
//! # Invariants
//!
//! - Canonicalization is pure and never fails
//! - Canonicalizing a canonical value returns it unchanged
//! - Maps and sets with the same contents in any insertion order have the
//!   same canonical text

mod canon;
mod render;
mod types;

pub use canon::{canonical_text, canonicalize, canonically_equal, natural_order, outcome_text};
pub use render::{render, repr, repr_float, repr_str};
pub use types::{CallOutcome, Case, Failure, Value};
