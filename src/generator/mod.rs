//! Deterministic case generation.
//!
//! Per-problem generators are plugins; this module gives them a seeded random
//! stream, a restartable sequence type and a few shared building blocks.

mod rng;
mod source;
mod util;

pub use rng::DeterministicRng;
pub use source::{CaseSource, Cases};
pub use util::{random_string, random_text, scale_random, TEXT_LINES};
