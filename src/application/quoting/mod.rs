//! Instant quotes against registered carrier rate tables

pub mod engine;

pub use engine::{QuoteEngine, QuoteInput, QuoteWithResults};
