//! Instant quotes and their per-carrier offers

pub mod model;
pub mod repository;

pub use model::{rank_results, NewQuote, NewQuoteResult, OfferSource, Quote, QuoteResult, QuoteStatus};
pub use repository::{QuoteFilter, QuoteRepository};
