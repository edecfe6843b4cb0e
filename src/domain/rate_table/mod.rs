//! Carrier rate tables ("tabelas de frete")
//!
//! A table holds rows priced by origin/destination state and weight band.
//! The quote engine picks one row per carrier with [`pick_best_rate_row`].

pub mod model;
pub mod repository;

pub use model::{pick_best_rate_row, NewRateTableRow, RateTable, RateTableRow};
pub use repository::RateTableRepository;
