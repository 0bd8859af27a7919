//! Core types shared by the fetcher, the store and the server

pub mod config;
pub mod currency;
pub mod log;
pub mod snapshot;
pub mod source;

pub use currency::currency_code;
pub use snapshot::{RateEntry, RateFormat, RateSnapshot};
pub use source::{RateSource, TableRow};
