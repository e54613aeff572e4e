//! External service clients

pub mod rates;

pub use rates::{RateSource, RatesClient, SourceMap};
