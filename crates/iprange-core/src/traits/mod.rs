//! Core traits for the refresh cache
//!
//! - [`RangeSource`]: Fetch raw range expressions from a remote data source

pub mod range_source;

pub use range_source::RangeSource;
