//! `.Z` header parsing.

pub mod header;

pub use header::{Header, HeaderParser};
