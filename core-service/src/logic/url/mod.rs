//! URL Module - Repair & Parse
//!
//! Fixes malformed scheme slashes and splits the URL into scheme / host / path.
//! Pure functions, no I/O.

pub mod normalize;

pub use normalize::{normalize, override_host, repair, ParsedUrl};
