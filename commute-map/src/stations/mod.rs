//! Station directory.
//!
//! Loads the semicolon-delimited station export (one row per stop with
//! name, global id, coordinates and fare zones) and provides lookup by
//! identifier and filtering by fare zone.

mod directory;
mod error;
mod parse;

pub use directory::StationDirectory;
pub use error::StationError;
pub use parse::{Encoding, parse_stations};
