//! SymMOD file parser
//!
//! - `read` - signature, record loop and instrument slot bookkeeping
//! - `pattern` - note data to pattern grids
//! - `tests` - synthetic-file test suite

mod pattern;
mod read;


pub use read::{SymModDecoder, parse_symmod, parse_symmod_with};
