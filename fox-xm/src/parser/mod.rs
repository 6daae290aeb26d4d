//! XM file parser
//!
//! - `read` - header, pattern order and the top-level decode entry points
//! - `pattern` - packed note stream decoding
//! - `instrument` - instrument records, sample headers and sample audio
//! - `tests` - synthetic-file test suite

mod instrument;
mod pattern;
mod read;


pub use read::{XmDecoder, parse_xm, parse_xm_with};
