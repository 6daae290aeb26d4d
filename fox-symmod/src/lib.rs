//! Fox-SymMOD: Symphonie Pro module decoder
//!
//! Decodes modules (not songs) written by the Amiga tracker Symphonie Pro.
//!
//! # SymMOD Format Overview
//!
//! A SymMOD file is a 4-byte signature and a big-endian version word followed
//! by a stream of tagged records. Each record starts with a signed 32-bit
//! tag that selects how the rest of the record is laid out:
//!
//! - plain 32-bit values (channel count, track length, ...)
//! - length-prefixed blocks (note data, sequence, info text, ...)
//! - sample payloads, assigned to instruments in arrival order
//! - the sample name table, one 256-byte record per instrument
//!
//! After the record stream, the note data block is cut into patterns of
//! 4-byte notes.
//!
//! # Usage
//!
//! ```ignore
//! use fox_symmod::parse_symmod;
//!
//! let module = parse_symmod(&bytes)?;
//! for instr in module.instruments.iter().filter(|i| !i.is_empty()) {
//!     println!("{:?}", instr.name);
//! }
//! ```

mod fx;
mod module;
mod parser;
mod tags;

pub use fx::{NoteFx, NoteType, VolumeFx};
pub use module::{SymInstrument, SymInstrumentInfo, SymModule, SymNote, SymPattern};
pub use parser::{SymModDecoder, parse_symmod, parse_symmod_with};

/// SymMOD signature
pub const SYMMOD_MAGIC: &[u8; 4] = b"SymM";

/// The only format version in use
pub const SYMMOD_VERSION: i32 = 1;

/// Width of one entry in the sample name table
pub const SAMPLE_NAME_RECORD_SIZE: usize = 256;

/// Leading bytes of a sample name record that hold the name itself
pub const SAMPLE_NAME_MAX_LEN: usize = 128;

/// Bytes per note in the note data block
pub const NOTE_SIZE: usize = 4;

/// Note tuple written for untouched pattern cells
pub const EMPTY_NOTE: [u8; NOTE_SIZE] = [0, 255, 0, 0];

/// Volume column values from here on are commands, not levels
pub const VOLUME_FX_THRESHOLD: u8 = 200;
