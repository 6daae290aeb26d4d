//! Fox-Tracker: one entry point for every supported tracker format
//!
//! This crate owns the format registry. [`parse`] offers the input to each
//! decoder in a fixed order and returns the first module that decodes.
//!
//! # Architecture
//!
//! ```text
//!            raw bytes
//!                │
//!        parse() / parse_with()
//!                │
//!     ┌──────────┴──────────┐
//!     ▼                     ▼
//! ┌──────────┐  mismatch  ┌──────────────┐  mismatch
//! │ fox-xm   │ ─────────▶ │ fox-symmod   │ ─────────▶ UnrecognizedFormat
//! └────┬─────┘            └──────┬───────┘
//!      │ XmModule                │ SymModule
//!      ▼                         ▼
//! ┌────────────────────────────────────────┐
//! │        Module (tagged by format)       │
//! └────────────────────────────────────────┘
//! ```
//!
//! A decoder that recognizes its signature but finds the data broken stops
//! the search; the error goes straight to the caller.
//!
//! # Usage
//!
//! ```ignore
//! let module = fox_tracker::parse(&std::fs::read("song.xm")?)?;
//! println!("{} ({}): {} channels", module.title(), module.format(), module.num_channels());
//! ```

mod config;
mod module;
mod registry;

pub use config::{DEFAULT_MAX_INPUT_LEN, ParseOptions};
pub use module::{Module, ModuleFormat};
pub use registry::{decoder_names, parse, parse_with};

// Re-export the building blocks callers need alongside `Module`
pub use fox_core::{DecodeError, NoTrace, TraceEvent, TraceSink, TracingSink};
pub use fox_symmod as symmod;
pub use fox_xm as xm;
