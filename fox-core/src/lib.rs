//! Fox-Core: shared decoding primitives for the fox tracker decoders
//!
//! This crate holds everything the format crates have in common:
//!
//! - [`ByteCursor`] - bounds-checked sequential reads with exact offsets
//! - [`delta_decode`] / [`SampleData`] - delta-compressed sample audio
//! - [`DecodeError`] - the error taxonomy shared by every decoder
//! - [`DecodeContext`] / [`TraceSink`] - per-call state and diagnostics
//! - [`FormatDecoder`] - the capability each format decoder implements
//!
//! # Usage
//!
//! ```ignore
//! use fox_core::{ByteCursor, DecodeError};
//!
//! let mut cursor = ByteCursor::new(&data);
//! let magic = cursor.read_array::<4>()?;
//! let version = cursor.read_i32_be()?;
//! ```

mod cursor;
mod delta;
mod error;
mod trace;

pub use cursor::{ByteCursor, nul_terminated_text, trim_text};
pub use delta::{DeltaSample, SampleData, delta_decode, delta_encode};
pub use error::DecodeError;
pub use trace::{DecodeContext, NoTrace, TraceEvent, TraceSink, TracingSink};

/// Outcome of offering a buffer to one format decoder
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The signature matched and the module decoded completely
    Matched(T),
    /// The data belongs to some other format
    Mismatch,
}

impl<T> Decoded<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Self::Matched(module) => Decoded::Matched(f(module)),
            Self::Mismatch => Decoded::Mismatch,
        }
    }

    /// The decoded module, if the format matched
    pub fn matched(self) -> Option<T> {
        match self {
            Self::Matched(module) => Some(module),
            Self::Mismatch => None,
        }
    }

    /// Turn a decoder result into a tagged outcome
    ///
    /// [`DecodeError::FormatMismatch`] becomes [`Decoded::Mismatch`]; every
    /// other error stays fatal.
    pub fn from_result(result: Result<T, DecodeError>) -> Result<Self, DecodeError> {
        match result {
            Ok(module) => Ok(Self::Matched(module)),
            Err(e) if e.is_format_mismatch() => Ok(Self::Mismatch),
            Err(e) => Err(e),
        }
    }
}

/// Capability implemented by every format decoder
///
/// Implementations are stateless unit structs: all mutable decoding state
/// lives in the [`DecodeContext`] and in locals of the decode call.
pub trait FormatDecoder {
    /// Module type produced on a match
    type Module;

    /// Short format name, e.g. `"XM"`
    fn name(&self) -> &'static str;

    /// Attempt to decode `data`
    fn decode(
        &self,
        data: &[u8],
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Decoded<Self::Module>, DecodeError>;
}
