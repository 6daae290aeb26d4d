//! Decoding error types

/// Errors produced while decoding a tracker module
///
/// Every variant except [`DecodeError::FormatMismatch`] is fatal. A mismatch
/// only means "these bytes are not my format" and lets the registry move on
/// to the next decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Leading signature bytes do not belong to this format
    #[error("not a {format} module")]
    FormatMismatch { format: &'static str },

    /// No registered decoder recognized the data
    #[error("no decoder recognizes this data")]
    UnrecognizedFormat,

    /// Signature matched but a structural precondition failed
    #[error("invalid module at offset {offset:#x}: {reason}")]
    InvalidModule { offset: usize, reason: String },

    /// A read requested more bytes than remain in the buffer
    #[error("truncated data at offset {offset:#x}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// An internally cross-checked value did not match
    #[error("consistency check failed at offset {offset:#x}: {what} expected {expected}, found {found}")]
    Consistency {
        offset: usize,
        what: &'static str,
        expected: u64,
        found: u64,
    },

    /// Recognized encoding that is not implemented
    #[error("unsupported feature: {feature}")]
    Unsupported { feature: &'static str },

    /// SymMOD record tag outside the known table
    #[error("unknown record tag {tag} at offset {offset:#x}")]
    UnknownTag { tag: i32, offset: usize },

    /// Input rejected before decoding because of its size
    #[error("input of {len} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },
}

impl DecodeError {
    /// Build an [`DecodeError::InvalidModule`] error
    pub fn invalid(offset: usize, reason: impl Into<String>) -> Self {
        Self::InvalidModule {
            offset,
            reason: reason.into(),
        }
    }

    /// Whether the registry may try another decoder after this error
    #[inline]
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::FormatMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DecodeError::FormatMismatch { format: "XM" }.to_string(),
            "not a XM module"
        );
        assert_eq!(
            DecodeError::Truncated {
                offset: 0x10,
                needed: 4,
                available: 2
            }
            .to_string(),
            "truncated data at offset 0x10: needed 4 bytes, 2 available"
        );
        assert_eq!(
            DecodeError::UnknownTag {
                tag: -99,
                offset: 8
            }
            .to_string(),
            "unknown record tag -99 at offset 0x8"
        );
        assert_eq!(
            DecodeError::invalid(0x25, "missing 0x1A marker").to_string(),
            "invalid module at offset 0x25: missing 0x1A marker"
        );
    }

    #[test]
    fn test_only_mismatch_is_recoverable() {
        assert!(DecodeError::FormatMismatch { format: "SymMOD" }.is_format_mismatch());
        assert!(!DecodeError::UnrecognizedFormat.is_format_mismatch());
        assert!(!DecodeError::Unsupported { feature: "ADPCM" }.is_format_mismatch());
    }
}
