//! Parse configuration
//!
//! Options can be built in code or loaded from TOML by the caller.

use fox_core::DecodeError;
use serde::{Deserialize, Serialize};

/// Default input size limit (64 MiB)
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024 * 1024;

/// Limits applied before any decoder runs
///
/// TOML can only set a limit; an unlimited configuration is built with
/// [`ParseOptions::unbounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Largest accepted input in bytes (default: 64 MiB, `None` = no limit)
    #[serde(default = "default_max_input_len")]
    pub max_input_len: Option<usize>,
}

fn default_max_input_len() -> Option<usize> {
    Some(DEFAULT_MAX_INPUT_LEN)
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_input_len: default_max_input_len(),
        }
    }
}

impl ParseOptions {
    /// Options without an input size limit
    pub fn unbounded() -> Self {
        Self {
            max_input_len: None,
        }
    }

    /// Reject inputs above the configured limit
    pub fn check_input_len(&self, len: usize) -> Result<(), DecodeError> {
        match self.max_input_len {
            Some(limit) if len > limit => Err(DecodeError::InputTooLarge { len, limit }),
            _ => Ok(()),
        }
    }
}
