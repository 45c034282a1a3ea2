//! Crate-level error types.

use std::fmt;

/// Errors produced by the partview crate.
///
/// Interaction itself never fails: missing collaborators and failed picks
/// degrade silently. Only loading and saving external files can error.
#[derive(Debug)]
pub enum PartviewError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Replay trace (JSON) parsing/serialization failure.
    TraceParse(String),
}

impl fmt::Display for PartviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TraceParse(msg) => write!(f, "trace parse error: {msg}"),
        }
    }
}

impl std::error::Error for PartviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PartviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
