//! Error types for replay decoding.
//!
//! Decoding keeps two failure channels apart. The [`ByteCursor`](crate::ByteCursor)
//! never raises: a read past the end of the buffer latches the cursor unhealthy and
//! every later read yields `None`. The decode stages check cursor health at their
//! checkpoints and raise a [`ReplayError`] from there.
//!
//! ## Error Categories
//!
//! - **Malformed**: the buffer is truncated or structurally invalid
//! - **Magic / Version**: the header was rejected by a non-permissive [`ReplayPolicy`](crate::ReplayPolicy)
//! - **File**: a replay file could not be read from disk
//! - **Config**: a policy document could not be parsed
//!
//! ## Client Faults
//!
//! Replay bytes are supplied by the game client, so a rejected replay is an
//! "invalid replay file" answer, not a server error:
//!
//! ```rust
//! use mrf::{DecodeStage, ReplayError};
//!
//! let error = ReplayError::malformed(DecodeStage::Frames, "frame count 0");
//! assert!(error.is_invalid_replay());
//! assert!(!error.is_retryable());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for replay operations.
pub type Result<T, E = ReplayError> = std::result::Result<T, E>;

/// Decode stage that rejected a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum DecodeStage {
    Header,
    Stats,
    Frames,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStage::Header => "header",
            DecodeStage::Stats => "stats",
            DecodeStage::Frames => "frames",
        };
        f.write_str(name)
    }
}

/// Main error type for replay operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReplayError {
    #[error("Malformed replay ({stage}): {details}")]
    Malformed { stage: DecodeStage, details: String },

    #[error("Unexpected replay magic: expected {expected:#010x}, found {found:#010x}")]
    Magic { expected: u32, found: u32 },

    #[error("Unsupported replay version {found} (supported: {supported:?})")]
    Version { supported: Vec<u8>, found: u8 },

    #[error("Replay file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid replay policy: {details}")]
    Config { details: String },
}

impl ReplayError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Corrupt input stays corrupt, so nothing in this crate is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReplayError::Malformed { .. } => false,
            ReplayError::Magic { .. } => false,
            ReplayError::Version { .. } => false,
            ReplayError::File { .. } => false,
            ReplayError::Config { .. } => false,
        }
    }

    /// Returns whether the replay bytes themselves were rejected.
    ///
    /// Callers should surface these as a user-facing "invalid replay file".
    pub fn is_invalid_replay(&self) -> bool {
        matches!(
            self,
            ReplayError::Malformed { .. } | ReplayError::Magic { .. } | ReplayError::Version { .. }
        )
    }

    /// The stage that rejected the replay, if the error came from decoding.
    pub fn stage(&self) -> Option<DecodeStage> {
        match self {
            ReplayError::Malformed { stage, .. } => Some(*stage),
            ReplayError::Magic { .. } | ReplayError::Version { .. } => Some(DecodeStage::Header),
            _ => None,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ReplayError::Malformed { .. } => vec![
                "Reject the run submission as an invalid replay file",
                "Ask the client to re-record the run",
                "Check the upload was not truncated in transit",
            ],
            ReplayError::Magic { .. } => vec![
                "Verify the uploaded file is a Momentum replay (.mrf)",
                "Reject the run submission as an invalid replay file",
            ],
            ReplayError::Version { .. } => vec![
                "Update the game client to a supported replay version",
                "Extend the policy's supported_versions if the format is compatible",
            ],
            ReplayError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            ReplayError::Config { .. } => vec![
                "Check the policy YAML syntax",
                "Verify field names match ReplayPolicy",
            ],
        }
    }

    /// Helper constructor for structural rejections.
    pub fn malformed(stage: DecodeStage, details: impl Into<String>) -> Self {
        ReplayError::Malformed { stage, details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ReplayError::File { path, source }
    }
}

impl From<serde_yaml_ng::Error> for ReplayError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ReplayError::Config { details: err.to_string() }
    }
}
