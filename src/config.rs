//! Header acceptance policy.
//!
//! Decoding only guarantees that the header was structurally consumed. Whether an
//! unknown magic or a newer format version should be rejected is a deployment
//! decision, so it lives in a [`ReplayPolicy`] that can be loaded from YAML:
//!
//! ```rust
//! use mrf::ReplayPolicy;
//!
//! let policy = ReplayPolicy::from_yaml_str(
//!     "expected_magic: 1380798285\nsupported_versions: [1]\n",
//! )?;
//! assert_eq!(policy, ReplayPolicy::strict());
//! # Ok::<(), mrf::ReplayError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::decode::format::{MRF_MAGIC, MRF_VERSION};
use crate::{ReplayError, ReplayHeader, Result};

/// Optional semantic checks applied after a header decodes cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default, deny_unknown_fields)]
pub struct ReplayPolicy {
    /// Required magic, or `None` to accept any
    pub expected_magic: Option<u32>,
    /// Accepted versions; empty accepts any
    pub supported_versions: Vec<u8>,
}

impl ReplayPolicy {
    /// Accept any structurally valid header.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Accept only headers the current game client writes.
    pub fn strict() -> Self {
        Self { expected_magic: Some(MRF_MAGIC), supported_versions: vec![MRF_VERSION] }
    }

    pub fn is_permissive(&self) -> bool {
        self.expected_magic.is_none() && self.supported_versions.is_empty()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let policy: ReplayPolicy = serde_yaml_ng::from_str(yaml)?;
        debug!(
            "Loaded replay policy: magic={:?}, versions={:?}",
            policy.expected_magic, policy.supported_versions
        );
        Ok(policy)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check header magic and version against this policy.
    pub fn validate_header(&self, header: &ReplayHeader) -> Result<()> {
        if let Some(expected) = self.expected_magic {
            if header.magic != expected {
                warn!("Rejecting replay with magic {:#010x}", header.magic);
                return Err(ReplayError::Magic { expected, found: header.magic });
            }
        }

        if !self.supported_versions.is_empty() && !self.supported_versions.contains(&header.version)
        {
            warn!("Rejecting replay with version {}", header.version);
            return Err(ReplayError::Version {
                supported: self.supported_versions.clone(),
                found: header.version,
            });
        }

        Ok(())
    }
}
