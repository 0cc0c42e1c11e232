//! Track layout that selects the statistics block shape

use serde::{Deserialize, Serialize};

/// Whether a track is split into zones with their own statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// One overall record followed by one record per zone.
    Staged,
    /// A single overall record.
    Linear,
}

impl TrackKind {
    /// Infer the stats layout from a header zone number.
    ///
    /// Zone 0 is a full-track run and carries per-zone stats. A non-zero zone
    /// number is an individual-zone run with a single record.
    pub fn from_zone_num(zone_num: u8) -> Self {
        if zone_num == 0 { TrackKind::Staged } else { TrackKind::Linear }
    }

    pub fn is_staged(self) -> bool {
        matches!(self, TrackKind::Staged)
    }
}

impl From<bool> for TrackKind {
    fn from(is_staged: bool) -> Self {
        if is_staged { TrackKind::Staged } else { TrackKind::Linear }
    }
}
