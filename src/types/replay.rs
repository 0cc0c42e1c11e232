//! Fully decoded replay

use serde::{Deserialize, Serialize};

use super::{BaseStats, ReplayHeader, RunFrame, ZoneStats};

/// A replay that passed every decode stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Replay {
    pub header: ReplayHeader,
    pub overall_stats: BaseStats,
    /// One entry per zone, only for staged tracks
    pub zone_stats: Vec<ZoneStats>,
    /// Frames in tick order from the header start tick
    pub frames: Vec<RunFrame>,
}

impl Replay {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_staged(&self) -> bool {
        !self.zone_stats.is_empty()
    }
}
