//! Aggregate movement statistics

use serde::{Deserialize, Serialize};

/// Movement statistics over the whole run or one zone.
///
/// Times are in seconds, already scaled by the header tick rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct BaseStats {
    pub jumps: u32,
    pub strafes: u32,
    pub avg_strafe_sync: f32,
    pub avg_strafe_sync2: f32,
    /// Seconds, scaled from raw ticks by the header tick rate
    pub enter_time: f64,
    pub total_time: f64,
    pub vel_max_3d: f32,
    pub vel_max_2d: f32,
    pub vel_avg_3d: f32,
    pub vel_avg_2d: f32,
    pub vel_enter_3d: f32,
    pub vel_enter_2d: f32,
    pub vel_exit_3d: f32,
    pub vel_exit_2d: f32,
}

/// Statistics for one zone of a staged track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ZoneStats {
    /// 1-based zone number
    pub zone_num: u8,
    pub base_stats: BaseStats,
}

/// Decoded statistics block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RunStats {
    pub overall: BaseStats,
    /// Empty for linear tracks
    pub zones: Vec<ZoneStats>,
}

impl RunStats {
    /// Stats for a 1-based zone number.
    pub fn zone(&self, zone_num: u8) -> Option<&ZoneStats> {
        self.zones.iter().find(|z| z.zone_num == zone_num)
    }
}
