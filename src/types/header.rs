//! Replay header record

use serde::{Deserialize, Serialize};

use super::TrackKind;

/// Fixed-order header at the front of every replay.
///
/// Values are consumed exactly as written by the client; see
/// [`ReplayPolicy`](crate::ReplayPolicy) for optional magic/version checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ReplayHeader {
    /// Format tag, `MRF_MAGIC` for files written by the game
    pub magic: u32,
    pub version: u8,
    pub map_name: String,
    pub map_hash: String,
    pub player_name: String,
    /// Player identity (Steam ID) as written by the client
    pub steam_id: String,
    /// Seconds per tick
    pub tick_rate: f32,
    pub run_flags: u32,
    /// Run date as written by the client (epoch milliseconds)
    pub run_date: String,
    pub start_tick: u32,
    pub stop_tick: u32,
    pub track_num: u8,
    /// 0 for a full-track run, otherwise the zone of an individual-zone run
    pub zone_num: u8,
}

impl ReplayHeader {
    /// Ticks between start and stop. Negative when the stop tick precedes the start.
    pub fn ticks(&self) -> i64 {
        i64::from(self.stop_tick) - i64::from(self.start_tick)
    }

    /// Run duration in seconds.
    pub fn run_time(&self) -> f64 {
        self.ticks() as f64 * f64::from(self.tick_rate)
    }

    /// Stats layout implied by the header zone number.
    pub fn track_kind(&self) -> TrackKind {
        TrackKind::from_zone_num(self.zone_num)
    }

    /// Run date parsed as epoch milliseconds, if it is numeric.
    pub fn run_date_millis(&self) -> Option<u64> {
        self.run_date.trim().parse().ok()
    }
}
