//! Staged replay reader
//!
//! The three decode stages depend on each other: stats need the header tick rate
//! and the caller's track layout, frames need the header stop tick. A
//! [`ReplayReader`] owns the cursor that threads through them, so callers can
//! either run the stages one at a time or decode everything at once.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mrf::{ReplayReader, TrackKind};
//!
//! fn inspect(bytes: &[u8]) -> mrf::Result<()> {
//!     let mut reader = ReplayReader::new(bytes);
//!
//!     let header = reader.read_header()?;
//!     let stats = reader.read_stats(TrackKind::Staged, header.tick_rate)?;
//!     let frames = reader.read_frames(header.stop_tick)?;
//!
//!     println!("{} zones, {} frames", stats.zones.len(), frames.len());
//!     Ok(())
//! }
//! ```

use std::path::Path;
use tracing::{debug, info};

use super::format::{read_frames, read_stats};
use crate::{
    ByteCursor, Replay, ReplayError, ReplayHeader, ReplayPolicy, Result, RunFrame, RunStats,
    TrackKind,
};

/// Sequential decoder over one replay buffer.
#[derive(Debug, Clone)]
pub struct ReplayReader<'a> {
    cursor: ByteCursor<'a>,
    policy: ReplayPolicy,
}

impl<'a> ReplayReader<'a> {
    /// Reader with the permissive policy: headers are consumed, not validated.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_policy(data, ReplayPolicy::permissive())
    }

    pub fn with_policy(data: &'a [u8], policy: ReplayPolicy) -> Self {
        Self { cursor: ByteCursor::new(data), policy }
    }

    /// Whether every read so far stayed within the buffer.
    pub fn is_healthy(&self) -> bool {
        self.cursor.is_healthy()
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn policy(&self) -> &ReplayPolicy {
        &self.policy
    }

    /// Decode the header and apply the reader's policy.
    pub fn read_header(&mut self) -> Result<ReplayHeader> {
        let header = ReplayHeader::read_from(&mut self.cursor)?;
        self.policy.validate_header(&header)?;
        Ok(header)
    }

    pub fn read_stats(&mut self, track_kind: TrackKind, tick_rate: f32) -> Result<RunStats> {
        read_stats(&mut self.cursor, track_kind, tick_rate)
    }

    pub fn read_frames(&mut self, stop_tick: u32) -> Result<Vec<RunFrame>> {
        read_frames(&mut self.cursor, stop_tick)
    }

    /// Run all three stages for a track of known layout.
    pub fn decode(mut self, track_kind: TrackKind) -> Result<Replay> {
        let header = self.read_header()?;
        self.decode_body(header, track_kind)
    }

    /// Run all three stages, taking the track layout from the header zone number.
    pub fn decode_inferred(mut self) -> Result<Replay> {
        let header = self.read_header()?;
        let track_kind = header.track_kind();
        self.decode_body(header, track_kind)
    }

    fn decode_body(&mut self, header: ReplayHeader, track_kind: TrackKind) -> Result<Replay> {
        let stats = self.read_stats(track_kind, header.tick_rate)?;
        let frames = self.read_frames(header.stop_tick)?;

        debug!(
            "Decoded replay for {} on {}: {} zones, {} frames",
            header.player_name,
            header.map_name,
            stats.zones.len(),
            frames.len()
        );

        Ok(Replay { header, overall_stats: stats.overall, zone_stats: stats.zones, frames })
    }
}

impl Replay {
    /// Decode a replay held in memory.
    pub fn from_bytes(data: &[u8], track_kind: TrackKind) -> Result<Self> {
        ReplayReader::new(data).decode(track_kind)
    }

    /// Decode a replay held in memory, validating the header against `policy`.
    pub fn from_bytes_with_policy(
        data: &[u8],
        track_kind: TrackKind,
        policy: ReplayPolicy,
    ) -> Result<Self> {
        ReplayReader::with_policy(data, policy).decode(track_kind)
    }

    /// Read and decode a replay file.
    pub fn open<P: AsRef<Path>>(path: P, track_kind: TrackKind) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening replay file: {}", path.display());

        let data =
            std::fs::read(path).map_err(|e| ReplayError::file_error(path.to_path_buf(), e))?;
        Self::from_bytes(&data, track_kind)
    }

    /// Read a replay file without blocking the runtime, then decode it.
    pub async fn open_async<P: AsRef<Path>>(path: P, track_kind: TrackKind) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening replay file: {}", path.display());

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ReplayError::file_error(path.to_path_buf(), e))?;
        Self::from_bytes(&data, track_kind)
    }
}
