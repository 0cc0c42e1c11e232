//! Replay file format structures and stage decoders
//!
//! ## MRF File Structure
//!
//! A replay is three back-to-back regions, all little-endian, strings ASCII and
//! terminated by a single zero byte:
//!
//! 1. **Header** - magic, version, map/player strings, tick rate, flags, run
//!    date, start/stop tick, track and zone number
//! 2. **Stats** - has-stats flag, zone count, then one overall [`BaseStats`]
//!    record (linear tracks) or one overall plus one per zone (staged tracks)
//! 3. **Frames** - frame count, then fixed-size [`RunFrame`] records
//!
//! Each stage reads through the shared [`ByteCursor`] and checks its health at
//! the end. An unhealthy cursor, or a count that violates the layout, rejects
//! the whole replay with [`ReplayError::Malformed`].

use tracing::{debug, trace, warn};

use crate::{
    BaseStats, ByteCursor, DecodeStage, InputButtons, ReplayError, ReplayHeader, Result, RunFrame,
    RunStats, TrackKind, ZoneStats,
};

/// Magic written by the game client ("MOMR" on disk).
pub const MRF_MAGIC: u32 = 0x524D_4F4D;
/// Format version written by the game client.
pub const MRF_VERSION: u8 = 1;

/// Encoded size of one [`BaseStats`] record in bytes.
pub const BASE_STATS_SIZE: usize = 56;
/// Encoded size of one [`RunFrame`] record in bytes.
pub const RUN_FRAME_SIZE: usize = 32;

impl ReplayHeader {
    /// Decode the header from the front of the buffer.
    ///
    /// Values are not validated here; see [`ReplayPolicy`](crate::ReplayPolicy).
    pub fn read_from(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        trace!("Reading replay header at offset {}", cursor.offset());

        match Self::read_fields(cursor) {
            Some(header) if cursor.is_healthy() => {
                debug!(
                    "Parsed replay header: map={}, version={}, tick_rate={}, ticks={}..{}, track={}, zone={}",
                    header.map_name,
                    header.version,
                    header.tick_rate,
                    header.start_tick,
                    header.stop_tick,
                    header.track_num,
                    header.zone_num
                );
                Ok(header)
            }
            _ => Err(reject(
                DecodeStage::Header,
                format!(
                    "buffer ended at offset {} of {} before the header was complete",
                    cursor.offset(),
                    cursor.len()
                ),
            )),
        }
    }

    fn read_fields(cursor: &mut ByteCursor<'_>) -> Option<Self> {
        Some(Self {
            magic: cursor.read_u32()?,
            version: cursor.read_u8()?,
            map_name: cursor.read_cstring()?,
            map_hash: cursor.read_cstring()?,
            player_name: cursor.read_cstring()?,
            steam_id: cursor.read_cstring()?,
            tick_rate: cursor.read_f32()?,
            run_flags: cursor.read_u32()?,
            run_date: cursor.read_cstring()?,
            start_tick: cursor.read_u32()?,
            stop_tick: cursor.read_u32()?,
            track_num: cursor.read_u8()?,
            zone_num: cursor.read_u8()?,
        })
    }
}

impl BaseStats {
    /// Decode one record, scaling raw tick counts by `tick_rate` into seconds.
    pub(crate) fn read_from(cursor: &mut ByteCursor<'_>, tick_rate: f32) -> Option<Self> {
        Some(Self {
            jumps: cursor.read_u32()?,
            strafes: cursor.read_u32()?,
            avg_strafe_sync: cursor.read_f32()?,
            avg_strafe_sync2: cursor.read_f32()?,
            enter_time: f64::from(cursor.read_u32()?) * f64::from(tick_rate),
            total_time: f64::from(cursor.read_u32()?) * f64::from(tick_rate),
            vel_max_3d: cursor.read_f32()?,
            vel_max_2d: cursor.read_f32()?,
            vel_avg_3d: cursor.read_f32()?,
            vel_avg_2d: cursor.read_f32()?,
            vel_enter_3d: cursor.read_f32()?,
            vel_enter_2d: cursor.read_f32()?,
            vel_exit_3d: cursor.read_f32()?,
            vel_exit_2d: cursor.read_f32()?,
        })
    }
}

impl RunFrame {
    pub(crate) fn read_from(cursor: &mut ByteCursor<'_>) -> Option<Self> {
        Some(Self {
            eye_angle_x: cursor.read_f32()?,
            eye_angle_y: cursor.read_f32()?,
            eye_angle_z: cursor.read_f32()?,
            pos_x: cursor.read_f32()?,
            pos_y: cursor.read_f32()?,
            pos_z: cursor.read_f32()?,
            view_offset: cursor.read_f32()?,
            buttons: InputButtons(cursor.read_u32()?),
        })
    }
}

/// Decode the statistics block.
///
/// `track_kind` comes from the caller's track metadata and `tick_rate` from the
/// decoded header. Partial statistics are never returned.
pub fn read_stats(
    cursor: &mut ByteCursor<'_>,
    track_kind: TrackKind,
    tick_rate: f32,
) -> Result<RunStats> {
    trace!("Reading {:?} stats block at offset {}", track_kind, cursor.offset());

    let has_stats = cursor.read_u8();
    let zone_count = cursor.read_u8();
    let (Some(has_stats), Some(zone_count)) = (has_stats, zone_count) else {
        return Err(reject(DecodeStage::Stats, "buffer ended before the stats block"));
    };

    if has_stats == 0 {
        return Err(reject(DecodeStage::Stats, "replay has no stats"));
    }
    if zone_count == 0 {
        return Err(reject(DecodeStage::Stats, "stats block declares zero zones"));
    }

    let stats = match track_kind {
        TrackKind::Staged => read_staged_stats(cursor, zone_count, tick_rate),
        TrackKind::Linear if zone_count == 1 => {
            BaseStats::read_from(cursor, tick_rate).map(|overall| RunStats { overall, zones: Vec::new() })
        }
        TrackKind::Linear => {
            return Err(reject(
                DecodeStage::Stats,
                format!("linear track declares {} zones, expected 1", zone_count),
            ));
        }
    };

    match stats {
        Some(stats) if cursor.is_healthy() => {
            debug!("Parsed stats: {} zones, overall jumps={}", stats.zones.len(), stats.overall.jumps);
            Ok(stats)
        }
        _ => Err(reject(
            DecodeStage::Stats,
            format!(
                "buffer ended at offset {} of {} inside {} zone records",
                cursor.offset(),
                cursor.len(),
                zone_count
            ),
        )),
    }
}

/// Overall record first, then zones `1..=zone_count`.
fn read_staged_stats(cursor: &mut ByteCursor<'_>, zone_count: u8, tick_rate: f32) -> Option<RunStats> {
    let overall = BaseStats::read_from(cursor, tick_rate)?;

    let mut zones = Vec::with_capacity(usize::from(zone_count));
    for zone_num in 1..=zone_count {
        if !cursor.is_healthy() {
            break;
        }
        let base_stats = BaseStats::read_from(cursor, tick_rate)?;
        zones.push(ZoneStats { zone_num, base_stats });
    }

    Some(RunStats { overall, zones })
}

/// Decode the frame array.
///
/// The declared frame count must be non-zero and at least `stop_tick`, and every
/// declared frame must be present.
pub fn read_frames(cursor: &mut ByteCursor<'_>, stop_tick: u32) -> Result<Vec<RunFrame>> {
    trace!("Reading frames at offset {}", cursor.offset());

    let Some(frame_count) = cursor.read_u32() else {
        return Err(reject(DecodeStage::Frames, "buffer ended before the frame count"));
    };

    if frame_count == 0 {
        return Err(reject(DecodeStage::Frames, "replay declares zero frames"));
    }
    if frame_count < stop_tick {
        return Err(reject(
            DecodeStage::Frames,
            format!("frame count {} is less than stop tick {}", frame_count, stop_tick),
        ));
    }

    let declared = frame_count as usize;
    // Cap the allocation by what the buffer can actually hold
    let capacity = declared.min(cursor.remaining() / RUN_FRAME_SIZE);
    let mut frames = Vec::with_capacity(capacity);

    while frames.len() < declared && cursor.is_healthy() {
        match RunFrame::read_from(cursor) {
            Some(frame) => frames.push(frame),
            None => break,
        }
    }

    if !cursor.is_healthy() || frames.len() != declared {
        return Err(reject(
            DecodeStage::Frames,
            format!("replay declares {} frames but only {} are present", declared, frames.len()),
        ));
    }

    if cursor.remaining() > 0 {
        debug!("{} trailing bytes after frame data", cursor.remaining());
    }
    debug!("Parsed {} frames", frames.len());
    Ok(frames)
}

fn reject(stage: DecodeStage, details: impl Into<String>) -> ReplayError {
    let error = ReplayError::malformed(stage, details);
    warn!("Rejecting replay: {}", error);
    error
}
