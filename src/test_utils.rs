//! Test utilities for building replay fixtures
//!
//! Replays are client-generated, so tests build their own buffers. [`ReplayWriter`]
//! lays bytes out exactly as the decoder reads them, and the `sample_*` helpers
//! produce deterministic records whose stat times survive the tick round trip.

#![cfg(any(test, feature = "benchmark"))]

use crate::decode::format::{MRF_MAGIC, MRF_VERSION};
use crate::{BaseStats, InputButtons, Replay, ReplayHeader, RunFrame, ZoneStats, input_flags};

/// Tick rate used by every fixture (100 ticks per second).
pub const FIXTURE_TICK_RATE: f32 = 0.01;

/// Little-endian fixture encoder following the replay layout.
#[derive(Debug, Default, Clone)]
pub struct ReplayWriter {
    buf: Vec<u8>,
}

impl ReplayWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write an ASCII string and its zero terminator.
    pub fn write_cstring(&mut self, value: &str) {
        debug_assert!(value.is_ascii() && !value.contains('\0'));
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(0);
    }

    pub fn write_header(&mut self, header: &ReplayHeader) {
        self.write_u32(header.magic);
        self.write_u8(header.version);
        self.write_cstring(&header.map_name);
        self.write_cstring(&header.map_hash);
        self.write_cstring(&header.player_name);
        self.write_cstring(&header.steam_id);
        self.write_f32(header.tick_rate);
        self.write_u32(header.run_flags);
        self.write_cstring(&header.run_date);
        self.write_u32(header.start_tick);
        self.write_u32(header.stop_tick);
        self.write_u8(header.track_num);
        self.write_u8(header.zone_num);
    }

    /// Write one stats record, converting times back to raw ticks.
    pub fn write_base_stats(&mut self, stats: &BaseStats, tick_rate: f32) {
        self.write_u32(stats.jumps);
        self.write_u32(stats.strafes);
        self.write_f32(stats.avg_strafe_sync);
        self.write_f32(stats.avg_strafe_sync2);
        let tick_rate = f64::from(tick_rate);
        self.write_u32((stats.enter_time / tick_rate).round() as u32);
        self.write_u32((stats.total_time / tick_rate).round() as u32);
        self.write_f32(stats.vel_max_3d);
        self.write_f32(stats.vel_max_2d);
        self.write_f32(stats.vel_avg_3d);
        self.write_f32(stats.vel_avg_2d);
        self.write_f32(stats.vel_enter_3d);
        self.write_f32(stats.vel_enter_2d);
        self.write_f32(stats.vel_exit_3d);
        self.write_f32(stats.vel_exit_2d);
    }

    /// Write a full stats block.
    ///
    /// An empty `zones` slice writes a linear block (zone count 1); otherwise the
    /// zone count is `zones.len()` and each zone record follows the overall one.
    pub fn write_stats(&mut self, overall: &BaseStats, zones: &[BaseStats], tick_rate: f32) {
        self.write_u8(1);
        self.write_u8(if zones.is_empty() { 1 } else { zones.len() as u8 });
        self.write_base_stats(overall, tick_rate);
        for zone in zones {
            self.write_base_stats(zone, tick_rate);
        }
    }

    pub fn write_frame(&mut self, frame: &RunFrame) {
        self.write_f32(frame.eye_angle_x);
        self.write_f32(frame.eye_angle_y);
        self.write_f32(frame.eye_angle_z);
        self.write_f32(frame.pos_x);
        self.write_f32(frame.pos_y);
        self.write_f32(frame.pos_z);
        self.write_f32(frame.view_offset);
        self.write_u32(frame.buttons.value());
    }

    /// Write the frame count followed by every frame.
    pub fn write_frames(&mut self, frames: &[RunFrame]) {
        self.write_u32(frames.len() as u32);
        for frame in frames {
            self.write_frame(frame);
        }
    }
}

/// Header for a fixture run starting at tick 0.
pub fn sample_header(stop_tick: u32, zone_num: u8) -> ReplayHeader {
    ReplayHeader {
        magic: MRF_MAGIC,
        version: MRF_VERSION,
        map_name: "bhop_eazy".to_string(),
        map_hash: "4b8f2e1c9d7a6b5e3f2a1c0d9e8f7a6b5c4d3e2f".to_string(),
        player_name: "Fixture Runner".to_string(),
        steam_id: "76561198039308694".to_string(),
        tick_rate: FIXTURE_TICK_RATE,
        run_flags: 0,
        run_date: "1700000000000".to_string(),
        start_tick: 0,
        stop_tick,
        track_num: 0,
        zone_num,
    }
}

/// Deterministic stats record; different seeds give different values.
pub fn sample_stats(seed: u32) -> BaseStats {
    let enter_ticks = seed * 120;
    let total_ticks = enter_ticks + 250 + seed;
    let s = seed as f32;
    BaseStats {
        jumps: 3 + seed,
        strafes: 7 + 2 * seed,
        avg_strafe_sync: 0.5 + s / 1000.0,
        avg_strafe_sync2: 0.25 + s / 1000.0,
        enter_time: f64::from(enter_ticks) * f64::from(FIXTURE_TICK_RATE),
        total_time: f64::from(total_ticks) * f64::from(FIXTURE_TICK_RATE),
        vel_max_3d: 900.0 + s,
        vel_max_2d: 850.0 + s,
        vel_avg_3d: 400.0 + s,
        vel_avg_2d: 380.0 + s,
        vel_enter_3d: 290.0 + s,
        vel_enter_2d: 280.0 + s,
        vel_exit_3d: 700.0 + s,
        vel_exit_2d: 690.0 + s,
    }
}

/// `count` frames moving along x, jumping every tenth tick.
pub fn sample_frames(count: u32) -> Vec<RunFrame> {
    (0..count)
        .map(|tick| {
            let t = tick as f32;
            let mut buttons = input_flags::FORWARD;
            if tick % 10 == 0 {
                buttons |= input_flags::JUMP;
            }
            RunFrame {
                eye_angle_x: (t * 0.1) % 89.0,
                eye_angle_y: (t * 0.5) % 360.0,
                eye_angle_z: 0.0,
                pos_x: t * 2.5,
                pos_y: -t,
                pos_z: 64.0,
                view_offset: 64.0,
                buttons: InputButtons(buttons),
            }
        })
        .collect()
}

/// Individual-zone run on a linear track with `frame_count` frames.
pub fn linear_replay(frame_count: u32) -> Replay {
    Replay {
        header: sample_header(frame_count, 1),
        overall_stats: sample_stats(0),
        zone_stats: Vec::new(),
        frames: sample_frames(frame_count),
    }
}

/// Full-track run over `zone_count` zones with `frame_count` frames.
pub fn staged_replay(zone_count: u8, frame_count: u32) -> Replay {
    Replay {
        header: sample_header(frame_count, 0),
        overall_stats: sample_stats(0),
        zone_stats: (1..=zone_count)
            .map(|zone_num| ZoneStats { zone_num, base_stats: sample_stats(u32::from(zone_num)) })
            .collect(),
        frames: sample_frames(frame_count),
    }
}

/// Encode a whole replay.
pub fn encode_replay(replay: &Replay) -> Vec<u8> {
    let tick_rate = replay.header.tick_rate;
    let zones: Vec<BaseStats> = replay.zone_stats.iter().map(|z| z.base_stats.clone()).collect();

    let mut writer = ReplayWriter::new();
    writer.write_header(&replay.header);
    writer.write_stats(&replay.overall_stats, &zones, tick_rate);
    writer.write_frames(&replay.frames);
    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_stats_times_are_whole_ticks() {
        for seed in 0..50 {
            let stats = sample_stats(seed);
            let tick_rate = f64::from(FIXTURE_TICK_RATE);
            let raw = (stats.enter_time / tick_rate).round() as u32;
            assert_eq!(f64::from(raw) * tick_rate, stats.enter_time);
        }
    }

    #[test]
    fn writer_layout_sizes() {
        let mut writer = ReplayWriter::new();
        assert!(writer.is_empty());
        writer.write_cstring("abc");
        assert_eq!(writer.len(), 4);
        writer.write_frame(&RunFrame::default());
        assert_eq!(writer.len(), 4 + 32);
    }
}
