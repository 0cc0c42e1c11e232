//! End-to-end decoding of hand-built replay buffers through the public API.

use anyhow::Result;
use mrf::{
    DecodeStage, MRF_MAGIC, MRF_VERSION, Replay, ReplayError, ReplayPolicy, ReplayReader,
    TrackKind, input_flags,
};

const TICK_RATE: f32 = 0.01;

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_f32(buf: &mut Vec<u8>, value: f32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_str(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(value.as_bytes());
    buf.push(0);
}

fn header_bytes(stop_tick: u32, zone_num: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    put_u32(&mut buf, MRF_MAGIC);
    buf.push(MRF_VERSION);
    put_str(&mut buf, "bhop_monster_jam");
    put_str(&mut buf, "0123456789abcdef");
    put_str(&mut buf, "Runner");
    put_str(&mut buf, "76561198000000000");
    put_f32(&mut buf, TICK_RATE);
    put_u32(&mut buf, 0);
    put_str(&mut buf, "1700000000000");
    put_u32(&mut buf, 0);
    put_u32(&mut buf, stop_tick);
    buf.push(0);
    buf.push(zone_num);
    buf
}

/// One 56-byte stats record with the given raw enter and total ticks.
fn stats_record(buf: &mut Vec<u8>, jumps: u32, enter_ticks: u32, total_ticks: u32) {
    put_u32(buf, jumps);
    put_u32(buf, 2 * jumps);
    put_f32(buf, 0.75);
    put_f32(buf, 0.5);
    put_u32(buf, enter_ticks);
    put_u32(buf, total_ticks);
    for velocity in [1000.0, 950.0, 500.0, 480.0, 300.0, 290.0, 800.0, 780.0] {
        put_f32(buf, velocity);
    }
}

fn frames(buf: &mut Vec<u8>, count: u32) {
    put_u32(buf, count);
    for tick in 0..count {
        let t = tick as f32;
        for value in [0.0, t, 0.0, t * 3.0, 0.0, 64.0, 64.0] {
            put_f32(buf, value);
        }
        put_u32(buf, input_flags::FORWARD | if tick % 2 == 0 { input_flags::JUMP } else { 0 });
    }
}

/// Linear run: 100 ticks at 0.01s, one zone entered at raw tick 50.
fn linear_run() -> Vec<u8> {
    let mut buf = header_bytes(100, 1);
    buf.push(1);
    buf.push(1);
    stats_record(&mut buf, 12, 50, 100);
    frames(&mut buf, 100);
    buf
}

/// Staged run over three zones.
fn staged_run() -> Vec<u8> {
    let mut buf = header_bytes(300, 0);
    buf.push(1);
    buf.push(3);
    stats_record(&mut buf, 30, 0, 300);
    for zone in 1..=3u32 {
        stats_record(&mut buf, zone * 10, (zone - 1) * 100, 100);
    }
    frames(&mut buf, 300);
    buf
}

#[test]
fn decodes_linear_run() -> Result<()> {
    let bytes = linear_run();
    let replay = Replay::from_bytes(&bytes, TrackKind::Linear)?;

    assert_eq!(replay.header.map_name, "bhop_monster_jam");
    assert_eq!(replay.header.ticks(), 100);
    assert!((replay.header.run_time() - 1.0).abs() < 1e-6);
    assert_eq!(replay.overall_stats.jumps, 12);
    assert!((replay.overall_stats.enter_time - 0.5).abs() < 1e-6);
    assert!((replay.overall_stats.total_time - 1.0).abs() < 1e-6);
    assert!(replay.zone_stats.is_empty());
    assert_eq!(replay.frame_count(), 100);
    assert_eq!(replay.frames[10].position(), [0.0, 30.0, 64.0]);
    assert!(replay.frames[10].buttons.is_jumping());
    assert!(!replay.frames[11].buttons.is_jumping());
    Ok(())
}

#[test]
fn decodes_staged_run_with_numbered_zones() -> Result<()> {
    let bytes = staged_run();
    let replay = ReplayReader::new(&bytes).decode_inferred()?;

    assert!(replay.is_staged());
    assert_eq!(replay.overall_stats.jumps, 30);
    let numbers: Vec<u8> = replay.zone_stats.iter().map(|z| z.zone_num).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(replay.zone_stats[2].base_stats.jumps, 30);
    assert!((replay.zone_stats[2].base_stats.enter_time - 2.0).abs() < 1e-6);
    assert_eq!(replay.frame_count(), 300);
    Ok(())
}

#[test]
fn staged_buffer_read_as_linear_is_rejected() {
    let bytes = staged_run();
    let err = Replay::from_bytes(&bytes, TrackKind::Linear).unwrap_err();
    assert_eq!(err.stage(), Some(DecodeStage::Stats));
    assert!(err.is_invalid_replay());
}

#[test]
fn every_truncation_is_rejected() {
    let bytes = linear_run();
    for len in 0..bytes.len() {
        let result = Replay::from_bytes(&bytes[..len], TrackKind::Linear);
        match result {
            Err(ReplayError::Malformed { .. }) => {}
            other => panic!("prefix of {} bytes: expected Malformed, got {:?}", len, other),
        }
    }
}

#[test]
fn frame_count_below_stop_tick_is_rejected() {
    let mut bytes = header_bytes(100, 1);
    bytes.push(1);
    bytes.push(1);
    stats_record(&mut bytes, 1, 0, 100);
    frames(&mut bytes, 99);

    let err = Replay::from_bytes(&bytes, TrackKind::Linear).unwrap_err();
    assert_eq!(err.stage(), Some(DecodeStage::Frames));
}

#[test]
fn trailing_bytes_are_ignored() -> Result<()> {
    let mut bytes = linear_run();
    bytes.extend_from_slice(&[0xAB; 7]);
    let replay = Replay::from_bytes(&bytes, TrackKind::Linear)?;
    assert_eq!(replay.frame_count(), 100);
    Ok(())
}

#[test]
fn strict_policy_rejects_foreign_magic() {
    let mut bytes = linear_run();
    bytes[..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());

    assert!(Replay::from_bytes(&bytes, TrackKind::Linear).is_ok());

    let err = Replay::from_bytes_with_policy(&bytes, TrackKind::Linear, ReplayPolicy::strict())
        .unwrap_err();
    assert!(matches!(err, ReplayError::Magic { found: 0xDEAD_BEEF, .. }));
}

#[test]
fn staged_decoding_matches_single_call() -> Result<()> {
    let bytes = staged_run();

    let mut reader = ReplayReader::new(&bytes);
    let header = reader.read_header()?;
    let stats = reader.read_stats(header.track_kind(), header.tick_rate)?;
    let frames = reader.read_frames(header.stop_tick)?;
    assert!(reader.is_healthy());
    assert_eq!(reader.offset(), bytes.len());

    let whole = Replay::from_bytes(&bytes, TrackKind::Staged)?;
    assert_eq!(whole.header, header);
    assert_eq!(whole.overall_stats, stats.overall);
    assert_eq!(whole.zone_stats, stats.zones);
    assert_eq!(whole.frames, frames);
    Ok(())
}

#[tokio::test]
async fn opens_replay_from_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("run.mrf");
    tokio::fs::write(&path, linear_run()).await?;

    let from_async = Replay::open_async(&path, TrackKind::Linear).await?;
    let from_sync = Replay::open(&path, TrackKind::Linear)?;
    assert_eq!(from_async, from_sync);

    let missing = Replay::open(dir.path().join("missing.mrf"), TrackKind::Linear).unwrap_err();
    assert!(matches!(missing, ReplayError::File { .. }));
    Ok(())
}
