//! Type-safe decoder for Momentum Replay Files (.mrf).
//!
//! A replay records one timed run through a map: a fixed header, aggregate
//! movement statistics for the whole run (and for each zone on staged tracks),
//! and one frame of player state per tick.
//!
//! # Features
//!
//! - **Bounds-checked**: every primitive read goes through a latched [`ByteCursor`]
//! - **Typed failures**: truncated or inconsistent buffers become [`ReplayError::Malformed`]
//! - **Staged decoding**: run header, stats and frames separately with [`ReplayReader`]
//! - **Policy**: optional magic/version checks via [`ReplayPolicy`], loadable from YAML
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mrf::{Replay, TrackKind};
//!
//! fn main() -> mrf::Result<()> {
//!     let replay = Replay::open("run.mrf", TrackKind::Staged)?;
//!
//!     println!("{} on {}", replay.header.player_name, replay.header.map_name);
//!     println!("Run time: {:.3}s", replay.header.run_time());
//!     for zone in &replay.zone_stats {
//!         println!("Zone {}: {} jumps", zone.zone_num, zone.base_stats.jumps);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod cursor;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Data source modules
pub mod decode;

// Core exports
pub use config::ReplayPolicy;
pub use cursor::ByteCursor;
pub use error::*;
pub use types::*;

// Decoder exports
pub use decode::ReplayReader;
pub use decode::format::{MRF_MAGIC, MRF_VERSION, read_frames, read_stats};
