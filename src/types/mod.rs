//! Core types for decoded replay data.
//!
//! ## Architecture
//!
//! The types mirror the three regions of a replay file:
//! - [`ReplayHeader`] is the fixed header at the front of the buffer
//! - [`BaseStats`], [`ZoneStats`] and [`RunStats`] form the statistics block
//! - [`RunFrame`] is one per-tick sample, with [`InputButtons`] for the button bitmask
//! - [`Replay`] composes a header, its statistics and its frames
//!
//! [`TrackKind`] selects between the staged and linear statistics layouts.
//!
//! All types are plain owned data; none of them borrow the source buffer.

mod buttons;
mod frame;
mod header;
pub mod input_flags;
mod replay;
mod stats;
mod track_kind;

// Re-export all public types
pub use buttons::InputButtons;
pub use frame::RunFrame;
pub use header::ReplayHeader;
pub use replay::Replay;
pub use stats::{BaseStats, RunStats, ZoneStats};
pub use track_kind::TrackKind;
