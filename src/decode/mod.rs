//! Momentum Replay File (.mrf) decoding
//!
//! This module provides the three decode stages of a replay buffer and a
//! [`ReplayReader`] that runs them in order over a shared [`ByteCursor`](crate::ByteCursor).

pub mod format;
pub mod reader;

pub use reader::ReplayReader;
