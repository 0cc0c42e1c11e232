//! InputButtons type for the per-frame button bitmask

use serde::{Deserialize, Serialize};

use super::input_flags;

/// Input buttons held during one recorded tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(transparent)]
pub struct InputButtons(pub u32);

impl InputButtons {
    /// Create InputButtons from a raw u32 value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Check if a specific bit is set.
    pub fn is_set(&self, bit: u32) -> bool {
        bit < u32::BITS && (self.0 & (1 << bit)) != 0
    }

    /// Check if any bit of a mask is set.
    pub fn has_flag(&self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Get the raw u32 value.
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_jumping(&self) -> bool {
        self.has_flag(input_flags::JUMP)
    }

    pub fn is_ducking(&self) -> bool {
        self.has_flag(input_flags::DUCK)
    }

    /// Whether any movement key is held.
    pub fn is_strafing(&self) -> bool {
        self.has_flag(input_flags::STRAFE_MASK)
    }
}

impl From<u32> for InputButtons {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
