//! Input button bits recorded in each run frame
//!
//! Bit positions follow the game engine's `IN_*` button definitions.

pub const ATTACK: u32 = 1 << 0; // IN_ATTACK
pub const JUMP: u32 = 1 << 1; // IN_JUMP
pub const DUCK: u32 = 1 << 2; // IN_DUCK
pub const FORWARD: u32 = 1 << 3; // IN_FORWARD
pub const BACK: u32 = 1 << 4; // IN_BACK
pub const USE: u32 = 1 << 5; // IN_USE
pub const CANCEL: u32 = 1 << 6; // IN_CANCEL
pub const LEFT: u32 = 1 << 7; // IN_LEFT
pub const RIGHT: u32 = 1 << 8; // IN_RIGHT
pub const MOVE_LEFT: u32 = 1 << 9; // IN_MOVELEFT
pub const MOVE_RIGHT: u32 = 1 << 10; // IN_MOVERIGHT

/// Buttons that steer horizontal movement.
pub const STRAFE_MASK: u32 = FORWARD | BACK | MOVE_LEFT | MOVE_RIGHT;
