//! Per-tick run frame

use serde::{Deserialize, Serialize};

use super::InputButtons;

/// Player state sampled on one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RunFrame {
    pub eye_angle_x: f32,
    pub eye_angle_y: f32,
    pub eye_angle_z: f32,
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    pub view_offset: f32,
    pub buttons: InputButtons,
}

impl RunFrame {
    pub fn position(&self) -> [f32; 3] {
        [self.pos_x, self.pos_y, self.pos_z]
    }

    pub fn eye_angles(&self) -> [f32; 3] {
        [self.eye_angle_x, self.eye_angle_y, self.eye_angle_z]
    }
}
