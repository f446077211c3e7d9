use bevy::prelude::*;
use constants::session::{CENTIMETRES_TO_METRES, DEFAULT_BOX_SIZE_CM};
use serde::{Deserialize, Serialize};

use super::error::SessionError;

/// Box size as entered by the user, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BoxDimensions {
    fn default() -> Self {
        let [width, height, depth] = DEFAULT_BOX_SIZE_CM;
        Self::new(width, height, depth)
    }
}

impl BoxDimensions {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Build dimensions from untrusted input, rejecting zero, negative and non-finite values.
    pub fn try_new(width: f32, height: f32, depth: f32) -> Result<Self, SessionError> {
        for (axis, value) in [("width", width), ("height", height), ("depth", depth)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SessionError::InvalidDimension { axis, value });
            }
        }
        Ok(Self::new(width, height, depth))
    }

    /// Scale factors for a unit cube in scene metres.
    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * CENTIMETRES_TO_METRES
    }

    /// Human readable size, e.g. `25 x 30 x 15 cm`.
    pub fn label(&self) -> String {
        format!("{} x {} x {} cm", self.width, self.height, self.depth)
    }
}
