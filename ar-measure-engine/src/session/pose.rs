use bevy::prelude::*;
use serde_json::{Value, json};

use super::error::SessionError;

/// Rigid transform reported by the pose source or held by the placed box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY)
    }

    /// Decode a column-major 4x4 matrix as delivered by WebXR `XRRigidTransform.matrix`.
    ///
    /// Any scale baked into the matrix is discarded; only position and
    /// orientation survive.
    pub fn from_column_major(matrix: &[f32]) -> Result<Self, SessionError> {
        let columns: [f32; 16] = matrix
            .try_into()
            .map_err(|_| SessionError::MatrixLength(matrix.len()))?;

        if !columns.iter().all(|v| v.is_finite()) {
            return Err(SessionError::NonFiniteMatrix);
        }

        let (_scale, rotation, translation) =
            Mat4::from_cols_array(&columns).to_scale_rotation_translation();

        Ok(Self::new(translation, rotation.normalize()))
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            ..default()
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "position": self.translation.to_array(),
            "orientation": self.rotation.to_array(),
        })
    }
}
