//! Camera pose

use crate::math::Vec3;
use crate::quat::Quat;
use serde::{Deserialize, Serialize};

/// Position and rotation of a camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion (camera looks down local -Z)
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` facing `target`
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::facing(position, target, up),
        }
    }

    /// Viewing direction
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    /// Same position with a different rotation
    pub fn with_rotation(&self, rotation: Quat) -> Self {
        Self {
            position: self.position,
            rotation,
        }
    }

    /// Same rotation at a different position
    pub fn with_position(&self, position: Vec3) -> Self {
        Self {
            position,
            rotation: self.rotation,
        }
    }
}
