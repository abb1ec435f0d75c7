//! Blendable values
//!
//! [`Interpolate`] is implemented for everything a camera tween moves:
//! scalars and points blend linearly, rotations blend along the sphere, and
//! a [`CameraPose`] does both at once.

use flypath_core::{CameraPose, Quat, Vec3};

/// A value that can be blended toward another
pub trait Interpolate: Copy {
    /// Blend from `self` (t = 0) to `other` (t = 1)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(self, *other, t)
    }
}

/// Rotations take the shorter great-circle arc
impl Interpolate for Quat {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.slerp(*other, t)
    }
}

/// Any component equal in both poses is held bit-for-bit, so a pure turn
/// never drifts the position and a pure move never drifts the rotation.
impl Interpolate for CameraPose {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let position = if self.position == other.position {
            self.position
        } else {
            self.position.lerp(other.position, t)
        };
        let rotation = if self.rotation == other.rotation {
            self.rotation
        } else {
            Interpolate::lerp(&self.rotation, &other.rotation, t)
        };
        CameraPose { position, rotation }
    }
}
