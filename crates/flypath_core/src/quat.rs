//! Unit quaternions
//!
//! Camera orientation is stored as a quaternion so turns can be blended with
//! slerp. Cameras look down their local -Z axis; [`Quat::facing`] builds the
//! rotation that points that axis at a target.

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Rotation as a unit quaternion `w + xi + yj + zk`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis` (right-handed)
    ///
    /// A zero-length axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Rotation whose local +Z axis is `forward` and whose local +Y is as
    /// close to `up` as the forward direction allows
    pub fn look_at(forward: Vec3, up: Vec3) -> Self {
        let f = unit_or(forward, Vec3::Z);
        let mut side = up.cross(f);
        if side.length() < 1e-6 {
            // up is parallel to forward; borrow the world axis least aligned with it
            let fallback = if f.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
            side = fallback.cross(f);
        }
        let r = unit_or(side, Vec3::X);
        let u = f.cross(r);
        Self::from_basis(r, u, f)
    }

    /// Camera rotation at `eye` facing `target`
    ///
    /// Cameras look down their local -Z axis, so the local +Z axis is
    /// pointed away from the target.
    pub fn facing(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::look_at(eye - target, up)
    }

    /// Quaternion of the rotation matrix with columns `x`, `y`, `z`
    fn from_basis(x: Vec3, y: Vec3, z: Vec3) -> Self {
        // Pick the largest of w, x, y, z to divide by for stability
        let trace = x.x + y.y + z.z;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new((y.z - z.y) / s, (z.x - x.z) / s, (x.y - y.x) / s, 0.25 * s)
        } else if x.x > y.y && x.x > z.z {
            let s = (1.0 + x.x - y.y - z.z).sqrt() * 2.0;
            Self::new(0.25 * s, (y.x + x.y) / s, (z.x + x.z) / s, (y.z - z.y) / s)
        } else if y.y > z.z {
            let s = (1.0 + y.y - x.x - z.z).sqrt() * 2.0;
            Self::new((y.x + x.y) / s, 0.25 * s, (z.y + y.z) / s, (z.x - x.z) / s)
        } else {
            let s = (1.0 + z.z - x.x - y.y).sqrt() * 2.0;
            Self::new((z.x + x.z) / s, (z.y + y.z) / s, 0.25 * s, (x.y - y.x) / s)
        };
        q.normalize()
    }

    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Unit-length copy; degenerate input gives the identity
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len.is_nan() || len < 1e-6 {
            return Self::IDENTITY;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Inverse rotation (conjugate of a unit quaternion)
    pub fn inverse(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Spherical interpolation along the shorter arc
    pub fn slerp(&self, other: Self, t: f32) -> Self {
        let mut cos_theta = self.dot(other);
        let mut end = other;
        if cos_theta < 0.0 {
            end = Self::new(-end.x, -end.y, -end.z, -end.w);
            cos_theta = -cos_theta;
        }

        // Nearly parallel: sin(theta) is too small to divide by
        let (from_weight, to_weight) = if cos_theta > 0.9995 {
            (1.0 - t, t)
        } else {
            let theta = cos_theta.acos();
            let sin_theta = theta.sin();
            (((1.0 - t) * theta).sin() / sin_theta, (t * theta).sin() / sin_theta)
        };

        Self::new(
            self.x * from_weight + end.x * to_weight,
            self.y * from_weight + end.y * to_weight,
            self.z * from_weight + end.z * to_weight,
            self.w * from_weight + end.w * to_weight,
        )
        .normalize()
    }

    /// Apply the rotation to `v`
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + w·t + q×t with t = 2·(q×v)
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Viewing direction of a camera with this rotation
    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::FORWARD)
    }

    /// Same rotation within `epsilon` (q and -q are the same rotation)
    pub fn approx_eq(&self, other: Self, epsilon: f32) -> bool {
        1.0 - self.dot(other).abs() < epsilon
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, b: Self) -> Self {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

fn unit_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len < 1e-6 {
        fallback
    } else {
        v * (1.0 / len)
    }
}
