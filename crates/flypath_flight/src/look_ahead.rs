//! Look-ahead orientation
//!
//! The camera faces a point a fixed number of waypoints ahead of where it
//! is, lifted along the up axis. Near the end of the path the target is
//! pinned to the last waypoint instead of running off the end.

use crate::sampler::Waypoint;
use flypath_core::{Quat, Vec3};

/// Where the camera should face, and which way is up
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// World point the camera's forward axis points at
    pub target: Vec3,
    /// World up used to fix the roll
    pub up: Vec3,
}

impl Orientation {
    /// Camera rotation for a camera standing at `eye`
    pub fn rotation_from(&self, eye: Vec3) -> Quat {
        Quat::facing(eye, self.target, self.up)
    }
}

/// `min(index + offset, len - 1)`; `len` must be non-zero
pub fn look_ahead_index(len: usize, index: usize, offset: usize) -> usize {
    index.saturating_add(offset).min(len.saturating_sub(1))
}

/// Orientation for a camera at waypoint `index`
///
/// Returns `None` for an empty path.
pub fn look_ahead(
    waypoints: &[Waypoint],
    index: usize,
    offset: usize,
    lift: f32,
    up: Vec3,
) -> Option<Orientation> {
    if waypoints.is_empty() {
        return None;
    }
    let up = up.normalize();
    let target_index = look_ahead_index(waypoints.len(), index, offset);
    Some(Orientation {
        target: waypoints[target_index].position + up * lift,
        up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(len: usize) -> Vec<Waypoint> {
        (0..len)
            .map(|i| Waypoint::new(i as f32, Vec3::new(i as f32 * 3.0, 0.0, 3.0)))
            .collect()
    }

    #[test]
    fn test_index_clamps_to_last() {
        assert_eq!(look_ahead_index(10, 2, 5), 7);
        assert_eq!(look_ahead_index(10, 7, 5), 9);
        assert_eq!(look_ahead_index(3, 0, 5), 2);
        assert_eq!(look_ahead_index(3, usize::MAX, 5), 2);
    }

    #[test]
    fn test_target_is_lifted_along_up() {
        let path = line(20);
        let orientation = look_ahead(&path, 4, 5, 12.0, Vec3::new(0.0, 0.0, 2.0)).unwrap();

        assert_eq!(orientation.up, Vec3::Z);
        assert_eq!(orientation.target, Vec3::new(27.0, 0.0, 15.0));
    }

    #[test]
    fn test_rotation_faces_target() {
        let path = line(20);
        let orientation = look_ahead(&path, 0, 5, 12.0, Vec3::Z).unwrap();
        let eye = path[0].position + Vec3::Z * 15.0;
        let forward = orientation.rotation_from(eye).forward();
        let expected = (orientation.target - eye).normalize();

        assert!(forward.distance(expected) < 1e-5);
    }

    #[test]
    fn test_empty_path() {
        assert!(look_ahead(&[], 0, 5, 12.0, Vec3::Z).is_none());
    }
}
