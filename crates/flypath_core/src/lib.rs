//! Flypath Core
//!
//! Plain value types shared by every flypath crate.
//!
//! - [`Vec3`] - 3D points and directions
//! - [`Quat`] - rotations, including camera "look at" construction
//! - [`CameraPose`] - position plus rotation of a virtual camera

pub mod math;
pub mod pose;
pub mod quat;

pub use math::Vec3;
pub use pose::CameraPose;
pub use quat::Quat;
