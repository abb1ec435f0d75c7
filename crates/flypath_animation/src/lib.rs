//! Flypath Animation
//!
//! Easing policies and time-driven tweens for camera motion.
//!
//! # Features
//!
//! - **Easing**: quadratic in/out, linear, and floor-quantized stepping
//! - **Tweens**: millisecond clocks that report eased progress per tick
//! - **Interpolation**: linear for points, spherical for rotations

pub mod easing;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use tween::Tween;
pub use values::Interpolate;
