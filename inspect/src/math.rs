//! Math type aliases used by the composite marshallers.
//!
//! Vectors come from nalgebra; [`Rect`] is the one small value type the
//! inspector defines itself.

use nalgebra::{Vector2, Vector3, Vector4};

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;

/// Axis-aligned rectangle, expanded by the inspector into `x/y/w/h`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}
