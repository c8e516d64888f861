//! Math utilities and types
//!
//! Vector aliases used for glyph placement and quad construction.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Divide, returning zero when the denominator is zero
///
/// Layout-normalized coordinates divide by the text block size, which is
/// zero for degenerate layouts.
#[inline]
pub fn div_or_zero(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
