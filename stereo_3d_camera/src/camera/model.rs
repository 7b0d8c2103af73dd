use glam::{Mat4, Vec2, Vec3};
use crate::math;

/// Object-to-world transform: `Rx * Ry * T`.
///
/// A point is translated first, then rotated about Y, then about X.
/// `rotation_degrees.x` is the pitch (about X), `.y` the yaw (about Y).
pub fn compute_model_transform(translation: Vec3, rotation_degrees: Vec2) -> Mat4 {
    let rotation_x = math::rotation_x(rotation_degrees.x.to_radians());
    let rotation_y = math::rotation_y(rotation_degrees.y.to_radians());

    rotation_x * rotation_y * math::translation(translation)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
