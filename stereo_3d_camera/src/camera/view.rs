//! View transform built from an explicit camera basis.

use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::math;

/// Fixed world-up direction.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Camera basis `(x̂, ŷ, ẑ)` for an eye looking at `target`.
///
/// The camera looks down -ẑ. ŷ is re-orthogonalized from ẑ and x̂, not
/// taken from world up. A zero-length gaze or a gaze parallel to world up
/// yields NaN components; nothing is substituted.
pub fn camera_basis(eye: Vec3, target: Vec3) -> (Vec3, Vec3, Vec3) {
    let gaze = target - eye;
    let z_axis = -(gaze / gaze.length());
    let side = WORLD_UP.cross(z_axis);
    let x_axis = side / side.length();
    let y_axis = z_axis.cross(x_axis);

    (x_axis, y_axis, z_axis)
}

/// World-to-camera transform: `translate(eye_offset, 0, 0) * R * translate(-eye)`.
///
/// `eye_offset` is a camera-space shift along the camera's own right axis,
/// applied after the rotation (0 for monocular rendering).
pub fn compute_view_transform(eye: Vec3, target: Vec3, eye_offset: f32) -> Mat4 {
    let (x, y, z) = camera_basis(eye, target);

    let rotation = math::mat4_from_rows([
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    let offset = math::translation(Vec3::new(eye_offset, 0.0, 0.0));

    offset * rotation * math::translation(-eye)
}

/// Overhead camera `height` mm above the origin, looking straight down
/// with world -Z as screen up.
pub fn top_view_transform(height: f32) -> Mat4 {
    math::mat4_from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 1.0, 0.0, -height],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Reject look directions for which `camera_basis` is undefined.
pub fn check_look_direction(eye: Vec3, target: Vec3, epsilon: f32) -> Result<()> {
    let gaze = target - eye;
    let length = gaze.length();
    if !(length > epsilon) {
        return Err(Error::DegenerateView(format!(
            "viewer position {} and target {} coincide",
            eye, target
        )));
    }

    if WORLD_UP.cross(gaze / length).length() <= epsilon {
        return Err(Error::DegenerateView(format!(
            "gaze {} is parallel to world up",
            gaze
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
