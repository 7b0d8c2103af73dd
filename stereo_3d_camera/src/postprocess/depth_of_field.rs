//! Depth-of-field inputs: projection pair, gaze and pupil, plus CPU
//! versions of the depth reconstruction and circle-of-confusion formulas.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::camera::Eye;
use crate::error::{Error, Result};
use crate::math::element;
use crate::state::ViewerState;
use crate::transform_engine::TransformEngine;

/// Inputs of the depth-of-field pass.
///
/// Window coordinates are in pixels with the origin at the bottom-left
/// corner, depth samples in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthOfFieldParams {
    /// Projection used by the scene pass
    pub projection: Mat4,
    /// Inverse of `projection`, from the same update
    pub inverse_projection: Mat4,
    /// Window size in pixels
    pub window_size: Vec2,
    /// Gaze position in pixels; the focus distance is read there
    pub gaze_position: Vec2,
    /// Pupil diameter in mm
    pub pupil_diameter: f32,
    /// Pixel pitch in mm
    pub pixel_pitch: f32,
}

impl DepthOfFieldParams {
    /// Gather the parameters from the engine's monocular slot.
    ///
    /// # Errors
    ///
    /// - `Error::UnpopulatedSlot` if the last update did not fill the mono slot
    /// - `Error::InvalidParameter` if the pupil diameter is not positive
    pub fn from_engine(engine: &TransformEngine, state: &ViewerState) -> Result<Self> {
        if !(state.pupil_diameter > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "pupil diameter must be positive, got {}",
                state.pupil_diameter
            )));
        }

        let slot = engine.eye(Eye::Mono)?;
        let display = engine.display();

        Ok(Self {
            projection: slot.projection,
            inverse_projection: slot.inverse_projection,
            window_size: Vec2::new(display.canvas_width as f32, display.canvas_height as f32),
            gaze_position: state.gaze_position,
            pupil_diameter: state.pupil_diameter,
            pixel_pitch: display.pixel_pitch,
        })
    }

    /// Reconstruct the view-space point behind a window pixel from its depth sample.
    ///
    /// Clip w is `P(2,3) / (z_ndc + P(2,2))`, which is `-z_view`. The
    /// `z_ndc - P(2,2)` form found in some depth-of-field shaders does not
    /// invert the projection.
    pub fn window_to_view_space(&self, window: Vec2, depth: f32) -> Vec3 {
        let half = self.window_size * 0.5;
        let xy_ndc = (window - half) / half;
        let z_ndc = 2.0 * depth - 1.0;

        // Perspective: clip w is -z_view, recovered from the depth row.
        // Orthographic: w stays 1.
        let w_clip = if element(&self.projection, 3, 2) == 0.0 {
            1.0
        } else {
            element(&self.projection, 2, 3) / (z_ndc + element(&self.projection, 2, 2))
        };

        let clip = Vec4::new(xy_ndc.x, xy_ndc.y, z_ndc, 1.0) * w_clip;
        let view = self.inverse_projection * clip;
        view.truncate() / view.w
    }

    /// Distance from the eye to the surface seen at `window`, in mm.
    pub fn distance_to_fragment(&self, window: Vec2, depth: f32) -> f32 {
        self.window_to_view_space(window, depth).length()
    }

    /// Circle of confusion in mm for a fragment at `fragment_distance`
    /// while focused at `focus_distance`.
    pub fn circle_of_confusion(&self, fragment_distance: f32, focus_distance: f32) -> f32 {
        self.pupil_diameter * (focus_distance - fragment_distance).abs() / focus_distance
    }

    /// Blur radius in pixels.
    pub fn blur_radius_pixels(&self, fragment_distance: f32, focus_distance: f32) -> f32 {
        self.circle_of_confusion(fragment_distance, focus_distance) / self.pixel_pitch
    }
}

#[cfg(test)]
#[path = "depth_of_field_tests.rs"]
mod tests;
