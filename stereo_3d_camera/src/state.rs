//! Per-frame viewer state and rendering mode selector.

use glam::{Vec2, Vec3};

/// Rendering mode, selected by the host every frame.
///
/// `Foveated` and `DepthOfField` reuse the `Standard` camera; they only add
/// post-process parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderingMode {
    Standard,
    TopView,
    Anaglyph,
    LensStereo,
    Foveated,
    DepthOfField,
}

impl RenderingMode {
    /// True for modes that render one image per eye.
    pub fn is_stereo(&self) -> bool {
        matches!(self, RenderingMode::Anaglyph | RenderingMode::LensStereo)
    }
}

/// Viewer and model state written by the host once per frame.
///
/// Distances are in mm, model rotation in degrees (x = pitch, y = yaw),
/// gaze position in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    pub viewer_position: Vec3,
    pub viewer_target: Vec3,
    pub model_translation: Vec3,
    pub model_rotation: Vec2,
    pub clip_near: f32,
    pub clip_far: f32,
    /// Use the fixed overhead camera in monocular modes
    pub top_view: bool,
    /// Perspective (true) or orthographic (false) projection in monocular modes
    pub perspective: bool,
    pub gaze_position: Vec2,
    pub pupil_diameter: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            viewer_position: Vec3::new(0.0, 0.0, 800.0),
            viewer_target: Vec3::ZERO,
            model_translation: Vec3::ZERO,
            model_rotation: Vec2::ZERO,
            clip_near: 1.0,
            clip_far: 10000.0,
            top_view: false,
            perspective: true,
            gaze_position: Vec2::new(960.0, 540.0),
            pupil_diameter: 3.0,
        }
    }
}
