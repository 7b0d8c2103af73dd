//! Per-mode frustum construction.
//!
//! The host picks a `RenderingMode`; `FrustumPolicy::resolve` turns it into
//! one of five frustum policies carrying only what that policy needs.
//! Everything below is derived from the display optics and the near clip;
//! W, H are the canvas size in pixels, p the pixel pitch and d the
//! screen-viewer distance.

use glam::Mat4;
use crate::config::EngineConfig;
use crate::display::DisplayParameters;
use crate::state::{RenderingMode, ViewerState};
use super::eye::Eye;
use super::projection::{ClipBounds, Projection, ProjectionKind};
use super::view::{compute_view_transform, top_view_transform};

const MONO_EYES: &[Eye] = &[Eye::Mono];
const STEREO_EYES: &[Eye] = &[Eye::Left, Eye::Right];

/// Frustum construction policy for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrustumPolicy {
    /// Screen-sized window scaled onto the near plane.
    SymmetricPerspective,
    /// Screen-sized box, independent of near and distance.
    SymmetricOrthographic,
    /// Fixed overhead camera with its own clip range.
    TopView { near: f32, far: f32, height: f32 },
    /// Two eyes sharing one physical screen.
    Anaglyph { ipd: f32 },
    /// One magnified half-screen viewport per eye.
    LensStereo { magnification: f32, ipd: f32 },
}

impl FrustumPolicy {
    /// Pick the policy for `mode`.
    ///
    /// Standard, Foveated and DepthOfField share the monocular camera and
    /// honour the state's `top_view` and `perspective` flags.
    pub fn resolve(
        mode: RenderingMode,
        state: &ViewerState,
        display: &DisplayParameters,
        config: &EngineConfig,
    ) -> Self {
        let top_view = FrustumPolicy::TopView {
            near: config.top_view_near,
            far: config.top_view_far,
            height: config.top_view_height,
        };

        match mode {
            RenderingMode::Standard | RenderingMode::Foveated | RenderingMode::DepthOfField => {
                if state.top_view {
                    top_view
                } else if state.perspective {
                    FrustumPolicy::SymmetricPerspective
                } else {
                    FrustumPolicy::SymmetricOrthographic
                }
            }
            RenderingMode::TopView => top_view,
            RenderingMode::Anaglyph => FrustumPolicy::Anaglyph { ipd: display.ipd },
            RenderingMode::LensStereo => FrustumPolicy::LensStereo {
                magnification: display.lens_magnification,
                ipd: display.ipd,
            },
        }
    }

    /// Eye slots this policy fills.
    pub fn eyes(&self) -> &'static [Eye] {
        match self {
            FrustumPolicy::Anaglyph { .. } | FrustumPolicy::LensStereo { .. } => STEREO_EYES,
            _ => MONO_EYES,
        }
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        match self {
            FrustumPolicy::SymmetricOrthographic => ProjectionKind::Orthographic,
            _ => ProjectionKind::Perspective,
        }
    }

    /// View matrix for `eye`.
    pub fn view_transform(&self, state: &ViewerState, eye: Eye) -> Mat4 {
        let offset = match *self {
            FrustumPolicy::TopView { height, .. } => return top_view_transform(height),
            FrustumPolicy::Anaglyph { ipd } | FrustumPolicy::LensStereo { ipd, .. } => {
                eye.view_offset(ipd)
            }
            _ => 0.0,
        };

        compute_view_transform(state.viewer_position, state.viewer_target, offset)
    }

    /// Clip bounds for `eye` given the state's clip range.
    ///
    /// Stereo policies asked for `Eye::Mono` return the centered frustum
    /// (no ipd shift for anaglyph, full magnified canvas for lens stereo).
    pub fn clip_bounds(
        &self,
        display: &DisplayParameters,
        clip_near: f32,
        clip_far: f32,
        eye: Eye,
    ) -> ClipBounds {
        let width = display.canvas_width_mm();
        let height = display.canvas_height_mm();
        let d = display.distance_screen_viewer;

        match *self {
            FrustumPolicy::SymmetricPerspective => ClipBounds::symmetric(
                (width / 2.0) * (clip_near / d),
                (height / 2.0) * (clip_near / d),
                clip_near,
                clip_far,
            ),
            FrustumPolicy::SymmetricOrthographic => {
                ClipBounds::symmetric(width / 2.0, height / 2.0, clip_near, clip_far)
            }
            FrustumPolicy::TopView { near, far, .. } => ClipBounds::symmetric(
                (width / 2.0) * (clip_near / d),
                (height / 2.0) * (clip_near / d),
                near,
                far,
            ),
            FrustumPolicy::Anaglyph { ipd } => {
                // Skew toward the other eye by half the ipd projected onto the near plane
                let shift = eye.stereo_sign() * ipd;
                let top = clip_near * (height / (2.0 * d));
                ClipBounds::new(
                    -clip_near * (width - shift) / (2.0 * d),
                    clip_near * (width + shift) / (2.0 * d),
                    top,
                    -top,
                    clip_near,
                    clip_far,
                )
            }
            FrustumPolicy::LensStereo { magnification, ipd } => {
                // w1: toward the nose, w2: toward the temple
                let w1 = magnification * ipd / 2.0;
                let w2 = magnification * (width - ipd) / 2.0;
                let top = clip_near * (magnification * height) / (2.0 * d);
                let (left, right) = match eye {
                    Eye::Left => (-clip_near * w2 / d, clip_near * w1 / d),
                    Eye::Right => (-clip_near * w1 / d, clip_near * w2 / d),
                    Eye::Mono => {
                        let half = clip_near * magnification * width / (2.0 * d);
                        (-half, half)
                    }
                };
                ClipBounds::new(left, right, top, -top, clip_near, clip_far)
            }
        }
    }

    /// Projection (and its inverse) for `eye`.
    pub fn projection(&self, display: &DisplayParameters, state: &ViewerState, eye: Eye) -> Projection {
        let bounds = self.clip_bounds(display, state.clip_near, state.clip_far, eye);
        Projection::new(self.projection_kind(), bounds)
    }
}

#[cfg(test)]
#[path = "frustum_policy_tests.rs"]
mod tests;
