//! TransformEngine: per-frame mode dispatcher.
//!
//! Owns the display optics for its whole life and recomputes every matrix
//! from scratch on each `update`. Only the slots of the active mode are
//! written; the others keep whatever an earlier mode left there and are
//! refused on read.

use glam::Mat4;
use crate::camera::{check_look_direction, compute_model_transform, Eye, FrustumPolicy};
use crate::config::EngineConfig;
use crate::display::DisplayParameters;
use crate::error::{Error, Result};
use crate::state::{RenderingMode, ViewerState};
use crate::uniforms::EyeUniforms;

const SOURCE: &str = "stereo3d::TransformEngine";

/// View and projection matrices of one eye slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeMatrices {
    /// World to camera space
    pub view: Mat4,
    /// Camera to clip space
    pub projection: Mat4,
    /// Exact inverse of `projection`, rebuilt with it
    pub inverse_projection: Mat4,
}

impl EyeMatrices {
    const IDENTITY: Self = Self {
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
        inverse_projection: Mat4::IDENTITY,
    };

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Model/view/projection state of one renderer.
///
/// # Example
///
/// ```
/// use stereo_3d_camera::stereo3d::{
///     DisplayParameters, Eye, RenderingMode, TransformEngine, ViewerState,
/// };
///
/// let mut engine = TransformEngine::new(DisplayParameters::default());
/// engine.update(&ViewerState::default(), RenderingMode::Anaglyph);
///
/// let left = engine.projection_matrix(Eye::Left)?;
/// let right = engine.projection_matrix(Eye::Right)?;
/// assert_ne!(left, right);
/// assert!(engine.projection_matrix(Eye::Mono).is_err());
/// # Ok::<(), stereo_3d_camera::stereo3d::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TransformEngine {
    display: DisplayParameters,
    config: EngineConfig,
    model: Mat4,
    slots: [EyeMatrices; 3],
    mode: Option<RenderingMode>,
    policy: Option<FrustumPolicy>,
}

impl TransformEngine {
    /// Create an engine with the default configuration.
    pub fn new(display: DisplayParameters) -> Self {
        Self::with_config(display, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(display: DisplayParameters, config: EngineConfig) -> Self {
        if let Err(err) = display.validate() {
            crate::camera_warn!(SOURCE, "Display parameters out of range: {}", err);
        }

        crate::camera_info!(
            SOURCE,
            "Created for {}x{} canvas, pitch {} mm, ipd {} mm, viewer at {} mm",
            display.canvas_width,
            display.canvas_height,
            display.pixel_pitch,
            display.ipd,
            display.distance_screen_viewer
        );

        Self {
            display,
            config,
            model: Mat4::IDENTITY,
            slots: [EyeMatrices::IDENTITY; 3],
            mode: None,
            policy: None,
        }
    }

    // ===== UPDATE =====

    /// Recompute the model matrix and the slots of `mode`.
    ///
    /// Degenerate input (coincident eye and target, empty clip range...) is
    /// not rejected: the resulting matrices are singular or non-finite. With
    /// `validate_inputs` set, a warning is logged.
    pub fn update(&mut self, state: &ViewerState, mode: RenderingMode) {
        if self.config.validate_inputs {
            if let Err(err) = self.check(state, mode) {
                crate::camera_warn!(SOURCE, "{:?} update with degenerate input: {}", mode, err);
            }
        }
        self.apply(state, mode);
    }

    /// Like `update`, but fails on degenerate input and leaves the engine untouched.
    ///
    /// # Errors
    ///
    /// - `Error::DegenerateView` if the gaze is zero-length or parallel to world up
    /// - `Error::InvalidFrustum` if any populated slot has an empty clip extent
    pub fn try_update(&mut self, state: &ViewerState, mode: RenderingMode) -> Result<()> {
        if let Err(err) = self.check(state, mode) {
            crate::camera_error!(SOURCE, "Rejected {:?} update: {}", mode, err);
            return Err(err);
        }
        self.apply(state, mode);
        Ok(())
    }

    fn check(&self, state: &ViewerState, mode: RenderingMode) -> Result<()> {
        let policy = FrustumPolicy::resolve(mode, state, &self.display, &self.config);

        if !matches!(policy, FrustumPolicy::TopView { .. }) {
            check_look_direction(state.viewer_position, state.viewer_target, self.config.epsilon)?;
        }

        for &eye in policy.eyes() {
            policy
                .clip_bounds(&self.display, state.clip_near, state.clip_far, eye)
                .validate(self.config.epsilon)?;
        }

        Ok(())
    }

    fn apply(&mut self, state: &ViewerState, mode: RenderingMode) {
        let policy = FrustumPolicy::resolve(mode, state, &self.display, &self.config);

        if self.mode != Some(mode) || self.policy != Some(policy) {
            crate::camera_debug!(SOURCE, "Rendering mode {:?} -> {:?} ({:?})", self.mode, mode, policy);
        }

        self.model = compute_model_transform(state.model_translation, state.model_rotation);

        for &eye in policy.eyes() {
            let projection = policy.projection(&self.display, state, eye);
            self.slots[eye.index()] = EyeMatrices {
                view: policy.view_transform(state, eye),
                projection: projection.matrix,
                inverse_projection: projection.inverse,
            };
        }

        self.mode = Some(mode);
        self.policy = Some(policy);

        crate::camera_trace!(SOURCE, "Updated {:?} for {:?}", policy.eyes(), mode);
    }

    // ===== GETTERS =====

    /// Display optics this engine was built with.
    pub fn display(&self) -> &DisplayParameters {
        &self.display
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mode of the last update (`None` before the first one).
    pub fn mode(&self) -> Option<RenderingMode> {
        self.mode
    }

    /// Frustum policy of the last update.
    pub fn policy(&self) -> Option<FrustumPolicy> {
        self.policy
    }

    /// Object-to-world matrix of the last update.
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model
    }

    /// Eye slots valid for the current mode.
    pub fn active_eyes(&self) -> &'static [Eye] {
        match self.policy {
            Some(policy) => policy.eyes(),
            None => &[],
        }
    }

    pub fn is_populated(&self, eye: Eye) -> bool {
        self.active_eyes().contains(&eye)
    }

    /// Matrices of `eye`.
    ///
    /// # Errors
    ///
    /// `Error::UnpopulatedSlot` if the current mode does not render `eye`.
    pub fn eye(&self, eye: Eye) -> Result<&EyeMatrices> {
        if !self.is_populated(eye) {
            crate::camera_error!(SOURCE, "{:?} eye read while in {:?} mode", eye, self.mode);
            return Err(Error::UnpopulatedSlot { eye, mode: self.mode });
        }
        Ok(&self.slots[eye.index()])
    }

    pub fn view_matrix(&self, eye: Eye) -> Result<&Mat4> {
        Ok(&self.eye(eye)?.view)
    }

    pub fn projection_matrix(&self, eye: Eye) -> Result<&Mat4> {
        Ok(&self.eye(eye)?.projection)
    }

    pub fn inverse_projection_matrix(&self, eye: Eye) -> Result<&Mat4> {
        Ok(&self.eye(eye)?.inverse_projection)
    }

    /// GPU upload block for `eye`.
    pub fn uniforms(&self, eye: Eye) -> Result<EyeUniforms> {
        Ok(EyeUniforms::new(&self.model, self.eye(eye)?))
    }
}

#[cfg(test)]
#[path = "transform_engine_tests.rs"]
mod tests;
