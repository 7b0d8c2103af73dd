//! Engine configuration

/// TransformEngine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Near clip used by the overhead camera, independent of the viewer state
    pub top_view_near: f32,
    /// Far clip used by the overhead camera, independent of the viewer state
    pub top_view_far: f32,
    /// Height of the overhead camera above the origin in mm
    pub top_view_height: f32,
    /// Check clip bounds and look direction on every update and warn on degenerate input
    pub validate_inputs: bool,
    /// Threshold under which a denominator or a gaze length counts as zero
    pub epsilon: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_view_near: 1.0,
            top_view_far: 10000.0,
            top_view_height: 1500.0,
            validate_inputs: cfg!(debug_assertions),
            epsilon: 1e-6,
        }
    }
}
