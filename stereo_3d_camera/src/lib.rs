/*!
# Stereo 3D Camera

Camera transform pipeline for stereoscopic and gaze-contingent rendering.

Given physical display parameters and the viewer's pose, the crate computes
the model, view and projection matrices a renderer needs for each rendering
mode, one set per eye.

## Architecture

- **TransformEngine**: Per-frame dispatcher; owns the display, the active
  frustum policy and the per-eye matrix slots
- **FrustumPolicy**: How a rendering mode shapes the view and frustum of each eye
  (symmetric, top view, anaglyph, lens stereo)
- **camera**: Pure model, view and projection builders
- **postprocess**: Inputs for depth-of-field, foveation and lens unwarp passes
- **EyeUniforms**: GPU-ready per-eye matrix block

All lengths are in millimetres, all angles given by the viewer in degrees.
*/

// Internal modules
mod error;
mod config;
mod display;
mod state;
mod transform_engine;
mod uniforms;
pub mod log;
pub mod math;
pub mod camera;
pub mod postprocess;

// Main stereo3d namespace module
pub mod stereo3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine and its inputs
    pub use crate::transform_engine::{EyeMatrices, TransformEngine};
    pub use crate::config::EngineConfig;
    pub use crate::display::DisplayParameters;
    pub use crate::state::{RenderingMode, ViewerState};
    pub use crate::camera::{Eye, FrustumPolicy};
    pub use crate::uniforms::EyeUniforms;

    // Logging sub-module (types and functions; camera_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{
            log, log_detailed, reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity,
            Logger,
        };
    }

    // Camera sub-module with the transform builders
    pub mod camera {
        pub use crate::camera::*;
    }

    // Post-process sub-module
    pub mod postprocess {
        pub use crate::postprocess::*;
    }

    // Matrix helpers
    pub mod math {
        pub use crate::math::*;
    }
}

// Re-export math library at crate root
pub use glam;
