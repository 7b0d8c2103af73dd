//! Post-process parameters.
//!
//! The shading passes (depth-of-field blur, foveated blur, lens unwarp) run
//! on the GPU and are not part of this crate. This module derives the
//! scalar and matrix inputs they consume, plus CPU reference versions of
//! the per-fragment formulas for hosts and tests.

mod depth_of_field;
mod foveation;
mod lens_unwarp;

pub use depth_of_field::DepthOfFieldParams;
pub use foveation::{
    gaussian_kernel, pixel_visual_angle, FoveationLayer, FoveationParams,
    MIDDLE_KERNEL_RADIUS, OUTER_KERNEL_RADIUS,
};
pub use lens_unwarp::LensUnwarpParams;
