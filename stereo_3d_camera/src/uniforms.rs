//! GPU upload layout for the shading collaborators.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::transform_engine::EyeMatrices;

/// Per-eye uniform block: four column-major `mat4`, std140-compatible.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EyeUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub inverse_projection: Mat4,
}

impl EyeUniforms {
    pub const SIZE: usize = std::mem::size_of::<EyeUniforms>();
    pub const OFFSET_MODEL: usize = std::mem::offset_of!(EyeUniforms, model);
    pub const OFFSET_VIEW: usize = std::mem::offset_of!(EyeUniforms, view);
    pub const OFFSET_PROJECTION: usize = std::mem::offset_of!(EyeUniforms, projection);
    pub const OFFSET_INVERSE_PROJECTION: usize = std::mem::offset_of!(EyeUniforms, inverse_projection);

    pub fn new(model: &Mat4, eye: &EyeMatrices) -> Self {
        Self {
            model: *model,
            view: eye.view,
            projection: eye.projection,
            inverse_projection: eye.inverse_projection,
        }
    }

    /// Raw bytes, ready for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
#[path = "uniforms_tests.rs"]
mod tests;
