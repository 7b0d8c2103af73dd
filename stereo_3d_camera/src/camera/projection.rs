//! Off-center perspective and orthographic projections.
//!
//! Both builders take explicit clip bounds, so symmetric, off-axis and
//! lens-offset frustums go through the same code. Each has a closed-form
//! inverse built from the same bounds.

use glam::Mat4;
use crate::error::{Error, Result};
use crate::math::mat4_from_rows;

/// Projection family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

/// Clip-space boundaries. For perspective, left/right/top/bottom are
/// measured on the near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl ClipBounds {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self { left, right, top, bottom, near, far }
    }

    /// Bounds mirrored about the forward axis.
    pub fn symmetric(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self::new(-half_width, half_width, half_height, -half_height, near, far)
    }

    /// Check every denominator the builders divide by.
    ///
    /// The builders themselves never call this: degenerate bounds produce a
    /// singular matrix there.
    pub fn validate(&self, epsilon: f32) -> Result<()> {
        let values = [self.left, self.right, self.top, self.bottom, self.near, self.far];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidFrustum(format!("non-finite bounds {:?}", self)));
        }
        if !(self.right - self.left > epsilon) {
            return Err(Error::InvalidFrustum(format!(
                "right {} must exceed left {}",
                self.right, self.left
            )));
        }
        if !(self.top - self.bottom > epsilon) {
            return Err(Error::InvalidFrustum(format!(
                "top {} must exceed bottom {}",
                self.top, self.bottom
            )));
        }
        if !(self.near > epsilon) {
            return Err(Error::InvalidFrustum(format!("near {} must be positive", self.near)));
        }
        if !(self.far - self.near > epsilon) {
            return Err(Error::InvalidFrustum(format!(
                "far {} must exceed near {}",
                self.far, self.near
            )));
        }
        Ok(())
    }
}

/// Off-center perspective projection (OpenGL clip conventions, NDC z in [-1, 1]).
pub fn perspective(b: &ClipBounds) -> Mat4 {
    let (l, r, t, bt, n, f) = (b.left, b.right, b.top, b.bottom, b.near, b.far);

    mat4_from_rows([
        [2.0 * n / (r - l), 0.0, (r + l) / (r - l), 0.0],
        [0.0, 2.0 * n / (t - bt), (t + bt) / (t - bt), 0.0],
        [0.0, 0.0, (n + f) / (n - f), 2.0 * f * n / (n - f)],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Closed-form inverse of `perspective(b)`.
pub fn perspective_inverse(b: &ClipBounds) -> Mat4 {
    let (l, r, t, bt, n, f) = (b.left, b.right, b.top, b.bottom, b.near, b.far);

    // Row-space shorthand of the forward matrix
    let sx = 2.0 * n / (r - l);
    let sy = 2.0 * n / (t - bt);
    let ox = (r + l) / (r - l);
    let oy = (t + bt) / (t - bt);
    let a = (n + f) / (n - f);
    let c = 2.0 * f * n / (n - f);

    mat4_from_rows([
        [1.0 / sx, 0.0, 0.0, ox / sx],
        [0.0, 1.0 / sy, 0.0, oy / sy],
        [0.0, 0.0, 0.0, -1.0],
        [0.0, 0.0, 1.0 / c, a / c],
    ])
}

/// Off-center orthographic projection.
pub fn orthographic(b: &ClipBounds) -> Mat4 {
    let (l, r, t, bt, n, f) = (b.left, b.right, b.top, b.bottom, b.near, b.far);

    mat4_from_rows([
        [2.0 / (r - l), 0.0, 0.0, -(r + l) / (r - l)],
        [0.0, 2.0 / (t - bt), 0.0, -(t + bt) / (t - bt)],
        [0.0, 0.0, 2.0 / (n - f), -(n + f) / (f - n)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Closed-form inverse of `orthographic(b)`.
pub fn orthographic_inverse(b: &ClipBounds) -> Mat4 {
    let (l, r, t, bt, n, f) = (b.left, b.right, b.top, b.bottom, b.near, b.far);

    mat4_from_rows([
        [(r - l) / 2.0, 0.0, 0.0, (r + l) / 2.0],
        [0.0, (t - bt) / 2.0, 0.0, (t + bt) / 2.0],
        [0.0, 0.0, (n - f) / 2.0, -(n + f) / 2.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// A projection matrix together with its inverse, built from one set of bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub bounds: ClipBounds,
    pub matrix: Mat4,
    pub inverse: Mat4,
}

impl Projection {
    pub fn new(kind: ProjectionKind, bounds: ClipBounds) -> Self {
        let (matrix, inverse) = match kind {
            ProjectionKind::Perspective => (perspective(&bounds), perspective_inverse(&bounds)),
            ProjectionKind::Orthographic => (orthographic(&bounds), orthographic_inverse(&bounds)),
        };
        Self { kind, bounds, matrix, inverse }
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
