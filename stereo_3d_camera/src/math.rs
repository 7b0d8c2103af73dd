//! Vector/matrix kernel.
//!
//! Matrices are `glam::Mat4`: column-major storage, column-vector convention
//! (`v' = M * v`). The builders here are written out row by row so that the
//! layout on the page matches the textbook notation; `element(m, row, col)`
//! reads with the same indexing.

use glam::{Mat4, Vec3, Vec4};

/// Build a matrix from its rows.
#[inline]
pub fn mat4_from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(&rows).transpose()
}

/// Matrix element at (row, col).
#[inline]
pub fn element(m: &Mat4, row: usize, col: usize) -> f32 {
    m.col(col)[row]
}

/// Translation by `t`.
pub fn translation(t: Vec3) -> Mat4 {
    mat4_from_rows([
        [1.0, 0.0, 0.0, t.x],
        [0.0, 1.0, 0.0, t.y],
        [0.0, 0.0, 1.0, t.z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-handed rotation about +X by `radians`.
pub fn rotation_x(radians: f32) -> Mat4 {
    let (s, c) = radians.sin_cos();
    mat4_from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-handed rotation about +Y by `radians`.
pub fn rotation_y(radians: f32) -> Mat4 {
    let (s, c) = radians.sin_cos();
    mat4_from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Transform a point (w = 1) and divide by the resulting w.
///
/// For affine matrices w stays 1 and this is a plain transform; for
/// projections it yields normalized device coordinates.
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    let h = *m * p.extend(1.0);
    h.truncate() / h.w
}

/// Transform a direction (w = 0).
pub fn transform_vector(m: &Mat4, v: Vec3) -> Vec3 {
    (*m * Vec4::new(v.x, v.y, v.z, 0.0)).truncate()
}

/// Largest absolute element-wise difference between two matrices.
pub fn max_abs_diff(a: &Mat4, b: &Mat4) -> f32 {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .fold(0.0_f32, |acc, (x, y)| acc.max((x - y).abs()))
}

/// True if every element is finite.
pub fn is_finite(m: &Mat4) -> bool {
    m.to_cols_array().iter().all(|v| v.is_finite())
}

#[cfg(test)]
#[path = "math_tests.rs"]
mod tests;
