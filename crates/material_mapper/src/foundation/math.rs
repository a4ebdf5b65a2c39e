//! Math utilities and types
//!
//! Thin aliases over `nalgebra` used by the light setup and render context.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Transform a direction by the upper 3x3 part of `matrix`.
///
/// Translation is ignored, matching how fixed-function lighting treats a
/// light position with `w = 0`.
pub fn transform_normal(matrix: &Mat4, direction: Vec3) -> Vec3 {
    matrix.transform_vector(&direction)
}

/// Extension trait for Mat4 with rotation constructors
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }
}
