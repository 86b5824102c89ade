//! Perspective projection and NDC-to-cell viewport matrices
//!
//! Both are built once at startup (and again on terminal resize); all
//! configuration faults are rejected here, before the render loop, so
//! the per-pixel hot path never validates anything.

use super::math::Mat4;
use super::types::SetupError;

/// OpenGL-style right-handed perspective matrix.
///
/// Camera space looks down -z; clip w ends up as -z_camera, so the
/// perspective divide happens against the distance in front of the eye.
/// NDC z spans [-1,1] between the near and far planes.
pub fn perspective(near: f32, far: f32, fov_degrees: f32, aspect: f32) -> Result<Mat4, SetupError> {
    if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
        return Err(SetupError::InvalidFov(fov_degrees));
    }
    if !(near > 0.0 && near < far) {
        return Err(SetupError::InvalidPlanes { near, far });
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(SetupError::InvalidAspect(aspect));
    }

    let f = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
    Ok(Mat4 {
        m: [
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (near + far) / (near - far), 2.0 * near * far / (near - far)],
            [0.0, 0.0, -1.0, 0.0],
        ],
    })
}

/// Matrix mapping NDC to display-cell coordinates.
///
/// x in [-1,1] maps to [0,width], y to [0,height] with +1 at the top
/// row (cell rows grow downward), and z in [-1,1] to [0,1]. The depth
/// buffer compares this normalized value, not camera-space z, so
/// ordering stays consistent even though it is not perspective-linear.
pub fn viewport(width: usize, height: usize) -> Result<Mat4, SetupError> {
    if width == 0 || height == 0 {
        return Err(SetupError::InvalidDimensions { width, height });
    }

    let (w, h) = (width as f32, height as f32);
    Ok(Mat4 {
        m: [
            [w / 2.0, 0.0, 0.0, w / 2.0],
            [0.0, -h / 2.0, 0.0, h / 2.0],
            [0.0, 0.0, 0.5, 0.5],
            [0.0, 0.0, 0.0, 1.0],
        ],
    })
}
