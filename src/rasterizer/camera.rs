//! Camera state and view-matrix construction
//!
//! The view transform is a pure function of (position, yaw, pitch); the
//! `Camera` struct only caches its result so `matrix()` is never stale.
//! Yaw and pitch are in degrees. World up is fixed at (0,1,0).

use super::math::{Mat4, Vec3};

/// Pitch is clamped short of straight up/down: at exactly ±90° the
/// forward vector is parallel to world up and the right vector
/// degenerates to zero.
pub const PITCH_LIMIT: f32 = 89.9;

/// Forward unit vector for a yaw/pitch pair (degrees)
pub fn compute_front(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3 {
        x: pitch.cos() * yaw.cos(),
        y: pitch.sin(),
        z: pitch.cos() * yaw.sin(),
    }
    .normalize()
}

/// World-to-camera matrix for a camera at `position` looking along
/// `compute_front(yaw, pitch)`.
///
/// The camera basis (right, up, back) goes into the matrix columns and
/// the result is the inverse of translation * basis, so camera space
/// looks down its -z axis. With pitch inside PITCH_LIMIT the basis is
/// orthonormal and the inverse always exists.
pub fn compute_view(position: Vec3, yaw: f32, pitch: f32) -> Mat4 {
    let forward = compute_front(yaw, pitch);
    let right = forward.cross(Vec3::UP).normalize();
    let up = right.cross(forward);

    let camera_to_world =
        Mat4::translation(position) * Mat4::from_basis(right, up, -forward);
    camera_to_world.inverse().unwrap_or(Mat4::IDENTITY)
}

/// Movable camera with an eagerly recomputed view matrix
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    view: Mat4,
}

impl Camera {
    /// Camera at `position` with the given yaw/pitch in degrees
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position,
            yaw,
            pitch,
            view: compute_view(position, yaw, pitch),
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate();
    }

    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.recalculate();
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.recalculate();
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.recalculate();
    }

    /// Current world-to-camera matrix
    pub fn matrix(&self) -> Mat4 {
        self.view
    }

    /// Current forward unit vector
    pub fn front(&self) -> Vec3 {
        compute_front(self.yaw, self.pitch)
    }

    /// Strafe axis, perpendicular to forward in the ground plane
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::UP).normalize()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn recalculate(&mut self) {
        self.view = compute_view(self.position, self.yaw, self.pitch);
    }
}

impl Default for Camera {
    fn default() -> Self {
        // Looking down -z from a short distance back
        Self::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::Vec4;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!((a.x - b.x).abs() < 1e-4, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 1e-4, "{:?} != {:?}", a, b);
        assert!((a.z - b.z).abs() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_front_yaw_minus_90_looks_down_negative_z() {
        assert_vec3_eq(compute_front(-90.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_view_maps_own_position_to_origin() {
        let cam = Camera::new(Vec3::new(3.0, -2.0, 7.5), 40.0, -25.0);
        let eye = cam.matrix() * Vec4::from_point(cam.position());
        assert_vec3_eq(eye.xyz(), Vec3::ZERO);
    }

    #[test]
    fn test_view_puts_point_ahead_on_negative_z() {
        let cam = Camera::new(Vec3::ZERO, -90.0, 0.0);
        let ahead = cam.matrix() * Vec4::from_point(Vec3::new(0.0, 0.0, -4.0));
        assert_vec3_eq(ahead.xyz(), Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn test_setters_keep_matrix_fresh() {
        let mut cam = Camera::default();
        cam.set_position(Vec3::new(1.0, 2.0, 3.0));
        cam.set_yaw(-45.0);
        cam.set_pitch(10.0);
        let expected = compute_view(cam.position(), cam.yaw(), cam.pitch());
        assert_eq!(cam.matrix(), expected);

        cam.set_rotation(120.0, -30.0);
        assert_eq!(cam.yaw(), 120.0);
        assert_eq!(cam.pitch(), -30.0);
        let expected = compute_view(cam.position(), 120.0, -30.0);
        assert_eq!(cam.matrix(), expected);
    }

    #[test]
    fn test_pitch_clamped_below_vertical() {
        let mut cam = Camera::default();
        cam.set_pitch(90.0);
        assert!(cam.pitch() <= PITCH_LIMIT);
        // Basis stays well-formed: position still round-trips to origin
        let eye = cam.matrix() * Vec4::from_point(cam.position());
        assert!(eye.xyz().len() < 1e-3);
    }
}
