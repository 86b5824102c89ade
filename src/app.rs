//! Application state and per-frame orchestration
//!
//! Owns the camera, framebuffer, scene, and the derived projection and
//! viewport matrices. Matrices are rebuilt only on resize; everything a
//! frame needs is passed into the rasterizer as an explicit context.

use crate::rasterizer::{
    draw_triangles, perspective, viewport, Camera, Framebuffer, Mat4, RenderContext, SetupError,
    Vec3,
};
use crate::scene::Scene;
use crate::terminal::{InputEvent, Motion};

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 25.0;
const FOV_DEGREES: f32 = 90.0;

/// Terminal cells are roughly twice as tall as wide; the projection
/// aspect compensates so spheres render round.
const CELL_ASPECT: f32 = 0.5;

const MOVE_STEP: f32 = 0.25;
const TURN_STEP: f32 = 3.0;

pub struct App {
    pub camera: Camera,
    pub fb: Framebuffer,
    pub scene: Scene,
    pub running: bool,
    projection: Mat4,
    viewport: Mat4,
}

impl App {
    /// Build the render state for a display of the given cell size.
    ///
    /// All configuration faults surface here, before the render loop.
    pub fn new(scene: Scene, width: usize, height: usize) -> Result<Self, SetupError> {
        let (projection, vp) = Self::build_matrices(width, height)?;
        Ok(Self {
            camera: Camera::default(),
            fb: Framebuffer::new(width, height),
            scene,
            running: true,
            projection,
            viewport: vp,
        })
    }

    fn build_matrices(width: usize, height: usize) -> Result<(Mat4, Mat4), SetupError> {
        let aspect = width as f32 * CELL_ASPECT / height as f32;
        let projection = perspective(NEAR_PLANE, FAR_PLANE, FOV_DEGREES, aspect)?;
        let vp = viewport(width, height)?;
        Ok((projection, vp))
    }

    /// Rebuild matrices and reallocate the framebuffer for a new
    /// display size
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SetupError> {
        let (projection, vp) = Self::build_matrices(width, height)?;
        self.projection = projection;
        self.viewport = vp;
        self.fb.resize(width, height);
        Ok(())
    }

    /// Apply one input event to the camera / run state
    pub fn apply(&mut self, event: InputEvent) -> Result<(), SetupError> {
        match event {
            InputEvent::Quit => self.running = false,
            InputEvent::Resize { width, height } => self.resize(width, height)?,
            InputEvent::Move(motion) => self.apply_motion(motion),
        }
        Ok(())
    }

    fn apply_motion(&mut self, motion: Motion) {
        let camera = &mut self.camera;
        match motion {
            Motion::Forward => {
                camera.set_position(camera.position() + camera.front() * MOVE_STEP)
            }
            Motion::Back => camera.set_position(camera.position() - camera.front() * MOVE_STEP),
            Motion::StrafeLeft => {
                camera.set_position(camera.position() - camera.right() * MOVE_STEP)
            }
            Motion::StrafeRight => {
                camera.set_position(camera.position() + camera.right() * MOVE_STEP)
            }
            Motion::Up => camera.set_position(camera.position() + Vec3::UP * MOVE_STEP),
            Motion::Down => camera.set_position(camera.position() - Vec3::UP * MOVE_STEP),
            Motion::YawLeft => camera.set_yaw(camera.yaw() - TURN_STEP),
            Motion::YawRight => camera.set_yaw(camera.yaw() + TURN_STEP),
            Motion::PitchUp => camera.set_pitch(camera.pitch() + TURN_STEP),
            Motion::PitchDown => camera.set_pitch(camera.pitch() - TURN_STEP),
        }
    }

    /// Clear, then rasterize every scene object in submission order
    pub fn render_frame(&mut self) {
        self.fb.clear();
        let ctx = RenderContext::new(&self.camera, self.projection, self.viewport);
        for object in &self.scene.objects {
            draw_triangles(&mut self.fb, &object.triangles, object.model, &ctx);
        }
    }
}
