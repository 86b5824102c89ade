//! Software triangle rasterizer for a character-cell display
//!
//! Pipeline per triangle:
//! - model -> view -> projection transform, perspective divide
//! - whole-triangle NDC rejection (no partial clipping)
//! - viewport mapping to cell coordinates
//! - bounding-box scan with edge-function coverage, depth test, and
//!   barycentric color interpolation
//!
//! Everything is single-threaded and deterministic: identical inputs
//! produce bit-identical depth and shade buffers.

pub mod camera;
pub mod math;
pub mod projection;
pub mod render;
pub mod types;

pub use camera::{compute_front, compute_view, Camera};
pub use math::{Mat4, Vec3, Vec4};
pub use projection::{perspective, viewport};
pub use render::{draw_triangles, fill_triangle, Framebuffer, RenderContext, ScreenVertex};
pub use types::{shade_index, SetupError, Triangle, Vertex};

/// Number of distinct shade indices, background included
pub const SHADE_LEVELS: u8 = 10;

/// Shade index of an empty cell
pub const BACKGROUND: u8 = 0;
