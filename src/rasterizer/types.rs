//! Core types for the rasterizer

use std::fmt;

use serde::{Deserialize, Serialize};

use super::math::Vec3;
use super::{BACKGROUND, SHADE_LEVELS};

/// A vertex with model-space position, RGB color, and normal
///
/// The normal is carried through the pipeline but unused by shading for
/// now; it is part of the vertex contract for future lighting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }

    pub fn colored(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            normal: Vec3::ZERO,
        }
    }
}

/// Exactly three vertices; winding order is not enforced (no backface
/// culling), it only flips the internal edge-sign convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}

/// Quantize an interpolated RGB color into a shade index for the cell
/// buffer. Index 0 is reserved for the background; covered pixels land
/// in `1..SHADE_LEVELS` by perceptual luminance.
pub fn shade_index(color: Vec3) -> u8 {
    let lum = 0.299 * color.x + 0.587 * color.y + 0.114 * color.z;
    let steps = (SHADE_LEVELS - 1) as f32;
    let level = (lum.clamp(0.0, 1.0) * (steps - 1.0)).round() as u8;
    BACKGROUND + 1 + level
}

/// Configuration faults caught before the render loop starts.
///
/// These are fatal to frame setup; geometry-level faults during
/// rasterization are recovered by skipping the unit of work instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    InvalidDimensions { width: usize, height: usize },
    InvalidFov(f32),
    InvalidPlanes { near: f32, far: f32 },
    InvalidAspect(f32),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidDimensions { width, height } => {
                write!(f, "display dimensions must be positive, got {}x{}", width, height)
            }
            SetupError::InvalidFov(fov) => {
                write!(f, "field of view must be inside (0, 180) degrees, got {}", fov)
            }
            SetupError::InvalidPlanes { near, far } => {
                write!(f, "near plane must be positive and closer than far, got near {} far {}", near, far)
            }
            SetupError::InvalidAspect(aspect) => {
                write!(f, "aspect ratio must be positive and finite, got {}", aspect)
            }
        }
    }
}

impl std::error::Error for SetupError {}
