//! Scene setup: primitive meshes and the objects submitted per frame
//!
//! Pure data producers. Triangles are generated once at startup and are
//! immutable inputs to the rasterizer; the model matrix travels with
//! each object as its own draw call.

mod file;

pub use file::{load_scene, load_scene_from_str, save_scene, SceneError, SceneFile};

use serde::{Deserialize, Serialize};

use crate::rasterizer::{Mat4, Triangle, Vec3, Vertex};

/// Key direction used to bake a per-face/per-vertex brightness ramp into
/// the generated vertex colors. Not a lighting model; the rasterizer
/// only ever interpolates whatever colors the scene hands it.
const KEY_DIR: Vec3 = Vec3 {
    x: 0.37,
    y: 0.74,
    z: 0.55,
};

fn baked_tint(normal: Vec3) -> f32 {
    0.45 + 0.55 * (normal.dot(KEY_DIR) * 0.5 + 0.5)
}

/// An object ready for submission: triangle list plus its model matrix
pub struct SceneObject {
    pub triangles: Vec<Triangle>,
    pub model: Mat4,
}

/// All objects of one scene, in submission order
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.triangles.len()).sum()
    }
}

/// Serializable primitive shapes for scene files
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Primitive {
    Cube { size: f32 },
    Sphere { radius: f32, stacks: usize, slices: usize },
    Floor { size: f32 },
}

/// One entry of a scene file: a primitive placed at a world position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub primitive: Primitive,
    pub position: Vec3,
    pub color: Vec3,
}

impl ObjectSpec {
    pub fn build(&self) -> SceneObject {
        let triangles = match self.primitive {
            Primitive::Cube { size } => cube(size, self.color),
            Primitive::Sphere { radius, stacks, slices } => sphere(radius, stacks, slices, self.color),
            Primitive::Floor { size } => floor(size, self.color),
        };
        SceneObject {
            triangles,
            model: Mat4::translation(self.position),
        }
    }
}

/// Axis-aligned cube centered on the origin, two triangles per face
pub fn cube(size: f32, color: Vec3) -> Vec<Triangle> {
    let h = size / 2.0;

    let faces: [(Vec3, [Vec3; 4]); 6] = [
        // Front (+z)
        (
            Vec3::new(0.0, 0.0, 1.0),
            [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
        ),
        // Back (-z)
        (
            Vec3::new(0.0, 0.0, -1.0),
            [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
        ),
        // Top (+y)
        (
            Vec3::new(0.0, 1.0, 0.0),
            [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
        ),
        // Bottom (-y)
        (
            Vec3::new(0.0, -1.0, 0.0),
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
        ),
        // Right (+x)
        (
            Vec3::new(1.0, 0.0, 0.0),
            [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
        ),
        // Left (-x)
        (
            Vec3::new(-1.0, 0.0, 0.0),
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
        ),
    ];

    let mut triangles = Vec::with_capacity(12);
    for (normal, corners) in faces {
        let tinted = color * baked_tint(normal);
        let v = |p: Vec3| Vertex::new(p, tinted, normal);
        triangles.push(Triangle::new(v(corners[0]), v(corners[1]), v(corners[2])));
        triangles.push(Triangle::new(v(corners[0]), v(corners[2]), v(corners[3])));
    }
    triangles
}

/// UV sphere centered on the origin.
///
/// `stacks` latitude bands (>= 2) and `slices` longitude segments
/// (>= 3); pole bands emit single triangles so no degenerate quads are
/// produced. Triangle count is slices * (2 * stacks - 2).
pub fn sphere(radius: f32, stacks: usize, slices: usize, color: Vec3) -> Vec<Triangle> {
    let stacks = stacks.max(2);
    let slices = slices.max(3);

    let point = |stack: usize, slice: usize| -> Vec3 {
        let theta = std::f32::consts::PI * stack as f32 / stacks as f32;
        let phi = std::f32::consts::TAU * slice as f32 / slices as f32;
        Vec3::new(
            radius * theta.sin() * phi.cos(),
            radius * theta.cos(),
            radius * theta.sin() * phi.sin(),
        )
    };
    let vert = |p: Vec3| {
        let normal = p.normalize();
        Vertex::new(p, color * baked_tint(normal), normal)
    };

    let mut triangles = Vec::with_capacity(slices * (2 * stacks - 2));
    for stack in 0..stacks {
        for slice in 0..slices {
            let p00 = point(stack, slice);
            let p01 = point(stack, slice + 1);
            let p10 = point(stack + 1, slice);
            let p11 = point(stack + 1, slice + 1);

            if stack != 0 {
                triangles.push(Triangle::new(vert(p00), vert(p10), vert(p01)));
            }
            if stack != stacks - 1 {
                triangles.push(Triangle::new(vert(p01), vert(p10), vert(p11)));
            }
        }
    }
    triangles
}

/// Flat square in the xz plane, two triangles
pub fn floor(size: f32, color: Vec3) -> Vec<Triangle> {
    let h = size / 2.0;
    let normal = Vec3::UP;
    let v = |x: f32, z: f32| Vertex::new(Vec3::new(x, 0.0, z), color, normal);
    vec![
        Triangle::new(v(-h, -h), v(h, -h), v(h, h)),
        Triangle::new(v(-h, -h), v(h, h), v(-h, h)),
    ]
}

/// Description of the built-in scene, also what `--init` writes out as
/// a starting point for custom scene files
pub fn default_scene_file() -> SceneFile {
    SceneFile {
        objects: vec![
            ObjectSpec {
                primitive: Primitive::Floor { size: 14.0 },
                position: Vec3::new(0.0, -1.5, 0.0),
                color: Vec3::new(0.25, 0.25, 0.28),
            },
            ObjectSpec {
                primitive: Primitive::Cube { size: 2.0 },
                position: Vec3::new(-1.6, 0.0, 0.0),
                color: Vec3::new(0.9, 0.55, 0.35),
            },
            ObjectSpec {
                primitive: Primitive::Sphere { radius: 1.2, stacks: 12, slices: 20 },
                position: Vec3::new(1.8, 0.0, -1.0),
                color: Vec3::new(0.4, 0.7, 0.95),
            },
        ],
    }
}

/// Built-in scene used when no scene file is given
pub fn default_scene() -> Scene {
    let file = default_scene_file();
    Scene {
        objects: file.objects.iter().map(ObjectSpec::build).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_triangle_count() {
        assert_eq!(cube(2.0, Vec3::splat(0.5)).len(), 12);
    }

    #[test]
    fn test_cube_vertices_on_surface() {
        let size = 3.0;
        for tri in cube(size, Vec3::splat(0.5)) {
            for v in tri.vertices {
                let p = v.position;
                let on_face = p.x.abs() == size / 2.0
                    || p.y.abs() == size / 2.0
                    || p.z.abs() == size / 2.0;
                assert!(on_face, "{:?} not on the cube surface", p);
            }
        }
    }

    #[test]
    fn test_sphere_triangle_count() {
        let stacks = 8;
        let slices = 12;
        let tris = sphere(1.0, stacks, slices, Vec3::splat(0.5));
        assert_eq!(tris.len(), slices * (2 * stacks - 2));
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let radius = 2.5;
        for tri in sphere(radius, 6, 8, Vec3::splat(0.5)) {
            for v in tri.vertices {
                assert!((v.position.len() - radius).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_default_scene_not_empty() {
        let scene = default_scene();
        assert_eq!(scene.objects.len(), 3);
        assert!(scene.triangle_count() > 12);
    }
}
