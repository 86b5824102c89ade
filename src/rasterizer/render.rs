//! Framebuffer and the per-triangle rasterization pipeline

use super::camera::Camera;
use super::math::{Mat4, Vec3, Vec4};
use super::types::{shade_index, Triangle};
use super::BACKGROUND;

/// A vertex that clipped its way down to viewport space: x,y in cell
/// units, z the normalized [0,1] depth.
#[derive(Debug, Clone, Copy)]
pub struct ScreenVertex {
    pub pos: Vec3,
    pub color: Vec3,
}

/// Depth + shade-index buffers sized to the display grid.
///
/// Both buffers always hold exactly width * height cells; constructors
/// and `resize` are the only places that allocate. Dimensions are
/// validated upstream when the viewport matrix is built.
pub struct Framebuffer {
    pub depth: Vec<f32>,
    pub shade: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            depth: vec![f32::MAX; width * height],
            shade: vec![BACKGROUND; width * height],
            width,
            height,
        }
    }

    /// Overwrite every cell: depth back to the sentinel maximum, shade
    /// back to the background index. Called once per frame, never per
    /// triangle.
    pub fn clear(&mut self) {
        self.depth.fill(f32::MAX);
        self.shade.fill(BACKGROUND);
    }

    /// Reallocate for a new display size (terminal resize)
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.depth = vec![f32::MAX; width * height];
        self.shade = vec![BACKGROUND; width * height];
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[self.index(x, y)]
    }

    pub fn shade_at(&self, x: usize, y: usize) -> u8 {
        self.shade[self.index(x, y)]
    }

    /// Write shade if strictly closer than the stored depth. Ties keep
    /// the earlier write, so submission order decides.
    pub fn set_cell_with_depth(&mut self, x: usize, y: usize, z: f32, shade: u8) -> bool {
        let idx = self.index(x, y);
        if z < self.depth[idx] {
            self.depth[idx] = z;
            self.shade[idx] = shade;
            return true;
        }
        false
    }
}

/// Per-frame transform state, rebuilt after input handling.
///
/// Rasterization is a pure function of (triangles, this context, target
/// framebuffer); nothing persists between frames except the camera and
/// the framebuffer themselves.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
}

impl RenderContext {
    pub fn new(camera: &Camera, projection: Mat4, viewport: Mat4) -> Self {
        Self {
            view: camera.matrix(),
            projection,
            viewport,
        }
    }
}

// A vertex this close to the eye plane (|clip w| below the threshold)
// has no defined screen position; the owning triangle is dropped before
// any divide can mint an inf or NaN.
const EYE_PLANE_EPSILON: f32 = 1e-6;

// Shared barycentric denominator below this is a zero-area triangle.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Rasterize triangles into the framebuffer in submission order.
///
/// Order matters for determinism: depth ties keep the earlier triangle,
/// and the final buffers must be bit-identical across runs for the same
/// inputs.
pub fn draw_triangles(fb: &mut Framebuffer, triangles: &[Triangle], model: Mat4, ctx: &RenderContext) {
    let mvp = ctx.projection * ctx.view * model;
    for triangle in triangles {
        draw_triangle(fb, triangle, mvp, ctx.viewport);
    }
}

/// One triangle through the full pipeline: clip transform, perspective
/// divide, whole-triangle NDC rejection, viewport mapping, fill.
fn draw_triangle(fb: &mut Framebuffer, triangle: &Triangle, mvp: Mat4, viewport: Mat4) {
    let mut screen = [ScreenVertex {
        pos: Vec3::ZERO,
        color: Vec3::ZERO,
    }; 3];
    let mut outside = 0;

    for (i, vertex) in triangle.vertices.iter().enumerate() {
        let clip = mvp * Vec4::from_point(vertex.position);

        // Vertex on the eye plane: counts as clipped, but its screen
        // position is undefined, so the whole triangle goes.
        if clip.w.abs() < EYE_PLANE_EPSILON {
            return;
        }

        let ndc = clip.xyz().scale(1.0 / clip.w);
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            outside += 1;
        }

        // Not true frustum clipping: partially-outside triangles are
        // rasterized as-is and rely on the bounding box intersection
        // with the screen rectangle.
        screen[i] = ScreenVertex {
            pos: (viewport * Vec4::from_point(ndc)).xyz(),
            color: vertex.color,
        };
    }

    if outside == 3 {
        return;
    }

    fill_triangle(fb, &screen);
}

/// Signed-area edge function: z-component of (p - a) x (b - a)
fn edge(px: f32, py: f32, a: Vec3, b: Vec3) -> f32 {
    (px - a.x) * (b.y - a.y) - (py - a.y) * (b.x - a.x)
}

/// Fill the covered pixels of a viewport-space triangle with depth
/// testing and barycentric color interpolation.
///
/// Coverage is evaluated at pixel centers; a pixel is in when all three
/// edge values share a sign (either orientation, no backface culling).
pub fn fill_triangle(fb: &mut Framebuffer, v: &[ScreenVertex; 3]) {
    let [v0, v1, v2] = [v[0].pos, v[1].pos, v[2].pos];

    // Screen bounding box clamped to the grid
    let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as usize;
    let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as usize;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(fb.width as f32) as usize;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(fb.height as f32) as usize;

    // Two-vector barycentric solve relative to vertex 0; the shared
    // denominator is zero for a zero-area triangle.
    let e01 = v1 - v0;
    let e02 = v2 - v0;
    let d00 = e01.x * e01.x + e01.y * e01.y;
    let d01 = e01.x * e02.x + e01.y * e02.y;
    let d11 = e02.x * e02.x + e02.y * e02.y;
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < DEGENERATE_EPSILON {
        return;
    }

    for y in min_y..max_y {
        for x in min_x..max_x {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

            let e0 = edge(px, py, v0, v1);
            let e1 = edge(px, py, v1, v2);
            let e2 = edge(px, py, v2, v0);
            let covered = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
                || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
            if !covered {
                continue;
            }

            let d20 = (px - v0.x) * e01.x + (py - v0.y) * e01.y;
            let d21 = (px - v0.x) * e02.x + (py - v0.y) * e02.y;
            let b = (d11 * d20 - d01 * d21) / denom;
            let c = (d00 * d21 - d01 * d20) / denom;
            let a = 1.0 - b - c;

            let z = a * v0.z + b * v1.z + c * v2.z;
            if z >= fb.depth[y * fb.width + x] {
                continue;
            }

            let color = v[0].color * a + v[1].color * b + v[2].color * c;
            fb.set_cell_with_depth(x, y, z, shade_index(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::projection::{perspective, viewport};
    use crate::rasterizer::types::Vertex;

    fn screen_tri(p0: (f32, f32, f32), p1: (f32, f32, f32), p2: (f32, f32, f32)) -> [ScreenVertex; 3] {
        let gray = Vec3::splat(0.5);
        [
            ScreenVertex { pos: Vec3::new(p0.0, p0.1, p0.2), color: gray },
            ScreenVertex { pos: Vec3::new(p1.0, p1.1, p1.2), color: gray },
            ScreenVertex { pos: Vec3::new(p2.0, p2.1, p2.2), color: gray },
        ]
    }

    fn world_tri(z: f32, color: Vec3) -> Triangle {
        Triangle::new(
            Vertex::colored(Vec3::new(-1.0, -1.0, z), color),
            Vertex::colored(Vec3::new(1.0, -1.0, z), color),
            Vertex::colored(Vec3::new(0.0, 1.0, z), color),
        )
    }

    fn test_context(width: usize, height: usize) -> RenderContext {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0);
        RenderContext::new(
            &cam,
            perspective(0.1, 25.0, 90.0, 1.0).unwrap(),
            viewport(width, height).unwrap(),
        )
    }

    #[test]
    fn test_clear_overwrites_every_cell() {
        for (w, h) in [(1, 1), (3, 2), (16, 9)] {
            let mut fb = Framebuffer::new(w, h);
            fb.depth.fill(0.25);
            fb.shade.fill(7);
            fb.clear();
            assert_eq!(fb.depth.len(), w * h);
            assert_eq!(fb.shade.len(), w * h);
            assert!(fb.depth.iter().all(|&d| d == f32::MAX));
            assert!(fb.shade.iter().all(|&s| s == BACKGROUND));
        }
    }

    #[test]
    fn test_known_triangle_coverage() {
        let mut fb = Framebuffer::new(8, 8);
        fill_triangle(&mut fb, &screen_tri((0.0, 0.0, 0.0), (4.0, 0.0, 0.0), (0.0, 4.0, 0.0)));

        for y in 0..8 {
            for x in 0..8 {
                let expect_covered = x + y < 4;
                let written = fb.shade_at(x, y) != BACKGROUND;
                assert_eq!(written, expect_covered, "pixel ({}, {})", x, y);
                if !expect_covered {
                    assert_eq!(fb.depth_at(x, y), f32::MAX);
                }
            }
        }
    }

    #[test]
    fn test_bounding_box_clamped_to_grid() {
        // Vertices far off every side of a tiny grid; only the on-screen
        // intersection may be touched, and nothing may panic.
        let mut fb = Framebuffer::new(4, 4);
        fill_triangle(&mut fb, &screen_tri((-10.0, -10.0, 0.0), (30.0, -10.0, 0.0), (-10.0, 30.0, 0.0)));
        assert!(fb.shade.iter().any(|&s| s != BACKGROUND));
    }

    #[test]
    fn test_degenerate_triangle_skipped() {
        let mut fb = Framebuffer::new(8, 8);
        // All three vertices collinear: zero area
        fill_triangle(&mut fb, &screen_tri((1.0, 1.0, 0.0), (3.0, 3.0, 0.0), (5.0, 5.0, 0.0)));
        assert!(fb.shade.iter().all(|&s| s == BACKGROUND));
        assert!(fb.depth.iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn test_depth_result_commutes() {
        let near = screen_tri((0.0, 0.0, 0.25), (6.0, 0.0, 0.25), (0.0, 6.0, 0.25));
        let far = screen_tri((0.0, 0.0, 0.75), (6.0, 0.0, 0.75), (0.0, 6.0, 0.75));

        let mut ab = Framebuffer::new(8, 8);
        fill_triangle(&mut ab, &near);
        fill_triangle(&mut ab, &far);

        let mut ba = Framebuffer::new(8, 8);
        fill_triangle(&mut ba, &far);
        fill_triangle(&mut ba, &near);

        assert_eq!(ab.depth, ba.depth);
        assert_eq!(ab.depth_at(1, 1), 0.25);
    }

    #[test]
    fn test_depth_tie_keeps_earlier_triangle() {
        let mut fb = Framebuffer::new(8, 8);
        let dark = [
            ScreenVertex { pos: Vec3::new(0.0, 0.0, 0.5), color: Vec3::splat(0.1) },
            ScreenVertex { pos: Vec3::new(6.0, 0.0, 0.5), color: Vec3::splat(0.1) },
            ScreenVertex { pos: Vec3::new(0.0, 6.0, 0.5), color: Vec3::splat(0.1) },
        ];
        let bright = [
            ScreenVertex { pos: Vec3::new(0.0, 0.0, 0.5), color: Vec3::splat(0.9) },
            ScreenVertex { pos: Vec3::new(6.0, 0.0, 0.5), color: Vec3::splat(0.9) },
            ScreenVertex { pos: Vec3::new(0.0, 6.0, 0.5), color: Vec3::splat(0.9) },
        ];
        fill_triangle(&mut fb, &dark);
        let dark_shade = fb.shade_at(1, 1);
        fill_triangle(&mut fb, &bright);
        assert_eq!(fb.shade_at(1, 1), dark_shade);
    }

    #[test]
    fn test_barycentric_weights_at_vertices() {
        // Vertex colors act as probes: a pure red/green/blue corner must
        // come out unmixed at its own cell, so the weights there are
        // (1,0,0), (0,1,0), (0,0,1) within the shade quantization.
        let mut fb = Framebuffer::new(16, 16);
        let tri = [
            ScreenVertex { pos: Vec3::new(0.0, 0.0, 0.0), color: Vec3::new(1.0, 0.0, 0.0) },
            ScreenVertex { pos: Vec3::new(15.0, 0.0, 0.0), color: Vec3::new(0.0, 1.0, 0.0) },
            ScreenVertex { pos: Vec3::new(0.0, 15.0, 0.0), color: Vec3::new(0.0, 0.0, 1.0) },
        ];
        fill_triangle(&mut fb, &tri);
        assert_eq!(fb.shade_at(0, 0), shade_index(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(fb.shade_at(14, 0), shade_index(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(fb.shade_at(0, 14), shade_index(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_visible_triangle_writes_pixels() {
        let mut fb = Framebuffer::new(40, 20);
        let ctx = test_context(40, 20);
        draw_triangles(&mut fb, &[world_tri(0.0, Vec3::splat(0.8))], Mat4::IDENTITY, &ctx);
        assert!(fb.shade.iter().any(|&s| s != BACKGROUND));
        // Triangle straddles the view axis, so the center cell is hit
        assert_ne!(fb.shade_at(20, 10), BACKGROUND);
    }

    #[test]
    fn test_triangle_outside_frustum_rejected() {
        let mut fb = Framebuffer::new(40, 20);
        let ctx = test_context(40, 20);
        let model = Mat4::translation(Vec3::new(100.0, 100.0, 100.0));
        draw_triangles(&mut fb, &[world_tri(0.0, Vec3::splat(0.8))], model, &ctx);
        assert!(fb.shade.iter().all(|&s| s == BACKGROUND));
        assert!(fb.depth.iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn test_eye_plane_triangle_dropped_cleanly() {
        let mut fb = Framebuffer::new(40, 20);
        let ctx = test_context(40, 20);
        // Camera sits at z=3, so a triangle in the z=3 plane has every
        // vertex on the eye plane (clip w = 0).
        draw_triangles(&mut fb, &[world_tri(3.0, Vec3::splat(0.8))], Mat4::IDENTITY, &ctx);
        assert!(fb.shade.iter().all(|&s| s == BACKGROUND));
        assert!(fb.depth.iter().all(|&d| d.is_finite() || d == f32::MAX));
    }

    #[test]
    fn test_nearer_triangle_occludes() {
        let mut fb = Framebuffer::new(40, 20);
        let ctx = test_context(40, 20);
        let triangles = [
            world_tri(0.0, Vec3::splat(0.9)),  // nearer, bright
            world_tri(-2.0, Vec3::splat(0.1)), // farther, dark
        ];
        draw_triangles(&mut fb, &triangles, Mat4::IDENTITY, &ctx);
        assert_eq!(fb.shade_at(20, 10), shade_index(Vec3::splat(0.9)));
    }

    #[test]
    fn test_identical_submissions_are_bit_identical() {
        let ctx = test_context(40, 20);
        let triangles = [world_tri(0.0, Vec3::splat(0.7)), world_tri(-1.0, Vec3::splat(0.3))];

        let mut first = Framebuffer::new(40, 20);
        draw_triangles(&mut first, &triangles, Mat4::IDENTITY, &ctx);
        let mut second = Framebuffer::new(40, 20);
        draw_triangles(&mut second, &triangles, Mat4::IDENTITY, &ctx);

        assert_eq!(first.shade, second.shade);
        assert!(first
            .depth
            .iter()
            .zip(&second.depth)
            .all(|(a, b)| a.to_bits() == b.to_bits()));
    }
}
