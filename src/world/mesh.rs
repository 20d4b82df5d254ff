// mesh.rs - Fixed-topology plane grid
//
// Flat xyz-interleaved buffers so the host can upload them as-is.
// Local space: the plane spans x and y; z is height.

use glam::Vec3;

/// Per-axis segment cap; keeps vertex and index counts well inside `u32`.
pub const MAX_SEGMENTS: u32 = 4096;

#[derive(Clone, Debug)]
pub struct PlaneMesh {
    pub width: f32,
    pub height: f32,
    pub seg_w: u32,
    pub seg_h: u32,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    /// Row-major grid from the top-left corner (-w/2, +h/2).
    /// Segment counts are clamped to `1..=MAX_SEGMENTS`.
    pub fn new(width: f32, height: f32, seg_w: u32, seg_h: u32) -> Self {
        let seg_w = seg_w.clamp(1, MAX_SEGMENTS);
        let seg_h = seg_h.clamp(1, MAX_SEGMENTS);
        let cols = seg_w + 1;
        let rows = seg_h + 1;
        let count = cols as usize * rows as usize;

        let mut positions = Vec::with_capacity(count * 3);
        let mut normals = Vec::with_capacity(count * 3);
        for iy in 0..rows {
            let y = height * 0.5 - iy as f32 * height / seg_h as f32;
            for ix in 0..cols {
                let x = ix as f32 * width / seg_w as f32 - width * 0.5;
                positions.extend_from_slice(&[x, y, 0.0]);
                normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            }
        }

        let mut indices = Vec::with_capacity(seg_w as usize * seg_h as usize * 6);
        for iy in 0..seg_h {
            for ix in 0..seg_w {
                let a = iy * cols + ix;
                let b = a + cols;
                let c = b + 1;
                let d = a + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { width, height, seg_w, seg_h, positions, normals, indices }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn height_at(&self, i: usize) -> f32 {
        self.positions[i * 3 + 2]
    }

    /// Rewrite every z from a function of the planar coordinates.
    pub fn displace(&mut self, mut f: impl FnMut(f32, f32) -> f32) {
        for v in self.positions.chunks_exact_mut(3) {
            v[2] = f(v[0], v[1]);
        }
    }

    /// Area-weighted vertex normals from the current positions.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertex_count()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = self.position(a);
            let n = (self.position(b) - pa).cross(self.position(c) - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        for (dst, n) in self.normals.chunks_exact_mut(3).zip(acc) {
            let n = n.normalize_or(Vec3::Z);
            dst.copy_from_slice(&n.to_array());
        }
    }
}
