use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::points::CORNER_COUNT;

/// Fixed triangulation over the corner points TL=0, TR=1, BL=2, BR=3.
/// Winding is fixed so front-face culling stays consistent.
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Per-vertex render data: 5 floats = 20 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MorphVertex {
    /// Interpolated control point, z = 0.
    pub position: [f32; 3],
    /// Texture coordinate, normalized by the reference image extent.
    pub uv: [f32; 2],
}

impl MorphVertex {
    pub const FLOATS: usize = 5;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Triangulated morph geometry. One vertex per control point; only the four
/// corners are referenced by the index list.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphMesh {
    vertices: Vec<MorphVertex>,
    indices: [u32; 6],
}

impl MorphMesh {
    pub fn with_capacity(points: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(points),
            indices: QUAD_INDICES,
        }
    }

    /// Rebuild UVs from `points` against `extent`. Resizes the vertex array
    /// to the point count; positions are left for [`MorphMesh::write_positions`].
    pub(crate) fn write_uvs(&mut self, points: &[Vec2], extent: Vec2) {
        debug_assert!(points.len() >= CORNER_COUNT);
        self.vertices.resize(points.len(), MorphVertex::default());
        for (vertex, point) in self.vertices.iter_mut().zip(points) {
            vertex.uv = (*point / extent).to_array();
        }
    }

    /// Overwrite vertex positions in place. Never reallocates.
    pub(crate) fn write_positions(&mut self, points: &[Vec2]) {
        debug_assert_eq!(points.len(), self.vertices.len());
        for (vertex, point) in self.vertices.iter_mut().zip(points) {
            vertex.position = [point.x, point.y, 0.0];
        }
    }

    pub fn vertices(&self) -> &[MorphVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32; 6] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex data as a flat float buffer (position xyz, uv per vertex).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.vertices.as_slice())
    }

    /// Raw pointer to the vertex floats for shared-memory reads.
    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Axis-aligned bounds of the vertex positions as (min, max).
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.vertices.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), v| {
                let p = Vec2::new(v.position[0], v.position[1]);
                (min.min(p), max.max(p))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(0.0, size),
            Vec2::new(size, size),
            Vec2::splat(size / 2.0),
        ]
    }

    #[test]
    fn vertex_is_5_floats() {
        assert_eq!(std::mem::size_of::<MorphVertex>(), 20);
        assert_eq!(MorphVertex::STRIDE_BYTES, 20);
    }

    #[test]
    fn indices_reference_corners_only() {
        let mesh = MorphMesh::with_capacity(5);
        assert_eq!(mesh.indices().len(), 6);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < CORNER_COUNT));
        assert_eq!(mesh.indices(), &[0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn uvs_normalize_by_extent() {
        let mut mesh = MorphMesh::with_capacity(5);
        let points = square(64.0);
        mesh.write_uvs(&points, Vec2::new(64.0, 32.0));
        mesh.write_positions(&points);
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.vertices()[3].uv, [1.0, 2.0]);
        assert_eq!(mesh.vertices()[4].uv, [0.5, 1.0]);
        assert_eq!(mesh.vertices()[1].position, [64.0, 0.0, 0.0]);
    }

    #[test]
    fn flat_floats_follow_vertex_layout() {
        let mut mesh = MorphMesh::with_capacity(5);
        let points = square(10.0);
        mesh.write_uvs(&points, Vec2::splat(10.0));
        mesh.write_positions(&points);
        let floats = mesh.as_floats();
        assert_eq!(floats.len(), 5 * MorphVertex::FLOATS);
        // vertex 3: (10, 10, 0) uv (1, 1)
        assert_eq!(&floats[15..20], &[10.0, 10.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn bounds_cover_positions() {
        let mut mesh = MorphMesh::with_capacity(5);
        let points = square(8.0);
        mesh.write_uvs(&points, Vec2::splat(8.0));
        mesh.write_positions(&points);
        assert_eq!(mesh.bounds(), (Vec2::ZERO, Vec2::splat(8.0)));
    }
}
