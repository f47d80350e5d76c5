//! Quad-strip geometry for constant-thickness polylines.
//!
//! Each consecutive point pair becomes one quad (four vertices, two
//! triangles). Geometry is always rebuilt in full from the current points;
//! the builder keeps its buffers between rebuilds so steady-state updates do
//! not allocate.

use crate::data_types::ChartColor;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineGeometry {
    pub vertices: Vec<LineVertex>,
    /// Vertex indices, three per triangle.
    pub indices: Vec<u32>,
}

impl LineGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Keeps the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Triangles as vertex position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [tri[0], tri[1], tri[2]].map(|i| Vec2::from(self.vertices[i as usize].position))
        })
    }

    /// Quads as `[p0 - n, p0 + n, p1 + n, p1 - n]`.
    pub fn quads(&self) -> impl Iterator<Item = [Vec2; 4]> + '_ {
        self.vertices
            .chunks_exact(4)
            .map(|q| [q[0], q[1], q[2], q[3]].map(|v| Vec2::from(v.position)))
    }
}

/// Owns a [`LineGeometry`] and rebuilds it on demand.
#[derive(Debug, Default)]
pub struct PolylineMeshBuilder {
    geometry: LineGeometry,
}

impl PolylineMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> &LineGeometry {
        &self.geometry
    }

    pub fn clear(&mut self) {
        self.geometry.clear();
    }

    /// Rebuilds the whole strip. Fewer than two points yields empty geometry.
    pub fn rebuild(&mut self, points: &[Vec2], thickness: f32, color: ChartColor) -> &LineGeometry {
        self.geometry.clear();
        if points.len() < 2 {
            return &self.geometry;
        }

        let segments = points.len() - 1;
        self.geometry.vertices.reserve(segments * 4);
        self.geometry.indices.reserve(segments * 6);

        let half = thickness * 0.5;
        let color = color.to_array();
        for pair in points.windows(2) {
            let (p0, p1) = (pair[0], pair[1]);
            // Coincident points give a zero-area quad rather than NaNs.
            let normal = (p1 - p0).normalize_or_zero().perp() * half;

            let base = self.geometry.vertices.len() as u32;
            for position in [p0 - normal, p0 + normal, p1 + normal, p1 - normal] {
                self.geometry.vertices.push(LineVertex {
                    position: position.to_array(),
                    color,
                });
            }
            self.geometry
                .indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        &self.geometry
    }
}
