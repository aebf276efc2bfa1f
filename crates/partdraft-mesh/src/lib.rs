#![warn(missing_docs)]

//! Triangle mesh container for the partdraft drawing engine.
//!
//! The external geometry backend delivers boolean results as triangle
//! lists with per-vertex position and normal, in millimetres, in the
//! recipe's frame. This crate holds that contract type plus the queries
//! the drafting pipeline needs: triangle access, bounds, and normal
//! reconstruction for meshes delivered without normals.

use partdraft_math::{Point3, Vec3};
use thiserror::Error;

/// Errors raised by mesh validation.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Mesh has no vertices or no triangles.
    #[error("mesh is empty")]
    Empty,

    /// Index data does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    RaggedIndices(usize),

    /// An index points past the vertex array.
    #[error("vertex index {index} out of range ({vertices} vertices)")]
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertices: usize,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;

/// A triangle mesh in flat-array layout.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals, same length as `vertices`. May be
    /// empty when the provider skipped them; see [`Self::ensure_normals`].
    pub normals: Vec<f32>,
}

/// One triangle pulled out of the mesh, in f64 for geometry work.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First corner.
    pub v0: Point3,
    /// Second corner.
    pub v1: Point3,
    /// Third corner.
    pub v2: Point3,
}

impl Triangle {
    /// Geometric face normal (not normalized; zero for degenerate
    /// triangles).
    pub fn raw_normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit face normal, or `None` for a degenerate triangle.
    pub fn normal(&self) -> Option<Vec3> {
        let n = self.raw_normal();
        let len = n.norm();
        if len > 1e-12 {
            Some(n / len)
        } else {
            None
        }
    }

    /// Twice the triangle area.
    pub fn double_area(&self) -> f64 {
        self.raw_normal().norm()
    }
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether per-vertex normals are present.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.vertices.len()
    }

    /// Validate the basic structure of the mesh.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.indices.len()));
        }
        let nv = self.num_vertices();
        for &i in &self.indices {
            if i as usize >= nv {
                return Err(MeshError::IndexOutOfRange {
                    index: i,
                    vertices: nv,
                });
            }
        }
        Ok(())
    }

    /// Vertex position as a point.
    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(
            self.vertices[i * 3] as f64,
            self.vertices[i * 3 + 1] as f64,
            self.vertices[i * 3 + 2] as f64,
        )
    }

    /// Vertex indices of triangle `t`.
    pub fn triangle_indices(&self, t: usize) -> [u32; 3] {
        [
            self.indices[t * 3],
            self.indices[t * 3 + 1],
            self.indices[t * 3 + 2],
        ]
    }

    /// Triangle `t` with f64 corners.
    pub fn triangle(&self, t: usize) -> Triangle {
        let [i0, i1, i2] = self.triangle_indices(t);
        Triangle {
            v0: self.vertex(i0 as usize),
            v1: self.vertex(i1 as usize),
            v2: self.vertex(i2 as usize),
        }
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.num_triangles()).map(|t| self.triangle(t))
    }

    /// Axis-aligned bounds as (min, max) corners, or `None` when empty.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for i in 0..self.num_vertices() {
            let v = self.vertex(i);
            min = Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
            max = Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
        }
        Some((min, max))
    }

    /// Recompute per-vertex normals by area-weighted accumulation of face
    /// normals. Degenerate faces contribute nothing.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![0.0f64; self.vertices.len()];
        for t in 0..self.num_triangles() {
            let n = self.triangle(t).raw_normal();
            for &i in &self.triangle_indices(t) {
                let base = i as usize * 3;
                acc[base] += n.x;
                acc[base + 1] += n.y;
                acc[base + 2] += n.z;
            }
        }
        self.normals = vec![0.0f32; self.vertices.len()];
        for v in 0..self.num_vertices() {
            let n = Vec3::new(acc[v * 3], acc[v * 3 + 1], acc[v * 3 + 2]);
            let len = n.norm();
            if len > 1e-12 {
                self.normals[v * 3] = (n.x / len) as f32;
                self.normals[v * 3 + 1] = (n.y / len) as f32;
                self.normals[v * 3 + 2] = (n.z / len) as f32;
            }
        }
    }

    /// Compute normals only when the provider left them out.
    pub fn ensure_normals(&mut self) {
        if !self.has_normals() {
            self.compute_normals();
        }
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }
}

pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::make_box_mesh;

    #[test]
    fn box_mesh_structure() {
        let mesh = make_box_mesh(Point3::origin(), 10.0, 20.0, 30.0);
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_triangles(), 12);
        mesh.validate().unwrap();

        let (min, max) = mesh.bounds().unwrap();
        assert!((min.x - (-5.0)).abs() < 1e-6);
        assert!((max.y - 10.0).abs() < 1e-6);
        assert!((max.z - 15.0).abs() < 1e-6);
    }

    #[test]
    fn normals_point_outward_on_average() {
        let mesh = make_box_mesh(Point3::origin(), 2.0, 2.0, 2.0);
        assert!(mesh.has_normals());
        // A welded cube's corner normals point away from the center.
        for v in 0..mesh.num_vertices() {
            let p = mesh.vertex(v);
            let n = Vec3::new(
                mesh.normals[v * 3] as f64,
                mesh.normals[v * 3 + 1] as f64,
                mesh.normals[v * 3 + 2] as f64,
            );
            assert!(n.dot(&(p - Point3::origin())) > 0.0);
        }
    }

    #[test]
    fn empty_mesh_rejected() {
        let mesh = TriangleMesh::new();
        assert!(matches!(mesh.validate(), Err(MeshError::Empty)));
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mesh = TriangleMesh {
            vertices: vec![0.0; 9],
            indices: vec![0, 1, 7],
            normals: Vec::new(),
        };
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = make_box_mesh(Point3::origin(), 1.0, 1.0, 1.0);
        let b = make_box_mesh(Point3::new(5.0, 0.0, 0.0), 1.0, 1.0, 1.0);
        a.merge(&b);
        assert_eq!(a.num_vertices(), 16);
        assert_eq!(a.num_triangles(), 24);
        a.validate().unwrap();
    }
}
