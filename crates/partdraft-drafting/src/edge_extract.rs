//! Drawing-edge extraction from triangle meshes.
//!
//! Builds an edge-to-adjacent-faces map keyed by unordered vertex-index
//! pairs, then derives:
//!
//! - **Sharp edges**: boundary edges (one adjacent face) and edges whose
//!   adjacent face normals differ by more than the sharp-angle threshold.
//!   Smooth tessellation edges (cylinder wall segments) fall under the
//!   threshold and are excluded.
//! - **Silhouette edges**: edges whose adjacent faces lie on opposite
//!   sides of the view direction (one front-facing, one back-facing).

use std::collections::HashMap;

use partdraft_math::Vec3;
use partdraft_mesh::TriangleMesh;

use crate::diag::Diagnostics;
use crate::types::{EdgeKind, ExtractedEdge};

/// Dihedral-angle threshold (degrees) above which an edge is sharp.
pub const DEFAULT_SHARP_ANGLE_DEG: f64 = 30.0;

const SIGN_EPS: f64 = 1e-9;

/// Per-edge adjacency record. Non-manifold edges keep their first two
/// faces, best-effort.
#[derive(Debug, Clone, Copy)]
struct EdgeFaces {
    tris: [u32; 2],
    count: u8,
}

/// Edge adjacency map plus per-face normals for one mesh.
pub struct EdgeAdjacency {
    edges: HashMap<(u32, u32), EdgeFaces>,
    face_normals: Vec<Option<Vec3>>,
}

impl EdgeAdjacency {
    /// Build the adjacency map.
    ///
    /// Degenerate triangles get no normal and are counted; edges with
    /// more than two adjacent faces are counted once each.
    pub fn build(mesh: &TriangleMesh, diag: &mut Diagnostics) -> Self {
        let num_tris = mesh.num_triangles();
        let mut face_normals = Vec::with_capacity(num_tris);
        for t in 0..num_tris {
            let n = mesh.triangle(t).normal();
            if n.is_none() {
                diag.degenerate_triangles += 1;
                log::warn!("triangle {t} is degenerate; ignored for edge extraction");
            }
            face_normals.push(n);
        }

        let mut edges: HashMap<(u32, u32), EdgeFaces> = HashMap::new();
        for t in 0..num_tris {
            if face_normals[t].is_none() {
                continue;
            }
            let [a, b, c] = mesh.triangle_indices(t);
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = (u.min(v), u.max(v));
                let entry = edges.entry(key).or_insert(EdgeFaces {
                    tris: [0; 2],
                    count: 0,
                });
                match entry.count {
                    0 | 1 => {
                        entry.tris[entry.count as usize] = t as u32;
                        entry.count += 1;
                    }
                    2 => {
                        diag.non_manifold_edges += 1;
                        log::warn!("edge {key:?} has more than two faces; using first two");
                        entry.count = 3;
                    }
                    _ => {}
                }
            }
        }

        Self {
            edges,
            face_normals,
        }
    }

    /// Normals of the (up to two) faces adjacent to an edge entry.
    fn normals(&self, faces: &EdgeFaces) -> (Option<Vec3>, Option<Vec3>) {
        let n0 = self.face_normals[faces.tris[0] as usize];
        let n1 = if faces.count >= 2 {
            self.face_normals[faces.tris[1] as usize]
        } else {
            None
        };
        (n0, n1)
    }

    /// Vertex-index pairs of all sharp edges.
    pub fn sharp_edges(&self, sharp_angle_deg: f64) -> Vec<(u32, u32)> {
        let cos_threshold = sharp_angle_deg.to_radians().cos();
        let mut result = Vec::new();
        for (key, faces) in &self.edges {
            match self.normals(faces) {
                // Boundary edge: always drawn.
                (Some(_), None) => result.push(*key),
                (Some(n0), Some(n1)) => {
                    if n0.dot(&n1) < cos_threshold {
                        result.push(*key);
                    }
                }
                _ => {}
            }
        }
        result
    }

    /// Vertex-index pairs of silhouette edges for a sight direction.
    pub fn silhouette_edges(&self, sight: &Vec3) -> Vec<(u32, u32)> {
        let mut result = Vec::new();
        for (key, faces) in &self.edges {
            if let (Some(n0), Some(n1)) = self.normals(faces) {
                let d0 = n0.dot(sight);
                let d1 = n1.dot(sight);
                if (d0 > SIGN_EPS && d1 < -SIGN_EPS) || (d0 < -SIGN_EPS && d1 > SIGN_EPS) {
                    result.push(*key);
                }
            }
        }
        result
    }
}

/// Extract all drawing edges for one view: sharp edges plus silhouettes,
/// deduplicated (sharp wins when an edge is both).
pub fn extract_drawing_edges(
    mesh: &TriangleMesh,
    sight: &Vec3,
    sharp_angle_deg: f64,
    diag: &mut Diagnostics,
) -> Vec<ExtractedEdge> {
    let adjacency = EdgeAdjacency::build(mesh, diag);
    let mut kinds: HashMap<(u32, u32), EdgeKind> = HashMap::new();
    for key in adjacency.silhouette_edges(sight) {
        kinds.insert(key, EdgeKind::Silhouette);
    }
    for key in adjacency.sharp_edges(sharp_angle_deg) {
        kinds.insert(key, EdgeKind::Sharp);
    }

    let mut result: Vec<ExtractedEdge> = kinds
        .into_iter()
        .map(|((v0, v1), kind)| ExtractedEdge {
            start: mesh.vertex(v0 as usize),
            end: mesh.vertex(v1 as usize),
            kind,
        })
        .collect();
    // Hash order is nondeterministic; sort for stable downstream output.
    result.sort_by(|a, b| {
        (a.start.x, a.start.y, a.start.z, a.end.x, a.end.y, a.end.z)
            .partial_cmp(&(b.start.x, b.start.y, b.start.z, b.end.x, b.end.y, b.end.z))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use partdraft_math::Point3;
    use partdraft_mesh::fixtures::{make_box_mesh, make_cylinder_mesh};

    #[test]
    fn cube_has_twelve_sharp_edges() {
        let mesh = make_box_mesh(Point3::origin(), 10.0, 10.0, 10.0);
        let mut diag = Diagnostics::default();
        let adjacency = EdgeAdjacency::build(&mesh, &mut diag);
        // 12 perimeter edges sharp; the 6 face diagonals are coplanar.
        assert_eq!(adjacency.sharp_edges(DEFAULT_SHARP_ANGLE_DEG).len(), 12);
        assert!(diag.is_clean());
    }

    #[test]
    fn cylinder_wall_edges_are_smooth() {
        let mesh = make_cylinder_mesh(Point3::origin(), 10.0, 20.0, 32);
        let mut diag = Diagnostics::default();
        let adjacency = EdgeAdjacency::build(&mesh, &mut diag);
        let sharp = adjacency.sharp_edges(DEFAULT_SHARP_ANGLE_DEG);
        // Only the two rim circles are sharp: 32 segments each. The
        // vertical wall edges (11.25 degrees) stay under the threshold.
        assert_eq!(sharp.len(), 64);
    }

    #[test]
    fn cylinder_side_silhouettes() {
        let mesh = make_cylinder_mesh(Point3::origin(), 10.0, 20.0, 32);
        let mut diag = Diagnostics::default();
        let adjacency = EdgeAdjacency::build(&mesh, &mut diag);
        // Looking along -X: the wall normal's X component changes sign
        // twice around the circumference.
        let silhouettes = adjacency.silhouette_edges(&Vec3::new(-1.0, 0.0, 0.0));
        let vertical: Vec<_> = silhouettes
            .iter()
            .filter(|(v0, v1)| {
                let a = mesh.vertex(*v0 as usize);
                let b = mesh.vertex(*v1 as usize);
                (a.z - b.z).abs() > 1.0
            })
            .collect();
        assert_eq!(vertical.len(), 2);
    }

    #[test]
    fn non_manifold_edge_counted() {
        // Two triangles sharing edge (0,1), plus a third fin on it.
        let mesh = TriangleMesh {
            vertices: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, -1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
            indices: vec![0, 1, 2, 0, 3, 1, 0, 1, 4],
            normals: Vec::new(),
        };
        let mut diag = Diagnostics::default();
        let _ = EdgeAdjacency::build(&mesh, &mut diag);
        assert_eq!(diag.non_manifold_edges, 1);
    }

    #[test]
    fn drawing_edges_prefer_sharp() {
        let mesh = make_box_mesh(Point3::origin(), 5.0, 5.0, 5.0);
        let mut diag = Diagnostics::default();
        let edges =
            extract_drawing_edges(&mesh, &Vec3::new(0.0, 0.0, -1.0), DEFAULT_SHARP_ANGLE_DEG, &mut diag);
        assert_eq!(edges.len(), 12);
        assert!(edges.iter().all(|e| e.kind == EdgeKind::Sharp));
    }
}
