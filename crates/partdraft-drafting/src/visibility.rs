//! Hidden-line classification by ray casting.
//!
//! For each candidate edge we take three samples (near both endpoints and
//! at the midpoint) and cast a ray from each toward the viewer against
//! the full mesh. A sample is visible when nothing is hit in front of it.
//! An edge is visible when at least two of the three samples are — the
//! majority vote keeps tangent and grazing edges from flickering.
//!
//! Drawing edges lie on the surface, so two guards keep a sample from
//! being occluded by the faces it sits on: hits closer than a small ray
//! parameter are ignored, and hits on a triangle's boundary (where a
//! grazing ray clips an adjacent face edge-on) are rejected. End samples
//! are additionally pulled slightly inboard along the edge so they never
//! coincide with a neighbouring face.
//!
//! Ray casts are independent, so edges are classified in parallel. The
//! indexed collect keeps the output order deterministic.

use partdraft_math::{Point3, Vec3};
use partdraft_mesh::{Triangle, TriangleMesh};
use rayon::prelude::*;

use crate::types::{ClassifiedEdge, ExtractedEdge, ViewDirection};

/// Minimum ray parameter before a hit counts as occlusion.
const SELF_HIT_EPS: f64 = 1e-4;

/// Barycentric margin: hits this close to a triangle edge are grazing.
const INTERIOR_EPS: f64 = 1e-9;

/// How far end samples are pulled in from the edge endpoints.
const END_SAMPLE_FRACTION: f64 = 0.05;

/// Möller–Trumbore ray/triangle intersection, interior hits only.
///
/// Returns the ray parameter `t` of the hit, if any.
fn ray_triangle_interior(origin: &Point3, dir: &Vec3, tri: &Triangle) -> Option<f64> {
    let e1 = tri.v1 - tri.v0;
    let e2 = tri.v2 - tri.v0;
    let p = dir.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() < 1e-12 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - tri.v0;
    let u = s.dot(&p) * inv_det;
    if u < INTERIOR_EPS || u > 1.0 - INTERIOR_EPS {
        return None;
    }
    let q = s.cross(&e1);
    let v = dir.dot(&q) * inv_det;
    if v < INTERIOR_EPS || u + v > 1.0 - INTERIOR_EPS {
        return None;
    }
    Some(e2.dot(&q) * inv_det)
}

/// Whether a sample point is occluded on its way to the viewer.
fn occluded(triangles: &[Triangle], sample: &Point3, toward_viewer: &Vec3) -> bool {
    triangles.iter().any(|tri| {
        matches!(ray_triangle_interior(sample, toward_viewer, tri), Some(t) if t > SELF_HIT_EPS)
    })
}

fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    Point3::new(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        a.z + (b.z - a.z) * t,
    )
}

/// Classify edge visibility for one view by majority vote over three
/// samples per edge.
///
/// O(edges x triangles); acceptable for typical part sizes. A BVH would
/// speed this up without changing output.
pub fn classify_visibility(
    mesh: &TriangleMesh,
    edges: &[ExtractedEdge],
    view: ViewDirection,
) -> Vec<ClassifiedEdge> {
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    let toward_viewer = view.toward_viewer();

    edges
        .par_iter()
        .map(|edge| {
            let samples = [
                lerp(&edge.start, &edge.end, END_SAMPLE_FRACTION),
                lerp(&edge.start, &edge.end, 0.5),
                lerp(&edge.start, &edge.end, 1.0 - END_SAMPLE_FRACTION),
            ];
            let visible_samples = samples
                .iter()
                .filter(|sample| !occluded(&triangles, sample, &toward_viewer))
                .count();
            ClassifiedEdge {
                start: edge.start,
                end: edge.end,
                kind: edge.kind,
                visible: visible_samples >= 2,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::edge_extract::{extract_drawing_edges, DEFAULT_SHARP_ANGLE_DEG};
    use partdraft_mesh::fixtures::make_box_mesh;

    #[test]
    fn ray_hits_facing_triangle() {
        let tri = Triangle {
            v0: Point3::new(-1.0, -1.0, 5.0),
            v1: Point3::new(1.0, -1.0, 5.0),
            v2: Point3::new(0.0, 1.0, 5.0),
        };
        let t = ray_triangle_interior(&Point3::new(0.0, -0.3, 0.0), &Vec3::new(0.0, 0.0, 1.0), &tri);
        assert!((t.unwrap() - 5.0).abs() < 1e-9);

        // Pointing away: negative t, filtered by the occlusion check.
        let t = ray_triangle_interior(&Point3::new(0.0, -0.3, 0.0), &Vec3::new(0.0, 0.0, -1.0), &tri);
        assert!(t.unwrap() < 0.0);
    }

    #[test]
    fn ray_rejects_boundary_graze() {
        let tri = Triangle {
            v0: Point3::new(-1.0, -1.0, 5.0),
            v1: Point3::new(1.0, -1.0, 5.0),
            v2: Point3::new(0.0, 1.0, 5.0),
        };
        // Straight at the v2 corner.
        let t = ray_triangle_interior(&Point3::new(0.0, 1.0, 0.0), &Vec3::new(0.0, 0.0, 1.0), &tri);
        assert!(t.is_none());
        // Well outside.
        let t = ray_triangle_interior(&Point3::new(5.0, 5.0, 0.0), &Vec3::new(0.0, 0.0, 1.0), &tri);
        assert!(t.is_none());
    }

    #[test]
    fn lone_cube_edges_all_visible_everywhere() {
        // Visibility parity: a convex solid with no occluders has no
        // hidden outline — every edge is visible in at least one view
        // (here, in fact, in all of them since grazing does not occlude).
        let mesh = make_box_mesh(Point3::origin(), 10.0, 10.0, 10.0);
        let mut diag = Diagnostics::default();

        let mut seen_visible = vec![false; 12];
        for view in ViewDirection::ALL {
            let edges =
                extract_drawing_edges(&mesh, &view.sight(), DEFAULT_SHARP_ANGLE_DEG, &mut diag);
            assert_eq!(edges.len(), 12);
            let classified = classify_visibility(&mesh, &edges, view);
            for (i, edge) in classified.iter().enumerate() {
                if edge.visible {
                    seen_visible[i] = true;
                }
            }
        }
        assert!(seen_visible.iter().all(|&v| v));
    }

    #[test]
    fn occluded_edges_are_hidden() {
        // A small cube hiding behind a large plate, viewed from the
        // front (the viewer sits at +Z).
        let small = make_box_mesh(Point3::new(3.0, 1.0, -20.0), 4.0, 4.0, 4.0);
        let mut scene = make_box_mesh(Point3::origin(), 40.0, 30.0, 2.0);
        scene.merge(&small);

        let mut diag = Diagnostics::default();
        let view = ViewDirection::Front;
        let edges =
            extract_drawing_edges(&scene, &view.sight(), DEFAULT_SHARP_ANGLE_DEG, &mut diag);
        let classified = classify_visibility(&scene, &edges, view);

        let small_edges: Vec<_> = classified
            .iter()
            .filter(|e| e.start.z < -10.0 && e.end.z < -10.0)
            .collect();
        assert_eq!(small_edges.len(), 12);
        assert!(small_edges.iter().all(|e| !e.visible));
    }
}
