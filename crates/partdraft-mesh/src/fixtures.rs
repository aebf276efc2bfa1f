//! Provider-shaped mesh builders.
//!
//! The real geometry backend delivers triangulated boolean results; these
//! builders produce the same welded layout for tests and offline use.

use partdraft_math::Point3;

use crate::TriangleMesh;

/// Build a welded axis-aligned box mesh centered at `center`.
pub fn make_box_mesh(center: Point3, sx: f64, sy: f64, sz: f64) -> TriangleMesh {
    let (hx, hy, hz) = (sx / 2.0, sy / 2.0, sz / 2.0);
    let corner = |dx: f64, dy: f64, dz: f64| {
        [
            (center.x + dx * hx) as f32,
            (center.y + dy * hy) as f32,
            (center.z + dz * hz) as f32,
        ]
    };
    let mut vertices = Vec::with_capacity(24);
    for c in [
        corner(-1.0, -1.0, -1.0),
        corner(1.0, -1.0, -1.0),
        corner(1.0, 1.0, -1.0),
        corner(-1.0, 1.0, -1.0),
        corner(-1.0, -1.0, 1.0),
        corner(1.0, -1.0, 1.0),
        corner(1.0, 1.0, 1.0),
        corner(-1.0, 1.0, 1.0),
    ] {
        vertices.extend_from_slice(&c);
    }
    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0, 2, 1, 0, 3, 2, // bottom (-Z)
        4, 5, 6, 4, 6, 7, // top (+Z)
        0, 1, 5, 0, 5, 4, // front (-Y)
        2, 3, 7, 2, 7, 6, // back (+Y)
        0, 4, 7, 0, 7, 3, // left (-X)
        1, 2, 6, 1, 6, 5, // right (+X)
    ];
    let mut mesh = TriangleMesh {
        vertices,
        indices,
        normals: Vec::new(),
    };
    mesh.compute_normals();
    mesh
}

/// Build a welded cylinder mesh along Z, centered at `center`.
///
/// Caps are triangle fans around a center vertex; walls are quads split
/// into triangles. All faces wind outward.
pub fn make_cylinder_mesh(center: Point3, radius: f64, height: f64, segments: u32) -> TriangleMesh {
    let segments = segments.max(3) as usize;
    let hz = height / 2.0;
    let mut vertices: Vec<f32> = Vec::new();
    let mut push = |x: f64, y: f64, z: f64| {
        vertices.push((center.x + x) as f32);
        vertices.push((center.y + y) as f32);
        vertices.push((center.z + z) as f32);
    };

    // Ring vertices: bottom 0..n, top n..2n, then the two cap centers.
    for &z in &[-hz, hz] {
        for k in 0..segments {
            let a = std::f64::consts::TAU * k as f64 / segments as f64;
            push(radius * a.cos(), radius * a.sin(), z);
        }
    }
    push(0.0, 0.0, -hz);
    push(0.0, 0.0, hz);

    let n = segments as u32;
    let bottom_center = 2 * n;
    let top_center = 2 * n + 1;
    let mut indices: Vec<u32> = Vec::new();
    for k in 0..n {
        let k1 = (k + 1) % n;
        // Wall quad (outward winding).
        indices.extend_from_slice(&[k, k1, n + k1]);
        indices.extend_from_slice(&[k, n + k1, n + k]);
        // Bottom cap faces -Z.
        indices.extend_from_slice(&[bottom_center, k1, k]);
        // Top cap faces +Z.
        indices.extend_from_slice(&[top_center, n + k, n + k1]);
    }

    let mut mesh = TriangleMesh {
        vertices,
        indices,
        normals: Vec::new(),
    };
    mesh.compute_normals();
    mesh
}

/// Build a box with a circular through-hole along Z, welded.
///
/// The outer boundary of each cap is sampled at the hole's angular
/// positions plus the four box corners, so the annulus triangulates into
/// clean strips and the side walls stay planar quads.
pub fn make_box_with_hole_mesh(
    sx: f64,
    sy: f64,
    sz: f64,
    hole_radius: f64,
    segments: u32,
) -> TriangleMesh {
    let segments = segments.max(8) as usize;
    let (hx, hy, hz) = (sx / 2.0, sy / 2.0, sz / 2.0);

    // Angular stations: hole tessellation angles plus box corner angles,
    // sorted and deduplicated.
    let mut angles: Vec<f64> = (0..segments)
        .map(|k| std::f64::consts::TAU * k as f64 / segments as f64)
        .collect();
    for corner in [
        f64::atan2(hy, hx),
        f64::atan2(hy, -hx),
        f64::atan2(-hy, -hx) + std::f64::consts::TAU,
        f64::atan2(-hy, hx) + std::f64::consts::TAU,
    ] {
        angles.push(corner.rem_euclid(std::f64::consts::TAU));
    }
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    angles.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    let n = angles.len();

    // Ray from the center at angle `a` hits the rectangle boundary here.
    let rect_point = |a: f64| -> (f64, f64) {
        let (s, c) = a.sin_cos();
        let tx = if c.abs() > 1e-12 {
            hx / c.abs()
        } else {
            f64::INFINITY
        };
        let ty = if s.abs() > 1e-12 {
            hy / s.abs()
        } else {
            f64::INFINITY
        };
        let t = tx.min(ty);
        (t * c, t * s)
    };

    // Vertex layout: for each of bottom (z=-hz) and top (z=+hz):
    // outer ring 0..n then inner (hole) ring n..2n.
    let mut vertices: Vec<f32> = Vec::new();
    for &z in &[-hz, hz] {
        for &a in &angles {
            let (x, y) = rect_point(a);
            vertices.extend_from_slice(&[x as f32, y as f32, z as f32]);
        }
        for &a in &angles {
            vertices.extend_from_slice(&[
                (hole_radius * a.cos()) as f32,
                (hole_radius * a.sin()) as f32,
                z as f32,
            ]);
        }
    }

    let n32 = n as u32;
    let bo = 0; // bottom outer ring start
    let bi = n32; // bottom inner
    let to = 2 * n32; // top outer
    let ti = 3 * n32; // top inner
    let mut indices: Vec<u32> = Vec::new();
    for k in 0..n32 {
        let k1 = (k + 1) % n32;
        // Bottom annulus (faces -Z).
        indices.extend_from_slice(&[bo + k, bi + k, bi + k1]);
        indices.extend_from_slice(&[bo + k, bi + k1, bo + k1]);
        // Top annulus (faces +Z).
        indices.extend_from_slice(&[to + k, to + k1, ti + k1]);
        indices.extend_from_slice(&[to + k, ti + k1, ti + k]);
        // Outer wall (faces outward).
        indices.extend_from_slice(&[bo + k, bo + k1, to + k1]);
        indices.extend_from_slice(&[bo + k, to + k1, to + k]);
        // Hole wall (faces inward, toward the axis).
        indices.extend_from_slice(&[bi + k, ti + k1, bi + k1]);
        indices.extend_from_slice(&[bi + k, ti + k, ti + k1]);
    }

    let mut mesh = TriangleMesh {
        vertices,
        indices,
        normals: Vec::new(),
    };
    mesh.compute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_is_watertight_sized() {
        let mesh = make_cylinder_mesh(Point3::origin(), 10.0, 30.0, 16);
        mesh.validate().unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!((max.z - 15.0).abs() < 1e-6);
        assert!((min.z + 15.0).abs() < 1e-6);
        assert!((max.x - 10.0).abs() < 1e-5);
        // 16 wall quads (2 tris) + 2*16 cap fans
        assert_eq!(mesh.num_triangles(), 16 * 4);
    }

    #[test]
    fn holed_box_bounds_match_box() {
        let mesh = make_box_with_hole_mesh(100.0, 50.0, 25.0, 10.0, 16);
        mesh.validate().unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!((max.x - 50.0).abs() < 1e-5);
        assert!((min.y + 25.0).abs() < 1e-5);
        assert!((max.z - 12.5).abs() < 1e-5);
    }

    #[test]
    fn holed_box_edges_are_manifold() {
        // Every undirected edge must bound exactly two triangles.
        let mesh = make_box_with_hole_mesh(40.0, 30.0, 10.0, 5.0, 8);
        let mut counts = std::collections::HashMap::new();
        for t in 0..mesh.num_triangles() {
            let [a, b, c] = mesh.triangle_indices(t);
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = (u.min(v), u.max(v));
                *counts.entry(key).or_insert(0u32) += 1;
            }
        }
        assert!(counts.values().all(|&c| c == 2));
    }
}
