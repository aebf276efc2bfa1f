//! Section slicing: plane-mesh intersection, loop stitching, and
//! outer/inner classification.
//!
//! The mesh path intersects every triangle with the cutting plane,
//! projects the resulting 3D segments into the plane's 2D basis, stitches
//! them into closed loops, and classifies loops by signed area. When no
//! mesh is available or stitching produces nothing usable, a simplified
//! fallback synthesizes the section from the recipe's bounding box and
//! its subtractive cylinders — lower fidelity, reported in diagnostics,
//! never an error.

use std::collections::HashMap;

use partdraft_ir::PartRecipe;
use partdraft_math::{Point3, Vec3};
use partdraft_mesh::TriangleMesh;

use crate::diag::Diagnostics;
use crate::types::{signed_area, CuttingPlane, Point2D, SectionContour, Winding};

/// Tolerance for vertex-to-plane classification (mm).
pub const SLICE_TOLERANCE: f64 = 1e-6;

/// Endpoint matching tolerance for loop stitching (mm).
pub const STITCH_TOLERANCE: f64 = 1e-4;

/// Loops with less area than this are noise (mm^2).
pub const MIN_LOOP_AREA: f64 = 0.01;

/// Orthonormal in-plane axes derived from the normal.
///
/// The helper axis is picked from the dominant normal component so the
/// 2D orientation is deterministic for a given plane.
fn plane_basis(normal: &Vec3) -> (Vec3, Vec3) {
    let n = normal.normalize();
    let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
    let helper = if az >= ax && az >= ay {
        Vec3::new(1.0, 0.0, 0.0)
    } else if ax >= ay {
        Vec3::new(0.0, 1.0, 0.0)
    } else {
        Vec3::new(0.0, 0.0, 1.0)
    };
    let u = (helper - n * helper.dot(&n)).normalize();
    let v = n.cross(&u);
    (u, v)
}

fn project_to_plane(p: &Point3, origin: &Point3, u: &Vec3, v: &Vec3) -> Point2D {
    let d = p - origin;
    Point2D::new(d.dot(u), d.dot(v))
}

/// Intersect one triangle with the plane, already projected to 2D.
///
/// Straddling triangles yield exactly one segment; on-plane vertices pass
/// through as intersection points. Fully coplanar triangles are skipped —
/// their area is bounded by neighbouring straddling triangles.
fn triangle_section_segment(
    corners: [Point3; 3],
    origin: &Point3,
    n: &Vec3,
    u: &Vec3,
    v: &Vec3,
) -> Option<(Point2D, Point2D)> {
    let d: Vec<f64> = corners.iter().map(|c| (c - origin).dot(n)).collect();
    let on: Vec<bool> = d.iter().map(|x| x.abs() < SLICE_TOLERANCE).collect();
    let on_count = on.iter().filter(|&&b| b).count();
    let pos = d.iter().zip(&on).any(|(&x, &o)| !o && x > 0.0);
    let neg = d.iter().zip(&on).any(|(&x, &o)| !o && x < 0.0);

    // Fully coplanar triangles carry no crossing.
    if on_count == 3 {
        return None;
    }
    if !(pos && neg) {
        // Not straddling. The only usable case is an on-plane edge, and
        // to avoid emitting it twice (its twin triangle sees the same
        // edge) it is taken from the negative side only.
        if !(on_count == 2 && neg) {
            return None;
        }
    }

    let mut points: Vec<Point2D> = Vec::with_capacity(2);
    let mut push_unique = |p: Point2D| {
        if !points
            .iter()
            .any(|q| q.distance(&p) < STITCH_TOLERANCE)
        {
            points.push(p);
        }
    };

    for i in 0..3 {
        if on[i] {
            push_unique(project_to_plane(&corners[i], origin, u, v));
        }
        let j = (i + 1) % 3;
        let straddles = (d[i] > SLICE_TOLERANCE && d[j] < -SLICE_TOLERANCE)
            || (d[i] < -SLICE_TOLERANCE && d[j] > SLICE_TOLERANCE);
        if straddles {
            let t = d[i] / (d[i] - d[j]);
            let p = Point3::new(
                corners[i].x + t * (corners[j].x - corners[i].x),
                corners[i].y + t * (corners[j].y - corners[i].y),
                corners[i].z + t * (corners[j].z - corners[i].z),
            );
            push_unique(project_to_plane(&p, origin, u, v));
        }
    }

    if points.len() < 2 {
        return None;
    }
    let (a, b) = (points[0], points[1]);
    if a.distance(&b) < STITCH_TOLERANCE {
        return None;
    }
    Some((a, b))
}

fn point_key(p: &Point2D) -> (i64, i64) {
    let scale = 1.0 / STITCH_TOLERANCE;
    ((p.x * scale).round() as i64, (p.y * scale).round() as i64)
}

/// Stitch unordered segments into closed loops.
///
/// Greedy walk from each unvisited segment, following shared endpoints
/// until the walk returns to its origin. Open chains are invalid for a
/// section and are discarded (counted). The iteration cap guards against
/// a stitching bug turning into an infinite walk.
fn stitch_loops(segments: &[(Point2D, Point2D)], diag: &mut Diagnostics) -> Vec<Vec<Point2D>> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut adjacency: HashMap<(i64, i64), Vec<(usize, bool)>> = HashMap::new();
    for (i, (p0, p1)) in segments.iter().enumerate() {
        adjacency.entry(point_key(p0)).or_default().push((i, false));
        adjacency.entry(point_key(p1)).or_default().push((i, true));
    }

    let mut used = vec![false; segments.len()];
    let mut loops = Vec::new();
    let cap = 2 * segments.len();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (s0, s1) = segments[start];
        let mut chain = vec![s0, s1];
        let mut current = s1;
        let mut closed = false;

        for _ in 0..cap {
            if chain.len() >= 4 && current.distance(&s0) < STITCH_TOLERANCE {
                closed = true;
                break;
            }
            let mut next: Option<Point2D> = None;
            if let Some(neighbors) = adjacency.get(&point_key(&current)) {
                for &(seg, at_end) in neighbors {
                    if used[seg] {
                        continue;
                    }
                    let (a, b) = segments[seg];
                    used[seg] = true;
                    next = Some(if at_end { a } else { b });
                    break;
                }
            }
            match next {
                Some(p) => {
                    chain.push(p);
                    current = p;
                }
                None => break,
            }
        }

        // A triangle closes at length 4 (three vertices plus the repeat).
        if !closed && chain.len() >= 4 && current.distance(&s0) < STITCH_TOLERANCE {
            closed = true;
        }
        if closed {
            loops.push(chain);
        } else {
            diag.open_section_chains += 1;
            log::warn!(
                "discarding open section chain of {} points",
                chain.len()
            );
        }
    }

    loops
}

/// Classify stitched loops into outer boundaries and holes.
///
/// The loop with the largest absolute area is the outer boundary; every
/// other loop is outer iff its area sign matches. Winding is ccw for
/// positive signed area.
fn classify_loops(loops: Vec<Vec<Point2D>>, diag: &mut Diagnostics) -> Vec<SectionContour> {
    let mut areas: Vec<(Vec<Point2D>, f64)> = Vec::new();
    for points in loops {
        let area = signed_area(&points);
        if area.abs() < MIN_LOOP_AREA {
            diag.discarded_loops += 1;
            continue;
        }
        areas.push((points, area));
    }
    let Some(largest) = areas
        .iter()
        .map(|(_, a)| a.abs())
        .fold(None::<f64>, |acc, a| Some(acc.map_or(a, |m| m.max(a))))
    else {
        return Vec::new();
    };
    let outer_sign = areas
        .iter()
        .find(|(_, a)| (a.abs() - largest).abs() < 1e-12)
        .map(|(_, a)| a.signum())
        .unwrap_or(1.0);

    areas
        .into_iter()
        .map(|(points, area)| SectionContour {
            points,
            is_outer: area.signum() == outer_sign,
            winding: if area > 0.0 { Winding::Ccw } else { Winding::Cw },
        })
        .collect()
}

/// Slice a mesh with a cutting plane into classified 2D contours.
pub fn section_mesh(
    mesh: &TriangleMesh,
    plane: &CuttingPlane,
    diag: &mut Diagnostics,
) -> Vec<SectionContour> {
    let origin = plane.origin_point();
    let normal = plane.normal_vec();
    if normal.norm() < 1e-12 {
        return Vec::new();
    }
    let n = normal.normalize();
    let (u, v) = plane_basis(&n);

    let mut segments = Vec::new();
    for tri in mesh.triangles() {
        if let Some(seg) = triangle_section_segment([tri.v0, tri.v1, tri.v2], &origin, &n, &u, &v)
        {
            segments.push(seg);
        }
    }

    let loops = stitch_loops(&segments, diag);
    classify_loops(loops, diag)
}

/// Simplified section from the recipe alone: the bounding-box rectangle
/// on the plane, with subtractive cylinders crossing the plane
/// approximated as octagonal holes.
pub fn fallback_section(
    recipe: &PartRecipe,
    plane: &CuttingPlane,
    diag: &mut Diagnostics,
) -> Vec<SectionContour> {
    diag.degraded_sections += 1;
    log::debug!("section {} using bounding-box fallback", plane.label);

    let Ok((lo, hi)) = recipe.bounding_box() else {
        return Vec::new();
    };
    let origin = plane.origin_point();
    let normal = plane.normal_vec();
    if normal.norm() < 1e-12 {
        return Vec::new();
    }
    let n = normal.normalize();
    let (u, v) = plane_basis(&n);

    // Project the eight box corners; their 2D bounds span the section.
    let mut min = Point2D::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for dx in [lo.x, hi.x] {
        for dy in [lo.y, hi.y] {
            for dz in [lo.z, hi.z] {
                let p = project_to_plane(&Point3::new(dx, dy, dz), &origin, &u, &v);
                min = Point2D::new(min.x.min(p.x), min.y.min(p.y));
                max = Point2D::new(max.x.max(p.x), max.y.max(p.y));
            }
        }
    }
    if min.x >= max.x || min.y >= max.y {
        return Vec::new();
    }

    let outer = vec![
        Point2D::new(min.x, min.y),
        Point2D::new(max.x, min.y),
        Point2D::new(max.x, max.y),
        Point2D::new(min.x, max.y),
        Point2D::new(min.x, min.y),
    ];
    let mut contours = vec![SectionContour {
        points: outer,
        is_outer: true,
        winding: Winding::Ccw,
    }];

    for feature in recipe.cylindrical_features() {
        if !feature.subtractive {
            continue;
        }
        // Does the feature's extent reach the plane?
        let distance = (feature.center - origin).dot(&n).abs();
        if distance > feature.length / 2.0 {
            continue;
        }
        let center = project_to_plane(&feature.center, &origin, &u, &v);
        let r = feature.diameter / 2.0;
        if center.x - r < min.x
            || center.x + r > max.x
            || center.y - r < min.y
            || center.y + r > max.y
        {
            continue;
        }
        // Octagonal hole, clockwise so the winding opposes the outer loop.
        let mut points: Vec<Point2D> = (0..8)
            .map(|k| {
                let a = std::f64::consts::TAU * (8 - k) as f64 / 8.0;
                Point2D::new(center.x + r * a.cos(), center.y + r * a.sin())
            })
            .collect();
        points.push(points[0]);
        contours.push(SectionContour {
            points,
            is_outer: false,
            winding: Winding::Cw,
        });
    }

    contours
}

/// Slice with the mesh when possible, falling back to the simplified
/// recipe-derived section when slicing finds no closed loop.
pub fn section_with_fallback(
    mesh: Option<&TriangleMesh>,
    recipe: &PartRecipe,
    plane: &CuttingPlane,
    diag: &mut Diagnostics,
) -> Vec<SectionContour> {
    if let Some(mesh) = mesh {
        let contours = section_mesh(mesh, plane, diag);
        if !contours.is_empty() {
            return contours;
        }
    }
    fallback_section(recipe, plane, diag)
}
