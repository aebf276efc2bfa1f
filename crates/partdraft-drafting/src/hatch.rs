//! Hatch fill for closed section contours.
//!
//! Builds a family of parallel lines at the pattern angle, spaced
//! perpendicular by the pattern spacing, spanning well past the contour
//! bounds, then clips each candidate against every contour edge. Sorted
//! intersection parameters alternate an inside/outside parity flag seeded
//! by a point-in-region test of the line start, which handles holes with
//! no special casing (even-odd rule).

use crate::types::{BoundingBox2D, HatchPattern, Point2D, SectionContour};

const PARAM_EPS: f64 = 1e-9;

/// Even-odd point-in-region test over every contour edge.
fn point_in_region(p: &Point2D, contours: &[SectionContour]) -> bool {
    let mut inside = false;
    for contour in contours {
        for edge in contour.points.windows(2) {
            let (a, b) = (&edge[0], &edge[1]);
            if ((a.y > p.y) != (b.y > p.y))
                && (p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x)
            {
                inside = !inside;
            }
        }
    }
    inside
}

/// Intersection parameter along `p0->p1` with edge `e0->e1`, if the hit
/// lies on the edge segment.
fn line_edge_intersection(
    p0: &Point2D,
    p1: &Point2D,
    e0: &Point2D,
    e1: &Point2D,
) -> Option<f64> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let ex = e1.x - e0.x;
    let ey = e1.y - e0.y;

    let denom = dx * ey - dy * ex;
    if denom.abs() < 1e-12 {
        return None; // parallel
    }
    let t = ((e0.x - p0.x) * ey - (e0.y - p0.y) * ex) / denom;
    let s = ((e0.x - p0.x) * dy - (e0.y - p0.y) * dx) / denom;
    if (0.0..=1.0).contains(&s) {
        Some(t)
    } else {
        None
    }
}

/// Generate hatch lines clipped to the region bounded by the contours.
pub fn generate_hatch(
    contours: &[SectionContour],
    pattern: &HatchPattern,
) -> Vec<(Point2D, Point2D)> {
    if contours.is_empty() || pattern.spacing_mm <= 0.0 {
        return Vec::new();
    }

    let mut bounds = BoundingBox2D::empty();
    for contour in contours {
        for p in &contour.points {
            bounds.include_point(*p);
        }
    }
    if !bounds.is_valid() {
        return Vec::new();
    }

    let margin = pattern.spacing_mm * 2.0;
    let corners = [
        Point2D::new(bounds.min_x - margin, bounds.min_y - margin),
        Point2D::new(bounds.max_x + margin, bounds.min_y - margin),
        Point2D::new(bounds.max_x + margin, bounds.max_y + margin),
        Point2D::new(bounds.min_x - margin, bounds.max_y + margin),
    ];

    let angle = pattern.angle_deg.to_radians();
    let dir = Point2D::new(angle.cos(), angle.sin());
    let perp = Point2D::new(-angle.sin(), angle.cos());

    let mut min_offset = f64::INFINITY;
    let mut max_offset = f64::NEG_INFINITY;
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for c in &corners {
        let along = c.x * dir.x + c.y * dir.y;
        let across = c.x * perp.x + c.y * perp.y;
        min_offset = min_offset.min(across);
        max_offset = max_offset.max(across);
        t_min = t_min.min(along);
        t_max = t_max.max(along);
    }

    let mut hatch_lines = Vec::new();
    let mut offset = min_offset;
    while offset <= max_offset {
        let p0 = Point2D::new(
            perp.x * offset + dir.x * t_min,
            perp.y * offset + dir.y * t_min,
        );
        let p1 = Point2D::new(
            perp.x * offset + dir.x * t_max,
            perp.y * offset + dir.y * t_max,
        );

        let mut ts: Vec<f64> = Vec::new();
        for contour in contours {
            for edge in contour.points.windows(2) {
                if let Some(t) = line_edge_intersection(&p0, &p1, &edge[0], &edge[1]) {
                    ts.push(t);
                }
            }
        }
        ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ts.dedup_by(|a, b| (*a - *b).abs() < PARAM_EPS);

        let at = |t: f64| Point2D::new(p0.x + (p1.x - p0.x) * t, p0.y + (p1.y - p0.y) * t);

        // Parity walk seeded at the line start.
        let mut inside = point_in_region(&p0, contours);
        let mut prev = 0.0;
        for &t in &ts {
            if inside && t - prev > PARAM_EPS {
                hatch_lines.push((at(prev), at(t)));
            }
            inside = !inside;
            prev = t;
        }
        // A line that never crossed anything is kept whole only when it
        // lies fully inside.
        if inside && 1.0 - prev > PARAM_EPS {
            hatch_lines.push((at(prev), at(1.0)));
        }

        offset += pattern.spacing_mm;
    }

    hatch_lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Winding;

    fn rect_contour(w: f64, h: f64) -> SectionContour {
        SectionContour {
            points: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(w, 0.0),
                Point2D::new(w, h),
                Point2D::new(0.0, h),
                Point2D::new(0.0, 0.0),
            ],
            is_outer: true,
            winding: Winding::Ccw,
        }
    }

    fn square_hole(cx: f64, cy: f64, half: f64) -> SectionContour {
        SectionContour {
            points: vec![
                Point2D::new(cx - half, cy - half),
                Point2D::new(cx - half, cy + half),
                Point2D::new(cx + half, cy + half),
                Point2D::new(cx + half, cy - half),
                Point2D::new(cx - half, cy - half),
            ],
            is_outer: false,
            winding: Winding::Cw,
        }
    }

    #[test]
    fn hatch_stays_inside_rect() {
        let contours = vec![rect_contour(50.0, 30.0)];
        let pattern = HatchPattern {
            angle_deg: 45.0,
            spacing_mm: 3.0,
            line_width_mm: 0.25,
        };
        let lines = generate_hatch(&contours, &pattern);

        // Perpendicular extent of the rect is (50 + 30) / sqrt(2), so
        // roughly that many lines at 3mm spacing.
        let expected = (80.0 / std::f64::consts::SQRT_2 / 3.0).round() as usize;
        assert!(lines.len() >= expected - 3 && lines.len() <= expected + 3);

        for (a, b) in &lines {
            for p in [a, b] {
                assert!(p.x >= -1e-6 && p.x <= 50.0 + 1e-6);
                assert!(p.y >= -1e-6 && p.y <= 30.0 + 1e-6);
            }
        }
    }

    #[test]
    fn hatch_skips_holes() {
        let contours = vec![rect_contour(40.0, 40.0), square_hole(20.0, 20.0, 8.0)];
        let pattern = HatchPattern {
            angle_deg: 0.0,
            spacing_mm: 2.0,
            line_width_mm: 0.25,
        };
        let lines = generate_hatch(&contours, &pattern);
        assert!(!lines.is_empty());

        // No clipped segment midpoint may land inside the hole.
        for (a, b) in &lines {
            let mid = Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            let in_hole = mid.x > 12.0 + 1e-6
                && mid.x < 28.0 - 1e-6
                && mid.y > 12.0 + 1e-6
                && mid.y < 28.0 - 1e-6;
            assert!(!in_hole, "hatch segment midpoint {mid:?} inside hole");
        }

        // Lines crossing the hole band split in two.
        let split_rows = lines
            .iter()
            .filter(|(a, _)| a.y > 12.5 && a.y < 27.5)
            .count();
        assert!(split_rows >= 12);
    }

    #[test]
    fn zero_spacing_yields_nothing() {
        let contours = vec![rect_contour(10.0, 10.0)];
        let pattern = HatchPattern {
            angle_deg: 45.0,
            spacing_mm: 0.0,
            line_width_mm: 0.25,
        };
        assert!(generate_hatch(&contours, &pattern).is_empty());
    }

    #[test]
    fn empty_region_yields_nothing() {
        let pattern = HatchPattern::default();
        assert!(generate_hatch(&[], &pattern).is_empty());
    }
}
