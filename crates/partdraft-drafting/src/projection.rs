//! Orthographic projection into 2D view coordinates.
//!
//! First-angle projection with fixed rotations: front is the identity,
//! top is -90 degrees about X, right is +90 degrees about Y. View-space Z
//! encodes depth — the viewer looks along -Z, so Z < 0 is in front of the
//! view plane. Page coordinates are (view X, -view Y) so Y grows downward
//! like screen and page space.

use partdraft_math::Point3;

use crate::diag::Diagnostics;
use crate::types::{
    ClassifiedEdge, Point2D, ProjectedEdge, ProjectedView, ViewDirection, Visibility,
};

/// Projected edges shorter than this in both axes are degenerate (mm).
pub const DEGENERATE_2D_TOL: f64 = 0.01;

/// Project a model-space point to 2D page-oriented view coordinates.
pub fn project_point(view: ViewDirection, p: &Point3) -> Point2D {
    let v = view.to_view_space(p);
    Point2D::new(v.x, -v.y)
}

/// View-space depth of a model point (negative is in front).
pub fn project_depth(view: ViewDirection, p: &Point3) -> f64 {
    view.to_view_space(p).z
}

/// Project classified edges into one view.
///
/// Edges behind the view plane at both ends are dropped outright;
/// near-zero-length projections are dropped as degenerate and counted.
/// An edge stays visible only if its ray-cast classification says so and
/// at least one endpoint lies in front of the view plane.
pub fn project_edges(
    view: ViewDirection,
    edges: &[ClassifiedEdge],
    diag: &mut Diagnostics,
) -> ProjectedView {
    let mut projected = ProjectedView::new(view);

    for edge in edges {
        let s = view.to_view_space(&edge.start);
        let e = view.to_view_space(&edge.end);

        // Entirely behind the view plane.
        if s.z > 0.0 && e.z > 0.0 {
            continue;
        }

        let start = Point2D::new(s.x, -s.y);
        let end = Point2D::new(e.x, -e.y);
        if (end.x - start.x).abs() < DEGENERATE_2D_TOL
            && (end.y - start.y).abs() < DEGENERATE_2D_TOL
        {
            diag.skipped_edges += 1;
            continue;
        }

        let in_front = s.z < 0.0 || e.z < 0.0;
        let visibility = if edge.visible && in_front {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        projected.add_edge(ProjectedEdge {
            start,
            end,
            visibility,
            kind: edge.kind,
            depth: (s.z + e.z) / 2.0,
        });
    }

    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EdgeKind;

    fn edge(start: Point3, end: Point3, visible: bool) -> ClassifiedEdge {
        ClassifiedEdge {
            start,
            end,
            kind: EdgeKind::Sharp,
            visible,
        }
    }

    #[test]
    fn front_projection_flips_y() {
        let p = project_point(ViewDirection::Front, &Point3::new(3.0, 4.0, -1.0));
        assert!((p.x - 3.0).abs() < 1e-12);
        assert!((p.y + 4.0).abs() < 1e-12);
    }

    #[test]
    fn behind_plane_edges_dropped() {
        let mut diag = Diagnostics::default();
        let edges = vec![
            edge(Point3::new(0.0, 0.0, 5.0), Point3::new(10.0, 0.0, 5.0), true),
            edge(
                Point3::new(0.0, 0.0, -5.0),
                Point3::new(10.0, 0.0, -5.0),
                true,
            ),
        ];
        let view = project_edges(ViewDirection::Front, &edges, &mut diag);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].visibility, Visibility::Visible);
    }

    #[test]
    fn straddling_edge_kept() {
        let mut diag = Diagnostics::default();
        let edges = vec![edge(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(10.0, 0.0, -5.0),
            true,
        )];
        let view = project_edges(ViewDirection::Front, &edges, &mut diag);
        assert_eq!(view.edges.len(), 1);
    }

    #[test]
    fn degenerate_projection_counted() {
        let mut diag = Diagnostics::default();
        // A depth-aligned edge projects to a point in the front view.
        let edges = vec![edge(
            Point3::new(1.0, 1.0, -5.0),
            Point3::new(1.0, 1.0, 5.0),
            true,
        )];
        let view = project_edges(ViewDirection::Front, &edges, &mut diag);
        assert!(view.edges.is_empty());
        assert_eq!(diag.skipped_edges, 1);
    }

    #[test]
    fn view_bounds_accumulate() {
        let mut diag = Diagnostics::default();
        let edges = vec![
            edge(
                Point3::new(-5.0, -2.0, -1.0),
                Point3::new(5.0, -2.0, -1.0),
                true,
            ),
            edge(
                Point3::new(-5.0, 2.0, -1.0),
                Point3::new(5.0, 2.0, -1.0),
                true,
            ),
        ];
        let view = project_edges(ViewDirection::Front, &edges, &mut diag);
        assert!((view.bounds.width() - 10.0).abs() < 1e-12);
        assert!((view.bounds.height() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn top_view_depth_is_negative_y() {
        let d = project_depth(ViewDirection::Top, &Point3::new(0.0, 7.0, 0.0));
        assert!((d + 7.0).abs() < 1e-12);
    }
}
