//! Center-line generation for cylindrical and conical features.
//!
//! Features seen end-on get two crossed chain-line segments through the
//! projected center; features seen from the side get a single chain axis
//! line spanning the extruded length plus an overshoot at each end. The
//! chain dash pattern itself comes from the line-style registry.

use partdraft_ir::PartRecipe;
use serde::{Deserialize, Serialize};

use partdraft_math::Point3;

use crate::projection::project_point;
use crate::types::{Point2D, ViewDirection};

/// Features with a diameter under this get no center line.
pub const MIN_CENTERLINE_DIAMETER: f64 = 10.0;

/// Total length of each crossed center-mark segment.
pub const CROSS_LENGTH: f64 = 20.0;

/// Axis-line overshoot past each end of the feature.
pub const AXIS_OVERSHOOT: f64 = 5.0;

/// Chain-line segments marking one feature in one view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterLine {
    /// View the segments are drawn in.
    pub view: ViewDirection,
    /// Chain-line segments in view coordinates.
    pub segments: Vec<(Point2D, Point2D)>,
}

/// Generate center lines for every feature large enough, in every view.
pub fn generate_center_lines(recipe: &PartRecipe, views: &[ViewDirection]) -> Vec<CenterLine> {
    let mut result = Vec::new();

    for feature in recipe.cylindrical_features() {
        if feature.diameter < MIN_CENTERLINE_DIAMETER {
            continue;
        }
        for &view in views {
            let axis_view = view.vec_to_view_space(&feature.axis_dir);
            let center = project_point(view, &feature.center);

            if axis_view.z.abs() > 0.99 {
                // Seen end-on: crossed marks through the circle center.
                let h = CROSS_LENGTH / 2.0;
                result.push(CenterLine {
                    view,
                    segments: vec![
                        (
                            Point2D::new(center.x - h, center.y),
                            Point2D::new(center.x + h, center.y),
                        ),
                        (
                            Point2D::new(center.x, center.y - h),
                            Point2D::new(center.x, center.y + h),
                        ),
                    ],
                });
            } else {
                // Seen from the side: one axis line along the feature.
                let half = feature.length / 2.0;
                let end0 = Point3::new(
                    feature.center.x - feature.axis_dir.x * half,
                    feature.center.y - feature.axis_dir.y * half,
                    feature.center.z - feature.axis_dir.z * half,
                );
                let end1 = Point3::new(
                    feature.center.x + feature.axis_dir.x * half,
                    feature.center.y + feature.axis_dir.y * half,
                    feature.center.z + feature.axis_dir.z * half,
                );
                let p0 = project_point(view, &end0);
                let p1 = project_point(view, &end1);
                let len = p0.distance(&p1);
                if len < 1e-9 {
                    continue;
                }
                let dir = Point2D::new((p1.x - p0.x) / len, (p1.y - p0.y) / len);
                result.push(CenterLine {
                    view,
                    segments: vec![(
                        p0.offset(dir, -AXIS_OVERSHOOT),
                        p1.offset(dir, AXIS_OVERSHOOT),
                    )],
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use partdraft_ir::{PartRecipe, Primitive, PrimitiveKind, RecipeNode};

    fn lone_cylinder(radius: f64, height: f64) -> PartRecipe {
        PartRecipe::new(
            "shaft",
            vec![RecipeNode::Primitive(Primitive {
                id: 1,
                kind: PrimitiveKind::Cylinder { radius, height },
                transform: None,
            })],
            1,
        )
        .unwrap()
    }

    #[test]
    fn end_on_view_gets_crossed_marks() {
        // Z-axis cylinder: end-on in the front view under the fixed
        // projection matrices.
        let lines = generate_center_lines(&lone_cylinder(10.0, 40.0), &ViewDirection::ALL);
        assert_eq!(lines.len(), 3);

        let front = lines
            .iter()
            .find(|l| l.view == ViewDirection::Front)
            .unwrap();
        assert_eq!(front.segments.len(), 2);
        let (a, b) = front.segments[0];
        assert!((a.distance(&b) - CROSS_LENGTH).abs() < 1e-9);
    }

    #[test]
    fn side_view_gets_overshot_axis() {
        let lines = generate_center_lines(&lone_cylinder(10.0, 40.0), &ViewDirection::ALL);
        let top = lines.iter().find(|l| l.view == ViewDirection::Top).unwrap();
        assert_eq!(top.segments.len(), 1);
        let (a, b) = top.segments[0];
        // 40mm length plus 5mm overshoot at both ends.
        assert!((a.distance(&b) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn small_features_skipped() {
        let lines = generate_center_lines(&lone_cylinder(4.0, 20.0), &ViewDirection::ALL);
        assert!(lines.is_empty());
    }
}
