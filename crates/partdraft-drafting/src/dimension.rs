//! Dimension generation and collision resolution.
//!
//! Dimensions are generated in priority order: the six bounding-box
//! dimensions (width and height per view) first, then one diameter
//! dimension per cylindrical/conical feature large enough to matter,
//! placed in the view its axis is perpendicular to.
//!
//! Geometry follows ISO 129-1: extension lines leave a 2mm gap at the
//! feature and overhang the dimension line by 3mm; arrowheads are filled
//! 3x1mm triangles pointing into the measured span; texts drop trailing
//! zeros. Collisions are resolved per view by a bounded relocation loop.

use serde::{Deserialize, Serialize};

use partdraft_ir::PartRecipe;

use crate::centerline::MIN_CENTERLINE_DIAMETER;
use crate::diag::Diagnostics;
use crate::projection::project_point;
use crate::types::{BoundingBox2D, Point2D, ProjectedView, ViewDirection};

/// Tunable dimensioning parameters (all lengths in mm).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DimensionConfig {
    /// Features with a diameter under this are noise and get no dimension.
    pub min_feature_diameter: f64,
    /// Initial offset of a dimension line from the outline.
    pub base_offset: f64,
    /// Offset increment used when relocating a colliding dimension.
    pub spacing_increment: f64,
    /// Gap between the feature and the start of an extension line.
    pub ext_gap: f64,
    /// Extension-line overhang past the dimension line.
    pub ext_overhang: f64,
    /// Arrowhead length.
    pub arrow_length: f64,
    /// Arrowhead width.
    pub arrow_width: f64,
    /// Dimension text height.
    pub text_height: f64,
    /// Initial radial leader length past the circle.
    pub leader_length: f64,
    /// Margin added around boxes during overlap tests.
    pub collision_margin: f64,
    /// Relocation attempts before a dimension is accepted as-is.
    pub max_attempts: u32,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            min_feature_diameter: 1.0,
            base_offset: 8.0,
            spacing_increment: 6.0,
            ext_gap: 2.0,
            ext_overhang: 3.0,
            arrow_length: 3.0,
            arrow_width: 1.0,
            text_height: 3.5,
            leader_length: 5.0,
            collision_margin: 1.0,
            max_attempts: 10,
        }
    }
}

/// Priority of bounding-box dimensions (resolved first).
pub const BOUNDS_PRIORITY: u8 = 10;
/// Priority of feature dimensions.
pub const FEATURE_PRIORITY: u8 = 5;

/// Measurement direction of a linear dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Measures along page X.
    Horizontal,
    /// Measures along page Y.
    Vertical,
    /// Measures along an arbitrary direction.
    Aligned,
}

/// Subtype of a radial dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadialKind {
    /// Radius ("R") dimension.
    Radius,
    /// Diameter dimension.
    Diameter,
}

/// Fields shared by every dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionBase {
    /// Stable identifier (generation order).
    pub id: u32,
    /// Measured value in real millimetres.
    pub value: f64,
    /// Formatted display text.
    pub text: String,
    /// View this dimension belongs to.
    pub view: ViewDirection,
    /// Collision-resolution priority, higher first.
    pub priority: u8,
}

/// A dimension annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Dimension {
    /// Distance between two points, measured along an axis.
    Linear {
        /// Shared fields.
        base: DimensionBase,
        /// Measurement direction.
        orientation: Orientation,
        /// First measured endpoint.
        p0: Point2D,
        /// Second measured endpoint.
        p1: Point2D,
        /// Unit normal the dimension line is offset along.
        normal: Point2D,
        /// Current offset of the dimension line from the feature.
        offset: f64,
    },
    /// Radius or diameter of a circular feature.
    Radial {
        /// Shared fields.
        base: DimensionBase,
        /// Radius or diameter.
        kind: RadialKind,
        /// Circle center in view coordinates.
        center: Point2D,
        /// Circle radius in view coordinates.
        radius: f64,
        /// Current leader length past the circle.
        leader_len: f64,
        /// Draw a small center mark (for features without center lines).
        center_mark: bool,
    },
    /// Angle between two directions at a vertex.
    Angular {
        /// Shared fields.
        base: DimensionBase,
        /// Angle vertex in view coordinates.
        vertex: Point2D,
        /// Current arc radius.
        radius: f64,
        /// Arc start angle in degrees.
        start_deg: f64,
        /// Arc end angle in degrees.
        end_deg: f64,
    },
}

/// A filled triangular arrowhead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arrowhead {
    /// Tip position.
    pub tip: Point2D,
    /// Unit direction from the tip toward the arrow body.
    pub dir: Point2D,
}

impl Arrowhead {
    /// The three corners of the filled triangle.
    pub fn triangle(&self, length: f64, width: f64) -> [Point2D; 3] {
        let back = self.tip.offset(self.dir, length);
        let perp = Point2D::new(-self.dir.y, self.dir.x);
        [
            self.tip,
            back.offset(perp, width / 2.0),
            back.offset(perp, -width / 2.0),
        ]
    }
}

/// A positioned dimension text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLabel {
    /// Anchor position (text centered here).
    pub pos: Point2D,
    /// Text content.
    pub text: String,
    /// Text height in mm.
    pub height: f64,
}

impl TextLabel {
    /// Approximate footprint of the rendered text.
    pub fn footprint(&self) -> BoundingBox2D {
        let half_w = self.text.chars().count() as f64 * self.height * 0.6 / 2.0;
        let half_h = self.height / 2.0;
        BoundingBox2D {
            min_x: self.pos.x - half_w,
            min_y: self.pos.y - half_h,
            max_x: self.pos.x + half_w,
            max_y: self.pos.y + half_h,
        }
    }
}

/// Renderable pieces of one dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionGeometry {
    /// Dimension, leader, extension, and mark line segments.
    pub lines: Vec<(Point2D, Point2D)>,
    /// Filled arrowheads.
    pub arrows: Vec<Arrowhead>,
    /// The value text.
    pub text: TextLabel,
}

/// Format a millimetre value: no decimals from 10mm up, otherwise one
/// decimal unless it is ".0".
pub fn format_mm(value: f64) -> String {
    if value >= 10.0 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.1}");
        s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
    }
}

const LEADER_DIR: Point2D = Point2D {
    x: std::f64::consts::FRAC_1_SQRT_2,
    y: -std::f64::consts::FRAC_1_SQRT_2,
};
const LANDING_LEN: f64 = 4.0;

impl Dimension {
    /// Shared fields.
    pub fn base(&self) -> &DimensionBase {
        match self {
            Dimension::Linear { base, .. }
            | Dimension::Radial { base, .. }
            | Dimension::Angular { base, .. } => base,
        }
    }

    /// The view this dimension is drawn in.
    pub fn view(&self) -> ViewDirection {
        self.base().view
    }

    /// Move the dimension one spacing increment further out.
    ///
    /// Linear dimensions grow their perpendicular offset, radial ones
    /// extend the leader, angular ones grow the arc radius.
    pub fn relocate(&mut self, increment: f64) {
        match self {
            Dimension::Linear { offset, .. } => *offset += increment,
            Dimension::Radial { leader_len, .. } => *leader_len += increment,
            Dimension::Angular { radius, .. } => *radius += increment,
        }
    }

    fn text_label(&self, cfg: &DimensionConfig) -> TextLabel {
        let base = self.base();
        let pos = match self {
            Dimension::Linear {
                p0,
                p1,
                normal,
                offset,
                ..
            } => {
                let mid = Point2D::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0);
                mid.offset(*normal, *offset)
            }
            Dimension::Radial {
                center,
                radius,
                leader_len,
                ..
            } => {
                let tail = center.offset(LEADER_DIR, radius + leader_len);
                let half_text =
                    base.text.chars().count() as f64 * cfg.text_height * 0.6 / 2.0;
                Point2D::new(tail.x + LANDING_LEN + half_text, tail.y)
            }
            Dimension::Angular {
                vertex,
                radius,
                start_deg,
                end_deg,
                ..
            } => {
                let a = ((start_deg + end_deg) / 2.0).to_radians();
                vertex.offset(Point2D::new(a.cos(), -a.sin()), radius + 2.0)
            }
        };
        TextLabel {
            pos,
            text: base.text.clone(),
            height: cfg.text_height,
        }
    }

    /// Full bounding box used for overlap testing: dimension/leader line
    /// plus text footprint. Extension lines are excluded — drafting
    /// convention lets them cross.
    pub fn collision_box(&self, cfg: &DimensionConfig) -> BoundingBox2D {
        let mut bb = BoundingBox2D::empty();
        match self {
            Dimension::Linear {
                p0,
                p1,
                normal,
                offset,
                ..
            } => {
                bb.include_point(p0.offset(*normal, *offset));
                bb.include_point(p1.offset(*normal, *offset));
            }
            Dimension::Radial {
                center,
                radius,
                leader_len,
                ..
            } => {
                bb.include_point(center.offset(LEADER_DIR, *radius));
                let tail = center.offset(LEADER_DIR, radius + leader_len);
                bb.include_point(tail);
                bb.include_point(Point2D::new(tail.x + LANDING_LEN, tail.y));
            }
            Dimension::Angular { vertex, radius, .. } => {
                bb.include_point(Point2D::new(vertex.x - radius, vertex.y - radius));
                bb.include_point(Point2D::new(vertex.x + radius, vertex.y + radius));
            }
        }
        bb.include_box(&self.text_label(cfg).footprint());
        bb
    }

    /// Renderable geometry at the current placement.
    pub fn geometry(&self, cfg: &DimensionConfig) -> DimensionGeometry {
        let mut lines = Vec::new();
        let mut arrows = Vec::new();
        match self {
            Dimension::Linear {
                p0,
                p1,
                normal,
                offset,
                ..
            } => {
                let a = p0.offset(*normal, *offset);
                let b = p1.offset(*normal, *offset);
                // Extension lines: gap at the feature, overhang past the line.
                lines.push((
                    p0.offset(*normal, cfg.ext_gap),
                    p0.offset(*normal, offset + cfg.ext_overhang),
                ));
                lines.push((
                    p1.offset(*normal, cfg.ext_gap),
                    p1.offset(*normal, offset + cfg.ext_overhang),
                ));
                lines.push((a, b));
                let len = a.distance(&b).max(1e-9);
                let dir = Point2D::new((b.x - a.x) / len, (b.y - a.y) / len);
                arrows.push(Arrowhead { tip: a, dir });
                arrows.push(Arrowhead {
                    tip: b,
                    dir: Point2D::new(-dir.x, -dir.y),
                });
            }
            Dimension::Radial {
                center,
                radius,
                leader_len,
                center_mark,
                ..
            } => {
                let on_circle = center.offset(LEADER_DIR, *radius);
                let tail = center.offset(LEADER_DIR, radius + leader_len);
                let landing = Point2D::new(tail.x + LANDING_LEN, tail.y);
                lines.push((on_circle, tail));
                lines.push((tail, landing));
                arrows.push(Arrowhead {
                    tip: on_circle,
                    dir: LEADER_DIR,
                });
                if *center_mark {
                    let m = 2.0;
                    lines.push((
                        Point2D::new(center.x - m, center.y),
                        Point2D::new(center.x + m, center.y),
                    ));
                    lines.push((
                        Point2D::new(center.x, center.y - m),
                        Point2D::new(center.x, center.y + m),
                    ));
                }
            }
            Dimension::Angular {
                vertex,
                radius,
                start_deg,
                end_deg,
                ..
            } => {
                // Arc approximated as a polyline; page Y grows downward.
                let steps = 24;
                let mut prev: Option<Point2D> = None;
                for i in 0..=steps {
                    let t = *start_deg + (end_deg - start_deg) * i as f64 / steps as f64;
                    let a = t.to_radians();
                    let p = vertex.offset(Point2D::new(a.cos(), -a.sin()), *radius);
                    if let Some(q) = prev {
                        lines.push((q, p));
                    }
                    prev = Some(p);
                }
                for (angle, sign) in [(*start_deg, 1.0), (*end_deg, -1.0)] {
                    let a = angle.to_radians();
                    let tip = vertex.offset(Point2D::new(a.cos(), -a.sin()), *radius);
                    // Tangent direction, into the arc.
                    let dir = Point2D::new(-a.sin() * sign, -a.cos() * sign);
                    arrows.push(Arrowhead { tip, dir });
                }
            }
        }
        DimensionGeometry {
            lines,
            arrows,
            text: self.text_label(cfg),
        }
    }
}

/// Generate bounding-box and feature dimensions for all views.
///
/// Bounding-box dimensions measure each view's projected extents; the
/// width dimension sits below the outline, the height dimension to its
/// left. Feature diameters go to the view their axis is perpendicular to.
pub fn generate_dimensions(
    recipe: &PartRecipe,
    views: &[ProjectedView],
    cfg: &DimensionConfig,
) -> Vec<Dimension> {
    let mut dims = Vec::new();
    let mut next_id = 0u32;
    let mut base = |value: f64, text: String, view: ViewDirection, priority: u8| {
        let b = DimensionBase {
            id: next_id,
            value,
            text,
            view,
            priority,
        };
        next_id += 1;
        b
    };

    for view in views {
        let bounds = view.bounds;
        if !bounds.is_valid() {
            continue;
        }
        let width = bounds.width();
        let height = bounds.height();
        // Width below the view (page Y grows downward).
        dims.push(Dimension::Linear {
            base: base(width, format_mm(width), view.view, BOUNDS_PRIORITY),
            orientation: Orientation::Horizontal,
            p0: Point2D::new(bounds.min_x, bounds.max_y),
            p1: Point2D::new(bounds.max_x, bounds.max_y),
            normal: Point2D::new(0.0, 1.0),
            offset: cfg.base_offset,
        });
        // Height to the left of the view.
        dims.push(Dimension::Linear {
            base: base(height, format_mm(height), view.view, BOUNDS_PRIORITY),
            orientation: Orientation::Vertical,
            p0: Point2D::new(bounds.min_x, bounds.min_y),
            p1: Point2D::new(bounds.min_x, bounds.max_y),
            normal: Point2D::new(-1.0, 0.0),
            offset: cfg.base_offset,
        });
    }

    for feature in recipe.cylindrical_features() {
        if feature.diameter < cfg.min_feature_diameter {
            continue;
        }
        // The view whose plane the feature axis is perpendicular to.
        let Some(view) = views.iter().find(|v| {
            v.view.vec_to_view_space(&feature.axis_dir).z.abs() > 0.99
        }) else {
            continue;
        };
        let center = project_point(view.view, &feature.center);
        let text = format!("\u{2300}{}", format_mm(feature.diameter));
        dims.push(Dimension::Radial {
            base: base(feature.diameter, text, view.view, FEATURE_PRIORITY),
            kind: RadialKind::Diameter,
            center,
            radius: feature.diameter / 2.0,
            leader_len: cfg.leader_length,
            // Small features get no center line, so carry a mark here.
            center_mark: feature.diameter < MIN_CENTERLINE_DIAMETER,
        });
    }

    dims
}

/// Resolve overlaps per view by priority-ordered bounded relocation.
///
/// Each dimension is tested against every already-accepted box (grown by
/// the collision margin); on overlap it is relocated by one increment and
/// re-tested, up to the attempt budget, after which it is accepted at its
/// last position and counted in the diagnostics.
pub fn resolve_collisions(dims: &mut [Dimension], cfg: &DimensionConfig, diag: &mut Diagnostics) {
    for view in ViewDirection::ALL {
        let mut order: Vec<usize> = (0..dims.len())
            .filter(|&i| dims[i].view() == view)
            .collect();
        order.sort_by_key(|&i| (std::cmp::Reverse(dims[i].base().priority), dims[i].base().id));

        let mut accepted: Vec<BoundingBox2D> = Vec::new();
        for idx in order {
            let mut attempts = 0u32;
            loop {
                let bb = dims[idx].collision_box(cfg);
                let collides = accepted
                    .iter()
                    .any(|other| bb.overlaps(other, cfg.collision_margin));
                if !collides {
                    accepted.push(bb);
                    break;
                }
                if attempts >= cfg.max_attempts {
                    // Give up but keep the dimension; layout quality
                    // issue, not a failure.
                    accepted.push(bb);
                    diag.unresolved_dimensions += 1;
                    break;
                }
                dims[idx].relocate(cfg.spacing_increment);
                attempts += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeKind, ProjectedEdge, Visibility};
    use partdraft_ir::{
        BoolOp, Operation, PartRecipe, Primitive, PrimitiveKind, RecipeNode, Vec3,
    };

    fn plate_recipe() -> PartRecipe {
        PartRecipe::new(
            "plate",
            vec![
                RecipeNode::Primitive(Primitive {
                    id: 1,
                    kind: PrimitiveKind::Box {
                        size: Vec3::new(100.0, 50.0, 25.0),
                    },
                    transform: None,
                }),
                RecipeNode::Primitive(Primitive {
                    id: 2,
                    kind: PrimitiveKind::Cylinder {
                        radius: 10.0,
                        height: 30.0,
                    },
                    transform: None,
                }),
                RecipeNode::Operation(Operation {
                    id: 3,
                    op: BoolOp::Subtract,
                    target: 1,
                    tool: 2,
                }),
            ],
            3,
        )
        .unwrap()
    }

    fn rect_view(view: ViewDirection, w: f64, h: f64) -> ProjectedView {
        let mut pv = ProjectedView::new(view);
        let corners = [
            Point2D::new(-w / 2.0, -h / 2.0),
            Point2D::new(w / 2.0, -h / 2.0),
            Point2D::new(w / 2.0, h / 2.0),
            Point2D::new(-w / 2.0, h / 2.0),
        ];
        for i in 0..4 {
            pv.add_edge(ProjectedEdge {
                start: corners[i],
                end: corners[(i + 1) % 4],
                visibility: Visibility::Visible,
                kind: EdgeKind::Sharp,
                depth: 0.0,
            });
        }
        pv
    }

    fn three_views() -> Vec<ProjectedView> {
        vec![
            rect_view(ViewDirection::Front, 100.0, 50.0),
            rect_view(ViewDirection::Top, 100.0, 25.0),
            rect_view(ViewDirection::Right, 25.0, 50.0),
        ]
    }

    #[test]
    fn formats_drop_trailing_zeros() {
        assert_eq!(format_mm(25.0), "25");
        assert_eq!(format_mm(25.4), "25");
        assert_eq!(format_mm(9.5), "9.5");
        assert_eq!(format_mm(8.0), "8");
        assert_eq!(format_mm(0.5), "0.5");
    }

    #[test]
    fn plate_gets_six_bounds_and_one_diameter() {
        let cfg = DimensionConfig::default();
        let dims = generate_dimensions(&plate_recipe(), &three_views(), &cfg);

        let bounds = dims
            .iter()
            .filter(|d| d.base().priority == BOUNDS_PRIORITY)
            .count();
        let radial = dims
            .iter()
            .filter(|d| matches!(d, Dimension::Radial { .. }))
            .count();
        assert_eq!(bounds, 6);
        assert_eq!(radial, 1);

        let dia = dims
            .iter()
            .find(|d| matches!(d, Dimension::Radial { .. }))
            .unwrap();
        assert_eq!(dia.base().text, "\u{2300}20");
        // Hole axis is Z; the Z axis maps to view depth in the front view.
        assert_eq!(dia.view(), ViewDirection::Front);
    }

    #[test]
    fn tiny_features_skipped() {
        let recipe = PartRecipe::new(
            "pin",
            vec![RecipeNode::Primitive(Primitive {
                id: 1,
                kind: PrimitiveKind::Cylinder {
                    radius: 0.3,
                    height: 5.0,
                },
                transform: None,
            })],
            1,
        )
        .unwrap();
        let cfg = DimensionConfig::default();
        let dims = generate_dimensions(&recipe, &three_views(), &cfg);
        assert!(dims
            .iter()
            .all(|d| !matches!(d, Dimension::Radial { .. })));
    }

    #[test]
    fn linear_geometry_follows_iso_offsets() {
        let cfg = DimensionConfig::default();
        let dim = Dimension::Linear {
            base: DimensionBase {
                id: 0,
                value: 100.0,
                text: "100".into(),
                view: ViewDirection::Front,
                priority: BOUNDS_PRIORITY,
            },
            orientation: Orientation::Horizontal,
            p0: Point2D::new(0.0, 25.0),
            p1: Point2D::new(100.0, 25.0),
            normal: Point2D::new(0.0, 1.0),
            offset: 8.0,
        };
        let geo = dim.geometry(&cfg);
        // Two extension lines plus the dimension line.
        assert_eq!(geo.lines.len(), 3);
        let (ext_start, ext_end) = geo.lines[0];
        assert!((ext_start.y - 27.0).abs() < 1e-9); // 2mm gap
        assert!((ext_end.y - 36.0).abs() < 1e-9); // 8mm offset + 3mm overhang
        assert_eq!(geo.arrows.len(), 2);
        // Arrows point toward each other.
        assert!(geo.arrows[0].dir.x > 0.0);
        assert!(geo.arrows[1].dir.x < 0.0);
    }

    #[test]
    fn arrowhead_triangle_proportions() {
        let arrow = Arrowhead {
            tip: Point2D::new(0.0, 0.0),
            dir: Point2D::new(1.0, 0.0),
        };
        let [tip, a, b] = arrow.triangle(3.0, 1.0);
        assert!((tip.x).abs() < 1e-12);
        assert!((a.x - 3.0).abs() < 1e-12);
        assert!(((a.y - b.y).abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collision_resolution_separates_boxes() {
        let cfg = DimensionConfig::default();
        let mut diag = Diagnostics::default();
        // Two stacked horizontal dimensions over the same span collide at
        // the same offset.
        let mk = |id: u32, priority: u8| Dimension::Linear {
            base: DimensionBase {
                id,
                value: 50.0,
                text: "50".into(),
                view: ViewDirection::Front,
                priority,
            },
            orientation: Orientation::Horizontal,
            p0: Point2D::new(0.0, 10.0),
            p1: Point2D::new(50.0, 10.0),
            normal: Point2D::new(0.0, 1.0),
            offset: cfg.base_offset,
        };
        let mut dims = vec![mk(0, BOUNDS_PRIORITY), mk(1, FEATURE_PRIORITY)];
        resolve_collisions(&mut dims, &cfg, &mut diag);

        assert_eq!(diag.unresolved_dimensions, 0);
        let boxes: Vec<_> = dims.iter().map(|d| d.collision_box(&cfg)).collect();
        assert!(!boxes[0].overlaps(&boxes[1], cfg.collision_margin));
        // The lower-priority dimension moved; the higher one did not.
        match (&dims[0], &dims[1]) {
            (
                Dimension::Linear { offset: o0, .. },
                Dimension::Linear { offset: o1, .. },
            ) => {
                assert!((o0 - cfg.base_offset).abs() < 1e-9);
                assert!(*o1 > cfg.base_offset);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn exhausted_relocation_is_flagged_not_dropped() {
        let cfg = DimensionConfig {
            spacing_increment: 0.0, // relocation cannot help
            ..Default::default()
        };
        let mut diag = Diagnostics::default();
        let mk = |id: u32| Dimension::Linear {
            base: DimensionBase {
                id,
                value: 50.0,
                text: "50".into(),
                view: ViewDirection::Front,
                priority: BOUNDS_PRIORITY,
            },
            orientation: Orientation::Horizontal,
            p0: Point2D::new(0.0, 10.0),
            p1: Point2D::new(50.0, 10.0),
            normal: Point2D::new(0.0, 1.0),
            offset: cfg.base_offset,
        };
        let mut dims = vec![mk(0), mk(1)];
        resolve_collisions(&mut dims, &cfg, &mut diag);
        assert_eq!(dims.len(), 2);
        assert_eq!(diag.unresolved_dimensions, 1);
    }

    #[test]
    fn relocation_kinds() {
        let mut radial = Dimension::Radial {
            base: DimensionBase {
                id: 0,
                value: 20.0,
                text: "\u{2300}20".into(),
                view: ViewDirection::Front,
                priority: FEATURE_PRIORITY,
            },
            kind: RadialKind::Diameter,
            center: Point2D::ORIGIN,
            radius: 10.0,
            leader_len: 5.0,
            center_mark: false,
        };
        radial.relocate(6.0);
        match &radial {
            Dimension::Radial { leader_len, .. } => assert!((leader_len - 11.0).abs() < 1e-9),
            _ => unreachable!(),
        }

        let mut angular = Dimension::Angular {
            base: DimensionBase {
                id: 1,
                value: 45.0,
                text: "45\u{00b0}".into(),
                view: ViewDirection::Front,
                priority: FEATURE_PRIORITY,
            },
            vertex: Point2D::ORIGIN,
            radius: 10.0,
            start_deg: 0.0,
            end_deg: 45.0,
        };
        angular.relocate(6.0);
        match &angular {
            Dimension::Angular { radius, .. } => assert!((radius - 16.0).abs() < 1e-9),
            _ => unreachable!(),
        }
        let geo = angular.geometry(&DimensionConfig::default());
        assert_eq!(geo.arrows.len(), 2);
        assert!(geo.lines.len() >= 24);
    }
}
