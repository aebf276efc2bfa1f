//! Core types shared across the drawing pipeline.

use partdraft_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// A 2D point in view or page space.
///
/// A custom type instead of nalgebra::Point2 so drafting output
/// serializes without nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Componentwise addition of a scaled direction.
    pub fn offset(&self, dir: Point2D, by: f64) -> Self {
        Self::new(self.x + dir.x * by, self.y + dir.y * by)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// One of the three orthographic views, first-angle convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewDirection {
    /// Front view: identity rotation.
    #[default]
    Front,
    /// Top view: -90 degrees about X.
    Top,
    /// Right view: +90 degrees about Y.
    Right,
}

impl ViewDirection {
    /// All three standard views in layout order.
    pub const ALL: [Self; 3] = [Self::Front, Self::Top, Self::Right];

    /// Rotate a model-space point into view space.
    ///
    /// The viewer looks along -Z in view space, so Z < 0 is in front of
    /// the view plane.
    pub fn to_view_space(&self, p: &Point3) -> Point3 {
        match self {
            ViewDirection::Front => *p,
            // R_x(-90): (x, y, z) -> (x, z, -y)
            ViewDirection::Top => Point3::new(p.x, p.z, -p.y),
            // R_y(+90): (x, y, z) -> (z, y, -x)
            ViewDirection::Right => Point3::new(p.z, p.y, -p.x),
        }
    }

    /// Rotate a model-space vector into view space.
    pub fn vec_to_view_space(&self, v: &Vec3) -> Vec3 {
        match self {
            ViewDirection::Front => *v,
            ViewDirection::Top => Vec3::new(v.x, v.z, -v.y),
            ViewDirection::Right => Vec3::new(v.z, v.y, -v.x),
        }
    }

    /// Unit vector from the scene toward the viewer, in model space.
    pub fn toward_viewer(&self) -> Vec3 {
        match self {
            ViewDirection::Front => Vec3::new(0.0, 0.0, 1.0),
            ViewDirection::Top => Vec3::new(0.0, -1.0, 0.0),
            ViewDirection::Right => Vec3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Direction of sight (viewer toward the scene), in model space.
    pub fn sight(&self) -> Vec3 {
        -self.toward_viewer()
    }

    /// Display label for view captions.
    pub fn label(&self) -> &'static str {
        match self {
            ViewDirection::Front => "FRONT",
            ViewDirection::Top => "TOP",
            ViewDirection::Right => "RIGHT",
        }
    }
}

/// Visibility of an edge in a projected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Edge is visible (unoccluded).
    Visible,
    /// Edge is hidden behind solid material.
    Hidden,
}

/// Geometric classification of a drawing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Dihedral angle between adjacent faces exceeds the sharp threshold,
    /// or the edge bounds only one face.
    Sharp,
    /// Separates a front-facing triangle from a back-facing one for the
    /// current view.
    Silhouette,
}

/// A 3D drawing edge before visibility classification.
#[derive(Debug, Clone, Copy)]
pub struct ExtractedEdge {
    /// Start point in model space (mm).
    pub start: Point3,
    /// End point in model space (mm).
    pub end: Point3,
    /// Why this edge is drawn.
    pub kind: EdgeKind,
}

/// A 3D drawing edge with per-view visibility resolved.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedEdge {
    /// Start point in model space (mm).
    pub start: Point3,
    /// End point in model space (mm).
    pub end: Point3,
    /// Why this edge is drawn.
    pub kind: EdgeKind,
    /// True when the majority of edge samples is unoccluded.
    pub visible: bool,
}

impl ClassifiedEdge {
    /// Midpoint of the edge.
    pub fn midpoint(&self) -> Point3 {
        Point3::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
            (self.start.z + self.end.z) / 2.0,
        )
    }
}

/// A projected 2D edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectedEdge {
    /// Start point in view coordinates (mm, Y down).
    pub start: Point2D,
    /// End point in view coordinates (mm, Y down).
    pub end: Point2D,
    /// Visibility classification.
    pub visibility: Visibility,
    /// Edge kind.
    pub kind: EdgeKind,
    /// View-space depth of the edge midpoint.
    pub depth: f64,
}

impl ProjectedEdge {
    /// Length of the edge in 2D.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox2D {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expand to include a point.
    pub fn include_point(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another box.
    pub fn include_box(&mut self, other: &BoundingBox2D) {
        if other.is_valid() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the box.
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether the box contains at least one point.
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Whether two boxes overlap when each is grown by `margin`.
    pub fn overlaps(&self, other: &BoundingBox2D, margin: f64) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min_x - margin < other.max_x + margin
            && other.min_x - margin < self.max_x + margin
            && self.min_y - margin < other.max_y + margin
            && other.min_y - margin < self.max_y + margin
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}

/// A complete projected view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedView {
    /// All projected edges.
    pub edges: Vec<ProjectedEdge>,
    /// 2D bounding box of the view content.
    pub bounds: BoundingBox2D,
    /// Which view this is.
    pub view: ViewDirection,
}

impl ProjectedView {
    /// Create an empty view.
    pub fn new(view: ViewDirection) -> Self {
        Self {
            edges: Vec::new(),
            bounds: BoundingBox2D::empty(),
            view,
        }
    }

    /// Add an edge and grow the bounds.
    pub fn add_edge(&mut self, edge: ProjectedEdge) {
        self.bounds.include_point(edge.start);
        self.bounds.include_point(edge.end);
        self.edges.push(edge);
    }

    /// Iterate over visible edges.
    pub fn visible_edges(&self) -> impl Iterator<Item = &ProjectedEdge> {
        self.edges
            .iter()
            .filter(|e| e.visibility == Visibility::Visible)
    }

    /// Iterate over hidden edges.
    pub fn hidden_edges(&self) -> impl Iterator<Item = &ProjectedEdge> {
        self.edges
            .iter()
            .filter(|e| e.visibility == Visibility::Hidden)
    }

    /// Number of visible edges.
    pub fn num_visible(&self) -> usize {
        self.visible_edges().count()
    }

    /// Number of hidden edges.
    pub fn num_hidden(&self) -> usize {
        self.hidden_edges().count()
    }
}

/// Winding direction of an ordered polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    /// Counter-clockwise (positive signed area).
    Ccw,
    /// Clockwise (negative signed area).
    Cw,
}

/// A closed section contour.
///
/// Invariant: `points.first()` and `points.last()` coincide within the
/// stitching tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionContour {
    /// Ordered loop vertices, explicitly closed.
    pub points: Vec<Point2D>,
    /// True for the outer boundary of a region; false for holes.
    pub is_outer: bool,
    /// Winding direction.
    pub winding: Winding,
}

impl SectionContour {
    /// Shoelace signed area (positive for counter-clockwise loops).
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }
}

/// Shoelace signed area over a closed point loop.
///
/// Works whether or not the final point repeats the first.
pub fn signed_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// Kind of section cut, for labeling and callouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CuttingPlaneKind {
    /// Single plane through the whole part.
    #[default]
    Full,
    /// Plane through half the part.
    Half,
    /// Stepped (offset) cut.
    Offset,
    /// Partial (broken-out) cut.
    Broken,
}

/// A section cutting plane.
///
/// Array representation for serialization compatibility with the
/// external generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuttingPlane {
    /// Section label, e.g. "A".
    pub label: String,
    /// Point on the plane `[x, y, z]`.
    pub position: [f64; 3],
    /// Plane normal `[x, y, z]`.
    pub normal: [f64; 3],
    /// Direction from which the section is viewed `[x, y, z]`.
    pub view_direction: [f64; 3],
    /// Cut kind (labeling only; slicing always uses the single plane).
    pub kind: CuttingPlaneKind,
    /// View the cutting-plane trace is drawn in.
    pub parent_view: ViewDirection,
}

impl CuttingPlane {
    /// A full section at the given X station, viewed along -X.
    pub fn at_x(label: impl Into<String>, x: f64) -> Self {
        Self {
            label: label.into(),
            position: [x, 0.0, 0.0],
            normal: [1.0, 0.0, 0.0],
            view_direction: [-1.0, 0.0, 0.0],
            kind: CuttingPlaneKind::Full,
            parent_view: ViewDirection::Front,
        }
    }

    /// A full section at the given Z station, viewed along -Z.
    pub fn at_z(label: impl Into<String>, z: f64) -> Self {
        Self {
            label: label.into(),
            position: [0.0, 0.0, z],
            normal: [0.0, 0.0, 1.0],
            view_direction: [0.0, 0.0, -1.0],
            kind: CuttingPlaneKind::Full,
            parent_view: ViewDirection::Front,
        }
    }

    /// Plane origin as a point.
    pub fn origin_point(&self) -> Point3 {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }

    /// Plane normal as a vector.
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::new(self.normal[0], self.normal[1], self.normal[2])
    }
}

/// Cross-hatch pattern for sectioned material.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HatchPattern {
    /// Hatch direction in degrees (45 is the general-purpose standard).
    pub angle_deg: f64,
    /// Perpendicular distance between hatch lines (mm).
    pub spacing_mm: f64,
    /// Stroke width of hatch lines (mm).
    pub line_width_mm: f64,
}

impl HatchPattern {
    /// General-purpose 45 degree hatch at 3mm spacing.
    pub const STANDARD_45: Self = Self {
        angle_deg: 45.0,
        spacing_mm: 3.0,
        line_width_mm: 0.25,
    };
}

impl Default for HatchPattern {
    fn default() -> Self {
        Self::STANDARD_45
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_space_conventions() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let front = ViewDirection::Front.to_view_space(&p);
        assert_eq!((front.x, front.y, front.z), (1.0, 2.0, 3.0));

        let top = ViewDirection::Top.to_view_space(&p);
        assert_eq!((top.x, top.y, top.z), (1.0, 3.0, -2.0));

        let right = ViewDirection::Right.to_view_space(&p);
        assert_eq!((right.x, right.y, right.z), (3.0, 2.0, -1.0));
    }

    #[test]
    fn sight_is_opposite_viewer() {
        for view in ViewDirection::ALL {
            let sum = view.sight() + view.toward_viewer();
            assert!(sum.norm() < 1e-12);
        }
    }

    #[test]
    fn bounding_box_overlap_margin() {
        let mut a = BoundingBox2D::empty();
        a.include_point(Point2D::new(0.0, 0.0));
        a.include_point(Point2D::new(10.0, 10.0));

        let mut b = BoundingBox2D::empty();
        b.include_point(Point2D::new(11.0, 0.0));
        b.include_point(Point2D::new(20.0, 10.0));

        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&b, 1.0));
    }

    #[test]
    fn shoelace_signs() {
        let ccw = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
        ];
        assert!((signed_area(&ccw) - 4.0).abs() < 1e-12);

        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!((signed_area(&cw) + 4.0).abs() < 1e-12);
    }
}
