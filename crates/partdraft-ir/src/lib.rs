#![warn(missing_docs)]

//! Part recipe representation for the partdraft drawing engine.
//!
//! A recipe is a DAG of primitive solids combined by boolean operations,
//! produced by an external generator. The drawing engine never evaluates
//! the booleans itself — meshing is a collaborator's job — but it reads
//! the graph for dimensioning, center lines, and the section fallback.
//!
//! The graph is an arena of nodes keyed by [`NodeId`]. Acyclicity and
//! reference validity are checked once at load time by
//! [`PartRecipe::validate`], not during traversal.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use partdraft_math::{Point3, Transform, Vec3 as MVec3};

mod error;
mod feature;

pub use error::{RecipeError, Result};
pub use feature::{Axis, CylindricalFeature};

/// Unique identifier for a node in the recipe graph.
pub type NodeId = u64;

/// 3D vector with f64 components (conventionally millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All-zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// All-one vector.
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    fn to_math(self) -> MVec3 {
        MVec3::new(self.x, self.y, self.z)
    }
}

/// A geometric primitive shape, centered at the origin in its local frame.
///
/// All lengths are millimetres. Cylinders, cones, and tori have their
/// axis along local Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Axis-aligned box.
    Box {
        /// Size along each axis.
        size: Vec3,
    },
    /// Cylinder along the Z axis.
    Cylinder {
        /// Radius of the cylinder.
        radius: f64,
        /// Height of the cylinder.
        height: f64,
    },
    /// Sphere.
    Sphere {
        /// Radius of the sphere.
        radius: f64,
    },
    /// Cone (or truncated cone) along the Z axis.
    Cone {
        /// Bottom radius.
        radius_bottom: f64,
        /// Top radius (0 for a point).
        radius_top: f64,
        /// Height of the cone.
        height: f64,
    },
    /// Torus with its ring in the XY plane.
    Torus {
        /// Distance from the torus center to the tube center.
        major_radius: f64,
        /// Tube radius.
        minor_radius: f64,
    },
}

impl PrimitiveKind {
    /// Local-frame axis-aligned bounding box as (min, max) corners.
    pub fn local_bounds(&self) -> (Point3, Point3) {
        let half = |x: f64, y: f64, z: f64| {
            (
                Point3::new(-x / 2.0, -y / 2.0, -z / 2.0),
                Point3::new(x / 2.0, y / 2.0, z / 2.0),
            )
        };
        match self {
            PrimitiveKind::Box { size } => half(size.x, size.y, size.z),
            PrimitiveKind::Cylinder { radius, height } => {
                half(radius * 2.0, radius * 2.0, *height)
            }
            PrimitiveKind::Sphere { radius } => half(radius * 2.0, radius * 2.0, radius * 2.0),
            PrimitiveKind::Cone {
                radius_bottom,
                radius_top,
                height,
            } => {
                let r = radius_bottom.max(*radius_top);
                half(r * 2.0, r * 2.0, *height)
            }
            PrimitiveKind::Torus {
                major_radius,
                minor_radius,
            } => {
                let r = major_radius + minor_radius;
                half(r * 2.0, r * 2.0, minor_radius * 2.0)
            }
        }
    }

    fn check_params(&self, id: NodeId) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v > 0.0 {
                Ok(())
            } else {
                Err(RecipeError::InvalidParam {
                    id,
                    what: format!("{name} must be positive, got {v}"),
                })
            }
        };
        match self {
            PrimitiveKind::Box { size } => {
                positive("size.x", size.x)?;
                positive("size.y", size.y)?;
                positive("size.z", size.z)
            }
            PrimitiveKind::Cylinder { radius, height } => {
                positive("radius", *radius)?;
                positive("height", *height)
            }
            PrimitiveKind::Sphere { radius } => positive("radius", *radius),
            PrimitiveKind::Cone {
                radius_bottom,
                radius_top,
                height,
            } => {
                positive("radius_bottom", *radius_bottom)?;
                if *radius_top < 0.0 {
                    return Err(RecipeError::InvalidParam {
                        id,
                        what: format!("radius_top must be non-negative, got {radius_top}"),
                    });
                }
                positive("height", *height)
            }
            PrimitiveKind::Torus {
                major_radius,
                minor_radius,
            } => {
                positive("major_radius", *major_radius)?;
                positive("minor_radius", *minor_radius)
            }
        }
    }
}

/// Placement of a primitive in the part frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    /// Translation in millimetres.
    pub position: Vec3,
    /// Euler rotation in degrees, applied X then Y then Z.
    pub rotation_deg: Vec3,
    /// Per-axis scale factors.
    pub scale: Vec3,
}

impl Default for PartTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_deg: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl PartTransform {
    /// The equivalent affine transform.
    pub fn to_transform(&self) -> Transform {
        Transform::placement(
            self.position.to_math(),
            self.rotation_deg.to_math(),
            self.scale.to_math(),
        )
    }
}

/// A primitive node: a shape plus an optional placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Unique identifier.
    pub id: NodeId,
    /// The shape and its parameters.
    #[serde(flatten)]
    pub kind: PrimitiveKind,
    /// Placement in the part frame (identity when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<PartTransform>,
}

impl Primitive {
    /// Effective placement transform (identity when none is set).
    pub fn placement(&self) -> Transform {
        self.transform
            .as_ref()
            .map(PartTransform::to_transform)
            .unwrap_or_default()
    }
}

/// Boolean combination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolOp {
    /// Union of target and tool.
    Union,
    /// Target minus tool.
    Subtract,
    /// Intersection of target and tool.
    Intersect,
}

/// A boolean operation node referencing two earlier nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier.
    pub id: NodeId,
    /// The boolean operator.
    pub op: BoolOp,
    /// The node being modified.
    pub target: NodeId,
    /// The node applied to the target.
    pub tool: NodeId,
}

/// A node in the recipe graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeNode {
    /// A leaf primitive.
    Primitive(Primitive),
    /// A boolean combination of two earlier nodes.
    Operation(Operation),
}

impl RecipeNode {
    /// The node's identifier.
    pub fn id(&self) -> NodeId {
        match self {
            RecipeNode::Primitive(p) => p.id,
            RecipeNode::Operation(o) => o.id,
        }
    }
}

/// A complete part recipe: the node arena plus the root node to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecipe {
    /// Human-readable part name (used in the title block).
    pub name: String,
    /// All nodes, keyed by id.
    pub nodes: HashMap<NodeId, RecipeNode>,
    /// Root node of the part.
    pub root: NodeId,
}

impl PartRecipe {
    /// Create a recipe from a node list. Runs [`Self::validate`].
    pub fn new(name: impl Into<String>, nodes: Vec<RecipeNode>, root: NodeId) -> Result<Self> {
        let recipe = Self {
            name: name.into(),
            nodes: nodes.into_iter().map(|n| (n.id(), n)).collect(),
            root,
        };
        recipe.validate()?;
        Ok(recipe)
    }

    /// Validate the graph: the root exists, all references resolve, the
    /// graph is acyclic, and primitive parameters are positive.
    pub fn validate(&self) -> Result<()> {
        if !self.nodes.contains_key(&self.root) {
            return Err(RecipeError::MissingNode(self.root));
        }
        for node in self.nodes.values() {
            match node {
                RecipeNode::Primitive(p) => p.kind.check_params(p.id)?,
                RecipeNode::Operation(op) => {
                    for child in [op.target, op.tool] {
                        if !self.nodes.contains_key(&child) {
                            return Err(RecipeError::MissingNode(child));
                        }
                    }
                }
            }
        }
        // DFS with tri-state marks to reject cycles.
        let mut state: HashMap<NodeId, u8> = HashMap::new();
        let mut stack = vec![(self.root, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                state.insert(id, 2);
                continue;
            }
            match state.get(&id) {
                Some(1) => return Err(RecipeError::Cycle(id)),
                Some(2) => continue,
                _ => {}
            }
            state.insert(id, 1);
            stack.push((id, true));
            if let Some(RecipeNode::Operation(op)) = self.nodes.get(&id) {
                for child in [op.target, op.tool] {
                    match state.get(&child) {
                        Some(1) => return Err(RecipeError::Cycle(child)),
                        Some(2) => {}
                        _ => stack.push((child, false)),
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: Self = serde_json::from_str(json)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Transform-aware bounding box of the part as (min, max) corners.
    ///
    /// Subtractions bound by their target alone; intersections by the
    /// smaller of the two operand boxes. This over-approximates the true
    /// result, which is what dimensioning and the section fallback need.
    pub fn bounding_box(&self) -> Result<(Point3, Point3)> {
        self.node_bounds(self.root)
    }

    fn node_bounds(&self, id: NodeId) -> Result<(Point3, Point3)> {
        let node = self.nodes.get(&id).ok_or(RecipeError::MissingNode(id))?;
        match node {
            RecipeNode::Primitive(p) => {
                let (lo, hi) = p.kind.local_bounds();
                let xform = p.placement();
                let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
                let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
                for corner in corners(lo, hi) {
                    let c = xform.apply_point(&corner);
                    min = Point3::new(min.x.min(c.x), min.y.min(c.y), min.z.min(c.z));
                    max = Point3::new(max.x.max(c.x), max.y.max(c.y), max.z.max(c.z));
                }
                Ok((min, max))
            }
            RecipeNode::Operation(op) => {
                let target = self.node_bounds(op.target)?;
                match op.op {
                    BoolOp::Subtract => Ok(target),
                    BoolOp::Union => {
                        let tool = self.node_bounds(op.tool)?;
                        Ok((
                            Point3::new(
                                target.0.x.min(tool.0.x),
                                target.0.y.min(tool.0.y),
                                target.0.z.min(tool.0.z),
                            ),
                            Point3::new(
                                target.1.x.max(tool.1.x),
                                target.1.y.max(tool.1.y),
                                target.1.z.max(tool.1.z),
                            ),
                        ))
                    }
                    BoolOp::Intersect => {
                        let tool = self.node_bounds(op.tool)?;
                        Ok((
                            Point3::new(
                                target.0.x.max(tool.0.x),
                                target.0.y.max(tool.0.y),
                                target.0.z.max(tool.0.z),
                            ),
                            Point3::new(
                                target.1.x.min(tool.1.x),
                                target.1.y.min(tool.1.y),
                                target.1.z.min(tool.1.z),
                            ),
                        ))
                    }
                }
            }
        }
    }
}

fn corners(lo: Point3, hi: Point3) -> [Point3; 8] {
    [
        Point3::new(lo.x, lo.y, lo.z),
        Point3::new(hi.x, lo.y, lo.z),
        Point3::new(lo.x, hi.y, lo.z),
        Point3::new(hi.x, hi.y, lo.z),
        Point3::new(lo.x, lo.y, hi.z),
        Point3::new(hi.x, lo.y, hi.z),
        Point3::new(lo.x, hi.y, hi.z),
        Point3::new(hi.x, hi.y, hi.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100x50x25 box with a 20mm hole through Z — the canonical test part.
    fn box_with_hole() -> PartRecipe {
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
        .expect("valid recipe")
    }

    #[test]
    fn roundtrip_json() {
        let recipe = box_with_hole();
        let json = recipe.to_json().expect("serialize");
        let restored = PartRecipe::from_json(&json).expect("deserialize");
        assert_eq!(recipe, restored);
    }

    #[test]
    fn bounding_box_subtract_uses_target() {
        let recipe = box_with_hole();
        let (min, max) = recipe.bounding_box().unwrap();
        assert!((min.x - (-50.0)).abs() < 1e-9);
        assert!((max.x - 50.0).abs() < 1e-9);
        assert!((max.y - 25.0).abs() < 1e-9);
        assert!((max.z - 12.5).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_respects_transform() {
        let recipe = PartRecipe::new(
            "offset box",
            vec![RecipeNode::Primitive(Primitive {
                id: 1,
                kind: PrimitiveKind::Box {
                    size: Vec3::new(10.0, 10.0, 10.0),
                },
                transform: Some(PartTransform {
                    position: Vec3::new(100.0, 0.0, 0.0),
                    ..Default::default()
                }),
            })],
            1,
        )
        .unwrap();
        let (min, max) = recipe.bounding_box().unwrap();
        assert!((min.x - 95.0).abs() < 1e-9);
        assert!((max.x - 105.0).abs() < 1e-9);
    }

    #[test]
    fn missing_reference_rejected() {
        let err = PartRecipe::new(
            "broken",
            vec![RecipeNode::Operation(Operation {
                id: 1,
                op: BoolOp::Union,
                target: 98,
                tool: 99,
            })],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, RecipeError::MissingNode(_)));
    }

    #[test]
    fn cycle_rejected() {
        let recipe = PartRecipe {
            name: "cyclic".into(),
            nodes: [
                (
                    1,
                    RecipeNode::Operation(Operation {
                        id: 1,
                        op: BoolOp::Union,
                        target: 2,
                        tool: 2,
                    }),
                ),
                (
                    2,
                    RecipeNode::Operation(Operation {
                        id: 2,
                        op: BoolOp::Union,
                        target: 1,
                        tool: 1,
                    }),
                ),
            ]
            .into_iter()
            .collect(),
            root: 1,
        };
        assert!(matches!(recipe.validate(), Err(RecipeError::Cycle(_))));
    }

    #[test]
    fn negative_param_rejected() {
        let err = PartRecipe::new(
            "bad",
            vec![RecipeNode::Primitive(Primitive {
                id: 1,
                kind: PrimitiveKind::Cylinder {
                    radius: -1.0,
                    height: 5.0,
                },
                transform: None,
            })],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, RecipeError::InvalidParam { .. }));
    }

    #[test]
    fn serde_tagged_kind() {
        let kind = PrimitiveKind::Cylinder {
            radius: 3.0,
            height: 40.0,
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains(r#""kind":"cylinder""#));
        let restored: PrimitiveKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, restored);
    }
}
