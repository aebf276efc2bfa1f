//! Feature queries over the recipe graph.
//!
//! The dimension engine and center-line generator do not work on meshes;
//! they read cylindrical/conical features straight from the recipe, with
//! the boolean context resolved (a cylinder used as a subtraction tool is
//! a hole, not a boss).

use std::collections::HashSet;

use partdraft_math::{Point3, Vec3};

use crate::{BoolOp, NodeId, PartRecipe, PrimitiveKind, RecipeNode};

/// A principal axis of the part frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::new(1.0, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, 1.0, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// A cylindrical or conical feature with its boolean context resolved.
#[derive(Debug, Clone)]
pub struct CylindricalFeature {
    /// Source primitive id.
    pub id: NodeId,
    /// Center of the feature in the part frame.
    pub center: Point3,
    /// Unit axis direction in the part frame.
    pub axis_dir: Vec3,
    /// The principal axis the feature is aligned with, if any.
    pub axis: Option<Axis>,
    /// Feature diameter in mm (bottom diameter for cones).
    pub diameter: f64,
    /// Extruded length along the axis in mm.
    pub length: f64,
    /// True when the feature is a hole (reached through a subtract tool).
    pub subtractive: bool,
}

const AXIS_ALIGN_TOL: f64 = 1e-3;

impl PartRecipe {
    /// Collect all cylindrical/conical features reachable from the root.
    ///
    /// Shared nodes are reported once; the first boolean context
    /// encountered wins.
    pub fn cylindrical_features(&self) -> Vec<CylindricalFeature> {
        let mut seen = HashSet::new();
        let mut features = Vec::new();
        self.collect_features(self.root, false, &mut seen, &mut features);
        features
    }

    fn collect_features(
        &self,
        id: NodeId,
        subtractive: bool,
        seen: &mut HashSet<NodeId>,
        out: &mut Vec<CylindricalFeature>,
    ) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match node {
            RecipeNode::Operation(op) => {
                self.collect_features(op.target, subtractive, seen, out);
                let tool_subtractive = match op.op {
                    BoolOp::Subtract => true,
                    BoolOp::Union | BoolOp::Intersect => subtractive,
                };
                self.collect_features(op.tool, tool_subtractive, seen, out);
            }
            RecipeNode::Primitive(p) => {
                if !seen.insert(id) {
                    return;
                }
                let (radius, height) = match &p.kind {
                    PrimitiveKind::Cylinder { radius, height } => (*radius, *height),
                    PrimitiveKind::Cone {
                        radius_bottom,
                        height,
                        ..
                    } => (*radius_bottom, *height),
                    _ => return,
                };
                let xform = p.placement();
                let center = xform.apply_point(&Point3::origin());
                let scale = p
                    .transform
                    .map(|t| t.scale)
                    .unwrap_or(crate::Vec3::ONE);
                let axis_vec = xform.apply_vec(&Vec3::new(0.0, 0.0, 1.0));
                let axis_dir = if axis_vec.norm() > 0.0 {
                    axis_vec.normalize()
                } else {
                    Vec3::new(0.0, 0.0, 1.0)
                };
                out.push(CylindricalFeature {
                    id,
                    center,
                    axis_dir,
                    axis: principal_axis(&axis_dir),
                    diameter: radius * 2.0 * scale.x.abs().max(scale.y.abs()),
                    length: height * scale.z.abs(),
                    subtractive,
                });
            }
        }
    }
}

/// The principal axis a unit direction is aligned with, if any.
fn principal_axis(dir: &Vec3) -> Option<Axis> {
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        if dir.dot(&axis.unit()).abs() > 1.0 - AXIS_ALIGN_TOL {
            return Some(axis);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Operation, PartTransform, Primitive, Vec3 as IrVec3};

    fn plate_with_holes() -> PartRecipe {
        PartRecipe::new(
            "plate",
            vec![
                RecipeNode::Primitive(Primitive {
                    id: 1,
                    kind: PrimitiveKind::Box {
                        size: IrVec3::new(80.0, 40.0, 10.0),
                    },
                    transform: None,
                }),
                RecipeNode::Primitive(Primitive {
                    id: 2,
                    kind: PrimitiveKind::Cylinder {
                        radius: 6.0,
                        height: 12.0,
                    },
                    transform: Some(PartTransform {
                        position: IrVec3::new(-25.0, 0.0, 0.0),
                        ..Default::default()
                    }),
                }),
                RecipeNode::Primitive(Primitive {
                    id: 3,
                    kind: PrimitiveKind::Cylinder {
                        radius: 8.0,
                        height: 20.0,
                    },
                    transform: Some(PartTransform {
                        position: IrVec3::new(25.0, 0.0, 0.0),
                        rotation_deg: IrVec3::new(90.0, 0.0, 0.0),
                        scale: IrVec3::ONE,
                    }),
                }),
                RecipeNode::Operation(Operation {
                    id: 4,
                    op: BoolOp::Subtract,
                    target: 1,
                    tool: 2,
                }),
                RecipeNode::Operation(Operation {
                    id: 5,
                    op: BoolOp::Union,
                    target: 4,
                    tool: 3,
                }),
            ],
            5,
        )
        .unwrap()
    }

    #[test]
    fn finds_holes_and_bosses() {
        let features = plate_with_holes().cylindrical_features();
        assert_eq!(features.len(), 2);

        let hole = features.iter().find(|f| f.id == 2).unwrap();
        assert!(hole.subtractive);
        assert_eq!(hole.axis, Some(Axis::Z));
        assert!((hole.diameter - 12.0).abs() < 1e-9);

        let boss = features.iter().find(|f| f.id == 3).unwrap();
        assert!(!boss.subtractive);
        // Rotated 90 degrees about X: local Z maps to -Y.
        assert_eq!(boss.axis, Some(Axis::Y));
        assert!((boss.center.x - 25.0).abs() < 1e-9);
    }

    #[test]
    fn skips_non_cylindrical() {
        let recipe = PartRecipe::new(
            "ball",
            vec![RecipeNode::Primitive(Primitive {
                id: 1,
                kind: PrimitiveKind::Sphere { radius: 5.0 },
                transform: None,
            })],
            1,
        )
        .unwrap();
        assert!(recipe.cylindrical_features().is_empty());
    }
}
