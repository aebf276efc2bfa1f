//! Generate the drawing of a drilled plate and export SVG + DXF.
//!
//! Run with: `cargo run --example drilled_plate`

use anyhow::Result;

use partdraft::{generate_drawing, DrawingConfig, LineStyleTable};
use partdraft_drafting::{CuttingPlane, ViewDirection};
use partdraft_ir::{BoolOp, Operation, PartRecipe, Primitive, PrimitiveKind, RecipeNode, Vec3};
use partdraft_mesh::fixtures::make_box_with_hole_mesh;

fn main() -> Result<()> {
    // 100x50x25 plate with a 20mm through-hole along Z.
    let recipe = PartRecipe::new(
        "drilled plate",
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
    )?;

    // Stand-in for the geometry backend's boolean result.
    let mesh = make_box_with_hole_mesh(100.0, 50.0, 25.0, 10.0, 32);

    let mut config = DrawingConfig::standard();
    config.sections.push(CuttingPlane::at_x("A", 0.0));

    let drawing = generate_drawing(&recipe, Some(&mesh), &ViewDirection::ALL, &config)?;
    println!(
        "views: {}, dimensions: {}, sections: {}, scale {}",
        drawing.views.len(),
        drawing.dimensions.len(),
        drawing.sections.len(),
        partdraft_drafting::format_scale(drawing.scale),
    );
    if !drawing.diagnostics.is_clean() {
        println!("diagnostics: {:?}", drawing.diagnostics);
    }

    partdraft::export_svg(&drawing, &LineStyleTable::STANDARD, "drilled_plate.svg")?;
    partdraft::export_dxf(&drawing, "drilled_plate.dxf")?;
    println!("wrote drilled_plate.svg and drilled_plate.dxf");

    Ok(())
}
