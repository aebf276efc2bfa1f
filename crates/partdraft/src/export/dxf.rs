//! DXF R12 serialization of composed drawings.
//!
//! Emits HEADER, TABLES, and ENTITIES sections with fixed layers:
//! `OUTLINE` (continuous), `HIDDEN` (dashed), `DIMENSIONS` (continuous),
//! `CENTERLINES` (center linetype), and `TEXT`. Edges and dimension
//! components become `LINE` entities, values and captions become `TEXT`
//! entities. Coordinates are millimetres, Y up — page Y is flipped here,
//! unlike the SVG path which keeps the page's screen orientation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use partdraft_drafting::LineKind;

use super::collect_page;
use crate::Drawing;

fn layer_and_linetype(kind: LineKind) -> (&'static str, &'static str) {
    match kind {
        LineKind::Visible => ("OUTLINE", "CONTINUOUS"),
        LineKind::Hidden => ("HIDDEN", "HIDDEN"),
        LineKind::Center => ("CENTERLINES", "CENTER"),
        LineKind::Dimension => ("DIMENSIONS", "CONTINUOUS"),
        LineKind::Hatch => ("DIMENSIONS", "CONTINUOUS"),
        LineKind::CuttingPlane => ("CENTERLINES", "CENTER"),
    }
}

/// Write a drawing as DXF R12.
pub fn write_dxf(drawing: &Drawing, writer: &mut impl Write) -> std::io::Result<()> {
    write_header(writer)?;
    write_tables(writer)?;
    write_entities(drawing, writer)?;
    writeln!(writer, "0")?;
    writeln!(writer, "EOF")?;
    Ok(())
}

/// Serialize a drawing to DXF bytes.
pub fn dxf_to_bytes(drawing: &Drawing) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_dxf(drawing, &mut buffer)?;
    Ok(buffer)
}

/// Write a drawing as a DXF file.
pub fn export_dxf(drawing: &Drawing, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_dxf(drawing, &mut writer)
}

fn write_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "HEADER")?;

    // AutoCAD R12.
    writeln!(writer, "9")?;
    writeln!(writer, "$ACADVER")?;
    writeln!(writer, "1")?;
    writeln!(writer, "AC1009")?;

    // Units = millimetres.
    writeln!(writer, "9")?;
    writeln!(writer, "$INSUNITS")?;
    writeln!(writer, "70")?;
    writeln!(writer, "4")?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;
    Ok(())
}

fn write_tables(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "TABLES")?;

    write_ltype_table(writer)?;
    write_layer_table(writer)?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;
    Ok(())
}

fn write_ltype(
    writer: &mut impl Write,
    name: &str,
    description: &str,
    elements: &[f64],
) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "LTYPE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "{name}")?;
    writeln!(writer, "70")?;
    writeln!(writer, "0")?;
    writeln!(writer, "3")?;
    writeln!(writer, "{description}")?;
    writeln!(writer, "72")?;
    writeln!(writer, "65")?;
    writeln!(writer, "73")?;
    writeln!(writer, "{}", elements.len())?;
    writeln!(writer, "40")?;
    let total: f64 = elements.iter().map(|e| e.abs()).sum();
    writeln!(writer, "{total:.3}")?;
    for e in elements {
        writeln!(writer, "49")?;
        writeln!(writer, "{e:.3}")?;
    }
    Ok(())
}

fn write_ltype_table(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "TABLE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "LTYPE")?;
    writeln!(writer, "70")?;
    writeln!(writer, "3")?;

    write_ltype(writer, "CONTINUOUS", "Solid line", &[])?;
    write_ltype(writer, "HIDDEN", "Hidden __ __ __", &[4.0, -2.0])?;
    write_ltype(
        writer,
        "CENTER",
        "Center ____ _ ____",
        &[8.0, -2.0, 2.0, -2.0],
    )?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDTAB")?;
    Ok(())
}

fn write_layer(
    writer: &mut impl Write,
    name: &str,
    color: u8,
    linetype: &str,
) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "LAYER")?;
    writeln!(writer, "2")?;
    writeln!(writer, "{name}")?;
    writeln!(writer, "70")?;
    writeln!(writer, "0")?;
    writeln!(writer, "62")?;
    writeln!(writer, "{color}")?;
    writeln!(writer, "6")?;
    writeln!(writer, "{linetype}")?;
    Ok(())
}

fn write_layer_table(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "TABLE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "LAYER")?;
    writeln!(writer, "70")?;
    writeln!(writer, "5")?;

    write_layer(writer, "OUTLINE", 7, "CONTINUOUS")?;
    write_layer(writer, "HIDDEN", 8, "HIDDEN")?;
    write_layer(writer, "DIMENSIONS", 7, "CONTINUOUS")?;
    write_layer(writer, "CENTERLINES", 4, "CENTER")?;
    write_layer(writer, "TEXT", 7, "CONTINUOUS")?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDTAB")?;
    Ok(())
}

fn write_entities(drawing: &Drawing, writer: &mut impl Write) -> std::io::Result<()> {
    let content = collect_page(drawing);
    let flip = drawing.page.height_mm;

    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "ENTITIES")?;

    for (kind, a, b) in &content.lines {
        let (layer, linetype) = layer_and_linetype(*kind);
        writeln!(writer, "0")?;
        writeln!(writer, "LINE")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{layer}")?;
        writeln!(writer, "6")?;
        writeln!(writer, "{linetype}")?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", a.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", flip - a.y)?;
        writeln!(writer, "11")?;
        writeln!(writer, "{:.6}", b.x)?;
        writeln!(writer, "21")?;
        writeln!(writer, "{:.6}", flip - b.y)?;
    }

    // Arrowheads as closed triangle outlines on the dimension layer.
    for tri in &content.arrows {
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            writeln!(writer, "0")?;
            writeln!(writer, "LINE")?;
            writeln!(writer, "8")?;
            writeln!(writer, "DIMENSIONS")?;
            writeln!(writer, "6")?;
            writeln!(writer, "CONTINUOUS")?;
            writeln!(writer, "10")?;
            writeln!(writer, "{:.6}", a.x)?;
            writeln!(writer, "20")?;
            writeln!(writer, "{:.6}", flip - a.y)?;
            writeln!(writer, "11")?;
            writeln!(writer, "{:.6}", b.x)?;
            writeln!(writer, "21")?;
            writeln!(writer, "{:.6}", flip - b.y)?;
        }
    }

    for text in &content.texts {
        writeln!(writer, "0")?;
        writeln!(writer, "TEXT")?;
        writeln!(writer, "8")?;
        writeln!(writer, "TEXT")?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", text.pos.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", flip - text.pos.y)?;
        writeln!(writer, "40")?;
        writeln!(writer, "{:.3}", text.height)?;
        writeln!(writer, "1")?;
        // DXF text is ASCII-oriented; the diameter sign has a control code.
        writeln!(writer, "{}", text.text.replace('\u{2300}', "%%c"))?;
    }

    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;
    Ok(())
}
