//! SVG serialization of composed drawings.
//!
//! One document per drawing: a mm-sized `viewBox`, one `<g>` layer per
//! line kind styled from the line-style registry, filled polygons for
//! arrowheads, and `<text>` elements for dimension values, captions, and
//! the title block. Page coordinates are already Y-down, matching SVG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use partdraft_drafting::{LineKind, LineStyleTable};

use super::{collect_page, PageContent};
use crate::Drawing;

fn group_id(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Visible => "visible",
        LineKind::Hidden => "hidden",
        LineKind::Center => "center",
        LineKind::Dimension => "dimension",
        LineKind::Hatch => "hatch",
        LineKind::CuttingPlane => "cutting-plane",
    }
}

fn dash_attr(dash: &[f64]) -> String {
    if dash.is_empty() {
        String::new()
    } else {
        let parts: Vec<String> = dash.iter().map(|d| format!("{d}")).collect();
        format!(" stroke-dasharray=\"{}\"", parts.join(" "))
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write a drawing as an SVG document.
pub fn write_svg(
    drawing: &Drawing,
    styles: &LineStyleTable,
    writer: &mut impl Write,
) -> std::io::Result<()> {
    let content = collect_page(drawing);
    write_document(drawing, styles, &content, writer)
}

/// Serialize a drawing to SVG bytes.
pub fn svg_to_bytes(drawing: &Drawing, styles: &LineStyleTable) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_svg(drawing, styles, &mut buffer)?;
    Ok(buffer)
}

/// Write a drawing as an SVG file.
pub fn export_svg(
    drawing: &Drawing,
    styles: &LineStyleTable,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_svg(drawing, styles, &mut writer)
}

fn write_document(
    drawing: &Drawing,
    styles: &LineStyleTable,
    content: &PageContent,
    writer: &mut impl Write,
) -> std::io::Result<()> {
    let w = drawing.page.width_mm;
    let h = drawing.page.height_mm;
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(writer, r#"<rect width="{w}" height="{h}" fill="white"/>"#)?;

    for kind in LineKind::ALL {
        let style = styles.style(kind);
        writeln!(
            writer,
            r#"<g id="{}" fill="none" stroke="black" stroke-width="{}" stroke-linecap="round"{}>"#,
            group_id(kind),
            style.width_mm,
            dash_attr(style.dash_mm)
        )?;
        for (line_kind, a, b) in &content.lines {
            if *line_kind != kind {
                continue;
            }
            writeln!(
                writer,
                r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#,
                a.x, a.y, b.x, b.y
            )?;
        }
        writeln!(writer, "</g>")?;
    }

    // Filled arrowheads.
    writeln!(writer, r#"<g id="arrows" fill="black" stroke="none">"#)?;
    for tri in &content.arrows {
        writeln!(
            writer,
            r#"<polygon points="{:.3},{:.3} {:.3},{:.3} {:.3},{:.3}"/>"#,
            tri[0].x, tri[0].y, tri[1].x, tri[1].y, tri[2].x, tri[2].y
        )?;
    }
    writeln!(writer, "</g>")?;

    // Texts.
    writeln!(
        writer,
        r#"<g id="text" fill="black" font-family="sans-serif" text-anchor="middle">"#
    )?;
    for text in &content.texts {
        writeln!(
            writer,
            r#"<text x="{:.3}" y="{:.3}" font-size="{:.3}">{}</text>"#,
            text.pos.x,
            text.pos.y,
            text.height,
            escape(&text.text)
        )?;
    }
    writeln!(writer, "</g>")?;

    writeln!(writer, "</svg>")?;
    Ok(())
}
