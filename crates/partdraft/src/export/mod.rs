//! Serializers for composed drawings.
//!
//! Both backends consume the same flattened page content: every line
//! segment tagged with its semantic kind, arrowhead triangles, and text
//! labels, all in page coordinates (paper mm, Y down). The SVG writer
//! emits them as layered groups; the DXF writer as layered entities with
//! Y flipped up.

pub mod dxf;
pub mod svg;

use partdraft_drafting::{LineKind, Point2D, ViewDirection};

use crate::layout::{layout_drawing, PageLayout, Placement};
use crate::Drawing;

/// A positioned page text.
#[derive(Debug, Clone)]
pub(crate) struct PageText {
    pub pos: Point2D,
    pub text: String,
    pub height: f64,
}

/// Flattened, page-space drawing content.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageContent {
    pub lines: Vec<(LineKind, Point2D, Point2D)>,
    pub arrows: Vec<[Point2D; 3]>,
    pub texts: Vec<PageText>,
}

const CAPTION_HEIGHT: f64 = 4.0;
const TITLE_TEXT_HEIGHT: f64 = 3.5;

fn placement_for_view(
    drawing: &Drawing,
    layout: &PageLayout,
    view: ViewDirection,
) -> Option<Placement> {
    drawing
        .views
        .iter()
        .position(|v| v.view == view)
        .map(|i| layout.views[i])
}

/// Flatten a drawing plus its layout into serializer-ready content.
pub(crate) fn collect_page(drawing: &Drawing) -> PageContent {
    let layout = layout_drawing(drawing);
    let mut out = PageContent::default();

    // Projected edges.
    for (view, placement) in drawing.views.iter().zip(&layout.views) {
        for edge in &view.edges {
            let kind = match edge.visibility {
                partdraft_drafting::Visibility::Visible => LineKind::Visible,
                partdraft_drafting::Visibility::Hidden => LineKind::Hidden,
            };
            out.lines
                .push((kind, placement.map(&edge.start), placement.map(&edge.end)));
        }
        if view.bounds.is_valid() {
            let center = placement.map(&Point2D::new(
                view.bounds.center().x,
                view.bounds.max_y,
            ));
            out.texts.push(PageText {
                pos: Point2D::new(center.x, center.y + 12.0),
                text: view.view.label().to_string(),
                height: CAPTION_HEIGHT,
            });
        }
    }

    // Center lines.
    for line in &drawing.center_lines {
        if let Some(placement) = placement_for_view(drawing, &layout, line.view) {
            for (a, b) in &line.segments {
                out.lines
                    .push((LineKind::Center, placement.map(a), placement.map(b)));
            }
        }
    }

    // Dimensions: lines, filled arrowheads, value text.
    for dim in &drawing.dimensions {
        let Some(placement) = placement_for_view(drawing, &layout, dim.view()) else {
            continue;
        };
        let geo = dim.geometry(&drawing.dim_config);
        for (a, b) in &geo.lines {
            out.lines
                .push((LineKind::Dimension, placement.map(a), placement.map(b)));
        }
        for arrow in &geo.arrows {
            // Arrowheads keep their paper size regardless of drawing
            // scale; only the tip position is mapped.
            let page_arrow = partdraft_drafting::Arrowhead {
                tip: placement.map(&arrow.tip),
                dir: arrow.dir,
            };
            out.arrows.push(page_arrow.triangle(
                drawing.dim_config.arrow_length,
                drawing.dim_config.arrow_width,
            ));
        }
        out.texts.push(PageText {
            pos: placement.map(&geo.text.pos),
            text: geo.text.text,
            height: geo.text.height * placement.scale,
        });
    }

    // Section cuts: contours as outline, hatch fill, caption.
    for (section, placement) in drawing.sections.iter().zip(&layout.sections) {
        let mut bounds = partdraft_drafting::BoundingBox2D::empty();
        for contour in &section.contours {
            for pair in contour.points.windows(2) {
                out.lines.push((
                    LineKind::Visible,
                    placement.map(&pair[0]),
                    placement.map(&pair[1]),
                ));
            }
            for p in &contour.points {
                bounds.include_point(*p);
            }
        }
        for (a, b) in &section.hatch_lines {
            out.lines
                .push((LineKind::Hatch, placement.map(a), placement.map(b)));
        }
        if bounds.is_valid() {
            let anchor = placement.map(&Point2D::new(bounds.center().x, bounds.max_y));
            out.texts.push(PageText {
                pos: Point2D::new(anchor.x, anchor.y + 12.0),
                text: format!("{}-{}", section.label, section.label),
                height: CAPTION_HEIGHT,
            });
        }
    }

    // Cutting-plane traces in their parent views.
    for section in &drawing.sections {
        let Some(trace) = &section.trace else {
            continue;
        };
        if let Some(placement) = placement_for_view(drawing, &layout, trace.view) {
            let a = placement.map(&trace.start);
            let b = placement.map(&trace.end);
            out.lines.push((LineKind::CuttingPlane, a, b));
            out.texts.push(PageText {
                pos: Point2D::new(b.x, b.y - 3.0),
                text: section.label.clone(),
                height: CAPTION_HEIGHT,
            });
        }
    }

    // Title block.
    let tb = &layout.title_block;
    let corners = [
        tb.origin,
        Point2D::new(tb.origin.x + tb.width, tb.origin.y),
        Point2D::new(tb.origin.x + tb.width, tb.origin.y + tb.height),
        Point2D::new(tb.origin.x, tb.origin.y + tb.height),
    ];
    for i in 0..4 {
        out.lines
            .push((LineKind::Visible, corners[i], corners[(i + 1) % 4]));
    }
    for (i, line) in tb.lines.iter().enumerate() {
        out.texts.push(PageText {
            pos: Point2D::new(
                tb.origin.x + tb.width / 2.0,
                tb.origin.y + 4.5 + i as f64 * 4.5,
            ),
            text: line.clone(),
            height: TITLE_TEXT_HEIGHT,
        });
    }

    out
}
