//! Page composition: view placement and the title block.
//!
//! Views are arranged on a 2x2 grid in first-angle convention: front at
//! top-left, right view beside it, top view below the front. Section
//! views fill the remaining cells. Every placement carries the mapping
//! from view coordinates (model mm) to page coordinates (paper mm).

use serde::{Deserialize, Serialize};

use partdraft_drafting::{format_scale, BoundingBox2D, Point2D, ViewDirection};

use crate::{Drawing, SectionCut};

/// Maps one view's content into its page cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    /// Page position of the content's minimum corner.
    pub origin: Point2D,
    /// Minimum corner of the content in view coordinates.
    pub content_min: Point2D,
    /// Uniform drawing scale.
    pub scale: f64,
}

impl Placement {
    /// Map a view-space point to page coordinates.
    pub fn map(&self, p: &Point2D) -> Point2D {
        Point2D::new(
            self.origin.x + (p.x - self.content_min.x) * self.scale,
            self.origin.y + (p.y - self.content_min.y) * self.scale,
        )
    }

    /// Scale a view-space length to paper mm.
    pub fn map_len(&self, len: f64) -> f64 {
        len * self.scale
    }
}

/// The title block in the page's bottom-right corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleBlock {
    /// Top-left corner on the page.
    pub origin: Point2D,
    /// Block width in mm.
    pub width: f64,
    /// Block height in mm.
    pub height: f64,
    /// Text rows: part name, scale, units.
    pub lines: [String; 3],
}

/// A composed page: placements per view and section, plus the title
/// block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Placement per drawing view, same order as `Drawing::views`.
    pub views: Vec<Placement>,
    /// Placement per section cut, same order as `Drawing::sections`.
    pub sections: Vec<Placement>,
    /// Title block contents.
    pub title_block: TitleBlock,
}

fn grid_cell(view: ViewDirection) -> (usize, usize) {
    match view {
        ViewDirection::Front => (0, 0),
        ViewDirection::Right => (1, 0),
        // First-angle: the top view goes below the front view.
        ViewDirection::Top => (0, 1),
    }
}

fn place(
    bounds: &BoundingBox2D,
    cell: (usize, usize),
    cell_size: (f64, f64),
    margin: f64,
    gap: f64,
    scale: f64,
) -> Placement {
    let cell_x = margin + cell.0 as f64 * (cell_size.0 + gap);
    let cell_y = margin + cell.1 as f64 * (cell_size.1 + gap);
    let (w, h) = if bounds.is_valid() {
        (bounds.width() * scale, bounds.height() * scale)
    } else {
        (0.0, 0.0)
    };
    let content_min = if bounds.is_valid() {
        Point2D::new(bounds.min_x, bounds.min_y)
    } else {
        Point2D::ORIGIN
    };
    Placement {
        origin: Point2D::new(
            cell_x + (cell_size.0 - w) / 2.0,
            cell_y + (cell_size.1 - h) / 2.0,
        ),
        content_min,
        scale,
    }
}

fn section_bounds(section: &SectionCut) -> BoundingBox2D {
    let mut bounds = BoundingBox2D::empty();
    for contour in &section.contours {
        for p in &contour.points {
            bounds.include_point(*p);
        }
    }
    bounds
}

/// Compose the page for a drawing.
pub fn layout_drawing(drawing: &Drawing) -> PageLayout {
    let page = drawing.page;
    let cell_size = page.cell_size();
    let scale = drawing.scale;

    let views = drawing
        .views
        .iter()
        .map(|view| {
            place(
                &view.bounds,
                grid_cell(view.view),
                cell_size,
                page.margin_mm,
                page.gap_mm,
                scale,
            )
        })
        .collect();

    // Sections take the free cells, starting bottom-right.
    let mut free_cells = vec![(1, 1)];
    let used: Vec<(usize, usize)> = drawing.views.iter().map(|v| grid_cell(v.view)).collect();
    for cell in [(1, 0), (0, 1), (0, 0)] {
        if !used.contains(&cell) {
            free_cells.push(cell);
        }
    }
    let sections = drawing
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let cell = *free_cells.get(i).unwrap_or(&(1, 1));
            place(
                &section_bounds(section),
                cell,
                cell_size,
                page.margin_mm,
                page.gap_mm,
                scale,
            )
        })
        .collect();

    let width = 70.0;
    let height = 18.0;
    let title_block = TitleBlock {
        origin: Point2D::new(
            page.width_mm - page.margin_mm - width,
            page.height_mm - page.margin_mm - height,
        ),
        width,
        height,
        lines: [
            drawing.part_name.clone(),
            format!("SCALE {}", format_scale(drawing.scale)),
            "UNITS mm".to_string(),
        ],
    };

    PageLayout {
        views,
        sections,
        title_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn placement_maps_and_scales() {
        let placement = Placement {
            origin: Point2D::new(20.0, 30.0),
            content_min: Point2D::new(-50.0, -25.0),
            scale: 0.5,
        };
        let p = placement.map(&Point2D::new(-50.0, -25.0));
        assert_relative_eq!(p.x, 20.0);
        assert_relative_eq!(p.y, 30.0);

        let q = placement.map(&Point2D::new(50.0, 25.0));
        assert_relative_eq!(q.x, 70.0);
        assert_relative_eq!(q.y, 55.0);
    }

    #[test]
    fn first_angle_grid() {
        assert_eq!(grid_cell(ViewDirection::Front), (0, 0));
        assert_eq!(grid_cell(ViewDirection::Right), (1, 0));
        assert_eq!(grid_cell(ViewDirection::Top), (0, 1));
    }
}
