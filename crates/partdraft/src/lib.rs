#![warn(missing_docs)]

//! Engineering drawing generation for procedural parts.
//!
//! This crate is the facade over the partdraft pipeline: it takes a part
//! recipe (the primitive/boolean graph from the generator), the
//! triangulated result mesh from the geometry backend, a view set, and a
//! configuration, and produces a composed [`Drawing`] — orthographic
//! views with hidden-line classification, ISO-placed dimensions, center
//! lines, optional hatched section cuts, and a selected standard scale —
//! ready for SVG or DXF R12 serialization.
//!
//! Drawing generation is a pure function of its inputs: rerunning with
//! the same recipe, mesh, and config yields identical output.
//!
//! # Example
//!
//! ```ignore
//! use partdraft::{generate_drawing, DrawingConfig, ViewDirection};
//! use partdraft_drafting::LineStyleTable;
//!
//! let drawing = generate_drawing(&recipe, Some(&mesh), &ViewDirection::ALL, &config)?;
//! let svg = partdraft::export::svg::svg_to_bytes(&drawing, &LineStyleTable::STANDARD)?;
//! ```

pub mod export;
pub mod layout;

use serde::{Deserialize, Serialize};

use partdraft_drafting::{
    classify_visibility, extract_drawing_edges, generate_center_lines, generate_dimensions,
    generate_hatch, project_edges, project_point, resolve_collisions, section_with_fallback,
    select_scale, BoundingBox2D, CenterLine, CuttingPlane, Diagnostics, Dimension,
    DimensionConfig, DraftError, EdgeKind, HatchPattern, PageSettings, Point2D, ProjectedEdge,
    ProjectedView, Result, SectionContour, ViewDirection, Visibility,
};
use partdraft_ir::PartRecipe;
use partdraft_mesh::TriangleMesh;

pub use export::dxf::{dxf_to_bytes, export_dxf, write_dxf};
pub use export::svg::{export_svg, svg_to_bytes, write_svg};
pub use layout::{layout_drawing, PageLayout, Placement, TitleBlock};
pub use partdraft_drafting::{self as drafting, LineKind, LineStyleTable};
pub use partdraft_ir as ir;
pub use partdraft_mesh as mesh;

/// Configuration for one drawing generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Page geometry.
    pub page: PageSettings,
    /// Dimensioning parameters.
    pub dimensions: DimensionConfig,
    /// Hatch pattern for section cuts.
    pub hatch: HatchPattern,
    /// Section cutting planes to evaluate.
    pub sections: Vec<CuttingPlane>,
    /// Emit hidden edges (dashed) in the output.
    pub include_hidden: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl DrawingConfig {
    /// Standard configuration: A4 landscape, ISO dimensioning, 45 degree
    /// hatch, hidden lines on.
    pub fn standard() -> Self {
        Self {
            page: PageSettings::A4_LANDSCAPE,
            dimensions: DimensionConfig::default(),
            hatch: HatchPattern::STANDARD_45,
            sections: Vec::new(),
            include_hidden: true,
        }
    }

    fn validate(&self) -> Result<()> {
        let page = &self.page;
        if page.width_mm <= 0.0 || page.height_mm <= 0.0 {
            return Err(DraftError::InvalidConfig(format!(
                "page size {}x{} must be positive",
                page.width_mm, page.height_mm
            )));
        }
        let (cell_w, cell_h) = page.cell_size();
        if cell_w <= 0.0 || cell_h <= 0.0 {
            return Err(DraftError::InvalidConfig(
                "margins and gap leave no room for views".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cutting-plane trace drawn across a parent view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTrace {
    /// The view the trace is drawn in.
    pub view: ViewDirection,
    /// Trace start in view coordinates.
    pub start: Point2D,
    /// Trace end in view coordinates.
    pub end: Point2D,
}

/// One evaluated section cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCut {
    /// Section label (e.g. "A" for section A-A).
    pub label: String,
    /// Classified closed contours.
    pub contours: Vec<SectionContour>,
    /// Hatch fill segments.
    pub hatch_lines: Vec<(Point2D, Point2D)>,
    /// True when the bounding-box fallback produced this cut.
    pub degraded: bool,
    /// Trace of the cutting plane in its parent view, if visible there.
    pub trace: Option<SectionTrace>,
}

/// A fully composed drawing, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    /// Part name for the title block.
    pub part_name: String,
    /// Projected orthographic views.
    pub views: Vec<ProjectedView>,
    /// Placed dimensions (collision-resolved).
    pub dimensions: Vec<Dimension>,
    /// Center lines per view.
    pub center_lines: Vec<CenterLine>,
    /// Section cuts.
    pub sections: Vec<SectionCut>,
    /// Selected standard drawing scale.
    pub scale: f64,
    /// Page geometry the drawing was composed for.
    pub page: PageSettings,
    /// Dimension configuration used (needed to rebuild geometry).
    pub dim_config: DimensionConfig,
    /// Recovered-condition counters from all stages.
    pub diagnostics: Diagnostics,
}

/// Generate a drawing from a recipe and an optional result mesh.
///
/// Without a mesh, the views degrade to bounding-box outlines and
/// sections always use the simplified fallback; both are reported in the
/// diagnostics rather than failing.
pub fn generate_drawing(
    recipe: &PartRecipe,
    mesh: Option<&TriangleMesh>,
    view_set: &[ViewDirection],
    config: &DrawingConfig,
) -> Result<Drawing> {
    if view_set.is_empty() {
        return Err(DraftError::EmptyViewSet);
    }
    recipe.validate()?;
    config.validate()?;

    let mut diag = Diagnostics::default();

    // The mesh contract requires normals; compute them when the provider
    // skipped them.
    let prepared_mesh: Option<TriangleMesh> = match mesh {
        Some(m) => {
            m.validate()?;
            if m.has_normals() {
                None
            } else {
                let mut owned = m.clone();
                owned.compute_normals();
                Some(owned)
            }
        }
        None => None,
    };
    let mesh_ref: Option<&TriangleMesh> = match (&prepared_mesh, mesh) {
        (Some(owned), _) => Some(owned),
        (None, provided) => provided,
    };

    let views: Vec<ProjectedView> = match mesh_ref {
        Some(mesh) => view_set
            .iter()
            .map(|&view| {
                let edges = extract_drawing_edges(
                    mesh,
                    &view.sight(),
                    partdraft_drafting::DEFAULT_SHARP_ANGLE_DEG,
                    &mut diag,
                );
                let classified = classify_visibility(mesh, &edges, view);
                let mut projected = project_edges(view, &classified, &mut diag);
                if !config.include_hidden {
                    projected.edges.retain(|e| e.visibility == Visibility::Visible);
                }
                projected
            })
            .collect(),
        None => view_set
            .iter()
            .map(|&view| outline_view(recipe, view))
            .collect::<Result<Vec<_>>>()?,
    };

    let mut dimensions = generate_dimensions(recipe, &views, &config.dimensions);
    resolve_collisions(&mut dimensions, &config.dimensions, &mut diag);

    let center_lines = generate_center_lines(recipe, view_set);

    let mut sections = Vec::new();
    for plane in &config.sections {
        let degraded_before = diag.degraded_sections;
        let contours = section_with_fallback(mesh_ref, recipe, plane, &mut diag);
        let hatch_lines = generate_hatch(&contours, &config.hatch);
        sections.push(SectionCut {
            label: plane.label.clone(),
            contours,
            hatch_lines,
            degraded: diag.degraded_sections > degraded_before,
            trace: compute_trace(&views, plane),
        });
    }

    let mut extents: Vec<(f64, f64)> = views
        .iter()
        .filter(|v| v.bounds.is_valid())
        .map(|v| (v.bounds.width(), v.bounds.height()))
        .collect();
    for section in &sections {
        let mut bounds = BoundingBox2D::empty();
        for contour in &section.contours {
            for p in &contour.points {
                bounds.include_point(*p);
            }
        }
        if bounds.is_valid() {
            extents.push((bounds.width(), bounds.height()));
        }
    }
    let scale = select_scale(&extents, &config.page);

    Ok(Drawing {
        part_name: recipe.name.clone(),
        views,
        dimensions,
        center_lines,
        sections,
        scale,
        page: config.page,
        dim_config: config.dimensions,
        diagnostics: diag,
    })
}

/// Bounding-box outline view used when no mesh is available.
fn outline_view(recipe: &PartRecipe, view: ViewDirection) -> Result<ProjectedView> {
    let (lo, hi) = recipe.bounding_box()?;
    let mut bounds = BoundingBox2D::empty();
    for x in [lo.x, hi.x] {
        for y in [lo.y, hi.y] {
            for z in [lo.z, hi.z] {
                bounds.include_point(project_point(view, &partdraft_math::Point3::new(x, y, z)));
            }
        }
    }
    let corners = [
        Point2D::new(bounds.min_x, bounds.min_y),
        Point2D::new(bounds.max_x, bounds.min_y),
        Point2D::new(bounds.max_x, bounds.max_y),
        Point2D::new(bounds.min_x, bounds.max_y),
    ];
    let mut projected = ProjectedView::new(view);
    for i in 0..4 {
        projected.add_edge(ProjectedEdge {
            start: corners[i],
            end: corners[(i + 1) % 4],
            visibility: Visibility::Visible,
            kind: EdgeKind::Sharp,
            depth: 0.0,
        });
    }
    Ok(projected)
}

/// Where the cutting plane crosses its parent view, spanning the view
/// with a small overshoot. `None` when the parent view is absent or the
/// plane is parallel to it.
fn compute_trace(views: &[ProjectedView], plane: &CuttingPlane) -> Option<SectionTrace> {
    let view = views.iter().find(|v| v.view == plane.parent_view)?;
    if !view.bounds.is_valid() {
        return None;
    }
    let nv = view.view.vec_to_view_space(&plane.normal_vec());
    let n2_len = (nv.x * nv.x + nv.y * nv.y).sqrt();
    if n2_len < 1e-6 {
        return None;
    }
    let dir = Point2D::new(nv.y / n2_len, nv.x / n2_len);
    let center = project_point(view.view, &plane.origin_point());

    let b = &view.bounds;
    let corners = [
        Point2D::new(b.min_x, b.min_y),
        Point2D::new(b.max_x, b.min_y),
        Point2D::new(b.max_x, b.max_y),
        Point2D::new(b.min_x, b.max_y),
    ];
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for c in corners {
        let t = (c.x - center.x) * dir.x + (c.y - center.y) * dir.y;
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }
    Some(SectionTrace {
        view: view.view,
        start: center.offset(dir, t_min - 5.0),
        end: center.offset(dir, t_max + 5.0),
    })
}
