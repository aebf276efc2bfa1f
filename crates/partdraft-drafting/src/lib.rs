#![warn(missing_docs)]

//! 2D technical drawing engine for partdraft.
//!
//! Turns a triangulated part mesh and its generating recipe into the raw
//! material of an orthographic engineering drawing:
//!
//! - **Edge extraction**: sharp edges, boundary edges, and per-view
//!   silhouettes
//! - **Hidden-line classification**: ray-cast visibility with a
//!   three-sample majority vote
//! - **Orthographic projection**: fixed first-angle front/top/right views
//! - **Dimensions**: bounding-box and feature diameters with ISO 129-1
//!   geometry and bounded collision resolution
//! - **Center lines**, **section slicing** with hatch fill, and
//!   **scale selection**
//!
//! The engine is a pure function of its inputs: all derived structures
//! are freshly allocated per invocation, and the only shared state is the
//! immutable line-style registry.
//!
//! # Example
//!
//! ```ignore
//! use partdraft_drafting::{
//!     classify_visibility, extract_drawing_edges, project_edges,
//!     Diagnostics, ViewDirection, DEFAULT_SHARP_ANGLE_DEG,
//! };
//!
//! let mut diag = Diagnostics::default();
//! let view = ViewDirection::Front;
//! let edges = extract_drawing_edges(&mesh, &view.sight(), DEFAULT_SHARP_ANGLE_DEG, &mut diag);
//! let classified = classify_visibility(&mesh, &edges, view);
//! let projected = project_edges(view, &classified, &mut diag);
//! for edge in projected.visible_edges() {
//!     println!("({}, {}) -> ({}, {})", edge.start.x, edge.start.y, edge.end.x, edge.end.y);
//! }
//! ```

pub mod centerline;
pub mod diag;
pub mod dimension;
pub mod edge_extract;
pub mod error;
pub mod hatch;
pub mod projection;
pub mod scale;
pub mod section;
pub mod style;
pub mod types;
pub mod visibility;

pub use centerline::{
    generate_center_lines, CenterLine, AXIS_OVERSHOOT, CROSS_LENGTH, MIN_CENTERLINE_DIAMETER,
};
pub use diag::Diagnostics;
pub use dimension::{
    format_mm, generate_dimensions, resolve_collisions, Arrowhead, Dimension, DimensionBase,
    DimensionConfig, DimensionGeometry, Orientation, RadialKind, TextLabel, BOUNDS_PRIORITY,
    FEATURE_PRIORITY,
};
pub use edge_extract::{extract_drawing_edges, EdgeAdjacency, DEFAULT_SHARP_ANGLE_DEG};
pub use error::{DraftError, Result};
pub use hatch::generate_hatch;
pub use projection::{project_depth, project_edges, project_point, DEGENERATE_2D_TOL};
pub use scale::{format_scale, select_scale, PageSettings, PREFERRED_SCALES};
pub use section::{
    fallback_section, section_mesh, section_with_fallback, MIN_LOOP_AREA, SLICE_TOLERANCE,
    STITCH_TOLERANCE,
};
pub use style::{LineKind, LineStyle, LineStyleTable};
pub use types::{
    signed_area, BoundingBox2D, ClassifiedEdge, CuttingPlane, CuttingPlaneKind, EdgeKind,
    ExtractedEdge, HatchPattern, Point2D, ProjectedEdge, ProjectedView, SectionContour,
    ViewDirection, Visibility, Winding,
};
pub use visibility::classify_visibility;
