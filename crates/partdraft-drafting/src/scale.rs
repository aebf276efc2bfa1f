//! Drawing scale selection.
//!
//! Computes the largest uniform scale that fits every view into its grid
//! cell on the page, then snaps down — never up — to the nearest standard
//! preferred scale.

use serde::{Deserialize, Serialize};

/// ISO preferred scale factors, descending.
pub const PREFERRED_SCALES: &[f64] = &[
    100.0, 50.0, 20.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.25, 0.2, 0.1, 0.05, 0.025, 0.02, 0.01,
];

/// Page geometry for the multi-view grid layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageSettings {
    /// Page width in mm.
    pub width_mm: f64,
    /// Page height in mm.
    pub height_mm: f64,
    /// Outer margin on all sides in mm.
    pub margin_mm: f64,
    /// Gap between grid cells in mm.
    pub gap_mm: f64,
}

impl PageSettings {
    /// A4 landscape.
    pub const A4_LANDSCAPE: Self = Self {
        width_mm: 297.0,
        height_mm: 210.0,
        margin_mm: 10.0,
        gap_mm: 10.0,
    };

    /// A3 landscape.
    pub const A3_LANDSCAPE: Self = Self {
        width_mm: 420.0,
        height_mm: 297.0,
        margin_mm: 10.0,
        gap_mm: 10.0,
    };

    /// Size of one cell of the 2x2 view grid.
    pub fn cell_size(&self) -> (f64, f64) {
        (
            (self.width_mm - 2.0 * self.margin_mm - self.gap_mm) / 2.0,
            (self.height_mm - 2.0 * self.margin_mm - self.gap_mm) / 2.0,
        )
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::A4_LANDSCAPE
    }
}

/// Select the drawing scale for a set of view extents (width, height in
/// real mm).
///
/// Every view must fit its cell at the returned scale. Oversized content
/// keeps snapping down; undersized content never snaps above the largest
/// fitting preferred value.
pub fn select_scale(view_extents: &[(f64, f64)], page: &PageSettings) -> f64 {
    let (cell_w, cell_h) = page.cell_size();
    let mut fit = f64::INFINITY;
    for &(w, h) in view_extents {
        if w > 1e-9 {
            fit = fit.min(cell_w / w);
        }
        if h > 1e-9 {
            fit = fit.min(cell_h / h);
        }
    }
    if !fit.is_finite() {
        return 1.0;
    }
    snap_down(fit)
}

/// Largest preferred scale not exceeding `fit`.
fn snap_down(fit: f64) -> f64 {
    for &s in PREFERRED_SCALES {
        if s <= fit + 1e-12 {
            return s;
        }
    }
    PREFERRED_SCALES[PREFERRED_SCALES.len() - 1]
}

/// Title-block rendering of a scale factor, e.g. "1:2", "1:1", "5:1".
pub fn format_scale(scale: f64) -> String {
    if scale >= 1.0 {
        format!("{:.0}:1", scale)
    } else {
        let denom = 1.0 / scale;
        if (denom - denom.round()).abs() < 1e-9 {
            format!("1:{:.0}", denom)
        } else {
            format!("1:{denom}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_part_drops_to_half() {
        // A 250mm part on A4: the 133.5mm cell forces 1:2.
        let page = PageSettings::A4_LANDSCAPE;
        let views = [(250.0, 50.0), (250.0, 25.0), (25.0, 50.0)];
        assert_eq!(select_scale(&views, &page), 0.5);
    }

    #[test]
    fn small_part_scales_up_to_five() {
        let page = PageSettings::A4_LANDSCAPE;
        let views = [(20.0, 10.0), (20.0, 10.0), (10.0, 10.0)];
        assert_eq!(select_scale(&views, &page), 5.0);
    }

    #[test]
    fn unit_part_stays_at_one() {
        let page = PageSettings::A4_LANDSCAPE;
        let views = [(120.0, 80.0)];
        assert_eq!(select_scale(&views, &page), 1.0);
    }

    #[test]
    fn never_snaps_up() {
        let page = PageSettings::A4_LANDSCAPE;
        // Fit factor just under 2 must not round to 2.
        let (cell_w, _) = page.cell_size();
        let views = [(cell_w / 1.99, 1.0)];
        assert_eq!(select_scale(&views, &page), 1.0);
    }

    #[test]
    fn scale_is_monotonic_in_part_size() {
        // Shrinking the part never decreases the selected scale.
        let page = PageSettings::A4_LANDSCAPE;
        let mut last = 0.0;
        for size in [400.0, 250.0, 120.0, 60.0, 20.0, 8.0] {
            let s = select_scale(&[(size, size * 0.6)], &page);
            assert!(s >= last, "scale decreased when part shrank");
            last = s;
        }
    }

    #[test]
    fn empty_views_default_to_unit() {
        assert_eq!(select_scale(&[], &PageSettings::A4_LANDSCAPE), 1.0);
    }

    #[test]
    fn scale_formatting() {
        assert_eq!(format_scale(1.0), "1:1");
        assert_eq!(format_scale(0.5), "1:2");
        assert_eq!(format_scale(5.0), "5:1");
        assert_eq!(format_scale(0.2), "1:5");
        assert_eq!(format_scale(0.025), "1:40");
    }
}
