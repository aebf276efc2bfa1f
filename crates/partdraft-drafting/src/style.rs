//! Line-style registry.
//!
//! A fixed table mapping semantic line kinds to stroke width and dash
//! pattern per ISO 128. Constructed once and shared by reference into
//! the serializers; never mutated.

use serde::{Deserialize, Serialize};

/// Semantic kind of a drawing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Visible edge: thick continuous.
    Visible,
    /// Hidden edge: medium dashed.
    Hidden,
    /// Center line: thin chain.
    Center,
    /// Dimension and extension lines: thin continuous.
    Dimension,
    /// Hatch lines: thin continuous.
    Hatch,
    /// Cutting-plane trace: thick chain.
    CuttingPlane,
}

impl LineKind {
    /// All kinds in serialization-layer order.
    pub const ALL: [Self; 6] = [
        Self::Visible,
        Self::Hidden,
        Self::Center,
        Self::Dimension,
        Self::Hatch,
        Self::CuttingPlane,
    ];
}

/// Stroke parameters for one line kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke width in paper mm.
    pub width_mm: f64,
    /// Dash pattern in paper mm (on/off pairs); empty means continuous.
    pub dash_mm: &'static [f64],
}

impl LineStyle {
    /// Whether this style draws an unbroken line.
    pub fn is_continuous(&self) -> bool {
        self.dash_mm.is_empty()
    }
}

/// The immutable style registry.
#[derive(Debug, Clone, Copy)]
pub struct LineStyleTable {
    styles: [LineStyle; 6],
}

/// Chain pattern used for center lines: long 8 / gap 2 / short 2 / gap 2.
pub const CHAIN_DASH: &[f64] = &[8.0, 2.0, 2.0, 2.0];

/// Chain pattern used for cutting-plane traces.
pub const CUTTING_CHAIN_DASH: &[f64] = &[12.0, 3.0, 3.0, 3.0];

/// Dash pattern used for hidden lines.
pub const HIDDEN_DASH: &[f64] = &[4.0, 2.0];

impl LineStyleTable {
    /// The standard ISO 128 table.
    pub const STANDARD: Self = Self {
        styles: [
            // Visible
            LineStyle {
                width_mm: 0.5,
                dash_mm: &[],
            },
            // Hidden
            LineStyle {
                width_mm: 0.35,
                dash_mm: HIDDEN_DASH,
            },
            // Center
            LineStyle {
                width_mm: 0.25,
                dash_mm: CHAIN_DASH,
            },
            // Dimension
            LineStyle {
                width_mm: 0.25,
                dash_mm: &[],
            },
            // Hatch
            LineStyle {
                width_mm: 0.25,
                dash_mm: &[],
            },
            // CuttingPlane
            LineStyle {
                width_mm: 0.5,
                dash_mm: CUTTING_CHAIN_DASH,
            },
        ],
    };

    /// Look up the style for a line kind.
    pub fn style(&self, kind: LineKind) -> LineStyle {
        let idx = match kind {
            LineKind::Visible => 0,
            LineKind::Hidden => 1,
            LineKind::Center => 2,
            LineKind::Dimension => 3,
            LineKind::Hatch => 4,
            LineKind::CuttingPlane => 5,
        };
        self.styles[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_is_thickest_continuous() {
        let table = LineStyleTable::STANDARD;
        let visible = table.style(LineKind::Visible);
        assert!(visible.is_continuous());
        for kind in LineKind::ALL {
            assert!(table.style(kind).width_mm <= visible.width_mm);
        }
    }

    #[test]
    fn hidden_and_chain_patterns() {
        let table = LineStyleTable::STANDARD;
        assert_eq!(table.style(LineKind::Hidden).dash_mm, &[4.0, 2.0]);
        assert_eq!(
            table.style(LineKind::Center).dash_mm,
            &[8.0, 2.0, 2.0, 2.0]
        );
        assert!(!table.style(LineKind::CuttingPlane).is_continuous());
    }
}
