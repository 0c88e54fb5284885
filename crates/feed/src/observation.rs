/// A single visibility change reported by the viewport observer.
///
/// Entries are transient: the resolver folds them into its visibility set and
/// nothing persists them.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationEntry {
    pub item_id: String,
    pub is_intersecting: bool,
    /// Fraction of the element's area visible inside the observed root, in [0, 1].
    pub ratio: f64,
}

impl ObservationEntry {
    pub fn enter(item_id: impl Into<String>, ratio: f64) -> Self {
        Self {
            item_id: item_id.into(),
            is_intersecting: true,
            ratio: ratio.clamp(0.0, 1.0),
        }
    }

    pub fn leave(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Viewport observer configuration.
///
/// The margins shrink the observed root region from the top and bottom, so
/// only the middle band of the container counts as "in view". An edge-clipped
/// card at the very top or bottom is then never mistaken for the one being
/// read.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverConfig {
    pub top_margin_pct: u8,
    pub bottom_margin_pct: u8,
    /// Intersection ratios at which the observer re-reports an element.
    pub thresholds: Vec<f64>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            top_margin_pct: 20,
            bottom_margin_pct: 30,
            thresholds: vec![0.0],
        }
    }
}

impl ObserverConfig {
    /// CSS-style root margin string as IntersectionObserver expects it.
    /// Negative values shrink the root region.
    pub fn root_margin(&self) -> String {
        format!("-{}% 0px -{}% 0px", self.top_margin_pct, self.bottom_margin_pct)
    }
}
