//! Trigger types
//!
//! Options, sentinel observations, and the platform-neutral intersection
//! math used to derive observations from scroll geometry.

/// Options controlling when the sentinel counts as visible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerOptions {
    /// Distance by which the visible region is expanded on both ends, so the
    /// next page is requested before the sentinel actually enters the
    /// viewport. Same units as the embedding's geometry (pixels, rows).
    pub root_margin: f64,
    /// Fraction of the sentinel that must intersect the expanded region.
    /// Zero means any intersection fires.
    pub threshold: f64,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            root_margin: 100.0,
            threshold: 0.0,
        }
    }
}

impl TriggerOptions {
    /// Set the pre-fetch margin
    #[must_use]
    pub fn with_root_margin(mut self, root_margin: f64) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Set the required intersection ratio
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Derive a sentinel observation from viewport geometry, expanding the
    /// visible region by `root_margin` on both ends.
    ///
    /// A zero-height sentinel reports `ratio` 0.0 while intersecting, so it
    /// only fires with the default zero threshold (matching how area-less
    /// markers behave under browser intersection observers).
    pub fn observe(&self, geometry: &ViewportGeometry) -> SentinelEvent {
        let top = geometry.scroll_offset - self.root_margin;
        let bottom = geometry.scroll_offset + geometry.viewport_height + self.root_margin;
        let sentinel_top = geometry.sentinel_top;
        let sentinel_bottom = geometry.sentinel_top + geometry.sentinel_height;

        if geometry.sentinel_height <= 0.0 {
            let intersecting = (top..=bottom).contains(&sentinel_top);
            return SentinelEvent {
                intersecting,
                ratio: 0.0,
            };
        }

        let overlap = (sentinel_bottom.min(bottom) - sentinel_top.max(top)).max(0.0);
        SentinelEvent {
            intersecting: overlap > 0.0,
            ratio: overlap / geometry.sentinel_height,
        }
    }
}

/// A single observation of the sentinel relative to the scroll viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelEvent {
    /// Whether any part of the sentinel is inside the expanded region
    pub intersecting: bool,
    /// Fraction of the sentinel inside the expanded region
    pub ratio: f64,
}

impl SentinelEvent {
    /// A fully visible sentinel
    pub fn visible() -> Self {
        Self {
            intersecting: true,
            ratio: 1.0,
        }
    }

    /// A sentinel outside the viewport
    pub fn hidden() -> Self {
        Self {
            intersecting: false,
            ratio: 0.0,
        }
    }

    /// Whether this observation crosses the configured threshold
    pub(crate) fn crosses(&self, options: &TriggerOptions) -> bool {
        self.intersecting && self.ratio >= options.threshold
    }
}

/// Scroll-viewport geometry supplied by the embedding, all values in the
/// same distance units and content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Scroll offset of the top of the visible region
    pub scroll_offset: f64,
    /// Height of the visible region
    pub viewport_height: f64,
    /// Position of the sentinel's top edge
    pub sentinel_top: f64,
    /// Height of the sentinel (zero for marker elements)
    pub sentinel_height: f64,
}
