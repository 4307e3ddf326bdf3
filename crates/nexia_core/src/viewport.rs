//! Canvas viewport: pan/zoom arithmetic.

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Pan/zoom transform of the spatial canvas.
///
/// `zoom` stays within [`MIN_ZOOM`, `MAX_ZOOM`]; offsets are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    zoom: f64,
}

impl Viewport {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(self, dx: f64, dy: f64) -> Self {
        Self {
            offset_x: self.offset_x + dx,
            offset_y: self.offset_y + dy,
            ..self
        }
    }

    /// Multiplies zoom by `factor`, clamped to the allowed range.
    ///
    /// A `NaN` product leaves zoom unchanged.
    pub fn zoom_by(self, factor: f64) -> Self {
        let next = self.zoom * factor;
        if next.is_nan() {
            return self;
        }
        Self {
            zoom: next.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: DEFAULT_ZOOM,
        }
    }
}
