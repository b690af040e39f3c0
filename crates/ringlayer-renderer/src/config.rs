use serde::{Deserialize, Serialize};

use ringlayer_core::PathOptions;

use crate::error::{LayerError, LayerResult};

/// Each smoothing pass doubles the vertex count.
pub const MAX_SMOOTH_ITERATIONS: usize = 8;

fn non_negative(field: &'static str, value: f64) -> LayerResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayerError::InvalidOption {
            field,
            reason: format!("must be a finite, non-negative number (got {value})"),
        })
    }
}

/// Unit of the drift comparison that decides when a zoom forces a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftMetric {
    /// `|lastDrawZoom - targetZoom| > threshold`. Historical behaviour; with
    /// thresholds in the hundreds it never fires.
    #[default]
    ZoomDelta,
    /// `|zoomScale - 1| * 100 > threshold`. Behaviour change: opt in only.
    ScalePercent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub metric: DriftMetric,
    pub threshold: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            metric: DriftMetric::ZoomDelta,
            threshold: 100.0,
        }
    }
}

impl DriftConfig {
    /// Whether geometry drawn at `last_draw_zoom` is too stale for `target_zoom`.
    pub fn exceeded(&self, last_draw_zoom: f64, target_zoom: f64, zoom_scale: f64) -> bool {
        let magnitude = match self.metric {
            DriftMetric::ZoomDelta => (last_draw_zoom - target_zoom).abs(),
            DriftMetric::ScalePercent => (zoom_scale - 1.0).abs() * 100.0,
        };
        magnitude > self.threshold
    }
}

/// Options for a region layer. Every field has a default, so `{}` is valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerOptions {
    /// Margin around the viewport reserved on the backing surface.
    pub padding_pixels: f64,
    pub smooth_iterations: usize,
    pub simplify_tolerance: f64,
    pub drift: DriftConfig,
    /// Trailing-edge debounce delay for high-frequency map events.
    pub debounce_ms: f64,
    pub debug: bool,
}

impl Default for LayerOptions {
    fn default() -> Self {
        let path = PathOptions::default();
        Self {
            padding_pixels: 128.0,
            smooth_iterations: path.smooth_iterations,
            simplify_tolerance: path.simplify_tolerance,
            drift: DriftConfig::default(),
            debounce_ms: 0.0,
            debug: false,
        }
    }
}

impl LayerOptions {
    /// Parse and validate options. Missing fields take their defaults.
    pub fn from_json(json: &str) -> LayerResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> LayerResult<()> {
        non_negative("padding_pixels", self.padding_pixels)?;
        non_negative("simplify_tolerance", self.simplify_tolerance)?;
        non_negative("debounce_ms", self.debounce_ms)?;
        if self.smooth_iterations > MAX_SMOOTH_ITERATIONS {
            return Err(LayerError::InvalidOption {
                field: "smooth_iterations",
                reason: format!(
                    "must be at most {MAX_SMOOTH_ITERATIONS} (got {})",
                    self.smooth_iterations
                ),
            });
        }
        if self.drift.threshold.is_nan() {
            return Err(LayerError::InvalidOption {
                field: "drift.threshold",
                reason: "must be a number".to_string(),
            });
        }
        Ok(())
    }

    pub fn path_options(&self) -> PathOptions {
        PathOptions {
            smooth_iterations: self.smooth_iterations,
            simplify_tolerance: self.simplify_tolerance,
        }
    }

    /// Negative or NaN padding becomes zero.
    pub fn with_padding(mut self, padding_pixels: f64) -> Self {
        self.padding_pixels = padding_pixels.max(0.0);
        self
    }

    pub fn with_drift(mut self, metric: DriftMetric, threshold: f64) -> Self {
        self.drift = DriftConfig { metric, threshold };
        self
    }

    pub fn with_debounce(mut self, debounce_ms: f64) -> Self {
        self.debounce_ms = debounce_ms.max(0.0);
        self
    }
}
