//! # Ringlayer Renderer
//!
//! Map overlay that draws hole-punched polar regions on an oversized backing
//! surface and keeps them aligned with the map through pans, zooms and fly
//! animations without re-projecting on every frame.
//!
//! The host map is abstracted behind [`MapHost`]; [`SimulatedMap`] is a
//! self-contained implementation used by tests and the demo. Frames are
//! exported as JSON-serializable [`RenderFrame`]s for whatever paints them.

pub mod config;
pub mod debounce;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod host;
pub mod layer;
pub mod pipeline;
pub mod region;
pub mod relay;
pub mod render_data;
pub mod scene;
pub mod sim;
pub mod surface;
pub mod viewport;

pub use config::{DriftConfig, DriftMetric, LayerOptions};
pub use engine::ViewportSyncEngine;
pub use error::{LayerError, LayerResult};
pub use host::{MapEvent, MapEventKind, MapHost};
pub use layer::{MapOverlayComponent, RegionLayer};
pub use region::{DrawnRegion, PointerEvent, PointerKind, RegionOptions, RegionSpec, RelayContext};
pub use render_data::{RenderFrame, RenderRegion};
pub use sim::SimulatedMap;
pub use surface::Canvas;
pub use viewport::{ContentTransform, ViewportState};
