//! # Ringlayer Core
//!
//! Host-independent geometry for the Ringlayer map overlay: polar rings,
//! spherical destination math, projection of rings into container pixels,
//! the path algebra used to build smoothed hole-punched regions, styles, and
//! an R-tree hit index over drawn regions.
//!
//! Nothing in this crate knows about a map host's event loop; the renderer
//! crate drives it.

pub mod geometry;
pub mod polar;
pub mod geodesy;
pub mod projector;
pub mod path;
pub mod builder;
pub mod style;
pub mod spatial;

pub use builder::{build_region, PathOptions};
pub use geometry::{BBox, GeoPoint, Point};
pub use path::{GeoPathAlgebra, PathAlgebra};
pub use polar::{DonutShape, PolarSample, Ring};
pub use projector::{project_ring, project_shape, GeoProjection, ProjectedShape};
pub use spatial::{HitEntry, HitIndex};
pub use style::{Color, PathStyle};
