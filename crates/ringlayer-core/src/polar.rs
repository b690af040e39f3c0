use serde::{Deserialize, Serialize};

/// Minimum number of samples for a ring to enclose any area.
pub const MIN_RING_SAMPLES: usize = 3;

/// One polar sample: a bearing and a distance from the region's central point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarSample {
    /// Bearing in degrees.
    #[serde(alias = "Direction")]
    pub direction_degrees: f64,
    /// Distance from the central point, in meters.
    #[serde(alias = "Value")]
    pub distance_units: f64,
}

impl PolarSample {
    pub fn new(direction_degrees: f64, distance_units: f64) -> Self {
        Self {
            direction_degrees,
            distance_units,
        }
    }
}

/// A closed boundary described by polar samples, unordered at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
    pub samples: Vec<PolarSample>,
}

impl Ring {
    pub fn new(samples: Vec<PolarSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in ascending bearing order.
    ///
    /// The sort is stable, so samples sharing a bearing keep their insertion
    /// order. Projecting unsorted samples yields a self-intersecting polygon.
    pub fn sorted(&self) -> Vec<PolarSample> {
        let mut samples = self.samples.clone();
        samples.sort_by(|a, b| a.direction_degrees.total_cmp(&b.direction_degrees));
        samples
    }
}

impl FromIterator<PolarSample> for Ring {
    fn from_iter<I: IntoIterator<Item = PolarSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An outer ring with zero or more hole rings punched out of it.
///
/// Deserializes from `{ "outer": [...], "holes": [[...], ...] }` or from the
/// legacy layout `{ "data": [...], "exclude": [{ "polygons": [{ "data": [...] }] }] }`,
/// whose exclude groups are flattened into `holes` in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ShapeRepr")]
pub struct DonutShape {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl DonutShape {
    pub fn new(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    pub fn solid(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeRepr {
    Native {
        outer: Ring,
        #[serde(default)]
        holes: Vec<Ring>,
    },
    Legacy {
        data: Ring,
        #[serde(default)]
        exclude: Vec<ExcludeGroup>,
    },
}

#[derive(Deserialize)]
struct ExcludeGroup {
    #[serde(default)]
    polygons: Vec<ExcludePolygon>,
}

#[derive(Deserialize)]
struct ExcludePolygon {
    data: Ring,
}

impl From<ShapeRepr> for DonutShape {
    fn from(repr: ShapeRepr) -> Self {
        match repr {
            ShapeRepr::Native { outer, holes } => Self::new(outer, holes),
            ShapeRepr::Legacy { data, exclude } => Self::new(
                data,
                exclude
                    .into_iter()
                    .flat_map(|group| group.polygons)
                    .map(|polygon| polygon.data)
                    .collect(),
            ),
        }
    }
}
