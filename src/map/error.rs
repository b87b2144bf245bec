use std::fmt;

/// Configuration errors raised while building the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// The placement generator needs exactly one entry per wedge
    ZoneCount { expected: usize, found: usize },
    /// Placement radius band is empty or inverted
    RadiusRange { min: f32, max: f32 },
    /// A clamp range has min > max or non-finite bounds
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    /// A scalar tunable is non-finite or outside its allowed domain
    InvalidParameter { name: &'static str, value: f64 },
}

/// Type alias for Results using MapError
pub type MapResult<T> = Result<T, MapError>;

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapError::ZoneCount { expected, found } => {
                write!(f, "expected {} zones, found {}", expected, found)
            }
            MapError::RadiusRange { min, max } => write!(
                f,
                "placement radius band is empty: min radius {} must be below max radius {}",
                min, max
            ),
            MapError::InvalidRange { name, min, max } => {
                write!(f, "invalid {} range [{}, {}]", name, min, max)
            }
            MapError::InvalidParameter { name, value } => {
                write!(f, "invalid value {} for {}", value, name)
            }
        }
    }
}

impl std::error::Error for MapError {}
