use thiserror::Error;

use crate::attributes::AttributeError;

/// Structural failure of a curve conversion. No partial output is produced
/// for any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("geometry contains no curves")]
    NoCurves,

    #[error("geometry contains non-curve primitives (primitive {index})")]
    NonCurvePrimitive { index: usize },

    #[error(
        "geometry contains curves with differing order ({expected} and {found}); \
         set all curves to order 2 (linear) or 4 (cubic B-spline)"
    )]
    MixedOrder { expected: u32, found: u32 },

    #[error("geometry contains both open and closed curves")]
    MixedPeriodicity,

    #[error("unsupported curve order {0}; expected 2 (linear) or 4 (cubic B-spline)")]
    UnsupportedOrder(u32),

    #[error("geometry does not contain curve vertices")]
    NoVertices,

    #[error("curve {curve} has {count} vertices, too few to hold duplicated end points")]
    TooFewVertices { curve: usize, count: u32 },

    #[error("variable data has {actual} values but the curves hold {expected} vertices")]
    VariableSizeMismatch { expected: usize, actual: usize },

    #[error("P holds {actual} points but the curves reference {expected} vertices")]
    PointCountMismatch { expected: usize, actual: usize },

    #[error("curve {curve} references point {index}, but the geometry holds {points} points")]
    PointIndexOutOfRange { curve: usize, index: u32, points: usize },

    #[error("geometry would hold {points} points, more than 32-bit point indices can address")]
    PointIndexOverflow { points: usize },

    #[error("primitive variable '{name}' does not match the curve topology")]
    InvalidVariable { name: String },

    #[error("attribute '{name}': {source}")]
    Attribute {
        name: String,
        #[source]
        source: AttributeError,
    },
}

pub type Result<T> = std::result::Result<T, ConversionError>;
