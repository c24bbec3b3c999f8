mod attributes;
mod detail;
mod endpoints;
mod error;
mod filter;
mod from_curves;
mod options;
mod to_curves;
mod transfer;

pub use attributes::{
    AttributeDomain, AttributeError, AttributeInfo, AttributeRef, AttributeStorage, AttributeType,
    DetailAttributes,
};
pub use detail::{CurvePrimitive, Detail, Polygon, Primitive};
pub use endpoints::{
    duplicate_ends, duplicate_variable_ends, padded_counts, reduced_counts, remove_duplicate_ends,
    remove_variable_ends, END_PADDING,
};
pub use error::{ConversionError, Result};
pub use filter::AttributeFilter;
pub use from_curves::curves_from_detail;
pub use options::ConvertOptions;
pub use to_curves::{append_curves_to_detail, AppendedRange};
pub use transfer::{domain_for_interpolation, interpolation_for_domain};

pub use curvelink_scene as scene;
