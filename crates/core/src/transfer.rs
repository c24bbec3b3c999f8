use curvelink_scene::{
    CurvesPrimitive, DataType, Interpolation, PrimitiveVariable, VariableData, POSITION,
};
use tracing::warn;

use crate::attributes::{
    AttributeDomain, AttributeError, AttributeRef, AttributeStorage, AttributeType,
};
use crate::detail::Detail;
use crate::error::{ConversionError, Result};
use crate::filter::AttributeFilter;

pub fn interpolation_for_domain(domain: AttributeDomain) -> Interpolation {
    match domain {
        AttributeDomain::Point => Interpolation::Point,
        AttributeDomain::Vertex => Interpolation::Vertex,
        AttributeDomain::Primitive => Interpolation::Primitive,
        AttributeDomain::Detail => Interpolation::Constant,
    }
}

pub fn domain_for_interpolation(interpolation: Interpolation) -> AttributeDomain {
    match interpolation {
        Interpolation::Point => AttributeDomain::Point,
        Interpolation::Vertex => AttributeDomain::Vertex,
        Interpolation::Primitive => AttributeDomain::Primitive,
        Interpolation::Constant => AttributeDomain::Detail,
    }
}

pub fn attribute_type(data_type: DataType) -> AttributeType {
    match data_type {
        DataType::Float => AttributeType::Float,
        DataType::Int => AttributeType::Int,
        DataType::Vec2 => AttributeType::Vec2,
        DataType::Vec3 => AttributeType::Vec3,
        DataType::Vec4 => AttributeType::Vec4,
    }
}

pub fn variable_data(attr: AttributeRef<'_>) -> VariableData {
    match attr {
        AttributeRef::Float(values) => VariableData::Float(values.to_vec()),
        AttributeRef::Int(values) => VariableData::Int(values.to_vec()),
        AttributeRef::Vec2(values) => VariableData::Vec2(values.to_vec()),
        AttributeRef::Vec3(values) => VariableData::Vec3(values.to_vec()),
        AttributeRef::Vec4(values) => VariableData::Vec4(values.to_vec()),
    }
}

pub fn attribute_storage(data: &VariableData) -> AttributeStorage {
    match data {
        VariableData::Float(values) => AttributeStorage::Float(values.clone()),
        VariableData::Int(values) => AttributeStorage::Int(values.clone()),
        VariableData::Vec2(values) => AttributeStorage::Vec2(values.clone()),
        VariableData::Vec3(values) => AttributeStorage::Vec3(values.clone()),
        VariableData::Vec4(values) => AttributeStorage::Vec4(values.clone()),
    }
}

/// Values of `values` picked in `indices` order. Every index must be in
/// range.
pub(crate) fn gather<T: Clone>(values: &[T], indices: &[u32]) -> Vec<T> {
    indices.iter().map(|&index| values[index as usize].clone()).collect()
}

fn gathered_variable_data(attr: AttributeRef<'_>, indices: &[u32]) -> VariableData {
    match attr {
        AttributeRef::Float(values) => VariableData::Float(gather(values, indices)),
        AttributeRef::Int(values) => VariableData::Int(gather(values, indices)),
        AttributeRef::Vec2(values) => VariableData::Vec2(gather(values, indices)),
        AttributeRef::Vec3(values) => VariableData::Vec3(gather(values, indices)),
        AttributeRef::Vec4(values) => VariableData::Vec4(gather(values, indices)),
    }
}

/// Copies every attribute of `domain` that passes `filter` onto `curves`.
/// A name already taken by a higher precedence domain is kept.
///
/// Point attributes are read through `point_indices`, the point index of
/// every curve vertex in order; the other domains are copied verbatim.
pub fn transfer_domain_to_variables(
    detail: &Detail,
    domain: AttributeDomain,
    filter: &AttributeFilter,
    point_indices: &[u32],
    curves: &mut CurvesPrimitive,
) -> Result<()> {
    let interpolation = interpolation_for_domain(domain);
    let expected = detail.attribute_domain_len(domain);
    let mut names: Vec<&String> = detail.attributes.map(domain).keys().collect();
    names.sort();
    for name in names {
        if name == POSITION || !filter.matches(name) {
            continue;
        }
        if let Some(existing) = curves.variable(name) {
            warn!(
                "attribute '{}' on {:?} is shadowed by {:?} data; skipping",
                name, domain, existing.interpolation
            );
            continue;
        }
        let Some(attr) = detail.attribute(domain, name) else {
            continue;
        };
        if attr.len() != expected {
            return Err(ConversionError::Attribute {
                name: name.clone(),
                source: AttributeError::InvalidLength {
                    expected,
                    actual: attr.len(),
                },
            });
        }
        let data = match domain {
            AttributeDomain::Point => gathered_variable_data(attr, point_indices),
            _ => variable_data(attr),
        };
        curves.set_variable(name.as_str(), PrimitiveVariable::new(interpolation, data));
    }
    Ok(())
}

/// Appends every variable of `interpolation` that passes `filter` onto the
/// elements added to `detail` since the domain held `existing` of them.
/// Constant variables overwrite detail attributes.
pub fn transfer_variables_to_domain<'a>(
    variables: impl IntoIterator<Item = (&'a str, &'a PrimitiveVariable)>,
    interpolation: Interpolation,
    filter: &AttributeFilter,
    detail: &mut Detail,
    existing: usize,
) -> Result<()> {
    let domain = domain_for_interpolation(interpolation);
    for (name, variable) in variables {
        if variable.interpolation != interpolation || name == POSITION || !filter.matches(name) {
            continue;
        }
        let storage = attribute_storage(&variable.data);
        let result = if domain == AttributeDomain::Detail {
            detail.set_attribute(domain, name, storage)
        } else {
            detail.append_attribute(domain, name, &storage, existing)
        };
        result.map_err(|source| ConversionError::Attribute {
            name: name.to_string(),
            source,
        })?;
    }
    if domain != AttributeDomain::Detail {
        detail.pad_attributes(domain);
    }
    Ok(())
}
