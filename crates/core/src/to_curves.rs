use std::ops::Range;

use curvelink_scene::{
    CubicBasis, CurvesPrimitive, Interpolation, PrimitiveVariable, VariableData, POSITION,
};
use tracing::debug;

use crate::attributes::{AttributeDomain, AttributeError};
use crate::detail::Detail;
use crate::endpoints::{reduced_counts, remove_variable_ends};
use crate::error::{ConversionError, Result};
use crate::filter::AttributeFilter;
use crate::options::ConvertOptions;
use crate::transfer::{attribute_type, domain_for_interpolation, transfer_variables_to_domain};

/// Elements created by [`append_curves_to_detail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedRange {
    pub points: Range<usize>,
    pub primitives: Range<usize>,
}

/// Adds one host curve per entry of `curves.verts_per_curve()` to `detail`,
/// each with its own points, and carries the variables across.
///
/// Open B-spline objects are expected to hold explicit end duplicates, which
/// are dropped first. `detail` is left untouched when an error is returned.
pub fn append_curves_to_detail(
    curves: &CurvesPrimitive,
    detail: &mut Detail,
    options: &ConvertOptions,
) -> Result<AppendedRange> {
    if curves.num_curves() == 0 {
        return Err(ConversionError::NoCurves);
    }
    if let Some(name) = curves.first_invalid_variable() {
        return Err(ConversionError::InvalidVariable {
            name: name.to_string(),
        });
    }

    let basis = curves.basis();
    let periodic = curves.periodic();
    let remove_ends = basis == CubicBasis::BSpline && !periodic;
    let verts_per_curve = if remove_ends {
        reduced_counts(curves.verts_per_curve())?
    } else {
        curves.verts_per_curve().to_vec()
    };
    let total: usize = verts_per_curve.iter().map(|&count| count as usize).sum();

    let mut variables: Vec<(&str, PrimitiveVariable)> = Vec::with_capacity(curves.variables.len());
    for (name, variable) in &curves.variables {
        let mut variable = variable.clone();
        if remove_ends
            && variable.interpolation == Interpolation::Vertex
            && variable.data.is_duplicable()
        {
            remove_variable_ends(&mut variable.data, curves.verts_per_curve())?;
        }
        variables.push((name.as_str(), variable));
    }

    let positions = match variables.iter().find(|(name, _)| *name == POSITION) {
        Some((_, variable)) => match (&variable.interpolation, &variable.data) {
            (Interpolation::Point | Interpolation::Vertex, VariableData::Vec3(values)) => {
                values.clone()
            }
            _ => {
                return Err(ConversionError::InvalidVariable {
                    name: POSITION.to_string(),
                })
            }
        },
        None => vec![[0.0; 3]; total],
    };
    if positions.len() != total {
        return Err(ConversionError::PointCountMismatch {
            expected: total,
            actual: positions.len(),
        });
    }
    for (_, variable) in &variables {
        if variable.interpolation == Interpolation::Point && variable.data.len() != total {
            return Err(ConversionError::PointCountMismatch {
                expected: total,
                actual: variable.data.len(),
            });
        }
    }

    let filter = options.filter();
    check_attribute_types(detail, &variables, &filter)?;

    let point_base = detail.points.len();
    let vertex_base = detail.vertex_count();
    let prim_base = detail.primitives.len();
    let point_ranges = curve_point_ranges(point_base, &verts_per_curve)?;

    detail.points.extend_from_slice(&positions);
    let order = basis.order();
    for range in point_ranges {
        detail.add_curve(range.collect(), order, periodic);
    }

    let existing = [
        (Interpolation::Point, point_base),
        (Interpolation::Vertex, vertex_base),
        (Interpolation::Primitive, prim_base),
        (Interpolation::Constant, 0),
    ];
    for (interpolation, base) in existing {
        transfer_variables_to_domain(
            variables.iter().map(|(name, variable)| (*name, variable)),
            interpolation,
            &filter,
            detail,
            base,
        )?;
    }

    debug!(
        "appended {} curves with {} points ({:?}, periodic: {})",
        verts_per_curve.len(),
        total,
        basis,
        periodic
    );
    Ok(AppendedRange {
        points: point_base..detail.points.len(),
        primitives: prim_base..detail.primitives.len(),
    })
}

/// Point index range of each appended curve, starting after `base`
/// existing points.
fn curve_point_ranges(base: usize, counts: &[u32]) -> Result<Vec<Range<u32>>> {
    let total: usize = counts.iter().map(|&count| count as usize).sum();
    let overflow = || ConversionError::PointIndexOverflow {
        points: base.saturating_add(total),
    };
    let mut next = u32::try_from(base).map_err(|_| overflow())?;
    counts
        .iter()
        .map(|&count| {
            let start = next;
            next = next.checked_add(count).ok_or_else(overflow)?;
            Ok(start..next)
        })
        .collect()
}

/// Rejects variables whose type clashes with an existing attribute of the
/// same name, before anything is added.
fn check_attribute_types(
    detail: &Detail,
    variables: &[(&str, PrimitiveVariable)],
    filter: &AttributeFilter,
) -> Result<()> {
    for (name, variable) in variables {
        if *name == POSITION || !filter.matches(name) {
            continue;
        }
        let domain = domain_for_interpolation(variable.interpolation);
        if domain == AttributeDomain::Detail {
            continue;
        }
        let Some(existing) = detail.attribute(domain, name) else {
            continue;
        };
        let actual = attribute_type(variable.data.data_type());
        if existing.data_type() != actual {
            return Err(ConversionError::Attribute {
                name: name.to_string(),
                source: AttributeError::InvalidType {
                    expected: existing.data_type(),
                    actual,
                },
            });
        }
    }
    Ok(())
}
