use curvelink_scene::{
    CubicBasis, CurvesPrimitive, Interpolation, PrimitiveVariable, VariableData, POSITION,
};
use tracing::{debug, warn};

use crate::attributes::AttributeDomain;
use crate::detail::Detail;
use crate::endpoints::{duplicate_variable_ends, padded_counts};
use crate::error::{ConversionError, Result};
use crate::options::ConvertOptions;
use crate::transfer::{gather, transfer_domain_to_variables};

/// Converts every primitive of `detail` into one [`CurvesPrimitive`].
///
/// All primitives must be curves sharing one order (2 or 4) and one
/// open/closed state. Open order 4 curves get their end vertices made
/// explicit on every vertex variable. Point variables hold one value per
/// original vertex and are never padded; primitive and constant variables
/// are copied untouched.
pub fn curves_from_detail(detail: &Detail, options: &ConvertOptions) -> Result<CurvesPrimitive> {
    if let Some(index) = detail.primitives.iter().position(|prim| prim.as_curve().is_none()) {
        return Err(ConversionError::NonCurvePrimitive { index });
    }
    let Some(first) = detail.curves().next() else {
        return Err(ConversionError::NoCurves);
    };

    let periodic = first.closed;
    let order = first.order;
    let mut verts_per_curve = Vec::with_capacity(detail.primitives.len());
    let mut point_indices = Vec::with_capacity(detail.vertex_count());
    let points = detail.points.len();
    for (index, curve) in detail.curves().enumerate() {
        if curve.order != order {
            return Err(ConversionError::MixedOrder {
                expected: order,
                found: curve.order,
            });
        }
        if curve.closed != periodic {
            return Err(ConversionError::MixedPeriodicity);
        }
        if let Some(&point) = curve.vertices.iter().find(|&&point| point as usize >= points) {
            return Err(ConversionError::PointIndexOutOfRange {
                curve: index,
                index: point,
                points,
            });
        }
        verts_per_curve.push(curve.vertex_count() as u32);
        point_indices.extend_from_slice(&curve.vertices);
    }

    let basis = CubicBasis::from_order(order).ok_or(ConversionError::UnsupportedOrder(order))?;
    let duplicate_ends = basis == CubicBasis::BSpline && !periodic;

    if verts_per_curve.iter().all(|&count| count == 0) {
        return Err(ConversionError::NoVertices);
    }
    let empty_curves = verts_per_curve.iter().filter(|&&count| count == 0).count();
    if empty_curves > 0 {
        warn!("{} of {} curves have no vertices", empty_curves, verts_per_curve.len());
    }

    // Point data is read through each vertex, so shared or reordered points
    // come out in curve order with one entry per vertex.
    let mut result = CurvesPrimitive::new(verts_per_curve, basis, periodic);
    result.set_variable(
        POSITION,
        PrimitiveVariable::new(
            Interpolation::Point,
            VariableData::Vec3(gather(&detail.points, &point_indices)),
        ),
    );
    let filter = options.filter();
    for domain in AttributeDomain::ALL {
        transfer_domain_to_variables(detail, domain, &filter, &point_indices, &mut result)?;
    }

    debug!(
        "converted {} curves ({:?}, periodic: {}, duplicate ends: {})",
        result.num_curves(),
        basis,
        periodic,
        duplicate_ends
    );
    if !duplicate_ends {
        return Ok(result);
    }

    let original = result.verts_per_curve().to_vec();
    for variable in result.variables.values_mut() {
        if variable.interpolation == Interpolation::Vertex && variable.data.is_duplicable() {
            duplicate_variable_ends(&mut variable.data, &original)?;
        }
    }
    result.set_topology(padded_counts(&original), basis, periodic);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeStorage;

    fn detail_with_curves(curves: &[(usize, u32, bool)]) -> Detail {
        let mut detail = Detail::new();
        for &(count, order, closed) in curves {
            let vertices = (0..count)
                .map(|i| detail.add_point([i as f32, count as f32, 0.0]))
                .collect();
            detail.add_curve(vertices, order, closed);
        }
        detail
    }

    fn convert(detail: &Detail) -> Result<CurvesPrimitive> {
        curves_from_detail(detail, &ConvertOptions::default())
    }

    #[test]
    fn linear_curves_keep_counts() {
        let detail = detail_with_curves(&[(3, 2, false), (5, 2, false)]);
        let curves = convert(&detail).expect("convert");
        assert_eq!(curves.verts_per_curve(), &[3, 5]);
        assert_eq!(curves.basis(), CubicBasis::Linear);
        assert!(!curves.periodic());
        assert_eq!(
            curves.variable(POSITION).map(|p| p.data.len()),
            Some(detail.points.len())
        );
        assert!(curves.is_valid());
    }

    #[test]
    fn open_cubic_curves_grow_by_four() {
        let detail = detail_with_curves(&[(4, 4, false), (0, 4, false), (1, 4, false)]);
        let curves = convert(&detail).expect("convert");
        assert_eq!(curves.basis(), CubicBasis::BSpline);
        assert_eq!(curves.verts_per_curve(), &[8, 0, 5]);
    }

    #[test]
    fn closed_curves_are_never_padded() {
        for order in [2, 4] {
            let detail = detail_with_curves(&[(4, order, true), (6, order, true)]);
            let curves = convert(&detail).expect("convert");
            assert_eq!(curves.verts_per_curve(), &[4, 6]);
            assert!(curves.periodic());
        }
    }

    #[test]
    fn only_vertex_variables_are_padded() {
        let mut detail = detail_with_curves(&[(3, 4, false), (2, 4, false)]);
        detail
            .set_attribute(
                AttributeDomain::Vertex,
                "width",
                AttributeStorage::Float(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            )
            .expect("width");
        detail
            .set_attribute(AttributeDomain::Point, "mass", AttributeStorage::Float(vec![1.0; 5]))
            .expect("mass");
        detail
            .set_attribute(AttributeDomain::Primitive, "id", AttributeStorage::Int(vec![7, 8]))
            .expect("id");
        detail
            .set_attribute(
                AttributeDomain::Detail,
                "scale",
                AttributeStorage::Vec3(vec![[2.0; 3]]),
            )
            .expect("scale");

        let curves = convert(&detail).expect("convert");
        assert_eq!(curves.verts_per_curve(), &[7, 6]);
        let width = curves.variable("width").expect("width");
        assert_eq!(width.interpolation, Interpolation::Vertex);
        assert_eq!(
            width.data,
            VariableData::Float(vec![
                1.0, 1.0, 1.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 5.0, 5.0, 5.0
            ])
        );
        assert_eq!(curves.variable("mass").map(|v| v.data.len()), Some(5));
        assert_eq!(curves.variable(POSITION).map(|v| v.data.len()), Some(5));
        let id = curves.variable("id").expect("id");
        assert_eq!(id.interpolation, Interpolation::Primitive);
        assert_eq!(id.data, VariableData::Int(vec![7, 8]));
        let scale = curves.variable("scale").expect("scale");
        assert_eq!(scale.interpolation, Interpolation::Constant);
        assert_eq!(scale.data.len(), 1);
        assert!(curves.is_valid());
    }

    #[test]
    fn shared_points_are_read_per_vertex() {
        let mut detail = Detail::new();
        for i in 0..3 {
            detail.add_point([i as f32, 0.0, 0.0]);
        }
        detail.add_curve(vec![0, 1, 2], 4, false);
        detail.add_curve(vec![2, 1], 4, false);
        detail
            .set_attribute(AttributeDomain::Point, "id", AttributeStorage::Int(vec![10, 11, 12]))
            .expect("id");

        let curves = convert(&detail).expect("convert");
        assert_eq!(curves.verts_per_curve(), &[7, 6]);
        let positions = curves.variable(POSITION).expect("P");
        assert_eq!(positions.interpolation, Interpolation::Point);
        assert_eq!(
            positions.data,
            VariableData::Vec3(vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
            ])
        );
        assert_eq!(
            curves.variable("id").map(|id| &id.data),
            Some(&VariableData::Int(vec![10, 11, 12, 12, 11]))
        );
        assert!(curves.is_valid());
    }

    #[test]
    fn dangling_point_index_is_rejected() {
        let mut detail = Detail::new();
        detail.add_point([0.0; 3]);
        detail.add_curve(vec![0, 4], 2, false);
        assert_eq!(
            convert(&detail),
            Err(ConversionError::PointIndexOutOfRange {
                curve: 0,
                index: 4,
                points: 1,
            })
        );
    }

    #[test]
    fn conversion_is_repeatable() {
        let mut detail = detail_with_curves(&[(5, 4, false), (3, 4, false)]);
        detail
            .set_attribute(
                AttributeDomain::Vertex,
                "uv",
                AttributeStorage::Vec2((0..8).map(|i| [i as f32, 0.5]).collect()),
            )
            .expect("uv");
        let first = convert(&detail).expect("first");
        let second = convert(&detail).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn attribute_filter_limits_variables() {
        let mut detail = detail_with_curves(&[(2, 2, false)]);
        detail
            .set_attribute(AttributeDomain::Point, "Cd", AttributeStorage::Vec3(vec![[1.0; 3]; 2]))
            .expect("Cd");
        detail
            .set_attribute(
                AttributeDomain::Point,
                "rest",
                AttributeStorage::Vec3(vec![[0.0; 3]; 2]),
            )
            .expect("rest");
        let curves =
            curves_from_detail(&detail, &ConvertOptions::with_filter("* ^rest")).expect("convert");
        assert!(curves.variable("Cd").is_some());
        assert!(curves.variable("rest").is_none());
        assert!(curves.variable(POSITION).is_some());
    }

    #[test]
    fn empty_detail_has_no_curves() {
        assert_eq!(convert(&Detail::new()), Err(ConversionError::NoCurves));
    }

    #[test]
    fn non_curve_primitives_are_rejected() {
        let mut detail = detail_with_curves(&[(3, 2, false)]);
        detail.add_polygon(vec![0, 1, 2]);
        assert_eq!(
            convert(&detail),
            Err(ConversionError::NonCurvePrimitive { index: 1 })
        );

        let mut detail = Detail::new();
        detail.add_polygon(vec![]);
        assert_eq!(
            convert(&detail),
            Err(ConversionError::NonCurvePrimitive { index: 0 })
        );
    }

    #[test]
    fn differing_orders_are_rejected() {
        let detail = detail_with_curves(&[(3, 2, false), (4, 4, false)]);
        let err = convert(&detail).expect_err("mixed order");
        assert_eq!(
            err,
            ConversionError::MixedOrder {
                expected: 2,
                found: 4,
            }
        );
        assert!(err.to_string().contains("differing order"));
    }

    #[test]
    fn mixed_open_and_closed_are_rejected() {
        let detail = detail_with_curves(&[(4, 4, false), (4, 4, true)]);
        let err = convert(&detail).expect_err("mixed periodicity");
        assert_eq!(err, ConversionError::MixedPeriodicity);
        assert!(err.to_string().contains("both open and closed"));
    }

    #[test]
    fn unsupported_order_is_rejected() {
        let detail = detail_with_curves(&[(4, 3, false)]);
        assert_eq!(convert(&detail), Err(ConversionError::UnsupportedOrder(3)));
    }

    #[test]
    fn curves_without_vertices_are_rejected() {
        let detail = detail_with_curves(&[(0, 4, false), (0, 4, false)]);
        assert_eq!(convert(&detail), Err(ConversionError::NoVertices));
    }
}
