use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const POSITION: &str = "P";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    Constant,
    Primitive,
    Point,
    Vertex,
}

/// Shared basis of every curve in a [`CurvesPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubicBasis {
    Linear,
    /// Uniform cubic B-spline.
    BSpline,
}

impl CubicBasis {
    pub fn from_order(order: u32) -> Option<Self> {
        match order {
            2 => Some(CubicBasis::Linear),
            4 => Some(CubicBasis::BSpline),
            _ => None,
        }
    }

    pub fn order(self) -> u32 {
        match self {
            CubicBasis::Linear => 2,
            CubicBasis::BSpline => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableData {
    Float(Vec<f32>),
    Int(Vec<i32>),
    Vec2(Vec<[f32; 2]>),
    Vec3(Vec<[f32; 3]>),
    Vec4(Vec<[f32; 4]>),
}

impl VariableData {
    pub fn len(&self) -> usize {
        match self {
            VariableData::Float(values) => values.len(),
            VariableData::Int(values) => values.len(),
            VariableData::Vec2(values) => values.len(),
            VariableData::Vec3(values) => values.len(),
            VariableData::Vec4(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            VariableData::Float(_) => DataType::Float,
            VariableData::Int(_) => DataType::Int,
            VariableData::Vec2(_) => DataType::Vec2,
            VariableData::Vec3(_) => DataType::Vec3,
            VariableData::Vec4(_) => DataType::Vec4,
        }
    }

    /// Whether the data is a per-element array whose end values can be
    /// repeated or dropped without changing its type.
    pub fn is_duplicable(&self) -> bool {
        match self {
            VariableData::Float(_)
            | VariableData::Int(_)
            | VariableData::Vec2(_)
            | VariableData::Vec3(_)
            | VariableData::Vec4(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveVariable {
    pub interpolation: Interpolation,
    pub data: VariableData,
}

impl PrimitiveVariable {
    pub fn new(interpolation: Interpolation, data: VariableData) -> Self {
        Self {
            interpolation,
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub min: Vec3,
    pub max: Vec3,
}

/// A batch of curves sharing one basis and one periodicity.
///
/// Curve `i` owns the next `verts_per_curve[i]` entries of every
/// [`Interpolation::Vertex`] variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvesPrimitive {
    verts_per_curve: Vec<u32>,
    basis: CubicBasis,
    periodic: bool,
    pub variables: BTreeMap<String, PrimitiveVariable>,
}

impl Default for CurvesPrimitive {
    fn default() -> Self {
        Self::new(Vec::new(), CubicBasis::Linear, false)
    }
}

impl CurvesPrimitive {
    pub fn new(verts_per_curve: Vec<u32>, basis: CubicBasis, periodic: bool) -> Self {
        Self {
            verts_per_curve,
            basis,
            periodic,
            variables: BTreeMap::new(),
        }
    }

    pub fn set_topology(&mut self, verts_per_curve: Vec<u32>, basis: CubicBasis, periodic: bool) {
        self.verts_per_curve = verts_per_curve;
        self.basis = basis;
        self.periodic = periodic;
    }

    pub fn verts_per_curve(&self) -> &[u32] {
        &self.verts_per_curve
    }

    pub fn basis(&self) -> CubicBasis {
        self.basis
    }

    pub fn periodic(&self) -> bool {
        self.periodic
    }

    pub fn num_curves(&self) -> usize {
        self.verts_per_curve.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.verts_per_curve.iter().map(|&count| count as usize).sum()
    }

    pub fn variable(&self, name: &str) -> Option<&PrimitiveVariable> {
        self.variables.get(name)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, variable: PrimitiveVariable) {
        self.variables.insert(name.into(), variable);
    }

    /// Expected element count for a variable of the given interpolation.
    pub fn variable_size(&self, interpolation: Interpolation) -> usize {
        match interpolation {
            Interpolation::Constant => 1,
            Interpolation::Primitive => self.num_curves(),
            Interpolation::Vertex => self.num_vertices(),
            Interpolation::Point => self
                .variables
                .get(POSITION)
                .filter(|variable| variable.interpolation == Interpolation::Point)
                .map(|variable| variable.data.len())
                .unwrap_or_else(|| self.num_vertices()),
        }
    }

    /// Returns the name of the first variable whose length disagrees with
    /// the topology.
    pub fn first_invalid_variable(&self) -> Option<&str> {
        self.variables
            .iter()
            .find(|(_, variable)| variable.data.len() != self.variable_size(variable.interpolation))
            .map(|(name, _)| name.as_str())
    }

    pub fn is_valid(&self) -> bool {
        self.first_invalid_variable().is_none()
    }

    pub fn bound(&self) -> Option<Bound> {
        let VariableData::Vec3(positions) = &self.variables.get(POSITION)?.data else {
            return None;
        };
        let mut iter = positions.iter().map(|p| Vec3::from(*p));
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Bound { min, max })
    }
}
