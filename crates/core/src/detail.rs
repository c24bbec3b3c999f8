use crate::attributes::{
    AttributeDomain, AttributeError, AttributeInfo, AttributeRef, AttributeStorage, AttributeType,
    DetailAttributes,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePrimitive {
    /// Point index of each vertex, in curve order.
    pub vertices: Vec<u32>,
    pub order: u32,
    pub closed: bool,
}

impl CurvePrimitive {
    pub fn new(vertices: Vec<u32>, order: u32, closed: bool) -> Self {
        Self {
            vertices,
            order,
            closed,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Curve(CurvePrimitive),
    Polygon(Polygon),
}

impl Primitive {
    pub fn vertices(&self) -> &[u32] {
        match self {
            Primitive::Curve(curve) => &curve.vertices,
            Primitive::Polygon(poly) => &poly.vertices,
        }
    }

    pub fn as_curve(&self) -> Option<&CurvePrimitive> {
        match self {
            Primitive::Curve(curve) => Some(curve),
            Primitive::Polygon(_) => None,
        }
    }
}

/// Mutable host geometry container: shared points, primitives that
/// reference them through vertices, and attributes on all four domains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detail {
    pub points: Vec<[f32; 3]>,
    pub primitives: Vec<Primitive>,
    pub attributes: DetailAttributes,
}

impl Detail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, position: [f32; 3]) -> u32 {
        self.points.push(position);
        (self.points.len() - 1) as u32
    }

    pub fn add_curve(&mut self, vertices: Vec<u32>, order: u32, closed: bool) -> usize {
        self.primitives
            .push(Primitive::Curve(CurvePrimitive::new(vertices, order, closed)));
        self.primitives.len() - 1
    }

    pub fn add_polygon(&mut self, vertices: Vec<u32>) -> usize {
        self.primitives.push(Primitive::Polygon(Polygon { vertices }));
        self.primitives.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|prim| prim.vertices().len()).sum()
    }

    pub fn curves(&self) -> impl Iterator<Item = &CurvePrimitive> {
        self.primitives.iter().filter_map(Primitive::as_curve)
    }

    pub fn attribute_domain_len(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Point => self.points.len(),
            AttributeDomain::Vertex => self.vertex_count(),
            AttributeDomain::Primitive => self.primitives.len(),
            AttributeDomain::Detail => 1,
        }
    }

    pub fn list_attributes(&self) -> Vec<AttributeInfo> {
        let mut list = Vec::new();
        if !self.points.is_empty() {
            list.push(AttributeInfo {
                name: "P".to_string(),
                domain: AttributeDomain::Point,
                data_type: AttributeType::Vec3,
                len: self.points.len(),
                implicit: true,
            });
        }
        for domain in AttributeDomain::ALL {
            for (name, storage) in self.attributes.map(domain) {
                list.push(AttributeInfo {
                    name: name.clone(),
                    domain,
                    data_type: storage.data_type(),
                    len: storage.len(),
                    implicit: false,
                });
            }
        }
        list
    }

    pub fn attribute(&self, domain: AttributeDomain, name: &str) -> Option<AttributeRef<'_>> {
        match (name, domain) {
            ("P", AttributeDomain::Point) => Some(AttributeRef::Vec3(self.points.as_slice())),
            _ => self
                .attributes
                .get(domain, name)
                .map(AttributeStorage::as_ref),
        }
    }

    pub fn set_attribute(
        &mut self,
        domain: AttributeDomain,
        name: impl Into<String>,
        storage: AttributeStorage,
    ) -> Result<(), AttributeError> {
        let name = name.into();
        let expected_len = self.attribute_domain_len(domain);
        let actual_len = storage.len();
        if expected_len != 0 && actual_len != expected_len {
            return Err(AttributeError::InvalidLength {
                expected: expected_len,
                actual: actual_len,
            });
        }

        match (name.as_str(), domain) {
            ("P", AttributeDomain::Point) => {
                return match storage {
                    AttributeStorage::Vec3(values) => {
                        self.points = values;
                        Ok(())
                    }
                    other => Err(AttributeError::InvalidType {
                        expected: AttributeType::Vec3,
                        actual: other.data_type(),
                    }),
                };
            }
            ("P", _) => return Err(AttributeError::InvalidDomain),
            _ => {}
        }

        self.attributes.map_mut(domain).insert(name, storage);
        Ok(())
    }

    pub fn remove_attribute(
        &mut self,
        domain: AttributeDomain,
        name: &str,
    ) -> Option<AttributeStorage> {
        match (name, domain) {
            ("P", AttributeDomain::Point) => None,
            _ => self.attributes.remove(domain, name),
        }
    }

    /// Appends `values` for freshly added elements of `domain`.
    ///
    /// `existing` is the element count the domain had before the new
    /// elements were created; a missing attribute is zero-filled for them.
    pub(crate) fn append_attribute(
        &mut self,
        domain: AttributeDomain,
        name: &str,
        values: &AttributeStorage,
        existing: usize,
    ) -> Result<(), AttributeError> {
        let map = self.attributes.map_mut(domain);
        let storage = map
            .entry(name.to_string())
            .or_insert_with(|| AttributeStorage::with_default(values.data_type(), existing));
        storage.resize_default(existing);
        storage.append(values)
    }

    /// Zero-extends every attribute of `domain` to the current element count.
    pub(crate) fn pad_attributes(&mut self, domain: AttributeDomain) {
        let len = self.attribute_domain_len(domain);
        for storage in self.attributes.map_mut(domain).values_mut() {
            if storage.len() < len {
                storage.resize_default(len);
            }
        }
    }
}
