//! Geometry kernel and triangle-soup mesh value type.
//!
//! - [`geometry`]: points, vectors, affine transforms, bounding boxes
//! - [`mesh`]: validated facets and the [`Mesh`] container

pub mod geometry;
pub mod mesh;

pub use geometry::{BoundingBox, Point3, Transform, Vec3};
pub use mesh::{Facet, FacetError, Mesh, MeshError, NormalMode};

/// Tolerance configuration for facet validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Triangles whose doubled area, divided by the squared length of their
    /// longest edge, is at or below this are degenerate. The ratio depends on
    /// shape only, so arbitrarily small triangles stay valid.
    pub relative_area: f64,
    /// Maximum deviation from 1.0 for a stored normal to count as unit length.
    pub unit_length: f64,
    /// A stored normal is kept only if its dot product with the winding
    /// normal is at least `1.0 - alignment`.
    pub alignment: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative_area: 1e-12,
            unit_length: 1e-6,
            alignment: 1e-6,
        }
    }
}

impl Tolerance {
    /// Default tolerance with a custom degenerate-shape threshold.
    pub fn with_relative_area(relative_area: f64) -> Self {
        Self {
            relative_area,
            ..Self::default()
        }
    }

    pub fn is_unit(&self, v: &Vec3) -> bool {
        v.is_finite() && (v.length() - 1.0).abs() <= self.unit_length
    }

    /// Whether a stored normal can stand in for the winding normal `winding`.
    pub fn accepts_normal(&self, normal: &Vec3, winding: &Vec3) -> bool {
        self.is_unit(normal) && normal.dot(winding) >= 1.0 - self.alignment
    }
}
