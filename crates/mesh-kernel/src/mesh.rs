use serde::Serialize;

use crate::geometry::{BoundingBox, Point3, Transform, Vec3};
use crate::Tolerance;

/// Errors raised when a triangle cannot form a valid facet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FacetError {
    #[error("degenerate facet: vertices are collinear or coincident")]
    Degenerate,

    #[error("facet has a non-finite coordinate")]
    NonFinite,
}

/// A facet error tagged with the position of the offending facet in its mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("facet {index}: {source}")]
pub struct MeshError {
    pub index: usize,
    pub source: FacetError,
}

/// How a transform treats facet normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalMode {
    /// Push the stored normal through the linear part of the transform.
    /// Only valid for rotations combined with uniform positive scale.
    Carry,
    /// Rebuild the normal from the transformed triangle's winding.
    Recompute,
}

/// One triangle with a unit outward normal.
///
/// Vertex order follows the right-hand rule around the normal. A facet can only
/// be built through the checked constructors, so every instance is finite and
/// non-degenerate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    normal: Vec3,
    vertices: [Point3; 3],
}

impl Facet {
    /// Build a facet whose normal comes from the vertex winding.
    pub fn from_vertices(vertices: [Point3; 3]) -> Result<Self, FacetError> {
        Self::try_new(None, vertices, &Tolerance::default())
    }

    /// Build a facet from a stored normal, falling back to the winding normal
    /// when the stored one is missing, not unit length or disagrees with the winding.
    pub fn with_normal(normal: Vec3, vertices: [Point3; 3]) -> Result<Self, FacetError> {
        Self::try_new(Some(normal), vertices, &Tolerance::default())
    }

    pub fn try_new(
        normal: Option<Vec3>,
        vertices: [Point3; 3],
        tol: &Tolerance,
    ) -> Result<Self, FacetError> {
        if !vertices.iter().all(Point3::is_finite) {
            return Err(FacetError::NonFinite);
        }
        let winding = winding_normal(&vertices, tol)?;
        let normal = match normal {
            Some(n) if tol.accepts_normal(&n, &winding) => n,
            _ => winding,
        };
        Ok(Self { normal, vertices })
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a)).length() * 0.5
    }

    /// Copy of this facet with every vertex mapped through `transform`.
    pub fn transformed(
        &self,
        transform: &Transform,
        mode: NormalMode,
        tol: &Tolerance,
    ) -> Result<Self, FacetError> {
        let vertices = self.vertices.map(|v| transform.transform_point(&v));
        if !vertices.iter().all(Point3::is_finite) {
            return Err(FacetError::NonFinite);
        }
        let winding = winding_normal(&vertices, tol)?;
        let normal = match mode {
            NormalMode::Carry => transform
                .transform_vector(&self.normal)
                .normalized()
                .unwrap_or(winding),
            NormalMode::Recompute => winding,
        };
        Ok(Self { normal, vertices })
    }
}

/// Unit normal implied by the vertex order, or `Degenerate` for a triangle too
/// flat for `tol`.
///
/// Edges are divided by their largest component first, so the check sees shape
/// rather than size and cannot overflow or underflow.
fn winding_normal(vertices: &[Point3; 3], tol: &Tolerance) -> Result<Vec3, FacetError> {
    let [a, b, c] = *vertices;
    let edges = [b - a, c - a, c - b];
    let extent = edges.iter().map(Vec3::max_abs).fold(0.0, f64::max);
    if extent == 0.0 || !extent.is_finite() {
        return Err(FacetError::Degenerate);
    }
    let [ab, ac, bc] = edges.map(|e| e / extent);
    let longest = ab
        .length_squared()
        .max(ac.length_squared())
        .max(bc.length_squared());
    let cross = ab.cross(&ac);
    if cross.length() <= tol.relative_area * longest {
        return Err(FacetError::Degenerate);
    }
    cross.normalized().ok_or(FacetError::Degenerate)
}

/// An ordered triangle soup.
///
/// No vertex sharing is tracked, so meshes concatenate and transform facet by facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    facets: Vec<Facet>,
}

impl Mesh {
    pub fn new(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn into_facets(self) -> Vec<Facet> {
        self.facets
    }

    pub fn push(&mut self, facet: Facet) {
        self.facets.push(facet);
    }

    /// Append all facets of `other` after the existing ones.
    pub fn append(&mut self, other: Mesh) {
        self.facets.extend(other.facets);
    }

    /// Concatenate meshes in iteration order.
    pub fn concat<I>(meshes: I) -> Self
    where
        I: IntoIterator<Item = Mesh>,
    {
        let mut out = Mesh::empty();
        for mesh in meshes {
            out.append(mesh);
        }
        out
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.facets.iter().flat_map(|f| f.vertices.iter())
    }

    /// Axis-aligned bounds of every vertex; `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices())
    }

    /// Copy of this mesh with every facet transformed.
    pub fn transformed(
        &self,
        transform: &Transform,
        mode: NormalMode,
        tol: &Tolerance,
    ) -> Result<Mesh, MeshError> {
        self.facets
            .iter()
            .enumerate()
            .map(|(index, f)| {
                f.transformed(transform, mode, tol)
                    .map_err(|source| MeshError { index, source })
            })
            .collect()
    }
}

impl FromIterator<Facet> for Mesh {
    fn from_iter<T: IntoIterator<Item = Facet>>(iter: T) -> Self {
        Self {
            facets: iter.into_iter().collect(),
        }
    }
}

impl Extend<Facet> for Mesh {
    fn extend<T: IntoIterator<Item = Facet>>(&mut self, iter: T) {
        self.facets.extend(iter);
    }
}
