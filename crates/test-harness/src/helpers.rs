//! Helper functions: error type, fixture meshes and catalogs, mesh math.

use std::collections::HashMap;

use component_catalog::embedded::{cuboid, u_shell, unit_cube, UNIT_CUBE, U_SHELL};
use component_catalog::{Catalog, CatalogError};
use mesh_kernel::{Facet, FacetError, Mesh, Point3};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("STL error: {reason}")]
    StlError { reason: String },

    #[error("fixture error: {0}")]
    Fixture(#[from] FacetError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] assembly_engine::PipelineError),
}

// ── Fixtures ────────────────────────────────────────────────────────────────

/// Catalog key of [`tetrahedron`] in [`fixture_catalog`].
pub const TETRA: &str = "tetra";

/// Catalog key of the 2 x 1 x 0.5 slab in [`fixture_catalog`].
pub const SLAB: &str = "slab";

/// Single right triangle in the XY plane, normal +Z.
pub fn triangle() -> Result<Mesh, HarnessError> {
    let facet = Facet::from_vertices([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ])?;
    Ok(Mesh::new(vec![facet]))
}

/// Closed corner tetrahedron with outward normals.
pub fn tetrahedron() -> Result<Mesh, HarnessError> {
    let o = Point3::ORIGIN;
    let x = Point3::new(1.0, 0.0, 0.0);
    let y = Point3::new(0.0, 1.0, 0.0);
    let z = Point3::new(0.0, 0.0, 1.0);
    let facets = [[o, y, x], [o, x, z], [o, z, y], [x, y, z]]
        .into_iter()
        .map(Facet::from_vertices)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Mesh::new(facets))
}

/// Built-in templates plus [`TETRA`] and [`SLAB`].
pub fn fixture_catalog() -> Result<Catalog, HarnessError> {
    let slab = cuboid(Point3::ORIGIN, Point3::new(2.0, 1.0, 0.5))?;
    Ok(Catalog::builder()
        .insert(U_SHELL, u_shell()?)?
        .insert(UNIT_CUBE, unit_cube()?)?
        .insert(TETRA, tetrahedron()?)?
        .insert(SLAB, slab)?
        .build())
}

// ── Mesh Math Utilities ─────────────────────────────────────────────────────

/// Enclosed volume of a closed mesh by the divergence theorem.
///
/// For open meshes the result is meaningless.
pub fn mesh_volume(mesh: &Mesh) -> f64 {
    let mut volume = 0.0f64;
    for facet in mesh.facets() {
        let [a, b, c] = *facet.vertices();
        // Signed volume of the tetrahedron spanned with the origin.
        volume += a.to_vec3().dot(&b.to_vec3().cross(&c.to_vec3()));
    }
    volume / 6.0
}

/// Total surface area of all facets.
pub fn mesh_surface_area(mesh: &Mesh) -> f64 {
    mesh.facets().iter().map(Facet::area).sum()
}

/// Vertex position rounded to 1e-6 for position-based edge matching.
pub(crate) fn vertex_key(p: &Point3) -> (i64, i64, i64) {
    fn quantize(v: f64) -> i64 {
        (v * 1e6).round() as i64
    }
    (quantize(p.x), quantize(p.y), quantize(p.z))
}

type PosEdge = ((i64, i64, i64), (i64, i64, i64));

/// Directed edges of every facet, keyed by quantized position.
pub(crate) fn directed_edge_counts(mesh: &Mesh) -> HashMap<PosEdge, usize> {
    let mut counts: HashMap<PosEdge, usize> = HashMap::new();
    for facet in mesh.facets() {
        let [a, b, c] = (*facet.vertices()).map(|v| vertex_key(&v));
        for edge in [(a, b), (b, c), (c, a)] {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }
    counts
}

/// Count mesh edges: returns (total_edges, boundary_edges).
///
/// A boundary edge is used by exactly one facet. For a watertight mesh,
/// boundary_edges should be 0.
pub fn count_mesh_edges(mesh: &Mesh) -> (usize, usize) {
    let mut undirected: HashMap<PosEdge, usize> = HashMap::new();
    for ((a, b), count) in directed_edge_counts(mesh) {
        let key = if a <= b { (a, b) } else { (b, a) };
        *undirected.entry(key).or_insert(0) += count;
    }
    let total = undirected.len();
    let boundary = undirected.values().filter(|&&c| c == 1).count();
    (total, boundary)
}
