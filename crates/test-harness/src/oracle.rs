//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets tests collect all failures in one pass.

use mesh_kernel::{BoundingBox, Mesh, Point3};

use crate::helpers::directed_edge_counts;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Summarize a count of offending facets into a verdict.
fn count_verdict(name: &str, bad: usize, total: usize, ok: &str, bad_msg: &str) -> OracleVerdict {
    if bad == 0 {
        OracleVerdict::pass(name, format!("all {} facets {}", total, ok))
    } else {
        OracleVerdict::fail(name, format!("{} of {} facets {}", bad, total, bad_msg))
            .with_value(bad as f64)
    }
}

// ── Facet Oracles ───────────────────────────────────────────────────────────

/// Check that every stored normal has unit length.
pub fn check_unit_normals(mesh: &Mesh, tol: f64) -> OracleVerdict {
    let bad = mesh
        .facets()
        .iter()
        .filter(|f| (f.normal().length() - 1.0).abs() > tol)
        .count();
    count_verdict(
        "unit_normals",
        bad,
        mesh.len(),
        "have unit normals",
        "have non-unit normals",
    )
}

/// Check that every normal is orthogonal to its facet's three edges.
pub fn check_normals_orthogonal(mesh: &Mesh, tol: f64) -> OracleVerdict {
    let mut worst = 0.0f64;
    let mut bad = 0usize;
    for facet in mesh.facets() {
        let n = facet.normal();
        let [a, b, c] = *facet.vertices();
        let deviation = [b - a, c - b, a - c]
            .iter()
            .filter_map(|e| e.normalized())
            .map(|e| n.dot(&e).abs())
            .fold(0.0f64, f64::max);
        worst = worst.max(deviation);
        if deviation > tol {
            bad += 1;
        }
    }
    count_verdict(
        "normals_orthogonal",
        bad,
        mesh.len(),
        "have normals orthogonal to their edges",
        "have tilted normals",
    )
    .with_value(worst)
}

/// Check that stored normals agree with the right-hand vertex winding.
pub fn check_consistent_normals(mesh: &Mesh) -> OracleVerdict {
    let bad = mesh
        .facets()
        .iter()
        .filter(|f| {
            let [a, b, c] = *f.vertices();
            (b - a).cross(&(c - a)).dot(&f.normal()) <= 0.0
        })
        .count();
    count_verdict(
        "consistent_normals",
        bad,
        mesh.len(),
        "have consistent winding",
        "have reversed normals",
    )
}

/// Check that no facet is (near) flat relative to its own size: twice the
/// area over the squared longest edge must stay above 1e-12.
pub fn check_no_degenerate_triangles(mesh: &Mesh) -> OracleVerdict {
    let bad = mesh
        .facets()
        .iter()
        .filter(|f| {
            let [a, b, c] = *f.vertices();
            let longest = (b - a)
                .length_squared()
                .max((c - a).length_squared())
                .max((c - b).length_squared());
            2.0 * f.area() <= 1e-12 * longest
        })
        .count();
    count_verdict(
        "no_degenerate_triangles",
        bad,
        mesh.len(),
        "have non-zero area",
        "are degenerate",
    )
}

// ── Mesh Oracles ────────────────────────────────────────────────────────────

/// Check that the mesh is watertight and consistently oriented: every directed
/// edge appears once and is matched by exactly one opposite edge.
///
/// Uses position-based matching, so triangle soups with duplicated vertices work.
pub fn check_watertight_mesh(mesh: &Mesh) -> OracleVerdict {
    let edges = directed_edge_counts(mesh);
    let unpaired = edges
        .iter()
        .filter(|&(&(a, b), &count)| count != 1 || edges.get(&(b, a)) != Some(&1))
        .count();

    if unpaired == 0 {
        OracleVerdict::pass(
            "watertight_mesh",
            format!("all {} directed edges paired", edges.len()),
        )
    } else {
        OracleVerdict::fail(
            "watertight_mesh",
            format!(
                "{} unpaired edges out of {} directed edges",
                unpaired,
                edges.len()
            ),
        )
        .with_value(unpaired as f64)
    }
}

/// Check that the mesh bounds match `expected` within `tol` on every axis.
pub fn check_bounding_box(mesh: &Mesh, expected: &BoundingBox, tol: f64) -> OracleVerdict {
    let Some(actual) = mesh.bounding_box() else {
        return OracleVerdict::fail("bounding_box", "mesh has no facets".to_string());
    };
    let off = |a: &Point3, b: &Point3| {
        (a.x - b.x)
            .abs()
            .max((a.y - b.y).abs())
            .max((a.z - b.z).abs())
    };
    let deviation = off(&actual.min, &expected.min).max(off(&actual.max, &expected.max));
    let detail = format!(
        "({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
        actual.min.x, actual.min.y, actual.min.z, actual.max.x, actual.max.y, actual.max.z,
    );
    if deviation <= tol {
        OracleVerdict::pass("bounding_box", detail).with_value(deviation)
    } else {
        OracleVerdict::fail(
            "bounding_box",
            format!("{} deviates by {:.3e} (tol={})", detail, deviation, tol),
        )
        .with_value(deviation)
    }
}

// ── Composite ───────────────────────────────────────────────────────────────

/// Run every per-facet check on an assembled mesh.
pub fn run_all_mesh_checks(mesh: &Mesh) -> Vec<OracleVerdict> {
    vec![
        check_unit_normals(mesh, 1e-9),
        check_normals_orthogonal(mesh, 1e-9),
        check_consistent_normals(mesh),
        check_no_degenerate_triangles(mesh),
    ]
}
