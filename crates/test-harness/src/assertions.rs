//! Assertion helpers with diagnostic output.
//!
//! Failures carry expected vs actual values and a context tag so a scenario can
//! report which step went wrong.

use mesh_kernel::{Mesh, Point3};

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;
use crate::stl::StlSolid;

/// Assert the mesh bounding box matches expected corners within tolerance.
pub fn assert_bounding_box(
    mesh: &Mesh,
    expected_min: Point3,
    expected_max: Point3,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let Some(actual) = mesh.bounding_box() else {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{}] mesh is empty, no bounding box", ctx),
        });
    };

    let corners = [
        ("min", actual.min, expected_min),
        ("max", actual.max, expected_max),
    ];
    for (label, got, want) in corners {
        for (axis, g, w) in [("x", got.x, want.x), ("y", got.y, want.y), ("z", got.z, want.z)] {
            if (g - w).abs() > tol {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] bounding box {}.{}: expected {:.6}, got {:.6} (tol={})",
                        ctx, label, axis, w, g, tol,
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Assert every verdict passed, reporting the first failure.
pub fn assert_all_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    match verdicts.iter().find(|v| !v.passed) {
        None => Ok(()),
        Some(v) => Err(HarnessError::OracleFailure {
            oracle: v.oracle_name.clone(),
            detail: format!("[{}] {}", ctx, v.detail),
        }),
    }
}

/// Assert that a re-read STL solid matches `mesh` facet for facet within `tol`.
pub fn assert_solid_matches(
    solid: &StlSolid,
    mesh: &Mesh,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if solid.facets.len() != mesh.len() {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} facets, read back {}",
                ctx,
                mesh.len(),
                solid.facets.len()
            ),
        });
    }

    for (index, (read, orig)) in solid.facets.iter().zip(mesh.facets()).enumerate() {
        for (corner, (rv, ov)) in read.vertices.iter().zip(orig.vertices()).enumerate() {
            let deviation = rv
                .iter()
                .zip(ov.to_array())
                .map(|(r, o)| (r - o).abs())
                .fold(0.0f64, f64::max);
            if deviation > tol {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] facet {} vertex {}: read {:?}, expected {:?} (tol={})",
                        ctx,
                        index,
                        corner,
                        rv,
                        ov.to_array(),
                        tol,
                    ),
                });
            }
        }
    }
    Ok(())
}
