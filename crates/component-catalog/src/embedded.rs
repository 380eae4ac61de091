//! Built-in component templates.

use std::io::Cursor;

use mesh_kernel::{Facet, Mesh, Point3};

use crate::catalog::{read_template, Catalog};
use crate::errors::CatalogError;

/// U-shaped shell carcass, 98 x 97 x 157.5.
pub const U_SHELL: &str = "u_shell";
/// Axis-aligned 1 x 1 x 1 box with its minimum corner at the origin.
pub const UNIT_CUBE: &str = "unit_cube";

const U_SHELL_STL: &str = include_str!("../assets/u_shell.stl");

pub fn u_shell() -> Result<Mesh, CatalogError> {
    read_template(U_SHELL, &mut Cursor::new(U_SHELL_STL.as_bytes()))
}

pub fn unit_cube() -> Result<Mesh, CatalogError> {
    cuboid(Point3::ORIGIN, Point3::new(1.0, 1.0, 1.0)).map_err(|e| match e {
        CatalogError::InvalidFacet { index, source, .. } => CatalogError::InvalidFacet {
            name: UNIT_CUBE.to_string(),
            index,
            source,
        },
        other => other,
    })
}

/// Closed axis-aligned box between `min` and `max`, 12 facets wound outward.
pub fn cuboid(min: Point3, max: Point3) -> Result<Mesh, CatalogError> {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    let v = [
        Point3::new(x0, y0, z0),
        Point3::new(x1, y0, z0),
        Point3::new(x1, y1, z0),
        Point3::new(x0, y1, z0),
        Point3::new(x0, y0, z1),
        Point3::new(x1, y0, z1),
        Point3::new(x1, y1, z1),
        Point3::new(x0, y1, z1),
    ];
    // Counter-clockwise seen from outside.
    let quads: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // z = z0
        [4, 5, 6, 7], // z = z1
        [0, 4, 7, 3], // x = x0
        [1, 2, 6, 5], // x = x1
        [0, 1, 5, 4], // y = y0
        [3, 7, 6, 2], // y = y1
    ];

    let mut facets = Vec::with_capacity(12);
    for [a, b, c, d] in quads {
        for tri in [[v[a], v[b], v[c]], [v[a], v[c], v[d]]] {
            let facet = Facet::from_vertices(tri).map_err(|source| CatalogError::InvalidFacet {
                name: "cuboid".to_string(),
                index: facets.len(),
                source,
            })?;
            facets.push(facet);
        }
    }
    Ok(Mesh::new(facets))
}

/// Catalog holding every built-in template.
pub fn default_catalog() -> Result<Catalog, CatalogError> {
    Ok(Catalog::builder()
        .insert(U_SHELL, u_shell()?)?
        .insert(UNIT_CUBE, unit_cube()?)?
        .build())
}
