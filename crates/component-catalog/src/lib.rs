//! Component catalog: named, immutable reference meshes.
//!
//! Templates are added through [`CatalogBuilder`] (in-memory meshes, STL bytes,
//! STL files) and frozen into a [`Catalog`]. [`embedded::default_catalog`]
//! provides the built-in templates, and [`global`] holds a process-wide
//! instance for hosts that want one.

pub mod catalog;
pub mod embedded;
pub mod errors;
pub mod global;

pub use catalog::{mesh_from_stl, Catalog, CatalogBuilder};
pub use errors::CatalogError;
