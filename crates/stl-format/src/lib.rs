//! STL solid-file serialization.
//!
//! [`serialize`] renders a [`mesh_kernel::Mesh`] as ASCII or binary STL.

pub mod errors;
pub mod write;

pub use errors::SerializeError;
pub use write::{serialize, solid_name, to_ascii, to_binary, StlFormat, DEFAULT_SOLID_NAME};
