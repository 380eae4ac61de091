//! Assembly engine: resolves a job's placements against the component
//! catalog, transforms each reference mesh and merges the results into one
//! [`AssembledOutput`].
//!
//! [`CatalogPipeline`] wires the whole path from a JSON document to STL bytes:
//!
//! ```text
//! JSON -> job_model::parse -> assemble -> stl_format::serialize -> bytes
//! ```

pub mod assemble;
pub mod pipeline;
pub mod types;

pub use assemble::{assemble, assemble_with};
pub use pipeline::{CatalogPipeline, JobPipeline};
pub use types::{AssembledOutput, AssemblyConfig, AssemblyError, PipelineError, RenderedJob};
