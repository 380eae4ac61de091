use job_model::ParseError;
use mesh_kernel::{BoundingBox, Mesh, Tolerance};
use serde::Serialize;
use stl_format::{SerializeError, StlFormat};

/// Tuning for an assembly run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssemblyConfig {
    /// Facet validation thresholds applied to every transformed facet.
    pub tolerance: Tolerance,
}

impl AssemblyConfig {
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }
}

/// The merged mesh of one job, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledOutput {
    pub job_id: String,
    /// Solid name written into the STL output.
    pub name: String,
    pub format: StlFormat,
    pub mesh: Mesh,
    pub facet_count: usize,
    /// `None` when the job produced no facets.
    pub bounds: Option<BoundingBox>,
}

/// Errors that abort an assembly. No partial mesh is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("placement {placement} ({template}): facet {facet} is degenerate after transform")]
    DegenerateFacet {
        placement: usize,
        template: String,
        facet: usize,
    },

    #[error("placement {placement} ({template}): transform produced non-finite coordinates")]
    NonFiniteGeometry { placement: usize, template: String },
}

/// Any failure along parse, assemble, serialize.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Result of rendering a job document end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedJob {
    pub output: AssembledOutput,
    /// Serialized STL in the job's requested format.
    pub bytes: Vec<u8>,
    /// Soft parse failures absorbed while reading the document.
    pub warnings: Vec<ParseError>,
}
