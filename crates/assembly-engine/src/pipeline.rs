use component_catalog::{global, Catalog, CatalogError};
use job_model::JobDescriptor;
use serde_json::Value;
use tracing::{info, instrument};

use crate::assemble::assemble_with;
use crate::types::{AssembledOutput, AssemblyConfig, PipelineError, RenderedJob};

/// Something that turns a parsed job into an assembled mesh.
///
/// Hosts hold a `&dyn JobPipeline` so that the catalog source, or a test
/// double, can be swapped without touching request handling.
pub trait JobPipeline {
    fn build(&self, job: JobDescriptor) -> Result<AssembledOutput, PipelineError>;
}

/// Pipeline backed by an in-memory catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPipeline<'c> {
    catalog: &'c Catalog,
    config: AssemblyConfig,
}

impl<'c> CatalogPipeline<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            config: AssemblyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AssemblyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Parse, assemble and serialize one job document.
    #[instrument(skip_all)]
    pub fn render(&self, document: &Value) -> Result<RenderedJob, PipelineError> {
        let parsed = job_model::parse(document)?;
        let output = self.build(parsed.job)?;
        let bytes = stl_format::serialize(&output.mesh, &output.name, output.format)?;
        info!(
            job_id = %output.job_id,
            facets = output.facet_count,
            bytes = bytes.len(),
            warnings = parsed.warnings.len(),
            "job rendered"
        );
        Ok(RenderedJob {
            output,
            bytes,
            warnings: parsed.warnings,
        })
    }

    /// [`render`](Self::render) for JSON text.
    pub fn render_str(&self, json: &str) -> Result<RenderedJob, PipelineError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| job_model::ParseError::InvalidDocument(e.to_string()))?;
        self.render(&document)
    }
}

impl CatalogPipeline<'static> {
    /// Pipeline over the process catalog. Fails until [`global::load`] has run.
    pub fn global() -> Result<Self, CatalogError> {
        global::global().map(CatalogPipeline::new)
    }
}

impl JobPipeline for CatalogPipeline<'_> {
    fn build(&self, job: JobDescriptor) -> Result<AssembledOutput, PipelineError> {
        Ok(assemble_with(job, self.catalog, &self.config)?)
    }
}
