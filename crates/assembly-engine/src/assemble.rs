use component_catalog::Catalog;
use job_model::{JobDescriptor, Placement};
use mesh_kernel::{FacetError, Mesh, MeshError, NormalMode, Tolerance};
use tracing::{debug, info, instrument};

use crate::types::{AssembledOutput, AssemblyConfig, AssemblyError};

/// Assemble a job with the default configuration.
pub fn assemble(job: JobDescriptor, catalog: &Catalog) -> Result<AssembledOutput, AssemblyError> {
    assemble_with(job, catalog, &AssemblyConfig::default())
}

/// Resolve every placement against `catalog`, transform it, and merge the
/// results in placement order.
#[instrument(skip_all, fields(job_id = job.id(), placements = job.placements().len()))]
pub fn assemble_with(
    job: JobDescriptor,
    catalog: &Catalog,
    config: &AssemblyConfig,
) -> Result<AssembledOutput, AssemblyError> {
    let mut parts = Vec::with_capacity(job.placements().len());
    for (index, placement) in job.placements().iter().enumerate() {
        let reference = catalog
            .lookup(&placement.template)
            .map_err(|_| AssemblyError::UnknownTemplate(placement.template.clone()))?;
        let part = place(index, placement, reference, &config.tolerance)?;
        debug!(
            placement = index,
            template = %placement.template,
            facets = part.len(),
            "placement resolved"
        );
        parts.push(part);
    }

    let mesh = Mesh::concat(parts);
    let bounds = mesh.bounding_box();
    let facet_count = mesh.len();
    info!(facets = facet_count, "job assembled");

    Ok(AssembledOutput {
        job_id: job.id().to_string(),
        name: job.name().to_string(),
        format: job.format(),
        mesh,
        facet_count,
        bounds,
    })
}

/// One placed copy of a reference mesh.
fn place(
    index: usize,
    placement: &Placement,
    reference: &Mesh,
    tol: &Tolerance,
) -> Result<Mesh, AssemblyError> {
    // Identity placements keep the reference facets bit for bit.
    if placement.is_identity() {
        return Ok(reference.clone());
    }

    let mode = if placement.has_uniform_scale() {
        NormalMode::Carry
    } else {
        NormalMode::Recompute
    };
    reference
        .transformed(&placement.transform(), mode, tol)
        .map_err(|MeshError { index: facet, source }| match source {
            FacetError::Degenerate => AssemblyError::DegenerateFacet {
                placement: index,
                template: placement.template.clone(),
                facet,
            },
            FacetError::NonFinite => AssemblyError::NonFiniteGeometry {
                placement: index,
                template: placement.template.clone(),
            },
        })
}
