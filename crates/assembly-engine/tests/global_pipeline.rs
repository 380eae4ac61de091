//! The process-wide catalog is installed once per test binary, so this file
//! holds a single test.

use assembly_engine::{CatalogPipeline, JobPipeline};
use component_catalog::embedded::{default_catalog, UNIT_CUBE};
use component_catalog::{global, CatalogError};
use job_model::{JobDescriptor, Placement};

#[test]
fn pipeline_over_process_catalog() {
    assert_eq!(CatalogPipeline::global().unwrap_err(), CatalogError::NotReady);

    global::load(default_catalog().unwrap()).unwrap();
    let pipeline = CatalogPipeline::global().unwrap();
    assert!(pipeline.catalog().contains(UNIT_CUBE));

    let out = pipeline
        .build(JobDescriptor::new(vec![Placement::new(UNIT_CUBE)]))
        .unwrap();
    assert_eq!(out.facet_count, 12);
}
