//! End-to-end scenarios: JSON document in, STL bytes out.

use assembly_engine::{AssemblyError, CatalogPipeline, PipelineError};
use component_catalog::embedded::{UNIT_CUBE, U_SHELL};
use job_model::ParseError;
use mesh_kernel::Point3;
use serde_json::json;
use test_harness::assertions::{assert_all_pass, assert_bounding_box, assert_solid_matches};
use test_harness::helpers::{fixture_catalog, mesh_volume, SLAB, TETRA};
use test_harness::oracle::{check_watertight_mesh, run_all_mesh_checks};
use test_harness::stl::read_ascii;
use test_harness::JobBuilder;

#[test]
fn zero_placements_emit_empty_solid() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.name("nothing");
    let rendered = b.render().unwrap();
    assert_eq!(rendered.output.facet_count, 0);
    assert_eq!(rendered.bytes, b"solid nothing\nendsolid nothing\n");
}

#[test]
fn identity_placement_reproduces_catalog_bytes() {
    let catalog = fixture_catalog().unwrap();
    let reference = catalog.lookup(U_SHELL).unwrap();
    let direct = stl_format::to_ascii(reference, "shell").unwrap();

    let rendered = CatalogPipeline::new(&catalog)
        .render(&json!({
            "name": "shell",
            "placements": [{ "template": U_SHELL, "offset": [0, 0, 0], "scale": [1, 1, 1] }]
        }))
        .unwrap();
    assert_eq!(rendered.bytes, direct.into_bytes());
}

#[test]
fn swapped_placements_match_as_multiset() {
    let mut ab = JobBuilder::fixtures().unwrap();
    ab.place(SLAB).offset([3.0, 0.0, 0.0]).unwrap();
    ab.place(TETRA).scale([1.0, 2.0, 3.0]).unwrap();
    let mut ba = JobBuilder::fixtures().unwrap();
    ba.place(TETRA).scale([1.0, 2.0, 3.0]).unwrap();
    ba.place(SLAB).offset([3.0, 0.0, 0.0]).unwrap();

    let ab = ab.render().unwrap().output;
    let ba = ba.render().unwrap().output;
    assert_eq!(ab.facet_count, ba.facet_count);
    assert_eq!(ab.bounds, ba.bounds);

    let mut left: Vec<String> = ab.mesh.facets().iter().map(|f| format!("{:?}", f)).collect();
    let mut right: Vec<String> = ba.mesh.facets().iter().map(|f| format!("{:?}", f)).collect();
    left.sort();
    right.sort();
    assert_eq!(left, right);
}

#[test]
fn scale_then_translate_moves_unit_x() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.place(TETRA)
        .scale([2.0, 1.0, 1.0])
        .unwrap()
        .offset([10.0, 0.0, 0.0])
        .unwrap();
    let out = b.render().unwrap().output;
    // Tetra corner (1,0,0) lands on (12,0,0); its origin corner on (10,0,0).
    assert_bounding_box(
        &out.mesh,
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(12.0, 1.0, 1.0),
        1e-12,
        "scaled tetra",
    )
    .unwrap();
    assert!(out
        .mesh
        .vertices()
        .any(|v| v.distance_to(&Point3::new(12.0, 0.0, 0.0)) < 1e-12));
}

#[test]
fn non_uniform_scale_keeps_normals_valid() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.place(U_SHELL)
        .scale([0.5, 2.0, 1.25])
        .unwrap()
        .rotate([10.0, 20.0, 30.0])
        .unwrap();
    let out = b.render().unwrap().output;
    assert_all_pass(&run_all_mesh_checks(&out.mesh), "stretched shell").unwrap();
    assert!(check_watertight_mesh(&out.mesh).passed);
}

#[test]
fn volume_scales_with_determinant() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.place(UNIT_CUBE)
        .scale([2.0, 3.0, 4.0])
        .unwrap()
        .rotate_about([1.0, 2.0, 3.0], 77.0)
        .unwrap()
        .offset([-5.0, 5.0, 0.0])
        .unwrap();
    let out = b.render().unwrap().output;
    assert!((mesh_volume(&out.mesh) - 24.0).abs() < 1e-9);
}

#[test]
fn ascii_round_trip_within_tolerance() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.name("round_trip");
    b.place(U_SHELL).rotate([0.0, 0.0, 33.0]).unwrap();
    b.place(SLAB).offset([0.125, -7.5, 1e-3]).unwrap();

    let rendered = b.render().unwrap();
    let text = String::from_utf8(rendered.bytes.clone()).unwrap();
    let solid = read_ascii(&text).unwrap();
    assert_eq!(solid.name, "round_trip");
    assert_solid_matches(&solid, &rendered.output.mesh, 1e-6, "ascii").unwrap();
}

#[test]
fn binary_round_trip_within_single_precision() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.format("binary");
    b.place(U_SHELL).offset([1.5, 2.5, 3.5]).unwrap();
    let (rendered, solid) = b.render_and_reread().unwrap();
    assert_solid_matches(&solid, &rendered.output.mesh, 1e-4, "binary").unwrap();
}

#[test]
fn missing_template_fails_parse() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.raw_placement(json!({ "offset": [0, 0, 0] }));
    let catalog = fixture_catalog().unwrap();
    let err = CatalogPipeline::new(&catalog)
        .render(&b.document())
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::Parse(ParseError::MissingField(
            "placements[0].template".to_string()
        ))
    );
}

#[test]
fn numeric_template_is_dropped_with_warning() {
    let mut b = JobBuilder::fixtures().unwrap();
    b.raw_placement(json!({ "template": 42 })).place(TETRA);
    let rendered = b.render().unwrap();
    assert_eq!(rendered.output.facet_count, 4);
    assert!(matches!(
        rendered.warnings.as_slice(),
        [ParseError::TypeMismatch { field, .. }] if field == "placements[0].template"
    ));
}

#[test]
fn unknown_template_fails_assembly() {
    let catalog = fixture_catalog().unwrap();
    let err = CatalogPipeline::new(&catalog)
        .render(&json!({ "placements": [{ "template": TETRA }, { "template": "nonexistent" }] }))
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::Assembly(AssemblyError::UnknownTemplate("nonexistent".to_string()))
    );
}
