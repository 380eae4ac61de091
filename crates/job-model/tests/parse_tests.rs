use job_model::{parse, parse_str, ParseError, Placement, Rotation};
use mesh_kernel::Vec3;
use serde_json::json;
use stl_format::StlFormat;

// ── Well-formed documents ───────────────────────────────────────────────────

#[test]
fn full_document() {
    let parsed = parse(&json!({
        "id": "job-17",
        "name": "kitchen wall",
        "format": "binary",
        "placements": [
            { "template": "u_shell" },
            {
                "template": "unit_cube",
                "offset": [10, 0, 0],
                "scale": [2, 2, 2],
                "rotation": [0, 0, 90]
            },
            {
                "template": "unit_cube",
                "rotation": { "axis": [0, 0, 1], "angle": 45 }
            }
        ]
    }))
    .unwrap();

    assert!(parsed.warnings.is_empty());
    let job = parsed.job;
    assert_eq!(job.id(), "job-17");
    assert_eq!(job.name(), "kitchen_wall");
    assert_eq!(job.format(), StlFormat::Binary);
    assert_eq!(job.placements().len(), 3);
    assert_eq!(job.placements()[0], Placement::new("u_shell"));
    assert_eq!(
        job.placements()[1],
        Placement::new("unit_cube")
            .with_offset(Vec3::new(10.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0))
            .with_rotation(Rotation::Euler {
                degrees: Vec3::new(0.0, 0.0, 90.0)
            })
    );
    assert_eq!(
        job.placements()[2].rotation,
        Rotation::AxisAngle {
            axis: Vec3::Z,
            degrees: 45.0
        }
    );
}

#[test]
fn minimal_document_takes_defaults() {
    let parsed = parse_str(r#"{"placements": [{"template": "a"}]}"#).unwrap();
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.job.name(), "assembly");
    assert_eq!(parsed.job.format(), StlFormat::Ascii);
    assert!(!parsed.job.id().is_empty());
}

#[test]
fn empty_placement_list_is_valid() {
    let parsed = parse(&json!({ "placements": [] })).unwrap();
    assert!(parsed.job.placements().is_empty());
}

#[test]
fn placement_order_is_preserved() {
    let parsed = parse(&json!({
        "placements": [{ "template": "b" }, { "template": "a" }, { "template": "b" }]
    }))
    .unwrap();
    let names: Vec<_> = parsed
        .job
        .placements()
        .iter()
        .map(|p| p.template.as_str())
        .collect();
    assert_eq!(names, ["b", "a", "b"]);
}

#[test]
fn ids_are_unique_when_absent() {
    let doc = json!({ "placements": [] });
    let a = parse(&doc).unwrap().job;
    let b = parse(&doc).unwrap().job;
    assert_ne!(a.id(), b.id());
}

// ── Hard failures ───────────────────────────────────────────────────────────

#[test]
fn missing_template_is_fatal() {
    let err = parse(&json!({
        "placements": [{ "template": "a" }, { "offset": [1, 2, 3] }]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingField("placements[1].template".to_string())
    );
    assert!(!err.is_soft());
}

#[test]
fn missing_or_null_placements_is_fatal() {
    for doc in [json!({}), json!({ "placements": null }), json!({ "placements": 3 })] {
        assert_eq!(
            parse(&doc).unwrap_err(),
            ParseError::MissingField("placements".to_string())
        );
    }
}

#[test]
fn non_object_root_is_invalid() {
    assert!(matches!(
        parse(&json!([1, 2, 3])).unwrap_err(),
        ParseError::InvalidDocument(_)
    ));
    assert!(matches!(
        parse_str("{ not json").unwrap_err(),
        ParseError::InvalidDocument(_)
    ));
}

#[test]
fn short_vector_is_malformed() {
    let err = parse(&json!({
        "placements": [{ "template": "a", "offset": [1, 2] }]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedVector {
            field: "placements[0].offset".to_string(),
            found: 2
        }
    );
}

#[test]
fn non_numeric_vector_entry_is_malformed() {
    let err = parse(&json!({
        "placements": [{ "template": "a", "scale": [1, "2", 3] }]
    }))
    .unwrap_err();
    assert!(matches!(err, ParseError::MalformedVector { ref field, found: 1 } if field == "placements[0].scale"));
}

#[test]
fn negative_scale_is_rejected() {
    let err = parse(&json!({
        "placements": [{ "template": "a", "scale": [1, -1, 1] }]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ParseError::NegativeScale {
            field: "placements[0].scale".to_string()
        }
    );
}

#[test]
fn zero_scale_is_accepted() {
    let parsed = parse(&json!({
        "placements": [{ "template": "a", "scale": [0, 1, 1] }]
    }))
    .unwrap();
    assert_eq!(parsed.job.placements()[0].scale, Vec3::new(0.0, 1.0, 1.0));
}

#[test]
fn zero_rotation_axis_is_rejected() {
    let err = parse(&json!({
        "placements": [{ "template": "a", "rotation": { "axis": [0, 0, 0], "angle": 30 } }]
    }))
    .unwrap_err();
    assert!(matches!(err, ParseError::InvalidRotation { ref field, .. } if field == "placements[0].rotation.axis"));
}

#[test]
fn rotation_object_without_axis_is_missing_field() {
    let err = parse(&json!({
        "placements": [{ "template": "a", "rotation": { "angle": 30 } }]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingField("placements[0].rotation.axis".to_string())
    );
}

// ── Soft failures ───────────────────────────────────────────────────────────

#[test]
fn numeric_template_drops_placement_with_warning() {
    let parsed = parse(&json!({
        "placements": [{ "template": 5 }, { "template": "b" }]
    }))
    .unwrap();
    assert_eq!(parsed.job.placements().len(), 1);
    assert_eq!(parsed.job.placements()[0].template, "b");
    assert_eq!(
        parsed.warnings,
        vec![ParseError::TypeMismatch {
            field: "placements[0].template".to_string(),
            expected: "string",
            found: "number",
        }]
    );
    assert!(parsed.warnings[0].is_soft());
}

#[test]
fn non_object_placement_is_dropped() {
    let parsed = parse(&json!({ "placements": ["a", { "template": "b" }] })).unwrap();
    assert_eq!(parsed.job.placements().len(), 1);
    assert_eq!(parsed.warnings.len(), 1);
}

#[test]
fn wrong_typed_optional_fields_take_defaults() {
    let parsed = parse(&json!({
        "id": 42,
        "name": ["x"],
        "format": true,
        "placements": [{
            "template": "a",
            "offset": "far away",
            "scale": 2,
            "rotation": "sideways"
        }]
    }))
    .unwrap();

    assert_eq!(parsed.job.placements()[0], Placement::new("a"));
    assert_eq!(parsed.job.name(), "assembly");
    assert_eq!(parsed.job.format(), StlFormat::Ascii);
    assert_ne!(parsed.job.id(), "42");

    let fields: Vec<_> = parsed
        .warnings
        .iter()
        .map(|w| match w {
            ParseError::TypeMismatch { field, .. } => field.as_str(),
            other => panic!("unexpected hard error {other:?}"),
        })
        .collect();
    assert_eq!(
        fields,
        [
            "placements[0].offset",
            "placements[0].scale",
            "placements[0].rotation",
            "id",
            "name",
            "format"
        ]
    );
}

#[test]
fn unknown_format_keyword_warns() {
    let parsed = parse(&json!({ "format": "obj", "placements": [] })).unwrap();
    assert_eq!(parsed.job.format(), StlFormat::Ascii);
    assert_eq!(parsed.warnings.len(), 1);
}

#[test]
fn wrong_typed_angle_defaults_to_zero() {
    let parsed = parse(&json!({
        "placements": [{ "template": "a", "rotation": { "axis": [1, 0, 0], "angle": "ninety" } }]
    }))
    .unwrap();
    assert!(parsed.job.placements()[0].rotation.is_identity());
    assert_eq!(parsed.warnings.len(), 1);
}
