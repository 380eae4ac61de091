//! Permissive reader from a JSON job document to a [`JobDescriptor`].
//!
//! Field handling:
//! - absent or `null` optional fields take their defaults;
//! - optional fields of the wrong JSON type also take their defaults, and a
//!   [`ParseError::TypeMismatch`] warning is recorded;
//! - missing required fields and malformed vectors abort with a hard error.

use mesh_kernel::Vec3;
use serde_json::{Map, Value};
use stl_format::StlFormat;
use tracing::{debug, instrument, warn};

use crate::errors::ParseError;
use crate::types::{JobDescriptor, ParsedJob, Placement, Rotation};

/// Parse a job document from JSON text.
pub fn parse_str(json: &str) -> Result<ParsedJob, ParseError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ParseError::InvalidDocument(e.to_string()))?;
    parse(&value)
}

/// Parse an already-decoded job document.
#[instrument(skip_all)]
pub fn parse(document: &Value) -> Result<ParsedJob, ParseError> {
    let root = document.as_object().ok_or_else(|| {
        ParseError::InvalidDocument(format!("expected an object, found {}", type_name(document)))
    })?;
    let mut reader = FieldReader::default();

    let entries = match present(root, "placements") {
        Some(Value::Array(items)) => items,
        _ => return Err(ParseError::MissingField("placements".to_string())),
    };

    let mut placements = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let path = format!("placements[{}]", i);
        if let Some(placement) = reader.placement(entry, &path)? {
            placements.push(placement);
        }
    }

    let mut job = JobDescriptor::new(placements);
    if let Some(id) = reader.string(root, "id", "id") {
        job = job.with_id(id);
    }
    if let Some(name) = reader.string(root, "name", "name") {
        job = job.with_name(&name);
    }
    if let Some(keyword) = reader.string(root, "format", "format") {
        match StlFormat::from_keyword(&keyword) {
            Some(format) => job = job.with_format(format),
            None => reader.mismatch("format", "\"ascii\" or \"binary\"", "unknown keyword"),
        }
    }

    debug!(
        job_id = job.id(),
        placements = job.placements().len(),
        warnings = reader.warnings.len(),
        "job parsed"
    );
    Ok(ParsedJob {
        job,
        warnings: reader.warnings,
    })
}

/// A field's value, treating JSON `null` the same as absence.
fn present<'v>(object: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode `[x, y, z]`. Entries past the third are ignored.
fn vector(items: &[Value], path: &str) -> Result<Vec3, ParseError> {
    let coords: Vec<f64> = items.iter().take(3).map_while(Value::as_f64).collect();
    match coords.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(ParseError::MalformedVector {
            field: path.to_string(),
            found: coords.len(),
        }),
    }
}

#[derive(Default)]
struct FieldReader {
    warnings: Vec<ParseError>,
}

impl FieldReader {
    fn mismatch(&mut self, field: &str, expected: &'static str, found: &'static str) {
        warn!(field, expected, found, "ignoring job field with wrong type");
        self.warnings.push(ParseError::TypeMismatch {
            field: field.to_string(),
            expected,
            found,
        });
    }

    fn string(&mut self, object: &Map<String, Value>, key: &str, path: &str) -> Option<String> {
        match present(object, key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(path, "string", type_name(other));
                None
            }
        }
    }

    fn number(&mut self, object: &Map<String, Value>, key: &str, path: &str) -> Option<f64> {
        match present(object, key)? {
            Value::Number(n) => n.as_f64(),
            other => {
                self.mismatch(path, "number", type_name(other));
                None
            }
        }
    }

    fn vector(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Result<Option<Vec3>, ParseError> {
        match present(object, key) {
            None => Ok(None),
            Some(Value::Array(items)) => vector(items, path).map(Some),
            Some(other) => {
                self.mismatch(path, "array of 3 numbers", type_name(other));
                Ok(None)
            }
        }
    }

    /// Read one placement. `Ok(None)` means the entry was dropped with a warning.
    fn placement(&mut self, entry: &Value, path: &str) -> Result<Option<Placement>, ParseError> {
        let Value::Object(object) = entry else {
            self.mismatch(path, "object", type_name(entry));
            return Ok(None);
        };

        let template_path = format!("{}.template", path);
        let template = match present(object, "template") {
            None => return Err(ParseError::MissingField(template_path)),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                // A wrong-typed template cannot fall back to a default template.
                self.mismatch(&template_path, "string", type_name(other));
                return Ok(None);
            }
        };

        let mut placement = Placement::new(template);

        let offset_path = format!("{}.offset", path);
        if let Some(offset) = self.vector(object, "offset", &offset_path)? {
            placement = placement.with_offset(offset);
        }

        let scale_path = format!("{}.scale", path);
        if let Some(scale) = self.vector(object, "scale", &scale_path)? {
            if scale.x < 0.0 || scale.y < 0.0 || scale.z < 0.0 {
                return Err(ParseError::NegativeScale { field: scale_path });
            }
            placement = placement.with_scale(scale);
        }

        let rotation_path = format!("{}.rotation", path);
        if let Some(rotation) = self.rotation(object, &rotation_path)? {
            placement = placement.with_rotation(rotation);
        }

        Ok(Some(placement))
    }

    /// `[rx, ry, rz]` Euler degrees, or `{"axis": [x, y, z], "angle": degrees}`.
    fn rotation(
        &mut self,
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<Option<Rotation>, ParseError> {
        match present(object, "rotation") {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(Rotation::Euler {
                degrees: vector(items, path)?,
            })),
            Some(Value::Object(axis_angle)) => {
                let axis_path = format!("{}.axis", path);
                let axis = match present(axis_angle, "axis") {
                    None => return Err(ParseError::MissingField(axis_path)),
                    Some(Value::Array(items)) => vector(items, &axis_path)?,
                    Some(other) => {
                        self.mismatch(&axis_path, "array of 3 numbers", type_name(other));
                        return Ok(None);
                    }
                };
                if axis.normalized().is_none() {
                    return Err(ParseError::InvalidRotation {
                        field: axis_path,
                        reason: "axis has zero length".to_string(),
                    });
                }
                let angle_path = format!("{}.angle", path);
                let degrees = self.number(axis_angle, "angle", &angle_path).unwrap_or(0.0);
                Ok(Some(Rotation::AxisAngle { axis, degrees }))
            }
            Some(other) => {
                self.mismatch(path, "array or object", type_name(other));
                Ok(None)
            }
        }
    }
}
