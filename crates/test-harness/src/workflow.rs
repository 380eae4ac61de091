//! JobBuilder: fluent API for scripting job documents in tests.
//!
//! Builds the JSON document a client would send, then runs it through the real
//! `CatalogPipeline` path rather than calling assembly directly.

use assembly_engine::{CatalogPipeline, RenderedJob};
use component_catalog::Catalog;
use serde_json::{json, Map, Value};

use crate::helpers::{fixture_catalog, HarnessError};
use crate::oracle;
use crate::report::JobReport;
use crate::stl::{read_solid, StlSolid};

/// A fluent builder for job documents, bound to one catalog.
pub struct JobBuilder {
    catalog: Catalog,
    fields: Map<String, Value>,
    placements: Vec<Value>,
    auto_check: bool,
}

impl JobBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            fields: Map::new(),
            placements: Vec::new(),
            auto_check: false,
        }
    }

    /// Builder over [`fixture_catalog`].
    pub fn fixtures() -> Result<Self, HarnessError> {
        Ok(Self::new(fixture_catalog()?))
    }

    /// Enable auto-checking: every render runs the mesh oracles and fails on
    /// the first failed verdict.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ── Document Fields ─────────────────────────────────────────────────

    pub fn id(&mut self, id: &str) -> &mut Self {
        self.fields.insert("id".to_string(), json!(id));
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.fields.insert("name".to_string(), json!(name));
        self
    }

    /// Output format keyword, passed through verbatim.
    pub fn format(&mut self, keyword: &str) -> &mut Self {
        self.fields.insert("format".to_string(), json!(keyword));
        self
    }

    /// Set any top-level field, including ill-typed values for negative tests.
    pub fn field(&mut self, key: &str, value: Value) -> &mut Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    // ── Placements ──────────────────────────────────────────────────────

    /// Append a placement of `template` with default transform.
    pub fn place(&mut self, template: &str) -> &mut Self {
        self.placements.push(json!({ "template": template }));
        self
    }

    /// Append a placement exactly as given.
    pub fn raw_placement(&mut self, placement: Value) -> &mut Self {
        self.placements.push(placement);
        self
    }

    pub fn offset(&mut self, offset: [f64; 3]) -> Result<&mut Self, HarnessError> {
        self.set_on_last("offset", json!(offset))
    }

    pub fn scale(&mut self, scale: [f64; 3]) -> Result<&mut Self, HarnessError> {
        self.set_on_last("scale", json!(scale))
    }

    /// Euler rotation in degrees, applied about X, then Y, then Z.
    pub fn rotate(&mut self, degrees: [f64; 3]) -> Result<&mut Self, HarnessError> {
        self.set_on_last("rotation", json!(degrees))
    }

    pub fn rotate_about(&mut self, axis: [f64; 3], degrees: f64) -> Result<&mut Self, HarnessError> {
        self.set_on_last("rotation", json!({ "axis": axis, "angle": degrees }))
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    // ── Execution ───────────────────────────────────────────────────────

    /// The JSON document built so far.
    pub fn document(&self) -> Value {
        let mut doc = self.fields.clone();
        doc.insert("placements".to_string(), Value::Array(self.placements.clone()));
        Value::Object(doc)
    }

    /// Parse, assemble and serialize the document.
    pub fn render(&self) -> Result<RenderedJob, HarnessError> {
        let rendered = CatalogPipeline::new(&self.catalog).render(&self.document())?;
        if self.auto_check {
            if let Some(failed) = oracle::run_all_mesh_checks(&rendered.output.mesh)
                .into_iter()
                .find(|v| !v.passed)
            {
                return Err(HarnessError::OracleFailure {
                    oracle: failed.oracle_name,
                    detail: failed.detail,
                });
            }
        }
        Ok(rendered)
    }

    /// Render and read the STL bytes back.
    pub fn render_and_reread(&self) -> Result<(RenderedJob, StlSolid), HarnessError> {
        let rendered = self.render()?;
        let solid = read_solid(&rendered.bytes)?;
        Ok((rendered, solid))
    }

    /// Render and describe the result.
    pub fn report(&self) -> Result<JobReport, HarnessError> {
        let rendered = self.render()?;
        Ok(JobReport::from_rendered(&self.document(), &rendered))
    }

    // ── Internal Helpers ────────────────────────────────────────────────

    fn set_on_last(&mut self, key: &str, value: Value) -> Result<&mut Self, HarnessError> {
        match self.placements.last_mut() {
            Some(Value::Object(placement)) => {
                placement.insert(key.to_string(), value);
                Ok(self)
            }
            _ => Err(HarnessError::AssertionFailed {
                detail: format!("no placement object to set `{}` on", key),
            }),
        }
    }
}
