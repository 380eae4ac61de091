//! Structured text reports of a rendered job.
//!
//! Reports are plain text so that a failing test can print one and a reader
//! sees the job, its placements, the mesh and every oracle verdict at once.

use std::fmt;

use assembly_engine::RenderedJob;
use mesh_kernel::BoundingBox;
use serde_json::Value;
use stl_format::StlFormat;

use crate::oracle::{self, OracleVerdict};

/// A complete job report with all sections.
pub struct JobReport {
    pub job_id: String,
    pub name: String,
    pub format: StlFormat,
    pub placement_entries: Vec<PlacementEntry>,
    pub facet_count: usize,
    pub byte_count: usize,
    pub bounding_box: Option<BoundingBox>,
    pub oracle_results: Vec<OracleVerdict>,
    pub warnings: Vec<String>,
}

/// A single placement as it appeared in the document.
pub struct PlacementEntry {
    pub index: usize,
    pub template: String,
    pub detail: String,
}

impl JobReport {
    /// Describe `rendered`, listing placements from the source `document`.
    pub fn from_rendered(document: &Value, rendered: &RenderedJob) -> Self {
        let placement_entries: Vec<PlacementEntry> = document
            .get("placements")
            .and_then(Value::as_array)
            .map(|items| items.iter().enumerate().map(describe_placement).collect())
            .unwrap_or_default();

        Self {
            job_id: rendered.output.job_id.clone(),
            name: rendered.output.name.clone(),
            format: rendered.output.format,
            placement_entries,
            facet_count: rendered.output.facet_count,
            byte_count: rendered.bytes.len(),
            bounding_box: rendered.output.bounds,
            oracle_results: oracle::run_all_mesh_checks(&rendered.output.mesh),
            warnings: rendered.warnings.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Job Report ===\n\n");
        out.push_str(&format!(
            "Job {} \"{}\" ({:?}, {} bytes)\n",
            self.job_id, self.name, self.format, self.byte_count,
        ));

        out.push_str(&format!(
            "\nPlacements ({}):\n",
            self.placement_entries.len()
        ));
        for entry in &self.placement_entries {
            out.push_str(&format!("  [{}] \"{}\"\n", entry.index, entry.template));
            if !entry.detail.is_empty() {
                out.push_str(&format!("      {}\n", entry.detail));
            }
        }

        out.push_str(&format!("\nMesh: {} facets\n", self.facet_count));
        if let Some(bb) = &self.bounding_box {
            out.push_str(&format!(
                "Bounding Box: ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})\n",
                bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z,
            ));
        }

        if !self.oracle_results.is_empty() {
            out.push_str(&format!(
                "\nOracle Results ({} checks):\n",
                self.oracle_results.len()
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        if self.warnings.is_empty() {
            out.push_str("\nWarnings: none\n");
        } else {
            out.push_str(&format!("\nWarnings ({}):\n", self.warnings.len()));
            for w in &self.warnings {
                out.push_str(&format!("  {}\n", w));
            }
        }

        out
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

fn describe_placement((index, placement): (usize, &Value)) -> PlacementEntry {
    let template = placement
        .get("template")
        .map(|t| match t {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "<missing>".to_string());

    let detail = ["offset", "scale", "rotation"]
        .iter()
        .filter_map(|key| placement.get(*key).map(|v| format!("{}={}", key, v)))
        .collect::<Vec<_>>()
        .join(" ");

    PlacementEntry {
        index,
        template,
        detail,
    }
}
