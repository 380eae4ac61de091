//! Test harness for the job-to-mesh pipeline.
//!
//! Provides tools for scripting job documents, running them through the real
//! pipeline, and verifying the resulting meshes.
//!
//! # Key Components
//!
//! - [`JobBuilder`]: fluent API for building and rendering job documents
//! - [`oracle`]: verification functions returning pass/fail verdicts
//! - [`report`]: structured text job descriptions
//! - [`helpers`]: fixture meshes and catalogs, mesh math
//! - [`assertions`]: assertion helpers with diagnostics
//! - [`stl`]: reading rendered STL back

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod stl;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::JobReport;
pub use workflow::JobBuilder;
