use mesh_kernel::FacetError;

/// Errors from catalog construction and lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("duplicate template name: {0}")]
    Duplicate(String),

    #[error("template {name}: invalid STL: {message}")]
    InvalidStl { name: String, message: String },

    #[error("template {name}: facet {index}: {source}")]
    InvalidFacet {
        name: String,
        index: usize,
        source: FacetError,
    },

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("catalog already loaded")]
    AlreadyLoaded,

    #[error("catalog not loaded yet")]
    NotReady,
}
