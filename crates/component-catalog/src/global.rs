//! Process-wide catalog: written once at startup, read by every job afterwards.

use std::sync::OnceLock;

use tracing::info;

use crate::catalog::Catalog;
use crate::errors::CatalogError;

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Install the process catalog. Fails if one is already installed.
pub fn load(catalog: Catalog) -> Result<&'static Catalog, CatalogError> {
    let entries = catalog.len();
    CATALOG
        .set(catalog)
        .map_err(|_| CatalogError::AlreadyLoaded)?;
    info!(entries, "process catalog loaded");
    global()
}

/// Whether [`load`] has completed.
pub fn ready() -> bool {
    CATALOG.get().is_some()
}

/// The installed process catalog.
pub fn global() -> Result<&'static Catalog, CatalogError> {
    CATALOG.get().ok_or(CatalogError::NotReady)
}
