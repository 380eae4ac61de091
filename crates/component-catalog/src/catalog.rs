use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use std::sync::Arc;

use mesh_kernel::{Facet, Mesh, Point3, Vec3};
use stl_io::IndexedMesh;
use tracing::{debug, info, instrument};

use crate::errors::CatalogError;

/// Named reference meshes, read-only once built.
///
/// Entries sit behind `Arc` so one catalog can be shared across threads and
/// individual templates can outlive it if a caller holds on to them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, Arc<Mesh>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Resolve a template name to its reference mesh.
    pub fn lookup(&self, name: &str) -> Result<&Mesh, CatalogError> {
        self.entries
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Shared handle to a template, if present.
    pub fn get(&self, name: &str) -> Option<Arc<Mesh>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Collects catalog entries before the catalog is frozen.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: BTreeMap<String, Arc<Mesh>>,
}

impl CatalogBuilder {
    pub fn insert(mut self, name: impl Into<String>, mesh: Mesh) -> Result<Self, CatalogError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(CatalogError::Duplicate(name));
        }
        debug!(template = %name, facets = mesh.len(), "catalog entry added");
        self.entries.insert(name, Arc::new(mesh));
        Ok(self)
    }

    /// Add a template from ASCII or binary STL bytes.
    pub fn insert_stl(self, name: impl Into<String>, bytes: &[u8]) -> Result<Self, CatalogError> {
        let name = name.into();
        let mesh = read_template(&name, &mut Cursor::new(bytes))?;
        self.insert(name, mesh)
    }

    /// Add a template from an STL file on disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn insert_file(
        self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| io_error(path, e))?;
        let mesh = read_template(&name, &mut BufReader::new(file))?;
        self.insert(name, mesh)
    }

    /// Add every `*.stl` file in `dir`, named by file stem, in path order.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load_dir(mut self, dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
            let path = entry.map_err(|e| io_error(dir, e))?.path();
            let is_stl = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"));
            if is_stl && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let name = stem.to_string();
            self = self.insert_file(name, &path)?;
        }
        info!(entries = self.entries.len(), "catalog directory loaded");
        Ok(self)
    }

    pub fn build(self) -> Catalog {
        info!(entries = self.entries.len(), "catalog built");
        Catalog {
            entries: self.entries,
        }
    }
}

/// Decode ASCII or binary STL with `stl_io` and validate it as a template.
pub(crate) fn read_template<R>(name: &str, reader: &mut R) -> Result<Mesh, CatalogError>
where
    R: Read + Seek,
{
    let stl = stl_io::read_stl(reader).map_err(|e| CatalogError::InvalidStl {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    mesh_from_stl(name, &stl)
}

/// Turn the faces of an `stl_io` mesh back into validated facets, in file order.
///
/// Stored normals that are not unit length or disagree with the vertex winding
/// are replaced by the winding normal.
pub fn mesh_from_stl(name: &str, stl: &IndexedMesh) -> Result<Mesh, CatalogError> {
    let widen = |v: &stl_io::Vector<f32>| [f64::from(v[0]), f64::from(v[1]), f64::from(v[2])];
    stl.faces
        .iter()
        .enumerate()
        .map(|(index, face)| {
            let vertices = face
                .vertices
                .map(|i| Point3::from_array(widen(&stl.vertices[i])));
            Facet::with_normal(Vec3::from_array(widen(&face.normal)), vertices).map_err(
                |source| CatalogError::InvalidFacet {
                    name: name.to_string(),
                    index,
                    source,
                },
            )
        })
        .collect()
}

fn io_error(path: &Path, err: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
