use mesh_kernel::{Facet, Mesh, Point3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::SerializeError;

/// Name used when a solid name is empty after sanitizing.
pub const DEFAULT_SOLID_NAME: &str = "assembly";

/// STL flavour to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Ascii,
    Binary,
}

impl StlFormat {
    /// Parse the job-level format keyword (`"ascii"` or `"binary"`, case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "ascii" => Some(Self::Ascii),
            "binary" => Some(Self::Binary),
            _ => None,
        }
    }
}

/// Reduce an arbitrary label to a single STL name token.
pub fn solid_name(raw: &str) -> String {
    let name: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() || c.is_control() { '_' } else { c })
        .collect();
    if name.is_empty() {
        DEFAULT_SOLID_NAME.to_string()
    } else {
        name
    }
}

/// Serialize a mesh in the requested format.
#[instrument(skip(mesh), fields(facets = mesh.len()))]
pub fn serialize(mesh: &Mesh, name: &str, format: StlFormat) -> Result<Vec<u8>, SerializeError> {
    match format {
        StlFormat::Ascii => to_ascii(mesh, name).map(String::into_bytes),
        StlFormat::Binary => to_binary(mesh, name),
    }
}

/// Render a mesh as an ASCII STL solid.
///
/// Numbers use Rust's shortest round-trip `Display`, which is locale-independent
/// and never uses exponent notation. An empty mesh yields `solid`/`endsolid` only.
pub fn to_ascii(mesh: &Mesh, name: &str) -> Result<String, SerializeError> {
    check_finite(mesh)?;
    let name = solid_name(name);

    let mut out = String::with_capacity(64 + mesh.len() * 200);
    out.push_str(&format!("solid {}\n", name));

    for facet in mesh.facets() {
        let n = facet.normal();
        out.push_str(&format!("  facet normal {} {} {}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in facet.vertices() {
            out.push_str(&format!("      vertex {} {} {}\n", v.x, v.y, v.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {}\n", name));
    debug!(bytes = out.len(), "ascii STL rendered");
    Ok(out)
}

/// Render a mesh as binary STL.
///
/// Binary STL layout:
/// - 80 bytes: header
/// - 4 bytes: u32 LE triangle count
/// - Per triangle (50 bytes each):
///   - 12 bytes: normal vector (3 × f32 LE)
///   - 36 bytes: 3 vertices (3 × 3 × f32 LE)
///   - 2 bytes: attribute byte count (0u16)
pub fn to_binary(mesh: &Mesh, name: &str) -> Result<Vec<u8>, SerializeError> {
    check_finite(mesh)?;
    let mut buf = Vec::with_capacity(84 + mesh.len() * 50);

    // The header must not start with "solid" or readers will take it for ASCII.
    let header = format!("binary STL: {}", solid_name(name));
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&facet_count(mesh.len())?.to_le_bytes());

    for (i, facet) in mesh.facets().iter().enumerate() {
        let n = facet.normal();
        push_f32_triple(&mut buf, [n.x, n.y, n.z], i)?;
        for v in facet.vertices() {
            push_f32_triple(&mut buf, v.to_array(), i)?;
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// The binary count field is a `u32`; the first facet past it is reported.
fn facet_count(len: usize) -> Result<u32, SerializeError> {
    u32::try_from(len).map_err(|_| SerializeError::OutOfRange {
        facet: u32::MAX as usize,
    })
}

fn push_f32_triple(buf: &mut Vec<u8>, xyz: [f64; 3], facet: usize) -> Result<(), SerializeError> {
    for c in xyz {
        let narrowed = c as f32;
        if !narrowed.is_finite() {
            return Err(SerializeError::OutOfRange { facet });
        }
        buf.extend_from_slice(&narrowed.to_le_bytes());
    }
    Ok(())
}

fn check_finite(mesh: &Mesh) -> Result<(), SerializeError> {
    match mesh.facets().iter().position(|f| !facet_is_finite(f)) {
        Some(facet) => Err(SerializeError::NonFinite { facet }),
        None => Ok(()),
    }
}

fn facet_is_finite(facet: &Facet) -> bool {
    facet.normal().is_finite() && facet.vertices().iter().all(Point3::is_finite)
}
