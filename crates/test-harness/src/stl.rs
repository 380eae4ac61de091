//! Reading rendered STL back for verification.
//!
//! ASCII output is read at full `f64` precision so round trips can be checked
//! tightly. Binary output is single precision anyway and goes through `stl_io`.

use std::io::Cursor;

use crate::helpers::HarnessError;

/// One facet exactly as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlFacet {
    pub normal: [f64; 3],
    pub vertices: [[f64; 3]; 3],
}

/// A decoded STL solid.
#[derive(Debug, Clone, PartialEq)]
pub struct StlSolid {
    pub name: String,
    pub facets: Vec<StlFacet>,
}

/// Read STL bytes, ASCII when they start with `solid`, binary otherwise.
pub fn read_solid(bytes: &[u8]) -> Result<StlSolid, HarnessError> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    if bytes[start..].starts_with(b"solid") {
        let text = std::str::from_utf8(bytes).map_err(|_| stl_error("ASCII STL is not UTF-8"))?;
        return read_ascii(text);
    }
    read_binary(bytes)
}

/// Read a binary STL document. The solid name comes from the writer's header.
pub fn read_binary(bytes: &[u8]) -> Result<StlSolid, HarnessError> {
    let stl = stl_io::read_stl(&mut Cursor::new(bytes)).map_err(|e| stl_error(e.to_string()))?;

    let header = String::from_utf8_lossy(&bytes[..bytes.len().min(80)]);
    let header = header.trim_end_matches('\0').trim();
    let name = header
        .strip_prefix("binary STL:")
        .unwrap_or(header)
        .trim()
        .to_string();

    let widen = |v: &stl_io::Vector<f32>| [f64::from(v[0]), f64::from(v[1]), f64::from(v[2])];
    let facets = stl
        .faces
        .iter()
        .map(|face| StlFacet {
            normal: widen(&face.normal),
            vertices: face.vertices.map(|i| widen(&stl.vertices[i])),
        })
        .collect();

    Ok(StlSolid { name, facets })
}

/// Read an ASCII STL document at `f64` precision.
pub fn read_ascii(text: &str) -> Result<StlSolid, HarnessError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, header) = lines.next().ok_or_else(|| stl_error("empty STL document"))?;
    let mut tokens = header.split_whitespace();
    if tokens.next() != Some("solid") {
        return Err(syntax(line, "expected `solid`"));
    }
    let name = tokens.collect::<Vec<_>>().join(" ");

    let mut facets = Vec::new();
    loop {
        let (line, text) = next_line(&mut lines, "endsolid")?;
        if text.split_whitespace().next() == Some("endsolid") {
            break;
        }
        let normal = keyword_triple(line, text, &["facet", "normal"])?;
        expect_keywords(next_line(&mut lines, "outer loop")?, &["outer", "loop"])?;
        let mut vertices = [[0.0; 3]; 3];
        for v in &mut vertices {
            let (line, text) = next_line(&mut lines, "vertex")?;
            *v = keyword_triple(line, text, &["vertex"])?;
        }
        expect_keywords(next_line(&mut lines, "endloop")?, &["endloop"])?;
        expect_keywords(next_line(&mut lines, "endfacet")?, &["endfacet"])?;
        facets.push(StlFacet { normal, vertices });
    }

    Ok(StlSolid { name, facets })
}

fn stl_error(reason: impl Into<String>) -> HarnessError {
    HarnessError::StlError {
        reason: reason.into(),
    }
}

fn syntax(line: usize, message: impl AsRef<str>) -> HarnessError {
    stl_error(format!("line {}: {}", line, message.as_ref()))
}

fn next_line<'a, I>(lines: &mut I, expected: &str) -> Result<(usize, &'a str), HarnessError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    lines
        .next()
        .ok_or_else(|| stl_error(format!("unexpected end of document, expected `{}`", expected)))
}

fn expect_keywords((line, text): (usize, &str), keywords: &[&str]) -> Result<(), HarnessError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens != keywords {
        return Err(syntax(line, format!("expected `{}`", keywords.join(" "))));
    }
    Ok(())
}

fn keyword_triple(line: usize, text: &str, keywords: &[&str]) -> Result<[f64; 3], HarnessError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let k = keywords.len();
    if tokens.len() != k + 3 || tokens[..k] != *keywords {
        return Err(syntax(
            line,
            format!("expected `{} x y z`", keywords.join(" ")),
        ));
    }
    let mut out = [0.0; 3];
    for (slot, token) in out.iter_mut().zip(&tokens[k..]) {
        *slot = token
            .parse::<f64>()
            .map_err(|_| syntax(line, format!("invalid number `{}`", token)))?;
    }
    Ok(out)
}
