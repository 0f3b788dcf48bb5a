//! JSON export and import
//!
//! `{"name": "...", "vertices": [[x, y, z], ...], "faces": [[i, j, k], ...]}`
//! with cartesian vertices and zero-based indices. Faces of different arity
//! may share the one list.

use serde::Serialize;
use serde_json::Value;

use crate::error::{FaceDataError, FormatError, VertexDataError};
use crate::faces::{FaceArray, FaceKind};
use crate::geometry::Geometry;
use crate::mesh::{FaceSet, Mesh};
use crate::vertices::VertexArray;

use super::DataFormat;

/// Name given to meshes loaded from JSON without a `name` field
pub const JSON_DEFAULT_NAME: &str = "<json_mesh>";

#[derive(Serialize)]
struct JsonMesh<'a> {
    name: &'a str,
    vertices: &'a [[f64; 3]],
    faces: Vec<&'a [u32]>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl JsonFormat {
    fn render(&self, geometry: &dyn Geometry) -> Result<String, FormatError> {
        let vertices = geometry.vertices();
        let faces = geometry.faces();
        faces.check_bounds(vertices.len())?;

        let cartesian = vertices.cartesian();
        check_finite(&cartesian)?;
        let doc = JsonMesh {
            name: geometry.name(),
            vertices: &cartesian,
            faces: faces.iter().flat_map(|f| f.rows()).collect(),
        };
        let text = serde_json::to_string(&doc).map_err(|e| FormatError::Parse(e.to_string()))?;

        tracing::debug!(
            "Exported {} as JSON: {} vertices, {} faces",
            geometry.name(),
            vertices.len(),
            faces.len()
        );
        Ok(text)
    }

    fn parse(&self, data: &[u8]) -> Result<Mesh, FormatError> {
        let doc: Value =
            serde_json::from_slice(data).map_err(|e| FormatError::Parse(e.to_string()))?;

        let vertices = doc
            .get("vertices")
            .ok_or(FormatError::MissingField("vertices"))?;
        let faces = doc.get("faces").ok_or(FormatError::MissingField("faces"))?;
        let name = match doc.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => JSON_DEFAULT_NAME.to_string(),
        };

        let vertices = VertexArray::new_cartesian(parse_vertices(vertices)?);
        let faces = parse_faces(faces)?;
        let mesh = Mesh::from_parts(Some(name), vertices, faces);
        mesh.validate()?;
        Ok(mesh)
    }
}

// JSON has no representation for NaN or infinity
fn check_finite(points: &[[f64; 3]]) -> Result<(), VertexDataError> {
    for (row, p) in points.iter().enumerate() {
        if let Some(&value) = p.iter().find(|c| !c.is_finite()) {
            return Err(VertexDataError::NonFinite { row, value });
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

fn parse_vertices(value: &Value) -> Result<Vec<[f64; 3]>, VertexDataError> {
    let rows = value.as_array().ok_or_else(|| VertexDataError::NotAnArray {
        found: type_name(value),
    })?;

    rows.iter()
        .enumerate()
        .map(|(row, item)| {
            let coords = item.as_array().ok_or_else(|| VertexDataError::NotAnArray {
                found: type_name(item),
            })?;
            if coords.len() != 3 {
                return Err(VertexDataError::RowLength {
                    row,
                    len: coords.len(),
                });
            }
            let mut p = [0.0; 3];
            for (slot, c) in p.iter_mut().zip(coords) {
                *slot = c.as_f64().ok_or_else(|| VertexDataError::NotNumeric {
                    row,
                    found: type_name(c),
                })?;
            }
            Ok(p)
        })
        .collect()
}

fn parse_faces(value: &Value) -> Result<FaceSet, FaceDataError> {
    let rows = value.as_array().ok_or_else(|| FaceDataError::NotAnArray {
        found: type_name(value),
    })?;

    let mut tris = Vec::new();
    let mut quads = Vec::new();
    for (row, item) in rows.iter().enumerate() {
        let indices = item.as_array().ok_or_else(|| FaceDataError::NotAnArray {
            found: type_name(item),
        })?;
        let target = match FaceKind::from_sides(indices.len())? {
            FaceKind::Tri => &mut tris,
            FaceKind::Quad => &mut quads,
        };
        for index in indices {
            let i = index
                .as_u64()
                .and_then(|i| u32::try_from(i).ok())
                .ok_or_else(|| FaceDataError::NonInteger {
                    row,
                    found: type_name(index),
                })?;
            target.push(i);
        }
    }

    let mut faces = FaceSet::new();
    for (kind, data) in [(FaceKind::Tri, tris), (FaceKind::Quad, quads)] {
        if !data.is_empty() {
            faces.insert(FaceArray::from_flat(kind, data)?);
        }
    }
    Ok(faces)
}

impl DataFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn to_bytes(&self, geometry: &dyn Geometry) -> Result<Vec<u8>, FormatError> {
        self.render(geometry).map(String::into_bytes)
    }

    fn from_bytes(&self, data: &[u8]) -> Result<Mesh, FormatError> {
        self.parse(data)
    }

    fn dumps(&self, geometry: &dyn Geometry) -> Result<String, FormatError> {
        self.render(geometry)
    }
}
