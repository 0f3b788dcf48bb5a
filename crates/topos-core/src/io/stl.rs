//! Binary STL export and import

use std::io::Cursor;

use crate::error::FormatError;
use crate::faces::{FaceArray, FaceKind};
use crate::geometry::Geometry;
use crate::mesh::Mesh;
use crate::vertices::VertexArray;

use super::DataFormat;
use super::normals::triangle_normal;

/// Binary STL; quads are split into two triangles on export
#[derive(Debug, Clone, Copy, Default)]
pub struct StlFormat;

impl StlFormat {
    fn triangles(geometry: &dyn Geometry) -> Result<Vec<stl_io::Triangle>, FormatError> {
        let vertices = geometry.vertices();
        let faces = geometry.faces();
        faces.check_bounds(vertices.len())?;

        let points = vertices.cartesian();
        let mut triangles = Vec::with_capacity(faces.len() * 2);
        for array in faces {
            for face in array.rows() {
                let corners: Vec<[f64; 3]> = face.iter().map(|&i| points[i as usize]).collect();
                match array.kind() {
                    FaceKind::Tri => triangles.push(facet(corners[0], corners[1], corners[2])),
                    FaceKind::Quad => {
                        triangles.push(facet(corners[0], corners[1], corners[2]));
                        triangles.push(facet(corners[0], corners[2], corners[3]));
                    }
                }
            }
        }
        Ok(triangles)
    }
}

fn to_f32(p: [f64; 3]) -> [f32; 3] {
    [p[0] as f32, p[1] as f32, p[2] as f32]
}

fn facet(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> stl_io::Triangle {
    stl_io::Triangle {
        normal: stl_io::Normal::new(to_f32(triangle_normal(v0, v1, v2))),
        vertices: [
            stl_io::Vertex::new(to_f32(v0)),
            stl_io::Vertex::new(to_f32(v1)),
            stl_io::Vertex::new(to_f32(v2)),
        ],
    }
}

impl DataFormat for StlFormat {
    fn name(&self) -> &'static str {
        "STL"
    }

    fn extension(&self) -> &'static str {
        "stl"
    }

    fn to_bytes(&self, geometry: &dyn Geometry) -> Result<Vec<u8>, FormatError> {
        let triangles = Self::triangles(geometry)?;
        let mut out = Vec::new();
        stl_io::write_stl(&mut out, triangles.iter()).map_err(|e| FormatError::Io(e.to_string()))?;
        tracing::debug!(
            "Exported {} as STL: {} triangles",
            geometry.name(),
            triangles.len()
        );
        Ok(out)
    }

    fn from_bytes(&self, data: &[u8]) -> Result<Mesh, FormatError> {
        let mut reader = Cursor::new(data);
        let stl = stl_io::read_stl(&mut reader).map_err(|e| FormatError::Parse(e.to_string()))?;
        if stl.faces.is_empty() {
            return Err(FormatError::EmptyMesh);
        }

        let points = stl
            .vertices
            .iter()
            .map(|v| [f64::from(v[0]), f64::from(v[1]), f64::from(v[2])])
            .collect();
        let indices = stl
            .faces
            .iter()
            .flat_map(|f| f.vertices)
            .map(|i| u32::try_from(i).map_err(|_| FormatError::Parse(format!("vertex index {i} overflows"))))
            .collect::<Result<Vec<u32>, _>>()?;

        let faces = FaceArray::from_flat(FaceKind::Tri, indices)?;
        let mesh = Mesh::new(VertexArray::new_cartesian(points), [faces]);
        mesh.validate()?;
        Ok(mesh)
    }

    fn dumps(&self, _geometry: &dyn Geometry) -> Result<String, FormatError> {
        Err(FormatError::UnsupportedFormat(
            "STL is written as binary, use to_bytes".to_string(),
        ))
    }

    fn loads(&self, _text: &str) -> Result<Mesh, FormatError> {
        Err(FormatError::UnsupportedFormat(
            "STL is read as binary, use from_bytes".to_string(),
        ))
    }
}
