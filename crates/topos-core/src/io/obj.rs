//! Wavefront OBJ export and import

use std::io::{BufRead, Cursor};

use crate::constants::OBJ_VERTEX_PRECISION;
use crate::error::{FaceDataError, FormatError};
use crate::faces::{FaceArray, FaceKind};
use crate::geometry::Geometry;
use crate::mesh::{FaceSet, Mesh};
use crate::template::FormatOptions;
use crate::vertices::VertexArray;

use super::DataFormat;

// Name tobj gives to geometry declared before any `o` statement
const TOBJ_UNNAMED: &str = "unnamed_object";

/// OBJ export options
#[derive(Debug, Clone, PartialEq)]
pub struct ObjOptions {
    /// Decimal places for vertex coordinates
    pub precision: usize,
    /// Emit an `o <name>` statement
    pub write_name: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            precision: OBJ_VERTEX_PRECISION,
            write_name: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjFormat {
    pub options: ObjOptions,
}

impl ObjFormat {
    pub fn new(options: ObjOptions) -> Self {
        Self { options }
    }

    fn render(&self, geometry: &dyn Geometry) -> Result<String, FormatError> {
        let vertices = geometry.vertices();
        let faces = geometry.faces();
        faces.check_bounds(vertices.len())?;

        let mut sections = Vec::new();
        if self.options.write_name {
            sections.push(format!("o {}", geometry.name()));
        }

        if !vertices.is_empty() {
            let p = self.options.precision;
            let template = format!("v {{:.{p}}} {{:.{p}}} {{:.{p}}}");
            sections.push(vertices.format(&template, &FormatOptions::default())?);
        }

        // OBJ indices are 1-based
        for array in faces.offset_by(1)?.iter().filter(|f| !f.is_empty()) {
            let template = format!("f{}", " {}".repeat(array.num_sides()));
            sections.push(array.format(&template, &FormatOptions::default())?);
        }

        let mut out = sections.join("\n");
        out.push('\n');

        tracing::debug!(
            "Exported {} as OBJ: {} vertices, {} faces",
            geometry.name(),
            vertices.len(),
            faces.len()
        );
        Ok(out)
    }

    fn parse(&self, reader: &mut impl BufRead) -> Result<Mesh, FormatError> {
        let (models, _materials) = tobj::load_obj_buf(
            reader,
            &tobj::LoadOptions {
                triangulate: false,
                single_index: false,
                ..Default::default()
            },
            |_| Ok(Default::default()),
        )
        .map_err(|e| FormatError::Parse(e.to_string()))?;

        if models.is_empty() {
            return Err(FormatError::EmptyMesh);
        }

        let name = models
            .iter()
            .map(|m| m.name.as_str())
            .find(|n| !n.is_empty() && *n != TOBJ_UNNAMED)
            .map(str::to_string);

        // Combine all models into one mesh
        let mut points: Vec<[f64; 3]> = Vec::new();
        let mut tris: Vec<u32> = Vec::new();
        let mut quads: Vec<u32> = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let count = points.len();
            let offset = u32::try_from(count)
                .map_err(|_| FaceDataError::TooManyVertices { count })?;

            for chunk in mesh.positions.chunks_exact(3) {
                points.push([
                    f64::from(chunk[0]),
                    f64::from(chunk[1]),
                    f64::from(chunk[2]),
                ]);
            }

            // An empty arity list means every face is a triangle
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&a| a as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let face = mesh
                    .indices
                    .get(start..start + arity)
                    .ok_or_else(|| FormatError::Parse("face indices are truncated".to_string()))?;
                let target = match FaceKind::from_sides(arity)? {
                    FaceKind::Tri => &mut tris,
                    FaceKind::Quad => &mut quads,
                };
                for &index in face {
                    let shifted = index
                        .checked_add(offset)
                        .ok_or(FaceDataError::IndexOverflow { index, offset })?;
                    target.push(shifted);
                }
                start += arity;
            }
        }

        if points.is_empty() {
            return Err(FormatError::EmptyMesh);
        }

        let mut faces = FaceSet::new();
        for (kind, data) in [(FaceKind::Tri, tris), (FaceKind::Quad, quads)] {
            if !data.is_empty() {
                faces.insert(FaceArray::from_flat(kind, data)?);
            }
        }

        let mesh = Mesh::from_parts(name, VertexArray::new_cartesian(points), faces);
        mesh.validate()?;
        Ok(mesh)
    }
}

impl DataFormat for ObjFormat {
    fn name(&self) -> &'static str {
        "OBJ"
    }

    fn extension(&self) -> &'static str {
        "obj"
    }

    fn to_bytes(&self, geometry: &dyn Geometry) -> Result<Vec<u8>, FormatError> {
        self.render(geometry).map(String::into_bytes)
    }

    fn from_bytes(&self, data: &[u8]) -> Result<Mesh, FormatError> {
        self.parse(&mut Cursor::new(data))
    }

    fn dumps(&self, geometry: &dyn Geometry) -> Result<String, FormatError> {
        self.render(geometry)
    }
}
