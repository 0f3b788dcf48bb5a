//! Mesh: one vertex array plus one face array per face kind

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Values;
use std::fmt;
use std::ops::Add;
use std::path::Path;

use crate::constants::DEFAULT_GEOMETRY_NAME;
use crate::error::{FaceDataError, FormatError};
use crate::faces::{FaceArray, FaceKind};
use crate::geometry::Geometry;
use crate::io::{DataFormat, ObjFormat};
use crate::vertices::VertexArray;

/// Face arrays grouped by kind, triangles before quads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceSet {
    arrays: BTreeMap<FaceKind, FaceArray>,
}

impl FaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a face array, appending to any array of the same kind already held
    pub fn insert(&mut self, faces: FaceArray) {
        match self.arrays.get_mut(&faces.kind()) {
            Some(existing) => {
                tracing::warn!(
                    "Merging {} into an existing {} array of {} faces",
                    faces,
                    faces.kind(),
                    existing.len()
                );
                existing.append(&faces);
            }
            None => {
                self.arrays.insert(faces.kind(), faces);
            }
        }
    }

    pub fn get(&self, kind: FaceKind) -> Option<&FaceArray> {
        self.arrays.get(&kind)
    }

    /// Face kinds present
    pub fn kinds(&self) -> impl Iterator<Item = FaceKind> + '_ {
        self.arrays.keys().copied()
    }

    pub fn iter(&self) -> Values<'_, FaceKind, FaceArray> {
        self.arrays.values()
    }

    /// Total number of faces across all kinds
    pub fn len(&self) -> usize {
        self.arrays.values().map(FaceArray::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy with every index shifted by `offset`
    pub fn offset_by(&self, offset: u32) -> Result<Self, FaceDataError> {
        self.iter().map(|faces| faces.offset_by(offset)).collect()
    }

    /// Concatenate another set kind by kind, without the merge warning
    pub(crate) fn extend_from(&mut self, other: &FaceSet) {
        for faces in other {
            match self.arrays.get_mut(&faces.kind()) {
                Some(existing) => existing.append(faces),
                None => {
                    self.arrays.insert(faces.kind(), faces.clone());
                }
            }
        }
    }

    /// Check every index of every kind against a vertex count
    pub fn check_bounds(&self, vertex_count: usize) -> Result<(), FaceDataError> {
        self.iter()
            .try_for_each(|faces| faces.check_bounds(vertex_count))
    }
}

impl FromIterator<FaceArray> for FaceSet {
    fn from_iter<I: IntoIterator<Item = FaceArray>>(iter: I) -> Self {
        let mut set = FaceSet::new();
        for faces in iter {
            set.insert(faces);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FaceSet {
    type Item = &'a FaceArray;
    type IntoIter = Values<'a, FaceKind, FaceArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A simple container for geometry data
///
/// Index bounds are not checked on assembly; call [`Mesh::validate`] or let
/// the exporter check them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: Option<String>,
    vertices: VertexArray,
    faces: FaceSet,
}

impl Mesh {
    /// Assemble a mesh from a vertex array and any number of face arrays
    pub fn new(vertices: VertexArray, faces: impl IntoIterator<Item = FaceArray>) -> Self {
        Self {
            name: None,
            vertices,
            faces: faces.into_iter().collect(),
        }
    }

    /// Assemble a mesh from an already grouped face set
    pub fn from_parts(name: Option<String>, vertices: VertexArray, faces: FaceSet) -> Self {
        Self {
            name,
            vertices,
            faces,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Name given at construction, if any
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn vertices(&self) -> &VertexArray {
        &self.vertices
    }

    /// Mutable access for axis setters and in-place translation
    pub fn vertices_mut(&mut self) -> &mut VertexArray {
        &mut self.vertices
    }

    pub fn faces(&self) -> &FaceSet {
        &self.faces
    }

    pub fn add_faces(&mut self, faces: FaceArray) {
        self.faces.insert(faces);
    }

    /// Check that every face references an existing vertex
    pub fn validate(&self) -> Result<(), FaceDataError> {
        self.faces.check_bounds(self.vertices.len())
    }

    /// Export as OBJ text with default options
    pub fn to_obj(&self) -> Result<String, FormatError> {
        ObjFormat::default().dumps(self)
    }

    /// Save to a file in the given format
    pub fn save(&self, path: impl AsRef<Path>, format: &dyn DataFormat) -> Result<(), FormatError> {
        format.dump(path.as_ref(), self)
    }

    /// Combine two meshes
    ///
    /// Vertices are appended in the left system and the right mesh's faces are
    /// shifted past the left vertices. The right mesh is validated first, so
    /// an out-of-range face can never be shifted into range.
    pub fn try_add(&self, rhs: &Mesh) -> Result<Mesh, FaceDataError> {
        rhs.validate()?;
        let count = self.vertices.len();
        let offset = u32::try_from(count).map_err(|_| FaceDataError::TooManyVertices { count })?;
        let mut faces = self.faces.clone();
        faces.extend_from(&rhs.faces.offset_by(offset)?);
        Ok(Mesh {
            name: self.name.clone(),
            vertices: &self.vertices + &rhs.vertices,
            faces,
        })
    }

    /// Split into name, vertices and faces
    pub fn into_parts(self) -> (Option<String>, VertexArray, FaceSet) {
        (self.name, self.vertices, self.faces)
    }
}

impl Geometry for Mesh {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_GEOMETRY_NAME)
    }

    fn vertices(&self) -> Cow<'_, VertexArray> {
        Cow::Borrowed(&self.vertices)
    }

    fn faces(&self) -> &FaceSet {
        &self.faces
    }
}

/// Shorthand for [`Mesh::try_add`]
impl Add<&Mesh> for &Mesh {
    type Output = Result<Mesh, FaceDataError>;

    fn add(self, rhs: &Mesh) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Add for Mesh {
    type Output = Result<Mesh, FaceDataError>;

    fn add(self, rhs: Mesh) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
