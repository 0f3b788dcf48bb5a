//! The read-only geometry interface shared by meshes and views
//!
//! Exporters and transforms are written once against [`Geometry`] and work
//! for anything that can hand out vertices and faces.

use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;

use crate::error::{FaceDataError, FormatError};
use crate::io::DataFormat;
use crate::mesh::FaceSet;
use crate::vertices::VertexArray;

pub trait Geometry {
    /// Name of the geometry object
    fn name(&self) -> &str;

    /// Vertices, borrowed when stored and computed when placed
    fn vertices(&self) -> Cow<'_, VertexArray>;

    fn faces(&self) -> &FaceSet;

    /// Extra lines for [`Geometry::describe`]
    fn describe_extra(&self) -> String {
        String::new()
    }

    /// Check that every face references an existing vertex
    fn validate(&self) -> Result<(), FaceDataError> {
        self.faces().check_bounds(self.vertices().len())
    }

    /// Multi-line summary: name, extras, vertex count and face counts per kind
    fn describe(&self) -> String {
        let mut s = format!("{}\n", self.name());
        s.push_str(&self.describe_extra());
        let _ = writeln!(s, "Vertices: {}", self.vertices().len());
        for faces in self.faces() {
            let _ = writeln!(s, "{} Faces: {}", faces.name(), faces.len());
        }
        s
    }

    /// Write the geometry to a file in the given format
    fn save(&self, path: &Path, format: &dyn DataFormat) -> Result<(), FormatError>
    where
        Self: Sized,
    {
        format.dump(path, self)
    }
}

impl<G: Geometry + ?Sized> Geometry for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn vertices(&self) -> Cow<'_, VertexArray> {
        (**self).vertices()
    }

    fn faces(&self) -> &FaceSet {
        (**self).faces()
    }

    fn describe_extra(&self) -> String {
        (**self).describe_extra()
    }
}
