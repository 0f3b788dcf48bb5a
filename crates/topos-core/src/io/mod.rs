//! Interchange formats (OBJ, JSON, STL)

mod json;
mod normals;
mod obj;
mod stl;

use std::path::Path;

use crate::error::FormatError;
use crate::geometry::Geometry;
use crate::mesh::Mesh;

pub use json::{JSON_DEFAULT_NAME, JsonFormat};
pub use normals::triangle_normal;
pub use obj::{ObjFormat, ObjOptions};
pub use stl::StlFormat;

/// Something that can write geometry to bytes and read a mesh back
pub trait DataFormat {
    /// Human readable format name
    fn name(&self) -> &'static str;

    /// File extension, without the dot
    fn extension(&self) -> &'static str;

    fn to_bytes(&self, geometry: &dyn Geometry) -> Result<Vec<u8>, FormatError>;

    fn from_bytes(&self, data: &[u8]) -> Result<Mesh, FormatError>;

    /// Serialize to a string; fails for binary formats
    fn dumps(&self, geometry: &dyn Geometry) -> Result<String, FormatError> {
        let bytes = self.to_bytes(geometry)?;
        String::from_utf8(bytes)
            .map_err(|_| FormatError::UnsupportedFormat(format!("{} is not a text format", self.name())))
    }

    fn loads(&self, text: &str) -> Result<Mesh, FormatError> {
        self.from_bytes(text.as_bytes())
    }

    /// Write `geometry` to `path`
    fn dump(&self, path: &Path, geometry: &dyn Geometry) -> Result<(), FormatError> {
        let bytes = self.to_bytes(geometry)?;
        std::fs::write(path, bytes).map_err(|e| FormatError::Io(e.to_string()))?;
        tracing::debug!(
            "Saved {} ({} vertices, {} faces) as {} to {:?}",
            geometry.name(),
            geometry.vertices().len(),
            geometry.faces().len(),
            self.name(),
            path
        );
        Ok(())
    }

    /// Read a mesh from `path`, naming it after the file if the data has no name
    fn load(&self, path: &Path) -> Result<Mesh, FormatError> {
        let data = std::fs::read(path).map_err(|e| FormatError::Io(e.to_string()))?;
        let mut mesh = self.from_bytes(&data)?;
        if mesh.explicit_name().is_none() {
            mesh.set_name(name_from_path(path));
        }
        tracing::debug!(
            "Loaded {} from {:?}: {} vertices, {} faces",
            self.name(),
            path,
            mesh.vertices().len(),
            mesh.faces().len()
        );
        Ok(mesh)
    }
}

pub(crate) fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

/// Format picked from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Obj,
    Json,
    Stl,
}

impl FileFormat {
    pub const ALL: &'static [FileFormat] = &[FileFormat::Obj, FileFormat::Json, FileFormat::Stl];

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("obj") => Some(FileFormat::Obj),
            Some("json") => Some(FileFormat::Json),
            Some("stl") => Some(FileFormat::Stl),
            _ => None,
        }
    }

    /// The format with default options
    pub fn data_format(&self) -> Box<dyn DataFormat> {
        match self {
            FileFormat::Obj => Box::new(ObjFormat::default()),
            FileFormat::Json => Box::new(JsonFormat),
            FileFormat::Stl => Box::new(StlFormat),
        }
    }
}

fn detect(path: &Path) -> Result<FileFormat, FormatError> {
    FileFormat::from_path(path)
        .ok_or_else(|| FormatError::UnsupportedFormat(path.display().to_string()))
}

/// Save geometry, choosing the format from the file extension
pub fn save(path: impl AsRef<Path>, geometry: &dyn Geometry) -> Result<(), FormatError> {
    let path = path.as_ref();
    detect(path)?.data_format().dump(path, geometry)
}

/// Load a mesh, choosing the format from the file extension
pub fn load(path: impl AsRef<Path>) -> Result<Mesh, FormatError> {
    let path = path.as_ref();
    detect(path)?.data_format().load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::{FaceArray, FaceKind};
    use crate::primitive::{PlaneParams, plane};
    use crate::vertices::VertexArray;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a/b.OBJ")), Some(FileFormat::Obj));
        assert_eq!(FileFormat::from_path(Path::new("b.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("b.stl")), Some(FileFormat::Stl));
        assert_eq!(FileFormat::from_path(Path::new("b.dae")), None);
        assert_eq!(FileFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_save_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = plane(&PlaneParams {
            resolution: 3,
            ..Default::default()
        });

        for format in FileFormat::ALL {
            let path = dir.path().join(format!("grid.{}", format.data_format().extension()));
            save(&path, &mesh).unwrap();
            let loaded = load(&path).unwrap();
            assert_eq!(loaded.vertices().len(), 9, "{:?}", format);
            assert!(loaded.validate().is_ok());
        }
    }

    #[test]
    fn test_load_names_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wedge.obj");
        let mesh = Mesh::new(
            VertexArray::new_cartesian(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            [FaceArray::tris([[0, 1, 2]])],
        );
        let format = ObjFormat::new(ObjOptions {
            write_name: false,
            ..Default::default()
        });
        format.dump(&path, &mesh).unwrap();
        let loaded = format.load(&path).unwrap();
        assert_eq!(loaded.name(), "wedge");
        assert_eq!(loaded.faces().get(FaceKind::Tri).map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            load("mesh.ply"),
            Err(FormatError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_stl_is_not_text() {
        let mesh = plane(&PlaneParams::default());
        assert!(matches!(
            StlFormat.dumps(&mesh),
            Err(FormatError::UnsupportedFormat(_))
        ));
    }
}
