//! Face arrays: fixed-arity tuples of vertex indices

use std::fmt;
use std::slice::ChunksExact;

use serde::{Deserialize, Serialize};

use crate::error::{FaceDataError, TemplateError};
use crate::template::{FormatOptions, Template};

/// Arity of the faces stored in a face array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceKind {
    Tri,
    Quad,
}

impl FaceKind {
    pub const ALL: &'static [FaceKind] = &[FaceKind::Tri, FaceKind::Quad];

    /// Number of vertex indices per face
    pub fn num_sides(&self) -> usize {
        match self {
            FaceKind::Tri => 3,
            FaceKind::Quad => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FaceKind::Tri => "Tri",
            FaceKind::Quad => "Quad",
        }
    }

    pub fn from_sides(sides: usize) -> Result<Self, FaceDataError> {
        match sides {
            3 => Ok(FaceKind::Tri),
            4 => Ok(FaceKind::Quad),
            n => Err(FaceDataError::UnsupportedArity(n)),
        }
    }
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize)]
struct RawFaceArray {
    kind: FaceKind,
    indices: Vec<u32>,
}

/// N faces of `num_sides` zero-based vertex indices each
///
/// Indices are not checked against any vertex array here, that happens when
/// a mesh is validated or exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFaceArray", into = "RawFaceArray")]
pub struct FaceArray {
    kind: FaceKind,
    /// Row-major, `num_sides` indices per face
    data: Vec<u32>,
}

impl TryFrom<RawFaceArray> for FaceArray {
    type Error = FaceDataError;

    fn try_from(raw: RawFaceArray) -> Result<Self, Self::Error> {
        FaceArray::from_flat(raw.kind, raw.indices)
    }
}

impl From<FaceArray> for RawFaceArray {
    fn from(faces: FaceArray) -> Self {
        Self {
            kind: faces.kind,
            indices: faces.data,
        }
    }
}

impl FaceArray {
    /// Create an empty array of the given kind
    pub fn empty(kind: FaceKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
        }
    }

    /// Create a triangle array
    pub fn tris(faces: impl IntoIterator<Item = [u32; 3]>) -> Self {
        Self {
            kind: FaceKind::Tri,
            data: faces.into_iter().flatten().collect(),
        }
    }

    /// Create a quad array
    pub fn quads(faces: impl IntoIterator<Item = [u32; 4]>) -> Self {
        Self {
            kind: FaceKind::Quad,
            data: faces.into_iter().flatten().collect(),
        }
    }

    /// Create an array from rows whose length is only known at runtime
    pub fn from_rows<R: AsRef<[u32]>>(kind: FaceKind, rows: &[R]) -> Result<Self, FaceDataError> {
        let expected = kind.num_sides();
        let mut data = Vec::with_capacity(rows.len() * expected);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != expected {
                return Err(FaceDataError::RowLength {
                    expected,
                    row,
                    len: r.len(),
                });
            }
            data.extend_from_slice(r);
        }
        Ok(Self { kind, data })
    }

    /// Create an array from numeric rows, rejecting anything that is not a
    /// non-negative integer
    pub fn from_numbers<R: AsRef<[f64]>>(
        kind: FaceKind,
        rows: &[R],
    ) -> Result<Self, FaceDataError> {
        let mut indices = Vec::with_capacity(rows.len());
        for (row, r) in rows.iter().enumerate() {
            let converted = r
                .as_ref()
                .iter()
                .map(|&v| {
                    if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX) {
                        Ok(v as u32)
                    } else {
                        Err(FaceDataError::NonInteger {
                            row,
                            found: v.to_string(),
                        })
                    }
                })
                .collect::<Result<Vec<u32>, _>>()?;
            indices.push(converted);
        }
        Self::from_rows(kind, &indices)
    }

    /// Create an array from a row-major flat buffer
    pub fn from_flat(kind: FaceKind, data: Vec<u32>) -> Result<Self, FaceDataError> {
        let expected = kind.num_sides();
        if data.len() % expected != 0 {
            return Err(FaceDataError::FlatLength {
                expected,
                len: data.len(),
            });
        }
        Ok(Self { kind, data })
    }

    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    pub fn num_sides(&self) -> usize {
        self.kind.num_sides()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Number of faces
    pub fn len(&self) -> usize {
        self.data.len() / self.num_sides()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major index buffer
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Iterate over faces
    pub fn rows(&self) -> ChunksExact<'_, u32> {
        self.data.chunks_exact(self.num_sides())
    }

    /// Get a single face
    pub fn row(&self, index: usize) -> Option<&[u32]> {
        self.rows().nth(index)
    }

    /// Largest vertex index referenced
    pub fn max_index(&self) -> Option<u32> {
        self.data.iter().copied().max()
    }

    /// A copy with every index shifted by `offset`
    pub fn offset_by(&self, offset: u32) -> Result<Self, FaceDataError> {
        let data = self
            .data
            .iter()
            .map(|&index| {
                index
                    .checked_add(offset)
                    .ok_or(FaceDataError::IndexOverflow { index, offset })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            kind: self.kind,
            data,
        })
    }

    /// Append faces of the same kind
    pub(crate) fn append(&mut self, other: &FaceArray) {
        debug_assert_eq!(self.kind, other.kind);
        self.data.extend_from_slice(&other.data);
    }

    /// Check every index against a vertex count
    pub fn check_bounds(&self, vertex_count: usize) -> Result<(), FaceDataError> {
        for (face, row) in self.rows().enumerate() {
            if let Some(&index) = row.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(FaceDataError::IndexOutOfRange {
                    kind: self.kind,
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Render every face through a positional template
    ///
    /// `format("f {} {} {}", &FormatOptions::default())` on `[[1, 2, 3], [4, 5, 6]]`
    /// gives `"f 1 2 3\nf 4 5 6"`. Prefix and suffix are written once, not
    /// per face.
    pub fn format(&self, template: &str, options: &FormatOptions) -> Result<String, TemplateError> {
        let template = Template::parse(template)?;
        template.check_arity(self.num_sides())?;
        template.check_no_precision()?;
        Ok(template.render_rows(self.rows(), options))
    }
}

impl fmt::Display for FaceArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        let noun = if n == 1 { "face" } else { "faces" };
        write!(f, "{} Array: {} {}", self.name(), n, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_default() {
        let faces = FaceArray::tris([[1, 2, 3], [4, 5, 6]]);
        let s = faces.format("{} {} {}", &FormatOptions::default()).unwrap();
        assert_eq!(s, "1 2 3\n4 5 6");
    }

    #[test]
    fn test_format_wrapped() {
        let faces = FaceArray::tris([[1, 2, 3], [4, 5, 6]]);
        let options = FormatOptions::new("[", "]", ", ");
        let s = faces.format("[{}, {}, {}]", &options).unwrap();
        assert_eq!(s, "[[1, 2, 3], [4, 5, 6]]");
    }

    #[test]
    fn test_format_reversed_winding() {
        let faces = FaceArray::quads([[0, 1, 2, 3]]);
        let s = faces.format("{3} {2} {1} {0} {0}", &FormatOptions::default()).unwrap();
        assert_eq!(s, "3 2 1 0 0");
    }

    #[test]
    fn test_format_field_out_of_range() {
        let faces = FaceArray::tris([[0, 1, 2]]);
        assert_eq!(
            faces.format("{} {} {} {}", &FormatOptions::default()),
            Err(TemplateError::FieldOutOfRange { index: 3, arity: 3 })
        );
    }

    #[test]
    fn test_format_rejects_precision() {
        let faces = FaceArray::tris([[0, 1, 2]]);
        assert_eq!(
            faces.format("{0} {1:.2} {2}", &FormatOptions::default()),
            Err(TemplateError::PrecisionOnInteger { index: 1 })
        );
        assert_eq!(
            faces.format("{:.0} {} {}", &FormatOptions::default()),
            Err(TemplateError::PrecisionOnInteger { index: 0 })
        );
    }

    #[test]
    fn test_format_empty() {
        let faces = FaceArray::empty(FaceKind::Quad);
        let s = faces.format("{} {} {} {}", &FormatOptions::new("[", "]", ", ")).unwrap();
        assert_eq!(s, "[]");
    }

    #[test]
    fn test_bad_row_length() {
        let err = FaceArray::from_rows(FaceKind::Quad, &[vec![1, 2, 3, 4], vec![1, 2, 3]]);
        assert_eq!(
            err,
            Err(FaceDataError::RowLength {
                expected: 4,
                row: 1,
                len: 3
            })
        );
    }

    #[test]
    fn test_bad_flat_length() {
        assert!(matches!(
            FaceArray::from_flat(FaceKind::Tri, vec![0, 1, 2, 3]),
            Err(FaceDataError::FlatLength { expected: 3, len: 4 })
        ));
    }

    #[test]
    fn test_non_integer() {
        let err = FaceArray::from_numbers(FaceKind::Quad, &[[1.0, 2.0, 3.5, 4.0]]);
        assert!(matches!(err, Err(FaceDataError::NonInteger { row: 0, .. })));

        let err = FaceArray::from_numbers(FaceKind::Tri, &[[0.0, -1.0, 2.0]]);
        assert!(matches!(err, Err(FaceDataError::NonInteger { .. })));

        let faces = FaceArray::from_numbers(FaceKind::Tri, &[[0.0, 1.0, 2.0]]).unwrap();
        assert_eq!(faces.data(), &[0, 1, 2]);
    }

    #[test]
    fn test_offset_overflow() {
        let faces = FaceArray::tris([[0, 1, u32::MAX]]);
        assert_eq!(
            faces.offset_by(1),
            Err(FaceDataError::IndexOverflow {
                index: u32::MAX,
                offset: 1
            })
        );
        assert_eq!(faces.offset_by(0).unwrap(), faces);
    }

    #[test]
    fn test_accessors() {
        let faces = FaceArray::quads([[0, 1, 2, 3], [4, 5, 6, 7]]);
        assert_eq!(faces.len(), 2);
        assert_eq!(faces.num_sides(), 4);
        assert_eq!(faces.name(), "Quad");
        assert_eq!(faces.row(1), Some(&[4, 5, 6, 7][..]));
        assert_eq!(faces.max_index(), Some(7));
        assert_eq!(faces.offset_by(1).unwrap().row(0), Some(&[1, 2, 3, 4][..]));
        assert_eq!(faces.to_string(), "Quad Array: 2 faces");
        assert_eq!(FaceArray::tris([[0, 1, 2]]).to_string(), "Tri Array: 1 face");
    }

    #[test]
    fn test_check_bounds() {
        let faces = FaceArray::tris([[0, 1, 2], [1, 2, 3]]);
        assert!(faces.check_bounds(4).is_ok());
        assert_eq!(
            faces.check_bounds(3),
            Err(FaceDataError::IndexOutOfRange {
                kind: FaceKind::Tri,
                face: 1,
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_serde_rejects_ragged_buffer() {
        let json = r#"{"kind":"Tri","indices":[0,1,2,3]}"#;
        assert!(serde_json::from_str::<FaceArray>(json).is_err());

        let faces = FaceArray::tris([[0, 1, 2]]);
        let json = serde_json::to_string(&faces).unwrap();
        assert_eq!(serde_json::from_str::<FaceArray>(&json).unwrap(), faces);
    }
}
