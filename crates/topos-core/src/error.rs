//! Error taxonomy
//!
//! Every error kind carries a stable code (e.g. `VA03`) that maps to a
//! section of the troubleshooting guide, plus the offending shape, axis,
//! index or type.

use thiserror::Error;

use crate::constants::TROUBLESHOOTING_URL;
use crate::coords::Axis;
use crate::faces::FaceKind;

/// Result type alias for topos operations
pub type ToposResult<T> = Result<T, ToposError>;

/// Errors raised while constructing a vertex array
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VertexDataError {
    #[error("Vertex array must have shape (n, 3): row {row} has {len} values")]
    RowLength { row: usize, len: usize },

    #[error("Vertex array must have shape (n, 3): flat buffer of {len} values is not a multiple of 3")]
    FlatLength { len: usize },

    #[error("Vertex array must be numeric: row {row} contains {found}")]
    NotNumeric { row: usize, found: String },

    #[error("Vertex array must be represented by an array of rows, found {found}")]
    NotAnArray { found: String },

    #[error("Vertex {row} has a non-finite coordinate {value}")]
    NonFinite { row: usize, value: f64 },
}

/// Errors raised by vertex array addition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VertexAdditionError {
    #[error("Incompatible shape ({found},), array must have shape (3,)")]
    IncompatibleShape { found: usize },
}

/// Errors raised when reading or writing named coordinates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VertexCoordinateError {
    #[error("Coordinates must be specified using at least one axis name")]
    EmptySelector,

    #[error("Unknown coordinate variable {0:?}")]
    UnknownAxis(String),

    #[error("Coordinate array must have shape ({expected},), found ({found},)")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Axis function parameter {0:?} is not one of x, y, z, r, t")]
    UnknownParameter(String),

    #[error("Axis function parameter {0} is declared more than once")]
    DuplicateParameter(Axis),
}

/// Errors raised while constructing or exporting faces
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaceDataError {
    #[error("Face array must have shape (n, {expected}): row {row} has {len} indices")]
    RowLength {
        expected: usize,
        row: usize,
        len: usize,
    },

    #[error("Face array must have shape (n, {expected}): flat buffer of {len} indices")]
    FlatLength { expected: usize, len: usize },

    #[error("Faces can only be defined using non-negative integers: row {row} contains {found}")]
    NonInteger { row: usize, found: String },

    #[error("Faces must be represented by an array of rows, found {found}")]
    NotAnArray { found: String },

    #[error("Faces must have 3 or 4 sides, found a face with {0}")]
    UnsupportedArity(usize),

    #[error(
        "{kind} face {face} references vertex {index}, but the mesh only has {vertex_count} vertices"
    )]
    IndexOutOfRange {
        kind: FaceKind,
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Shifting vertex index {index} by {offset} overflows u32")]
    IndexOverflow { index: u32, offset: u32 },

    #[error("{count} vertices cannot be addressed by u32 face indices")]
    TooManyVertices { count: usize },
}

/// Errors raised while parsing or applying a positional format template
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("Single '{brace}' encountered at position {position} of the template")]
    UnmatchedBrace { brace: char, position: usize },

    #[error("Named substitutions are not supported: {{{0}}}")]
    NamedField(String),

    #[error("Cannot switch between automatic and manual field numbering")]
    MixedNumbering,

    #[error("Unsupported format spec {0:?}, only precision (e.g. \".3\") is allowed")]
    BadSpec(String),

    #[error("Template field {index} is out of range for rows of {arity} values")]
    FieldOutOfRange { index: usize, arity: usize },

    #[error("Template field {index} sets a precision, but face indices are integers")]
    PrecisionOnInteger { index: usize },
}

/// Errors raised by the geometry generators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("Argument {name} must be positive, found {value}")]
    NotPositive { name: &'static str, value: usize },
}

/// Errors raised when placing geometry in the world
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldViewPositionError {
    #[error("Position array must have shape (3,), found ({found},)")]
    Shape { found: usize },
}

/// Errors raised while reading or writing interchange formats
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Missing expected field: {0}")]
    MissingField(&'static str),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Vertices(#[from] VertexDataError),
    #[error(transparent)]
    Faces(#[from] FaceDataError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Any error raised by topos
#[derive(Debug, Clone, Error)]
pub enum ToposError {
    #[error(transparent)]
    VertexData(#[from] VertexDataError),
    #[error(transparent)]
    VertexAddition(#[from] VertexAdditionError),
    #[error(transparent)]
    VertexCoordinate(#[from] VertexCoordinateError),
    #[error(transparent)]
    FaceData(#[from] FaceDataError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    WorldViewPosition(#[from] WorldViewPositionError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl FormatError {
    /// Stable identifier of this error kind
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::Vertices(_) => "VA01",
            FormatError::Faces(_) => "FA01",
            FormatError::Template(_) => "FA02",
            _ => "IO01",
        }
    }
}

impl ToposError {
    /// Stable identifier of this error kind
    pub fn code(&self) -> &'static str {
        match self {
            ToposError::VertexData(_) => "VA01",
            ToposError::VertexAddition(_) => "VA02",
            ToposError::VertexCoordinate(_) => "VA03",
            ToposError::FaceData(_) => "FA01",
            ToposError::Template(_) => "FA02",
            ToposError::Generator(_) => "GE01",
            ToposError::WorldViewPosition(_) => "WV01",
            ToposError::Format(e) => e.code(),
        }
    }

    /// Link to the troubleshooting section for this error kind
    pub fn help_url(&self) -> String {
        format!(
            "{}#{}",
            TROUBLESHOOTING_URL,
            self.code().to_ascii_lowercase()
        )
    }
}
