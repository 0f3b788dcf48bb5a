//! Topos Core
//!
//! Vertex and face arrays for building polygon meshes:
//! - VertexArray: coordinates in a native system with named axis access
//! - FaceArray: triangles or quads of zero-based vertex indices
//! - Mesh and WorldView: geometry behind the `Geometry` trait
//! - Generators, primitives and transforms
//! - OBJ, JSON and STL interchange

pub mod constants;
pub mod coords;
pub mod error;
pub mod faces;
pub mod generators;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod primitive;
pub mod template;
pub mod transform;
pub mod vertices;
pub mod view;

pub use constants::*;
pub use coords::*;
pub use error::*;
pub use faces::*;
pub use generators::*;
pub use geometry::*;
pub use io::*;
pub use mesh::*;
pub use primitive::*;
pub use template::*;
pub use transform::*;
pub use vertices::*;
pub use view::*;
