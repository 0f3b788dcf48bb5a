//! Ready-made meshes built from the generators

use crate::constants::{CYLINDER_RINGS, CYLINDER_SEGMENTS, PLANE_RESOLUTION};
use crate::error::GeneratorError;
use crate::generators::{
    CylindricalBounds, PlanarBounds, cylindrical_faces, cylindrical_vertices, planar_faces,
    planar_vertices,
};
use crate::mesh::Mesh;

/// Options for [`plane`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneParams {
    /// Vertices along each side
    pub resolution: usize,
    pub bounds: PlanarBounds,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            resolution: PLANE_RESOLUTION,
            bounds: PlanarBounds::default(),
        }
    }
}

/// Options for [`cylinder`]
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderParams {
    /// Vertices around the circumference
    pub segments: usize,
    /// Vertices along the z axis
    pub rings: usize,
    pub bounds: CylindricalBounds,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            segments: CYLINDER_SEGMENTS,
            rings: CYLINDER_RINGS,
            bounds: CylindricalBounds::default(),
        }
    }
}

/// A flat square grid on z = 0
pub fn plane(params: &PlaneParams) -> Mesh {
    let n = params.resolution;
    Mesh::new(planar_vertices(n, &params.bounds), [planar_faces(n)]).with_name("Plane")
}

/// An open tube around the z axis
///
/// The seam is closed only when the tube makes a full turn.
pub fn cylinder(params: &CylinderParams) -> Result<Mesh, GeneratorError> {
    let vertices = cylindrical_vertices(params.segments, params.rings, &params.bounds)?;
    // matches the seam rule of cylindrical_vertices
    let close_loop = params.bounds.theta_max >= std::f64::consts::TAU;
    let faces = cylindrical_faces(params.segments, params.rings, close_loop);
    Ok(Mesh::new(vertices, [faces]).with_name("Cylinder"))
}
