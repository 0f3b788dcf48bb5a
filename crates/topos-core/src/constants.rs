//! Global constants for topos-core

/// Base URL of the troubleshooting guide, error codes are appended as anchors
pub const TROUBLESHOOTING_URL: &str = "https://topos.readthedocs.io/en/latest/troubleshooting.html";

/// Name given to geometry that was never named
pub const DEFAULT_GEOMETRY_NAME: &str = "Geometry";

/// Decimal places used for vertex coordinates in OBJ output
pub const OBJ_VERTEX_PRECISION: usize = 6;

/// Default resolution of the plane primitive (vertices per side)
pub const PLANE_RESOLUTION: usize = 8;

/// Default number of vertices around the cylinder primitive
pub const CYLINDER_SEGMENTS: usize = 32;

/// Default number of vertex rings along the cylinder primitive
pub const CYLINDER_RINGS: usize = 2;
