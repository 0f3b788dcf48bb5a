//! Generators for known geometries
//!
//! Generators come in `<name>_vertices` / `<name>_faces` pairs: one produces
//! the spatial layout, the other the topology over it. Cylindrical vertices
//! are laid out as (θ, z, r) so a tube's surface is numbered exactly like a
//! plane.

use std::f64::consts::TAU;

use crate::error::GeneratorError;
use crate::faces::{FaceArray, FaceKind};
use crate::vertices::VertexArray;

/// Rectangle covered by a planar grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Default for PlanarBounds {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 1.0,
            ymin: 0.0,
            ymax: 1.0,
        }
    }
}

/// Extent of a generated tube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalBounds {
    pub radius: f64,
    pub zmin: f64,
    pub zmax: f64,
    pub theta_min: f64,
    pub theta_max: f64,
}

impl Default for CylindricalBounds {
    fn default() -> Self {
        Self {
            radius: 1.0,
            zmin: 0.0,
            zmax: 1.0,
            theta_min: 0.0,
            theta_max: TAU,
        }
    }
}

/// `n` evenly spaced samples from `start`, hitting `stop` exactly when
/// `endpoint` is set
pub(crate) fn linspace(start: f64, stop: f64, n: usize, endpoint: bool) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let div = (if endpoint { n - 1 } else { n }) as f64;
            let step = (stop - start) / div;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            if endpoint {
                values[n - 1] = stop;
            }
            values
        }
    }
}

/// An `n` × `n` grid on the z = 0 plane, x varying fastest
pub fn planar_vertices(n: usize, bounds: &PlanarBounds) -> VertexArray {
    let xs = linspace(bounds.xmin, bounds.xmax, n, true);
    let ys = linspace(bounds.ymin, bounds.ymax, n, true);
    let data = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| [x, y, 0.0]))
        .collect();
    VertexArray::new_cartesian(data)
}

/// The (n − 1)² quads over an `n` × `n` grid
///
/// Corners run lower left, lower right, upper right, upper left so normals
/// point along +z.
pub fn planar_faces(n: usize) -> FaceArray {
    grid_quads(n, n, false)
}

/// A hollow tube of `n_theta` × `n_z` vertices in cylindrical coordinates
///
/// The θ endpoint is only included for partial turns, so a full loop does
/// not duplicate its seam.
pub fn cylindrical_vertices(
    n_theta: usize,
    n_z: usize,
    bounds: &CylindricalBounds,
) -> Result<VertexArray, GeneratorError> {
    if n_theta < 1 {
        return Err(GeneratorError::NotPositive {
            name: "n_theta",
            value: n_theta,
        });
    }

    let endpoint = bounds.theta_max < TAU;
    let ts = linspace(bounds.theta_min, bounds.theta_max, n_theta, endpoint);
    let zs = linspace(bounds.zmin, bounds.zmax, n_z, true);
    let r = bounds.radius;
    let data = zs
        .iter()
        .flat_map(|&z| ts.iter().map(move |&t| [t, z, r]))
        .collect();
    Ok(VertexArray::new_cylindrical(data))
}

/// Quads over an `n_theta` × `n_z` tube, joining the last column to the
/// first when `close_loop` is set
pub fn cylindrical_faces(n_theta: usize, n_z: usize, close_loop: bool) -> FaceArray {
    grid_quads(n_theta, n_z, close_loop)
}

fn grid_quads(width: usize, height: usize, wrap: bool) -> FaceArray {
    if width == 0 {
        return FaceArray::empty(FaceKind::Quad);
    }
    let columns = if wrap { width } else { width - 1 };
    let w = width as u32;

    let mut faces = Vec::with_capacity(columns * height.saturating_sub(1));
    for j in 0..height.saturating_sub(1) as u32 {
        for i in 0..columns as u32 {
            let next = (i + 1) % w;
            faces.push([j * w + i, j * w + next, (j + 1) * w + next, (j + 1) * w + i]);
        }
    }
    FaceArray::quads(faces)
}
