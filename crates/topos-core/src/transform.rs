//! Vertex transforms
//!
//! A transform rewrites a copy of a geometry's vertices and hands back a new
//! mesh that shares the original faces and name.

use crate::coords::Axis;
use crate::error::VertexCoordinateError;
use crate::geometry::Geometry;
use crate::mesh::Mesh;
use crate::vertices::VertexArray;

pub trait VertexTransform {
    /// Rewrite `vertices` in place
    fn transform(&self, vertices: &mut VertexArray) -> Result<(), VertexCoordinateError>;

    /// Apply to a copy of `geometry`'s vertices
    fn apply<G: Geometry + ?Sized>(&self, geometry: &G) -> Result<Mesh, VertexCoordinateError>
    where
        Self: Sized,
    {
        let mut vertices = geometry.vertices().into_owned();
        self.transform(&mut vertices)?;
        Ok(Mesh::from_parts(
            Some(geometry.name().to_string()),
            vertices,
            geometry.faces().clone(),
        ))
    }
}

/// Per-axis factors, applied in the order they were given
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scale {
    factors: Vec<(Axis, f64)>,
}

impl Scale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale x, y and z by the same factor
    pub fn uniform(factor: f64) -> Self {
        Self::new().x(factor).y(factor).z(factor)
    }

    pub fn axis(mut self, axis: Axis, factor: f64) -> Self {
        self.factors.push((axis, factor));
        self
    }

    pub fn x(self, factor: f64) -> Self {
        self.axis(Axis::X, factor)
    }

    pub fn y(self, factor: f64) -> Self {
        self.axis(Axis::Y, factor)
    }

    pub fn z(self, factor: f64) -> Self {
        self.axis(Axis::Z, factor)
    }

    pub fn r(self, factor: f64) -> Self {
        self.axis(Axis::R, factor)
    }

    pub fn t(self, factor: f64) -> Self {
        self.axis(Axis::T, factor)
    }
}

impl VertexTransform for Scale {
    fn transform(&self, vertices: &mut VertexArray) -> Result<(), VertexCoordinateError> {
        for &(axis, factor) in &self.factors {
            let values: Vec<f64> = vertices.get(axis).iter().map(|v| v * factor).collect();
            vertices.set_values(axis, &values)?;
        }
        Ok(())
    }
}

/// Per-axis offsets, applied in the order they were given
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Displace {
    offsets: Vec<(Axis, f64)>,
}

impl Displace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, axis: Axis, offset: f64) -> Self {
        self.offsets.push((axis, offset));
        self
    }

    pub fn x(self, offset: f64) -> Self {
        self.axis(Axis::X, offset)
    }

    pub fn y(self, offset: f64) -> Self {
        self.axis(Axis::Y, offset)
    }

    pub fn z(self, offset: f64) -> Self {
        self.axis(Axis::Z, offset)
    }

    pub fn r(self, offset: f64) -> Self {
        self.axis(Axis::R, offset)
    }

    /// Rotate about the z axis by `offset` radians
    pub fn t(self, offset: f64) -> Self {
        self.axis(Axis::T, offset)
    }
}

impl VertexTransform for Displace {
    fn transform(&self, vertices: &mut VertexArray) -> Result<(), VertexCoordinateError> {
        for &(axis, offset) in &self.offsets {
            let values: Vec<f64> = vertices.get(axis).iter().map(|v| v + offset).collect();
            vertices.set_values(axis, &values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateSystem;
    use crate::faces::FaceArray;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn unit_square() -> Mesh {
        Mesh::new(
            VertexArray::new_cartesian(vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ]),
            [FaceArray::quads([[0, 1, 2, 3]])],
        )
        .with_name("square")
    }

    #[test]
    fn test_scale_keeps_faces_and_name() {
        let square = unit_square();
        let scaled = Scale::new().x(2.0).z(5.0).apply(&square).unwrap();
        assert_eq!(scaled.name(), "square");
        assert_eq!(scaled.faces(), square.faces());
        assert_eq!(scaled.vertices().x(), vec![0.0, 2.0, 2.0, 0.0]);
        assert_eq!(scaled.vertices().y(), square.vertices().y());
        // original untouched
        assert_eq!(square.vertices().x(), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_uniform_scale() {
        let scaled = Scale::uniform(3.0).apply(&unit_square()).unwrap();
        assert_eq!(scaled.vertices().data()[2], [3.0, 3.0, 0.0]);
    }

    #[test]
    fn test_scale_radius_on_cartesian() {
        let mut verts = VertexArray::new_cartesian(vec![[1.0, 0.0, 4.0], [0.0, 2.0, 4.0]]);
        Scale::new().r(0.5).transform(&mut verts).unwrap();
        assert_eq!(verts.system(), CoordinateSystem::Cartesian);
        let data = verts.data();
        assert_relative_eq!(data[0][0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(data[1][1], 1.0, epsilon = 1e-12);
        assert_eq!(data[1][2], 4.0);
    }

    #[test]
    fn test_displace() {
        let moved = Displace::new().z(1.5).x(-1.0).apply(&unit_square()).unwrap();
        assert_eq!(moved.vertices().data()[0], [-1.0, 0.0, 1.5]);
    }

    #[test]
    fn test_displace_angle_rotates() {
        let mut verts = VertexArray::new_cartesian(vec![[1.0, 0.0, 0.0]]);
        Displace::new().t(FRAC_PI_2).transform(&mut verts).unwrap();
        let p = verts.data()[0];
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-12);
    }
}
