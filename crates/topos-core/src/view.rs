//! Views place a geometry in the world without touching its vertices

use std::borrow::Cow;
use std::fmt;

use glam::{DAffine3, DQuat, DVec3};

use crate::error::WorldViewPositionError;
use crate::geometry::Geometry;
use crate::mesh::FaceSet;
use crate::vertices::VertexArray;

/// A geometry seen through a rigid transform
///
/// Rotation is applied first, then translation. The wrapped geometry is
/// only ever borrowed.
#[derive(Debug, Clone)]
pub struct WorldView<G> {
    name: String,
    geometry: G,
    position: DVec3,
    rotation: DQuat,
}

impl<G: Geometry> WorldView<G> {
    /// View `geometry` at the origin with no rotation
    pub fn new(geometry: G) -> Self {
        let name = format!("WorldView:{}", geometry.name());
        Self {
            name,
            geometry,
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: DQuat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Set the position from a dynamically sized slice
    pub fn set_position(&mut self, position: &[f64]) -> Result<(), WorldViewPositionError> {
        match position {
            &[x, y, z] => {
                self.position = DVec3::new(x, y, z);
                Ok(())
            }
            _ => Err(WorldViewPositionError::Shape {
                found: position.len(),
            }),
        }
    }

    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: DQuat) {
        self.rotation = rotation;
    }

    /// The view's rigid transform
    pub fn transform(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(self.rotation, self.position)
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn into_inner(self) -> G {
        self.geometry
    }
}

impl<G: Geometry> Geometry for WorldView<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(&self) -> Cow<'_, VertexArray> {
        let transform = self.transform();
        let placed = self
            .geometry
            .vertices()
            .cartesian()
            .iter()
            .map(|&p| transform.transform_point3(DVec3::from_array(p)).to_array())
            .collect();
        Cow::Owned(VertexArray::new_cartesian(placed))
    }

    fn faces(&self) -> &FaceSet {
        self.geometry.faces()
    }

    fn describe_extra(&self) -> String {
        let p = self.position;
        format!(
            "Geometry: {}\nPosition: [{}, {}, {}]\n",
            self.geometry.name(),
            p.x,
            p.y,
            p.z
        )
    }
}

impl<G: Geometry> fmt::Display for WorldView<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
