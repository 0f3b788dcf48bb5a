//! Coordinate systems and named axes
//!
//! Vertex arrays store their data in one native system. Every conversion goes
//! through cartesian, so the table only needs `to_cartesian` and
//! `from_cartesian` per system.
//!
//! Cylindrical triples are laid out as (θ, z, r) so that a cylinder's surface
//! has the same topology as a plane in (x, y).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VertexCoordinateError;

/// Basis in which a vertex array stores its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// (x, y, z)
    #[default]
    Cartesian,
    /// (θ, z, r)
    Cylindrical,
}

impl CoordinateSystem {
    pub const ALL: &'static [CoordinateSystem] =
        &[CoordinateSystem::Cartesian, CoordinateSystem::Cylindrical];

    pub fn name(&self) -> &'static str {
        match self {
            CoordinateSystem::Cartesian => "Cartesian",
            CoordinateSystem::Cylindrical => "Cylindrical",
        }
    }

    /// Convert a native triple of this system into (x, y, z)
    pub fn to_cartesian(&self, p: [f64; 3]) -> [f64; 3] {
        match self {
            CoordinateSystem::Cartesian => p,
            CoordinateSystem::Cylindrical => {
                let [t, z, r] = p;
                [r * t.cos(), r * t.sin(), z]
            }
        }
    }

    /// Convert (x, y, z) into a native triple of this system
    pub fn from_cartesian(&self, p: [f64; 3]) -> [f64; 3] {
        match self {
            CoordinateSystem::Cartesian => p,
            CoordinateSystem::Cylindrical => {
                let [x, y, z] = p;
                [y.atan2(x), z, (x * x + y * y).sqrt()]
            }
        }
    }

    /// Column holding `axis` in this system's native layout, if any
    pub fn column(&self, axis: Axis) -> Option<usize> {
        match (self, axis) {
            (CoordinateSystem::Cartesian, Axis::X) => Some(0),
            (CoordinateSystem::Cartesian, Axis::Y) => Some(1),
            (CoordinateSystem::Cartesian, Axis::Z) => Some(2),
            (CoordinateSystem::Cylindrical, Axis::T) => Some(0),
            (CoordinateSystem::Cylindrical, Axis::Z) => Some(1),
            (CoordinateSystem::Cylindrical, Axis::R) => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a native triple of `system` into cartesian coordinates
pub fn to_cartesian(native: [f64; 3], system: CoordinateSystem) -> [f64; 3] {
    system.to_cartesian(native)
}

/// Convert a cartesian triple into the native layout of `system`
pub fn from_cartesian(p: [f64; 3], system: CoordinateSystem) -> [f64; 3] {
    system.from_cartesian(p)
}

/// Convert a triple between any two systems
pub fn convert(p: [f64; 3], from: CoordinateSystem, to: CoordinateSystem) -> [f64; 3] {
    if from == to {
        return p;
    }
    to.from_cartesian(from.to_cartesian(p))
}

/// Convert a whole buffer between two systems
pub(crate) fn convert_all(
    data: &[[f64; 3]],
    from: CoordinateSystem,
    to: CoordinateSystem,
) -> Vec<[f64; 3]> {
    data.iter().map(|&p| convert(p, from, to)).collect()
}

/// A named coordinate variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Cylindrical radius
    R,
    /// Cylindrical angle θ
    T,
}

impl Axis {
    pub const ALL: &'static [Axis] = &[Axis::X, Axis::Y, Axis::Z, Axis::R, Axis::T];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::R => "r",
            Axis::T => "t",
        }
    }

    /// The system this axis is read from when the native one lacks it
    pub fn system(&self) -> CoordinateSystem {
        match self {
            Axis::X | Axis::Y | Axis::Z => CoordinateSystem::Cartesian,
            Axis::R | Axis::T => CoordinateSystem::Cylindrical,
        }
    }

    /// Column of this axis in the layout of `self.system()`
    pub fn home_column(&self) -> usize {
        match self {
            Axis::X | Axis::T => 0,
            Axis::Y => 1,
            Axis::Z | Axis::R => 2,
        }
    }

    pub fn from_char(c: char) -> Option<Axis> {
        match c {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            'r' => Some(Axis::R),
            't' => Some(Axis::T),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = VertexCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Axis::from_char(c).ok_or_else(|| VertexCoordinateError::UnknownAxis(s.to_string()))
            }
            _ => Err(VertexCoordinateError::UnknownAxis(s.to_string())),
        }
    }
}

/// Anything that names an ordered list of axes
///
/// `"xz"`, `["x", "z"]` and `[Axis::X, Axis::Z]` all select the same columns.
pub trait AxisSelector {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError>;
}

fn non_empty(axes: Vec<Axis>) -> Result<Vec<Axis>, VertexCoordinateError> {
    if axes.is_empty() {
        return Err(VertexCoordinateError::EmptySelector);
    }
    Ok(axes)
}

impl AxisSelector for str {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError> {
        let axes = self
            .chars()
            .map(|c| Axis::from_char(c).ok_or_else(|| VertexCoordinateError::UnknownAxis(c.into())))
            .collect::<Result<Vec<_>, _>>()?;
        non_empty(axes)
    }
}

impl AxisSelector for [&str] {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError> {
        let axes = self
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<_>, _>>()?;
        non_empty(axes)
    }
}

impl<const N: usize> AxisSelector for [&str; N] {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError> {
        self.as_slice().axes()
    }
}

impl AxisSelector for [Axis] {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError> {
        non_empty(self.to_vec())
    }
}

impl<const N: usize> AxisSelector for [Axis; N] {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError> {
        self.as_slice().axes()
    }
}

impl AxisSelector for Vec<Axis> {
    fn axes(&self) -> Result<Vec<Axis>, VertexCoordinateError> {
        self.as_slice().axes()
    }
}
