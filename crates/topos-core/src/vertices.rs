//! Vertex arrays with coordinate-aware accessors
//!
//! A [`VertexArray`] stores N triples in one native coordinate system. Every
//! named axis (x, y, z, r, t) can be read or written regardless of that
//! system; conversions happen only when the native layout lacks the axis.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Add, AddAssign};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::coords::{Axis, AxisSelector, CoordinateSystem, convert, convert_all};
use crate::error::{TemplateError, VertexAdditionError, VertexCoordinateError, VertexDataError};
use crate::template::{FormatOptions, Template};

/// New values for a single axis
///
/// The two shapes are mutually exclusive: either one value per vertex, or a
/// function evaluated per vertex over the declared axes.
pub enum AxisUpdate<'a> {
    /// One value per vertex
    Values(&'a [f64]),
    /// `func` receives the current values of `params` (in that order) for a
    /// vertex and returns the new value
    Map {
        params: &'a [&'a str],
        func: Box<dyn Fn(&[f64]) -> f64 + 'a>,
    },
}

impl<'a> AxisUpdate<'a> {
    pub fn values(values: &'a [f64]) -> Self {
        AxisUpdate::Values(values)
    }

    pub fn map<F>(params: &'a [&'a str], func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + 'a,
    {
        AxisUpdate::Map {
            params,
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for AxisUpdate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisUpdate::Values(values) => f.debug_tuple("Values").field(values).finish(),
            AxisUpdate::Map { params, .. } => {
                f.debug_struct("Map").field("params", params).finish_non_exhaustive()
            }
        }
    }
}

/// N vertices stored in a native coordinate system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexArray {
    system: CoordinateSystem,
    data: Vec<[f64; 3]>,
}

/// Read `axis` from a triple stored in `system`
fn axis_value(system: CoordinateSystem, p: [f64; 3], axis: Axis) -> f64 {
    match system.column(axis) {
        Some(col) => p[col],
        None => {
            let home = axis.system();
            convert(p, system, home)[axis.home_column()]
        }
    }
}

impl VertexArray {
    pub fn new(system: CoordinateSystem, data: Vec<[f64; 3]>) -> Self {
        Self { system, data }
    }

    /// Vertices stored as (x, y, z)
    pub fn new_cartesian(data: Vec<[f64; 3]>) -> Self {
        Self::new(CoordinateSystem::Cartesian, data)
    }

    /// Vertices stored as (θ, z, r)
    pub fn new_cylindrical(data: Vec<[f64; 3]>) -> Self {
        Self::new(CoordinateSystem::Cylindrical, data)
    }

    /// Create an empty array
    pub fn empty(system: CoordinateSystem) -> Self {
        Self::new(system, Vec::new())
    }

    /// Create an array from rows whose length is only known at runtime
    pub fn from_rows<R: AsRef<[f64]>>(
        system: CoordinateSystem,
        rows: &[R],
    ) -> Result<Self, VertexDataError> {
        let data = rows
            .iter()
            .enumerate()
            .map(|(row, r)| match *r.as_ref() {
                [a, b, c] => Ok([a, b, c]),
                ref other => Err(VertexDataError::RowLength {
                    row,
                    len: other.len(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(system, data))
    }

    /// Create an array from a row-major flat buffer
    pub fn from_flat(system: CoordinateSystem, flat: &[f64]) -> Result<Self, VertexDataError> {
        if flat.len() % 3 != 0 {
            return Err(VertexDataError::FlatLength { len: flat.len() });
        }
        let data = flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Ok(Self::new(system, data))
    }

    /// Create an array in `system` from cartesian points
    pub fn from_cartesian_points(system: CoordinateSystem, points: &[[f64; 3]]) -> Self {
        Self::new(
            system,
            convert_all(points, CoordinateSystem::Cartesian, system),
        )
    }

    pub fn system(&self) -> CoordinateSystem {
        self.system
    }

    /// Raw buffer in the native layout
    pub fn data(&self) -> &[[f64; 3]] {
        &self.data
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vertices as (x, y, z), borrowed when already stored that way
    pub fn cartesian(&self) -> Cow<'_, [[f64; 3]]> {
        self.native_in(CoordinateSystem::Cartesian)
    }

    /// Vertices in the native layout of `system`
    pub(crate) fn native_in(&self, system: CoordinateSystem) -> Cow<'_, [[f64; 3]]> {
        if system == self.system {
            Cow::Borrowed(&self.data)
        } else {
            Cow::Owned(convert_all(&self.data, self.system, system))
        }
    }

    /// Re-express the array in another native system
    pub fn into_system(self, system: CoordinateSystem) -> VertexArray {
        if system == self.system {
            return self;
        }
        let data = convert_all(&self.data, self.system, system);
        Self::new(system, data)
    }

    /// Value of `axis` for every vertex
    pub fn get(&self, axis: Axis) -> Vec<f64> {
        self.data
            .iter()
            .map(|&p| axis_value(self.system, p, axis))
            .collect()
    }

    pub fn x(&self) -> Vec<f64> {
        self.get(Axis::X)
    }

    pub fn y(&self) -> Vec<f64> {
        self.get(Axis::Y)
    }

    pub fn z(&self) -> Vec<f64> {
        self.get(Axis::Z)
    }

    pub fn r(&self) -> Vec<f64> {
        self.get(Axis::R)
    }

    pub fn t(&self) -> Vec<f64> {
        self.get(Axis::T)
    }

    /// One row per vertex holding the requested axes in request order
    ///
    /// `select("xz")`, `select(&["x", "z"])` and `select(&[Axis::X, Axis::Z])`
    /// are equivalent.
    pub fn select<S>(&self, selector: &S) -> Result<Vec<Vec<f64>>, VertexCoordinateError>
    where
        S: AxisSelector + ?Sized,
    {
        let axes = selector.axes()?;
        Ok(self.rows_for(&axes))
    }

    fn rows_for(&self, axes: &[Axis]) -> Vec<Vec<f64>> {
        self.data
            .iter()
            .map(|&p| axes.iter().map(|&a| axis_value(self.system, p, a)).collect())
            .collect()
    }

    /// Overwrite one axis for every vertex
    ///
    /// Other axes of the axis's own system are preserved; e.g. setting `r` on
    /// a cartesian array keeps each vertex's angle and height.
    pub fn set(&mut self, axis: Axis, update: AxisUpdate<'_>) -> Result<(), VertexCoordinateError> {
        match update {
            AxisUpdate::Values(values) => self.set_values(axis, values),
            AxisUpdate::Map { params, func } => self.set_mapped(axis, params, &*func),
        }
    }

    fn set_mapped(
        &mut self,
        axis: Axis,
        params: &[&str],
        func: &dyn Fn(&[f64]) -> f64,
    ) -> Result<(), VertexCoordinateError> {
        let axes = parse_params(params)?;
        let values: Vec<f64> = self
            .rows_for(&axes)
            .iter()
            .map(|args| func(args.as_slice()))
            .collect();
        self.set_values(axis, &values)
    }

    /// Overwrite one axis from a function of other axes
    pub fn set_with<F>(
        &mut self,
        axis: Axis,
        params: &[&str],
        func: F,
    ) -> Result<(), VertexCoordinateError>
    where
        F: Fn(&[f64]) -> f64,
    {
        self.set_mapped(axis, params, &func)
    }

    /// Overwrite one axis with one value per vertex
    pub fn set_values(&mut self, axis: Axis, values: &[f64]) -> Result<(), VertexCoordinateError> {
        if values.len() != self.len() {
            return Err(VertexCoordinateError::LengthMismatch {
                expected: self.len(),
                found: values.len(),
            });
        }

        if let Some(col) = self.system.column(axis) {
            for (p, &v) in self.data.iter_mut().zip(values) {
                p[col] = v;
            }
            return Ok(());
        }

        let native = self.system;
        let home = axis.system();
        let col = axis.home_column();
        for (p, &v) in self.data.iter_mut().zip(values) {
            let mut q = convert(*p, native, home);
            q[col] = v;
            *p = convert(q, home, native);
        }
        Ok(())
    }

    /// A copy translated by a runtime-sized offset in the native layout
    pub fn translated(&self, offset: &[f64]) -> Result<VertexArray, VertexAdditionError> {
        let offset = as_triple(offset)?;
        Ok(self + offset)
    }

    /// Translate in place by a runtime-sized offset in the native layout
    pub fn translate(&mut self, offset: &[f64]) -> Result<(), VertexAdditionError> {
        let offset = as_triple(offset)?;
        *self += offset;
        Ok(())
    }

    /// Render every vertex (in cartesian coordinates) through a positional
    /// template
    pub fn format(&self, template: &str, options: &FormatOptions) -> Result<String, TemplateError> {
        let template = Template::parse(template)?;
        template.check_arity(3)?;
        let cartesian = self.cartesian();
        Ok(template.render_rows(cartesian.iter().map(|p| p.as_slice()), options))
    }
}

fn parse_params(params: &[&str]) -> Result<Vec<Axis>, VertexCoordinateError> {
    if params.is_empty() {
        return Err(VertexCoordinateError::EmptySelector);
    }
    let mut axes: Vec<Axis> = Vec::with_capacity(params.len());
    for name in params {
        let axis: Axis = name
            .parse()
            .map_err(|_| VertexCoordinateError::UnknownParameter(name.to_string()))?;
        if axes.contains(&axis) {
            return Err(VertexCoordinateError::DuplicateParameter(axis));
        }
        axes.push(axis);
    }
    Ok(axes)
}

fn as_triple(offset: &[f64]) -> Result<[f64; 3], VertexAdditionError> {
    match *offset {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(VertexAdditionError::IncompatibleShape {
            found: offset.len(),
        }),
    }
}

impl fmt::Display for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        let noun = if n == 1 { "vertex" } else { "vertices" };
        write!(f, "{} Array: {} {}", self.system, n, noun)
    }
}

/// Concatenate: the result keeps the left system, left vertices first
impl Add<&VertexArray> for &VertexArray {
    type Output = VertexArray;

    fn add(self, rhs: &VertexArray) -> VertexArray {
        let mut data = Vec::with_capacity(self.len() + rhs.len());
        data.extend_from_slice(&self.data);
        data.extend(rhs.native_in(self.system).iter());
        VertexArray::new(self.system, data)
    }
}

impl Add for VertexArray {
    type Output = VertexArray;

    fn add(mut self, rhs: VertexArray) -> VertexArray {
        let rhs = rhs.into_system(self.system);
        self.data.extend(rhs.data);
        self
    }
}

/// Broadcast translation in the native layout
impl Add<[f64; 3]> for &VertexArray {
    type Output = VertexArray;

    fn add(self, rhs: [f64; 3]) -> VertexArray {
        let data = self
            .data
            .iter()
            .map(|p| [p[0] + rhs[0], p[1] + rhs[1], p[2] + rhs[2]])
            .collect();
        VertexArray::new(self.system, data)
    }
}

impl Add<[f64; 3]> for VertexArray {
    type Output = VertexArray;

    fn add(mut self, rhs: [f64; 3]) -> VertexArray {
        self += rhs;
        self
    }
}

impl AddAssign<[f64; 3]> for VertexArray {
    fn add_assign(&mut self, rhs: [f64; 3]) {
        for p in &mut self.data {
            p[0] += rhs[0];
            p[1] += rhs[1];
            p[2] += rhs[2];
        }
    }
}

impl Add<DVec3> for &VertexArray {
    type Output = VertexArray;

    fn add(self, rhs: DVec3) -> VertexArray {
        self + rhs.to_array()
    }
}

impl AddAssign<DVec3> for VertexArray {
    fn add_assign(&mut self, rhs: DVec3) {
        *self += rhs.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample() -> VertexArray {
        VertexArray::new_cartesian(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
    }

    #[test]
    fn test_construct_from_rows() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let va = VertexArray::from_rows(CoordinateSystem::Cartesian, &rows).unwrap();
        assert_eq!(va, sample());

        let bad = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
        assert_eq!(
            VertexArray::from_rows(CoordinateSystem::Cartesian, &bad),
            Err(VertexDataError::RowLength { row: 1, len: 2 })
        );
    }

    #[test]
    fn test_construct_from_flat() {
        let va = VertexArray::from_flat(CoordinateSystem::Cartesian, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(va.len(), 1);
        assert_eq!(
            VertexArray::from_flat(CoordinateSystem::Cartesian, &[1.0, 2.0]),
            Err(VertexDataError::FlatLength { len: 2 })
        );
        let empty = VertexArray::from_flat(CoordinateSystem::Cylindrical, &[]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "Cartesian Array: 2 vertices");
        let one = VertexArray::new_cylindrical(vec![[0.0; 3]]);
        assert_eq!(one.to_string(), "Cylindrical Array: 1 vertex");
        assert_eq!(one.system().name(), "Cylindrical");
    }

    #[test]
    fn test_cartesian_is_borrowed_for_cartesian() {
        let va = sample();
        assert!(matches!(va.cartesian(), Cow::Borrowed(_)));
        assert_eq!(&*va.cartesian(), va.data());
    }

    #[test]
    fn test_cylindrical_getters() {
        let va = VertexArray::new_cylindrical(vec![[FRAC_PI_2, 5.0, 2.0]]);
        assert_relative_eq!(va.x()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(va.y()[0], 2.0, epsilon = 1e-12);
        assert_eq!(va.z(), vec![5.0]);
        assert_eq!(va.r(), vec![2.0]);
        assert_eq!(va.t(), vec![FRAC_PI_2]);
    }

    #[test]
    fn test_cartesian_polar_getters() {
        let va = VertexArray::new_cartesian(vec![[0.0, -3.0, 1.0]]);
        assert_relative_eq!(va.r()[0], 3.0);
        assert_relative_eq!(va.t()[0], -FRAC_PI_2);
    }

    #[test]
    fn test_set_x_values() {
        let mut va = VertexArray::new_cartesian(vec![[0.0, 2.0, 3.0], [0.0, 5.0, 6.0]]);
        va.set(Axis::X, AxisUpdate::values(&[1.0, 4.0])).unwrap();
        assert_eq!(va.data(), &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_set_wrong_length() {
        let mut va = sample();
        let err = va.set_values(Axis::Y, &[1.0]).unwrap_err();
        assert_eq!(
            err,
            VertexCoordinateError::LengthMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(va, sample());
    }

    #[test]
    fn test_set_with_function() {
        let mut va = sample();
        va.set_with(Axis::X, &["y", "z"], |args| args[0] + args[1])
            .unwrap();
        assert_eq!(va.x(), vec![5.0, 11.0]);
        assert_eq!(va.y(), vec![2.0, 5.0]);
    }

    #[test]
    fn test_set_with_uses_previous_values() {
        let mut va = sample();
        va.set(Axis::X, AxisUpdate::map(&["x"], |args| args[0] * 10.0))
            .unwrap();
        assert_eq!(va.x(), vec![10.0, 40.0]);
    }

    #[test]
    fn test_set_with_bad_params() {
        let mut va = sample();
        assert_eq!(
            va.set_with(Axis::X, &["w"], |a| a[0]),
            Err(VertexCoordinateError::UnknownParameter("w".into()))
        );
        assert_eq!(
            va.set_with(Axis::X, &["y", "y"], |a| a[0]),
            Err(VertexCoordinateError::DuplicateParameter(Axis::Y))
        );
        assert_eq!(
            va.set_with(Axis::X, &[], |_| 0.0),
            Err(VertexCoordinateError::EmptySelector)
        );
        assert_eq!(va, sample());
    }

    #[test]
    fn test_set_r_on_cartesian_keeps_angle() {
        let mut va = VertexArray::new_cartesian(vec![[1.0, 1.0, 7.0]]);
        va.set_values(Axis::R, &[2.0_f64.sqrt() * 2.0]).unwrap();
        let p = va.data()[0];
        assert_relative_eq!(p[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 2.0, epsilon = 1e-12);
        assert_eq!(p[2], 7.0);
    }

    #[test]
    fn test_set_x_on_cylindrical() {
        let mut va = VertexArray::new_cylindrical(vec![[FRAC_PI_2, 1.0, 1.0]]);
        va.set_values(Axis::X, &[-1.0]).unwrap();
        assert_relative_eq!(va.x()[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(va.y()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(va.t()[0], 3.0 * PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(va.r()[0], 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(va.z(), vec![1.0]);
    }

    #[test]
    fn test_set_z_on_cylindrical_is_native() {
        let mut va = VertexArray::new_cylindrical(vec![[0.5, 1.0, 2.0]]);
        va.set_values(Axis::Z, &[9.0]).unwrap();
        assert_eq!(va.data(), &[[0.5, 9.0, 2.0]]);
    }

    #[test]
    fn test_select() {
        let va = sample();
        let expected = vec![vec![1.0, 3.0], vec![4.0, 6.0]];
        assert_eq!(va.select("xz").unwrap(), expected);
        assert_eq!(va.select(&["x", "z"]).unwrap(), expected);
        assert_eq!(va.select(&[Axis::X, Axis::Z]).unwrap(), expected);
        assert_eq!(va.select("zx").unwrap(), vec![vec![3.0, 1.0], vec![6.0, 4.0]]);
        assert_eq!(
            va.select("xa"),
            Err(VertexCoordinateError::UnknownAxis("a".into()))
        );
    }

    #[test]
    fn test_add_arrays() {
        let a = VertexArray::new_cartesian(vec![[1.0, 0.0, 0.0]]);
        let b = VertexArray::new_cylindrical(vec![[0.0, 0.0, 1.0]]);
        let c = &a + &b;
        assert_eq!(c.system(), CoordinateSystem::Cartesian);
        assert_eq!(c.data(), &[[1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(a.clone() + b, c);
    }

    #[test]
    fn test_add_keeps_left_system() {
        let a = VertexArray::new_cylindrical(vec![[0.0, 2.0, 1.0]]);
        let b = VertexArray::new_cartesian(vec![[0.0, 3.0, 4.0]]);
        let c = &a + &b;
        assert_eq!(c.system(), CoordinateSystem::Cylindrical);
        assert_eq!(c.len(), 2);
        assert_eq!(c.data()[0], [0.0, 2.0, 1.0]);
        assert_relative_eq!(c.data()[1][0], FRAC_PI_2);
        assert_eq!(c.data()[1][1], 4.0);
        assert_relative_eq!(c.data()[1][2], 3.0);
    }

    #[test]
    fn test_add_triple() {
        let mut va = sample();
        let moved = &va + [1.0, 4.0, -2.0];
        va += [1.0, 4.0, -2.0];
        assert_eq!(moved.data(), &[[2.0, 6.0, 1.0], [5.0, 9.0, 4.0]]);
        assert_eq!(va, moved);
        assert_eq!(&sample() + DVec3::new(1.0, 4.0, -2.0), moved);
    }

    #[test]
    fn test_translate_bad_shape() {
        let mut va = sample();
        assert_eq!(
            va.translated(&[1.0, 2.0]),
            Err(VertexAdditionError::IncompatibleShape { found: 2 })
        );
        assert_eq!(
            va.translate(&[1.0, 2.0, 3.0, 4.0]),
            Err(VertexAdditionError::IncompatibleShape { found: 4 })
        );
        assert_eq!(va, sample());
        va.translate(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(va.data()[0], [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_format() {
        let va = sample();
        let s = va.format("v {} {} {}", &FormatOptions::with_suffix("\n")).unwrap();
        assert_eq!(s, "v 1 2 3\nv 4 5 6\n");

        let s = va.format("{1:.1} {2:.1} {0:.1}", &FormatOptions::default()).unwrap();
        assert_eq!(s, "2.0 3.0 1.0\n5.0 6.0 4.0");
    }

    #[test]
    fn test_into_system() {
        let va = VertexArray::new_cartesian(vec![[0.0, 2.0, 1.0]]);
        let cyl = va.clone().into_system(CoordinateSystem::Cylindrical);
        assert_relative_eq!(cyl.data()[0][0], FRAC_PI_2);
        assert_relative_eq!(cyl.data()[0][2], 2.0);
        assert_eq!(cyl.data()[0][1], 1.0);
    }
}
