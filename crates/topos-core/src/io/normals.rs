//! Facet normals

use glam::DVec3;

/// Unit normal of a counter-clockwise triangle, +z when degenerate
pub fn triangle_normal(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> [f64; 3] {
    let (v0, v1, v2) = (DVec3::from(v0), DVec3::from(v1), DVec3::from(v2));
    (v1 - v0)
        .cross(v2 - v0)
        .try_normalize()
        .unwrap_or(DVec3::Z)
        .to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_clockwise_points_up() {
        let n = triangle_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clockwise_points_down() {
        let n = triangle_normal([0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_degenerate() {
        let n = triangle_normal([1.0, 1.0, 1.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
    }
}
