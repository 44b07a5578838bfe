//! Geometry primitives shared by the topology operators.
//!
//! Faces in a DLFL mesh are arbitrary polygons, so normals and centroids are
//! computed from the full boundary rather than from a fixed triangle/quad.

use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Compute the centroid of a set of points.
///
/// Returns the origin for an empty slice.
pub fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as f64)
}

/// Planar-fit polygon normal using Newell's method.
///
/// Robust for non-convex and slightly non-planar boundaries; this is the
/// "accurate" normal mode. Returns `None` for degenerate boundaries
/// (fewer than three points, or zero area).
pub fn newell_normal(points: &[Point3<f64>]) -> Option<Unit<Vector3<f64>>> {
    if points.len() < 3 {
        return None;
    }
    let mut n = Vector3::zeros();
    for i in 0..points.len() {
        let p = &points[i];
        let q = &points[(i + 1) % points.len()];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    Unit::try_new(n, 1e-12)
}

/// Fast polygon normal from the first convex corner.
///
/// Uses the cross product at the first boundary corner with non-degenerate
/// edges. Cheaper than [`newell_normal`] but sensitive to the choice of
/// corner on non-planar faces.
pub fn corner_normal(points: &[Point3<f64>]) -> Option<Unit<Vector3<f64>>> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b - a).cross(&(c - b));
        if let Some(unit) = Unit::try_new(cross, 1e-12) {
            return Some(unit);
        }
    }
    None
}

/// Rotate `point` about the axis through `center` along `axis` by `angle`
/// radians.
pub fn rotate_about_axis(
    point: Point3<f64>,
    center: Point3<f64>,
    axis: Unit<Vector3<f64>>,
    angle: f64,
) -> Point3<f64> {
    if angle == 0.0 {
        return point;
    }
    let rot = Rotation3::from_axis_angle(&axis, angle);
    center + rot * (point - center)
}

/// Scale `point` toward/away from `center` by `factor`.
pub fn scale_about(point: Point3<f64>, center: Point3<f64>, factor: f64) -> Point3<f64> {
    center + (point - center) * factor
}

/// Linear interpolation between two points.
#[inline]
pub fn lerp(a: Point3<f64>, b: Point3<f64>, t: f64) -> Point3<f64> {
    Point3::from(a.coords * (1.0 - t) + b.coords * t)
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: Point3<f64>, b: Point3<f64>) -> Point3<f64> {
    lerp(a, b, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_centroid_of_square() {
        let c = centroid(&unit_square());
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
        assert_relative_eq!(c.z, 0.0);
    }

    #[test]
    fn test_newell_normal_ccw_square() {
        let n = newell_normal(&unit_square()).unwrap();
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_normal_matches_newell_on_planar_face() {
        let pts = unit_square();
        let a = newell_normal(&pts).unwrap();
        let b = corner_normal(&pts).unwrap();
        assert_relative_eq!(a.dot(&b), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_boundary_has_no_normal() {
        let line = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(newell_normal(&line).is_none());
    }

    #[test]
    fn test_rotate_about_axis_quarter_turn() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let rotated = rotate_about_axis(
            p,
            Point3::origin(),
            Vector3::z_axis(),
            std::f64::consts::FRAC_PI_2,
        );
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 4.0, 6.0);
        assert_relative_eq!(lerp(a, b, 0.0), a);
        assert_relative_eq!(lerp(a, b, 1.0), b);
        assert_relative_eq!(midpoint(a, b), Point3::new(1.0, 2.0, 3.0));
    }
}
