//! Small geometric helpers shared by the path and the profile

use glam::DVec2;

/// Euclidean distance between two points
#[inline]
#[must_use]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// The z component of the cross product of two planar vectors
#[inline]
#[must_use]
pub fn cross(v1: DVec2, v2: DVec2) -> f64 {
    v1.x * v2.y - v2.x * v1.y
}

/// Check whether `x` lies in `[a, b]`, widened by `eps` on both sides
#[inline]
#[must_use]
pub fn in_range(x: f64, a: f64, b: f64, eps: f64) -> bool {
    a - eps <= x && x <= b + eps
}

/// Linearly map `value` from one range onto another
///
/// The input is clamped to `[from_min, from_max]` first, so the result always lies
/// between `to_min` and `to_max`.
///
/// # Examples
///
/// ```
/// use quintic_paths::math::map_range;
///
/// assert_eq!(map_range(0., -71., 71., 0., 900.), 450.);
/// assert_eq!(map_range(100., -71., 71., 0., 900.), 900.);
/// ```
#[must_use]
pub fn map_range(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let value = value.clamp(from_min, from_max);
    let proportion = (value - from_min) / (from_max - from_min);

    to_min + proportion * (to_max - to_min)
}

/// Convert a direction angle in degrees into a vector of the given length
#[inline]
#[must_use]
pub(crate) fn polar_deg(length: f64, angle_deg: f64) -> DVec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    DVec2::new(length * cos, length * sin)
}
