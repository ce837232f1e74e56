//! Plain `[f64; 3]` vector helpers.
//!
//! Coordinates are stored as fixed arrays throughout the crate; these helpers
//! avoid pulling a linear-algebra crate in for a handful of dot and cross
//! products.

/// Relative tolerance for degeneracy checks.
pub const EPS: f64 = 1e-12;

#[inline]
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Right-hand-rule normal of the triangle `(a, b, c)` (not normalised).
#[inline]
pub fn triangle_normal(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> [f64; 3] {
    cross(sub(b, a), sub(c, a))
}

/// Signed volume of the tetrahedron `(a, b, c, d)`.
///
/// Positive when `d` lies on the side the right-hand normal of `(a, b, c)`
/// points towards.
pub fn signed_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ad = sub(d, a);
    dot(ab, cross(ac, ad)) / 6.0
}

/// Volume enclosed by a closed triangle surface (divergence theorem).
///
/// Positive for outward-wound surfaces, negative for inward-wound ones. Open
/// surfaces give an origin-dependent value.
pub fn enclosed_volume<I>(triangles: I) -> f64
where
    I: IntoIterator<Item = [[f64; 3]; 3]>,
{
    triangles
        .into_iter()
        .map(|[a, b, c]| dot(a, cross(b, c)))
        .sum::<f64>()
        / 6.0
}

/// Arithmetic mean of a set of points.
pub fn centroid(points: &[[f64; 3]]) -> [f64; 3] {
    if points.is_empty() {
        return [0.0; 3];
    }
    let mut sum = [0.0; 3];
    for p in points {
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
    }
    let n = points.len() as f64;
    [sum[0] / n, sum[1] / n, sum[2] / n]
}

#[cfg(test)]
mod tests {
    use super::*;

    const O: [f64; 3] = [0.0, 0.0, 0.0];
    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(cross(X, Y), Z);
        assert_eq!(triangle_normal(O, X, Y), Z);
    }

    #[test]
    fn unit_tet_volume() {
        assert!((signed_volume(O, X, Y, Z) - 1.0 / 6.0).abs() < 1e-15);
        assert!((signed_volume(O, Y, X, Z) + 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn enclosed_volume_of_outward_tet() {
        let faces = [[O, Y, X], [O, X, Z], [O, Z, Y], [X, Y, Z]];
        assert!((enclosed_volume(faces) - 1.0 / 6.0).abs() < 1e-15);
        let flipped = faces.map(|[a, b, c]| [a, c, b]);
        assert!((enclosed_volume(flipped) + 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn centroid_of_unit_tet() {
        assert_eq!(centroid(&[O, X, Y, Z]), [0.25, 0.25, 0.25]);
        assert_eq!(centroid(&[]), [0.0; 3]);
    }
}
