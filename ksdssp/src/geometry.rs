//! Vector geometry helpers for backbone analysis.

use crate::types::Point3D;

/// Unit vector halfway between two unit vectors.
///
/// Degenerate (opposed) inputs collapse to the zero vector.
pub fn bisect(a: &Point3D, b: &Point3D) -> Point3D {
    a.add(b).scale(0.5).normalize()
}

/// Signed dihedral angle defined by four points, in degrees.
///
/// Follows the IUPAC convention: looking down the `p2`-`p3` axis, a
/// clockwise rotation from `p1` to `p4` is positive. Returns a value
/// in `(-180, 180]`.
pub fn dihedral_points(p1: &Point3D, p2: &Point3D, p3: &Point3D, p4: &Point3D) -> f64 {
    let b1 = p2.sub(p1);
    let b2 = p3.sub(p2);
    let b3 = p4.sub(p3);

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let m1 = n1.cross(&b2.normalize());

    let x = n1.dot(&n2);
    let y = m1.dot(&n2);
    (-y).atan2(x).to_degrees()
}
