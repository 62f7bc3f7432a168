use nalgebra::Point3;

/// Below this squared norm a plane normal is treated as degenerate.
const DEGENERATE_NORMAL_EPSILON: f64 = 1e-12;

/// Computes the dihedral angle defined by four points, in radians.
///
/// The result follows the IUPAC sign convention and lies in `(-π, π]`. The angle
/// is undefined (`None`) when either of the two half-planes collapses, i.e. when
/// three consecutive points are collinear or coincide.
pub fn dihedral_angle(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> Option<f64> {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    if n1.norm_squared() < DEGENERATE_NORMAL_EPSILON || n2.norm_squared() < DEGENERATE_NORMAL_EPSILON
    {
        return None;
    }

    let y = b2.norm() * b1.dot(&n2);
    let x = n1.dot(&n2);
    let angle = y.atan2(x);

    // atan2 yields -π for a negative-zero y; fold it onto the closed end.
    if angle <= -std::f64::consts::PI {
        Some(std::f64::consts::PI)
    } else {
        Some(angle)
    }
}

/// Computes the dihedral angle defined by four points, in degrees.
pub fn dihedral_angle_degrees(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> Option<f64> {
    dihedral_angle(p1, p2, p3, p4).map(f64::to_degrees)
}

pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    nalgebra::distance(p1, p2)
}
