//! Planar joint angle computation.
//!
//! Angles are computed in image space from the x/y coordinates only; the
//! depth proxy carries no angular information and is ignored here.

use contracts::Landmark;
use nalgebra::{Point2, Vector2};

/// Round to a fixed number of decimals.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Angle at vertex `b` formed by rays `b -> a` and `b -> c`, in degrees.
///
/// Returns a value in [0, 180] rounded to 2 decimals. Degenerate input
/// (either ray has zero length) yields 0.0 rather than an error: a
/// collapsed joint is an expected detector artifact, not a fault.
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let vertex = Point2::new(b.x, b.y);
    let ba: Vector2<f64> = Point2::new(a.x, a.y) - vertex;
    let bc: Vector2<f64> = Point2::new(c.x, c.y) - vertex;

    let norm_product = ba.norm() * bc.norm();
    if norm_product == 0.0 {
        return 0.0;
    }

    // Clamp before acos: floating error can push |cos| slightly past 1.
    let cos_theta = (ba.dot(&bc) / norm_product).clamp(-1.0, 1.0);

    round_to(cos_theta.acos().to_degrees(), 2)
}
