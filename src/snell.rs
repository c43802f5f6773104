//! Snell's law for real refractive indices.
//!
//! Angles are measured from the surface normal, in radians. Past the
//! critical angle there is no transmitted ray and the functions return
//! `None`, matching [`crate::vector::Vector3::refract`].


/// Transmitted angle from `n1·sin θi = n2·sin θt`, or `None` on total internal reflection.
pub fn transmitted_angle(theta_i: f64, n1: f64, n2: f64) -> Option<f64> {
    if n1 == n2 {
        return Some(theta_i);
    }
    let sin_t = n1 / n2 * theta_i.sin();
    if sin_t.abs() > 1.0 {
        return None;
    }
    Some(sin_t.asin())
}

/// Critical angle `asin(n2/n1)`; `None` unless going into an optically thinner medium.
pub fn critical_angle(n1: f64, n2: f64) -> Option<f64> {
    if n1 <= n2 {
        return None;
    }
    Some((n2 / n1).asin())
}

/// Brewster's angle `atan(n2/n1)`, where p-polarized reflection vanishes.
pub fn brewster_angle(n1: f64, n2: f64) -> f64 {
    (n2 / n1).atan()
}
