//! Allocation-free complex arithmetic on raw `(re, im)` pairs.
//!
//! These free functions are the arithmetic kernel behind [`crate::complex::Complex`].
//! Hot loops (per-pixel Jones chains, per-frame sweeps) can call them directly
//! and keep everything in registers without constructing value objects.

use crate::config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_of_i_by_i() {
        assert_eq!(complex_mul(0.0, 1.0, 0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn div_recovers_factor() {
        let (re, im) = complex_mul(1.5, -2.0, 0.25, 3.0);
        let (a, b) = complex_div(re, im, 0.25, 3.0);
        assert!((a - 1.5).abs() < 1e-12);
        assert!((b + 2.0).abs() < 1e-12);
    }

    #[test]
    fn div_by_zero_is_zero() {
        assert_eq!(complex_div(3.0, 4.0, 0.0, 0.0), (0.0, 0.0));
        assert_eq!(complex_div(3.0, 4.0, 1e-7, 0.0), (0.0, 0.0));
    }

    #[test]
    fn exp_of_zero_is_one() {
        assert_eq!(complex_exp(0.0, 0.0), (1.0, 0.0));
    }

    #[test]
    fn mag_sq() {
        assert_eq!(complex_mag_sq(3.0, 4.0), 25.0);
    }
}

/// Returns `(a + bi) + (c + di)`.
#[inline]
pub fn complex_add(a: f64, b: f64, c: f64, d: f64) -> (f64, f64) {
    (a + c, b + d)
}

/// Returns `(a + bi) - (c + di)`.
#[inline]
pub fn complex_sub(a: f64, b: f64, c: f64, d: f64) -> (f64, f64) {
    (a - c, b - d)
}

/// Returns `(a + bi)(c + di)` using the four-multiply form.
#[inline]
pub fn complex_mul(a: f64, b: f64, c: f64, d: f64) -> (f64, f64) {
    (a * c - b * d, a * d + b * c)
}

/// Returns `(a + bi) / (c + di)`.
///
/// When `c² + d²` is below [`config::EPSILON`] the quotient is `(0, 0)`
/// rather than NaN or infinity. In the optics setting a vanishing
/// denominator corresponds to zero transmission.
#[inline]
pub fn complex_div(a: f64, b: f64, c: f64, d: f64) -> (f64, f64) {
    let denom = complex_mag_sq(c, d);
    if denom < config::EPSILON {
        return (0.0, 0.0);
    }
    ((a * c + b * d) / denom, (b * c - a * d) / denom)
}

/// Returns `k(a + bi)` for real `k`.
#[inline]
pub fn complex_scale(a: f64, b: f64, k: f64) -> (f64, f64) {
    (a * k, b * k)
}

/// Returns the conjugate `a - bi`.
#[inline]
pub fn complex_conj(a: f64, b: f64) -> (f64, f64) {
    (a, -b)
}

/// Returns `a² + b²`.
#[inline]
pub fn complex_mag_sq(a: f64, b: f64) -> f64 {
    a * a + b * b
}

/// Returns `e^(a + bi) = e^a (cos b + i sin b)`.
#[inline]
pub fn complex_exp(a: f64, b: f64) -> (f64, f64) {
    let r = a.exp();
    (r * b.cos(), r * b.sin())
}
