//! Jones vectors and Stokes parameters for fully polarized light.
//!
//! A [`JonesVector`] holds the complex field amplitudes `(ex, ey)` of a
//! monochromatic plane wave. Optical elements act on it through
//! [`Matrix2x2`], and [`JonesVector::stokes`] reduces it to the measurable
//! intensities used for rendering.
//!
//! Handedness follows `S3 = 2·Im(conj(ex)·ey)`: `(1, i)/√2` is right
//! circular with `S3 = +1`, `(1, -i)/√2` is left circular with `S3 = -1`.

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::config;
use crate::matrix::Matrix2x2;

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn unit_states_have_unit_intensity() {
        for state in [
            JonesVector::horizontal(),
            JonesVector::vertical(),
            JonesVector::linear(0.3),
            JonesVector::right_circular(),
            JonesVector::left_circular(),
        ] {
            assert!((state.intensity() - 1.0).abs() < config::EPSILON);
        }
    }

    #[test]
    fn stokes_of_basis_states() {
        let s = JonesVector::horizontal().stokes();
        assert_eq!(s, [1.0, 1.0, 0.0, 0.0]);
        let s = JonesVector::linear(FRAC_PI_4).stokes();
        assert!((s[2] - 1.0).abs() < 1e-12 && s[1].abs() < 1e-12);
        let s = JonesVector::right_circular().stokes();
        assert!((s[3] - 1.0).abs() < 1e-12);
        let s = JonesVector::left_circular().stokes();
        assert!((s[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn orientation_and_ellipticity() {
        let v = JonesVector::linear(0.4);
        assert!((v.orientation() - 0.4).abs() < 1e-12);
        assert!(v.ellipticity().abs() < 1e-12);
        assert!((JonesVector::right_circular().ellipticity() - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn polarizer_blocks_orthogonal_state() {
        let out = JonesVector::horizontal().transform(&Matrix2x2::linear_polarizer(PI / 2.0));
        assert!(out.intensity() < config::EPSILON);
    }

    #[test]
    fn quarter_wave_plate_makes_circular() {
        let qwp = Matrix2x2::quarter_wave_plate(FRAC_PI_4);
        let out = qwp * JonesVector::horizontal();
        let s = out.stokes();
        assert!((s[0] - 1.0).abs() < 1e-12);
        assert!((s[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_keeps_zero() {
        assert_eq!(JonesVector::ZERO.normalize(), JonesVector::ZERO);
        let v = JonesVector::new(Complex::new(3.0, 0.0), Complex::new(0.0, 4.0)).normalize();
        assert!((v.intensity() - 1.0).abs() < config::EPSILON);
    }

    #[test]
    fn global_phase_is_invisible_to_stokes() {
        let v = JonesVector::linear(0.9);
        let w = JonesVector::new(v.ex * Complex::cis(1.3), v.ey * Complex::cis(1.3));
        let (a, b) = (v.stokes(), w.stokes());
        for k in 0..4 {
            assert!((a[k] - b[k]).abs() < 1e-12);
        }
    }
}

/// Field amplitudes `(ex, ey)` of a polarized plane wave.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JonesVector {
    pub ex: Complex,
    pub ey: Complex,
}

impl JonesVector {
    pub const ZERO: JonesVector = JonesVector::new(Complex::ZERO, Complex::ZERO);

    pub const fn new(ex: Complex, ey: Complex) -> Self {
        Self { ex, ey }
    }

    pub fn horizontal() -> Self {
        Self::new(Complex::ONE, Complex::ZERO)
    }

    pub fn vertical() -> Self {
        Self::new(Complex::ZERO, Complex::ONE)
    }

    /// Linear polarization at `theta` radians from the x axis.
    pub fn linear(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(c.into(), s.into())
    }

    /// `(1, i)/√2`.
    pub fn right_circular() -> Self {
        let k = std::f64::consts::FRAC_1_SQRT_2;
        Self::new(Complex::new(k, 0.0), Complex::new(0.0, k))
    }

    /// `(1, -i)/√2`.
    pub fn left_circular() -> Self {
        let k = std::f64::consts::FRAC_1_SQRT_2;
        Self::new(Complex::new(k, 0.0), Complex::new(0.0, -k))
    }

    pub fn from_array(values: [Complex; 2]) -> Self {
        Self::new(values[0], values[1])
    }

    pub fn to_array(&self) -> [Complex; 2] {
        [self.ex, self.ey]
    }

    /// `|ex|² + |ey|²`.
    pub fn intensity(&self) -> f64 {
        self.ex.magnitude_squared() + self.ey.magnitude_squared()
    }

    /// Scales to unit intensity; a zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let norm = self.intensity().sqrt();
        if norm < config::EPSILON {
            return Self::ZERO;
        }
        Self::new(self.ex.scale(1.0 / norm), self.ey.scale(1.0 / norm))
    }

    /// Applies an optical element: `m·(ex, ey)`.
    pub fn transform(&self, m: &Matrix2x2) -> Self {
        let (ex, ey) = m.apply(self.ex, self.ey);
        Self::new(ex, ey)
    }

    /// Stokes parameters `[S0, S1, S2, S3]`.
    pub fn stokes(&self) -> [f64; 4] {
        let ix = self.ex.magnitude_squared();
        let iy = self.ey.magnitude_squared();
        let cross = self.ex.conjugate() * self.ey;
        [ix + iy, ix - iy, 2.0 * cross.real, 2.0 * cross.imag]
    }

    /// Azimuth of the polarization ellipse, `½·atan2(S2, S1)`.
    pub fn orientation(&self) -> f64 {
        let [_, s1, s2, _] = self.stokes();
        0.5 * s2.atan2(s1)
    }

    /// Ellipticity angle `½·asin(S3/S0)`, in `[-π/4, π/4]`. Zero for a zero vector.
    pub fn ellipticity(&self) -> f64 {
        let [s0, _, _, s3] = self.stokes();
        if s0 < config::EPSILON {
            return 0.0;
        }
        0.5 * (s3 / s0).clamp(-1.0, 1.0).asin()
    }

    pub fn approx_eq(&self, other: &JonesVector) -> bool {
        self.approx_eq_within(other, config::EPSILON)
    }

    pub fn approx_eq_within(&self, other: &JonesVector, tol: f64) -> bool {
        self.ex.approx_eq_within(&other.ex, tol) && self.ey.approx_eq_within(&other.ey, tol)
    }
}

impl Mul<JonesVector> for Matrix2x2 {
    type Output = JonesVector;

    fn mul(self, v: JonesVector) -> JonesVector {
        v.transform(&self)
    }
}

impl fmt::Display for JonesVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(config::DEFAULT_PRECISION);
        write!(
            f,
            "({}, {})",
            self.ex.to_string_with_precision(precision),
            self.ey.to_string_with_precision(precision)
        )
    }
}
