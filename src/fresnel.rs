//! Fresnel equations for polarization-dependent reflection and transmission.
//!
//! This module computes the amplitude coefficients that relate incident,
//! reflected and transmitted fields at a planar interface. The coefficients
//! are returned as diagonal Jones matrices so they can be chained with any
//! other element by plain matrix multiplication.
//!
//! The Fresnel calculations provide:
//! - Reflection and transmission amplitude matrices `diag(p, s)`
//! - Complex refractive index support for absorbing media
//! - Total internal reflection through the principal complex square root
//! - Power reflectance and transmittance for energy bookkeeping
//!
//! # Basis
//!
//! Jones vectors at the interface are ordered (parallel, perpendicular) to
//! the plane of incidence, so the p coefficient is the first diagonal entry.

use crate::complex::Complex;
use crate::matrix::Matrix2x2;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snell;

    const AIR: Complex = Complex::new(1.0, 0.0);
    const GLASS: Complex = Complex::new(1.5, 0.0);

    #[test]
    fn normal_incidence_reflectance() {
        let (rp, rs) = reflectance(AIR, GLASS, 1.0);
        assert!((rp - 0.04).abs() < 1e-12);
        assert!((rs - 0.04).abs() < 1e-12);
        let r = refl(AIR, GLASS, 1.0);
        assert!(r.a11.approx_eq(&Complex::new(-0.2, 0.0)));
    }

    #[test]
    fn brewster_angle_extinguishes_p() {
        let theta_b = snell::brewster_angle(1.0, 1.5);
        let (rp, rs) = reflectance(AIR, GLASS, theta_b.cos());
        assert!(rp < 1e-12);
        assert!(rs > 0.1);
    }

    #[test]
    fn energy_is_conserved() {
        for &theta in &[0.0f64, 0.3, 0.8, 1.2] {
            let cos_i = theta.cos();
            let (rp, rs) = reflectance(AIR, GLASS, cos_i);
            let (tp, ts) = transmittance(AIR, GLASS, cos_i);
            assert!((rp + tp - 1.0).abs() < 1e-12, "p at {}: {}", theta, rp + tp);
            assert!((rs + ts - 1.0).abs() < 1e-12, "s at {}: {}", theta, rs + ts);
        }
    }

    #[test]
    fn total_internal_reflection() {
        let cos_i = (std::f64::consts::PI / 3.0).cos();
        let cos_t = cos_theta_t(GLASS, AIR, cos_i);
        assert!(cos_t.is_imaginary());
        assert!(cos_t.imag > 0.0);
        let (rp, rs) = reflectance(GLASS, AIR, cos_i);
        assert!((rp - 1.0).abs() < 1e-12);
        assert!((rs - 1.0).abs() < 1e-12);
        let (tp, ts) = transmittance(GLASS, AIR, cos_i);
        assert!(tp.abs() < 1e-12 && ts.abs() < 1e-12);
    }

    #[test]
    fn matched_media_transmit_everything() {
        let t = refr(GLASS, GLASS, 0.6);
        assert!(t.approx_eq(&Matrix2x2::IDENTITY));
        assert!(refl(GLASS, GLASS, 0.6).is_zero());
    }

    #[test]
    fn absorbing_medium_is_finite() {
        let metal = Complex::new(0.2, 3.0);
        let r = refl(AIR, metal, 0.5);
        assert!(r.a00.is_finite() && r.a11.is_finite());
        let (rp, rs) = reflectance(AIR, metal, 0.5);
        assert!(rp > 0.0 && rp <= 1.0);
        assert!(rs > 0.0 && rs <= 1.0);
    }
}

/// Cosine of the transmitted angle, `sqrt(1 - (n1/n2)²·sin²θi)`.
///
/// **Context**: Beyond the critical angle, or for absorbing media, the
/// transmitted angle is complex. Working with its cosine avoids complex
/// trigonometry entirely.
///
/// **How it Works**: Uses the principal branch of [`Complex::sqrt`], so past
/// the critical angle the result is positive imaginary and the transmitted
/// wave is evanescent.
pub fn cos_theta_t(n1: Complex, n2: Complex, cos_i: f64) -> Complex {
    let sin_i_sq = 1.0 - cos_i * cos_i;
    let ratio = n1 / n2;
    (Complex::ONE - (ratio * ratio).scale(sin_i_sq)).sqrt()
}

/// Reflection amplitude matrix `diag(rp, rs)`.
///
/// # Example
/// ```rust
/// use polarcore::{complex::Complex, fresnel};
/// let r = fresnel::refl(Complex::ONE, Complex::new(1.5, 0.0), 1.0);
/// assert!((r.a11.real + 0.2).abs() < 1e-12);
/// ```
pub fn refl(n1: Complex, n2: Complex, cos_i: f64) -> Matrix2x2 {
    let cti = Complex::from(cos_i);
    let ctt = cos_theta_t(n1, n2, cos_i);
    let rp = (n2 * cti - n1 * ctt) / (n2 * cti + n1 * ctt);
    let rs = (n1 * cti - n2 * ctt) / (n1 * cti + n2 * ctt);
    Matrix2x2::diagonal(rp, rs)
}

/// Transmission amplitude matrix `diag(tp, ts)`.
pub fn refr(n1: Complex, n2: Complex, cos_i: f64) -> Matrix2x2 {
    let cti = Complex::from(cos_i);
    let ctt = cos_theta_t(n1, n2, cos_i);
    let numerator = (n1 * cti).scale(2.0);
    let tp = numerator / (n2 * cti + n1 * ctt);
    let ts = numerator / (n1 * cti + n2 * ctt);
    Matrix2x2::diagonal(tp, ts)
}

/// Power reflectance `(Rp, Rs) = (|rp|², |rs|²)`.
pub fn reflectance(n1: Complex, n2: Complex, cos_i: f64) -> (f64, f64) {
    let r = refl(n1, n2, cos_i);
    (r.a00.magnitude_squared(), r.a11.magnitude_squared())
}

/// Power transmittance `(Tp, Ts)`, scaled by the ratio of normal energy fluxes.
///
/// Zero past the critical angle, where `cos θt` is purely imaginary.
pub fn transmittance(n1: Complex, n2: Complex, cos_i: f64) -> (f64, f64) {
    let t = refr(n1, n2, cos_i);
    let incident_flux = (n1 * Complex::from(cos_i)).real;
    let transmitted_flux = (n2 * cos_theta_t(n1, n2, cos_i)).real;
    let factor = (Complex::from(transmitted_flux) / Complex::from(incident_flux)).real;
    (
        factor * t.a00.magnitude_squared(),
        factor * t.a11.magnitude_squared(),
    )
}
