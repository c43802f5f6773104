//! 2×2 complex matrices for Jones calculus.
//!
//! A [`Matrix2x2`] maps one Jones vector onto another. Matrices compose by
//! ordinary matrix multiplication, so an optical train is the product of its
//! elements taken in reverse order of incidence.
//!
//! The module provides:
//! - general algebra (sum, product, scaling, matrix-vector product)
//! - derived quantities (trace, determinant, Frobenius norm)
//! - transpose, conjugate, adjoint and inverse
//! - tolerance-based structure tests (Hermitian, unitary, positive semi-definite)
//! - Jones factories for linear polarizers, wave plates and rotators
//!
//! # Singular matrices
//!
//! [`Matrix2x2::inverse`] returns `None` when the determinant magnitude is at
//! or below [`config::SINGULAR_THRESHOLD`]. A missing inverse is an expected
//! outcome (every polarizer is singular) and callers branch on it.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use nalgebra::Matrix2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::config;


/// A 2×2 complex matrix stored row-major: `a00 a01` is row 0, `a10 a11` is row 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix2x2 {
    pub a00: Complex,
    pub a01: Complex,
    pub a10: Complex,
    pub a11: Complex,
}

impl Matrix2x2 {
    pub const ZERO: Matrix2x2 = Matrix2x2::new(
        Complex::ZERO,
        Complex::ZERO,
        Complex::ZERO,
        Complex::ZERO,
    );
    pub const IDENTITY: Matrix2x2 =
        Matrix2x2::new(Complex::ONE, Complex::ZERO, Complex::ZERO, Complex::ONE);

    pub const fn new(a00: Complex, a01: Complex, a10: Complex, a11: Complex) -> Self {
        Self { a00, a01, a10, a11 }
    }

    /// Builds a matrix with zero imaginary parts.
    pub fn from_real(a00: f64, a01: f64, a10: f64, a11: f64) -> Self {
        Self::new(a00.into(), a01.into(), a10.into(), a11.into())
    }

    pub fn diagonal(d0: Complex, d1: Complex) -> Self {
        Self::new(d0, Complex::ZERO, Complex::ZERO, d1)
    }

    /// `k·I`.
    pub fn scaled_identity(k: Complex) -> Self {
        Self::diagonal(k, k)
    }

    /// Builds `[[a00, a01], [conj(a01), a11]]`, Hermitian by construction.
    pub fn hermitian(a00: f64, a01: Complex, a11: f64) -> Self {
        Self::new(a00.into(), a01, a01.conjugate(), a11.into())
    }

    pub fn from_array(rows: [[Complex; 2]; 2]) -> Self {
        Self::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1])
    }

    pub fn to_array(&self) -> [[Complex; 2]; 2] {
        [[self.a00, self.a01], [self.a10, self.a11]]
    }

    /// Returns the element at row `i`, column `j`, or `None` outside the 2×2 range.
    pub fn get(&self, i: usize, j: usize) -> Option<Complex> {
        match (i, j) {
            (0, 0) => Some(self.a00),
            (0, 1) => Some(self.a01),
            (1, 0) => Some(self.a10),
            (1, 1) => Some(self.a11),
            _ => None,
        }
    }

    fn map(&self, f: impl Fn(Complex) -> Complex) -> Self {
        Self::new(f(self.a00), f(self.a01), f(self.a10), f(self.a11))
    }

    pub fn scale(&self, k: f64) -> Self {
        self.map(|z| z.scale(k))
    }

    pub fn scale_complex(&self, k: Complex) -> Self {
        self.map(|z| z * k)
    }

    /// Matrix-vector product `self·(v0, v1)`.
    pub fn apply(&self, v0: Complex, v1: Complex) -> (Complex, Complex) {
        (
            self.a00 * v0 + self.a01 * v1,
            self.a10 * v0 + self.a11 * v1,
        )
    }

    pub fn trace(&self) -> Complex {
        self.a00 + self.a11
    }

    pub fn determinant(&self) -> Complex {
        self.a00 * self.a11 - self.a01 * self.a10
    }

    /// `√(Σ|aij|²)`.
    pub fn frobenius_norm(&self) -> f64 {
        (self.a00.magnitude_squared()
            + self.a01.magnitude_squared()
            + self.a10.magnitude_squared()
            + self.a11.magnitude_squared())
        .sqrt()
    }

    pub fn transpose(&self) -> Self {
        Self::new(self.a00, self.a10, self.a01, self.a11)
    }

    /// Element-wise complex conjugate.
    pub fn conjugate(&self) -> Self {
        self.map(|z| z.conjugate())
    }

    /// Conjugate transpose `A†`.
    pub fn adjoint(&self) -> Self {
        self.transpose().conjugate()
    }

    /// Returns `(1/det)·[[a11, -a01], [-a10, a00]]`, or `None` if the
    /// determinant magnitude is at or below [`config::SINGULAR_THRESHOLD`].
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.magnitude() <= config::SINGULAR_THRESHOLD {
            return None;
        }
        // 1/det computed directly; `Complex` division would zero small determinants
        let m2 = det.magnitude_squared();
        let inv_det = Complex::new(det.real / m2, -det.imag / m2);
        Some(Self::new(self.a11, -self.a01, -self.a10, self.a00).scale_complex(inv_det))
    }

    pub fn is_hermitian(&self) -> bool {
        self.is_hermitian_within(config::EPSILON)
    }

    /// Real diagonal and `a01 = conj(a10)`, within `tol`.
    pub fn is_hermitian_within(&self, tol: f64) -> bool {
        self.a00.is_real_within(tol)
            && self.a11.is_real_within(tol)
            && self.a01.approx_eq_within(&self.a10.conjugate(), tol)
    }

    pub fn is_unitary(&self) -> bool {
        self.is_unitary_within(config::EPSILON)
    }

    /// `A·A† ≈ I` within `tol`.
    pub fn is_unitary_within(&self, tol: f64) -> bool {
        (*self * self.adjoint()).approx_eq_within(&Self::IDENTITY, tol)
    }

    pub fn is_positive_semi_definite(&self) -> bool {
        self.is_positive_semi_definite_within(config::EPSILON)
    }

    /// Hermitian with non-negative trace and determinant. For a 2×2 Hermitian
    /// matrix this is equivalent to both eigenvalues being non-negative.
    pub fn is_positive_semi_definite_within(&self, tol: f64) -> bool {
        if !self.is_hermitian_within(tol) {
            return false;
        }
        self.trace().real >= -tol && self.determinant().real >= -tol
    }

    pub fn is_zero(&self) -> bool {
        self.is_zero_within(config::EPSILON)
    }

    pub fn is_zero_within(&self, tol: f64) -> bool {
        self.to_array().iter().flatten().all(|z| z.is_zero_within(tol))
    }

    pub fn approx_eq(&self, other: &Matrix2x2) -> bool {
        self.approx_eq_within(other, config::EPSILON)
    }

    pub fn approx_eq_within(&self, other: &Matrix2x2, tol: f64) -> bool {
        self.a00.approx_eq_within(&other.a00, tol)
            && self.a01.approx_eq_within(&other.a01, tol)
            && self.a10.approx_eq_within(&other.a10, tol)
            && self.a11.approx_eq_within(&other.a11, tol)
    }

    /// Ideal linear polarizer with transmission axis at `theta` radians from x.
    ///
    /// **Context**: A polarizer projects the field onto its transmission axis.
    /// As a projector it must be Hermitian and idempotent (`P² = P`), which the
    /// outer-product form guarantees without any trigonometric identities.
    ///
    /// **How it Works**: With `u = (cos θ, sin θ)` the matrix is `u·uᵗ`.
    pub fn linear_polarizer(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_real(c * c, c * s, c * s, s * s)
    }

    /// Linear retarder with retardance `delta` and fast axis at `fast_axis` radians.
    ///
    /// **Context**: Wave plates delay the slow-axis component relative to the
    /// fast-axis one. In the plate's own eigenbasis that is the diagonal
    /// phase matrix `diag(1, e^{iδ})`.
    ///
    /// **How it Works**: Rotates that eigenbasis onto the fast axis,
    /// `R(θ)·diag(1, e^{iδ})·R(-θ)`. Every factor is unitary, so the
    /// product is unitary for all `δ` and `θ`.
    pub fn wave_plate(delta: f64, fast_axis: f64) -> Self {
        let retarder = Self::diagonal(Complex::ONE, Complex::cis(delta));
        Self::rotator(fast_axis) * retarder * Self::rotator(-fast_axis)
    }

    /// Wave plate with retardance π/2.
    pub fn quarter_wave_plate(fast_axis: f64) -> Self {
        Self::wave_plate(std::f64::consts::FRAC_PI_2, fast_axis)
    }

    /// Wave plate with retardance π.
    pub fn half_wave_plate(fast_axis: f64) -> Self {
        Self::wave_plate(std::f64::consts::PI, fast_axis)
    }

    /// Real rotation `[[cos θ, -sin θ], [sin θ, cos θ]]`.
    pub fn rotator(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_real(c, -s, s, c)
    }

    pub fn to_string_with_precision(&self, precision: usize) -> String {
        let fmt = |z: Complex| z.to_string_with_precision(precision);
        format!(
            "[[{}, {}], [{}, {}]]",
            fmt(self.a00),
            fmt(self.a01),
            fmt(self.a10),
            fmt(self.a11)
        )
    }
}

impl fmt::Display for Matrix2x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(config::DEFAULT_PRECISION);
        write!(f, "{}", self.to_string_with_precision(precision))
    }
}

impl Add for Matrix2x2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.a00 + other.a00,
            self.a01 + other.a01,
            self.a10 + other.a10,
            self.a11 + other.a11,
        )
    }
}

impl Sub for Matrix2x2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.a00 - other.a00,
            self.a01 - other.a01,
            self.a10 - other.a10,
            self.a11 - other.a11,
        )
    }
}

impl Mul for Matrix2x2 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.a00 * other.a00 + self.a01 * other.a10,
            self.a00 * other.a01 + self.a01 * other.a11,
            self.a10 * other.a00 + self.a11 * other.a10,
            self.a10 * other.a01 + self.a11 * other.a11,
        )
    }
}

impl Mul<f64> for Matrix2x2 {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl Mul<Complex> for Matrix2x2 {
    type Output = Self;

    fn mul(self, k: Complex) -> Self {
        self.scale_complex(k)
    }
}

impl Neg for Matrix2x2 {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|z| -z)
    }
}

/// Panics when either index is above 1. Use [`Matrix2x2::get`] for a
/// non-panicking lookup.
impl Index<(usize, usize)> for Matrix2x2 {
    type Output = Complex;

    fn index(&self, (i, j): (usize, usize)) -> &Complex {
        match (i, j) {
            (0, 0) => &self.a00,
            (0, 1) => &self.a01,
            (1, 0) => &self.a10,
            (1, 1) => &self.a11,
            _ => panic!("index ({}, {}) out of range for a 2x2 matrix", i, j),
        }
    }
}

impl From<[[Complex; 2]; 2]> for Matrix2x2 {
    fn from(rows: [[Complex; 2]; 2]) -> Self {
        Self::from_array(rows)
    }
}

impl From<Matrix2x2> for Matrix2<Complex64> {
    fn from(m: Matrix2x2) -> Self {
        Matrix2::new(m.a00.into(), m.a01.into(), m.a10.into(), m.a11.into())
    }
}

impl From<Matrix2<Complex64>> for Matrix2x2 {
    fn from(m: Matrix2<Complex64>) -> Self {
        Self::new(
            m[(0, 0)].into(),
            m[(0, 1)].into(),
            m[(1, 0)].into(),
            m[(1, 1)].into(),
        )
    }
}
