//! Complex scalar arithmetic for polarization optics.
//!
//! [`Complex`] is the element type of every Jones matrix and Jones vector in
//! the crate. It is a plain `Copy` value: every operation returns a new value
//! and nothing is ever mutated in place.
//!
//! The arithmetic is exact IEEE-754 arithmetic wherever the result is
//! mathematically defined. At the undefined points the type substitutes a
//! fixed sentinel instead of producing NaN or infinity, so long chains of
//! optical elements stay finite:
//!
//! - division by a (near) zero denominator returns [`Complex::ZERO`]
//! - the logarithm of (near) zero returns `(config::LOG_ZERO, 0)`
//! - `sqrt` and `powf` near the origin are guarded by [`config::SQRT_EPSILON`]
//! - `powc` of a zero base returns [`Complex::ZERO`] for every exponent
//!
//! All comparisons are tolerance based and default to [`config::EPSILON`].

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use anyhow::Result;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::scalar;


/// A complex number `real + imag·i`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const I: Complex = Complex::new(0.0, 1.0);

    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[inline]
    fn from_pair((real, imag): (f64, f64)) -> Self {
        Self { real, imag }
    }

    /// Builds `magnitude·(cos phase + i sin phase)`.
    pub fn from_polar(magnitude: f64, phase: f64) -> Self {
        Self::new(magnitude * phase.cos(), magnitude * phase.sin())
    }

    /// The unit phasor `e^{iθ} = cos θ + i sin θ`.
    pub fn cis(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    pub fn from_array(values: [f64; 2]) -> Self {
        Self::new(values[0], values[1])
    }

    /// Parses a `[re, im]` slice, rejecting any other length.
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [real, imag] => Ok(Self::new(*real, *imag)),
            _ => Err(anyhow::anyhow!(
                "expected 2 values for a complex number, got {}",
                values.len()
            )),
        }
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.real, self.imag]
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// `re² + im²`, for comparisons that do not need the square root.
    pub fn magnitude_squared(&self) -> f64 {
        scalar::complex_mag_sq(self.real, self.imag)
    }

    /// The argument `atan2(im, re)`, in `(-π, π]`.
    pub fn phase(&self) -> f64 {
        self.imag.atan2(self.real)
    }

    pub fn conjugate(&self) -> Self {
        Self::from_pair(scalar::complex_conj(self.real, self.imag))
    }

    pub fn scale(&self, k: f64) -> Self {
        Self::from_pair(scalar::complex_scale(self.real, self.imag, k))
    }

    /// The complex exponential `e^x (cos y + i sin y)`.
    pub fn exp(&self) -> Self {
        Self::from_pair(scalar::complex_exp(self.real, self.imag))
    }

    /// Principal square root `√|z|·e^{i·arg(z)/2}`.
    ///
    /// **Context**: Upstream Fresnel code takes the square root of
    /// `1 - sin²θt`, which turns negative past the critical angle. The
    /// principal branch (non-negative real part, halved phase) is what gives
    /// the evanescent solution its physical sign, so the branch must not
    /// change.
    ///
    /// **How it Works**: Magnitudes below [`config::SQRT_EPSILON`] return
    /// [`Complex::ZERO`]; otherwise the root is built from polar form.
    pub fn sqrt(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude < config::SQRT_EPSILON {
            return Self::ZERO;
        }
        Self::from_polar(magnitude.sqrt(), self.phase() / 2.0)
    }

    /// Principal natural logarithm `(ln|z|, arg z)`.
    ///
    /// Returns `(config::LOG_ZERO, 0)` for magnitudes below [`config::EPSILON`]
    /// so that chained computations stay finite.
    pub fn ln(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude < config::EPSILON {
            return Self::new(config::LOG_ZERO, 0.0);
        }
        Self::new(magnitude.ln(), self.phase())
    }

    /// Real power `|z|^n · e^{i·n·arg z}`.
    ///
    /// Near the origin the result is [`Complex::ZERO`] for `n > 0` and
    /// `(∞, 0)` otherwise.
    pub fn powf(&self, n: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude < config::SQRT_EPSILON {
            return if n > 0.0 {
                Self::ZERO
            } else {
                Self::new(f64::INFINITY, 0.0)
            };
        }
        Self::from_polar(magnitude.powf(n), n * self.phase())
    }

    /// Complex power `e^{exponent·ln(z)}`.
    ///
    /// A zero base yields [`Complex::ZERO`] for every exponent, including
    /// `0^0` and negative real exponents.
    pub fn powc(&self, exponent: Complex) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        (exponent * self.ln()).exp()
    }

    pub fn is_zero(&self) -> bool {
        self.is_zero_within(config::EPSILON)
    }

    pub fn is_zero_within(&self, tol: f64) -> bool {
        self.real.abs() <= tol && self.imag.abs() <= tol
    }

    pub fn approx_eq(&self, other: &Complex) -> bool {
        self.approx_eq_within(other, config::EPSILON)
    }

    pub fn approx_eq_within(&self, other: &Complex, tol: f64) -> bool {
        (self.real - other.real).abs() <= tol && (self.imag - other.imag).abs() <= tol
    }

    pub fn is_real(&self) -> bool {
        self.is_real_within(config::EPSILON)
    }

    pub fn is_real_within(&self, tol: f64) -> bool {
        self.imag.abs() <= tol
    }

    pub fn is_imaginary(&self) -> bool {
        self.is_imaginary_within(config::EPSILON)
    }

    pub fn is_imaginary_within(&self, tol: f64) -> bool {
        self.real.abs() <= tol
    }

    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    /// Finite with a non-negative magnitude. Kept as an assertion helper for
    /// call sites that document physical quantities; any finite value passes.
    pub fn is_valid_physical_quantity(&self) -> bool {
        self.is_finite() && self.magnitude() >= 0.0
    }

    /// Fixed-point formatting: `re`, `±im i`, or `re ± im i`.
    pub fn to_string_with_precision(&self, precision: usize) -> String {
        if self.is_real() {
            format!("{:.*}", precision, self.real)
        } else if self.is_imaginary() {
            format!("{:.*}i", precision, self.imag)
        } else {
            let sign = if self.imag < 0.0 { '-' } else { '+' };
            format!(
                "{:.*} {} {:.*}i",
                precision,
                self.real,
                sign,
                precision,
                self.imag.abs()
            )
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(config::DEFAULT_PRECISION);
        write!(f, "{}", self.to_string_with_precision(precision))
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_pair(scalar::complex_add(
            self.real, self.imag, other.real, other.imag,
        ))
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_pair(scalar::complex_sub(
            self.real, self.imag, other.real, other.imag,
        ))
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::from_pair(scalar::complex_mul(
            self.real, self.imag, other.real, other.imag,
        ))
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

/// Division with the zero-denominator sentinel of [`scalar::complex_div`].
impl Div for Complex {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Self::from_pair(scalar::complex_div(
            self.real, self.imag, other.real, other.imag,
        ))
    }
}

impl Div<f64> for Complex {
    type Output = Self;

    fn div(self, k: f64) -> Self {
        self / Complex::new(k, 0.0)
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.real, -self.imag)
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Self::new(real, 0.0)
    }
}

impl From<[f64; 2]> for Complex {
    fn from(values: [f64; 2]) -> Self {
        Self::from_array(values)
    }
}

impl From<Complex> for [f64; 2] {
    fn from(z: Complex) -> Self {
        z.to_array()
    }
}

impl From<Complex64> for Complex {
    fn from(z: Complex64) -> Self {
        Self::new(z.re, z.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(z: Complex) -> Self {
        Complex64::new(z.real, z.imag)
    }
}
