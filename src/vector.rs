//! Real 3D vectors for ray and polarization-basis geometry.
//!
//! [`Vector3`] carries propagation directions, surface normals and the
//! perpendicular/parallel field basis vectors that accompany a Jones vector.
//! Degenerate input never panics: normalizing a zero vector gives
//! [`Vector3::ZERO`], the angle to a zero vector is `0`, and refraction
//! past the critical angle returns `None`.
//!
//! Basis construction and axis rotations are free functions rather than
//! methods, since they relate several vectors instead of belonging to one.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config;


/// A real 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);
    pub const NEG_X: Vector3 = Vector3::new(-1.0, 0.0, 0.0);
    pub const NEG_Y: Vector3 = Vector3::new(0.0, -1.0, 0.0);
    pub const NEG_Z: Vector3 = Vector3::new(0.0, 0.0, -1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Parses an `[x, y, z]` slice, rejecting any other length.
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(anyhow::anyhow!(
                "expected 3 values for a vector, got {}",
                values.len()
            )),
        }
    }

    /// Unit vector at polar angle `theta` from +z and azimuth `phi`.
    pub fn from_spherical(theta: f64, phi: f64) -> Self {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Self::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector in the same direction, or [`Vector3::ZERO`] for a zero-length input.
    pub fn normalize(&self) -> Self {
        self.normalize_or(Self::ZERO)
    }

    /// Unit vector in the same direction, or `fallback` for a zero-length input.
    pub fn normalize_or(&self, fallback: Vector3) -> Self {
        let length = self.length();
        if length < config::EPSILON {
            return fallback;
        }
        self.scale(1.0 / length)
    }

    /// Mirror about a plane with unit normal `normal`: `v - 2(v·n)n`.
    pub fn reflect(&self, normal: &Vector3) -> Self {
        *self - normal.scale(2.0 * self.dot(normal))
    }

    /// Refracts this direction through a surface with unit `normal`.
    ///
    /// **Context**: Ray tracing across an interface needs the transmitted
    /// direction from Snell's law. Past the critical angle there is no
    /// transmitted ray, and callers must handle that case explicitly.
    ///
    /// **How it Works**: `eta` is `n_incident / n_transmitted`. With
    /// `cos_i = -d·n` for the normalized direction `d`, the squared sine of
    /// the transmitted angle is `eta²(1 - cos_i²)`. If it exceeds one the ray
    /// is totally internally reflected and `None` is returned; otherwise the
    /// transmitted direction is `eta·d + (eta·cos_i - cos_t)·n`, normalized.
    ///
    /// Either side of the surface works: a ray travelling along the normal
    /// is refracted against the flipped normal, so the transmitted ray always
    /// continues forward (`t·d >= 0`).
    pub fn refract(&self, normal: &Vector3, eta: f64) -> Option<Self> {
        let d = self.normalize();
        let mut normal = *normal;
        let mut cos_i = -d.dot(&normal);
        if cos_i < 0.0 {
            normal = -normal;
            cos_i = -cos_i;
        }
        let sin_t_sq = eta * eta * (1.0 - cos_i * cos_i);
        if sin_t_sq > 1.0 {
            return None;
        }
        let cos_t = (1.0 - sin_t_sq).sqrt();
        Some((d.scale(eta) + normal.scale(eta * cos_i - cos_t)).normalize())
    }

    /// Component of `self` along `target`; zero when `target` is zero.
    pub fn project_onto(&self, target: &Vector3) -> Self {
        let length_sq = target.length_squared();
        if length_sq < config::EPSILON {
            return Self::ZERO;
        }
        target.scale(self.dot(target) / length_sq)
    }

    /// Component of `self` orthogonal to `target`.
    pub fn perpendicular(&self, target: &Vector3) -> Self {
        *self - self.project_onto(target)
    }

    /// Unsigned angle in `[0, π]`, or `0` if either vector is zero.
    pub fn angle_to(&self, other: &Vector3) -> f64 {
        let denom = self.length() * other.length();
        if denom < config::EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    pub fn is_parallel(&self, other: &Vector3) -> bool {
        self.is_parallel_within(other, config::EPSILON)
    }

    /// `|a×b| <= tol·|a||b|`. The zero vector is parallel to everything.
    pub fn is_parallel_within(&self, other: &Vector3, tol: f64) -> bool {
        self.cross(other).length() <= tol * self.length() * other.length()
    }

    pub fn is_perpendicular(&self, other: &Vector3) -> bool {
        self.is_perpendicular_within(other, config::EPSILON)
    }

    /// `|a·b| <= tol·|a||b|`. The zero vector is perpendicular to everything.
    pub fn is_perpendicular_within(&self, other: &Vector3, tol: f64) -> bool {
        self.dot(other).abs() <= tol * self.length() * other.length()
    }

    pub fn approx_eq(&self, other: &Vector3) -> bool {
        self.approx_eq_within(other, config::EPSILON)
    }

    pub fn approx_eq_within(&self, other: &Vector3, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }

    pub fn is_zero(&self) -> bool {
        self.is_zero_within(config::EPSILON)
    }

    pub fn is_zero_within(&self, tol: f64) -> bool {
        self.approx_eq_within(&Self::ZERO, tol)
    }

    pub fn is_normalized(&self) -> bool {
        self.is_normalized_within(config::EPSILON)
    }

    pub fn is_normalized_within(&self, tol: f64) -> bool {
        (self.length() - 1.0).abs() <= tol
    }

    pub fn lerp(&self, other: &Vector3, t: f64) -> Self {
        *self + (*other - *self).scale(t)
    }

    /// Spherical interpolation between two directions on the unit sphere.
    ///
    /// `t = 0` and `t = 1` return the endpoints exactly. When the inputs are
    /// (anti)parallel, `sin(angle)` vanishes and the result falls back to
    /// [`Vector3::lerp`].
    pub fn slerp(&self, other: &Vector3, t: f64) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }
        let angle = self.angle_to(other);
        let sin_angle = angle.sin();
        if sin_angle.abs() < config::SQRT_EPSILON {
            return self.lerp(other, t);
        }
        let w0 = ((1.0 - t) * angle).sin() / sin_angle;
        let w1 = (t * angle).sin() / sin_angle;
        self.scale(w0) + other.scale(w1)
    }

    pub fn to_string_with_precision(&self, precision: usize) -> String {
        format!(
            "({:.*}, {:.*}, {:.*})",
            precision, self.x, precision, self.y, precision, self.z
        )
    }
}

/// Builds unit tangents `(t1, t2)` with `normal × t1 = t2`.
///
/// Both tangents are perpendicular to `normal` and to each other. The helper
/// axis used to seed `t1` is whichever of x or y is further from `normal`, so
/// the cross product never degenerates. A zero `normal` yields `(X, Y)`.
pub fn build_orthonormal_basis(normal: &Vector3) -> (Vector3, Vector3) {
    let n = normal.normalize();
    if n.is_zero() {
        return (Vector3::X, Vector3::Y);
    }
    let helper = if n.x.abs() < 0.9 {
        Vector3::X
    } else {
        Vector3::Y
    };
    let t1 = helper.cross(&n).normalize();
    let t2 = n.cross(&t1);
    (t1, t2)
}

/// Rotates `v` by `angle` radians about `axis` (Rodrigues' formula).
///
/// A zero `axis` leaves `v` unchanged.
pub fn rotate_around_axis(v: &Vector3, axis: &Vector3, angle: f64) -> Vector3 {
    let k = axis.normalize();
    if k.is_zero() {
        return *v;
    }
    let (sin_a, cos_a) = angle.sin_cos();
    v.scale(cos_a) + k.cross(v).scale(sin_a) + k.scale(k.dot(v) * (1.0 - cos_a))
}

/// Angle from `v1` to `v2` in the plane perpendicular to `axis`, in `(-π, π]`.
///
/// Positive when the rotation from `v1` to `v2` is counter-clockwise looking
/// down `axis` (right-hand rule).
pub fn signed_angle(v1: &Vector3, v2: &Vector3, axis: &Vector3) -> f64 {
    let k = axis.normalize();
    let p1 = v1.perpendicular(&k);
    let p2 = v2.perpendicular(&k);
    k.dot(&p1.cross(&p2)).atan2(p1.dot(&p2))
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(config::DEFAULT_PRECISION);
        write!(f, "{}", self.to_string_with_precision(precision))
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(values: [f64; 3]) -> Self {
        Self::from_array(values)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}
