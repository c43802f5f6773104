/// General tolerance for zero tests and approximate equality.
pub const EPSILON: f64 = 1e-12;
/// Looser tolerance guarding `sqrt` and `powf` near the origin, where relative error is amplified.
pub const SQRT_EPSILON: f64 = 1e-6;
/// Real part returned by `Complex::ln` for a (near) zero argument, in place of negative infinity.
pub const LOG_ZERO: f64 = -1e10;
/// Determinant magnitude at or below which a matrix is treated as singular.
pub const SINGULAR_THRESHOLD: f64 = EPSILON;
/// Default number of decimal places used when formatting values.
pub const DEFAULT_PRECISION: usize = 4;
