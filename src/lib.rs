//! Complex numbers, 2×2 Jones matrices and 3D vectors for polarization optics.
//!
//! The three value types [`complex::Complex`], [`matrix::Matrix2x2`] and
//! [`vector::Vector3`] form the numerical core. [`jones`], [`fresnel`] and
//! [`snell`] build optics on top of it, and [`train`], [`sweep`],
//! [`settings`] and [`output`] drive the `polarcore` binary.

pub mod complex;
pub mod config;
pub mod fresnel;
pub mod jones;
pub mod matrix;
pub mod output;
pub mod scalar;
pub mod settings;
pub mod snell;
pub mod sweep;
pub mod train;
pub mod vector;
