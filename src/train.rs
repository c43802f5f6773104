//! Optical trains: ordered chains of polarization elements.
//!
//! An [`OpticalTrain`] is the list of [`Element`]s a beam passes through, in
//! order of incidence. Elements are plain serde data (angles in degrees) so
//! a train can be read straight from a configuration file; each element
//! turns into its Jones matrix on demand.
//!
//! The composed matrix of a train is `M = Eₙ⋯E₂·E₁`: the first element the
//! light meets is the rightmost factor.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::config;
use crate::jones::JonesVector;
use crate::matrix::Matrix2x2;


/// A single optical element. All angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Ideal linear polarizer with transmission axis at `angle`.
    Polarizer { angle: f64 },
    /// General linear retarder.
    WavePlate { retardance: f64, fast_axis: f64 },
    QuarterWave { fast_axis: f64 },
    HalfWave { fast_axis: f64 },
    /// Rotation of the polarization plane, e.g. an optically active medium.
    Rotator { angle: f64 },
    /// Polarization-independent intensity transmission in `[0, 1]`.
    Attenuator { transmission: f64 },
}

impl Element {
    /// The Jones matrix of this element.
    pub fn matrix(&self) -> Matrix2x2 {
        match *self {
            Element::Polarizer { angle } => Matrix2x2::linear_polarizer(angle.to_radians()),
            Element::WavePlate {
                retardance,
                fast_axis,
            } => Matrix2x2::wave_plate(retardance.to_radians(), fast_axis.to_radians()),
            Element::QuarterWave { fast_axis } => {
                Matrix2x2::quarter_wave_plate(fast_axis.to_radians())
            }
            Element::HalfWave { fast_axis } => Matrix2x2::half_wave_plate(fast_axis.to_radians()),
            Element::Rotator { angle } => Matrix2x2::rotator(angle.to_radians()),
            Element::Attenuator { transmission } => {
                Matrix2x2::scaled_identity(Complex::from(transmission.max(0.0).sqrt()))
            }
        }
    }

    /// Every angle or coefficient of this element, for validation.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            Element::Polarizer { angle } | Element::Rotator { angle } => vec![angle],
            Element::WavePlate {
                retardance,
                fast_axis,
            } => vec![retardance, fast_axis],
            Element::QuarterWave { fast_axis } | Element::HalfWave { fast_axis } => {
                vec![fast_axis]
            }
            Element::Attenuator { transmission } => vec![transmission],
        }
    }
}

/// Elements in the order the light meets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpticalTrain {
    pub elements: Vec<Element>,
}

impl OpticalTrain {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Returns a copy of this train with `element` appended at the exit.
    pub fn then(&self, element: Element) -> Self {
        let mut elements = self.elements.clone();
        elements.push(element);
        Self { elements }
    }

    /// The composed Jones matrix `Eₙ⋯E₁`.
    pub fn matrix(&self) -> Matrix2x2 {
        let m = self
            .elements
            .iter()
            .fold(Matrix2x2::IDENTITY, |acc, element| element.matrix() * acc);
        trace!("train of {} elements: {}", self.elements.len(), m);
        m
    }

    pub fn propagate(&self, input: &JonesVector) -> JonesVector {
        input.transform(&self.matrix())
    }

    /// Output intensity over input intensity; zero for a zero input.
    pub fn transmittance(&self, input: &JonesVector) -> f64 {
        let incident = input.intensity();
        if incident < config::EPSILON {
            debug!("zero input intensity, transmittance set to zero");
            return 0.0;
        }
        self.propagate(input).intensity() / incident
    }
}
