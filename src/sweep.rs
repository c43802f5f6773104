//! Rotating-analyzer sweeps over an optical train.
//!
//! A sweep appends an analyzer polarizer to the exit of a train and records
//! the transmitted intensity at evenly spaced analyzer angles in `[0°, 180°)`.
//! This is the standard way to characterise an unknown polarization state,
//! and the curve is what the demo renderers plot.
//!
//! The analyzer angles are independent, so they are evaluated in parallel
//! with rayon; the value types are `Copy` and need no synchronisation.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::jones::JonesVector;
use crate::train::{Element, OpticalTrain};


/// One analyzer setting and what was measured behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub analyzer_deg: f64,
    pub intensity: f64,
    pub stokes: [f64; 4],
}

/// Evaluates `points` analyzer angles over `[0°, 180°)` behind `train`.
pub fn analyzer_sweep(train: &OpticalTrain, input: &JonesVector, points: usize) -> Vec<SweepPoint> {
    debug!(
        "sweeping {} analyzer angles behind {} elements",
        points,
        train.elements.len()
    );
    let exit = train.propagate(input);
    let step = 180.0 / points.max(1) as f64;

    (0..points)
        .into_par_iter()
        .map(|i| {
            let analyzer_deg = i as f64 * step;
            let analyzer = Element::Polarizer {
                angle: analyzer_deg,
            };
            let out = exit.transform(&analyzer.matrix());
            SweepPoint {
                analyzer_deg,
                intensity: out.intensity(),
                stokes: out.stokes(),
            }
        })
        .collect()
}
