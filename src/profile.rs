//! Nanoindenter tip profile from a fitted area function.
//!
//! The projected contact area of an indenter is commonly fitted as
//!
//! ```text
//! A(d) = c0·d² + c1·d + c2·d^(1/2) + c3·d^(1/4) + c4·d^(1/8) + c5·d^(1/16)
//! ```
//!
//! and the tip radius at depth `d` follows from `A = π·r²`. The fit is only
//! trusted down to [`MIN_FITTED_DEPTH`]; below that a pure `r = m·√d` branch
//! takes over, with `m` chosen so both branches give the same radius at the
//! threshold. The slope is not matched, so the tip is continuous but not
//! necessarily smooth there.

use std::f64::consts::PI;

use crate::defaults::MIN_FITTED_DEPTH;
use crate::errors::GeometryError;

const EXPONENTS: [f64; 6] = [2.0, 1.0, 0.5, 0.25, 0.125, 0.0625];

/// Area-function coefficients describing a tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TipProfile {
    pub coefficients: [f64; 6],
}

impl TipProfile {
    pub fn new(coefficients: [f64; 6]) -> Self {
        TipProfile { coefficients }
    }

    /// An ideal Berkovich tip (`A = 24.5·d²`).
    pub fn berkovich() -> Self {
        TipProfile::new([24.5, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// Fitted projected area at `depth`.
    pub fn area(&self, depth: f64) -> f64 {
        self.coefficients
            .iter()
            .zip(EXPONENTS)
            .map(|(c, e)| c * depth.powf(e))
            .sum()
    }

    /// Tip radius at indentation `depth`.
    pub fn radius(&self, depth: f64) -> Result<f64, GeometryError> {
        check_depth(depth)?;
        if depth >= MIN_FITTED_DEPTH {
            self.fitted_radius(depth)
        } else {
            self.square_root_radius(depth)
        }
    }

    /// Radius from the area function alone, ignoring the calibration threshold.
    pub fn fitted_radius(&self, depth: f64) -> Result<f64, GeometryError> {
        check_depth(depth)?;
        let area = self.area(depth);
        if area < 0.0 {
            return Err(GeometryError::InvalidProfile { depth, area });
        }
        Ok((area / PI).sqrt())
    }

    /// Radius from the `m·√d` fit, anchored to the fitted radius at the threshold.
    pub fn square_root_radius(&self, depth: f64) -> Result<f64, GeometryError> {
        check_depth(depth)?;
        Ok(self.square_root_factor()? * depth.sqrt())
    }

    fn square_root_factor(&self) -> Result<f64, GeometryError> {
        Ok(self.fitted_radius(MIN_FITTED_DEPTH)? / MIN_FITTED_DEPTH.sqrt())
    }
}

fn check_depth(depth: f64) -> Result<(), GeometryError> {
    if depth.is_nan() || depth < 0.0 {
        return Err(GeometryError::NegativeDepth { depth });
    }
    Ok(())
}
