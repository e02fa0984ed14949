//! Interpolated neutral-temperature profile
//!
//! Production temperature profiles come from measurement tables (altitude,
//! temperature) with a few dozen support points. [`InterpolatedTemperature`]
//! wraps such a table with piecewise-linear interpolation and exposes the
//! exact segment slope as the altitude derivative — the flux Jacobian needs
//! the derivative of what is actually evaluated, not of an idealized curve.
//!
//! Outside the table the profile is extended flat (constant temperature,
//! zero gradient), matching the behaviour of the original measurement
//! pipelines where the boundary values are the best available data.

use crate::atmosphere::traits::TemperatureProfile;
use crate::numeric::Real;

/// Piecewise-linear temperature profile over an altitude grid
///
/// # Example
///
/// ```
/// use atmodiff::atmosphere::{InterpolatedTemperature, TemperatureProfile};
///
/// let profile = InterpolatedTemperature::new(
///     vec![600.0_f64, 800.0, 1000.0],
///     vec![170.0, 160.0, 175.0],
/// ).unwrap();
///
/// assert_eq!(profile.neutral_temperature(700.0), 165.0);
/// assert_eq!(profile.dneutral_temperature_dz(700.0), -0.05);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedTemperature<S: Real> {
    /// Support altitudes \[km\], strictly increasing
    altitudes: Vec<S>,

    /// Temperatures at the support altitudes \[K\]
    temperatures: Vec<S>,
}

impl<S: Real> InterpolatedTemperature<S> {
    /// Builds a profile from an (altitude, temperature) table
    ///
    /// # Errors
    ///
    /// - fewer than two support points
    /// - `altitudes` and `temperatures` of different lengths
    /// - altitudes not strictly increasing
    /// - any non-positive temperature (the flux formulas divide by T)
    pub fn new(altitudes: Vec<S>, temperatures: Vec<S>) -> Result<Self, String> {
        if altitudes.len() < 2 {
            return Err(format!(
                "Temperature profile needs at least two support points, got {}",
                altitudes.len()
            ));
        }
        if altitudes.len() != temperatures.len() {
            return Err(format!(
                "Temperature profile: {} altitudes but {} temperatures",
                altitudes.len(),
                temperatures.len()
            ));
        }
        for w in altitudes.windows(2) {
            if w[1] <= w[0] {
                return Err("Temperature profile altitudes must be strictly increasing".to_string());
            }
        }
        for (i, &t) in temperatures.iter().enumerate() {
            if t <= S::zero() {
                return Err(format!(
                    "Temperature profile: non-positive temperature {:?} K at support point {}",
                    t, i
                ));
            }
        }

        Ok(Self {
            altitudes,
            temperatures,
        })
    }

    /// Index of the segment containing `z`, or `None` outside the table
    fn segment(&self, z: S) -> Option<usize> {
        if z < self.altitudes[0] || z > *self.altitudes.last().unwrap() {
            return None;
        }
        // windows(2) pairs are the segments [z_j, z_{j+1}]
        self.altitudes
            .windows(2)
            .position(|w| w[0] <= z && z <= w[1])
    }

    /// Slope of segment `j` \[K/km\]
    fn slope(&self, j: usize) -> S {
        (self.temperatures[j + 1] - self.temperatures[j]) / (self.altitudes[j + 1] - self.altitudes[j])
    }
}

impl<S: Real> TemperatureProfile<S> for InterpolatedTemperature<S> {
    fn neutral_temperature(&self, z: S) -> S {
        match self.segment(z) {
            Some(j) => self.temperatures[j] + self.slope(j) * (z - self.altitudes[j]),
            // Flat extrapolation: clamp to the nearest boundary value
            None if z < self.altitudes[0] => self.temperatures[0],
            None => *self.temperatures.last().unwrap(),
        }
    }

    fn dneutral_temperature_dz(&self, z: S) -> S {
        match self.segment(z) {
            Some(j) => self.slope(j),
            None => S::zero(),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn profile() -> InterpolatedTemperature<f64> {
        InterpolatedTemperature::new(vec![600.0, 1000.0, 1400.0], vec![180.0, 160.0, 180.0]).unwrap()
    }

    #[test]
    fn test_values_at_support_points() {
        let p = profile();
        assert_relative_eq!(p.neutral_temperature(600.0), 180.0);
        assert_relative_eq!(p.neutral_temperature(1000.0), 160.0);
        assert_relative_eq!(p.neutral_temperature(1400.0), 180.0);
    }

    #[test]
    fn test_linear_interior() {
        let p = profile();
        assert_relative_eq!(p.neutral_temperature(800.0), 170.0, epsilon = 1e-12);
        assert_relative_eq!(p.dneutral_temperature_dz(800.0), -0.05, epsilon = 1e-12);
        assert_relative_eq!(p.dneutral_temperature_dz(1200.0), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let p = profile();
        assert_relative_eq!(p.neutral_temperature(100.0), 180.0);
        assert_relative_eq!(p.neutral_temperature(5000.0), 180.0);
        assert_relative_eq!(p.dneutral_temperature_dz(100.0), 0.0);
        assert_relative_eq!(p.dneutral_temperature_dz(5000.0), 0.0);
    }

    #[test]
    fn test_isothermal_table_has_zero_gradient() {
        let p = InterpolatedTemperature::new(vec![600.0, 1400.0], vec![175.0, 175.0]).unwrap();
        assert_relative_eq!(p.neutral_temperature(900.0), 175.0);
        assert_relative_eq!(p.dneutral_temperature_dz(900.0), 0.0);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(InterpolatedTemperature::new(vec![600.0_f64], vec![180.0]).is_err());
        assert!(InterpolatedTemperature::new(vec![600.0_f64, 600.0], vec![180.0, 180.0]).is_err());
        assert!(InterpolatedTemperature::new(vec![600.0_f64, 700.0], vec![180.0]).is_err());
        assert!(InterpolatedTemperature::new(vec![600.0_f64, 700.0], vec![180.0, -1.0]).is_err());
    }
}
