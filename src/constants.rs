//! Physical constants
//!
//! Grouped by origin:
//!
//! - [`universal`]: CODATA fundamental constants
//! - [`convention`]: reference conditions used by the empirical
//!   binary-diffusion fits (standard temperature, normal pressure)
//! - [`titan`]: default planetary body parameters (Titan)
//!
//! All accessors are generic over the working precision [`Real`](crate::Real)
//! so that an `f32` pipeline never round-trips through `f64` arithmetic.

use crate::numeric::Real;

/// CODATA fundamental constants (SI units)
pub mod universal {
    use super::Real;

    /// Boltzmann constant \[J/K\]
    #[inline]
    pub fn boltzmann<S: Real>() -> S {
        S::of(1.380_649e-23)
    }

    /// Newtonian gravitational constant \[m³/(kg·s²)\]
    #[inline]
    pub fn gravitational<S: Real>() -> S {
        S::of(6.674_30e-11)
    }

    /// Avogadro number \[1/mol\]
    #[inline]
    pub fn avogadro<S: Real>() -> S {
        S::of(6.022_140_76e23)
    }
}

/// Reference conditions of the binary-diffusion fit conventions
pub mod convention {
    use super::Real;

    /// Normal pressure \[Pa\] — the fits are tabulated at 1 atm
    #[inline]
    pub fn p_normal<S: Real>() -> S {
        S::of(1.013_25e5)
    }

    /// Standard temperature \[K\]
    #[inline]
    pub fn t_standard<S: Real>() -> S {
        S::of(273.15)
    }
}

/// Titan planetary parameters (default body for the reference fixtures)
pub mod titan {
    use super::Real;

    /// Mean radius \[km\]
    #[inline]
    pub fn radius_km<S: Real>() -> S {
        S::of(2575.0)
    }

    /// Mass \[kg\]
    #[inline]
    pub fn mass_kg<S: Real>() -> S {
        S::of(1.345_2e23)
    }
}

/// Ideal-gas pressure from a number density in cm⁻³ \[Pa\]
///
/// `P = n · kb · T` with the density converted from the solver's cm⁻³
/// convention to SI m⁻³.
#[inline]
pub fn pressure<S: Real>(total_density_cm3: S, temperature: S) -> S {
    total_density_cm3 * S::of(1.0e6) * universal::boltzmann::<S>() * temperature
}
