//! Collaborator traits of the diffusion pipeline
//!
//! The flux evaluator does not own the atmospheric state description — it
//! queries two collaborators at every evaluation:
//!
//! - [`TemperatureProfile`]: the neutral temperature and its altitude
//!   gradient at a given altitude
//! - [`Mixture`]: composition-level quantities — per-species and mean scale
//!   heights (with the mean's density derivative) and the per-species
//!   thermal-diffusion factors
//!
//! Both traits are read-only query seams: implementations must not mutate
//! internal state during a query, so shared references can be used from
//! concurrent per-altitude evaluations.

use nalgebra::DVector;

use crate::numeric::Real;

/// Neutral temperature profile of the atmosphere
///
/// Altitudes are expressed in km, temperatures in K. Implementations decide
/// how the profile is represented (interpolated table, analytic law, ...);
/// the evaluator only requires the value and its exact altitude derivative.
pub trait TemperatureProfile<S: Real> {
    /// Neutral temperature at altitude `z` \[K\]
    fn neutral_temperature(&self, z: S) -> S;

    /// Altitude derivative dT/dz at altitude `z` \[K/km\]
    fn dneutral_temperature_dz(&self, z: S) -> S;
}

/// Composition-level queries over the ordered species set
///
/// All vectors use the species-table index convention; every returned vector
/// has length [`species_count`](Mixture::species_count).
pub trait Mixture<S: Real> {
    /// Number of species in the ordered set
    fn species_count(&self) -> usize;

    /// Per-species scale heights at altitude `z` \[km\]
    ///
    /// `H_s = kb·T(z) / (g(z)·m_s)` — one entry per species, density
    /// independent.
    fn scale_heights(&self, z: S) -> DVector<S>;

    /// Mean atmospheric scale height at altitude `z` \[km\]
    ///
    /// Uses the density-weighted mean molecular mass, so the value depends
    /// on the composition vector.
    fn atmospheric_scale_height(&self, densities: &DVector<S>, z: S) -> S;

    /// Mean scale height together with its exact density derivative
    ///
    /// Returns `(H_a, dH_a/dn)` where the vector holds `∂H_a/∂n_i` for every
    /// species `i`. The derivative must be the analytic quotient-rule
    /// expression — the flux Jacobian consumes it directly.
    fn datmospheric_scale_height_dn(&self, densities: &DVector<S>, z: S) -> (S, DVector<S>);

    /// Per-species thermal-diffusion (Soret) factors \[dimensionless\]
    fn thermal_coefficient(&self) -> &DVector<S>;
}
