//! Hydrostatic atmospheric mixture
//!
//! [`AtmosphericMixture`] implements the [`Mixture`] collaborator over an
//! ordered [`SpeciesTable`]: per-species scale heights from the hydrostatic
//! balance, the density-weighted mean scale height with its exact density
//! derivative, and the stored per-species thermal-diffusion factors.
//!
//! # Scale heights
//!
//! With `r(z) = R + z` the distance to the planet centre,
//! `g(z) = G·M / r(z)²` and `m_s` the molecular mass of species `s`:
//!
//! $$H_s(z) = \frac{k_b\,T(z)}{g(z)\,m_s}$$
//!
//! expressed in km with altitudes in km and molar masses in g/mol. The mean
//! scale height `H_a` replaces `m_s` by the density-weighted mean molecular
//! mass, which makes it composition dependent — its density derivative is
//! the quotient-rule expression
//!
//! $$\frac{\partial H_a}{\partial n_i}
//!    = H_a \left(\frac{1}{N_{tot}} - \frac{m_i}{\sum_j n_j m_j}\right)$$
//!
//! consumed directly by the flux Jacobian.

use nalgebra::DVector;

use crate::atmosphere::traits::{Mixture, TemperatureProfile};
use crate::constants::{titan, universal};
use crate::numeric::Real;
use crate::species::SpeciesTable;

// =================================================================================================
// AtmosphericMixture
// =================================================================================================

/// Composition collaborator backed by a species table and a temperature profile
///
/// The planetary body defaults to Titan; override it with
/// [`with_body`](Self::with_body) for another atmosphere.
///
/// # Example
///
/// ```
/// use nalgebra::DVector;
/// use atmodiff::atmosphere::{AtmosphericMixture, InterpolatedTemperature, Mixture};
/// use atmodiff::species::{SpeciesDef, SpeciesTable};
///
/// let species = SpeciesTable::new(vec![
///     SpeciesDef::new("N2", 28.016_f64),
///     SpeciesDef::new("CH4", 16.043),
/// ]).unwrap();
/// let temperature = InterpolatedTemperature::new(
///     vec![600.0, 1400.0], vec![180.0, 180.0]).unwrap();
///
/// let mixture = AtmosphericMixture::new(
///     species, temperature, DVector::from_element(2, 0.0)).unwrap();
/// assert_eq!(mixture.species_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AtmosphericMixture<S: Real, Tp: TemperatureProfile<S>> {
    species: SpeciesTable<S>,
    temperature: Tp,

    /// Per-species thermal-diffusion (Soret) factors \[dimensionless\]
    thermal: DVector<S>,

    /// Planetary radius \[km\]
    radius_km: S,

    /// Planetary mass \[kg\]
    mass_kg: S,
}

impl<S: Real, Tp: TemperatureProfile<S>> AtmosphericMixture<S, Tp> {
    /// Builds a mixture over Titan's gravity field
    ///
    /// # Errors
    ///
    /// - `thermal` length differs from the species count
    pub fn new(
        species: SpeciesTable<S>,
        temperature: Tp,
        thermal: DVector<S>,
    ) -> Result<Self, String> {
        if thermal.len() != species.len() {
            return Err(format!(
                "Thermal coefficient vector has {} entries for {} species",
                thermal.len(),
                species.len()
            ));
        }
        Ok(Self {
            species,
            temperature,
            thermal,
            radius_km: titan::radius_km(),
            mass_kg: titan::mass_kg(),
        })
    }

    /// Replaces the planetary body parameters
    ///
    /// # Errors
    ///
    /// - non-positive radius or mass
    pub fn with_body(mut self, radius_km: S, mass_kg: S) -> Result<Self, String> {
        if radius_km <= S::zero() || mass_kg <= S::zero() {
            return Err(format!(
                "Planetary body must have positive radius and mass, got R = {:?} km, M = {:?} kg",
                radius_km, mass_kg
            ));
        }
        self.radius_km = radius_km;
        self.mass_kg = mass_kg;
        Ok(self)
    }

    /// The species table backing this mixture
    pub fn species(&self) -> &SpeciesTable<S> {
        &self.species
    }

    /// Scale-height prefactor `kb·T(z)·Na·(R+z)²·10³ / (G·M)` \[km·kg/mol\]
    ///
    /// Dividing by a molar mass in kg/mol yields a scale height in km.
    fn scale_factor(&self, z: S) -> S {
        let t = self.temperature.neutral_temperature(z);
        let r = self.radius_km + z;
        universal::boltzmann::<S>() * t * universal::avogadro::<S>() * r * r * S::of(1.0e3)
            / (universal::gravitational::<S>() * self.mass_kg)
    }
}

impl<S: Real, Tp: TemperatureProfile<S>> Mixture<S> for AtmosphericMixture<S, Tp> {
    fn species_count(&self) -> usize {
        self.species.len()
    }

    fn scale_heights(&self, z: S) -> DVector<S> {
        let factor = self.scale_factor(z);
        // molar masses are stored in g/mol; the factor expects kg/mol
        DVector::from_iterator(
            self.species.len(),
            self.species
                .iter()
                .map(|sp| factor / (sp.molar_mass * S::of(1.0e-3))),
        )
    }

    fn atmospheric_scale_height(&self, densities: &DVector<S>, z: S) -> S {
        assert_eq!(
            densities.len(),
            self.species.len(),
            "atmospheric_scale_height: density vector has {} entries for {} species",
            densities.len(),
            self.species.len()
        );

        let ntot: S = densities.iter().copied().fold(S::zero(), |a, n| a + n);
        let weighted: S = densities
            .iter()
            .enumerate()
            .fold(S::zero(), |a, (j, &n)| a + n * self.species.molar_mass(j));
        let mean_mass_kg = weighted / ntot * S::of(1.0e-3);
        self.scale_factor(z) / mean_mass_kg
    }

    fn datmospheric_scale_height_dn(&self, densities: &DVector<S>, z: S) -> (S, DVector<S>) {
        assert_eq!(
            densities.len(),
            self.species.len(),
            "datmospheric_scale_height_dn: density vector has {} entries for {} species",
            densities.len(),
            self.species.len()
        );

        let ntot: S = densities.iter().copied().fold(S::zero(), |a, n| a + n);
        let weighted: S = densities
            .iter()
            .enumerate()
            .fold(S::zero(), |a, (j, &n)| a + n * self.species.molar_mass(j));

        // same operation order as atmospheric_scale_height, so both entry
        // points return bit-identical values
        let mean_mass_kg = weighted / ntot * S::of(1.0e-3);
        let ha = self.scale_factor(z) / mean_mass_kg;

        // ∂H_a/∂n_i = H_a·(1/N_tot − m_i/Σ_j n_j·m_j), exact quotient rule
        let dha = DVector::from_iterator(
            self.species.len(),
            (0..self.species.len())
                .map(|i| ha * (S::one() / ntot - self.species.molar_mass(i) / weighted)),
        );

        (ha, dha)
    }

    fn thermal_coefficient(&self) -> &DVector<S> {
        &self.thermal
    }
}

// =================================================================================================
// Barometric law
// =================================================================================================

/// Hydrostatic density extrapolation from a reference altitude
///
/// `n(z) = n_bottom · exp(−(z − z_bottom)/H̄)` with the geometric-mean scale
/// height between the two altitudes,
/// `H̄ = (R+z)·(R+z_bottom)·10³·Na·kb·T / (G·M·M_mol)`.
///
/// Used by fixtures and demos to build physically consistent density columns;
/// `mean_molar_mass` is in g/mol, altitudes in km, densities in cm⁻³.
pub fn barometric_density<S: Real>(
    n_bottom: S,
    z_bottom: S,
    z: S,
    temperature: S,
    mean_molar_mass: S,
    radius_km: S,
    mass_kg: S,
) -> S {
    let scale = (radius_km + z) * (radius_km + z_bottom) * S::of(1.0e3)
        * universal::avogadro::<S>()
        * universal::boltzmann::<S>()
        * temperature
        / (universal::gravitational::<S>() * mass_kg * mean_molar_mass * S::of(1.0e-3));
    n_bottom * (-(z - z_bottom) / scale).exp()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::temperature::InterpolatedTemperature;
    use crate::species::SpeciesDef;
    use approx::assert_relative_eq;

    fn mixture() -> AtmosphericMixture<f64, InterpolatedTemperature<f64>> {
        let species = SpeciesTable::new(vec![
            SpeciesDef::new("N2", 28.016),
            SpeciesDef::new("CH4", 16.043),
            SpeciesDef::new("C2H", 25.030),
        ])
        .unwrap();
        let temperature =
            InterpolatedTemperature::new(vec![600.0, 1400.0], vec![180.0, 180.0]).unwrap();
        AtmosphericMixture::new(species, temperature, DVector::from_element(3, 0.0)).unwrap()
    }

    #[test]
    fn test_scale_heights_inverse_in_mass() {
        // H_s ∝ 1/m_s: lighter CH4 has the larger scale height
        let hs = mixture().scale_heights(600.0);
        assert!(hs[1] > hs[0]);
        assert_relative_eq!(hs[0] * 28.016, hs[1] * 16.043, epsilon = 1e-8 * hs[0]);
    }

    #[test]
    fn test_scale_heights_grow_with_altitude() {
        // Isothermal profile: H ∝ (R+z)², strictly increasing with z
        let m = mixture();
        assert!(m.scale_heights(1400.0)[0] > m.scale_heights(600.0)[0]);
    }

    #[test]
    fn test_mean_scale_height_between_extremes() {
        let m = mixture();
        let n = DVector::from_vec(vec![9.6e11, 4.0e10, 1.0e7]);
        let hs = m.scale_heights(600.0);
        let ha = m.atmospheric_scale_height(&n, 600.0);
        let hmin = hs.iter().copied().fold(f64::INFINITY, f64::min);
        let hmax = hs.iter().copied().fold(0.0_f64, f64::max);
        assert!(ha > hmin && ha < hmax);
    }

    #[test]
    fn test_mean_scale_height_derivative_matches_finite_difference() {
        let m = mixture();
        let n = DVector::from_vec(vec![9.6e11, 4.0e10, 1.0e7]);
        let (ha, dha) = m.datmospheric_scale_height_dn(&n, 900.0);
        // both entry points share the value computation exactly
        assert_eq!(ha, m.atmospheric_scale_height(&n, 900.0));

        for i in 0..3 {
            let h = n[i] * 1e-6;
            let mut np = n.clone();
            np[i] += h;
            let mut nm = n.clone();
            nm[i] -= h;
            let fd = (m.atmospheric_scale_height(&np, 900.0)
                - m.atmospheric_scale_height(&nm, 900.0))
                / (2.0 * h);
            // floor the scale by H_a/n_i: for a near-mean-mass species the
            // derivative itself is tiny and FD roundoff dominates
            let scale = dha[i].abs().max(fd.abs()).max(ha / n[i]);
            assert!(
                (dha[i] - fd).abs() <= 1e-5 * scale,
                "dH_a/dn[{i}]: analytic {} vs fd {}",
                dha[i],
                fd
            );
        }
    }

    #[test]
    fn test_single_species_mean_equals_species_scale_height() {
        let species = SpeciesTable::new(vec![SpeciesDef::new("N2", 28.016)]).unwrap();
        let temperature =
            InterpolatedTemperature::new(vec![600.0, 1400.0], vec![180.0, 180.0]).unwrap();
        let m = AtmosphericMixture::new(species, temperature, DVector::from_element(1, 0.0))
            .unwrap();
        let n = DVector::from_vec(vec![1.0e12]);
        assert_relative_eq!(
            m.atmospheric_scale_height(&n, 700.0),
            m.scale_heights(700.0)[0],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_thermal_vector_length_checked() {
        let species = SpeciesTable::new(vec![SpeciesDef::new("N2", 28.016)]).unwrap();
        let temperature =
            InterpolatedTemperature::new(vec![600.0, 1400.0], vec![180.0, 180.0]).unwrap();
        assert!(
            AtmosphericMixture::new(species, temperature, DVector::from_element(2, 0.0)).is_err()
        );
    }

    #[test]
    fn test_barometric_density_decreases_with_altitude() {
        let n600 = 1.0e12;
        let n700 = barometric_density(
            n600,
            600.0,
            700.0,
            180.0,
            27.5,
            titan::radius_km(),
            titan::mass_kg(),
        );
        assert!(n700 < n600 && n700 > 0.0);
    }

    #[test]
    fn test_barometric_density_identity_at_reference() {
        let n = barometric_density(
            1.0e12,
            600.0,
            600.0,
            180.0,
            27.5,
            titan::radius_km(),
            titan::mass_kg(),
        );
        assert_relative_eq!(n, 1.0e12);
    }
}
