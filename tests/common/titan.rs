//! Titan upper-atmosphere validation fixture
//!
//! Three neutral species (N2, CH4, C2H) at fixed molar fractions
//! 0.95999 / 0.04000 / 0.00001 over a 600–1400 km column, total density
//! 1e12 cm⁻³ at the bottom, with the documented empirical binary-diffusion
//! fits for the N2/CH4 medium and the mass-ratio fallback for every pair
//! involving C2H. Densities follow the hydrostatic barometric law with the
//! mixture's mean molar mass.
//!
//! The fixture is generic over the scalar precision so the same reference
//! scenario validates both `f32` and `f64` pipelines.

use nalgebra::DVector;

use atmodiff::prelude::*;
use atmodiff::constants::titan;

// Documented empirical fit constants, cm²/s convention
pub const B_NN: (f64, f64) = (0.1783, 1.81); // N2-N2, Massman
pub const B_CN: (f64, f64) = (1.04e-5, 1.76); // N2-CH4, Wakeham
pub const B_CC: (f64, f64) = (5.73e16, 0.5); // CH4-CH4, Wilson

pub const MOLAR_MASS_N2: f64 = 28.016;
pub const MOLAR_MASS_CH4: f64 = 16.043;
pub const MOLAR_MASS_C2H: f64 = 25.030;

pub const MOLAR_FRACTIONS: [f64; 3] = [0.95999, 0.04000, 0.00001];
pub const N_BOTTOM: f64 = 1.0e12; // cm⁻³ at z_bottom
pub const Z_BOTTOM: f64 = 600.0; // km
pub const Z_TOP: f64 = 1400.0; // km

pub const EDDY_K_MAX: f64 = 4.3e6; // cm²/s
pub const THERMAL_FACTORS: [f64; 3] = [0.0, 0.17, -0.38];

/// Neutral temperature table, Huygens-like profile \[km, K\]
pub const TEMPERATURE_TABLE: [(f64, f64); 9] = [
    (600.0, 177.1),
    (700.0, 158.0),
    (800.0, 151.3),
    (900.0, 149.7),
    (1000.0, 153.0),
    (1100.0, 158.5),
    (1200.0, 164.2),
    (1300.0, 169.0),
    (1400.0, 172.6),
];

/// Fully wired Titan scenario at precision `S`
pub struct TitanFixture<S: Real> {
    pub species: SpeciesTable<S>,
    pub temperature: InterpolatedTemperature<S>,
    pub mixture: AtmosphericMixture<S, InterpolatedTemperature<S>>,
    pub evaluator: DiffusionEvaluator<
        S,
        AtmosphericMixture<S, InterpolatedTemperature<S>>,
        InterpolatedTemperature<S>,
    >,
}

impl<S: Real> TitanFixture<S> {
    pub fn new() -> Self {
        let species = SpeciesTable::new(vec![
            SpeciesDef::new("N2", S::of(MOLAR_MASS_N2)),
            SpeciesDef::new("CH4", S::of(MOLAR_MASS_CH4)),
            SpeciesDef::new("C2H", S::of(MOLAR_MASS_C2H)),
        ])
        .unwrap();

        let temperature = InterpolatedTemperature::new(
            TEMPERATURE_TABLE.iter().map(|&(z, _)| S::of(z)).collect(),
            TEMPERATURE_TABLE.iter().map(|&(_, t)| S::of(t)).collect(),
        )
        .unwrap();

        let mixture = AtmosphericMixture::new(
            species.clone(),
            temperature.clone(),
            DVector::from_iterator(3, THERMAL_FACTORS.iter().map(|&a| S::of(a))),
        )
        .unwrap();

        let molecular = MolecularDiffusion::new(
            &species,
            vec![0, 1],
            vec![
                BinaryFit::new(
                    0,
                    0,
                    BinaryDiffusion::new(S::of(B_NN.0), S::of(B_NN.1), DiffusionLaw::Massman),
                ),
                BinaryFit::new(
                    0,
                    1,
                    BinaryDiffusion::new(S::of(B_CN.0), S::of(B_CN.1), DiffusionLaw::Wakeham),
                ),
                BinaryFit::new(
                    1,
                    1,
                    BinaryDiffusion::new(S::of(B_CC.0), S::of(B_CC.1), DiffusionLaw::Wilson),
                ),
            ],
        )
        .unwrap();

        let eddy = EddyDiffusion::new(S::of(EDDY_K_MAX), S::of(N_BOTTOM)).unwrap();

        let evaluator =
            DiffusionEvaluator::new(molecular, eddy, mixture.clone(), temperature.clone())
                .unwrap();

        Self {
            species,
            temperature,
            mixture,
            evaluator,
        }
    }

    /// Mean molar mass of the fixed-fraction mixture \[g/mol\]
    pub fn mean_molar_mass(&self) -> S {
        let masses = [MOLAR_MASS_N2, MOLAR_MASS_CH4, MOLAR_MASS_C2H];
        MOLAR_FRACTIONS
            .iter()
            .zip(masses.iter())
            .fold(S::zero(), |acc, (&f, &m)| acc + S::of(f) * S::of(m))
    }

    /// Barometric density column at altitude `z` \[cm⁻³ per species\]
    pub fn densities(&self, z: S) -> DVector<S> {
        let t = self.temperature.neutral_temperature(z);
        let n_total = barometric_density(
            S::of(N_BOTTOM),
            S::of(Z_BOTTOM),
            z,
            t,
            self.mean_molar_mass(),
            titan::radius_km(),
            titan::mass_kg(),
        );
        DVector::from_iterator(3, MOLAR_FRACTIONS.iter().map(|&f| S::of(f) * n_total))
    }

    /// The validation altitudes: 600–1400 km, step 10 km
    pub fn altitudes() -> Vec<S> {
        let mut z = Z_BOTTOM;
        let mut out = Vec::new();
        while z <= Z_TOP {
            out.push(S::of(z));
            z += 10.0;
        }
        out
    }
}
