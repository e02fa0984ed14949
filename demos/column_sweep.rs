//! Titan column sweep
//!
//! Builds the three-species Titan configuration, fills a hydrostatic density
//! column and prints the diffusion coefficients and flux-decomposition terms
//! every 50 km. Run with `RUST_LOG=debug` to see the engine traces.
//!
//! ```text
//! cargo run --example column_sweep
//! ```

use nalgebra::DVector;

use atmodiff::constants::{pressure, titan};
use atmodiff::prelude::*;

const MOLAR_FRACTIONS: [f64; 3] = [0.95999, 0.04000, 0.00001];
const N_BOTTOM: f64 = 1.0e12; // cm⁻³ at 600 km

fn main() -> Result<(), String> {
    env_logger::init();

    let species = SpeciesTable::new(vec![
        SpeciesDef::new("N2", 28.016),
        SpeciesDef::new("CH4", 16.043),
        SpeciesDef::new("C2H", 25.030),
    ])?;

    let temperature = InterpolatedTemperature::new(
        vec![600.0, 700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1400.0],
        vec![177.1, 158.0, 151.3, 149.7, 153.0, 158.5, 164.2, 169.0, 172.6],
    )?;

    let mixture = AtmosphericMixture::new(
        species.clone(),
        temperature.clone(),
        DVector::from_vec(vec![0.0, 0.17, -0.38]),
    )?;

    let molecular = MolecularDiffusion::new(
        &species,
        vec![0, 1],
        vec![
            BinaryFit::new(0, 0, BinaryDiffusion::new(0.1783, 1.81, DiffusionLaw::Massman)),
            BinaryFit::new(0, 1, BinaryDiffusion::new(1.04e-5, 1.76, DiffusionLaw::Wakeham)),
            BinaryFit::new(1, 1, BinaryDiffusion::new(5.73e16, 0.5, DiffusionLaw::Wilson)),
        ],
    )?;

    let eddy = EddyDiffusion::new(4.3e6, N_BOTTOM)?;
    let evaluator = DiffusionEvaluator::new(molecular, eddy, mixture, temperature.clone())?;

    let mean_molar_mass: f64 = MOLAR_FRACTIONS
        .iter()
        .zip([28.016, 16.043, 25.030])
        .map(|(f, m)| f * m)
        .sum();

    println!(
        "{:>6} {:>8} {:>11} {:>12} {:>12} {:>12} {:>13} {:>13}",
        "z[km]", "T[K]", "P[Pa]", "N_tot[1/cm3]", "Dt(CH4)", "K[cm2/s]", "A(CH4)", "B(CH4)"
    );

    let mut z = 600.0;
    while z <= 1400.0 {
        let t = temperature.neutral_temperature(z);
        let n_total = barometric_density(
            N_BOTTOM,
            600.0,
            z,
            t,
            mean_molar_mass,
            titan::radius_km(),
            titan::mass_kg(),
        );
        let n = DVector::from_iterator(3, MOLAR_FRACTIONS.iter().map(|f| f * n_total));
        let p = pressure(n_total, t);

        let dtilde = evaluator.molecular().dtilde(&n, t, p);
        let k = evaluator.eddy().k(n_total);
        let (a, b) = evaluator.diffusion(&n, z);

        println!(
            "{z:>6.0} {t:>8.1} {p:>11.3e} {n_total:>12.3e} {:>12.3e} {k:>12.3e} {:>13.4e} {:>13.4e}",
            dtilde[1], a[1], b[1]
        );

        z += 50.0;
    }

    Ok(())
}
