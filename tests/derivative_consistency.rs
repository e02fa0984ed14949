//! Analytic Jacobians against centered finite differences
//!
//! The density Jacobians feed a Newton linearization, so they must agree
//! with numerical differentiation at arbitrary states, not only at the
//! reference column. States are drawn from a seeded RNG (log-uniform
//! densities, uniform altitudes) so every run checks the same ensemble.
//!
//! The Dtilde Jacobian is a partial derivative at fixed (T, P): the binary
//! coefficients are temperature/pressure functions with no density channel.
//! The flux-level check therefore perturbs along density *transfers*
//! (n_i += h, n_j -= h), which leave the total density and hence the
//! internal pressure untouched while still exercising every density channel
//! the Jacobian carries (Dtilde, K, H_a and the thermal factor).

mod common;

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use atmodiff::constants::pressure;
use atmodiff::prelude::*;

use common::titan::TitanFixture;

const STATES: usize = 12;
const REL_STEP: f64 = 1e-6;

/// Random positive density state with per-species magnitudes 10⁹–10¹² cm⁻³
fn random_state(rng: &mut StdRng) -> (DVector<f64>, f64) {
    let n = DVector::from_iterator(3, (0..3).map(|_| 10.0_f64.powf(rng.random_range(9.0..12.0))));
    let z = rng.random_range(600.0..1400.0);
    (n, z)
}

/// `|analytic − fd| ≤ tol·scale` with the scale floored by `value/n_i`,
/// the natural magnitude of a derivative of `value` at density `n_i`
fn assert_close(analytic: f64, fd: f64, value: f64, n_i: f64, label: &str) {
    let scale = analytic.abs().max(fd.abs()).max(value.abs() / n_i);
    assert!(
        (analytic - fd).abs() <= 1e-5 * scale,
        "{label}: analytic {analytic:e} vs finite difference {fd:e}"
    );
}

#[test]
fn test_dtilde_jacobian_matches_finite_differences() {
    let fx = TitanFixture::<f64>::new();
    let molecular = fx.evaluator.molecular();
    let mut rng = StdRng::seed_from_u64(0x7a3d);

    for _ in 0..STATES {
        let (n, z) = random_state(&mut rng);
        let t = fx.temperature.neutral_temperature(z);
        let ntot: f64 = n.iter().sum();
        let p = pressure(ntot, t);

        let mut dtilde = DVector::zeros(3);
        let mut jac = nalgebra::DMatrix::zeros(3, 3);
        molecular.dtilde_and_derivs_dn(&n, t, p, &mut dtilde, &mut jac);

        for i in 0..3 {
            let h = n[i] * REL_STEP;
            let mut np = n.clone();
            np[i] += h;
            let mut nm = n.clone();
            nm[i] -= h;
            // pressure held fixed: the Jacobian is a partial at constant (T, P)
            let dp = molecular.dtilde(&np, t, p);
            let dm = molecular.dtilde(&nm, t, p);
            for s in 0..3 {
                let fd = (dp[s] - dm[s]) / (2.0 * h);
                assert_close(jac[(s, i)], fd, dtilde[s], n[i], &format!("dDtilde[{s}]/dn[{i}]"));
            }
        }
    }
}

#[test]
fn test_flux_jacobians_match_transfer_finite_differences() {
    let fx = TitanFixture::<f64>::new();
    let mut rng = StdRng::seed_from_u64(0x51fe);

    for state in 0..STATES {
        let (n, z) = random_state(&mut rng);
        let (a, b, da, db) = fx.evaluator.diffusion_and_derivs(&n, z);

        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                // transfer h from species j to species i: N_tot is invariant
                let h = n[i].min(n[j]) * REL_STEP;
                let mut np = n.clone();
                np[i] += h;
                np[j] -= h;
                let mut nm = n.clone();
                nm[i] -= h;
                nm[j] += h;
                let (ap, bp) = fx.evaluator.diffusion(&np, z);
                let (am, bm) = fx.evaluator.diffusion(&nm, z);

                for s in 0..3 {
                    // directional derivative along e_i − e_j
                    let fd_a = (ap[s] - am[s]) / (2.0 * h);
                    let fd_b = (bp[s] - bm[s]) / (2.0 * h);
                    let n_eff = n[i].min(n[j]);
                    assert_close(
                        da[(s, i)] - da[(s, j)],
                        fd_a,
                        a[s],
                        n_eff,
                        &format!("state {state}: dA[{s}]/d(n[{i}]−n[{j}])"),
                    );
                    assert_close(
                        db[(s, i)] - db[(s, j)],
                        fd_b,
                        b[s],
                        n_eff,
                        &format!("state {state}: dB[{s}]/d(n[{i}]−n[{j}])"),
                    );
                }
            }
        }
    }
}

#[test]
fn test_jacobian_entry_points_agree_on_values() {
    // diffusion() and diffusion_and_derivs() share the value pipeline; the
    // FD comparisons above only make sense if the two are interchangeable
    let fx = TitanFixture::<f64>::new();
    let mut rng = StdRng::seed_from_u64(0xbeef);

    for _ in 0..STATES {
        let (n, z) = random_state(&mut rng);
        let (a, b) = fx.evaluator.diffusion(&n, z);
        let (a2, b2, _, _) = fx.evaluator.diffusion_and_derivs(&n, z);
        assert_eq!(a, a2);
        assert_eq!(b, b2);
    }
}
