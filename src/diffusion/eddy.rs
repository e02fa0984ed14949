//! Eddy (turbulent) diffusion
//!
//! Turbulence mixes all species identically: the eddy coefficient `K` is a
//! single scalar per altitude, parameterized by the **total** number density
//! only. The profile follows the standard upper-atmosphere closure
//!
//! $$K(N_{tot}) = K_{max} \sqrt{N_{bottom} / N_{tot}}$$
//!
//! anchored at the homopause: `K` reaches `K_max` where the column density
//! equals the reference bottom density and grows as the atmosphere thins.
//! The exact derivative with respect to any single species density is
//!
//! $$\frac{\partial K}{\partial n_s} = -\frac{K(N_{tot})}{2 N_{tot}}$$
//!
//! identical for every species since only the total enters.

use crate::numeric::Real;

/// Square-root eddy-diffusion profile
///
/// # Example
///
/// ```
/// use atmodiff::diffusion::EddyDiffusion;
///
/// let eddy = EddyDiffusion::new(4.3e6_f64, 1.0e12).unwrap();
/// assert_eq!(eddy.k(1.0e12), 4.3e6);
/// assert!(eddy.k(1.0e10) > eddy.k(1.0e12));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EddyDiffusion<S: Real> {
    /// Coefficient at the reference density \[cm²/s\], ≥ 0
    k_max: S,

    /// Reference (bottom) total density \[cm⁻³\], > 0
    n_bottom: S,
}

impl<S: Real> EddyDiffusion<S> {
    /// Creates the profile from its two parameters
    ///
    /// # Errors
    ///
    /// - `k_max < 0` (a negative mixing coefficient is unphysical)
    /// - `n_bottom <= 0` (appears under a square root and as a divisor)
    pub fn new(k_max: S, n_bottom: S) -> Result<Self, String> {
        if k_max < S::zero() {
            return Err(format!("Eddy K_max must be >= 0 cm²/s, got {:?}", k_max));
        }
        if n_bottom <= S::zero() {
            return Err(format!(
                "Eddy reference density must be > 0 cm⁻³, got {:?}",
                n_bottom
            ));
        }
        Ok(Self { k_max, n_bottom })
    }

    /// Eddy coefficient at a total number density \[cm²/s\]
    ///
    /// Non-negative over the whole physical domain `N_tot > 0`. A
    /// non-positive total density propagates a non-finite value.
    #[inline]
    pub fn k(&self, total_density: S) -> S {
        self.k_max * (self.n_bottom / total_density).sqrt()
    }

    /// Derivative of `K` with respect to any one species density
    ///
    /// `∂K/∂n_s = −K/(2·N_tot)` — the same value for every species `s`.
    #[inline]
    pub fn k_deriv_ns(&self, total_density: S) -> S {
        -self.k(total_density) / (S::of(2.0) * total_density)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
