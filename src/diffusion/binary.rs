//! Binary molecular diffusion coefficients
//!
//! A binary diffusion coefficient describes mass exchange between exactly two
//! species and is fit to an empirical temperature/pressure law. Three fit
//! conventions appear in the planetary-atmosphere literature, named here
//! after their sources:
//!
//! | Law       | Raw fit                      | Reduced form                                   |
//! |-----------|------------------------------|------------------------------------------------|
//! | `Massman` | $D_{01}, \beta$ directly     | $D = D_{01}\,\frac{P_n}{P}\,(T/T_{std})^\beta$ |
//! | `Wakeham` | $D = c_1\,T^{c_2}$ at $P_n$  | $D_{01} = c_1\,T_{std}^{c_2}$, $\beta = c_2$   |
//! | `Wilson`  | $D = c_1\,k_b\,T^{c_2+1}/P$  | $D_{01} = c_1\,T_{std}^{c_2+1}\,k_b/P_n$, $\beta = c_2 + 1$ |
//!
//! All three reduce at construction to the common reference-pressure form
//! (column three), so evaluation is a single code path: the constants are
//! normalized once, never per call.
//!
//! A fourth possibility has no fit at all: an unlike pair whose coefficient
//! is derived from a same-species (self-diffusion) fit by the mass-ratio
//! scaling [`mass_ratio_scaling`]. That combination lives in the molecular
//! engine's tagged pair table, not here.
//!
//! Coefficients are expressed in cm²/s with `T` in K and `P` in Pa.

use crate::constants::convention;
use crate::constants::universal;
use crate::numeric::Real;

// =================================================================================================
// DiffusionLaw
// =================================================================================================

/// Empirical fit convention of a binary-diffusion coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffusionLaw {
    /// $D = c_1 \cdot (P_n/P) \cdot (T/T_{std})^{c_2}$
    Massman,

    /// $D = c_1 \cdot T^{c_2}$ at normal pressure
    Wakeham,

    /// $D = c_1 \cdot k_b \cdot T^{c_2+1} / P$ — same family as Wakeham with
    /// the exponent offset by one, used for specific chemical families
    Wilson,
}

// =================================================================================================
// BinaryDiffusion
// =================================================================================================

/// One fitted binary-diffusion coefficient
///
/// Stores the raw fit constants together with the normalized
/// reference-pressure pair `(d01, beta)` precomputed at construction.
/// A coefficient is symmetric in its species pair; the pair bookkeeping is
/// owned by the molecular engine's table, this type only evaluates.
///
/// # Example
///
/// ```
/// use atmodiff::diffusion::{BinaryDiffusion, DiffusionLaw};
///
/// // N2-N2 self diffusion, Massman fit, cm²/s
/// let n2n2 = BinaryDiffusion::new(0.1783_f64, 1.81, DiffusionLaw::Massman);
/// let d = n2n2.evaluate(180.0, 2.5e-3);
/// assert!(d > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinaryDiffusion<S: Real> {
    law: DiffusionLaw,

    /// Raw fit constants, kept for introspection/error messages
    c1: S,
    c2: S,

    /// Normalized coefficient at (T_standard, P_normal) \[cm²/s\]
    d01: S,

    /// Normalized temperature exponent
    beta: S,
}

impl<S: Real> BinaryDiffusion<S> {
    /// Creates a coefficient from its two fit constants and law tag
    ///
    /// The constants are normalized to the reference-pressure form here,
    /// once; [`evaluate`](Self::evaluate) is then law independent.
    pub fn new(c1: S, c2: S, law: DiffusionLaw) -> Self {
        let t_std = convention::t_standard::<S>();
        let (d01, beta) = match law {
            DiffusionLaw::Massman => (c1, c2),
            DiffusionLaw::Wakeham => (c1 * t_std.powf(c2), c2),
            DiffusionLaw::Wilson => {
                let beta = c2 + S::one();
                (
                    c1 * t_std.powf(beta) * universal::boltzmann::<S>()
                        / convention::p_normal::<S>(),
                    beta,
                )
            }
        };
        Self { law, c1, c2, d01, beta }
    }

    /// The fit convention of this coefficient
    pub fn law(&self) -> DiffusionLaw {
        self.law
    }

    /// Raw fit constants `(c1, c2)` as supplied to [`new`](Self::new)
    pub fn fit_constants(&self) -> (S, S) {
        (self.c1, self.c2)
    }

    /// Evaluates the coefficient at temperature `T` \[K\] and pressure `P` \[Pa\]
    ///
    /// Pure function of the inputs and the stored constants. Requires
    /// `T > 0` and `P > 0`; out-of-domain inputs propagate non-finite values
    /// to the caller (numerical-domain fault, not locally caught).
    #[inline]
    pub fn evaluate(&self, temperature: S, pressure: S) -> S {
        self.d01 * convention::p_normal::<S>() / pressure
            * (temperature / convention::t_standard::<S>()).powf(self.beta)
    }
}

// =================================================================================================
// Mass-ratio scaling (derived unlike pairs)
// =================================================================================================

/// Scales a self-diffusion value `D_ii` to an unlike pair (i, j)
///
/// $$D_{ij} = \begin{cases}
///    D_{ii}\,\sqrt{\tfrac{M_j/M_i + 1}{2}} & M_j < M_i \\
///    D_{ii}\,\sqrt{M_j/M_i}                & M_j \ge M_i
/// \end{cases}$$
///
/// Used when no direct fit exists for the pair: the heavier/lighter partner
/// distinction keeps the scaled coefficient continuous at `M_j = M_i`
/// (both branches reduce to `D_ii` there).
#[inline]
pub fn mass_ratio_scaling<S: Real>(d_ii: S, m_i: S, m_j: S) -> S {
    let ratio = m_j / m_i;
    if m_j < m_i {
        d_ii * ((ratio + S::one()) / S::of(2.0)).sqrt()
    } else {
        d_ii * ratio.sqrt()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
