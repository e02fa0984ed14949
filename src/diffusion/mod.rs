//! Diffusion coefficient pipeline
//!
//! Four layers, leaves first:
//!
//! 1. [`BinaryDiffusion`] — one empirical binary coefficient `D_ij(T, P)`
//!    among three fit conventions ([`DiffusionLaw`]), plus the mass-ratio
//!    scaling for pairs derived from a self-diffusion fit
//! 2. [`MolecularDiffusion`] — the symmetric pair table and the mixture
//!    average `Dtilde_s` (Wilke rule with the minor-constituent correction)
//!    with its exact density Jacobian
//! 3. [`EddyDiffusion`] — the turbulent coefficient `K(N_tot)` with its
//!    derivative
//! 4. [`DiffusionEvaluator`] — assembly of the flux decomposition
//!    `Φ_s = A_s·dn_s/dz + B_s·n_s` and the full `∂A/∂n`, `∂B/∂n` matrices
//!    consumed by the transport solver's Newton linearization
//!
//! All evaluations are pure functions of the call inputs and the immutable
//! configuration built at construction; concurrent per-altitude queries
//! against shared references are safe.

pub mod binary;
pub mod eddy;
pub mod evaluator;
pub mod molecular;

pub use binary::{mass_ratio_scaling, BinaryDiffusion, DiffusionLaw};
pub use eddy::EddyDiffusion;
pub use evaluator::{DiffusionEvaluator, OMEGA_SCALE};
pub use molecular::{BinaryFit, MolecularDiffusion};
