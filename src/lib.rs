//! atmodiff: Vertical Diffusive Transport Coefficients
//!
//! A library computing molecular and eddy diffusion coefficients for
//! chemical species in a stratified planetary atmosphere, together with
//! the **analytic first derivatives** with respect to every species' number
//! density that a stiff 1-D transport-chemistry solver needs to linearize
//! its transport operator.
//!
//! # Architecture
//!
//! atmodiff separates two concerns:
//!
//! 1. **Atmospheric state** ([`atmosphere`]) — trait seams for the
//!    temperature profile and the composition (scale heights, thermal
//!    factors), with hydrostatic reference implementations
//! 2. **Diffusion physics** ([`diffusion`]) — binary coefficients, the
//!    Wilke mixture average, the eddy profile and the flux-decomposition
//!    evaluator with its density Jacobians
//!
//! Everything is generic over a single scalar precision ([`Real`], `f32`
//! or `f64`) and uses nalgebra vectors/matrices throughout.
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::DVector;
//! use atmodiff::prelude::*;
//!
//! // 1. Describe the atmosphere
//! let species = SpeciesTable::new(vec![
//!     SpeciesDef::new("N2", 28.016_f64),
//!     SpeciesDef::new("CH4", 16.043),
//! ])?;
//! let temperature = InterpolatedTemperature::new(
//!     vec![600.0, 1400.0],
//!     vec![180.0, 175.0],
//! )?;
//! let mixture = AtmosphericMixture::new(
//!     species.clone(),
//!     temperature.clone(),
//!     DVector::from_element(2, 0.0), // thermal-diffusion factors
//! )?;
//!
//! // 2. Configure the diffusion engines
//! let molecular = MolecularDiffusion::new(&species, vec![0, 1], vec![
//!     BinaryFit::new(0, 0, BinaryDiffusion::new(0.1783, 1.81, DiffusionLaw::Massman)),
//!     BinaryFit::new(0, 1, BinaryDiffusion::new(1.04e-5, 1.76, DiffusionLaw::Wakeham)),
//!     BinaryFit::new(1, 1, BinaryDiffusion::new(5.73e16, 0.5, DiffusionLaw::Wilson)),
//! ])?;
//! let eddy = EddyDiffusion::new(4.3e6, 1.0e12)?;
//!
//! // 3. Evaluate flux coefficients and Jacobians at one level
//! let evaluator = DiffusionEvaluator::new(molecular, eddy, mixture, temperature)?;
//! let n = DVector::from_vec(vec![9.6e11, 4.0e10]);
//! let (omega_a, omega_b, da_dn, db_dn) = evaluator.diffusion_and_derivs(&n, 700.0);
//!
//! assert_eq!(omega_a.len(), 2);
//! assert_eq!(da_dn.shape(), (2, 2));
//! # let _ = (omega_b, db_dn);
//! # Ok::<(), String>(())
//! ```
//!
//! # Units
//!
//! Densities in cm⁻³, altitudes and scale heights in km, temperatures in K,
//! diffusion coefficients in cm²/s; the flux coefficients carry the solver's
//! cm⁻³·km·s⁻¹ convention via [`diffusion::OMEGA_SCALE`].
//!
//! # Modules
//!
//! - [`atmosphere`]: temperature/composition collaborator traits + reference impls
//! - [`diffusion`]: binary, molecular (Wilke), eddy and flux-decomposition engines
//! - [`species`]: the ordered species registry
//! - [`constants`]: physical constants and reference conditions
//! - [`numeric`]: the scalar precision policy

// Core modules
pub mod atmosphere;
pub mod constants;
pub mod diffusion;
pub mod numeric;
pub mod species;

pub use numeric::Real;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use atmodiff::prelude::*;
    //! ```
    pub use crate::atmosphere::{
        barometric_density, AtmosphericMixture, InterpolatedTemperature, Mixture,
        TemperatureProfile,
    };
    pub use crate::diffusion::{
        mass_ratio_scaling, BinaryDiffusion, BinaryFit, DiffusionEvaluator, DiffusionLaw,
        EddyDiffusion, MolecularDiffusion, OMEGA_SCALE,
    };
    pub use crate::numeric::Real;
    pub use crate::species::{SpeciesDef, SpeciesTable};
}
