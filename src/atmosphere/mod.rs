//! Atmospheric state collaborators
//!
//! The diffusion pipeline queries the atmosphere through two read-only trait
//! seams and never owns the state description itself:
//!
//! - [`TemperatureProfile`] — neutral temperature and its altitude gradient
//! - [`Mixture`] — scale heights, mean scale height (with density
//!   derivative) and thermal-diffusion factors over the ordered species set
//!
//! Reference implementations are provided for both:
//! [`InterpolatedTemperature`] (piecewise-linear measurement table) and
//! [`AtmosphericMixture`] (hydrostatic balance over a planetary gravity
//! field, Titan by default). Custom atmospheres only need to implement the
//! traits.

pub mod mixture;
pub mod temperature;
pub mod traits;

pub use mixture::{barometric_density, AtmosphericMixture};
pub use temperature::InterpolatedTemperature;
pub use traits::{Mixture, TemperatureProfile};
