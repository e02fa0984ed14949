//! Numeric precision policy
//!
//! Every physics routine in this crate is generic over a single scalar type
//! implementing [`Real`]. The downstream transport solver runs production
//! columns in `f64` but validates its fixtures in `f32` as well, so the same
//! formulas must evaluate correctly at both precisions.
//!
//! [`Real`] is a thin extension of nalgebra's `RealField`: it adds `Copy`
//! (scalars are passed by value everywhere) and a single lossy constructor
//! [`Real::of`] used to inject `f64` physical constants into the working
//! precision.

use nalgebra::RealField;

/// Scalar type usable by all diffusion physics
///
/// Implemented for `f32` and `f64`. All nalgebra containers in this crate
/// (`DVector<S>`, `DMatrix<S>`) use the same parameter, so a whole evaluation
/// pipeline is either fully single- or fully double-precision — mixed
/// precision is not supported.
pub trait Real: RealField + Copy {
    /// Converts an `f64` literal (physical constant, fit coefficient)
    /// into the working precision.
    fn of(value: f64) -> Self;
}

impl Real for f64 {
    #[inline]
    fn of(value: f64) -> Self {
        value
    }
}

impl Real for f32 {
    #[inline]
    fn of(value: f64) -> Self {
        value as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_preserves_f64() {
        assert_eq!(f64::of(1.380_649e-23), 1.380_649e-23);
    }

    #[test]
    fn test_of_rounds_to_f32() {
        let v = f32::of(0.959_99);
        assert!((v - 0.959_99_f32).abs() < f32::EPSILON);
    }

    #[test]
    fn test_generic_arithmetic() {
        fn half<S: Real>(x: S) -> S {
            x / S::of(2.0)
        }
        assert_eq!(half(4.0_f64), 2.0);
        assert_eq!(half(4.0_f32), 2.0);
    }
}
