//! Common utilities for integration tests
#![allow(dead_code)]

pub mod titan;

#[allow(unused_imports)]
pub use titan::TitanFixture;
