//! Individual value generators.
//!
//! Each module takes the random source as a parameter so callers control
//! determinism.

pub mod calendar;
pub mod contact;
pub mod names;
pub mod numeric;
pub mod sample;
pub mod shift;
pub mod weighted;
