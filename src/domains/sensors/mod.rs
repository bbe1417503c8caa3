//! Sensors domain module.
//!
//! This module fabricates vital-sign readings for the simulated pulse
//! oximeter. Real hardware sampling is out of scope; readings are drawn from a
//! shared [`RandomSource`] that tests can replace with a deterministic one.
//!
//! ## Architecture
//!
//! - `random.rs` - The injectable random source and its production implementation
//! - `reading.rs` - Vital signs, their plausible bands, and reading generation

mod random;
mod reading;

pub use random::{RandomSource, SharedRng};
pub use reading::{SensorReading, VitalSign, generate};
