//! Resource definitions module.
//!
//! Each sensor resource is defined in its own file with:
//! - Path segment and display metadata
//! - The link attributes advertised to the resource directory
//! - The vital sign it reports
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `temperature.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Attach it in `registry.rs`

mod heartrate;
mod oxygen_saturation;

pub use heartrate::HeartRateResource;
pub use oxygen_saturation::OxygenSaturationResource;

use super::link::ContentFormat;
use crate::domains::sensors::{RandomSource, SensorReading, VitalSign};

/// Trait for sensor resource definitions.
pub trait ResourceDefinition {
    /// Path segment under the device node.
    const SEGMENT: &'static str;

    /// Human-readable title.
    const TITLE: &'static str;

    /// Content format advertised in the `ct` attribute.
    const CONTENT_FORMAT: ContentFormat;

    /// Resource type advertised in the `rt` attribute.
    const RESOURCE_TYPE: &'static str;

    /// Interface description advertised in the `if` attribute.
    const INTERFACE: &'static str;

    /// The vital sign this resource reports.
    const VITAL: VitalSign;

    /// Produce the textual payload for one read.
    fn read(source: &dyn RandomSource) -> String {
        SensorReading::sample(Self::VITAL, source).to_string()
    }
}
