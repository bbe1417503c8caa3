//! Heart-rate resource definition.

use super::ResourceDefinition;
use crate::domains::resources::link::ContentFormat;
use crate::domains::sensors::VitalSign;

/// The patient's current heart rate.
pub struct HeartRateResource;

impl ResourceDefinition for HeartRateResource {
    const SEGMENT: &'static str = "heartrate";
    const TITLE: &'static str = "Heartrate Resource";
    const CONTENT_FORMAT: ContentFormat = ContentFormat::XML;
    const RESOURCE_TYPE: &'static str = "Heartrate Resource";
    const INTERFACE: &'static str = "sensor";
    const VITAL: VitalSign = VitalSign::HeartRate;
}
