//! Oxygen-saturation resource definition.

use super::ResourceDefinition;
use crate::domains::resources::link::ContentFormat;
use crate::domains::sensors::VitalSign;

/// The patient's current blood oxygen saturation.
pub struct OxygenSaturationResource;

impl ResourceDefinition for OxygenSaturationResource {
    const SEGMENT: &'static str = "oxygen-saturation";
    const TITLE: &'static str = "Oxygen Saturation Resource";
    const CONTENT_FORMAT: ContentFormat = ContentFormat::XML;
    const RESOURCE_TYPE: &'static str = "Oxygen Saturation Resource";
    const INTERFACE: &'static str = "sensor";
    const VITAL: VitalSign = VitalSign::OxygenSaturation;
}
