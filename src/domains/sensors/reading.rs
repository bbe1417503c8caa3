//! Vital-sign readings.

use std::fmt;

use super::random::RandomSource;

/// Return a pseudo-random integer in `[min, min + range)`.
///
/// An empty range yields `min`.
pub fn generate(source: &dyn RandomSource, min: u32, range: u32) -> u32 {
    if range == 0 {
        return min;
    }
    min.saturating_add(source.next_below(range))
}

/// The vital signs measured by the oximeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalSign {
    /// Pulse in beats per minute.
    HeartRate,
    /// Peripheral oxygen saturation in percent.
    OxygenSaturation,
}

impl VitalSign {
    /// Lowest value the simulated sensor reports.
    pub const fn min(self) -> u32 {
        match self {
            Self::HeartRate => 70,
            Self::OxygenSaturation => 90,
        }
    }

    /// Number of distinct values above `min` the sensor may report.
    pub const fn range(self) -> u32 {
        match self {
            Self::HeartRate => 8,
            Self::OxygenSaturation => 10,
        }
    }

    /// Highest value the simulated sensor reports.
    pub const fn max(self) -> u32 {
        self.min() + self.range() - 1
    }

    /// Label used in the textual payload.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeartRate => "Heartrate",
            Self::OxygenSaturation => "Oxygen saturation",
        }
    }
}

/// A single sampled value of a vital sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub vital: VitalSign,
    pub value: u32,
}

impl SensorReading {
    /// Sample the vital sign from the given source.
    pub fn sample(vital: VitalSign, source: &dyn RandomSource) -> Self {
        Self {
            vital,
            value: generate(source, vital.min(), vital.range()),
        }
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.vital.label(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::sensors::SharedRng;

    /// Always returns the largest allowed draw.
    struct Ceiling;

    impl RandomSource for Ceiling {
        fn next_below(&self, bound: u32) -> u32 {
            bound - 1
        }
    }

    #[test]
    fn test_heart_rate_band() {
        let source = SharedRng::from_entropy();
        for _ in 0..1_000 {
            let reading = SensorReading::sample(VitalSign::HeartRate, &source);
            assert!((70..=77).contains(&reading.value), "got {}", reading.value);
        }
    }

    #[test]
    fn test_oxygen_saturation_band() {
        let source = SharedRng::from_entropy();
        for _ in 0..1_000 {
            let reading = SensorReading::sample(VitalSign::OxygenSaturation, &source);
            assert!((90..=99).contains(&reading.value), "got {}", reading.value);
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(VitalSign::HeartRate.max(), 77);
        assert_eq!(VitalSign::OxygenSaturation.max(), 99);
        assert_eq!(
            SensorReading::sample(VitalSign::HeartRate, &Ceiling).value,
            77
        );
        assert_eq!(
            SensorReading::sample(VitalSign::OxygenSaturation, &Ceiling).value,
            99
        );
    }

    #[test]
    fn test_empty_range_yields_min() {
        assert_eq!(generate(&Ceiling, 42, 0), 42);
    }

    #[test]
    fn test_display() {
        let reading = SensorReading {
            vital: VitalSign::HeartRate,
            value: 73,
        };
        assert_eq!(reading.to_string(), "Heartrate: 73");

        let reading = SensorReading {
            vital: VitalSign::OxygenSaturation,
            value: 94,
        };
        assert_eq!(reading.to_string(), "Oxygen saturation: 94");
    }
}
