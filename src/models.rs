use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Column names shared with the display layer. Units: minutes, meters, liters, bar.
pub mod columns {
    pub const SEGMENT: &str = "segment";
    pub const TIME: &str = "time";
    pub const TIME_INTERVAL: &str = "time_interval";
    pub const DEPTH: &str = "depth";
    pub const CONSO_PER_MIN: &str = "conso_per_min";
    pub const CONSO: &str = "conso";
    pub const CONSO_TOTALE: &str = "conso_totale";
    pub const CONSO_REMAINING: &str = "conso_remaining";
    pub const BAR_REMAINING: &str = "bar_remaining";
    pub const DIRECTION: &str = "direction";
    pub const SPEED: &str = "speed";
}

/// One leg of a dive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Segment {
    /// Unique label, `A`..`Z` in creation order.
    #[serde(rename = "segment")]
    pub label: String,
    /// Absolute elapsed time at the end of the segment (min).
    pub time: f64,
    /// Duration of the segment (min).
    pub time_interval: f64,
    /// Depth reached at the end of the segment (m).
    pub depth: f64,
    /// Segment-specific consumption rate (L/min). `None` follows the profile rate.
    pub conso_per_min: Option<f64>,
}

impl Segment {
    pub fn rate_or(&self, default_rate: f64) -> f64 {
        self.conso_per_min.unwrap_or(default_rate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Tank {
    /// Water volume (L).
    pub volume: f64,
    /// Fill pressure (bar).
    pub pressure: f64,
}

impl Tank {
    /// Surface-equivalent liters held by a full tank.
    pub fn available_air(&self) -> f64 {
        self.volume * self.pressure
    }
}

/// Output of the consumption stage, one value per segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ConsumptionColumns {
    pub conso: Vec<f64>,
    pub conso_totale: Vec<f64>,
}

/// Output of the remaining-resource stage, one value per segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct RemainingColumns {
    pub conso_remaining: Vec<f64>,
    pub bar_remaining: Vec<f64>,
}

/// Ordered segments plus whichever derived stages have been computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Profile {
    pub segments: Vec<Segment>,
    pub consumption: Option<ConsumptionColumns>,
    pub remaining: Option<RemainingColumns>,
}

impl Profile {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, label: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.label == label)
    }

    pub fn labels(&self) -> Vec<String> {
        self.segments.iter().map(|s| s.label.clone()).collect()
    }

    /// The consumption stage, if present and in step with `segments`.
    /// A stage of the wrong length is stale and counts as missing.
    pub(crate) fn checked_consumption(
        &self,
        operation: &'static str,
    ) -> Result<&ConsumptionColumns, ProfileError> {
        self.consumption
            .as_ref()
            .filter(|c| c.conso.len() == self.len() && c.conso_totale.len() == self.len())
            .ok_or_else(|| ProfileError::missing(operation, columns::CONSO_TOTALE))
    }

    pub(crate) fn checked_remaining(
        &self,
        operation: &'static str,
        column: &'static str,
    ) -> Result<&RemainingColumns, ProfileError> {
        self.remaining
            .as_ref()
            .filter(|r| {
                r.conso_remaining.len() == self.len() && r.bar_remaining.len() == self.len()
            })
            .ok_or_else(|| ProfileError::missing(operation, column))
    }

    /// Drops every derived stage. Used after any change to segment data.
    pub(crate) fn invalidated(mut self) -> Self {
        self.consumption = None;
        self.remaining = None;
        self
    }
}

/// A profile together with the tank and rate it is computed against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct DiveProfile {
    pub profile: Profile,
    pub tank: Tank,
    /// Global consumption rate (L/min) for segments without their own.
    pub conso_per_min: f64,
    /// Depth the first segment starts from (m). 0 is the surface.
    pub start_depth: f64,
}

/// Consumption rates supplied at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Enum)]
pub enum ConsoRates {
    /// One rate for the whole dive, stored as the profile rate.
    Uniform { rate: f64 },
    /// One rate per segment, stored on each segment.
    PerSegment { rates: Vec<f64> },
}

/// New values for a single segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct SegmentEdit {
    pub time_interval: f64,
    pub depth: f64,
    /// Replaces the segment rate when set; otherwise the current rate is kept.
    pub conso_per_min: Option<f64>,
}
