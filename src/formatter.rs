//! Display-ready summary table for a computed profile.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::models::{columns, DiveProfile};

pub const TABLE_TITLE: &str = "Dive Profile Summary";

/// Label of the synthetic surface row.
pub const START_LABEL: &str = "Start";

/// Column keys in display order, with their headers.
pub const TABLE_HEADERS: [(&str, &str); 8] = [
    (columns::SEGMENT, "Segment"),
    (columns::DIRECTION, "Direction"),
    (columns::SPEED, "Speed (m/min)"),
    (columns::TIME_INTERVAL, "Time (min)"),
    (columns::DEPTH, "Depth (m)"),
    (columns::CONSO_PER_MIN, "Air consumption (L/min)"),
    (columns::CONSO_REMAINING, "Air remaining (L)"),
    (columns::BAR_REMAINING, "Pressure remaining (bar)"),
];

/// Vertical movement over a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    Stable,
}

impl Direction {
    pub fn from_depths(previous_depth: f64, depth: f64) -> Self {
        if depth > previous_depth {
            Direction::Down
        } else if depth < previous_depth {
            Direction::Up
        } else {
            Direction::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Stable => "stable",
        }
    }

    /// Icon the table renderer shows for this direction.
    pub fn icon_file(&self) -> String {
        format!("logo-diver-{}.svg", self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ColumnHeader {
    pub key: String,
    pub label: String,
}

/// One table row. Units: minutes, meters, liters, bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct SummaryRow {
    pub segment: String,
    pub direction: Direction,
    /// Vertical speed (m/min), positive when ascending. Missing for zero-length rows.
    pub speed: Option<f64>,
    pub time: f64,
    pub time_interval: f64,
    pub depth: f64,
    pub conso_per_min: Option<f64>,
    pub conso_totale: f64,
    pub conso_remaining: f64,
    pub bar_remaining: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct SummaryTable {
    pub title: String,
    pub headers: Vec<ColumnHeader>,
    pub rows: Vec<SummaryRow>,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Floor at zero, then round to whole units.
fn clip_round(value: f64) -> f64 {
    value.max(0.0).round()
}

/// Build the summary table, optionally led by a `Start` row at the start depth.
pub fn format_profile(
    dive: &DiveProfile,
    include_start: bool,
) -> Result<SummaryTable, ProfileError> {
    let profile = &dive.profile;
    let consumption = profile.checked_consumption("format_profile")?;
    let remaining = profile.checked_remaining("format_profile", columns::CONSO_REMAINING)?;

    let mut rows = Vec::with_capacity(profile.len() + 1);
    if include_start {
        rows.push(SummaryRow {
            segment: START_LABEL.to_string(),
            direction: Direction::Stable,
            speed: None,
            time: 0.0,
            time_interval: 0.0,
            depth: dive.start_depth,
            conso_per_min: None,
            conso_totale: 0.0,
            conso_remaining: clip_round(dive.tank.available_air()),
            bar_remaining: clip_round(dive.tank.pressure),
        });
    }

    let mut previous_depth = dive.start_depth;
    for (i, segment) in profile.segments.iter().enumerate() {
        let speed = if segment.time_interval > 0.0 {
            Some(round_to(
                (previous_depth - segment.depth) / segment.time_interval,
                2,
            ))
        } else {
            None
        };
        rows.push(SummaryRow {
            segment: segment.label.clone(),
            direction: Direction::from_depths(previous_depth, segment.depth),
            speed,
            time: segment.time,
            time_interval: segment.time_interval,
            depth: segment.depth,
            conso_per_min: Some(segment.rate_or(dive.conso_per_min)),
            conso_totale: clip_round(consumption.conso_totale[i]),
            conso_remaining: clip_round(remaining.conso_remaining[i]),
            bar_remaining: clip_round(remaining.bar_remaining[i]),
        });
        previous_depth = segment.depth;
    }

    Ok(SummaryTable {
        title: TABLE_TITLE.to_string(),
        headers: TABLE_HEADERS
            .iter()
            .map(|(key, label)| ColumnHeader {
                key: key.to_string(),
                label: label.to_string(),
            })
            .collect(),
        rows,
    })
}
