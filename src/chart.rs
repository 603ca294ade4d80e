//! Series for the dive profile chart: depth on a descending axis and tank
//! pressure on an ascending one, plotted against dive time.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::models::{columns, DiveProfile};

pub const CHART_TITLE: &str = "Dive Profile";
pub const TIME_AXIS_TITLE: &str = "Dive time (min)";
pub const DEPTH_AXIS_TITLE: &str = "Depth (m)";
pub const PRESSURE_AXIS_TITLE: &str = "Bloc pressure (bar)";

/// Segment labels sit this far (bar) below the pressure line.
const LABEL_OFFSET_BAR: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ChartPoint {
    pub time: f64,
    pub depth: f64,
    pub bar_remaining: f64,
}

/// Axis bounds in plotting order; `start > end` for a reversed axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

/// Where the segment letter is drawn: mid-segment, just under the pressure line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct SegmentAnchor {
    pub segment: String,
    pub time: f64,
    pub bar: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ChartSeries {
    pub title: String,
    pub time_axis_title: String,
    pub depth_axis_title: String,
    pub pressure_axis_title: String,
    /// Surface start first, then one point per segment.
    pub points: Vec<ChartPoint>,
    pub depth_range: AxisRange,
    pub pressure_range: AxisRange,
    pub anchors: Vec<SegmentAnchor>,
}

pub fn chart_series(dive: &DiveProfile) -> Result<ChartSeries, ProfileError> {
    let profile = &dive.profile;
    let remaining = profile.checked_remaining("chart_series", columns::BAR_REMAINING)?;

    let mut points = Vec::with_capacity(profile.len() + 1);
    points.push(ChartPoint {
        time: 0.0,
        depth: dive.start_depth,
        bar_remaining: dive.tank.pressure,
    });
    let mut anchors = Vec::with_capacity(profile.len());

    for (segment, &bar) in profile.segments.iter().zip(&remaining.bar_remaining) {
        let previous_bar = points.last().map_or(dive.tank.pressure, |p| p.bar_remaining);
        anchors.push(SegmentAnchor {
            segment: segment.label.clone(),
            time: segment.time - 0.5 * segment.time_interval,
            bar: bar + 0.5 * (previous_bar - bar) - LABEL_OFFSET_BAR,
        });
        points.push(ChartPoint {
            time: segment.time,
            depth: segment.depth,
            bar_remaining: bar,
        });
    }

    let max_depth = points.iter().map(|p| p.depth).fold(0.0, f64::max);
    let max_bar = points.iter().map(|p| p.bar_remaining).fold(0.0, f64::max);

    Ok(ChartSeries {
        title: CHART_TITLE.to_string(),
        time_axis_title: TIME_AXIS_TITLE.to_string(),
        depth_axis_title: DEPTH_AXIS_TITLE.to_string(),
        pressure_axis_title: PRESSURE_AXIS_TITLE.to_string(),
        points,
        depth_range: AxisRange {
            start: max_depth,
            end: 0.0,
        },
        pressure_range: AxisRange {
            start: 0.0,
            end: max_bar,
        },
        anchors,
    })
}
