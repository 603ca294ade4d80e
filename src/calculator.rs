//! Consumption computation for dive profiles.
//!
//! Pure functions over [`Profile`] snapshots. Each stage returns a new profile
//! carrying its derived columns:
//!
//! 1. [`compute_consumption`] adds `conso` and `conso_totale`.
//! 2. [`compute_remaining`] adds `conso_remaining` and `bar_remaining` and
//!    refuses to run before stage 1.

use tracing::{debug, trace};

use crate::error::ProfileError;
use crate::models::{ConsumptionColumns, Profile, RemainingColumns, Tank};

/// Water column (m) adding one bar of ambient pressure.
const METERS_PER_BAR: f64 = 10.0;

/// Atmospheric pressure at the surface (bar).
const SURFACE_PRESSURE: f64 = 1.0;

/// Ambient pressure (bar) at `depth` meters.
pub fn ambient_pressure(depth: f64) -> f64 {
    depth / METERS_PER_BAR + SURFACE_PRESSURE
}

/// Surface-equivalent liters consumed over one segment, averaging the ambient
/// pressure at its start and end depth.
pub fn segment_consumption(start_depth: f64, end_depth: f64, time_interval: f64, rate: f64) -> f64 {
    let avg_pressure = (ambient_pressure(start_depth) + ambient_pressure(end_depth)) / 2.0;
    avg_pressure * time_interval * rate
}

/// Consumption stage for a dive starting at the surface.
pub fn compute_consumption(profile: &Profile, default_rate: f64) -> Profile {
    compute_consumption_from(profile, default_rate, 0.0)
}

/// Consumption stage for a dive whose first segment starts at `start_depth`.
///
/// Any remaining-resource columns on the input are dropped since they no
/// longer match the new totals.
pub fn compute_consumption_from(profile: &Profile, default_rate: f64, start_depth: f64) -> Profile {
    let mut conso = Vec::with_capacity(profile.len());
    let mut conso_totale = Vec::with_capacity(profile.len());
    let mut previous_depth = start_depth;
    let mut total = 0.0;

    for segment in &profile.segments {
        let used = segment_consumption(
            previous_depth,
            segment.depth,
            segment.time_interval,
            segment.rate_or(default_rate),
        );
        total += used;
        trace!(segment = %segment.label, conso = used, conso_totale = total);
        conso.push(used);
        conso_totale.push(total);
        previous_depth = segment.depth;
    }

    debug!(segments = profile.len(), total_conso = total, "computed consumption");

    Profile {
        segments: profile.segments.clone(),
        consumption: Some(ConsumptionColumns {
            conso,
            conso_totale,
        }),
        remaining: None,
    }
}

/// Remaining-resource stage. Requires the consumption stage.
pub fn compute_remaining(profile: &Profile, tank: &Tank) -> Result<Profile, ProfileError> {
    let consumption = profile.checked_consumption("compute_remaining")?;

    let available = tank.available_air();
    let conso_remaining = consumption
        .conso_totale
        .iter()
        .map(|total| available - total)
        .collect();
    let bar_remaining = consumption
        .conso_totale
        .iter()
        .map(|total| tank.pressure - total / tank.volume)
        .collect();

    Ok(Profile {
        segments: profile.segments.clone(),
        consumption: Some(consumption.clone()),
        remaining: Some(RemainingColumns {
            conso_remaining,
            bar_remaining,
        }),
    })
}

/// Total liters consumed over the whole dive.
pub fn total_conso(profile: &Profile) -> Result<f64, ProfileError> {
    let consumption = profile.checked_consumption("total_conso")?;
    Ok(consumption.conso_totale.last().copied().unwrap_or(0.0))
}
