//! Single-segment edits.
//!
//! An edit only touches segment data: it drops the derived columns and leaves
//! absolute times alone. [`update_time`] and the calculator run as separate
//! steps afterwards.

use tracing::debug;

use crate::config::{validate_depth, validate_interval, validate_rate};
use crate::error::ProfileError;
use crate::models::{Profile, Segment, SegmentEdit};
use crate::profile::segment_label;

fn validate_edit(edit: &SegmentEdit) -> Result<(), ProfileError> {
    validate_interval(edit.time_interval)?;
    validate_depth(edit.depth)?;
    if let Some(rate) = edit.conso_per_min {
        validate_rate(rate)?;
    }
    Ok(())
}

/// Replace the duration, depth and (when given) rate of segment `label`.
///
/// A label missing from the profile is an error; new segments go through
/// [`append_segment`].
pub fn update_segment(
    profile: &Profile,
    label: &str,
    edit: &SegmentEdit,
) -> Result<Profile, ProfileError> {
    validate_edit(edit)?;
    let index = profile
        .segments
        .iter()
        .position(|s| s.label == label)
        .ok_or_else(|| ProfileError::NotFound(label.to_string()))?;

    let mut edited = profile.clone().invalidated();
    let segment = &mut edited.segments[index];
    segment.time_interval = edit.time_interval;
    segment.depth = edit.depth;
    if edit.conso_per_min.is_some() {
        segment.conso_per_min = edit.conso_per_min;
    }

    debug!(
        segment = label,
        time_interval = edit.time_interval,
        depth = edit.depth,
        "updated segment"
    );
    Ok(edited)
}

/// Add a segment after the last one, labelled with the next free letter.
pub fn append_segment(profile: &Profile, edit: &SegmentEdit) -> Result<Profile, ProfileError> {
    validate_edit(edit)?;
    let label = segment_label(profile.len())?;
    let elapsed = profile.segments.last().map(|s| s.time).unwrap_or(0.0);

    let mut edited = profile.clone().invalidated();
    edited.segments.push(Segment {
        label: label.clone(),
        time: elapsed + edit.time_interval,
        time_interval: edit.time_interval,
        depth: edit.depth,
        conso_per_min: edit.conso_per_min,
    });

    debug!(segment = %label, "appended segment");
    Ok(edited)
}

/// Absolute time of every segment as the running total of durations.
/// Derived columns are kept since they do not depend on absolute time.
pub fn update_time(profile: &Profile) -> Profile {
    let mut elapsed = 0.0;
    let segments = profile
        .segments
        .iter()
        .map(|segment| {
            elapsed += segment.time_interval;
            Segment {
                time: elapsed,
                ..segment.clone()
            }
        })
        .collect();
    Profile {
        segments,
        ..profile.clone()
    }
}
