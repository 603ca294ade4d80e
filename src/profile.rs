//! Construction of dive profiles and the snapshot operations on them.
//!
//! Every method on [`DiveProfile`] borrows the current snapshot and returns a
//! new one; nothing is mutated in place.

use tracing::debug;

use crate::calculator::{compute_consumption_from, compute_remaining, total_conso};
use crate::config::{
    validate_depth, validate_interval, validate_rate, validate_tank, ProfileConfig,
};
use crate::editor::{append_segment, update_segment, update_time};
use crate::error::ProfileError;
use crate::models::{ConsoRates, DiveProfile, Profile, Segment, SegmentEdit, Tank};

/// Segments a profile can hold: one per letter `A`..`Z`.
pub const MAX_SEGMENTS: usize = 26;

/// Label of the segment at `index` in creation order.
pub fn segment_label(index: usize) -> Result<String, ProfileError> {
    if index >= MAX_SEGMENTS {
        return Err(ProfileError::config(format!(
            "a profile holds at most {MAX_SEGMENTS} segments (labels A-Z)"
        )));
    }
    Ok(((b'A' + index as u8) as char).to_string())
}

/// Build a raw profile (no derived columns) from parallel columns.
pub fn create(
    times: &[f64],
    depths: &[f64],
    rates: &ConsoRates,
    volume: f64,
    pressure: f64,
) -> Result<DiveProfile, ProfileError> {
    let config = ProfileConfig {
        volume,
        pressure,
        ..ProfileConfig::default()
    };
    create_with_config(times, depths, rates, &config)
}

/// Like [`create`], taking tank, global rate and start depth from `config`.
///
/// With [`ConsoRates::Uniform`] the rate replaces `config.conso_per_min`.
pub fn create_with_config(
    times: &[f64],
    depths: &[f64],
    rates: &ConsoRates,
    config: &ProfileConfig,
) -> Result<DiveProfile, ProfileError> {
    if times.is_empty() {
        return Err(ProfileError::config("a profile needs at least one segment"));
    }
    if times.len() != depths.len() {
        return Err(ProfileError::config(format!(
            "times and depths differ in length ({} vs {})",
            times.len(),
            depths.len()
        )));
    }
    if times.len() > MAX_SEGMENTS {
        return Err(ProfileError::config(format!(
            "{} segments requested, a profile holds at most {MAX_SEGMENTS} (labels A-Z)",
            times.len()
        )));
    }

    let (global_rate, segment_rates): (f64, Vec<Option<f64>>) = match rates {
        ConsoRates::Uniform { rate } => (*rate, vec![None; times.len()]),
        ConsoRates::PerSegment { rates } => {
            if rates.len() != times.len() {
                return Err(ProfileError::config(format!(
                    "times and consumption rates differ in length ({} vs {})",
                    times.len(),
                    rates.len()
                )));
            }
            for &rate in rates {
                validate_rate(rate)?;
            }
            (config.conso_per_min, rates.iter().copied().map(Some).collect())
        }
    };

    let config = ProfileConfig {
        conso_per_min: global_rate,
        ..*config
    };
    config.validate()?;

    let mut segments = Vec::with_capacity(times.len());
    let mut elapsed = 0.0;
    for (index, ((&time_interval, &depth), conso_per_min)) in
        times.iter().zip(depths).zip(segment_rates).enumerate()
    {
        validate_interval(time_interval)?;
        validate_depth(depth)?;
        elapsed += time_interval;
        segments.push(Segment {
            label: segment_label(index)?,
            time: elapsed,
            time_interval,
            depth,
            conso_per_min,
        });
    }

    debug!(segments = segments.len(), total_time = elapsed, "created profile");

    Ok(DiveProfile {
        profile: Profile {
            segments,
            consumption: None,
            remaining: None,
        },
        tank: config.tank(),
        conso_per_min: config.conso_per_min,
        start_depth: config.start_depth,
    })
}

impl DiveProfile {
    /// Tank or global rate change. Derived columns are dropped; segments with
    /// their own rate keep it.
    pub fn with_parameters(
        &self,
        volume: f64,
        pressure: f64,
        conso_per_min: f64,
    ) -> Result<DiveProfile, ProfileError> {
        let tank = Tank { volume, pressure };
        validate_tank(&tank)?;
        validate_rate(conso_per_min)?;
        Ok(DiveProfile {
            profile: self.profile.clone().invalidated(),
            tank,
            conso_per_min,
            start_depth: self.start_depth,
        })
    }

    /// Consumption then remaining-resource stage.
    pub fn update_conso(&self) -> Result<DiveProfile, ProfileError> {
        let consumed =
            compute_consumption_from(&self.profile, self.conso_per_min, self.start_depth);
        Ok(DiveProfile {
            profile: compute_remaining(&consumed, &self.tank)?,
            ..self.clone()
        })
    }

    /// Recompute absolute times from the segment durations.
    pub fn update_time(&self) -> DiveProfile {
        DiveProfile {
            profile: update_time(&self.profile),
            ..self.clone()
        }
    }

    /// Edit segment `label`. Absolute times and derived columns are left for
    /// [`DiveProfile::recompute`].
    pub fn update_segment(
        &self,
        label: &str,
        edit: &SegmentEdit,
    ) -> Result<DiveProfile, ProfileError> {
        Ok(DiveProfile {
            profile: update_segment(&self.profile, label, edit)?,
            ..self.clone()
        })
    }

    pub fn append_segment(&self, edit: &SegmentEdit) -> Result<DiveProfile, ProfileError> {
        Ok(DiveProfile {
            profile: append_segment(&self.profile, edit)?,
            ..self.clone()
        })
    }

    /// Times, then consumption, then remaining resources.
    pub fn recompute(&self) -> Result<DiveProfile, ProfileError> {
        self.update_time().update_conso()
    }

    pub fn total_conso(&self) -> Result<f64, ProfileError> {
        total_conso(&self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_dive() -> DiveProfile {
        create(
            &[5.0, 20.0, 10.0],
            &[20.0, 20.0, 0.0],
            &ConsoRates::Uniform { rate: 20.0 },
            12.0,
            200.0,
        )
        .unwrap()
    }

    #[test]
    fn test_segment_label() {
        assert_eq!(segment_label(0).unwrap(), "A");
        assert_eq!(segment_label(25).unwrap(), "Z");
        assert!(matches!(
            segment_label(26),
            Err(ProfileError::Configuration(_))
        ));
    }

    #[test]
    fn test_create_assigns_labels_and_times() {
        let dp = reference_dive();
        assert_eq!(dp.profile.labels(), vec!["A", "B", "C"]);
        let times: Vec<f64> = dp.profile.segments.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![5.0, 25.0, 35.0]);
        assert_eq!(dp.conso_per_min, 20.0);
        assert!(dp.profile.segments.iter().all(|s| s.conso_per_min.is_none()));
        assert!(dp.profile.consumption.is_none());
        assert!(dp.profile.remaining.is_none());
    }

    #[test]
    fn test_create_per_segment_rates() {
        let dp = create(
            &[5.0, 10.0],
            &[10.0, 0.0],
            &ConsoRates::PerSegment {
                rates: vec![18.0, 22.0],
            },
            15.0,
            230.0,
        )
        .unwrap();
        assert_eq!(dp.profile.segments[0].conso_per_min, Some(18.0));
        assert_eq!(dp.profile.segments[1].conso_per_min, Some(22.0));
        assert_eq!(dp.tank.volume, 15.0);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let uniform = ConsoRates::Uniform { rate: 20.0 };
        assert!(create(&[], &[], &uniform, 12.0, 200.0).is_err());
        assert!(create(&[5.0, 5.0], &[10.0], &uniform, 12.0, 200.0).is_err());
        assert!(create(&[-1.0], &[10.0], &uniform, 12.0, 200.0).is_err());
        assert!(create(&[5.0], &[-3.0], &uniform, 12.0, 200.0).is_err());
        assert!(create(&[5.0], &[10.0], &uniform, 0.0, 200.0).is_err());
        assert!(create(&[5.0], &[10.0], &ConsoRates::Uniform { rate: 0.0 }, 12.0, 200.0).is_err());
        assert!(create(
            &[5.0, 5.0],
            &[10.0, 10.0],
            &ConsoRates::PerSegment { rates: vec![20.0] },
            12.0,
            200.0
        )
        .is_err());
    }

    #[test]
    fn test_create_capacity_limit() {
        let uniform = ConsoRates::Uniform { rate: 20.0 };
        assert!(create(&[1.0; 26], &[5.0; 26], &uniform, 12.0, 200.0).is_ok());
        let err = create(&[1.0; 27], &[5.0; 27], &uniform, 12.0, 200.0).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration(_)));
    }

    #[test]
    fn test_update_conso_and_total() {
        let dp = reference_dive();
        assert!(matches!(
            dp.total_conso(),
            Err(ProfileError::MissingDependency { .. })
        ));
        let computed = dp.update_conso().unwrap();
        assert!((computed.total_conso().unwrap() - 1800.0).abs() < 1e-9);
        assert!(computed.profile.remaining.is_some());
        // The input snapshot is left as it was.
        assert!(dp.profile.consumption.is_none());
    }

    #[test]
    fn test_with_parameters_invalidates() {
        let computed = reference_dive().update_conso().unwrap();
        let changed = computed.with_parameters(15.0, 230.0, 18.0).unwrap();
        assert!(changed.profile.consumption.is_none());
        assert_eq!(changed.tank.volume, 15.0);
        assert_eq!(changed.conso_per_min, 18.0);

        let recomputed = changed.update_conso().unwrap();
        // 90 surface-equivalent minutes at 18 L/min.
        assert!((recomputed.total_conso().unwrap() - 1620.0).abs() < 1e-9);

        assert!(computed.with_parameters(15.0, -1.0, 18.0).is_err());
    }

    #[test]
    fn test_start_depth_from_config() {
        let config = ProfileConfig {
            start_depth: 10.0,
            ..ProfileConfig::default()
        };
        let dp = create_with_config(
            &[10.0],
            &[10.0],
            &ConsoRates::Uniform { rate: 20.0 },
            &config,
        )
        .unwrap()
        .update_conso()
        .unwrap();
        assert!((dp.total_conso().unwrap() - 400.0).abs() < 1e-9);
    }
}
