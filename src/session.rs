//! The hosting slot for the current profile snapshot.
//!
//! The UI layer holds one [`DiveSession`]. Each operation reads the current
//! snapshot, builds a fully recomputed replacement and swaps it in. A failed
//! operation leaves the previous snapshot and revision in place.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::chart::{chart_series, ChartSeries};
use crate::config::ProfileConfig;
use crate::error::ProfileError;
use crate::formatter::{format_profile, SummaryTable};
use crate::models::{ConsoRates, DiveProfile, SegmentEdit};
use crate::profile::create_with_config;

struct Slot {
    current: Arc<DiveProfile>,
    revision: u64,
}

#[derive(uniffi::Object)]
pub struct DiveSession {
    slot: RwLock<Slot>,
}

impl DiveSession {
    /// Start a session from an already computed snapshot.
    pub fn from_profile(profile: DiveProfile) -> Self {
        Self {
            slot: RwLock::new(Slot {
                current: Arc::new(profile),
                revision: 0,
            }),
        }
    }

    pub fn current(&self) -> Arc<DiveProfile> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&slot.current)
    }

    /// Compute a replacement from the current snapshot and swap it in.
    /// The write lock is held throughout so concurrent updates serialize.
    fn replace<F>(&self, action: &'static str, update: F) -> Result<Arc<DiveProfile>, ProfileError>
    where
        F: FnOnce(&DiveProfile) -> Result<DiveProfile, ProfileError>,
    {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        let result = update(slot.current.as_ref());
        match result {
            Ok(next) => {
                let next = Arc::new(next);
                slot.current = Arc::clone(&next);
                slot.revision += 1;
                info!(
                    action,
                    revision = slot.revision,
                    segments = next.profile.len(),
                    "profile replaced"
                );
                Ok(next)
            }
            Err(err) => {
                warn!(action, error = %err, "profile update rejected");
                Err(err)
            }
        }
    }
}

#[uniffi::export]
impl DiveSession {
    /// Create the initial profile and compute it.
    #[uniffi::constructor]
    pub fn new(
        config: ProfileConfig,
        times: Vec<f64>,
        depths: Vec<f64>,
        rates: ConsoRates,
    ) -> Result<Arc<Self>, ProfileError> {
        let profile = create_with_config(&times, &depths, &rates, &config)?.recompute()?;
        info!(segments = profile.profile.len(), "session started");
        Ok(Arc::new(Self::from_profile(profile)))
    }

    pub fn snapshot(&self) -> DiveProfile {
        self.current().as_ref().clone()
    }

    /// Number of successful replacements since the session started.
    pub fn revision(&self) -> u64 {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).revision
    }

    pub fn segment_labels(&self) -> Vec<String> {
        self.current().profile.labels()
    }

    pub fn set_parameters(
        &self,
        volume: f64,
        pressure: f64,
        conso_per_min: f64,
    ) -> Result<DiveProfile, ProfileError> {
        self.replace("set_parameters", |dive| {
            dive.with_parameters(volume, pressure, conso_per_min)?
                .recompute()
        })
        .map(|dive| dive.as_ref().clone())
    }

    pub fn edit_segment(
        &self,
        label: String,
        time_interval: f64,
        depth: f64,
        conso_per_min: Option<f64>,
    ) -> Result<DiveProfile, ProfileError> {
        let edit = SegmentEdit {
            time_interval,
            depth,
            conso_per_min,
        };
        self.replace("edit_segment", |dive| {
            dive.update_segment(&label, &edit)?.recompute()
        })
        .map(|dive| dive.as_ref().clone())
    }

    pub fn append_segment(
        &self,
        time_interval: f64,
        depth: f64,
        conso_per_min: Option<f64>,
    ) -> Result<DiveProfile, ProfileError> {
        let edit = SegmentEdit {
            time_interval,
            depth,
            conso_per_min,
        };
        self.replace("append_segment", |dive| dive.append_segment(&edit)?.recompute())
            .map(|dive| dive.as_ref().clone())
    }

    pub fn summary_table(&self, include_start: bool) -> Result<SummaryTable, ProfileError> {
        format_profile(&self.current(), include_start)
    }

    pub fn chart_series(&self) -> Result<ChartSeries, ProfileError> {
        chart_series(&self.current())
    }

    pub fn total_conso(&self) -> Result<f64, ProfileError> {
        self.current().total_conso()
    }
}
