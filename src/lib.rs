pub mod calculator;
pub mod chart;
pub mod config;
pub mod editor;
pub mod error;
pub mod formatter;
pub mod models;
pub mod profile;
pub mod session;

uniffi::setup_scaffolding!();

pub use calculator::{
    ambient_pressure, compute_consumption, compute_consumption_from, compute_remaining,
    segment_consumption, total_conso,
};
pub use chart::{chart_series, AxisRange, ChartPoint, ChartSeries, SegmentAnchor};
pub use config::ProfileConfig;
pub use editor::{append_segment, update_segment, update_time};
pub use error::ProfileError;
pub use formatter::{format_profile, ColumnHeader, Direction, SummaryRow, SummaryTable};
pub use models::{
    ConsoRates, ConsumptionColumns, DiveProfile, Profile, RemainingColumns, Segment, SegmentEdit,
    Tank,
};
pub use profile::{create, create_with_config, segment_label, MAX_SEGMENTS};
pub use session::DiveSession;
