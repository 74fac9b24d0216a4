//! Dashboard snapshot — the atomic output of one simulation run.
//!
//! A snapshot carries all segments plus all series. Each run produces
//! a complete new snapshot that replaces the previous one wholesale;
//! there is no incremental mutation of a prior snapshot.

use crate::{
    baseline::{baseline_segments, Segment},
    series::{default_churn_series, default_ltv_series, ChurnSeries, LtvSeries},
    types::SegmentId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub segments: Vec<Segment>,
    pub churn_series: Vec<ChurnSeries>,
    pub ltv_series: Vec<LtvSeries>,
}

impl DashboardSnapshot {
    /// The static snapshot shown before the first simulation run:
    /// baseline templates with their default mock series.
    pub fn baseline(now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            seed: 0,
            segments: baseline_segments(),
            churn_series: default_churn_series(),
            ltv_series: default_ltv_series(),
        }
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn churn_for(&self, id: &str) -> Option<&ChurnSeries> {
        self.churn_series.iter().find(|s| s.segment_id == id)
    }

    pub fn ltv_for(&self, id: &str) -> Option<&LtvSeries> {
        self.ltv_series.iter().find(|s| s.segment_id == id)
    }

    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.segments.iter().map(|s| s.id.clone()).collect()
    }
}
