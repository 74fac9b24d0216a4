//! The simulation engine and the dashboard snapshot lifecycle.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Population generator
//!   2. Cohort classifier
//!   3. Metrics aggregator (one pass per baseline segment)
//!   4. Series synthesizer (one pass per derived segment)
//!
//! RULES:
//!   - A run is single-threaded and runs to completion.
//!   - All randomness flows through the RngBank; `now` is captured once,
//!     so a run is a pure function of (config, seed, now).
//!   - A run produces one complete snapshot; the Dashboard swaps it in
//!     wholesale or, when the run fails, keeps the prior snapshot.

use crate::{
    aggregate::MetricsAggregator,
    baseline::baseline_segments,
    cohort::CohortClassifier,
    config::SimConfig,
    error::{SimError, SimResult},
    population::PopulationGenerator,
    rng::{RngBank, SubsystemSlot},
    series::SeriesSynthesizer,
    snapshot::DashboardSnapshot,
    store::DashStore,
    types::SegmentId,
};
use chrono::{DateTime, Utc};

pub struct SimEngine {
    config: SimConfig,
}

impl SimEngine {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Run one full simulation pass and build the snapshot.
    pub fn run(&self, seed: u64, now: DateTime<Utc>) -> SimResult<DashboardSnapshot> {
        let rng_bank = RngBank::new(seed);

        let mut pop_rng = rng_bank.for_subsystem(SubsystemSlot::Population);
        let users =
            PopulationGenerator::new(now).generate(self.config.population_size, &mut pop_rng);
        log::debug!("seed={seed} generated {} synthetic users", users.len());

        let cohorts = CohortClassifier::new(now).classify(&users);
        log::info!(
            "seed={seed} cohorts: power={} at_risk={} dormant={}",
            cohorts.power.len(),
            cohorts.at_risk.len(),
            cohorts.dormant.len()
        );

        let baselines = baseline_segments();
        let mut agg_rng = rng_bank.for_subsystem(SubsystemSlot::Aggregation);
        let segments = vec![
            MetricsAggregator::aggregate(&cohorts.power, &baselines[0], &mut agg_rng),
            MetricsAggregator::aggregate(&cohorts.at_risk, &baselines[1], &mut agg_rng),
            MetricsAggregator::aggregate(&cohorts.dormant, &baselines[2], &mut agg_rng),
        ];

        let mut series_rng = rng_bank.for_subsystem(SubsystemSlot::Series);
        let mut churn_series = Vec::with_capacity(segments.len());
        let mut ltv_series = Vec::with_capacity(segments.len());
        for segment in &segments {
            let (churn, ltv) = SeriesSynthesizer::synthesize(segment, &mut series_rng);
            churn_series.push(churn);
            ltv_series.push(ltv);
        }

        Ok(DashboardSnapshot {
            generated_at: now,
            seed,
            segments,
            churn_series,
            ltv_series,
        })
    }
}

/// The headless dashboard: current snapshot plus the persisted segment
/// selection.
pub struct Dashboard {
    engine: SimEngine,
    store: DashStore,
    snapshot: DashboardSnapshot,
    selected_segment_id: SegmentId,
}

impl Dashboard {
    /// Start from the static baseline snapshot, restoring the persisted
    /// selection (or falling back to the first segment id).
    pub fn open(config: SimConfig, store: DashStore, now: DateTime<Utc>) -> SimResult<Self> {
        store.migrate()?;
        let snapshot = DashboardSnapshot::baseline(now);
        let selected_segment_id = store.load_selected_segment(&snapshot.segment_ids())?;
        Ok(Self {
            engine: SimEngine::new(config),
            store,
            snapshot,
            selected_segment_id,
        })
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn selected_segment_id(&self) -> &str {
        &self.selected_segment_id
    }

    pub fn selected_segment(&self) -> &crate::baseline::Segment {
        // The selection is validated on load and on change, so it always
        // resolves against the current snapshot.
        self.snapshot
            .segment(&self.selected_segment_id)
            .expect("selection validated against snapshot")
    }

    /// Change the selection and persist it.
    pub fn select_segment(&mut self, id: &str) -> SimResult<()> {
        if self.snapshot.segment(id).is_none() {
            return Err(SimError::UnknownSegment { id: id.to_string() });
        }
        self.selected_segment_id = id.to_string();
        self.store.save_selected_segment(id)?;
        Ok(())
    }

    /// Run a fresh simulation and swap the snapshot in wholesale.
    /// On failure the prior snapshot is retained unchanged.
    pub fn refresh(&mut self, seed: u64, now: DateTime<Utc>) -> SimResult<()> {
        match self.engine.run(seed, now) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                log::warn!("simulation failed, keeping prior snapshot: {e}");
                Err(e)
            }
        }
    }
}
