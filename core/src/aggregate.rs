//! Metrics aggregation — cohort rows into a segment summary.
//!
//! Each derived Segment starts as a full copy of its baseline template.
//! Only the financial fields are overwritten:
//!   - total_customers, average_lifetime_value, arpu from the cohort,
//!   - cac as a random jitter around the static baseline (the synthetic
//!     population carries no acquisition data, so CAC is never derived
//!     from it),
//!   - expansion_rate drawn for the power segment only.
//! An empty cohort returns the baseline unchanged — never a division
//! by zero.

use crate::{
    baseline::{Segment, POWER_SEGMENT_ID},
    population::SyntheticUser,
    rng::SubsystemRng,
};

pub const CAC_JITTER_LO: f64 = 0.9;
pub const CAC_JITTER_HI: f64 = 1.1;
pub const EXPANSION_LO: f64 = 0.02;
pub const EXPANSION_HI: f64 = 0.05;

pub struct MetricsAggregator;

impl MetricsAggregator {
    pub fn aggregate(
        cohort: &[&SyntheticUser],
        baseline: &Segment,
        rng: &mut SubsystemRng,
    ) -> Segment {
        if cohort.is_empty() {
            return baseline.clone();
        }

        let n = cohort.len() as f64;
        let avg_ltv = cohort.iter().map(|u| u.total_spend).sum::<f64>() / n;
        let avg_arpu = cohort.iter().map(|u| u.monthly_bill).sum::<f64>() / n;

        let cac = baseline.cac * rng.uniform(CAC_JITTER_LO, CAC_JITTER_HI);

        let expansion_rate = if baseline.id == POWER_SEGMENT_ID {
            rng.uniform(EXPANSION_LO, EXPANSION_HI)
        } else {
            0.0
        };

        Segment {
            total_customers: cohort.len() as u64,
            average_lifetime_value: avg_ltv.round(),
            arpu: avg_arpu.round(),
            cac: cac.round(),
            expansion_rate,
            ..baseline.clone()
        }
    }
}
