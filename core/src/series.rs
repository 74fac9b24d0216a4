//! Time-series synthesis — 6-point monthly churn and LTV trends.
//!
//! Churn points for Jan-May are independent uniform draws with no
//! month-to-month continuity; June is the deliberate end-of-period
//! spike (high-risk segments) or dip (everyone else). The LTV ramp is
//! fully deterministic given the segment.

use crate::{
    baseline::{ChurnRisk, Segment},
    rng::SubsystemRng,
    types::SegmentId,
};
use serde::{Deserialize, Serialize};

pub const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnPoint {
    pub month: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnSeries {
    pub segment_id: SegmentId,
    pub points: Vec<ChurnPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtvPoint {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LtvSeries {
    pub segment_id: SegmentId,
    pub points: Vec<LtvPoint>,
}

pub struct SeriesSynthesizer;

impl SeriesSynthesizer {
    pub fn synthesize(segment: &Segment, rng: &mut SubsystemRng) -> (ChurnSeries, LtvSeries) {
        (Self::churn(segment, rng), Self::ltv(segment))
    }

    fn churn(segment: &Segment, rng: &mut SubsystemRng) -> ChurnSeries {
        let points = MONTHS
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let probability = if i < MONTHS.len() - 1 {
                    rng.uniform(0.0, 0.2)
                } else if segment.churn_risk == ChurnRisk::High {
                    rng.uniform(0.6, 0.8)
                } else {
                    rng.uniform(0.05, 0.10)
                };
                ChurnPoint {
                    month: month.to_string(),
                    probability,
                }
            })
            .collect();
        ChurnSeries {
            segment_id: segment.id.clone(),
            points,
        }
    }

    /// Mild upward multiplicative ramp: factor 0.8 + 0.05*i, so the last
    /// point is exactly 1.05x the segment's average LTV.
    fn ltv(segment: &Segment) -> LtvSeries {
        let points = MONTHS
            .iter()
            .enumerate()
            .map(|(i, month)| LtvPoint {
                month: month.to_string(),
                value: (segment.average_lifetime_value * (0.8 + i as f64 * 0.05)).round(),
            })
            .collect();
        LtvSeries {
            segment_id: segment.id.clone(),
            points,
        }
    }
}

/// The static default series shown before the first simulation run.
pub fn default_churn_series() -> Vec<ChurnSeries> {
    let tables: [(&str, [f64; 6]); 3] = [
        ("seg-001", [0.02, 0.02, 0.01, 0.03, 0.02, 0.01]),
        ("seg-002", [0.15, 0.25, 0.40, 0.55, 0.65, 0.72]),
        ("seg-003", [0.10, 0.12, 0.15, 0.20, 0.22, 0.25]),
    ];
    tables
        .iter()
        .map(|(id, probs)| ChurnSeries {
            segment_id: id.to_string(),
            points: MONTHS
                .iter()
                .zip(probs.iter())
                .map(|(month, p)| ChurnPoint {
                    month: month.to_string(),
                    probability: *p,
                })
                .collect(),
        })
        .collect()
}

pub fn default_ltv_series() -> Vec<LtvSeries> {
    let tables: [(&str, [f64; 6]); 3] = [
        ("seg-001", [2_100.0, 2_150.0, 2_200.0, 2_300.0, 2_350.0, 2_400.0]),
        ("seg-002", [90.0, 95.0, 105.0, 110.0, 115.0, 120.0]),
        ("seg-003", [335.0, 338.0, 340.0, 339.0, 340.0, 340.0]),
    ];
    tables
        .iter()
        .map(|(id, values)| LtvSeries {
            segment_id: id.to_string(),
            points: MONTHS
                .iter()
                .zip(values.iter())
                .map(|(month, v)| LtvPoint {
                    month: month.to_string(),
                    value: *v,
                })
                .collect(),
        })
        .collect()
}
