//! Unit-economics health scoring.
//!
//! Pure deduction rules over a segment summary. All matching rules
//! deduct; nothing is exclusive. The expansion-rate rule compares the
//! raw fraction against a literal 5 — the dashboard has always behaved
//! this way, so the threshold is kept as-is rather than rescaled to
//! percentage units.

use crate::baseline::{ChurnRisk, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LTV_CAC_FLOOR: f64 = 3.0;
pub const PAYBACK_CEILING_MONTHS: f64 = 12.0;
pub const EXPANSION_FLOOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    Healthy,
    AtRisk,
    Critical,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::AtRisk => write!(f, "at-risk"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u32,
    pub status: HealthStatus,
    /// One entry per matched rule, in rule order.
    pub reasons: Vec<String>,
}

/// Score a segment's unit economics: 100 minus additive deductions,
/// floored at 0. Pure function of the segment.
pub fn score(segment: &Segment) -> HealthReport {
    let mut score: i32 = 100;
    let mut reasons = Vec::new();

    let ltv_cac = segment.ltv_cac_ratio();
    if ltv_cac < LTV_CAC_FLOOR {
        score -= 30;
        reasons.push(format!("LTV:CAC ratio ({ltv_cac:.1}) below 3:1 threshold"));
    }

    let payback = segment.payback_months();
    if payback > PAYBACK_CEILING_MONTHS {
        score -= 25;
        reasons.push(format!(
            "CAC payback period ({payback:.1} months) exceeds 12 months"
        ));
    }

    match segment.churn_risk {
        ChurnRisk::High => {
            score -= 25;
            reasons.push("High churn risk segment".to_string());
        }
        ChurnRisk::Medium => {
            score -= 10;
            reasons.push("Medium churn risk segment".to_string());
        }
        ChurnRisk::Low => {}
    }

    if segment.expansion_rate < EXPANSION_FLOOR {
        score -= 10;
        reasons.push("Low expansion revenue (< 5%)".to_string());
    }

    let score = score.max(0) as u32;
    let status = if score >= 80 {
        HealthStatus::Healthy
    } else if score >= 60 {
        HealthStatus::AtRisk
    } else {
        HealthStatus::Critical
    };

    HealthReport {
        score,
        status,
        reasons,
    }
}
