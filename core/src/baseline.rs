//! Segment data model and the immutable baseline templates.
//!
//! RULE: Every derived Segment starts as a full copy of the baseline
//! template for its cohort id. The aggregator may overwrite only
//! total_customers, average_lifetime_value, arpu, cac, and expansion_rate.
//! Everything else (name, description, churn_risk, color, org_size,
//! region) is inherited verbatim and never recomputed from data.

use crate::types::SegmentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The one cohort id whose aggregation draws a nonzero expansion rate.
pub const POWER_SEGMENT_ID: &str = "seg-001";
pub const AT_RISK_SEGMENT_ID: &str = "seg-002";
pub const DORMANT_SEGMENT_ID: &str = "seg-003";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChurnRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for ChurnRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    #[serde(rename = "APAC")]
    Apac,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NorthAmerica => write!(f, "North America"),
            Self::Europe => write!(f, "Europe"),
            Self::Apac => write!(f, "APAC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for OrgSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "Small"),
            Self::Medium => write!(f, "Medium"),
            Self::Large => write!(f, "Large"),
        }
    }
}

/// A segment-level summary as consumed by the dashboard.
/// Field names serialize in camelCase to match the dashboard wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub name: String,
    pub description: String,
    pub total_customers: u64,
    pub average_lifetime_value: f64,
    pub cac: f64,
    pub arpu: f64,
    /// Monthly expansion revenue as a raw fraction (0.035 = 3.5%).
    pub expansion_rate: f64,
    pub churn_risk: ChurnRisk,
    pub color: String,
    pub org_size: OrgSize,
    pub region: Region,
}

impl Segment {
    pub fn ltv_cac_ratio(&self) -> f64 {
        self.average_lifetime_value / self.cac
    }

    /// CAC payback period in months (cac / arpu).
    pub fn payback_months(&self) -> f64 {
        self.cac / self.arpu
    }
}

/// The three immutable baseline templates, in display order.
pub fn baseline_segments() -> Vec<Segment> {
    vec![
        Segment {
            id: POWER_SEGMENT_ID.to_string(),
            name: "Power Users".to_string(),
            description: "High daily activity, >30 days retention".to_string(),
            total_customers: 12_450,
            average_lifetime_value: 2_400.0,
            cac: 450.0,
            arpu: 120.0,
            expansion_rate: 0.035,
            churn_risk: ChurnRisk::Low,
            color: "#10b981".to_string(),
            org_size: OrgSize::Large,
            region: Region::NorthAmerica,
        },
        Segment {
            id: AT_RISK_SEGMENT_ID.to_string(),
            name: "At-Risk New".to_string(),
            description: "Joined < 7 days, declining activity".to_string(),
            total_customers: 4_320,
            average_lifetime_value: 120.0,
            cac: 300.0,
            arpu: 15.0,
            expansion_rate: 0.0,
            churn_risk: ChurnRisk::High,
            color: "#ef4444".to_string(),
            org_size: OrgSize::Small,
            region: Region::Europe,
        },
        Segment {
            id: DORMANT_SEGMENT_ID.to_string(),
            name: "Dormant".to_string(),
            description: "No activity in last 14 days".to_string(),
            total_customers: 8_900,
            average_lifetime_value: 340.0,
            cac: 200.0,
            arpu: 25.0,
            expansion_rate: 0.005,
            churn_risk: ChurnRisk::Medium,
            color: "#f59e0b".to_string(),
            org_size: OrgSize::Large,
            region: Region::Apac,
        },
    ]
}
