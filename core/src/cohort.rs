//! Cohort classification.
//!
//! Three rule-based filters evaluated independently against the full
//! population. Membership is deliberately NOT a partition: a user can
//! match several rules (a high-bill user who went quiet lands in both
//! power and dormant) or none at all. No rule declares precedence.

use crate::population::SyntheticUser;
use chrono::{DateTime, Duration, Utc};

pub const POWER_BILL_THRESHOLD: f64 = 100.0;
pub const POWER_RECENCY_DAYS: i64 = 7;
pub const AT_RISK_ENGAGEMENT_CEILING: f64 = 30.0;
pub const DORMANT_RECENCY_DAYS: i64 = 30;

/// The three cohorts of one classification pass, borrowing from the
/// population they were filtered from.
pub struct Cohorts<'a> {
    pub power: Vec<&'a SyntheticUser>,
    pub at_risk: Vec<&'a SyntheticUser>,
    pub dormant: Vec<&'a SyntheticUser>,
}

pub struct CohortClassifier {
    seven_days_ago: DateTime<Utc>,
    thirty_days_ago: DateTime<Utc>,
}

impl CohortClassifier {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            seven_days_ago: now - Duration::days(POWER_RECENCY_DAYS),
            thirty_days_ago: now - Duration::days(DORMANT_RECENCY_DAYS),
        }
    }

    pub fn classify<'a>(&self, users: &'a [SyntheticUser]) -> Cohorts<'a> {
        Cohorts {
            power: users.iter().filter(|u| self.is_power(u)).collect(),
            at_risk: users.iter().filter(|u| self.is_at_risk(u)).collect(),
            dormant: users.iter().filter(|u| self.is_dormant(u)).collect(),
        }
    }

    /// High spend and active within the last week.
    fn is_power(&self, u: &SyntheticUser) -> bool {
        u.monthly_bill > POWER_BILL_THRESHOLD && u.last_login_date > self.seven_days_ago
    }

    /// Low engagement but still logging in within the last 30 days.
    fn is_at_risk(&self, u: &SyntheticUser) -> bool {
        u.engagement_score < AT_RISK_ENGAGEMENT_CEILING
            && u.last_login_date > self.thirty_days_ago
    }

    /// No login for more than 30 days.
    fn is_dormant(&self, u: &SyntheticUser) -> bool {
        u.last_login_date <= self.thirty_days_ago
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{OrgSize, Region};

    fn user(bill: f64, engagement: f64, login_days_ago: i64, now: DateTime<Utc>) -> SyntheticUser {
        SyntheticUser {
            id: "u-000000".to_string(),
            join_date: now - Duration::days(365),
            last_login_date: now - Duration::days(login_days_ago),
            total_spend: bill * 12.0,
            monthly_bill: bill,
            region: Region::NorthAmerica,
            org_size: OrgSize::Small,
            engagement_score: engagement,
        }
    }

    #[test]
    fn rules_can_overlap() {
        let now = Utc::now();
        // Low engagement, recent login, high bill: power AND at-risk.
        let users = vec![user(150.0, 10.0, 1, now)];
        let cohorts = CohortClassifier::new(now).classify(&users);
        assert_eq!(cohorts.power.len(), 1);
        assert_eq!(cohorts.at_risk.len(), 1);
        assert_eq!(cohorts.dormant.len(), 0);
    }

    #[test]
    fn a_user_can_match_no_rule() {
        let now = Utc::now();
        // Modest bill, healthy engagement, seen recently: nowhere.
        let users = vec![user(40.0, 70.0, 2, now)];
        let cohorts = CohortClassifier::new(now).classify(&users);
        assert!(cohorts.power.is_empty());
        assert!(cohorts.at_risk.is_empty());
        assert!(cohorts.dormant.is_empty());
    }

    #[test]
    fn dormancy_starts_past_thirty_days() {
        let now = Utc::now();
        let users = vec![user(40.0, 70.0, 31, now), user(40.0, 70.0, 29, now)];
        let cohorts = CohortClassifier::new(now).classify(&users);
        assert_eq!(cohorts.dormant.len(), 1);
        assert_eq!(cohorts.dormant[0].last_login_date, users[0].last_login_date);
    }
}
