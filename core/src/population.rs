//! Synthetic population generation.
//!
//! Produces distribution-shaped user records for one simulation run.
//! Records are ephemeral: they feed the classifier and aggregator and
//! are discarded once the snapshot is built.
//!
//! Two independent Bernoulli draws shape each user's archetype:
//! power users (30%) bill high and engage high; churned-looking users
//! (15%) have not logged in for 30-120 days. The draws are independent,
//! so a user can be both.

use crate::{
    baseline::{OrgSize, Region},
    rng::SubsystemRng,
    types::UserId,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const POWER_USER_PROBABILITY: f64 = 0.30;
pub const CHURNED_LOOK_PROBABILITY: f64 = 0.15;
pub const MAX_TENURE_DAYS: u64 = 730;
pub const MONTHLY_BILL_FLOOR: f64 = 10.0;

const REGION_WEIGHTS: [f64; 3] = [0.50, 0.25, 0.25];
const REGIONS: [Region; 3] = [Region::NorthAmerica, Region::Europe, Region::Apac];
const ORG_SIZE_WEIGHTS: [f64; 3] = [0.40, 0.30, 0.30];
const ORG_SIZES: [OrgSize; 3] = [OrgSize::Small, OrgSize::Medium, OrgSize::Large];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticUser {
    pub id: UserId,
    pub join_date: DateTime<Utc>,
    pub last_login_date: DateTime<Utc>,
    pub total_spend: f64,
    pub monthly_bill: f64,
    pub region: Region,
    pub org_size: OrgSize,
    /// Nominally 0-100 but deliberately not clamped; the normal draw
    /// can run past either end.
    pub engagement_score: f64,
}

pub struct PopulationGenerator {
    now: DateTime<Utc>,
}

impl PopulationGenerator {
    /// `now` is captured once per run so the whole population is a pure
    /// function of (seed, now).
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Generate exactly `count` users, each drawn independently.
    pub fn generate(&self, count: usize, rng: &mut SubsystemRng) -> Vec<SyntheticUser> {
        let mut users = Vec::with_capacity(count);
        for i in 0..count {
            users.push(self.generate_one(i, rng));
        }
        users
    }

    fn generate_one(&self, index: usize, rng: &mut SubsystemRng) -> SyntheticUser {
        let is_power_user = rng.chance(POWER_USER_PROBABILITY);
        let is_churned_look = rng.chance(CHURNED_LOOK_PROBABILITY);

        let days_since_join = rng.next_u64_below(MAX_TENURE_DAYS);
        let join_date = self.now - Duration::days(days_since_join as i64);

        let days_since_login = if is_churned_look {
            30 + rng.next_u64_below(90)
        } else {
            rng.next_u64_below(7)
        };
        let last_login_date = self.now - Duration::days(days_since_login as i64);

        let base_bill = if is_power_user { 150.0 } else { 30.0 };
        let monthly_bill = rng.normal(base_bill, base_bill * 0.2).max(MONTHLY_BILL_FLOOR);

        // Monthly bill compounded over elapsed months, minimum one month.
        let months_active = (days_since_join as f64 / 30.0).max(1.0);
        let total_spend = monthly_bill * months_active;

        let region = REGIONS[rng.weighted_index(&REGION_WEIGHTS)];
        let org_size = ORG_SIZES[rng.weighted_index(&ORG_SIZE_WEIGHTS)];

        let engagement_score = if is_power_user {
            rng.normal(85.0, 10.0)
        } else {
            rng.normal(40.0, 20.0)
        };

        SyntheticUser {
            id: format!("u-{index:06}"),
            join_date,
            last_login_date,
            total_spend,
            monthly_bill,
            region,
            org_size,
            engagement_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};

    fn rng() -> SubsystemRng {
        RngBank::new(12345).for_subsystem(SubsystemSlot::Population)
    }

    #[test]
    fn tenure_never_exceeds_two_years() {
        let now = Utc::now();
        let users = PopulationGenerator::new(now).generate(500, &mut rng());
        for u in users {
            let days = (now - u.join_date).num_days();
            assert!((0..730).contains(&days), "tenure {days} days out of range");
        }
    }

    #[test]
    fn login_recency_splits_into_two_windows() {
        let now = Utc::now();
        let users = PopulationGenerator::new(now).generate(2_000, &mut rng());
        let mut stale = 0usize;
        for u in &users {
            let days = (now - u.last_login_date).num_days();
            assert!(
                (0..7).contains(&days) || (30..120).contains(&days),
                "login recency {days} days falls in neither window"
            );
            if days >= 30 {
                stale += 1;
            }
        }
        // ~15% churned-looking; allow generous slack for a 2000-draw sample.
        let share = stale as f64 / users.len() as f64;
        assert!(
            (0.10..0.20).contains(&share),
            "churned-look share {share:.3} far from 0.15"
        );
    }

    #[test]
    fn ids_are_sequence_unique() {
        let users = PopulationGenerator::new(Utc::now()).generate(100, &mut rng());
        assert_eq!(users[0].id, "u-000000");
        assert_eq!(users[99].id, "u-000099");
    }
}
