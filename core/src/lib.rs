//! churnboard-core — analytics core of a SaaS LTV/churn dashboard.
//!
//! One simulation run flows Generator -> Classifier -> Aggregator ->
//! Series synthesizer and produces an atomic [`snapshot::DashboardSnapshot`].
//! The health scorer and insight client consume segment summaries from
//! that snapshot.

pub mod aggregate;
pub mod baseline;
pub mod cohort;
pub mod config;
pub mod engine;
pub mod error;
pub mod health;
pub mod insight;
pub mod population;
pub mod rng;
pub mod series;
pub mod snapshot;
pub mod store;
pub mod types;
