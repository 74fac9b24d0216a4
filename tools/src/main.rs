//! dash-runner: headless dashboard runner for churnboard.
//!
//! Usage:
//!   dash-runner --seed 12345
//!   dash-runner --seed 12345 --count 5000 --db dash.db --select seg-002
//!   dash-runner --seed 12345 --config config.json --insights
//!   dash-runner --seed 12345 --json   # emit the raw snapshot instead

use anyhow::Result;
use chrono::Utc;
use churnboard_core::{
    config::SimConfig,
    engine::Dashboard,
    health,
    insight::InsightClient,
    store::DashStore,
};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let config_path = str_arg(&args, "--config");
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let select = str_arg(&args, "--select");
    let want_insights = args.iter().any(|a| a == "--insights");
    let want_json = args.iter().any(|a| a == "--json");

    let mut config = match config_path {
        Some(p) => SimConfig::load(Path::new(p))?,
        None => SimConfig::default(),
    };
    if let Some(count) = args
        .windows(2)
        .find(|w| w[0] == "--count")
        .and_then(|w| w[1].parse().ok())
    {
        config.population_size = count;
    }

    if !want_json {
        println!("churnboard — dash-runner");
        println!("  seed:       {seed}");
        println!("  population: {}", config.population_size);
        println!("  db:         {db}");
        println!();
    }

    let insight_config = config.insight.clone();
    let store = DashStore::open(db)?;
    let mut dashboard = Dashboard::open(config, store, Utc::now())?;

    if let Some(id) = select {
        dashboard.select_segment(id)?;
    }

    if let Err(e) = dashboard.refresh(seed, Utc::now()) {
        log::error!("simulation failed: {e}");
        println!("simulation failed, showing prior snapshot");
    }

    if want_json {
        println!("{}", serde_json::to_string_pretty(dashboard.snapshot())?);
    } else {
        print_summary(&dashboard);
    }

    if want_insights {
        let client = InsightClient::new(&insight_config);
        let segment = dashboard.selected_segment();
        let out = client.segment_insights(segment).await;
        println!();
        println!("=== AI INSIGHT ({}) ===", segment.name);
        println!("  insight:        {}", out.insight);
        println!("  recommendation: {}", out.recommendation);
        println!("  confidence:     {:.1}", out.confidence);
    }

    Ok(())
}

fn print_summary(dashboard: &Dashboard) {
    let snapshot = dashboard.snapshot();
    println!("=== SEGMENT SUMMARY ===");
    for seg in &snapshot.segments {
        let report = health::score(seg);
        let marker = if seg.id == dashboard.selected_segment_id() {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<12} | customers: {:>6} | LTV: ${:>7.0} | ARPU: ${:>5.0} | CAC: ${:>5.0} | health: {:>3} ({})",
            seg.name,
            seg.total_customers,
            seg.average_lifetime_value,
            seg.arpu,
            seg.cac,
            report.score,
            report.status,
        );
        for reason in &report.reasons {
            println!("      - {reason}");
        }
    }

    println!();
    println!("=== CHURN OUTLOOK (Jun) ===");
    for id in snapshot.segment_ids() {
        if let Some(series) = snapshot.churn_for(&id) {
            let june = series.points.last().map(|p| p.probability).unwrap_or(0.0);
            println!("  {id}: {:.1}%", june * 100.0);
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
