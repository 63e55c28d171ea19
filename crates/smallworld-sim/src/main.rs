//! Smallworld simulation binary
//!
//! Builds (or loads) a network and reports how well greedy routing works
//! on it.

mod config;
mod progress;

use rand::rngs::StdRng;
use rand::SeedableRng;
use smallworld_network::{CacheConfig, NetworkBuilder};
use smallworld_routing::RoutingReport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ReportFormat, SimConfig};
use crate::progress::BarProgress;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smallworld=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimConfig::from_env()?;
    tracing::info!(
        "Starting simulation on {:?} ({} attachment)",
        config.params.dimensions,
        config.params.attachment
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let built = NetworkBuilder::new(config.params.clone())
        .with_cache(CacheConfig::new(&config.cache_dir))
        .build(&mut rng, &mut BarProgress::new())?;

    let report = config.simulation.run(&built.network, &mut rng)?;
    match config.report {
        ReportFormat::Text => println!("{}", text_report(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Mean hops, median hops and success rate on one line.
fn text_report(report: &RoutingReport) -> String {
    let stat = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v));
    format!(
        "{} {} {:.3}",
        stat(report.mean_hops),
        stat(report.median_hops),
        report.success_rate
    )
}
