use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use herdwatch::{
    seed,
    view::{format_count, ActivitySummary, AlertVariant},
    FeedConfig, FeedHandle, RandomSource, TokioScheduler,
};
use herdwatch_api_types::FeedSnapshot;
use plotters::prelude::SVGBackend;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Simulated live activity feed for the trending products dashboard
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[arg(long, env = "HERDWATCH_INTERVAL_MS", default_value_t = 3000)]
    interval_ms: u64,
    #[arg(long, env = "HERDWATCH_WINDOW", default_value_t = 30)]
    window: usize,
    #[arg(long, env = "HERDWATCH_TRENDING_LIMIT", default_value_t = 5)]
    trending_limit: usize,
    #[arg(long, env = "HERDWATCH_SPIKE_PROBABILITY", default_value_t = 0.05)]
    spike_probability: f64,
    #[arg(long, env = "HERDWATCH_PRODUCT", default_value = "p1")]
    product: String,
    /// Fixed seed for reproducible runs
    #[arg(long, env = "HERDWATCH_SEED")]
    seed: Option<u64>,
    /// Exit after this many ticks have been published
    #[arg(long, env = "HERDWATCH_TICKS")]
    ticks: Option<u64>,
    /// Start with a full window of back-filled history
    #[arg(long)]
    seeded: bool,
    /// Write an SVG of the final activity window here
    #[arg(long, env = "HERDWATCH_CHART")]
    chart: Option<PathBuf>,
    /// Write an SVG of the final trending list here
    #[arg(long, env = "HERDWATCH_TRENDING_CHART")]
    trending_chart: Option<PathBuf>,
}

impl Args {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            interval_ms: self.interval_ms,
            window: self.window,
            trending_limit: self.trending_limit,
            spike_probability: self.spike_probability,
            product_id: self.product.clone(),
        }
    }
}

fn log_snapshot(snapshot: &FeedSnapshot) {
    let summary = ActivitySummary::of(&snapshot.samples);
    let latest = snapshot.samples.last();
    info!(
        tick = snapshot.tick,
        views = latest.map(|s| s.views),
        carts = latest.map(|s| s.carts),
        window_views = %format_count(summary.total_views),
        conversion = %format!("{:.1}%", summary.conversion_rate * 100.0),
        trending = snapshot.trending.len(),
        "activity"
    );
    if let Some(hot) = snapshot.trending.first() {
        info!(
            "hot: {} ({}) {} vs baseline {} +{:.1}σ",
            hot.name, hot.category, hot.current_activity, hot.baseline, hot.spike_factor
        );
    }
}

fn write_activity_chart(path: &Path, snapshot: &FeedSnapshot) -> Result<()> {
    herdwatch_charts::draw_activity_chart(SVGBackend::new(path, (1024, 480)), &snapshot.samples)
        .map_err(|e| anyhow!(e.to_string()))?;
    info!("wrote activity chart to {}", path.display());
    Ok(())
}

fn write_trending_chart(path: &Path, snapshot: &FeedSnapshot) -> Result<()> {
    herdwatch_charts::draw_trending_chart(SVGBackend::new(path, (1024, 480)), &snapshot.trending)
        .map_err(|e| anyhow!(e.to_string()))?;
    info!("wrote trending chart to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();
    let config = args.feed_config();
    config.validate()?;

    let mut source = RandomSource::from_config(&config, args.seed)?;
    let now = Utc::now();
    let state = if args.seeded {
        seed::seeded_state(&mut source, now, config.window)
    } else {
        seed::initial_state(now)
    };
    for alert in &state.alerts {
        info!(
            "alert [{}|{:?}] {}: {}",
            alert.alert_type.label(),
            AlertVariant::for_alert(alert),
            alert.product_name,
            alert.message
        );
    }

    let feed = FeedHandle::start(&config, state, source, &TokioScheduler)?;
    let mut snapshots = feed.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    info!("type `p` + enter to pause or resume, `q` to quit");
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.mode.is_live() {
                    log_snapshot(&snapshot);
                }
                if args.ticks.is_some_and(|limit| snapshot.tick >= limit) {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match line.trim() {
                        "p" => {
                            let mode = feed.toggle();
                            info!(?mode, "feed toggled");
                        }
                        "q" => break,
                        "" => {}
                        other => warn!("unknown command {other:?}"),
                    },
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        warn!("stdin closed {e}");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let final_snapshot = feed.snapshot();
    feed.shutdown().await;
    if let Some(path) = &args.chart {
        if let Err(e) = write_activity_chart(path, &final_snapshot) {
            warn!("skipped activity chart {}: {e:?}", path.display());
        }
    }
    if let Some(path) = &args.trending_chart {
        if let Err(e) = write_trending_chart(path, &final_snapshot) {
            warn!("skipped trending chart {}: {e:?}", path.display());
        }
    }
    Ok(())
}
