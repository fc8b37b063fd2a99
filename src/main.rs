use anyhow::{Context, Result};
use community_ev_scheduler::config::Config;
use community_ev_scheduler::optimizer::{CommunityScheduler, OptimizeRequest};
use community_ev_scheduler::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    let path = std::env::args()
        .nth(1)
        .context("usage: community-ev-scheduler <request.json>")?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading request from {path}"))?;
    let mut request: OptimizeRequest =
        serde_json::from_str(&raw).context("parsing request JSON")?;

    // Requests without their own weights/limits fall back to deployment
    // configuration.
    if request.weights.is_none() {
        request.weights = Some(cfg.weights);
    }
    if request.ev_limits.is_none() {
        request.ev_limits = Some(cfg.ev_limits);
    }

    info!(
        households = request.households.len(),
        evs = request.evs.len(),
        horizon = request.horizon_slots,
        "running community schedule optimization"
    );

    let scheduler = CommunityScheduler::default();
    let result = scheduler.optimize(&request).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
