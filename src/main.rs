//! Process entry: the classic construction-site wiring.

use std::sync::Arc;

use anyhow::Context as _;
use tracing::info;

use foreman::actions;
use foreman::config::EngineConfig;
use foreman::core::error::AppResult;
use foreman::orchestrator::Orchestrator;
use foreman::sim::RandomEnvironment;
use foreman::util::telemetry::init_tracing;

fn main() -> AppResult<()> {
    init_tracing();

    let site = Orchestrator::start(
        EngineConfig::construction_site(),
        Arc::new(RandomEnvironment),
    )
    .context("failed to start the site")?;

    let ctx = site.context();
    site.submit(actions::urgent_repairs());
    site.submit(actions::foundation_laying());
    site.submit(actions::critical_structural_work());
    site.submit(actions::general_construction());
    site.submit(actions::laying_bricks(Arc::clone(&ctx)));
    site.submit(actions::mixing_cement(Arc::clone(&ctx)));
    site.submit(actions::finishing_touches());
    site.submit(actions::aesthetic_elements());

    info!("tasks created and queued");

    // Runs until something external trips the depletion flag.
    site.join();
    Ok(())
}
