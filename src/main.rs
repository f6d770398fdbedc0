use anyhow::Context;
use njlottery_ev::api::{self, HttpTransport};
use njlottery_ev::config::Config;
use njlottery_ev::report;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NJLOTTERY_CONFIG").ok());
    let mut cfg = Config::resolve(explicit.as_deref())?;
    cfg.apply_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.general.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        mode = ?cfg.report.mode,
        policy = %cfg.report.policy,
        "Loaded config"
    );

    let transport = HttpTransport::new(&cfg.api)?;
    let catalog = api::fetch_catalog(&transport, &cfg.api).await?;

    let reports = report::evaluate(&catalog, &cfg.report.policy);
    info!("{} active games", reports.len());

    let out = report::render(&reports, cfg.report.mode);
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(out.as_bytes())
        .context("Failed to write report")?;
    stdout.flush()?;

    Ok(())
}
