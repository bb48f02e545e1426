use anyhow::{anyhow, Result};
use picfeed_core::config::FeedConfig;
use picfeed_core::telemetry;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let config = FeedConfig::from_env()?;
    info!(db = %config.paths.db_path.display(), "opening feed store");
    let store = picfeed_core::open_store(&config);

    picfeed_frontend::run_frontend(store).map_err(|err| anyhow!(err.to_string()))
}
