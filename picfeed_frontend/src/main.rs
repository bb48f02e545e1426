use anyhow::{anyhow, Result};
use picfeed_core::{open_store, telemetry, FeedConfig};

fn main() -> Result<()> {
    telemetry::init_tracing();
    let config = FeedConfig::from_env()?;
    let store = open_store(&config);
    picfeed_frontend::run_frontend(store).map_err(|err| anyhow!(err.to_string()))
}
