use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

lazy_static::lazy_static! {
    static ref SHARED_CLIENT: Result<Client, String> = Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(concat!("picfeed/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| err.to_string());
}

/// One blocking client for every image download.
pub(crate) fn get_shared_client() -> Result<Client> {
    SHARED_CLIENT
        .clone()
        .map_err(anyhow::Error::msg)
        .context("failed to build HTTP client")
}

pub(crate) fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let client = get_shared_client()?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()?;
    Ok(response.bytes()?.to_vec())
}
