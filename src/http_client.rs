use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. The timeout is fixed by whichever call builds it first.
pub fn http_client(timeout_secs: u64) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .user_agent("Mozilla/5.0")
            .build()
            .context("failed to build http client")
    })
}
