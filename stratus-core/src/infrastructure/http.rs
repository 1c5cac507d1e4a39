//! Shared HTTP client construction

use reqwest::Client;
use std::time::Duration;

/// Build the single client used for both the model endpoint and the weather provider.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("stratus/", env!("CARGO_PKG_VERSION")))
        .build()
}
