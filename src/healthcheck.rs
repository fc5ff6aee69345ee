use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

/// Port used when `CINECATALOG_HTTP_BIND` is unset or unparsable.
const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Error)]
#[error("healthcheck failed: {0}")]
pub struct HealthcheckError(String);

/// Probes the local liveness endpoint on the configured port.
///
/// # Errors
/// Fails when the request cannot be sent or the endpoint is not 2xx.
pub async fn healthcheck() -> Result<(), HealthcheckError> {
    let port = env::var("CINECATALOG_HTTP_BIND")
        .ok()
        .and_then(|raw| raw.parse::<SocketAddr>().ok())
        .map_or(DEFAULT_HTTP_PORT, |addr| addr.port());
    healthcheck_with_port(port).await
}

/// # Errors
/// Fails when the request cannot be sent or the endpoint is not 2xx.
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| HealthcheckError(format!("failed to create HTTP client: {e}")))?;

    let url = format!("http://127.0.0.1:{port}/health/live");

    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| HealthcheckError(format!("request failed: {e}")))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError(format!(
            "health endpoint returned status: {}",
            resp.status()
        )))
    }
}
