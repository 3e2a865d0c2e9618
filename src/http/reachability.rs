//! Default connectivity probe.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::http::Connectivity;

/// Probe request timeout. Offline detection should be quick; a host that
/// cannot answer a HEAD within this budget is treated as unreachable.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP-based reachability probe.
///
/// Sends a HEAD request to the configured URL. Any response — any HTTP
/// status — counts as reachable; only a failed request (connection error,
/// timeout, DNS failure) counts as unreachable. Offline is a normal state,
/// not an error.
pub struct HttpProbe {
    client: reqwest::Client,
    probe_url: String,
}

impl HttpProbe {
    pub fn new(probe_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build probe client: {}", e)))?;
        Ok(Self {
            client,
            probe_url: probe_url.into(),
        })
    }
}

impl Connectivity for HttpProbe {
    async fn is_reachable(&self) -> bool {
        self.client.head(&self.probe_url).send().await.is_ok()
    }
}
