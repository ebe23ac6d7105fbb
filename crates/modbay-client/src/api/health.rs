//! Health API.

use crate::client::ModbayClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::HealthStatus;

/// Health API client.
pub struct HealthApi {
    client: ModbayClient,
}

impl HealthApi {
    pub(crate) fn new(client: ModbayClient) -> Self {
        Self { client }
    }

    /// Probe the API for liveness.
    pub async fn check(&self) -> Result<Envelope<HealthStatus>> {
        self.client.get("health").await
    }

    /// Simple connectivity check - returns true when the server answers
    /// with a healthy status.
    pub async fn is_healthy(&self) -> bool {
        match self.check().await {
            Ok(envelope) => envelope.data().map(HealthStatus::is_ok).unwrap_or(false),
            Err(_) => false,
        }
    }
}
