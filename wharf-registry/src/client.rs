//! HTTP access to the registry service.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RegistryError;
use crate::records::{GatewayRecord, ProviderRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where role lists come from.
///
/// [`RegistryClient`] is the production implementation; tests inject
/// scripted sources. Each fetch returns the entire current set for the
/// role, there is no delta protocol.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    async fn fetch_gateways(&self) -> Result<Vec<GatewayRecord>, RegistryError>;
    async fn fetch_providers(&self) -> Result<Vec<ProviderRecord>, RegistryError>;
}

/// Client for the registry's HTTP API.
pub struct RegistryClient {
    base_url: String,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Build a client for the registry at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RegistryError::Client {
                reason: e.to_string(),
            })?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, role: &str) -> Result<Vec<T>, RegistryError> {
        let url = format!("{}/registers/{}", self.base_url, role);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::Fetch {
                reason: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(RegistryError::Fetch {
                reason: format!("{} returned {}", url, response.status()),
            });
        }
        response.json().await.map_err(|e| RegistryError::Fetch {
            reason: e.to_string(),
        })
    }

    async fn post_record<T: Serialize + Sync>(
        &self,
        role: &str,
        record: &T,
    ) -> Result<(), RegistryError> {
        let url = format!("{}/registers/{}", self.base_url, role);
        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| RegistryError::Register {
                reason: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(RegistryError::Register {
                reason: format!("{} returned {}", url, response.status()),
            });
        }
        Ok(())
    }

    /// Submit or update this node's gateway record.
    pub async fn register_gateway(&self, record: &GatewayRecord) -> Result<(), RegistryError> {
        self.post_record("gateway", record).await
    }

    /// Submit or update this node's provider record.
    pub async fn register_provider(&self, record: &ProviderRecord) -> Result<(), RegistryError> {
        self.post_record("provider", record).await
    }
}

#[async_trait]
impl RegistrySource for RegistryClient {
    async fn fetch_gateways(&self) -> Result<Vec<GatewayRecord>, RegistryError> {
        self.get_list("gateway").await
    }

    async fn fetch_providers(&self) -> Result<Vec<ProviderRecord>, RegistryError> {
        self.get_list("provider").await
    }
}
