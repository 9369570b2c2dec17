//! HTTP client for the orderbook and trade collaborator endpoints.
//!
//! The orchestration layer depends only on the [`ApiClient`] capability;
//! [`HttpApi`] is the reqwest-backed implementation used by the binary.
//! Any rejection, whether transport-level or a structured collaborator
//! error, is treated uniformly as an error carrying a human-readable
//! message.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{BookdeskError, Result};
use crate::models::orderbook::{OrderbookViewModel, RawOrderbook, build_view_model};
use crate::models::trade::{TradeRequest, TradeResponse};
use crate::models::{ApiErrorBody, Asset};

/// Request timeout for both endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Injected capability for talking to the market collaborator.
pub trait ApiClient: Clone + Send + Sync + 'static {
    /// Fetches a fresh snapshot and builds the display view model.
    fn fetch_orderbook(
        &self,
        asset: Asset,
    ) -> impl Future<Output = Result<OrderbookViewModel>> + Send;

    /// Submits an order, resolving to the accepted trade or an error
    /// with a human-readable message.
    fn place_trade(&self, order: TradeRequest)
    -> impl Future<Output = Result<TradeResponse>> + Send;
}

/// reqwest-backed [`ApiClient`] against a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Builds an HTTP client for the given base URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`BookdeskError::Http`] if the underlying client cannot
    /// be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ApiClient for HttpApi {
    async fn fetch_orderbook(&self, asset: Asset) -> Result<OrderbookViewModel> {
        let url = format!("{}/orderbook/{}", self.base_url, asset);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, %asset, "orderbook fetch rejected");
            return Err(BookdeskError::Api {
                status: status.as_u16(),
                message: format!("Failed to fetch orderbook: {status}"),
            });
        }

        let raw: RawOrderbook = response.json().await?;
        info!(%asset, last_updated_id = raw.last_updated_id, "orderbook snapshot received");
        Ok(build_view_model(&raw))
    }

    async fn place_trade(&self, order: TradeRequest) -> Result<TradeResponse> {
        let url = format!("{}/trade", self.base_url);
        info!(
            side = order.side.as_str(),
            quantity = order.quantity,
            notional = order.notional,
            "submitting order"
        );
        let response = self.client.post(&url).json(&order).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the structured {error} body when the collaborator
            // sent one; anything unparsable falls back to the status.
            let body = response.bytes().await.unwrap_or_default();
            let message = match serde_json::from_slice::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) => format!("Failed to place trade: {status}"),
            };
            warn!(%status, %message, "trade rejected");
            return Err(BookdeskError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let accepted: TradeResponse = response.json().await?;
        info!(id = %accepted.id, "order accepted");
        Ok(accepted)
    }
}
