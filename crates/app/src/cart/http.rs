//! HTTP cart client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use swapper::packages::{PackageLine, PackageSet};
use tracing::debug;

use crate::cart::{errors::CartServiceError, service::CartService};

/// Configuration for connecting to a cart service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCartConfig {
    /// Cart service base URL, e.g. `"http://localhost:8080"`.
    pub base_url: String,

    /// Optional bearer token.
    pub token: Option<String>,

    /// Per-request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

/// Cart service reached over HTTP.
///
/// `PUT {base}/cart/lines` replaces the cart lines, `DELETE {base}/cart/lines`
/// empties the cart.
#[derive(Debug, Clone)]
pub struct HttpCartService {
    config: HttpCartConfig,
    http: Client,
}

#[derive(Debug, Serialize)]
struct CartLinesRequest<'a> {
    lines: &'a [PackageLine],
}

impl HttpCartService {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HttpCartConfig) -> Result<Self, CartServiceError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            http: builder.build()?,
        })
    }

    fn lines_url(&self) -> String {
        format!("{}/cart/lines", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<(), CartServiceError> {
        let request = match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(action, %status, "cart request succeeded");

            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(CartServiceError::Rejected(text));
        }

        Err(CartServiceError::UnexpectedResponse(format!(
            "{action} request failed with status {status}: {text}"
        )))
    }
}

#[async_trait]
impl CartService for HttpCartService {
    async fn swap_cart(&self, packages: PackageSet) -> Result<(), CartServiceError> {
        let request = self.http.put(self.lines_url()).json(&CartLinesRequest {
            lines: packages.as_slice(),
        });

        self.send(request, "swap").await
    }

    async fn clear_cart(&self) -> Result<(), CartServiceError> {
        let request = self.http.delete(self.lines_url());

        self.send(request, "clear").await
    }
}
