//! HTTP client for the recommendation backend
//!
//! Every operation returns either its typed success payload or a uniform
//! failure carrying a short per-operation label and the transport detail.
//! A non-2xx status is mapped to the failure signal before any attempt to
//! parse the body as the success shape, so parse errors never masquerade
//! as backend messages.

pub mod types;

pub use types::{
    ApiMessage, LoginRequest, RatingEntry, RatingRequest, Recommendation, RecommendRequest,
    RecommendedBuild, RegisterRequest, RegisteredUser, SavedBuild, TokenPair, UserProfile,
    UserRatings,
};

use crate::config::ApiConfig;
use crate::error::{PcforgeError, Result};
use types::SavedBuildsResponse;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the recommendation backend
///
/// The base URL is configurable so tests can point the client at a mock
/// server.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("pcforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PcforgeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a recommendation query
    ///
    /// Unauthenticated; `user_id` in the request is a best-effort label.
    pub async fn recommend(&self, request: &RecommendRequest) -> Result<Recommendation> {
        tracing::debug!(
            "Requesting recommendation: budget={} query={:?} user={}",
            request.budget,
            request.query,
            request.user_id
        );
        self.execute(
            "recommendation unavailable",
            self.client.post(self.endpoint("api/recommend")).json(request),
        )
        .await
    }

    /// Register a new account
    ///
    /// A duplicate username or email is a backend rejection and surfaces
    /// under the same failure label as any other registration error.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser> {
        self.execute(
            "registration failed",
            self.client.post(self.endpoint("auth/register")).json(request),
        )
        .await
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenPair> {
        self.execute(
            "login failed",
            self.client.post(self.endpoint("auth/login")).json(request),
        )
        .await
    }

    /// Persist a build to the authenticated user's account
    pub async fn save_build(&self, token: &str, build: &SavedBuild) -> Result<ApiMessage> {
        self.execute(
            "save failed",
            self.client
                .post(self.endpoint("auth/save_build"))
                .bearer_auth(token)
                .json(build),
        )
        .await
    }

    /// Fetch the authenticated user's saved builds
    pub async fn saved_builds(&self, token: &str) -> Result<Vec<SavedBuild>> {
        let response: SavedBuildsResponse = self
            .execute(
                "fetch failed",
                self.client
                    .get(self.endpoint("auth/my_builds"))
                    .bearer_auth(token),
            )
            .await?;
        Ok(response.saved_builds)
    }

    /// Submit a rating for a build
    ///
    /// Not idempotent: every call records a new rating event.
    pub async fn rate_build(&self, token: &str, request: &RatingRequest) -> Result<ApiMessage> {
        self.execute(
            "rating failed",
            self.client
                .post(self.endpoint("auth/rate-build"))
                .bearer_auth(token)
                .json(request),
        )
        .await
    }

    /// Delete a saved build by id
    ///
    /// Deleting an id that no longer exists is not an error.
    pub async fn delete_build(&self, token: &str, build_id: &str) -> Result<ApiMessage> {
        let operation = "delete failed";
        let url = self.endpoint(&format!("auth/delete_build/{}", build_id));
        let response = self
            .client
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("{}: request failed: {}", operation, e);
                PcforgeError::api(operation, e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Delete of absent build {} treated as success", build_id);
            return Ok(ApiMessage {
                message: "Build was already removed.".to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{}: backend returned {}: {}", operation, status, body);
            return Err(PcforgeError::api(operation, format_failure(status, &body)).into());
        }

        response
            .json()
            .await
            .map_err(|e| PcforgeError::api(operation, format!("unexpected response shape: {}", e)).into())
    }

    /// Fetch the authenticated user's profile
    pub async fn profile(&self, token: &str) -> Result<UserProfile> {
        self.execute(
            "fetch failed",
            self.client.get(self.endpoint("auth/me")).bearer_auth(token),
        )
        .await
    }

    /// Fetch all ratings submitted by the authenticated user
    pub async fn my_ratings(&self, token: &str) -> Result<UserRatings> {
        self.execute(
            "fetch failed",
            self.client
                .get(self.endpoint("auth/get-ratings"))
                .bearer_auth(token),
        )
        .await
    }

    /// Build a backend endpoint URL from the configured base
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a request and map the outcome to the uniform contract
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("{}: request failed: {}", operation, e);
            PcforgeError::api(operation, e.to_string())
        })?;

        // Status is checked before any body parse so a failure body can
        // never surface as a parse error.
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{}: backend returned {}: {}", operation, status, body);
            return Err(PcforgeError::api(operation, format_failure(status, &body)).into());
        }

        response.json().await.map_err(|e| {
            tracing::error!("{}: response body did not match: {}", operation, e);
            PcforgeError::api(operation, format!("unexpected response shape: {}", e)).into()
        })
    }
}

fn format_failure(status: StatusCode, body: &str) -> String {
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body)
    }
}
