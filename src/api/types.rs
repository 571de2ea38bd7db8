//! Wire types for the recommendation backend

use serde::{Deserialize, Serialize};

/// Request body for a recommendation query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Build budget, whole currency units
    pub budget: u32,
    /// Query term: a game title for gaming builds, the use-case label otherwise
    pub query: String,
    /// Identity attached to the query; "guest" when anonymous
    pub user_id: String,
    /// Recommender mode; this client always issues "hybrid"
    pub mode: String,
}

impl RecommendRequest {
    /// Build a hybrid-mode request, the only mode this client issues
    pub fn hybrid(budget: u32, query: &str, user_id: &str) -> Self {
        Self {
            budget,
            query: query.to_string(),
            user_id: user_id.to_string(),
            mode: "hybrid".to_string(),
        }
    }
}

/// Component names of a recommended build
///
/// Immutable once returned; identified by `build_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedBuild {
    pub build_id: String,
    pub cpu_name: String,
    pub gpu_name: String,
    pub motherboard_name: String,
    pub ram_name: String,
    pub storage_name: String,
    pub psu_name: String,
    pub case_name: String,
}

/// Response payload from a recommendation query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_build: RecommendedBuild,
    pub total_cost: f64,
}

impl Recommendation {
    /// Shape the recommendation the way the save endpoint expects it
    pub fn to_saved(&self) -> SavedBuild {
        SavedBuild {
            build: self.recommended_build.clone(),
            total_cost: self.total_cost,
        }
    }
}

/// A build persisted to the user's account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuild {
    #[serde(flatten)]
    pub build: RecommendedBuild,
    pub total_cost: f64,
}

/// Request body for account registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Account role; the backend defaults this to "user"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Registered account details returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Request body for login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer credential issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub token_type: String,
}

/// Request body for rating a build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRequest {
    pub build_id: String,
    /// Rating value, 1 through 5
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Confirmation message returned by mutation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Server-side account profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// One previously submitted rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub build_id: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub timestamp: String,
}

/// All ratings submitted by the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRatings {
    pub user: String,
    pub ratings: Vec<RatingEntry>,
}

/// Envelope for the saved-builds listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SavedBuildsResponse {
    pub(crate) saved_builds: Vec<SavedBuild>,
}
