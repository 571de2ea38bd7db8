//! Build workflow orchestration for PCForge
//!
//! The workflow controller sits on top of the API client and the session
//! manager and enforces the user-facing policies: input validation before
//! any network call, idempotent save, wholesale list refresh, and a
//! blocking confirmation gate in front of deletion.
//!
//! The controller owns the working set for one invocation only (current
//! recommendation, saved-build snapshot, pending rating); nothing here is
//! persisted.

use crate::api::{ApiClient, RatingRequest, Recommendation, RecommendRequest, SavedBuild};
use crate::error::{PcforgeError, Result};
use crate::notify::Notifier;
use crate::session::SessionManager;

use clap::ValueEnum;
use std::fmt;
use std::io::Write as _;
use std::sync::Arc;

/// Supported build use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UseCase {
    Gaming,
    General,
    Work,
    School,
}

impl UseCase {
    /// Lowercase label used as the query term for non-gaming builds
    pub fn label(&self) -> &'static str {
        match self {
            UseCase::Gaming => "gaming",
            UseCase::General => "general",
            UseCase::Work => "work",
            UseCase::School => "school",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User input for a recommendation query
///
/// Transient; constructed per submission.
#[derive(Debug, Clone)]
pub struct BuildQuery {
    /// Build budget, whole currency units; minimum 100
    pub budget: u32,
    pub use_case: UseCase,
    /// Game title; required for gaming builds, ignored otherwise
    pub game: Option<String>,
}

impl BuildQuery {
    /// Validate the query against the client-side constraints
    ///
    /// # Errors
    ///
    /// Returns [`PcforgeError::Validation`] when the budget is below 100 or
    /// a gaming build is missing a game title. Validation failures prevent
    /// the request from being issued at all.
    pub fn validate(&self) -> Result<()> {
        if self.budget < 100 {
            return Err(PcforgeError::Validation("Budget must be at least 100.".to_string()).into());
        }
        if self.use_case == UseCase::Gaming && self.query_term().is_empty() {
            return Err(PcforgeError::Validation(
                "Please enter a game title for gaming builds.".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Query term sent to the recommender
    ///
    /// The game title for gaming builds, the use-case label otherwise.
    pub fn query_term(&self) -> &str {
        match self.use_case {
            UseCase::Gaming => self.game.as_deref().map(str::trim).unwrap_or_default(),
            _ => self.use_case.label(),
        }
    }

    /// Build the validated wire request with the given identity attached
    pub fn to_request(&self, user_id: &str) -> Result<RecommendRequest> {
        self.validate()?;
        Ok(RecommendRequest::hybrid(
            self.budget,
            self.query_term(),
            user_id,
        ))
    }
}

/// Blocking yes/no gate in front of destructive actions
pub trait Confirm {
    /// Ask the user; `true` means proceed
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation gate that prompts on the terminal
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N]: ", prompt);
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirmation gate with a fixed answer (`--yes` flags and tests)
#[derive(Debug, Clone, Copy)]
pub struct PresetConfirm(pub bool);

impl Confirm for PresetConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Outcome of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Build was persisted and the saved list refreshed
    Saved,
    /// Build was already in the saved list; no network call was made
    AlreadySaved,
}

/// Outcome of a delete attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Build was deleted and the saved list refreshed
    Deleted,
    /// Confirmation was declined; no network call was made
    Cancelled,
}

/// Orchestrates recommendation, save, list, rate, and delete flows
pub struct BuildWorkflow {
    api: ApiClient,
    session: SessionManager,
    notifier: Arc<dyn Notifier>,
    recommendation: Option<Recommendation>,
    saved: Vec<SavedBuild>,
    pending_rating: u8,
}

impl BuildWorkflow {
    /// Create a workflow over an API client and session manager
    pub fn new(api: ApiClient, session: SessionManager, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            session,
            notifier,
            recommendation: None,
            saved: Vec::new(),
            pending_rating: 0,
        }
    }

    /// The recommendation currently on display, if any
    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    /// Snapshot of the saved-build list
    pub fn saved(&self) -> &[SavedBuild] {
        &self.saved
    }

    /// Submit a recommendation query
    ///
    /// The identity attached is the session's username when authenticated,
    /// "guest" otherwise. Success replaces the displayed recommendation;
    /// there is no history.
    pub async fn recommend(&mut self, query: &BuildQuery) -> Result<&Recommendation> {
        let identity = self
            .session
            .identity()
            .unwrap_or_else(|| "guest".to_string());
        let request = query.to_request(&identity)?;
        let recommendation = self.api.recommend(&request).await?;
        Ok(self.recommendation.insert(recommendation))
    }

    /// Save the current recommendation to the user's account
    ///
    /// Performs the client-side idempotency check against the in-memory
    /// saved list first; a hit short-circuits with zero network calls. A
    /// successful save is followed by an authoritative refetch of the list,
    /// never an optimistic append. The pre-check is a best-effort snapshot
    /// comparison, not a lock; two rapid saves of the same build can race.
    pub async fn save_current(&mut self) -> Result<SaveOutcome> {
        let token = self.require_token("save a build")?;
        let recommendation = match self.recommendation.clone() {
            Some(recommendation) => recommendation,
            None => {
                return Err(PcforgeError::Validation(
                    "Get a recommendation before saving.".to_string(),
                )
                .into())
            }
        };

        let build_id = &recommendation.recommended_build.build_id;
        if self.saved.iter().any(|b| b.build.build_id == *build_id) {
            self.notifier.info("Build already saved.");
            return Ok(SaveOutcome::AlreadySaved);
        }

        let message = self.api.save_build(&token, &recommendation.to_saved()).await?;
        self.notifier.success(&message.message);
        self.refresh_saved().await?;
        Ok(SaveOutcome::Saved)
    }

    /// Refetch the saved-build list, replacing the snapshot wholesale
    ///
    /// The list can never drift from backend state across repeated
    /// refreshes; there is no incremental merge.
    pub async fn refresh_saved(&mut self) -> Result<&[SavedBuild]> {
        let token = self.require_token("view saved builds")?;
        self.saved = self.api.saved_builds(&token).await?;
        Ok(&self.saved)
    }

    /// Record the pending rating selection; 0 clears it
    pub fn select_rating(&mut self, value: u8) -> Result<()> {
        if value > 5 {
            return Err(
                PcforgeError::Validation("Rating must be between 1 and 5.".to_string()).into(),
            );
        }
        self.pending_rating = value;
        Ok(())
    }

    /// The pending rating selection; 0 means not selected
    pub fn pending_rating(&self) -> u8 {
        self.pending_rating
    }

    /// Submit the pending rating for the current recommendation
    ///
    /// A selection of 0 blocks submission locally. Success resets the
    /// pending selection to unselected.
    pub async fn submit_rating(&mut self) -> Result<()> {
        let token = self.require_token("rate a build")?;
        let build_id = match self.recommendation.as_ref() {
            Some(recommendation) => recommendation.recommended_build.build_id.clone(),
            None => {
                return Err(PcforgeError::Validation(
                    "Get a recommendation before rating.".to_string(),
                )
                .into())
            }
        };
        if self.pending_rating == 0 {
            return Err(PcforgeError::Validation(
                "Please select a rating before submitting.".to_string(),
            )
            .into());
        }

        let request = RatingRequest {
            build_id,
            rating: self.pending_rating,
            comment: None,
        };
        let message = self.api.rate_build(&token, &request).await?;
        self.pending_rating = 0;
        self.notifier.success(&message.message);
        Ok(())
    }

    /// Rate a build by id, outside the current-recommendation flow
    pub async fn rate_build(
        &mut self,
        build_id: &str,
        value: u8,
        comment: Option<String>,
    ) -> Result<()> {
        let token = self.require_token("rate a build")?;
        if !(1..=5).contains(&value) {
            return Err(
                PcforgeError::Validation("Rating must be between 1 and 5.".to_string()).into(),
            );
        }

        let request = RatingRequest {
            build_id: build_id.to_string(),
            rating: value,
            comment,
        };
        let message = self.api.rate_build(&token, &request).await?;
        self.notifier.success(&message.message);
        Ok(())
    }

    /// Delete a saved build behind a confirmation gate
    ///
    /// A declined confirmation short-circuits with zero network calls and
    /// leaves the saved list untouched. Success refetches the list.
    pub async fn delete(&mut self, build_id: &str, gate: &dyn Confirm) -> Result<DeleteOutcome> {
        let token = self.require_token("delete builds")?;
        if !gate.confirm("Are you sure you want to delete this build?") {
            self.notifier.info("Deletion cancelled.");
            return Ok(DeleteOutcome::Cancelled);
        }

        let message = self.api.delete_build(&token, build_id).await?;
        self.notifier.success(&message.message);
        self.refresh_saved().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Bearer token for an authenticated action
    fn require_token(&self, action: &str) -> Result<String> {
        match self.session.bearer_token()? {
            Some(token) => Ok(token),
            None => Err(PcforgeError::Authentication(format!(
                "You must be logged in to {}.",
                action
            ))
            .into()),
        }
    }
}
