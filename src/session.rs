//! Session lifecycle management for PCForge
//!
//! The session manager is the single authority on "is the user currently
//! authenticated". It decodes the stored bearer credential, validates
//! expiry, schedules automatic invalidation, and publishes state changes
//! through one `watch` channel so consumers subscribe instead of polling
//! the token store.

use crate::error::{PcforgeError, Result};
use crate::notify::Notifier;
use crate::token::TokenStore;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Notice emitted whenever an expired or invalid session is evicted
const SESSION_EXPIRED_NOTICE: &str = "Session expired. Please login again.";

/// Claims decoded from the bearer credential payload
///
/// The token is JWT-shaped; the payload is decoded without verifying the
/// signature, which is the backend's responsibility.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Subject identity (username)
    pub sub: String,
    /// Expiry timestamp, seconds since epoch
    pub exp: i64,
}

/// Derived, ephemeral view of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Subject identity from the credential
    pub username: String,
    /// Moment the credential stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Authentication state published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No valid credential
    #[default]
    Anonymous,
    /// Valid credential; session carries the decoded view
    Authenticated(Session),
}

impl SessionState {
    /// True when the state carries a session
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Decode the claims payload of a JWT-shaped bearer token
///
/// Accepts the standard three-segment `header.payload.signature` form and
/// base64url-decodes the payload. The signature is not verified.
///
/// # Errors
///
/// Returns [`PcforgeError::Decode`] when the token is not three segments,
/// the payload is not base64url, or the payload is not a claims object
/// with `sub` and `exp`.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(
                PcforgeError::Decode("token does not have three segments".to_string()).into(),
            )
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| PcforgeError::Decode(format!("payload is not base64url: {}", e)))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| PcforgeError::Decode(format!("payload is not a claims object: {}", e)))?;

    Ok(claims)
}

/// Single-shot expiry timer slot
///
/// Arming bumps the generation and aborts the previous task; a fired task
/// re-checks its generation before acting, so a supersede or cancel that
/// races with the firing can never produce a stale expiry.
struct ExpirySlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Owner of the derived session and the expiry timer
///
/// Cheap to clone; clones share the same token store, notifier, state
/// channel, and timer slot.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    state: Arc<watch::Sender<SessionState>>,
    timer: Arc<Mutex<ExpirySlot>>,
}

impl SessionManager {
    /// Create a session manager in the `Anonymous` state
    ///
    /// Call [`SessionManager::initialize`] to rehydrate from the token
    /// store.
    pub fn new(store: Arc<dyn TokenStore>, notifier: Arc<dyn Notifier>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self {
            store,
            notifier,
            state: Arc::new(tx),
            timer: Arc::new(Mutex::new(ExpirySlot {
                generation: 0,
                handle: None,
            })),
        }
    }

    /// Rehydrate session state from the token store
    ///
    /// Absent credential leaves the state `Anonymous`. A malformed or
    /// already-expired credential is cleared from the store and surfaced as
    /// a "please log in again" notice, never as a generic error. A valid
    /// credential transitions to `Authenticated` and arms the expiry timer.
    pub fn initialize(&self) -> Result<SessionState> {
        let token = match self.store.load()? {
            Some(token) => token,
            None => {
                self.state.send_replace(SessionState::Anonymous);
                return Ok(SessionState::Anonymous);
            }
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Stored credential failed to decode: {}", e);
                self.store.clear()?;
                self.state.send_replace(SessionState::Anonymous);
                self.notifier
                    .info("Stored session was invalid. Please log in again.");
                return Ok(SessionState::Anonymous);
            }
        };

        match self.session_from_claims(claims) {
            Some(session) if session.expires_at > Utc::now() => {
                self.arm_expiry(session.expires_at);
                let state = SessionState::Authenticated(session);
                self.state.send_replace(state.clone());
                Ok(state)
            }
            _ => {
                self.store.clear()?;
                self.state.send_replace(SessionState::Anonymous);
                self.notifier.info(SESSION_EXPIRED_NOTICE);
                Ok(SessionState::Anonymous)
            }
        }
    }

    /// Enter the `Authenticated` state with a fresh credential
    ///
    /// Decodes the credential for identity and expiry, writes it to the
    /// token store, supersedes any armed expiry timer with one derived from
    /// the new credential, and emits a success notice.
    ///
    /// # Errors
    ///
    /// Returns [`PcforgeError::Decode`] for a malformed credential and
    /// [`PcforgeError::SessionExpired`] when the credential is already past
    /// its expiry at login time.
    pub fn login(&self, token: &str) -> Result<Session> {
        let claims = decode_claims(token)?;
        let session = self
            .session_from_claims(claims)
            .ok_or_else(|| PcforgeError::Decode("expiry timestamp out of range".to_string()))?;

        // Strict comparison: a credential expiring within the current tick
        // counts as already expired.
        if session.expires_at <= Utc::now() {
            return Err(PcforgeError::SessionExpired.into());
        }

        self.store.store(token)?;
        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        self.arm_expiry(session.expires_at);
        self.notifier
            .success(&format!("Welcome, {}!", session.username));
        tracing::info!(
            "Authenticated as {} until {}",
            session.username,
            session.expires_at
        );
        Ok(session)
    }

    /// Leave the `Authenticated` state by explicit user action
    ///
    /// The timer is cancelled before the store is cleared so a firing that
    /// races with logout can never emit a spurious "session expired"
    /// notice.
    pub fn logout(&self) -> Result<()> {
        self.cancel_expiry();
        self.store.clear()?;
        self.state.send_replace(SessionState::Anonymous);
        self.notifier.success("Logged out successfully.");
        tracing::info!("Session ended by logout");
        Ok(())
    }

    /// Current authentication state
    ///
    /// A session whose expiry has passed is evicted at the moment staleness
    /// is observed; an expired session is never exposed as authenticated.
    pub fn current(&self) -> SessionState {
        let state = self.state.borrow().clone();
        if let SessionState::Authenticated(session) = &state {
            if session.expires_at <= Utc::now() {
                self.evict_expired();
                return SessionState::Anonymous;
            }
        }
        state
    }

    /// Identity of the current user, if authenticated
    pub fn identity(&self) -> Option<String> {
        match self.current() {
            SessionState::Authenticated(session) => Some(session.username),
            SessionState::Anonymous => None,
        }
    }

    /// Raw bearer credential for authenticated API calls
    ///
    /// Returns `None` when the session is anonymous or expired; the token
    /// store remains the single source of truth for the credential itself.
    pub fn bearer_token(&self) -> Result<Option<String>> {
        match self.current() {
            SessionState::Authenticated(_) => self.store.load(),
            SessionState::Anonymous => Ok(None),
        }
    }

    /// Subscribe to authentication state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn session_from_claims(&self, claims: Claims) -> Option<Session> {
        let expires_at = Utc.timestamp_opt(claims.exp, 0).single()?;
        Some(Session {
            username: claims.sub,
            expires_at,
        })
    }

    /// Arm the single-shot expiry timer, superseding any armed one
    fn arm_expiry(&self, expires_at: DateTime<Utc>) {
        let delay = (expires_at - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        let mut slot = self.timer.lock().expect("timer lock poisoned");
        slot.generation += 1;
        let generation = slot.generation;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }

        let manager = self.clone();
        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            manager.fire_expiry(generation);
        }));
        tracing::debug!("Expiry timer armed for {}", expires_at);
    }

    /// Cancel the armed expiry timer, if any
    fn cancel_expiry(&self) {
        let mut slot = self.timer.lock().expect("timer lock poisoned");
        slot.generation += 1;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
            tracing::debug!("Expiry timer cancelled");
        }
    }

    /// Timer callback: invalidate the session if this firing is current
    fn fire_expiry(&self, generation: u64) {
        let mut slot = self.timer.lock().expect("timer lock poisoned");
        if slot.generation != generation {
            // Superseded by a later login or cancelled by logout.
            return;
        }
        slot.handle = None;

        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear credential on expiry: {}", e);
        }
        self.state.send_replace(SessionState::Anonymous);
        self.notifier.info(SESSION_EXPIRED_NOTICE);
        tracing::info!("Session invalidated by expiry timer");
    }

    /// Evict a session observed to be stale outside the timer path
    fn evict_expired(&self) {
        self.cancel_expiry();
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear credential on eviction: {}", e);
        }
        self.state.send_replace(SessionState::Anonymous);
        self.notifier.info(SESSION_EXPIRED_NOTICE);
        tracing::info!("Expired session evicted");
    }
}
