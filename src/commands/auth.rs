//! Account and session command handlers
//!
//! Registration and login talk to the backend's unauthenticated auth
//! endpoints; logout and whoami operate on the local session, with whoami
//! additionally fetching the server-side profile when authenticated.

use crate::api::{LoginRequest, RegisterRequest};
use crate::config::Config;
use crate::error::{PcforgeError, Result};
use crate::session::SessionState;

use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"))
}

/// Register a new account
pub async fn register(
    config: Config,
    username: String,
    email: String,
    password: String,
) -> Result<()> {
    if username.trim().is_empty() {
        return Err(PcforgeError::Validation("Username must not be empty.".to_string()).into());
    }
    if !email_regex().is_match(&email) {
        return Err(
            PcforgeError::Validation(format!("{:?} is not a valid email address.", email)).into(),
        );
    }
    if password.is_empty() {
        return Err(PcforgeError::Validation("Password must not be empty.".to_string()).into());
    }

    let notifier = super::notifier();
    let api = super::api_client(&config)?;
    let user = api
        .register(&RegisterRequest {
            username,
            email,
            password,
            role: None,
        })
        .await?;

    notifier.success(&format!(
        "Account created for {}. You can now log in.",
        user.username
    ));
    Ok(())
}

/// Log in and store the session credential
pub async fn login(config: Config, username: String, password: String) -> Result<()> {
    let notifier = super::notifier();
    let session = super::session_manager(&config, notifier.clone());
    let api = super::api_client(&config)?;

    let pair = api.login(&LoginRequest { username, password }).await?;
    session.login(&pair.access_token)?;
    Ok(())
}

/// Log out and clear the stored credential
pub async fn logout(config: Config) -> Result<()> {
    let notifier = super::notifier();
    let session = super::session_manager(&config, notifier);
    session.logout()
}

/// Show the current session, and the account profile when authenticated
pub async fn whoami(config: Config) -> Result<()> {
    let notifier = super::notifier();
    let session = super::session_manager(&config, notifier.clone());

    match session.initialize()? {
        SessionState::Anonymous => {
            notifier.info("Not logged in.");
        }
        SessionState::Authenticated(current) => {
            println!(
                "Logged in as {} (session valid until {})",
                current.username,
                current.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            );

            // Profile display is best-effort; the local session stands on
            // its own if the backend is unreachable.
            if let Some(token) = session.bearer_token()? {
                match super::api_client(&config)?.profile(&token).await {
                    Ok(profile) => {
                        println!("  id:    {}", profile.id);
                        println!("  email: {}", profile.email);
                        println!("  role:  {}", profile.role);
                    }
                    Err(e) => {
                        tracing::warn!("Could not fetch account profile: {}", e);
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex_accepts_plain_addresses() {
        assert!(email_regex().is_match("alice@example.com"));
        assert!(email_regex().is_match("a.b+c@sub.domain.org"));
    }

    #[test]
    fn test_email_regex_rejects_malformed() {
        assert!(!email_regex().is_match("alice"));
        assert!(!email_regex().is_match("alice@"));
        assert!(!email_regex().is_match("@example.com"));
        assert!(!email_regex().is_match("alice@example"));
        assert!(!email_regex().is_match("al ice@example.com"));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email_before_network() {
        let err = register(
            Config::default(),
            "alice".to_string(),
            "not-an-email".to_string(),
            "hunter2".to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PcforgeError>(),
            Some(PcforgeError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_username() {
        let err = register(
            Config::default(),
            "  ".to_string(),
            "alice@example.com".to_string(),
            "hunter2".to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PcforgeError>(),
            Some(PcforgeError::Validation(_))
        ));
    }
}
