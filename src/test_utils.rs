//! Shared helpers for unit tests

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Build a JWT-shaped token with the given subject and expiry
///
/// The signature segment is a fixed placeholder; the session layer never
/// verifies it.
pub fn make_token(sub: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "sub": sub, "exp": exp })
            .to_string()
            .as_bytes(),
    );
    format!("{}.{}.sig", header, payload)
}
