//! Signed-in session
//!
//! The bearer token and user profile returned by login or registration.
//! It is passed explicitly to the API client and persisted to
//! `session.json` between invocations.

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::PulsePaths;
use crate::error::{PulseError, PulseResult};
use crate::models::{User, UserId};
use crate::storage::{delete_file, load_json, save_json};

/// Token plus profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Load the stored session, if any
    pub fn load(paths: &PulsePaths) -> PulseResult<Option<Self>> {
        load_json(&paths.session_file())
    }

    /// Load the stored session or fail with `NotLoggedIn`
    pub fn require(paths: &PulsePaths) -> PulseResult<Self> {
        Self::load(paths)?.ok_or(PulseError::NotLoggedIn)
    }

    pub fn save(&self, paths: &PulsePaths) -> PulseResult<()> {
        save_json(&paths.session_file(), self)?;
        tracing::debug!(user = %self.user.email, "session saved");
        Ok(())
    }

    /// Forget the stored session; returns whether one existed
    pub fn clear(paths: &PulsePaths) -> PulseResult<bool> {
        delete_file(&paths.session_file())
    }

    /// The `userId` claim of the token's payload
    ///
    /// Fails with `NotLoggedIn` when the token carries no readable claim,
    /// since every per-user endpoint needs it.
    pub fn user_id(&self) -> PulseResult<UserId> {
        user_id_from_token(&self.token).ok_or(PulseError::NotLoggedIn)
    }
}

/// Decode the `userId` claim from a JWT without verifying it
pub fn user_id_from_token(token: &str) -> Option<UserId> {
    let payload = token.split('.').nth(1)?;
    let bytes = [URL_SAFE_NO_PAD, URL_SAFE, STANDARD]
        .iter()
        .find_map(|engine| engine.decode(payload).ok())?;

    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    match claims.get("userId")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(UserId::new(s.as_str())),
        serde_json::Value::Number(n) => Some(UserId::new(n.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    fn user() -> User {
        serde_json::from_str(r#"{"id":"u-7","username":"sam","email":"sam@example.com"}"#)
            .unwrap()
    }

    #[test]
    fn test_user_id_from_string_claim() {
        let token = token_with(r#"{"userId":"u-7","iat":1700000000}"#);
        assert_eq!(user_id_from_token(&token), Some(UserId::new("u-7")));
    }

    #[test]
    fn test_user_id_from_numeric_claim() {
        let token = token_with(r#"{"userId":42}"#);
        assert_eq!(user_id_from_token(&token), Some(UserId::new("42")));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let token = format!("h.{}.s", STANDARD.encode(r#"{"userId":"abc"}"#));
        assert_eq!(user_id_from_token(&token), Some(UserId::new("abc")));
    }

    #[test]
    fn test_garbage_tokens() {
        assert_eq!(user_id_from_token("not-a-jwt"), None);
        assert_eq!(user_id_from_token("a.!!!.c"), None);
        assert_eq!(user_id_from_token(&token_with(r#"{"sub":"x"}"#)), None);

        let session = Session::new("nope", user());
        assert!(matches!(session.user_id(), Err(PulseError::NotLoggedIn)));
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PulsePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(Session::load(&paths).unwrap().is_none());
        assert!(matches!(Session::require(&paths), Err(PulseError::NotLoggedIn)));

        let session = Session::new(token_with(r#"{"userId":"u-7"}"#), user());
        session.save(&paths).unwrap();
        assert_eq!(Session::require(&paths).unwrap(), session);

        assert!(Session::clear(&paths).unwrap());
        assert!(!Session::clear(&paths).unwrap());
        assert!(Session::load(&paths).unwrap().is_none());
    }
}
