use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid login or password")]
    InvalidCredentials,
}

/// Access level attached to a logged-in user. Admins additionally manage the
/// organization list; regular users only run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

/// Compare the submitted credentials against the configured static pairs.
///
/// Plain comparison by design of the surrounding app: there is no account
/// system, only the two pairs from the environment. Unconfigured pairs never
/// match.
pub fn authenticate(config: &Config, username: &str, password: &str) -> Result<AuthUser, AuthError> {
    let creds = &config.credentials;

    if matches_pair(&creds.admin_login, &creds.admin_password, username, password) {
        return Ok(AuthUser {
            username: "admin".to_string(),
            role: Role::Admin,
        });
    }
    if matches_pair(&creds.user_login, &creds.user_password, username, password) {
        return Ok(AuthUser {
            username: "user".to_string(),
            role: Role::User,
        });
    }

    debug!(username, "login rejected");
    Err(AuthError::InvalidCredentials)
}

fn matches_pair(
    login: &Option<String>,
    password: &Option<String>,
    submitted_login: &str,
    submitted_password: &str,
) -> bool {
    match (login, password) {
        (Some(login), Some(password)) => login == submitted_login && password == submitted_password,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::StaticCredentials;

    fn config() -> Config {
        Config {
            credentials: StaticCredentials {
                admin_login: Some("boss".to_string()),
                admin_password: Some("secret".to_string()),
                user_login: Some("clerk".to_string()),
                user_password: Some("hunter2".to_string()),
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_admin_credentials_yield_admin_role() {
        let user = authenticate(&config(), "boss", "secret").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.username, "admin");
    }

    #[test]
    fn test_user_credentials_yield_user_role() {
        let user = authenticate(&config(), "clerk", "hunter2").unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        assert_eq!(
            authenticate(&config(), "boss", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_unconfigured_credentials_never_match() {
        let bare = Config::default();
        assert_eq!(
            authenticate(&bare, "", ""),
            Err(AuthError::InvalidCredentials)
        );
    }
}
