use crate::auth::credentials::{authenticate, AuthError, AuthUser, Role};
use crate::config::Config;

/// The local session flag: who is logged in for the lifetime of the process.
/// Nothing is persisted and nothing is enforced beyond what views choose to
/// gate on the role.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<AuthUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the credentials and record the user on success.
    pub fn login(
        &mut self,
        config: &Config,
        username: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let user = authenticate(config, username, password)?;
        self.user = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self.user,
            Some(AuthUser {
                role: Role::Admin,
                ..
            })
        )
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
    fn test_login_records_the_user() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.login(&config(), "boss", "secret").unwrap();
        assert!(session.is_authenticated());
        assert!(session.is_admin());
    }

    #[test]
    fn test_failed_login_leaves_the_session_empty() {
        let mut session = Session::new();
        assert!(session.login(&config(), "boss", "nope").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_regular_user_is_not_admin() {
        let mut session = Session::new();
        session.login(&config(), "clerk", "hunter2").unwrap();
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_logout_clears_the_user() {
        let mut session = Session::new();
        session.login(&config(), "clerk", "hunter2").unwrap();
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }
}
