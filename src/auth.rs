use std::time::Duration;

use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password. Please try again.")]
    InvalidCredentials,
}

/// Literal credential check standing in for a sign-in form.
#[derive(Debug, Clone)]
pub struct Authenticator {
    username: String,
    password: String,
    delay: Duration,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            delay: Duration::from_millis(config.login_delay_ms),
        }
    }

    /// Answers after the configured delay.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        tokio::time::sleep(self.delay).await;

        if username == self.username && password == self.password {
            tracing::info!(username, "Signed in");
            Ok(Session { username: username.to_string() })
        } else {
            tracing::warn!(username, "Sign-in rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}
