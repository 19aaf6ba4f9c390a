//! Login, signup, logout, and session restore

use super::session::Session;
use crate::api::models::User;
use crate::error::Result;
use crate::forms::{ensure_valid, LoginForm, SignupForm};
use crate::http::{ApiClient, RequestConfig};
use reqwest::Method;
use tracing::{debug, info, warn};

const LOGIN_PATH: &str = "/auth/login";
const SIGNUP_PATH: &str = "/auth/signup";
const LOGOUT_PATH: &str = "/auth/logout";
const ME_PATH: &str = "/users/me";

/// Auth endpoints bound to one client
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'c> {
    client: &'c ApiClient,
}

impl<'c> AuthApi<'c> {
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    /// Log in; the backend's session cookie lands in the client's jar
    pub async fn login(&self, form: &LoginForm) -> Result<Session> {
        ensure_valid(form)?;

        let body = LoginForm::new(form.email.trim(), form.password.as_str());
        let user: User = self.client.post(LOGIN_PATH, &body).await?;

        if !self.client.has_session_cookie() {
            warn!("Login succeeded but no session cookie was set");
        }
        info!("Logged in as {} (id {})", user.email, user.id);
        Ok(Session::new(user))
    }

    /// Create an account; does not log in
    pub async fn signup(&self, form: &SignupForm) -> Result<User> {
        ensure_valid(form)?;

        let mut body = form.clone();
        body.email = form.email.trim().to_string();
        body.nickname = form.nickname.trim().to_string();

        let user: User = self.client.post(SIGNUP_PATH, &body).await?;
        info!("Registered account {} (id {})", user.email, user.id);
        Ok(user)
    }

    /// End the session on the backend
    pub async fn logout(&self, session: Session) -> Result<()> {
        self.client
            .request_empty(Method::POST, LOGOUT_PATH, RequestConfig::default())
            .await?;
        info!("Logged out user {}", session.user_id());
        Ok(())
    }

    /// Rebuild a session from a cookie the jar already holds
    pub async fn restore(&self) -> Result<Session> {
        debug!("Restoring session from {}", ME_PATH);
        let user: User = self.client.get(ME_PATH, RequestConfig::default()).await?;
        Ok(Session::new(user))
    }
}
