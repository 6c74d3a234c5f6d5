//! # Auth Commands
//!
//! Login form submission.
//!
//! A successful login stores the token and nothing else: the session `user`
//! slot is only changed by the `user` command.

use std::fmt;

use serde::Serialize;
use tracing::{debug, error};

use crate::error::ApiError;
use fastfood_client::{Authenticator, LoginForm};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub email: String,
    pub token_stored: bool,
}

impl fmt::Display for LoginResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logged in as {}; token stored", self.email)
    }
}

/// Submits the login form once. Failures are logged and returned.
pub async fn login(auth: &Authenticator, form: &LoginForm) -> Result<LoginResult, ApiError> {
    debug!(email = %form.email(), "login command");

    match auth.submit(form).await {
        Ok(_) => Ok(LoginResult {
            email: form.email().to_string(),
            token_stored: true,
        }),
        Err(e) => {
            error!(error = %e, email = %form.email(), "Login failed");
            Err(ApiError::from(e))
        }
    }
}
