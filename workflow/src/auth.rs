use crate::errors::{WorkflowError, WorkflowResult};
use refinely_client::{ApiClient, SignupRequest, UserProfile};
use std::sync::Arc;

/// Fallback error text when a login fails without a backend detail.
pub const LOGIN_FALLBACK: &str = "Login failed. Please check your credentials.";

const MIN_PASSWORD_LEN: usize = 6;

/// Login, signup, and logout sequencing on top of the pipeline. This is
/// the one place a freshly issued token gets stored; the pipeline
/// itself only ever clears the session.
pub struct AuthFlow {
    client: Arc<ApiClient>,
}

impl AuthFlow {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and make the session
    /// authenticated. Use [`WorkflowError::user_message`] with
    /// [`LOGIN_FALLBACK`] to render a failure.
    pub async fn login(&self, email: &str, password: &str) -> WorkflowResult<()> {
        let response = self.client.login(email, password).await?;
        self.client.session().set_token(&response.access_token)?;
        tracing::debug!("session authenticated");
        Ok(())
    }

    /// Register a new account. All checks run client-side first;
    /// nothing is sent unless they pass.
    pub async fn signup(
        &self,
        request: &SignupRequest,
        confirm_password: &str,
    ) -> WorkflowResult<UserProfile> {
        if request.first_name.trim().is_empty()
            || request.last_name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.trim().is_empty()
        {
            return Err(WorkflowError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        if request.password != confirm_password {
            return Err(WorkflowError::Validation(
                "Passwords do not match".to_string(),
            ));
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(WorkflowError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        Ok(self.client.signup(request).await?)
    }

    /// Drop the session. Idempotent; safe to call when already
    /// anonymous.
    pub fn logout(&self) -> WorkflowResult<()> {
        self.client.session().clear()?;
        Ok(())
    }
}
