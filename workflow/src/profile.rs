use crate::errors::{WorkflowError, WorkflowResult};
use refinely_client::{ApiClient, ProfileUpdate, UserProfile};
use std::sync::Arc;

/// Profile screen flow: load the caller's profile, edit it, or delete
/// the whole account.
pub struct ProfileFlow {
    client: Arc<ApiClient>,
    profile: Option<UserProfile>,
}

impl ProfileFlow {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            profile: None,
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub async fn load(&mut self) -> WorkflowResult<&UserProfile> {
        let profile = self.client.get_profile().await?;
        Ok(self.profile.insert(profile))
    }

    /// Update names and email, and optionally the password. A blank
    /// password keeps the current one; a non-blank password must match
    /// its confirmation before anything is sent.
    pub async fn update(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> WorkflowResult<&UserProfile> {
        let Some(profile) = &self.profile else {
            return Err(WorkflowError::Validation(
                "Profile has not been loaded".to_string(),
            ));
        };
        if !password.is_empty() && password != confirm_password {
            return Err(WorkflowError::Validation(
                "Passwords do not match".to_string(),
            ));
        }

        let update = ProfileUpdate {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email: Some(email.to_string()),
            password: (!password.is_empty()).then(|| password.to_string()),
        };
        let updated = self.client.update_profile(&profile.id, &update).await?;
        Ok(self.profile.insert(updated))
    }

    /// Delete the account server-side, then drop the local session.
    /// The two steps are not atomic: a successful delete followed by a
    /// failed session clear surfaces the storage error.
    pub async fn delete_account(&mut self) -> WorkflowResult<()> {
        self.client.delete_profile().await?;
        self.profile = None;
        self.client.session().clear()?;
        Ok(())
    }
}
