use crate::{
    clipboard::Clipboard,
    errors::{WorkflowError, WorkflowResult},
};
use refinely_client::ApiClient;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

/// How long the transient "copied" acknowledgment stays fresh.
const COPY_ACK_TTL: Duration = Duration::from_secs(2);

/// Fallback error text when a refine fails without a backend detail.
pub const REFINE_FALLBACK: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineState {
    Idle,
    Refining,
    Refined(String),
    Failed(String),
}

/// Tracked independently of [`RefineState`]: favouriting a result does
/// not touch the refined text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteState {
    NotFavourited,
    Favouriting,
    Favourited,
}

/// Drives one refine -> favourite -> copy interaction as an explicit
/// state machine. Mutating actions take `&mut self`, so no two actions
/// on one flow instance can ever be in flight at the same time; a new
/// `refine` resets the favourite sub-state and the copy acknowledgment.
pub struct RefineFlow {
    client: Arc<ApiClient>,
    clipboard: Arc<dyn Clipboard>,
    original: String,
    state: RefineState,
    favourite_state: FavouriteState,
    copied_at: Option<Instant>,
}

impl RefineFlow {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            client,
            clipboard,
            original: String::new(),
            state: RefineState::Idle,
            favourite_state: FavouriteState::NotFavourited,
            copied_at: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &RefineState {
        &self.state
    }

    #[must_use]
    pub fn favourite_state(&self) -> FavouriteState {
        self.favourite_state
    }

    /// The refined text, when the last refine succeeded.
    #[must_use]
    pub fn refined_text(&self) -> Option<&str> {
        match &self.state {
            RefineState::Refined(text) => Some(text),
            _ => None,
        }
    }

    /// Submit `text` for refinement. Whitespace-only input is rejected
    /// before any request is issued and leaves the state untouched. On
    /// failure the state records the backend detail when present.
    pub async fn refine(&mut self, text: &str) -> WorkflowResult<()> {
        if text.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "Please enter a prompt to refine.".to_string(),
            ));
        }

        self.original = text.to_string();
        self.state = RefineState::Refining;
        self.favourite_state = FavouriteState::NotFavourited;
        self.copied_at = None;

        match self.client.refine(text).await {
            Ok(response) => {
                tracing::debug!("prompt refined");
                self.state = RefineState::Refined(response.optimised_prompt);
                Ok(())
            }
            Err(err) => {
                let err = WorkflowError::from(err);
                self.state = RefineState::Failed(err.user_message(REFINE_FALLBACK));
                Err(err)
            }
        }
    }

    /// Save the current refined result as a favourite, sending both the
    /// original and the optimised text. A silent no-op when a save is
    /// already in flight or has succeeded, so repeated calls issue at
    /// most one request. Failure restores `NotFavourited` and leaves
    /// the refined text intact.
    pub async fn favourite(&mut self) -> WorkflowResult<()> {
        let RefineState::Refined(optimised) = &self.state else {
            return Err(WorkflowError::Validation(
                "There is no refined prompt to favourite.".to_string(),
            ));
        };
        if self.favourite_state != FavouriteState::NotFavourited {
            return Ok(());
        }

        let optimised = optimised.clone();
        self.favourite_state = FavouriteState::Favouriting;
        match self.client.create_favourite(&self.original, &optimised).await {
            Ok(favourite) => {
                tracing::debug!(favourite_id = %favourite.id, "favourite created");
                self.favourite_state = FavouriteState::Favourited;
                Ok(())
            }
            Err(err) => {
                self.favourite_state = FavouriteState::NotFavourited;
                Err(err.into())
            }
        }
    }

    /// Copy the refined text to the host clipboard and set the
    /// transient acknowledgment. No state transition beyond that.
    pub async fn copy(&mut self) -> WorkflowResult<()> {
        let RefineState::Refined(optimised) = &self.state else {
            return Err(WorkflowError::Validation(
                "There is no refined prompt to copy.".to_string(),
            ));
        };

        self.clipboard
            .write_text(optimised)
            .await
            .map_err(WorkflowError::Clipboard)?;
        self.copied_at = Some(Instant::now());
        Ok(())
    }

    /// True while the "copied" acknowledgment is still fresh; resets on
    /// its own after a fixed two-second delay.
    #[must_use]
    pub fn copy_acknowledged(&self) -> bool {
        self.copied_at.is_some_and(|at| at.elapsed() < COPY_ACK_TTL)
    }
}
