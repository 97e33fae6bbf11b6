use crate::errors::WorkflowResult;
use refinely_client::{join_favourites, ApiClient, FavouriteView};
use std::sync::Arc;

/// In-memory state of the favourites screen: the denormalized
/// favourite/prompt view plus the operations that maintain it.
pub struct FavouritesBoard {
    client: Arc<ApiClient>,
    views: Vec<FavouriteView>,
}

impl FavouritesBoard {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            views: Vec::new(),
        }
    }

    #[must_use]
    pub fn views(&self) -> &[FavouriteView] {
        &self.views
    }

    /// Fetch the favourites and prompts collections together and
    /// rebuild the view. The join waits for both fetches (barrier
    /// semantics): the first failure fails the whole load, the other
    /// result is discarded, and the current view is left as it was.
    pub async fn load(&mut self) -> WorkflowResult<()> {
        let (favourites, prompts) = futures::try_join!(
            self.client.list_favourites(),
            self.client.list_prompts()
        )?;
        tracing::debug!(
            favourites = favourites.len(),
            prompts = prompts.len(),
            "favourites view rebuilt"
        );
        self.views = join_favourites(favourites, &prompts);
        Ok(())
    }

    /// Delete one favourite and drop exactly its entry from the view,
    /// matched by favourite id, without refetching anything. On failure
    /// the view keeps the entry and the error propagates.
    pub async fn remove(&mut self, favourite_id: &str) -> WorkflowResult<()> {
        self.client.delete_favourite(favourite_id).await?;
        self.views.retain(|view| view.favourite.id != favourite_id);
        Ok(())
    }
}
