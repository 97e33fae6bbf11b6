use crate::types::{Favourite, Prompt};

/// One favourite paired with its prompt, if that prompt still exists in
/// the currently fetched prompts collection. Derived and ephemeral,
/// never sent back to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteView {
    pub favourite: Favourite,
    /// `None` when no prompt with a matching id was fetched (the
    /// favourite outlived its prompt). Rendered as a placeholder, not
    /// treated as an error.
    pub prompt: Option<Prompt>,
}

/// Pair every favourite with the first prompt whose id equals its
/// `prompt_id`. Output order follows the favourites input; the engine
/// does no re-sorting. A missing prompt joins to `None` rather than
/// failing the whole view.
#[must_use]
pub fn join_favourites(favourites: Vec<Favourite>, prompts: &[Prompt]) -> Vec<FavouriteView> {
    favourites
        .into_iter()
        .map(|favourite| {
            let prompt = prompts
                .iter()
                .find(|prompt| prompt.id == favourite.prompt_id)
                .cloned();
            FavouriteView { favourite, prompt }
        })
        .collect()
}
