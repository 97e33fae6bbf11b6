mod auth;
mod clipboard;
mod errors;
mod favourites;
mod profile;
mod refine;

pub use auth::{AuthFlow, LOGIN_FALLBACK};
pub use clipboard::Clipboard;
pub use errors::{BoxedError, WorkflowError, WorkflowResult};
pub use favourites::FavouritesBoard;
pub use profile::ProfileFlow;
pub use refine::{FavouriteState, RefineFlow, RefineState, REFINE_FALLBACK};
