mod api;
mod errors;
mod join;
mod session;
mod types;

pub use api::{ApiClient, ApiClientOptions, GENERIC_ERROR_DETAIL};
pub use errors::{ClientError, ClientResult};
pub use join::{join_favourites, FavouriteView};
pub use session::{FileTokenStore, MemoryTokenStore, SessionStatus, SessionStore, TokenStore};
pub use types::*;
