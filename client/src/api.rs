use crate::{
    errors::{ClientError, ClientResult},
    session::SessionStore,
    types::{
        Favourite, LoginResponse, ProfileUpdate, Prompt, PromptUpdate, RefineResponse,
        SignupRequest, UserProfile,
    },
};
use reqwest::{
    header::{self, HeaderValue},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Fallback shown when the backend gives no usable `detail` text.
pub const GENERIC_ERROR_DETAIL: &str = "Something went wrong.";

#[derive(Serialize)]
struct RefineRequest<'a> {
    original_prompt: &'a str,
}

#[derive(Serialize)]
struct FavouriteCreate<'a> {
    original_prompt: &'a str,
    optimised_prompt: &'a str,
}

pub struct ApiClientOptions {
    /// Overrides the compiled-in backend base URL.
    pub base_url: Option<String>,
    pub session: Arc<SessionStore>,
}

/// The single choke point for every outbound call. Attaches the bearer
/// credential from the shared [`SessionStore`] and intercepts
/// authentication failures: any 401 from any operation clears the
/// session before the error is returned. No retries, no client-side
/// timeouts; every operation is one round trip that resolves or rejects
/// exactly once.
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    #[must_use]
    pub fn new(options: ApiClientOptions) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Self {
            base_url: options
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http: Client::builder().default_headers(headers).build().unwrap(),
            session: options.session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "sending request");
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<R: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<R> {
        let response = self.check(builder.send().await?).await?;
        Ok(response.json::<R>().await?)
    }

    async fn execute_empty(&self, builder: RequestBuilder) -> ClientResult<()> {
        self.check(builder.send().await?).await?;
        Ok(())
    }

    /// Shared post-response hook. The 401 branch is the session kill
    /// switch: it fires for any operation, including ones that are not
    /// part of a login flow, and the transition is irreversible except
    /// via a fresh login.
    async fn check(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%status, "unauthorized response, invalidating session");
            if let Err(err) = self.session.clear() {
                tracing::warn!(error = %err, "failed to clear persisted token");
            }
            return Err(ClientError::Auth);
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::Backend(status, extract_detail(response).await));
        }
        Ok(response)
    }

    /// Exchange credentials for a bearer token. The backend's form
    /// field is named `username` but carries the email address. The
    /// token is returned, not stored; storing it is the caller's move.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let form = [("username", email), ("password", password)];
        self.execute(self.request(Method::POST, "/auth/login").form(&form))
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<UserProfile> {
        self.execute(self.request(Method::POST, "/register").json(request))
            .await
    }

    pub async fn refine(&self, original_prompt: &str) -> ClientResult<RefineResponse> {
        self.execute(
            self.request(Method::POST, "/refine")
                .json(&RefineRequest { original_prompt }),
        )
        .await
    }

    pub async fn list_prompts(&self) -> ClientResult<Vec<Prompt>> {
        self.execute(self.request(Method::GET, "/prompts")).await
    }

    pub async fn update_prompt(
        &self,
        prompt_id: &str,
        update: &PromptUpdate,
    ) -> ClientResult<Prompt> {
        self.execute(
            self.request(Method::PATCH, &format!("/prompts/{prompt_id}"))
                .json(update),
        )
        .await
    }

    pub async fn delete_prompt(&self, prompt_id: &str) -> ClientResult<()> {
        self.execute_empty(self.request(Method::DELETE, &format!("/prompts/{prompt_id}")))
            .await
    }

    pub async fn list_favourites(&self) -> ClientResult<Vec<Favourite>> {
        self.execute(self.request(Method::GET, "/favourites")).await
    }

    pub async fn create_favourite(
        &self,
        original_prompt: &str,
        optimised_prompt: &str,
    ) -> ClientResult<Favourite> {
        self.execute(
            self.request(Method::POST, "/favourites")
                .json(&FavouriteCreate {
                    original_prompt,
                    optimised_prompt,
                }),
        )
        .await
    }

    pub async fn delete_favourite(&self, favourite_id: &str) -> ClientResult<()> {
        self.execute_empty(self.request(Method::DELETE, &format!("/favourites/{favourite_id}")))
            .await
    }

    /// `GET /users/me` wraps the caller's profile in an array; the
    /// first element is used. An empty array breaks the contract.
    pub async fn get_profile(&self) -> ClientResult<UserProfile> {
        let profiles: Vec<UserProfile> =
            self.execute(self.request(Method::GET, "/users/me")).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Invariant("profile response was empty".to_string()))
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> ClientResult<UserProfile> {
        self.execute(
            self.request(Method::PATCH, &format!("/users/{user_id}"))
                .json(update),
        )
        .await
    }

    pub async fn delete_profile(&self) -> ClientResult<()> {
        self.execute_empty(self.request(Method::DELETE, "/users/me"))
            .await
    }
}

/// Pull the backend's `{"detail": "..."}` message out of an error body,
/// falling back to a generic message when the body has no such field or
/// is not JSON at all.
async fn extract_detail(response: Response) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }

    match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        _ => GENERIC_ERROR_DETAIL.to_string(),
    }
}
