#![allow(dead_code)]

use async_trait::async_trait;
use refinely_client::{ApiClient, ApiClientOptions, SessionStore};
use refinely_workflow::{BoxedError, Clipboard};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> (Arc<ApiClient>, Arc<SessionStore>) {
    let session = Arc::new(SessionStore::in_memory());
    let client = Arc::new(ApiClient::new(ApiClientOptions {
        base_url: Some(server.uri()),
        session: session.clone(),
    }));
    (client, session)
}

/// Records every write instead of touching a real clipboard.
#[derive(Default)]
pub struct MockClipboard {
    writes: Mutex<Vec<String>>,
}

impl MockClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn write_text(&self, text: &str) -> Result<(), BoxedError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Always fails, for exercising the clipboard error path.
pub struct BrokenClipboard;

#[async_trait]
impl Clipboard for BrokenClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), BoxedError> {
        Err("clipboard unavailable".into())
    }
}
