use crate::errors::BoxedError;
use async_trait::async_trait;

/// Host clipboard boundary. The workflow only ever writes; the concrete
/// implementation (OS clipboard, webview bridge, test recorder) is
/// injected when a flow is built.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), BoxedError>;
}
