use crate::errors::ClientResult;
use std::{
    fs, io,
    path::PathBuf,
    sync::{Mutex, RwLock},
};
use tokio::sync::watch;

/// Whether the client currently holds a credential. Presence of a token
/// is not verified against the backend; an expired token is only
/// discovered on the first rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticated,
}

/// Persistence backend for the single token slot.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Keeps the token in a file so the session survives a process restart.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// In-process slot with no persistence. Used for tests and for callers
/// that do not want sessions to outlive the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.token.lock().expect("token slot poisoned").clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().expect("token slot poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().expect("token slot poisoned") = None;
        Ok(())
    }
}

/// Owner of the one token slot shared by every request. Last writer
/// wins; there is no versioning. Status changes (including the pipeline
/// clearing the slot on a 401) are broadcast to watchers so higher
/// layers can react, e.g. by navigating to a login screen.
pub struct SessionStore {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<String>>,
    status_tx: watch::Sender<SessionStatus>,
}

impl SessionStore {
    /// Open the store, adopting whatever token the backend storage
    /// already holds.
    pub fn new(store: Box<dyn TokenStore>) -> ClientResult<Self> {
        let token = store.load()?;
        let status = if token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };
        let (status_tx, _) = watch::channel(status);
        Ok(Self {
            store,
            token: RwLock::new(token),
            status_tx,
        })
    }

    #[must_use]
    pub fn in_memory() -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Anonymous);
        Self {
            store: Box::new(MemoryTokenStore::default()),
            token: RwLock::new(None),
            status_tx,
        }
    }

    /// Persist a freshly issued token and mark the session
    /// authenticated.
    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        self.store.save(token)?;
        *self.token.write().expect("token slot poisoned") = Some(token.to_string());
        self.status_tx.send_replace(SessionStatus::Authenticated);
        Ok(())
    }

    /// Read the current token without blocking on anything but the slot
    /// itself.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token slot poisoned").clone()
    }

    /// Drop the token and mark the session anonymous. Idempotent.
    pub fn clear(&self) -> ClientResult<()> {
        self.store.clear()?;
        *self.token.write().expect("token slot poisoned") = None;
        self.status_tx.send_replace(SessionStatus::Anonymous);
        Ok(())
    }

    /// Derived from token presence at call time.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("token slot poisoned").is_some()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.status_tx.borrow()
    }

    /// Watch for status changes. Receivers see the current status
    /// immediately and every transition afterwards.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }
}
