pub mod json_backend;

use crate::{errors::Result, session::SessionSnapshot};

/// Persistence for the session blob owned by `SessionContext`.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionSnapshot>>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub use json_backend::JsonSessionStore;
