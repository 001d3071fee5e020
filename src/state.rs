//! Shared application state handed to the router

use crate::auth::{gate::Authenticator, password::CredentialHasher, user_store::UserStore};
use crate::todos::TodoStore;
use std::sync::Arc;

/// Built once in `main` and cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub todos: Arc<TodoStore>,
    pub authenticator: Arc<Authenticator>,
    pub hasher: CredentialHasher,
}

impl AppState {
    /// Stores over an already-migrated database.
    pub fn new(db_path: &str, authenticator: Arc<Authenticator>, hasher: CredentialHasher) -> Self {
        Self {
            users: Arc::new(UserStore::new(db_path)),
            todos: Arc::new(TodoStore::new(db_path)),
            authenticator,
            hasher,
        }
    }
}
