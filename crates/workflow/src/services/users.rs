//! User directory trait and in-memory implementation.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::UserId;

use crate::error::WorkflowError;

/// Trait for user existence checks.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns true if a user exists with the given ID.
    async fn user_exists(&self, id: UserId) -> Result<bool, WorkflowError>;
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashSet<UserId>,
    fail_on_lookup: bool,
}

/// In-memory user directory for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryUserState>>,
}

impl InMemoryUserDirectory {
    /// Creates a new in-memory user directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user.
    pub fn add_user(&self, id: UserId) {
        self.state.write().unwrap().users.insert(id);
    }

    /// Returns the number of registered users.
    pub fn user_count(&self) -> usize {
        self.state.read().unwrap().users.len()
    }

    /// Configures the directory to fail on the next lookup call.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn user_exists(&self, id: UserId) -> Result<bool, WorkflowError> {
        let state = self.state.read().unwrap();

        if state.fail_on_lookup {
            return Err(WorkflowError::UserService(
                "User directory unreachable".to_string(),
            ));
        }

        Ok(state.users.contains(&id))
    }
}
