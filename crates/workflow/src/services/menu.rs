//! Menu catalog trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::MenuItemId;
use domain::Money;

use crate::error::WorkflowError;

/// A menu entry as the catalog reports it.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display name of the item.
    pub name: String,
    /// Current unit price.
    pub price: Money,
    /// Whether the item can currently be ordered.
    pub available: bool,
}

/// Trait for menu catalog lookups.
#[async_trait]
pub trait MenuLookup: Send + Sync {
    /// Looks up a menu item by ID.
    ///
    /// Returns `None` if no item exists with that ID.
    async fn menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, WorkflowError>;
}

#[derive(Debug, Default)]
struct InMemoryMenuState {
    items: HashMap<MenuItemId, MenuItem>,
    fail_on_lookup: bool,
}

/// In-memory menu catalog for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMenuCatalog {
    state: Arc<RwLock<InMemoryMenuState>>,
}

impl InMemoryMenuCatalog {
    /// Creates a new in-memory menu catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an orderable item to the catalog, replacing any entry
    /// already stored under the same ID.
    pub fn add_item(&self, id: MenuItemId, name: impl Into<String>, price: Money) {
        self.state.write().unwrap().items.insert(
            id,
            MenuItem {
                name: name.into(),
                price,
                available: true,
            },
        );
    }

    /// Adds an item that exists but cannot currently be ordered.
    pub fn add_unavailable_item(&self, id: MenuItemId, name: impl Into<String>, price: Money) {
        self.state.write().unwrap().items.insert(
            id,
            MenuItem {
                name: name.into(),
                price,
                available: false,
            },
        );
    }

    /// Marks an existing item as available or not.
    pub fn set_available(&self, id: MenuItemId, available: bool) {
        if let Some(item) = self.state.write().unwrap().items.get_mut(&id) {
            item.available = available;
        }
    }

    /// Configures the catalog to fail on the next lookup call.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }

    /// Returns the number of catalog entries.
    pub fn item_count(&self) -> usize {
        self.state.read().unwrap().items.len()
    }
}

#[async_trait]
impl MenuLookup for InMemoryMenuCatalog {
    async fn menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, WorkflowError> {
        let state = self.state.read().unwrap();

        if state.fail_on_lookup {
            return Err(WorkflowError::MenuService(
                "Menu catalog unreachable".to_string(),
            ));
        }

        Ok(state.items.get(&id).cloned())
    }
}
