//! Process-wide "current client" handle.
//!
//! Compatibility shim for collaborators (such as generated response types)
//! that cannot be handed a [`Client`] explicitly. The slot is written only
//! when a client is constructed, with a single atomic swap, and always holds
//! the most recently constructed client.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use once_cell::sync::Lazy;

use crate::client::core::{Client, ClientInner};
use crate::{Error, Result};

/// A single replaceable client reference.
pub struct ClientSlot {
    current: ArcSwapOption<ClientInner>,
}

impl ClientSlot {
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    pub fn install(&self, client: &Client) {
        self.current.store(Some(Arc::clone(&client.inner)));
    }

    /// The installed client, or [`Error::NotInitialized`] if none ever was.
    pub fn current(&self) -> Result<Client> {
        self.current
            .load_full()
            .map(|inner| Client { inner })
            .ok_or(Error::NotInitialized)
    }
}

impl Default for ClientSlot {
    fn default() -> Self {
        Self::new()
    }
}

static CURRENT: Lazy<ClientSlot> = Lazy::new(ClientSlot::new);

pub(crate) fn install(client: &Client) {
    CURRENT.install(client);
}

pub(crate) fn current() -> Result<Client> {
    CURRENT.current()
}
