//! Change notifications raised by the localization context.
//!
//! Each event kind has its own listener list. Listeners run synchronously
//! on the thread that made the change, in registration order.

use std::{fmt, path::PathBuf};

use super::locale::Namespace;

/// A locale became the selected one in a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChanged {
    pub namespace: Namespace,
    /// `None` when nothing was selected before.
    pub previous: Option<String>,
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFolderChanged {
    /// `None` when client file generation was switched off.
    pub folder: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyChanged {
    pub key: String,
}

/// Handle returned on registration, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> Listeners<E> {
    pub fn add(&mut self, callback: impl Fn(&E) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns false when the id is not registered (anymore).
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&self, event: &E) {
        for (_, callback) in &self.entries {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// One listener list per event kind.
#[derive(Debug, Default)]
pub struct EventHub {
    pub locale_changed: Listeners<LocaleChanged>,
    pub client_folder_changed: Listeners<ClientFolderChanged>,
    pub cache_key_changed: Listeners<CacheKeyChanged>,
}
