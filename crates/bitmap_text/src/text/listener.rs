//! Change notifications for text entities

use std::fmt;
use std::sync::Arc;

use crate::foundation::collections::{new_key_type, HandleMap};
use crate::foundation::math::Vec2;

new_key_type! {
    /// Handle of a registered change listener
    pub struct ListenerId;
}

/// Observer of a text entity
///
/// Both callbacks default to doing nothing, so implementors only override
/// what they care about. Callbacks run synchronously on the thread that
/// caused the change.
pub trait TextChangeListener: Send + Sync {
    /// The block size changed after a layout pass
    fn text_size_changed(&self, _source: &str, _size: Vec2) {}

    /// The faded alpha changed during a draw pass
    fn text_alpha_changed(&self, _source: &str, _alpha: f32) {}
}

/// Registry of listeners, each registered at most once
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: HandleMap<ListenerId, Arc<dyn TextChangeListener>>,
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ChangeNotifier {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`, or return its existing id if already registered
    pub fn add(&mut self, listener: Arc<dyn TextChangeListener>) -> ListenerId {
        if let Some(id) = self.find(&listener) {
            return id;
        }
        self.listeners.insert(listener)
    }

    /// Unregister `listener`; returns whether it was registered
    pub fn remove(&mut self, listener: &Arc<dyn TextChangeListener>) -> bool {
        self.find(listener)
            .is_some_and(|id| self.listeners.remove(id).is_some())
    }

    /// Unregister by id; returns whether the id was live
    pub fn remove_by_id(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Tell every listener the block size changed
    pub fn notify_size_changed(&self, source: &str, size: Vec2) {
        for listener in self.listeners.values() {
            listener.text_size_changed(source, size);
        }
    }

    /// Tell every listener the alpha changed
    pub fn notify_alpha_changed(&self, source: &str, alpha: f32) {
        for listener in self.listeners.values() {
            listener.text_alpha_changed(source, alpha);
        }
    }

    fn find(&self, listener: &Arc<dyn TextChangeListener>) -> Option<ListenerId> {
        self.listeners
            .iter()
            .find(|(_, registered)| Arc::ptr_eq(registered, listener))
            .map(|(id, _)| id)
    }
}
