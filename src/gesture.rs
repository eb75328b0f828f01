//! Drag gesture state and scoped pointer subscriptions.
//!
//! While a thumb is dragged the host must deliver pointer moves and the
//! closing pointer-up from anywhere on screen, not only over the thumb.
//! [`PointerListeners`] is the host-visible registry of those global
//! listeners; a [`Subscription`] holds one move+up pair and releases both
//! when dropped, so every way out of a drag leaves the registry clean.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

/// Kind of global pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Move,
    Up,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: Vec<(u64, ListenerKind)>,
}

impl Registry {
    fn add(&mut self, kind: ListenerKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push((id, kind));
        id
    }

    fn remove(&mut self, id: u64) {
        self.active.retain(|(active_id, _)| *active_id != id);
    }
}

/// Shared registry of global pointer listeners.
///
/// Cloning yields another handle to the same registry. Single-threaded: the
/// engine runs inside the host's event handlers.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    inner: Rc<RefCell<Registry>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a move listener and an up listener as one handle.
    pub fn subscribe(&self) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let move_id = registry.add(ListenerKind::Move);
        let up_id = registry.add(ListenerKind::Up);
        debug!(move_id, up_id, "pointer listeners acquired");
        Subscription {
            listeners: self.clone(),
            move_id,
            up_id,
        }
    }

    /// Whether a listener of `kind` is currently registered.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.inner.borrow().active.iter().any(|(_, k)| *k == kind)
    }

    /// Number of registered listeners.
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

/// Owned move+up listener pair; both are released together on drop.
#[derive(Debug)]
pub struct Subscription {
    listeners: PointerListeners,
    move_id: u64,
    up_id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self.listeners.inner.borrow_mut();
        registry.remove(self.move_id);
        registry.remove(self.up_id);
        debug!(
            move_id = self.move_id,
            up_id = self.up_id,
            "pointer listeners released"
        );
    }
}

/// Drag gesture state. At most one thumb is dragged at a time.
#[derive(Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        index: usize,
        subscription: Subscription,
    },
}

impl Gesture {
    /// Index of the thumb being dragged, if any.
    pub fn active_index(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { index, .. } => Some(*index),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_releases_both_listeners_on_drop() {
        let listeners = PointerListeners::new();
        let sub = listeners.subscribe();
        assert!(listeners.is_listening(ListenerKind::Move));
        assert!(listeners.is_listening(ListenerKind::Up));
        assert_eq!(listeners.active_count(), 2);

        drop(sub);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn releasing_one_pair_keeps_others() {
        let listeners = PointerListeners::new();
        let first = listeners.subscribe();
        let second = listeners.subscribe();
        drop(first);
        assert_eq!(listeners.active_count(), 2);
        drop(second);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn gesture_reports_active_index() {
        let listeners = PointerListeners::new();
        let gesture = Gesture::Dragging {
            index: 1,
            subscription: listeners.subscribe(),
        };
        assert_eq!(gesture.active_index(), Some(1));
        assert!(Gesture::Idle.active_index().is_none());
    }
}
