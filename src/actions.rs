//! Completion callbacks and the deferred dispatch queue
//!
//! Tweens and frame animations never call back into game logic directly.
//! They push an [`ActionCallback`] onto a [`CallbackQueue`], and the driver
//! drains the queue once every actor has finished its update for the tick.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token identifying the game-logic continuation to resume.
///
/// The token is persisted together with in-flight tweens, so it is a plain
/// name rather than a closure. The driver decides what a name means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCallback(String);

impl ActionCallback {
    pub fn new(name: impl Into<String>) -> Self {
        ActionCallback(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({})", self.0)
    }
}

/// FIFO list of callbacks waiting to be dispatched by the driver.
#[derive(Debug, Default)]
pub struct CallbackQueue {
    pending: VecDeque<ActionCallback>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a callback for dispatch after the current update pass.
    pub fn push(&mut self, callback: ActionCallback) {
        log::debug!("Queued {}", callback);
        self.pending.push_back(callback);
    }

    /// Queue the callback if there is one.
    pub fn push_opt(&mut self, callback: Option<ActionCallback>) {
        if let Some(cb) = callback {
            self.push(cb);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued callback in insertion order.
    ///
    /// Callbacks queued while the returned iterator is consumed land in the
    /// queue for the next drain, not in this one.
    pub fn drain(&mut self) -> std::collections::vec_deque::IntoIter<ActionCallback> {
        std::mem::take(&mut self.pending).into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_fifo_order() {
        let mut queue = CallbackQueue::new();
        queue.push(ActionCallback::new("first"));
        queue.push(ActionCallback::new("second"));
        queue.push_opt(None);
        queue.push_opt(Some(ActionCallback::new("third")));

        let names: Vec<String> = queue.drain().map(|cb| cb.name().to_string()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_leaves_later_pushes_for_next_tick() {
        let mut queue = CallbackQueue::new();
        queue.push(ActionCallback::new("a"));

        let drained: Vec<_> = queue.drain().collect();
        queue.push(ActionCallback::new("b"));

        assert_eq!(drained.len(), 1);
        assert_eq!(queue.len(), 1);
    }
}
