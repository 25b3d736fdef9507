use super::event::{HistoryEvent, ListenerId};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("No history in that direction")]
    NoHistory,
}

type Listener = Box<dyn FnMut(HistoryEvent)>;

/// Browser-style navigation history seeded with a home location.
///
/// `entries` is never empty and `position` always indexes into it.
/// Everything before `position` is back history, everything after it is
/// forward history.
pub struct History<L> {
    entries: Vec<L>,
    position: usize,
    next_listener_id: u64,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl<L> History<L> {
    pub fn new(home: L) -> Self {
        Self {
            entries: vec![home],
            position: 0,
            next_listener_id: 1,
            listeners: BTreeMap::new(),
        }
    }

    /// Records a navigation that did not come from back/forward. Any
    /// forward history is discarded.
    pub fn visit(&mut self, location: L) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position = self.entries.len() - 1;
        log::debug!("History visit, now at {} of {}", self.position, self.entries.len());
        self.notify();
    }

    pub fn go_back(&mut self) -> Result<&L, HistoryError> {
        if !self.is_back_available() {
            return Err(HistoryError::NoHistory);
        }
        self.position -= 1;
        log::debug!("History back, now at {} of {}", self.position, self.entries.len());
        self.notify();
        Ok(&self.entries[self.position])
    }

    pub fn go_forward(&mut self) -> Result<&L, HistoryError> {
        if !self.is_forward_available() {
            return Err(HistoryError::NoHistory);
        }
        self.position += 1;
        log::debug!("History forward, now at {} of {}", self.position, self.entries.len());
        self.notify();
        Ok(&self.entries[self.position])
    }

    pub fn is_back_available(&self) -> bool {
        self.position > 0
    }

    pub fn is_forward_available(&self) -> bool {
        self.position < self.entries.len() - 1
    }

    pub fn status(&self) -> HistoryEvent {
        HistoryEvent::new(self.is_back_available(), self.is_forward_available())
    }

    pub fn current(&self) -> &L {
        &self.entries[self.position]
    }

    pub fn home(&self) -> &L {
        &self.entries[0]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn entries(&self) -> &[L] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the home entry is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a callback run synchronously after every successful
    /// `visit`, `go_back` or `go_forward`. Listeners are called in
    /// registration order.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(HistoryEvent) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn notify(&mut self) {
        let event = self.status();
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for History<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries)
            .field("position", &self.position)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
