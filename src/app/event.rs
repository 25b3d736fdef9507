/// Back/forward availability delivered to history listeners after every
/// state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryEvent {
    pub back_available: bool,
    pub forward_available: bool,
}

impl HistoryEvent {
    pub fn new(back_available: bool, forward_available: bool) -> Self {
        Self {
            back_available,
            forward_available,
        }
    }
}

/// Handle returned by `History::add_listener`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);
