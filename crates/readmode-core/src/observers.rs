// Author: Dustin Pilgrim
// License: MIT

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback<E> = Box<dyn FnMut(&E) -> bool + Send>;

/// Explicit list of change callbacks.
///
/// A callback returning `false` is dropped after that call, so a subscriber
/// whose channel has closed cleans itself up on the next notify.
pub struct Observers<E> {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback<E>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, f: F) -> SubscriberId
    where
        F: FnMut(&E) -> bool + Send + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Returns whether the subscriber was still registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Calls subscribers in registration order.
    pub fn notify(&mut self, event: &E) {
        self.subscribers.retain_mut(|(_, f)| f(event));
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
