/// Identifies a registered listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listener registry for change notifications.
///
/// Ordering contract: listeners are invoked in subscription order on every
/// notify.
pub struct Subscribers<T> {
    next: u64,
    entries: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener.
    ///
    /// Returns `true` if the listener existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, payload: &T) {
        for (_, listener) in &mut self.entries {
            listener(payload);
        }
    }
}

impl<T> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Subscribers;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs: Subscribers<String> = Subscribers::new();

        let first = seen.clone();
        subs.subscribe(move |id| first.borrow_mut().push(format!("first:{id}")));
        let second = seen.clone();
        subs.subscribe(move |id| second.borrow_mut().push(format!("second:{id}")));

        subs.notify(&"photo-1".to_string());
        assert_eq!(
            *seen.borrow(),
            vec!["first:photo-1".to_string(), "second:photo-1".to_string()]
        );
    }

    #[test]
    fn unsubscribe_removes_listener_once() {
        let count = Rc::new(RefCell::new(0u32));
        let mut subs: Subscribers<String> = Subscribers::new();

        let counter = count.clone();
        let id = subs.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));

        subs.notify(&"photo-1".to_string());
        assert_eq!(*count.borrow(), 0);
        assert!(subs.is_empty());
    }
}
