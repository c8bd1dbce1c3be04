use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Topic the orchestrator publishes progress text on.
pub const WORLD_MESSAGE: &str = "world-message";

/// Payload of a progress update. An empty message clears the display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressMessage {
    pub message: String,
}

impl ProgressMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&ProgressMessage)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    topics: FxHashMap<String, Vec<(SubscriptionId, Handler)>>,
}

/// In-process publish/subscribe channel, dispatching synchronously.
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Rc<RefCell<BusInner>>,
}

impl MessageBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, topic: &str, handler: impl Fn(&ProgressMessage) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner
            .topics
            .entry(topic.to_string())
            .or_default()
            .push((id, Rc::new(handler)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let mut found = false;
        for handlers in inner.topics.values_mut() {
            let before = handlers.len();
            handlers.retain(|(sid, _)| *sid != id);
            found |= handlers.len() != before;
        }
        found
    }

    /// Delivers to every subscriber of `topic`, in subscription order.
    pub fn emit(&self, topic: &str, message: &ProgressMessage) {
        // Snapshot so handlers may subscribe or emit re-entrantly.
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .topics
            .get(topic)
            .map(|hs| hs.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();

        log::debug!("bus[{topic}] <- {:?} ({} subscribers)", message.message, handlers.len());
        for handler in handlers {
            handler(message);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner.borrow().topics.get(topic).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MessageBus")
            .field("topics", &inner.topics.keys().collect::<Vec<_>>())
            .finish()
    }
}
