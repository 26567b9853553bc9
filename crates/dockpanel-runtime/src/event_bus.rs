// crates/dockpanel-runtime/src/event_bus.rs
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Result, RuntimeError};

/// Payload delivered to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventData {
    /// The default empty payload.
    #[default]
    None,
    Resize {
        width: f32,
        height: f32,
    },
    Text(String),
}

/// Something that can receive published events.
pub trait Subscriber {
    fn notify(&mut self, data: &EventData);
}

/// Shared subscriber handle. Subscriptions are compared by handle identity,
/// so the same handle must be kept around to unsubscribe later.
pub type SharedSubscriber = Rc<RefCell<dyn Subscriber>>;

/// Adapts a plain closure into a [`Subscriber`]. Any state the closure
/// captures plays the role of the subscription context.
pub struct FnSubscriber<F: FnMut(&EventData)> {
    func: F,
}

impl<F: FnMut(&EventData)> Subscriber for FnSubscriber<F> {
    fn notify(&mut self, data: &EventData) {
        (self.func)(data)
    }
}

/// Wrap a closure into a shared subscriber handle.
pub fn observer<F>(func: F) -> SharedSubscriber
where
    F: FnMut(&EventData) + 'static,
{
    Rc::new(RefCell::new(FnSubscriber { func }))
}

/// Ordered set of subscriptions for a single event type.
#[derive(Default)]
pub struct Publisher {
    subscribers: Vec<SharedSubscriber>,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Add a subscriber. A handle that is already subscribed is left in
    /// place (identity comparison); its original position in the delivery
    /// order is kept.
    pub fn subscribe(&mut self, subscriber: &SharedSubscriber) {
        if self.subscribers.iter().any(|s| Rc::ptr_eq(s, subscriber)) {
            return;
        }
        self.subscribers.push(Rc::clone(subscriber));
    }

    /// Remove a subscriber. Fails with [`RuntimeError::NotSubscribed`] if
    /// the handle was never subscribed.
    pub fn unsubscribe(&mut self, subscriber: &SharedSubscriber) -> Result<()> {
        let Some(index) = self
            .subscribers
            .iter()
            .position(|s| Rc::ptr_eq(s, subscriber))
        else {
            return Err(RuntimeError::NotSubscribed(
                "subscriber is not listening".to_string(),
            ));
        };
        self.subscribers.remove(index);
        Ok(())
    }

    /// Deliver `data` to every subscriber in subscription order.
    ///
    /// Delivery walks a snapshot of the subscription list; subscribing or
    /// unsubscribing from inside a notification only takes effect for the
    /// next publish. Re-entrant publishing to the same publisher is not a
    /// supported pattern.
    pub fn publish(&self, data: &EventData) {
        let snapshot: Vec<SharedSubscriber> = self.subscribers.iter().map(Rc::clone).collect();
        for subscriber in snapshot {
            subscriber.borrow_mut().notify(data);
        }
    }
}

/// Registry of publishers keyed by event type, created lazily on first
/// subscribe and kept for the registry's lifetime. Owned by the application
/// root rather than living in ambient global state.
#[derive(Default)]
pub struct EventBus {
    publishers: HashMap<String, Publisher>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event_type: &str, subscriber: &SharedSubscriber) {
        self.publishers
            .entry(event_type.to_string())
            .or_default()
            .subscribe(subscriber);
    }

    pub fn unsubscribe(&mut self, event_type: &str, subscriber: &SharedSubscriber) -> Result<()> {
        let Some(publisher) = self.publishers.get_mut(event_type) else {
            return Err(RuntimeError::NotSubscribed(format!(
                "no subscribers for event type `{event_type}`"
            )));
        };
        publisher.unsubscribe(subscriber)
    }

    /// Publish to every subscriber of `event_type`. Publishing to an event
    /// type nobody has subscribed to is a silent no-op, unlike
    /// `unsubscribe`, which treats the missing publisher as an error.
    pub fn publish(&self, event_type: &str, data: &EventData) {
        if let Some(publisher) = self.publishers.get(event_type) {
            publisher.publish(data);
        }
    }
}

/// Subscribe a plain closure to a publisher, returning the handle needed to
/// disconnect it later.
pub fn connect<F>(publisher: &mut Publisher, func: F) -> SharedSubscriber
where
    F: FnMut(&EventData) + 'static,
{
    let subscriber = observer(func);
    publisher.subscribe(&subscriber);
    subscriber
}

/// Remove a previously connected subscriber from a publisher.
pub fn disconnect(publisher: &mut Publisher, subscriber: &SharedSubscriber) -> Result<()> {
    publisher.unsubscribe(subscriber)
}
