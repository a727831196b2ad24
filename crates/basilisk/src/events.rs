//! # BASILISK Event Bus
//!
//! Synchronous, type-indexed publish/subscribe between systems.
//!
//! Subscribers are closures keyed by the concrete event type. Emission is
//! synchronous: [`EventBus::emit`] does not return until every handler for
//! exactly that event type has run, in subscription order. There is no
//! propagation to other event types and no queue - an event exists only for
//! the duration of the emit call.
//!
//! ## Subscription lifetime
//!
//! [`EventBus::reset`] discards every subscription. The host calls it once
//! per tick before systems resubscribe, so a subscription lives exactly one
//! tick unless its owner resubscribes every tick. Handlers therefore
//! capture per-tick snapshots instead of long-lived references.
//!
//! ## Re-entrancy
//!
//! Handlers receive `&mut Registry` and may freely mark entities for kill
//! or mutate components. Kills only mark: no system's matched list mutates
//! until the next flush, so emitting from inside a system's iteration is
//! safe.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use basilisk_core::Registry;

/// Type-erased handler. The outer closure restores the concrete event type.
type BoxedHandler = Box<dyn FnMut(&mut Registry, &dyn Any)>;

/// Synchronous typed event dispatcher.
#[derive(Default)]
pub struct EventBus {
    /// Handler lists keyed by concrete event type, in subscription order.
    subscribers: HashMap<TypeId, Vec<BoxedHandler>>,
}

impl EventBus {
    /// Creates a bus with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every subscription for every event type.
    pub fn reset(&mut self) {
        self.subscribers.clear();
    }

    /// Appends a handler for events of exactly type `E`.
    ///
    /// Handlers run in the order they were subscribed since the last
    /// [`EventBus::reset`].
    pub fn subscribe<E, F>(&mut self, mut handler: F)
    where
        E: Any,
        F: FnMut(&mut Registry, &E) + 'static,
    {
        self.subscribers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(move |registry, event| {
                if let Some(event) = event.downcast_ref::<E>() {
                    handler(registry, event);
                }
            }));
    }

    /// Emits one event, invoking every subscriber for exactly type `E`.
    ///
    /// Synchronous: returns only after the last handler has run. Emitting
    /// with zero subscribers succeeds silently with no effect.
    pub fn emit<E: Any>(&mut self, registry: &mut Registry, event: E) {
        match self.subscribers.get_mut(&TypeId::of::<E>()) {
            Some(handlers) => {
                for handler in handlers.iter_mut() {
                    handler(registry, &event);
                }
            }
            None => {
                tracing::trace!(event = type_name::<E>(), "event emitted with no subscribers");
            }
        }
    }

    /// Returns the number of handlers currently subscribed for `E`.
    #[must_use]
    pub fn subscriber_count<E: Any>(&self) -> usize {
        self.subscribers
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}
