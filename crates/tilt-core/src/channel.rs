//! Input channels and revocable subscriptions.
//!
//! Every inbound source (accelerometer, pointer, timer, color command) is
//! exposed as an [`InputChannel`]. Subscribing hands back a [`Subscription`]
//! which unsubscribes when dropped, so a torn-down view never keeps callbacks
//! alive.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("input source unavailable: {0}")]
    Unavailable(String),

    #[error("permission to use input source was denied")]
    PermissionDenied,

    #[error("host rejected subscription: {0}")]
    Rejected(String),
}

/// Unit event delivered by the fixed-period timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick;

/// Unit event delivered by the "change color" control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleColor;

pub type Handler<T> = Box<dyn FnMut(T)>;

pub trait InputChannel<T> {
    fn subscribe(&mut self, handler: Handler<T>) -> Result<Subscription, ChannelError>;
}

/// Handle to a live subscription. Dropping it runs the unsubscribe action once.
pub struct Subscription {
    label: &'static str,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(label: &'static str, cancel: impl FnOnce() + 'static) -> Self {
        Self {
            label,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            log::debug!("[{}] unsubscribed", self.label);
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.is_active())
            .finish()
    }
}

struct Slots<T> {
    next_id: u64,
    live: usize,
    handlers: Vec<(u64, Handler<T>)>,
    // nesting level of `emit`; removals are deferred while above zero
    depth: usize,
    removed: Vec<u64>,
}

/// In-process channel for hosts that run their own event loop.
///
/// The host calls [`LocalChannel::emit`] from its loop. Handlers may drop
/// subscriptions (their own included) or subscribe while being called. A
/// handler added during an emit first sees the next value, and a nested emit
/// only reaches handlers added since the outer one started.
pub struct LocalChannel<T> {
    label: &'static str,
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Clone for LocalChannel<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: Clone + 'static> LocalChannel<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                live: 0,
                handlers: Vec::new(),
                depth: 0,
                removed: Vec::new(),
            })),
        }
    }

    /// Deliver `value` to every live handler in subscription order.
    /// Returns the number of handlers called.
    pub fn emit(&self, value: T) -> usize {
        let mut dispatch = {
            let mut slots = self.slots.borrow_mut();
            slots.depth += 1;
            std::mem::take(&mut slots.handlers)
        };

        let mut called = 0;
        for (id, handler) in dispatch.iter_mut() {
            if self.slots.borrow().removed.contains(id) {
                continue;
            }
            handler(value.clone());
            called += 1;
        }

        let mut slots = self.slots.borrow_mut();
        dispatch.append(&mut slots.handlers);
        let removed = &slots.removed;
        dispatch.retain(|(id, _)| !removed.contains(id));
        slots.handlers = dispatch;
        slots.depth -= 1;
        if slots.depth == 0 {
            slots.removed.clear();
        }
        called
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().live
    }
}

impl<T: Clone + 'static> InputChannel<T> for LocalChannel<T> {
    fn subscribe(&mut self, handler: Handler<T>) -> Result<Subscription, ChannelError> {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.live += 1;
            slots.handlers.push((id, handler));
            id
        };
        let weak = Rc::downgrade(&self.slots);
        Ok(Subscription::new(self.label, move || {
            let Some(slots) = weak.upgrade() else {
                return;
            };
            let mut slots = slots.borrow_mut();
            slots.live -= 1;
            slots.handlers.retain(|(i, _)| *i != id);
            if slots.depth > 0 {
                // the handler may be checked out by a running emit
                slots.removed.push(id);
            }
        }))
    }
}

/// Channel for a source the host does not have, e.g. an accelerometer on desktop.
#[derive(Clone, Debug)]
pub struct UnavailableChannel {
    reason: String,
}

impl UnavailableChannel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl<T> InputChannel<T> for UnavailableChannel {
    fn subscribe(&mut self, _handler: Handler<T>) -> Result<Subscription, ChannelError> {
        Err(ChannelError::Unavailable(self.reason.clone()))
    }
}
