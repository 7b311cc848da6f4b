//! Pure callback-list event bus.
//!
//! Handler exceptions (panics) are caught and discarded — they must never
//! propagate to the emitter. This backs every named event stream the
//! runtime emits (`nidra:*`, `triguna:*`, `prana:*`, router events).

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

type Handler<T> = Box<dyn Fn(&T) + Send + Sync>;

pub struct EventBus<T> {
    handlers: Mutex<Vec<Handler<T>>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self { handlers: Mutex::new(Vec::new()) }
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Returns nothing addressable — this is a plain
    /// callback list, and subscriptions live for the lifetime of the bus.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.handlers.lock().unwrap().push(Box::new(handler));
    }

    /// Best-effort emission: every handler runs, a panicking handler is
    /// swallowed, and emission continues to the remaining handlers.
    pub fn emit(&self, event: &T) {
        let handlers = self.handlers.lock().unwrap();
        for handler in handlers.iter() {
            let _ = catch_unwind(AssertUnwindSafe(|| handler(event)));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }
}
