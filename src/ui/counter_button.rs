use super::view::Render;
use crate::observable::{Observable, SubscriptionHandle};
use std::cell::RefCell;
use std::rc::Rc;

/// Button that counts how many times it was clicked.
///
/// The count is an [`Observable`]; the label is just another subscriber
/// that rewrites `Clicks: N` whenever the count changes.
#[derive(Debug)]
pub struct CounterButton {
    counter: Observable<i64>,
    label: Rc<RefCell<String>>,
    label_subscription: SubscriptionHandle,
}

impl CounterButton {
    pub fn new(initval: i64) -> Self {
        let counter = Observable::new(initval);
        let label = Rc::new(RefCell::new(Self::label_for(initval)));

        let sink = Rc::clone(&label);
        let label_subscription = counter.subscribe(move |_old, new| {
            *sink.borrow_mut() = Self::label_for(*new);
        });

        Self {
            counter,
            label,
            label_subscription,
        }
    }

    fn label_for(count: i64) -> String {
        format!("Clicks: {count}")
    }

    /// Register a click. Returns the new count.
    pub fn click(&self) -> i64 {
        let next = self.count().saturating_add(1);
        self.counter.set(next);
        next
    }

    /// Timer tick: subtract one from the count. Returns the new count.
    pub fn decrement(&self) -> i64 {
        let next = self.count().saturating_sub(1);
        self.counter.set(next);
        next
    }

    pub fn count(&self) -> i64 {
        self.counter.get()
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    /// The underlying counter, for callers that want their own listeners.
    pub fn counter(&self) -> &Observable<i64> {
        &self.counter
    }
}

impl Render for CounterButton {
    fn render(&self) -> String {
        format!("[{}]", self.label.borrow())
    }
}

impl Drop for CounterButton {
    fn drop(&mut self) {
        self.counter.unsubscribe(self.label_subscription);
    }
}
