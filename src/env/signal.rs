use std::{cell::Cell, rc::Rc};

/// An observable external fact: a current value plus a version that increases on every change.
///
/// Engines poll signals once per tick, so a source that never publishes a change simply leaves
/// the engine running on its initial value.
pub trait Signal<T> {
    fn current(&self) -> T;
    fn version(&self) -> u64;
}

/// A signal that never changes.
#[derive(Clone, Copy, Debug)]
pub struct Constant<T>(pub T);

impl<T: Copy> Signal<T> for Constant<T> {
    fn current(&self) -> T {
        self.0
    }

    fn version(&self) -> u64 {
        0
    }
}

/// Host-writable signal. Clones share the same slot, so the host keeps one handle and hands
/// another to the engine.
#[derive(Clone, Debug)]
pub struct SignalCell<T: Copy> {
    slot: Rc<Cell<(T, u64)>>,
}

impl<T: Copy + PartialEq> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(Cell::new((value, 0))),
        }
    }

    /// Publish a value. Setting the current value again is not a change.
    pub fn set(&self, value: T) {
        let (old, version) = self.slot.get();
        if old != value {
            self.slot.set((value, version + 1));
        }
    }

    pub fn get(&self) -> T {
        self.slot.get().0
    }
}

impl<T: Copy + PartialEq> Signal<T> for SignalCell<T> {
    fn current(&self) -> T {
        self.slot.get().0
    }

    fn version(&self) -> u64 {
        self.slot.get().1
    }
}

/// Engine-side subscription: remembers the last observed version and value.
pub struct Watch<T> {
    source: Box<dyn Signal<T>>,
    seen: u64,
    value: T,
}

impl<T: Copy + PartialEq> Watch<T> {
    pub fn new(source: Box<dyn Signal<T>>) -> Self {
        let seen = source.version();
        let value = source.current();
        Self {
            source,
            seen,
            value,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Return the new value if the source changed since the last poll.
    pub fn poll(&mut self) -> Option<T> {
        let version = self.source.version();
        if version == self.seen {
            return None;
        }
        self.seen = version;
        let next = self.source.current();
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(next)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Watch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watch")
            .field("seen", &self.seen)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/env/signal.rs"]
mod tests;
