//! Signal/slot system for Horizon ItemViews.
//!
//! Signals are emitted by objects when their state changes and connected
//! slots (callbacks) are invoked in response, synchronously and in connection
//! order. This is the single-threaded counterpart of a classic signal/slot
//! mechanism: there are no queued or cross-thread connections, an `emit`
//! returns only after every slot has run.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - the signal type for emitting notifications
//! - [`ConnectionId`] - unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Reentrancy
//!
//! Emission snapshots the connected slots before invoking any of them, so a
//! slot may connect or disconnect (including itself) while the signal is
//! being emitted. Slots added during an emission are first invoked on the
//! next emission. A slot must not re-enter state mutators of the object that
//! owns the signal; see the cell documentation for the reentrancy contract.
//!
//! # Example
//!
//! ```
//! use horizon_itemviews_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

struct Connection<Args> {
    slot: Rc<dyn Fn(&Args)>,
}

/// A signal that invokes connected slots when emitted.
///
/// `Signal<Args>` carries a single argument type; use a tuple for multiple
/// values and `()` for none. Slots receive the argument by reference and are
/// invoked in the order they were connected.
pub struct Signal<Args> {
    connections: RefCell<SlotMap<ConnectionId, Connection<Args>>>,
    blocked: Cell<bool>,
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: RefCell::new(SlotMap::with_key()),
            blocked: Cell::new(false),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can later be passed to
    /// [`disconnect`](Self::disconnect).
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        self.connections.borrow_mut().insert(Connection {
            slot: Rc::new(slot),
        })
    }

    /// Connect a slot and tie its lifetime to the returned guard.
    ///
    /// The connection is removed when the [`ConnectionGuard`] is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: self.connect(slot),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.borrow_mut().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.borrow_mut().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.borrow().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.set(blocked);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing. The slot list is
    /// snapshotted before the first invocation, so slots may freely connect
    /// and disconnect during emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(
                target: "horizon_itemviews_core::signal",
                "signal blocked, skipping emit"
            );
            return;
        }

        let slots: Vec<Rc<dyn Fn(&Args)>> = self
            .connections
            .borrow()
            .values()
            .map(|conn| conn.slot.clone())
            .collect();

        tracing::trace!(
            target: "horizon_itemviews_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

// The whole stack is single-threaded; a Signal must never cross threads.
static_assertions::assert_not_impl_any!(Signal<()>: Send, Sync);

/// RAII guard that disconnects a slot when dropped.
///
/// Returned by [`Signal::connect_scoped`]. The guard borrows the signal, so
/// it cannot outlive it; this makes accidental use-after-free of a connection
/// unrepresentable.
pub struct ConnectionGuard<'a, Args> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        let _ = self.signal.disconnect(self.id);
    }
}
