//! Core systems for Horizon ItemViews.
//!
//! This crate provides the reactive primitives the item-view cell machinery
//! is built on:
//!
//! - [`Signal`] - synchronous, ordered slot dispatch with explicit connections
//! - [`logging`] - tracing target constants shared by the workspace
//!
//! Everything in this crate is single-threaded by design. Item-view cells
//! live on the owning view's event-processing thread, all mutations and slot
//! invocations happen there, and no internal locking exists anywhere in the
//! stack. `Signal` is deliberately `!Send` and `!Sync`.

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
