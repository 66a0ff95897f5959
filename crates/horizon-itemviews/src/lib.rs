//! Horizon ItemViews - recyclable item-view cells.
//!
//! A scrolling list or tree view creates cells only for the items currently
//! visible and repurposes them as the user scrolls. This crate provides that
//! cell: role-keyed data with delta notification, compare-then-notify
//! presentation state, an abstract geometry/paint contract for concrete item
//! renderers, a tick-driven hover animation with a cached un-hovered
//! rendering, and a single-role editing session.
//!
//! The view, the item model, the rasterizing backend, and the timer all stay
//! outside: the view mutates cells through setters, implements
//! [`CellPainter`](paint::CellPainter) over its renderer, drives
//! [`ItemListCell::hover_tick`](cell::ItemListCell::hover_tick) from its
//! event loop, and supplies a [`CellSizeInformant`](informant::CellSizeInformant)
//! for invisible-item sizing.
//!
//! # Example
//!
//! ```ignore
//! use horizon_itemviews::{CellRenderer, CellState, ItemListCell, Rect};
//!
//! struct FileCellRenderer { /* fonts, layouts, ... */ }
//!
//! impl CellRenderer for FileCellRenderer {
//!     fn text_rect(&self, cell: &CellState) -> Rect { /* ... */ }
//!     fn selection_rect_full(&self, cell: &CellState) -> Rect { /* ... */ }
//!     fn selection_rect_core(&self, cell: &CellState) -> Rect { /* ... */ }
//!     fn paint(&mut self, cell: &CellState, painter: &mut dyn CellPainter) {
//!         // draw icon + text for cell.value("text") ...
//!     }
//! }
//! ```

pub mod cell;
pub mod easing;
pub mod geometry;
pub mod hover;
pub mod informant;
pub mod paint;
pub mod role;
pub mod siblings;
pub mod style;

#[cfg(test)]
mod tests;

pub use cell::{CellRenderer, CellState, ItemListCell, RoleEditEvent};
pub use easing::{Easing, ease};
pub use geometry::{Point, Rect, Size};
pub use hover::{HoverAnimation, HoverPolicy, HoverState, HoverTransition, TickOutcome};
pub use informant::{CellSizeInformant, ItemSizeHints};
pub use paint::{CachedRender, CellPainter};
pub use role::{Role, RoleMap, RoleSet, RoleValue, changed_roles};
pub use siblings::SiblingsInfo;
pub use style::{CellStyleOption, Color, FontSpec};

pub use horizon_itemviews_core::{ConnectionGuard, ConnectionId, Signal};
