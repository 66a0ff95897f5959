//! Logging facilities for Horizon ItemViews.
//!
//! The workspace is instrumented with the `tracing` crate. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! All emit sites use one of the targets below so subsystems can be filtered
//! individually, e.g. `RUST_LOG=horizon_itemviews::hover=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_itemviews_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_itemviews_core::signal";
    /// Cell state and change hooks.
    pub const CELL: &str = "horizon_itemviews::cell";
    /// Hover animation state machine.
    pub const HOVER: &str = "horizon_itemviews::hover";
}
