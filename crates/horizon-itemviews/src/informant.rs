//! Size-hint estimation for items without a live cell.
//!
//! The owning view only creates cells for the visible area, yet layout needs
//! an expected size for every item. An informant answers those questions for
//! a representative item; cells merely forward the queries and never
//! implement sizing themselves.

use crate::role::Role;

/// Size hints for a representative item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemSizeHints {
    /// One (logical height, is-exact) pair per visible role, in visible-role
    /// order. An inexact hint is an estimate the view may refine once a real
    /// cell exists.
    pub logical_heights: Vec<(f32, bool)>,
    /// Expected logical width of the whole item.
    pub logical_width: f32,
}

/// Supplies expected sizes for invisible items.
///
/// Implemented by the view integration layer next to the concrete
/// [`CellRenderer`](crate::cell::CellRenderer), since both depend on the same
/// fonts and metrics.
pub trait CellSizeInformant {
    /// Compute height hints per visible role and an overall width hint.
    fn calculate_item_size_hints(&self) -> ItemSizeHints;

    /// Preferred column width for `role` when rendering item `index` in
    /// column-aligned mode.
    fn preferred_role_column_width(&self, role: &Role, index: usize) -> f32;
}
