//! Sibling information for tree branch rendering.
//!
//! Tree views draw connector lines to the left of an item: one vertical line
//! per ancestor level that still has siblings below the current row. The view
//! summarizes that per-level knowledge as an ordered bit sequence and copies
//! it into the cell; the cell never references sibling cells directly.

use std::fmt;

/// Ordered bit sequence describing which ancestor levels have further
/// siblings.
///
/// The first (most significant) bit belongs to the topmost ancestor, the
/// last bit to the item itself. An empty sequence means the item is a root
/// with no branch lines to draw.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SiblingsInfo {
    bits: Vec<bool>,
}

impl SiblingsInfo {
    /// Create an empty sibling description (root item).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from explicit bits, topmost ancestor first.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of levels described (tree depth of the item).
    #[inline]
    pub fn depth(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether the ancestor at `level` (0 = topmost) has a further sibling.
    ///
    /// Out-of-range levels read as `false`.
    #[inline]
    pub fn has_sibling(&self, level: usize) -> bool {
        self.bits.get(level).copied().unwrap_or(false)
    }

    /// Whether the item itself has a further sibling.
    #[inline]
    pub fn item_has_sibling(&self) -> bool {
        self.bits.last().copied().unwrap_or(false)
    }

    /// Iterate levels from the topmost ancestor down to the item.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Debug for SiblingsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiblingsInfo(")?;
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        write!(f, ")")
    }
}

impl From<Vec<bool>> for SiblingsInfo {
    fn from(bits: Vec<bool>) -> Self {
        Self::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_topmost_first() {
        let info = SiblingsInfo::from_bits(vec![true, false, true]);
        assert_eq!(info.depth(), 3);
        assert!(info.has_sibling(0)); // topmost ancestor
        assert!(!info.has_sibling(1));
        assert!(info.item_has_sibling());
    }

    #[test]
    fn test_out_of_range_reads_false() {
        let info = SiblingsInfo::new();
        assert!(!info.has_sibling(0));
        assert!(!info.item_has_sibling());
    }
}
