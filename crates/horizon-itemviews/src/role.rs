//! Roles and role values - the unit of data exchange between the item model
//! and a cell.
//!
//! A role is a named attribute of an item ("text", "size", "iconName", ...).
//! The model supplies a value per role; the cell stores whatever the most
//! recent [`set_data`](crate::cell::ItemListCell::set_data) call delivered
//! and diffs updates so only genuinely changed roles are notified.

use std::any::Any;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::style::Color;

/// The name of an item data role.
///
/// Cheap to clone, hashable, and usable for `HashMap` lookups by `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role(Rc<str>);

impl Role {
    /// Create a role from a name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// The role name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Role({:?})", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

/// The current data values of an item, keyed by role.
pub type RoleMap = HashMap<Role, RoleValue>;

/// A set of role names, e.g. the changed-role set of a data update.
pub type RoleSet = HashSet<Role>;

/// Type-erased container for a role's value.
///
/// Values compare by content; `Custom` payloads compare by identity of the
/// allocation, which is the strictest comparison available for opaque data
/// and errs on the side of notifying.
#[derive(Debug, Default)]
pub enum RoleValue {
    /// No data. Returned for absent roles; never an error.
    #[default]
    None,
    /// Text data.
    Text(String),
    /// Multiple text fragments (e.g. tags).
    TextList(Vec<String>),
    /// Integer data (e.g. a byte count).
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data (e.g. is-directory).
    Bool(bool),
    /// Color data.
    Color(Color),
    /// Name of an icon to resolve through the icon backend.
    Icon(String),
    /// Custom data (type-erased).
    Custom(Rc<dyn Any>),
}

impl Clone for RoleValue {
    fn clone(&self) -> Self {
        match self {
            RoleValue::None => RoleValue::None,
            RoleValue::Text(s) => RoleValue::Text(s.clone()),
            RoleValue::TextList(l) => RoleValue::TextList(l.clone()),
            RoleValue::Int(n) => RoleValue::Int(*n),
            RoleValue::Float(n) => RoleValue::Float(*n),
            RoleValue::Bool(b) => RoleValue::Bool(*b),
            RoleValue::Color(c) => RoleValue::Color(*c),
            RoleValue::Icon(s) => RoleValue::Icon(s.clone()),
            RoleValue::Custom(rc) => RoleValue::Custom(rc.clone()),
        }
    }
}

impl PartialEq for RoleValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RoleValue::None, RoleValue::None) => true,
            (RoleValue::Text(a), RoleValue::Text(b)) => a == b,
            (RoleValue::TextList(a), RoleValue::TextList(b)) => a == b,
            (RoleValue::Int(a), RoleValue::Int(b)) => a == b,
            (RoleValue::Float(a), RoleValue::Float(b)) => a == b,
            (RoleValue::Bool(a), RoleValue::Bool(b)) => a == b,
            (RoleValue::Color(a), RoleValue::Color(b)) => a == b,
            (RoleValue::Icon(a), RoleValue::Icon(b)) => a == b,
            (RoleValue::Custom(a), RoleValue::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl RoleValue {
    /// Returns `true` if this is `RoleValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, RoleValue::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the value as a string slice.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RoleValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RoleValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RoleValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RoleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to downcast a custom value.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        match self {
            RoleValue::Custom(rc) => rc.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<&str> for RoleValue {
    fn from(s: &str) -> Self {
        RoleValue::Text(s.to_owned())
    }
}

impl From<String> for RoleValue {
    fn from(s: String) -> Self {
        RoleValue::Text(s)
    }
}

impl From<i64> for RoleValue {
    fn from(n: i64) -> Self {
        RoleValue::Int(n)
    }
}

impl From<f64> for RoleValue {
    fn from(n: f64) -> Self {
        RoleValue::Float(n)
    }
}

impl From<bool> for RoleValue {
    fn from(b: bool) -> Self {
        RoleValue::Bool(b)
    }
}

/// Compute the roles whose values differ between two data sets.
///
/// Walks the union of both key sets, so added and removed roles count as
/// changed alongside value changes.
pub fn changed_roles(old: &RoleMap, new: &RoleMap) -> RoleSet {
    let mut changed = RoleSet::new();
    for (role, value) in new {
        if old.get(role) != Some(value) {
            changed.insert(role.clone());
        }
    }
    for role in old.keys() {
        if !new.contains_key(role) {
            changed.insert(role.clone());
        }
    }
    changed
}
