//! Identity and priority primitives
//!
//! Directives are addressed two ways: by their deployment-facing name
//! (`DirectiveId`) and by their slot in the catalog table (`DirectiveKey`).
//! Names come from configuration and events; keys are what the stack stores.

use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Directive identity - unique name within a catalog (e.g. `no_user`)
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DirectiveId(String);

impl DirectiveId {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        DirectiveId(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DirectiveId {
    fn from(name: &str) -> Self {
        DirectiveId(name.to_owned())
    }
}

impl From<String> for DirectiveId {
    fn from(name: String) -> Self {
        DirectiveId(name)
    }
}

impl Borrow<str> for DirectiveId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DirectiveId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DirectiveId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DirectiveId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for DirectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Directive({})", self.0)
    }
}

impl fmt::Display for DirectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slot of a directive in the catalog table.
///
/// Keys are only meaningful for the catalog that issued them. A key stays
/// valid for the catalog's lifetime; re-registering a name reuses its slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectiveKey(pub(crate) u32);

impl DirectiveKey {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DirectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

/// Directive priority - higher values are more prominent
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Priority(pub i32);

impl Priority {
    #[inline]
    pub fn new(value: i32) -> Self {
        Priority(value)
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pri({})", self.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
