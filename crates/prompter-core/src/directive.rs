//! Directive definitions
//!
//! A directive is a short instruction shown to the visitor while the
//! installation waits on some condition. Directives are plain values: they
//! are built once at startup and never change afterwards.

use crate::{DirectiveId, Priority};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Well-known directive names used by the default deployment
pub mod names {
    pub const NO_BACKGROUND_VIDEO: &str = "no_background_video";
    pub const NO_FOREGROUND_VIDEO: &str = "no_foreground_video";
    pub const NO_USER: &str = "no_user";
    pub const TOO_MANY_USERS: &str = "too_many_users";
}

/// An advisory message with a name and a priority
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Directive {
    /// Unique name within the catalog
    pub id: DirectiveId,
    /// Text drawn by the renderer while this directive is active
    pub label: String,
    /// Higher priority directives cover lower ones
    pub priority: Priority,
}

impl Directive {
    pub fn new(id: impl Into<DirectiveId>, label: impl Into<String>, priority: impl Into<Priority>) -> Self {
        Directive {
            id: id.into(),
            label: label.into(),
            priority: priority.into(),
        }
    }

    /// The four directives of the stock installation.
    ///
    /// Media gates come first, then the presence directives.
    pub fn defaults() -> Vec<Directive> {
        vec![
            Directive::new(
                names::NO_BACKGROUND_VIDEO,
                "Please drag a background video onto this app!",
                10,
            ),
            Directive::new(
                names::NO_FOREGROUND_VIDEO,
                "Please drag a foreground video onto this app!",
                10,
            ),
            Directive::new(names::NO_USER, "Is anyone there?", 1),
            Directive::new(names::TOO_MANY_USERS, "One person at a time, please!", 1),
        ]
    }
}
