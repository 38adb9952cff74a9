//! Control events
//!
//! Everything the environment can tell the controller arrives as one of
//! these values. Collaborators enqueue them; the controller drains and
//! applies them on its own tick.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One body-tracking frame: a confidence score per detected person
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceFrame {
    pub scores: Vec<f32>,
}

impl PresenceFrame {
    pub fn new(scores: impl Into<Vec<f32>>) -> Self {
        PresenceFrame {
            scores: scores.into(),
        }
    }

    /// Number of people detected with confidence strictly above `threshold`
    pub fn active_count(&self, threshold: f32) -> usize {
        self.scores.iter().filter(|&&score| score > threshold).count()
    }
}

/// Discrete environment event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    /// Presence scores from the body tracker
    Presence {
        scores: Vec<f32>,
    },
    /// Files dropped onto the installation window
    Media {
        paths: Vec<PathBuf>,
    },
    /// Operator dismissed whatever directive is showing
    Dismiss,
}

impl ControlEvent {
    pub fn presence(scores: impl Into<Vec<f32>>) -> Self {
        ControlEvent::Presence {
            scores: scores.into(),
        }
    }

    /// Media drop carrying a single file
    pub fn media(path: impl Into<PathBuf>) -> Self {
        ControlEvent::Media {
            paths: vec![path.into()],
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ControlEvent::Presence { .. } => "presence",
            ControlEvent::Media { .. } => "media",
            ControlEvent::Dismiss => "dismiss",
        }
    }
}
