//! Media layers and the binding seam
//!
//! The installation composites two looping videos: one behind the tracked
//! body and one in front of it. Each layer is unlocked by its own gate
//! directive. Decoding and playback live outside this crate; the controller
//! only asks a `MediaBinder` whether a dropped file can back a layer.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use prompter_core::names;

use crate::{MediaError, MediaResult};

/// Media layer the installation composites
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaSlot {
    /// Drawn first, behind the body composite
    Background,
    /// Drawn over the body composite, under the directive label
    Foreground,
}

impl MediaSlot {
    /// Gate directive that waits for this layer
    pub fn gate(self) -> &'static str {
        match self {
            MediaSlot::Background => names::NO_BACKGROUND_VIDEO,
            MediaSlot::Foreground => names::NO_FOREGROUND_VIDEO,
        }
    }

    /// Slots in the order their gates are checked
    pub const ALL: [MediaSlot; 2] = [MediaSlot::Background, MediaSlot::Foreground];
}

impl fmt::Display for MediaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSlot::Background => f.write_str("background"),
            MediaSlot::Foreground => f.write_str("foreground"),
        }
    }
}

/// Binds a dropped file to a media layer.
///
/// An error leaves the layer unbound; the controller does not retry.
pub trait MediaBinder {
    fn bind(&mut self, slot: MediaSlot, path: &Path) -> MediaResult<()>;
}

/// Closure-backed binder
pub struct FnBinder<F: FnMut(MediaSlot, &Path) -> MediaResult<()>>(pub F);

impl<F: FnMut(MediaSlot, &Path) -> MediaResult<()>> MediaBinder for FnBinder<F> {
    fn bind(&mut self, slot: MediaSlot, path: &Path) -> MediaResult<()> {
        (self.0)(slot, path)
    }
}

/// Binder that accepts readable regular files with a known video extension.
///
/// An empty extension list accepts any file.
#[derive(Clone, Debug, Default)]
pub struct FileMediaBinder {
    extensions: Vec<String>,
}

impl FileMediaBinder {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FileMediaBinder {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    fn check_extension(&self, path: &Path) -> MediaResult<()> {
        if self.extensions.is_empty() {
            return Ok(());
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if self.extensions.iter().any(|known| *known == extension) {
            Ok(())
        } else {
            Err(MediaError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    }
}

impl MediaBinder for FileMediaBinder {
    fn bind(&mut self, _slot: MediaSlot, path: &Path) -> MediaResult<()> {
        let unreadable = |source| MediaError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(MediaError::NotAFile(path.to_path_buf()));
        }
        self.check_extension(path)?;
        File::open(path).map_err(unreadable)?;
        Ok(())
    }
}

/// Files currently bound to each layer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundMedia {
    pub background: Option<PathBuf>,
    pub foreground: Option<PathBuf>,
}

impl BoundMedia {
    pub fn get(&self, slot: MediaSlot) -> Option<&Path> {
        match slot {
            MediaSlot::Background => self.background.as_deref(),
            MediaSlot::Foreground => self.foreground.as_deref(),
        }
    }

    pub fn set(&mut self, slot: MediaSlot, path: PathBuf) {
        match slot {
            MediaSlot::Background => self.background = Some(path),
            MediaSlot::Foreground => self.foreground = Some(path),
        }
    }
}
