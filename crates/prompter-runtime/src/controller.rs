//! Controller - turns environment events into directive stack mutations

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use prompter_core::{names, Directive, DirectiveCatalog, DirectiveId};
use prompter_state::DirectiveStack;
use tracing::{debug, info, warn};

use crate::{
    BoundMedia, ConfigResult, ControlEvent, DeploymentConfig, EventQueue, FileMediaBinder,
    MediaBinder, MediaError, MediaSlot, PresenceFrame, PrompterConfig, RuntimeConfig,
};

#[derive(Clone, Debug, Default)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub events_applied: u64,
    pub presence_frames: u64,
    pub presence_transitions: u64,
    pub media_bound: u64,
    pub media_failed: u64,
    pub media_ignored: u64,
    pub dismissed: u64,
    pub last_tick_duration: Duration,
}

/// Result of applying a presence frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresenceOutcome {
    /// Count matched the previous frame; nothing changed
    Unchanged,
    Transition { from: usize, to: usize },
}

/// Result of applying a media drop
#[derive(Debug)]
pub enum MediaOutcome {
    /// File bound and the slot's gate directive cleared
    Bound(MediaSlot),
    /// Binder refused the file; stack untouched
    Failed { slot: MediaSlot, error: MediaError },
    /// Neither gate directive is active
    NotExpected,
    /// Drops must carry exactly one file
    WrongFileCount(usize),
}

/// Summary of one control tick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events_applied: usize,
    /// Active directive after the tick
    pub active: Option<DirectiveId>,
    /// Whether the active directive differs from the one before the tick
    pub active_changed: bool,
}

/// What the renderer draws this frame, back to front
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderView<'a> {
    pub background: Option<&'a Path>,
    pub foreground: Option<&'a Path>,
    /// Label of the active directive, drawn last
    pub directive: Option<&'a str>,
}

/// Owns the catalog and stack and applies environment events to them.
///
/// Producers hold `EventQueue` handles; `tick` is the only place queued
/// events reach the stack.
pub struct Controller<B: MediaBinder = FileMediaBinder> {
    catalog: DirectiveCatalog,
    stack: DirectiveStack,
    binder: B,
    config: RuntimeConfig,
    queue: EventQueue,
    /// Confident people in the last frame that changed the count
    previous_presence_count: usize,
    media: BoundMedia,
    stats: RuntimeStats,
}

impl Controller<FileMediaBinder> {
    /// Controller for the stock installation, binding media from disk
    pub fn new() -> Self {
        let runtime = RuntimeConfig::default();
        let binder = FileMediaBinder::new(&runtime.media_extensions);
        Self::from_parts(
            DirectiveCatalog::with_defaults(),
            &DeploymentConfig::default().startup,
            runtime,
            binder,
        )
    }

    /// Controller from a validated config, binding media from disk
    pub fn from_config(config: PrompterConfig) -> ConfigResult<Self> {
        let binder = FileMediaBinder::new(&config.runtime.media_extensions);
        Self::build(config, binder)
    }
}

impl Default for Controller<FileMediaBinder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: MediaBinder> Controller<B> {
    /// Controller with a custom media binder
    pub fn with_binder(config: PrompterConfig, binder: B) -> ConfigResult<Self> {
        Self::build(config, binder)
    }

    fn build(config: PrompterConfig, binder: B) -> ConfigResult<Self> {
        config.runtime.validate()?;
        let catalog = config.deployment.build_catalog()?;
        Ok(Self::from_parts(
            catalog,
            &config.deployment.startup,
            config.runtime,
            binder,
        ))
    }

    fn from_parts(
        catalog: DirectiveCatalog,
        startup: &[DirectiveId],
        config: RuntimeConfig,
        binder: B,
    ) -> Self {
        let mut controller = Controller {
            catalog,
            stack: DirectiveStack::new(),
            binder,
            queue: EventQueue::new(config.max_pending_events),
            config,
            previous_presence_count: 0,
            media: BoundMedia::default(),
            stats: RuntimeStats::default(),
        };

        // Order matters: equal priorities keep the earliest push active
        for id in startup {
            controller.stack.push(&controller.catalog, id.as_str());
        }
        info!(
            directives = controller.catalog.len(),
            active = controller.active_id().map(DirectiveId::as_str),
            "controller started"
        );
        controller
    }

    /// Handle for producers of discrete events
    pub fn event_queue(&self) -> EventQueue {
        self.queue.clone()
    }

    /// Register or overwrite a directive.
    ///
    /// If the directive is currently asserted it is re-pushed so the stack
    /// reflects its new priority.
    pub fn register(&mut self, directive: Directive) {
        let key = self.catalog.insert(directive);
        if self.stack.contains_key(key) {
            self.stack.push_key(&self.catalog, key);
        }
    }

    /// Run one control tick: apply queued events in arrival order
    pub fn tick(&mut self) -> TickReport {
        let start = Instant::now();
        self.stats.ticks += 1;
        let before = self.stack.top();

        let mut report = TickReport::default();

        for event in self.queue.drain() {
            self.apply(event);
            report.events_applied += 1;
        }

        self.stats.events_applied += report.events_applied as u64;
        report.active = self.active_id().cloned();
        report.active_changed = self.stack.top() != before;
        self.stats.last_tick_duration = start.elapsed();
        report
    }

    /// Apply a single event immediately
    pub fn apply(&mut self, event: ControlEvent) {
        debug!(kind = event.kind(), "applying event");
        match event {
            ControlEvent::Presence { scores } => {
                self.handle_presence(&PresenceFrame { scores });
            }
            ControlEvent::Media { paths } => {
                self.handle_media(&paths);
            }
            ControlEvent::Dismiss => {
                self.dismiss();
            }
        }
    }

    /// Apply a presence frame. Only a change in the confident-person count
    /// touches the stack.
    pub fn handle_presence(&mut self, frame: &PresenceFrame) -> PresenceOutcome {
        self.stats.presence_frames += 1;

        let active_count = frame.active_count(self.config.presence_threshold);
        if active_count == self.previous_presence_count {
            return PresenceOutcome::Unchanged;
        }

        match active_count {
            0 => {
                self.stack.remove(&self.catalog, names::TOO_MANY_USERS);
                self.stack.push(&self.catalog, names::NO_USER);
            }
            1 => {
                self.stack.remove(&self.catalog, names::NO_USER);
                self.stack.remove(&self.catalog, names::TOO_MANY_USERS);
            }
            _ => {
                self.stack.remove(&self.catalog, names::NO_USER);
                self.stack.push(&self.catalog, names::TOO_MANY_USERS);
            }
        }

        let from = self.previous_presence_count;
        self.previous_presence_count = active_count;
        self.stats.presence_transitions += 1;
        info!(from, to = active_count, "presence count changed");

        PresenceOutcome::Transition {
            from,
            to: active_count,
        }
    }

    /// Apply a file drop.
    ///
    /// A gate only reacts while its directive is the active one; a drop that
    /// arrives while anything else is showing is ignored, not deferred.
    pub fn handle_media(&mut self, paths: &[PathBuf]) -> MediaOutcome {
        let [path] = paths else {
            debug!(files = paths.len(), "media drop ignored: expected exactly one file");
            self.stats.media_ignored += 1;
            return MediaOutcome::WrongFileCount(paths.len());
        };

        let Some(slot) = MediaSlot::ALL
            .into_iter()
            .find(|slot| self.stack.is_top(&self.catalog, slot.gate()))
        else {
            debug!(path = %path.display(), "media drop ignored: no media gate active");
            self.stats.media_ignored += 1;
            return MediaOutcome::NotExpected;
        };

        match self.binder.bind(slot, path) {
            Ok(()) => {
                self.stack.remove(&self.catalog, slot.gate());
                self.media.set(slot, path.clone());
                self.stats.media_bound += 1;
                info!(%slot, path = %path.display(), "media bound");
                MediaOutcome::Bound(slot)
            }
            Err(error) => {
                self.stats.media_failed += 1;
                warn!(%slot, path = %path.display(), %error, "media bind failed");
                MediaOutcome::Failed { slot, error }
            }
        }
    }

    /// Remove whatever directive is active
    pub fn dismiss(&mut self) -> Option<DirectiveId> {
        let key = self.stack.pop_top()?;
        self.stats.dismissed += 1;
        let id = self.catalog.get(key).map(|d| d.id.clone());
        info!(directive = ?id, "active directive dismissed");
        id
    }

    /// The active directive
    pub fn top(&self) -> Option<&Directive> {
        self.stack.top_directive(&self.catalog)
    }

    /// Name of the active directive
    pub fn active_id(&self) -> Option<&DirectiveId> {
        self.top().map(|d| &d.id)
    }

    /// Label of the active directive, `None` when nothing is asserted
    pub fn active_label(&self) -> Option<&str> {
        self.top().map(|d| d.label.as_str())
    }

    pub fn is_top(&self, id: &str) -> bool {
        self.stack.is_top(&self.catalog, id)
    }

    /// Everything the renderer needs for one frame
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            background: self.media.get(MediaSlot::Background),
            foreground: self.media.get(MediaSlot::Foreground),
            directive: self.active_label(),
        }
    }

    /// Asserted directive names, front to back
    pub fn stack_names(&self) -> Vec<&str> {
        self.stack.names(&self.catalog)
    }

    pub fn catalog(&self) -> &DirectiveCatalog {
        &self.catalog
    }

    pub fn stack(&self) -> &DirectiveStack {
        &self.stack
    }

    pub fn bound_media(&self) -> &BoundMedia {
        &self.media
    }

    pub fn presence_count(&self) -> usize {
        self.previous_presence_count
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    /// Events dropped by a full queue plus presence frames overwritten
    /// before a tick could see them
    pub fn dropped_events(&self) -> u64 {
        self.queue.dropped() + self.queue.overwritten()
    }
}
