//! Prompter host
//!
//! Runs the directive controller headless:
//! - events arrive as JSON lines on stdin (see `input`)
//! - the controller ticks at the configured interval
//! - the active directive and bound media layers are printed to stdout
//!   whenever they change
//!
//! Logs go to stderr; set `RUST_LOG` to adjust (default `info`).
//!
//! Usage: `prompter-host [config.json] < events.jsonl`

mod input;
mod render;

use std::io;
use std::path::PathBuf;

use prompter_runtime::{Controller, PrompterConfig};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::EnvFilter;

use render::TextRenderer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            PrompterConfig::load(&path)?
        }
        None => PrompterConfig::default(),
    };
    let tick_interval = config.runtime.tick_interval();

    let mut controller = Controller::from_config(config)?;
    let mut renderer = TextRenderer::new(io::stdout());
    renderer.draw(&controller.render_view())?;

    let mut input = input::spawn_stdin_reader(controller.event_queue());
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let mut ticker = interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = controller.tick();
                if report.active_changed {
                    info!(active = report.active.as_ref().map(|id| id.as_str()), "active directive changed");
                }
                renderer.draw(&controller.render_view())?;
            }
            _ = &mut input => {
                // Apply whatever the reader queued before it finished
                controller.tick();
                renderer.draw(&controller.render_view())?;
                break;
            }
            _ = &mut interrupt => {
                info!("interrupted");
                break;
            }
        }
    }

    let stats = controller.stats();
    info!(
        ticks = stats.ticks,
        events = stats.events_applied,
        transitions = stats.presence_transitions,
        media_bound = stats.media_bound,
        media_failed = stats.media_failed,
        dropped = controller.dropped_events(),
        "host stopped"
    );
    Ok(())
}
