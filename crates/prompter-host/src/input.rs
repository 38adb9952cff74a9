//! Event source: JSON lines on stdin
//!
//! One event per line, e.g.
//! `{"type":"presence","scores":[0.9]}`,
//! `{"type":"media","paths":["clips/sea.mov"]}`,
//! `{"type":"dismiss"}`. Blank lines and lines starting with `#` are skipped.

use prompter_runtime::{ControlEvent, EventQueue};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Parse one input line. `None` for lines that carry no event.
pub fn parse_line(line: &str) -> Option<Result<ControlEvent, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Read stdin until EOF, queueing every event. The handle completes when
/// input ends.
pub fn spawn_stdin_reader(queue: EventQueue) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        let mut line_no = 0usize;
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    warn!(?err, "stdin read failed; stopping input");
                    break;
                }
            };
            line_no += 1;

            match parse_line(&line) {
                None => {}
                Some(Ok(event)) => {
                    let kind = event.kind();
                    if !queue.send(event) {
                        warn!(line = line_no, kind, "event queue full; event dropped");
                    }
                }
                Some(Err(err)) => {
                    warn!(line = line_no, %err, "skipping malformed event");
                }
            }
        }
        debug!(lines = line_no, "input closed");
    })
}
