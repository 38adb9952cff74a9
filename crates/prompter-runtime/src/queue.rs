//! Producer handle
//!
//! Sensor callbacks and file-drop handlers run outside the control tick and
//! hand their events to a cloneable `EventQueue`. The queue is one FIFO, so
//! the tick applies events in the order they arrived.
//!
//! Presence frames are coalesced: at most one frame is pending. Publishing a
//! new frame drops the pending one and queues the new frame at the back,
//! at its own arrival point. Discrete events beyond the capacity are dropped.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ControlEvent;

#[derive(Debug)]
struct QueueInner {
    events: VecDeque<ControlEvent>,
    capacity: usize,
    dropped: u64,
    overwritten: u64,
}

impl QueueInner {
    fn push_presence(&mut self, event: ControlEvent) {
        let stale = self
            .events
            .iter()
            .position(|queued| matches!(queued, ControlEvent::Presence { .. }));
        if let Some(index) = stale {
            self.events.remove(index);
            self.overwritten += 1;
        }
        self.events.push_back(event);
    }
}

/// Bounded multi-producer queue of control events
#[derive(Clone, Debug)]
pub struct EventQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        EventQueue {
            inner: Arc::new(Mutex::new(QueueInner {
                events: VecDeque::new(),
                capacity,
                dropped: 0,
                overwritten: 0,
            })),
        }
    }

    /// Queue an event. Returns `false` if the queue was full and the event
    /// was dropped.
    ///
    /// A presence frame is always accepted; it replaces any frame still
    /// pending.
    pub fn send(&self, event: ControlEvent) -> bool {
        let mut inner = self.inner.lock();
        if matches!(event, ControlEvent::Presence { .. }) {
            inner.push_presence(event);
            return true;
        }
        if inner.events.len() >= inner.capacity {
            inner.dropped += 1;
            return false;
        }
        inner.events.push_back(event);
        true
    }

    /// Take every queued event in arrival order
    pub fn drain(&self) -> Vec<ControlEvent> {
        self.inner.lock().events.drain(..).collect()
    }

    /// Get number of queued events
    pub fn len(&self) -> usize {
        self.inner.lock().events.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().events.is_empty()
    }

    /// Total events dropped because the queue was full
    pub fn dropped(&self) -> u64 {
        self.inner.lock().dropped
    }

    /// Total presence frames replaced before the controller saw them
    pub fn overwritten(&self) -> u64 {
        self.inner.lock().overwritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_queue_fifo_and_overflow() {
        let queue = EventQueue::new(2);

        assert!(queue.send(ControlEvent::media("a.mov")));
        assert!(queue.send(ControlEvent::Dismiss));
        assert!(!queue.send(ControlEvent::media("b.mov")));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);

        let events = queue.drain();
        assert_eq!(events, vec![ControlEvent::media("a.mov"), ControlEvent::Dismiss]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_shared_across_threads() {
        let queue = EventQueue::new(64);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let producer = queue.clone();
                thread::spawn(move || {
                    for _ in 0..8 {
                        producer.send(ControlEvent::Dismiss);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.drain().len(), 32);
    }

    #[test]
    fn test_presence_keeps_latest_at_arrival_point() {
        let queue = EventQueue::new(4);

        queue.send(ControlEvent::presence(vec![0.9]));
        queue.send(ControlEvent::Dismiss);
        queue.send(ControlEvent::presence(vec![0.9, 0.8]));

        assert_eq!(
            queue.drain(),
            vec![ControlEvent::Dismiss, ControlEvent::presence(vec![0.9, 0.8])]
        );
        assert_eq!(queue.overwritten(), 1);
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn test_presence_accepted_when_full() {
        let queue = EventQueue::new(1);

        assert!(queue.send(ControlEvent::Dismiss));
        assert!(queue.send(ControlEvent::presence(vec![0.9])));
        assert!(!queue.send(ControlEvent::Dismiss));
        assert_eq!(queue.len(), 2);
    }
}
