//! Structured progress events emitted by the round engine.
//!
//! The engine never installs a logger. It reports [`RoundEvent`]s to a
//! [`RoundObserver`] chosen by the caller; [`LogObserver`] forwards them to
//! the `log` facade and is what [`match_and_merge`](super::match_and_merge)
//! uses.

/// One step of an assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Input accepted; rounds are about to start.
    Started { vertices: usize, edges: usize, k: i64 },
    /// `k` was refused before any round ran.
    Rejected { k: i64, vertices: usize },
    /// `k` was 0 or 1; answered without matching.
    Trivial { k: i64, groups: usize },
    /// The oracle returned `pairs` pairs on a level with `nodes` nodes.
    Matched {
        round: usize,
        nodes: usize,
        edges: usize,
        pairs: usize,
    },
    /// The next level was built.
    Contracted {
        round: usize,
        nodes: usize,
        edges: usize,
    },
    /// A group larger than `k` came out of an unchecked run.
    BoundExceeded { k: i64, largest_group: usize },
    /// The partition is ready.
    Finished {
        rounds: usize,
        groups: usize,
        largest_group: usize,
    },
}

/// Receives the events of an assignment run in order.
pub trait RoundObserver {
    fn on_event(&mut self, event: &RoundEvent);
}

impl<O: RoundObserver + ?Sized> RoundObserver for &mut O {
    fn on_event(&mut self, event: &RoundEvent) {
        (**self).on_event(event);
    }
}

/// Forwards events to the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RoundObserver for LogObserver {
    fn on_event(&mut self, event: &RoundEvent) {
        match *event {
            RoundEvent::Started { vertices, edges, k } => {
                log::info!("match-and-merge: {vertices} vertices, {edges} edges, k = {k}");
            }
            RoundEvent::Rejected { k, vertices } => {
                log::error!("match-and-merge: rejected k = {k} for {vertices} vertices");
            }
            RoundEvent::Trivial { k, groups } => {
                log::info!("match-and-merge: k = {k}, returning {groups} groups without matching");
            }
            RoundEvent::Matched {
                round,
                nodes,
                edges,
                pairs,
            } => {
                log::debug!("round {round}: matched {pairs} pairs on {nodes} nodes / {edges} edges");
            }
            RoundEvent::Contracted {
                round,
                nodes,
                edges,
            } => {
                log::debug!("round {round}: next level has {nodes} nodes / {edges} edges");
            }
            RoundEvent::BoundExceeded { k, largest_group } => {
                log::warn!("match-and-merge: group of {largest_group} exceeds k = {k}");
            }
            RoundEvent::Finished {
                rounds,
                groups,
                largest_group,
            } => {
                log::info!(
                    "match-and-merge: {groups} groups after {rounds} rounds (largest {largest_group})"
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {
    fn on_event(&mut self, _event: &RoundEvent) {}
}

/// Keeps every event, for tests and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingObserver {
    events: Vec<RoundEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<RoundEvent> {
        self.events
    }

    /// Number of `Matched` events seen, i.e. rounds executed.
    pub fn rounds(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RoundEvent::Matched { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RoundObserver for RecordingObserver {
    fn on_event(&mut self, event: &RoundEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<O: RoundObserver>(mut observer: O, events: &[RoundEvent]) {
        for e in events {
            observer.on_event(e);
        }
    }

    #[test]
    fn recording_through_a_mut_ref() {
        let mut rec = RecordingObserver::new();
        feed(
            &mut rec,
            &[
                RoundEvent::Started {
                    vertices: 3,
                    edges: 2,
                    k: 2,
                },
                RoundEvent::Matched {
                    round: 1,
                    nodes: 3,
                    edges: 2,
                    pairs: 1,
                },
            ],
        );
        assert_eq!(rec.events().len(), 2);
        assert_eq!(rec.rounds(), 1);
        rec.clear();
        assert!(rec.events().is_empty());
    }

    #[test]
    fn log_observer_accepts_every_event() {
        feed(
            LogObserver,
            &[
                RoundEvent::Rejected { k: -1, vertices: 0 },
                RoundEvent::Trivial { k: 0, groups: 0 },
                RoundEvent::BoundExceeded {
                    k: 2,
                    largest_group: 3,
                },
                RoundEvent::Finished {
                    rounds: 1,
                    groups: 1,
                    largest_group: 2,
                },
            ],
        );
    }
}
