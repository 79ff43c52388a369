//! Deferred effects keyed by simulation tick
//!
//! Invulnerability expiry, blink toggles and stage-transition phases are
//! queued here and drained once per tick by the session. Every entry is
//! stamped with the generation it was scheduled in; `reset` discards the
//! queue and bumps the generation so nothing from a finished run can fire
//! into the next one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedEvent {
    EndInvulnerability,
    ToggleBlink,
    StageMidpoint,
    StageEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    due_tick: u64,
    generation: u32,
    /// Insertion order, breaks ties between events due on the same tick
    seq: u64,
    event: TimedEvent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    generation: u32,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, due_tick: u64, event: TimedEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_tick,
            generation: self.generation,
            seq,
            event,
        });
    }

    /// Drop pending events of one kind
    pub fn cancel(&mut self, event: TimedEvent) {
        self.pending.retain(|s| s.event != event);
    }

    /// Remove and return every event due at or before `now`, in due order
    pub fn drain_due(&mut self, now: u64) -> Vec<TimedEvent> {
        let generation = self.generation;
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due_tick <= now {
                due.push(s.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| (s.due_tick, s.seq));
        due.into_iter()
            .filter(|s| s.generation == generation)
            .map(|s| s.event)
            .collect()
    }

    /// Forget everything pending and start a new generation
    pub fn reset(&mut self) {
        self.pending.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_only_due_events_in_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, TimedEvent::StageEnd);
        scheduler.schedule(5, TimedEvent::StageMidpoint);
        scheduler.schedule(5, TimedEvent::ToggleBlink);
        scheduler.schedule(20, TimedEvent::EndInvulnerability);

        assert!(scheduler.drain_due(4).is_empty());
        assert_eq!(
            scheduler.drain_due(10),
            vec![
                TimedEvent::StageMidpoint,
                TimedEvent::ToggleBlink,
                TimedEvent::StageEnd
            ]
        );
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(3, TimedEvent::EndInvulnerability);
        let before = scheduler.generation();
        scheduler.reset();
        assert!(scheduler.is_empty());
        assert_ne!(scheduler.generation(), before);
        assert!(scheduler.drain_due(100).is_empty());
    }

    #[test]
    fn test_cancel_by_kind() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(3, TimedEvent::ToggleBlink);
        scheduler.schedule(9, TimedEvent::ToggleBlink);
        scheduler.schedule(9, TimedEvent::StageEnd);
        scheduler.cancel(TimedEvent::ToggleBlink);
        assert_eq!(scheduler.drain_due(10), vec![TimedEvent::StageEnd]);
    }
}
