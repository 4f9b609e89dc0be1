//! Timers module - generation-stamped deadlines on the session clock
//!
//! The session never blocks. Deferred work (the next automatic fall, the end
//! of a penalty window) is a deadline on a millisecond clock advanced by the
//! host through `tick`. Every deadline carries the generation it was
//! scheduled in; [`Timers::invalidate_all`] bumps the generation so nothing
//! scheduled before a restart can fire after it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Next automatic one-cell fall
    Fall,
    /// End of the special-block penalty window
    PenaltyRestore,
}

impl TimerKind {
    fn slot(self) -> usize {
        match self {
            TimerKind::Fall => 0,
            TimerKind::PenaltyRestore => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    at_ms: u64,
    generation: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: u64,
    generation: u32,
    slots: [Option<Deadline>; 2],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session clock
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms = self.now_ms.saturating_add(u64::from(elapsed_ms));
    }

    /// (Re)schedule `kind` to fire `delay_ms` from now
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u32) {
        self.slots[kind.slot()] = Some(Deadline {
            at_ms: self.now_ms.saturating_add(u64::from(delay_ms)),
            generation: self.generation,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[kind.slot()] = None;
    }

    /// Pending deadline of `kind` on the session clock
    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.live(kind).map(|d| d.at_ms)
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.live(kind).is_some()
    }

    fn live(&self, kind: TimerKind) -> Option<Deadline> {
        self.slots[kind.slot()].filter(|d| d.generation == self.generation)
    }

    /// Consume `kind` if it is due; stale deadlines are dropped, never fired
    pub fn take_due(&mut self, kind: TimerKind) -> bool {
        let slot = &mut self.slots[kind.slot()];
        match *slot {
            Some(d) if d.generation != self.generation => {
                *slot = None;
                false
            }
            Some(d) if d.at_ms <= self.now_ms => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel everything and start a new generation
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.slots = [None; 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_due() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::Fall, 100);
        timers.advance(99);
        assert!(!timers.take_due(TimerKind::Fall));
        timers.advance(1);
        assert!(timers.take_due(TimerKind::Fall));
        assert!(!timers.take_due(TimerKind::Fall));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::PenaltyRestore, 10);
        timers.cancel(TimerKind::PenaltyRestore);
        timers.advance(50);
        assert!(!timers.take_due(TimerKind::PenaltyRestore));
    }

    #[test]
    fn invalidate_drops_pending_deadlines() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::Fall, 10);
        timers.schedule(TimerKind::PenaltyRestore, 10);
        let generation = timers.generation();
        timers.invalidate_all();
        assert_ne!(timers.generation(), generation);
        timers.advance(100);
        assert!(!timers.take_due(TimerKind::Fall));
        assert!(!timers.take_due(TimerKind::PenaltyRestore));
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::Fall, 10);
        timers.advance(5);
        timers.schedule(TimerKind::Fall, 10);
        assert_eq!(timers.deadline(TimerKind::Fall), Some(15));
        timers.advance(5);
        assert!(!timers.take_due(TimerKind::Fall));
    }
}
