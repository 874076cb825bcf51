use std::time::Duration;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Scheduled<T> {
    handle: TimerHandle,
    due_ms: u64,
    task: T,
}

/// Deferred tasks on a virtual clock. The clock only moves when `advance`
/// is called, so the event loop feeds it real elapsed time and tests feed it
/// whatever they like.
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            due_ms: self.now_ms + delay.as_millis() as u64,
            task,
        });
        handle
    }

    /// Returns false if the task already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Moves the clock forward and hands back every task that came due, in
    /// deadline order (ties in scheduling order).
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        let deadline = self.deadline(elapsed);
        let mut due = Vec::new();
        while let Some(task) = self.pop_due(deadline) {
            due.push(task);
        }
        self.settle(deadline);
        due
    }

    /// Clock value `elapsed` from now.
    pub fn deadline(&self, elapsed: Duration) -> u64 {
        self.now_ms + elapsed.as_millis() as u64
    }

    /// Removes the earliest task due by `deadline_ms` and moves the clock to
    /// its due time. Tasks scheduled while handling it are measured from
    /// that point, so a repeating task keeps its cadence however coarse the
    /// caller's steps are.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<T> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= deadline_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.handle.0))
            .map(|(i, _)| i)?;
        let scheduled = self.pending.remove(index);
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(scheduled.task)
    }

    /// Moves the clock to `deadline_ms` once nothing more is due.
    pub fn settle(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-problem countdown in whole seconds. A limit of 0 means no limit and
/// the countdown never runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    limit_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    pub fn new(limit_secs: u32) -> Self {
        Self {
            limit_secs,
            remaining_secs: limit_secs,
            running: false,
        }
    }

    /// Refill to `limit_secs` and stop.
    pub fn reset(&mut self, limit_secs: u32) {
        self.limit_secs = limit_secs;
        self.remaining_secs = limit_secs;
        self.running = false;
    }

    pub fn start(&mut self) {
        if self.is_enabled() && self.remaining_secs > 0 {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.limit_secs > 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.is_enabled() && self.remaining_secs == 0
    }

    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// One second passed. Returns true exactly when this tick ran the clock
    /// out; the countdown stops itself at that point.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn percent_remaining(&self) -> f64 {
        if self.limit_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / self.limit_secs as f64 * 100.0
    }

    pub fn band(&self) -> TimeBand {
        TimeBand::from_percent(self.percent_remaining())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeBand {
    Plenty,
    Low,
    Critical,
}

impl TimeBand {
    pub fn from_percent(pct: f64) -> Self {
        if pct > 66.0 {
            TimeBand::Plenty
        } else if pct > 33.0 {
            TimeBand::Low
        } else {
            TimeBand::Critical
        }
    }
}

/// `M:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Task {
        A,
        B,
        C,
    }

    #[test]
    fn test_tasks_fire_when_due() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_millis(1500), Task::A);
        assert!(s.advance(Duration::from_millis(1499)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)), vec![Task::A]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_due_tasks_come_back_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_millis(300), Task::A);
        s.schedule(Duration::from_millis(100), Task::B);
        s.schedule(Duration::from_millis(100), Task::C);
        assert_eq!(
            s.advance(Duration::from_secs(1)),
            vec![Task::B, Task::C, Task::A]
        );
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let a = s.schedule(Duration::from_millis(10), Task::A);
        let b = s.schedule(Duration::from_millis(10), Task::B);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(!s.is_pending(a));
        assert!(s.is_pending(b));
        assert_eq!(s.advance(Duration::from_millis(10)), vec![Task::B]);
        assert!(!s.cancel(b));
    }

    #[test]
    fn test_schedule_is_relative_to_virtual_now() {
        let mut s = Scheduler::new();
        s.advance(Duration::from_secs(5));
        assert_eq!(s.now_ms(), 5000);
        s.schedule(Duration::from_secs(1), Task::A);
        assert!(s.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)), vec![Task::A]);
    }

    #[test]
    fn test_repeating_task_keeps_cadence_across_coarse_steps() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_secs(1), Task::A);
        let deadline = s.deadline(Duration::from_millis(2500));
        let mut fired = 0;
        while let Some(task) = s.pop_due(deadline) {
            assert_eq!(task, Task::A);
            fired += 1;
            s.schedule(Duration::from_secs(1), Task::A);
        }
        s.settle(deadline);
        assert_eq!(fired, 2);
        assert_eq!(s.now_ms(), 2500);
        assert_eq!(s.advance(Duration::from_millis(500)), vec![Task::A]);
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_millis(1), Task::A);
        s.schedule(Duration::from_millis(2), Task::B);
        s.cancel_all();
        assert!(s.is_empty());
        assert!(s.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut c = Countdown::new(3);
        c.start();
        assert!(!c.tick());
        assert!(!c.tick());
        assert!(c.tick());
        assert!(c.is_expired());
        assert!(!c.is_running());
        assert!(!c.tick());
    }

    #[test]
    fn test_zero_limit_never_starts() {
        let mut c = Countdown::new(0);
        c.start();
        assert!(!c.is_running());
        assert!(!c.tick());
        assert!(!c.is_expired());
        assert_eq!(c.percent_remaining(), 0.0);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut c = Countdown::new(10);
        c.start();
        c.tick();
        c.pause();
        c.tick();
        assert_eq!(c.remaining_secs(), 9);
    }

    #[test]
    fn test_reset_refills_and_stops() {
        let mut c = Countdown::new(10);
        c.start();
        c.tick();
        c.reset(20);
        assert_eq!(c.remaining_secs(), 20);
        assert_eq!(c.limit_secs(), 20);
        assert!(!c.is_running());
    }

    #[test]
    fn test_bands() {
        let mut c = Countdown::new(30);
        assert_eq!(c.band(), TimeBand::Plenty);
        c.start();
        for _ in 0..11 {
            c.tick();
        }
        assert_eq!(c.band(), TimeBand::Low);
        for _ in 0..10 {
            c.tick();
        }
        assert_eq!(c.band(), TimeBand::Critical);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(120), "2:00");
    }
}
