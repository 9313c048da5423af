use std::time::{Duration, Instant};

pub const DEFAULT_QUIESCENCE_MS: u64 = 600;

/// Coalesces rapid edits into a single auto-run per quiescence window. Each
/// edit re-arms the deadline, so the window is timed from the last keystroke.
/// Polled from the event-loop tick rather than driven by its own timer.
pub struct AutorunDebounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl AutorunDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Reports whether the quiescence window has elapsed, clearing the
    /// deadline so each armed window fires exactly once.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for AutorunDebounce {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_QUIESCENCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_window() {
        let start = Instant::now();
        let mut debounce = AutorunDebounce::new(Duration::from_millis(600));
        debounce.note_edit(start);
        assert!(!debounce.poll(start + Duration::from_millis(599)));
        assert!(debounce.poll(start + Duration::from_millis(600)));
        assert!(!debounce.poll(start + Duration::from_millis(601)), "already fired");
    }

    #[test]
    fn test_two_edits_in_window_yield_one_fire_from_last_edit() {
        let start = Instant::now();
        let mut debounce = AutorunDebounce::new(Duration::from_millis(600));
        debounce.note_edit(start);
        debounce.note_edit(start + Duration::from_millis(300));

        // The first edit's window has passed, but the deadline was re-armed.
        assert!(!debounce.poll(start + Duration::from_millis(700)));
        assert!(debounce.poll(start + Duration::from_millis(900)));
        assert!(!debounce.poll(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_cancel_disarms() {
        let start = Instant::now();
        let mut debounce = AutorunDebounce::default();
        debounce.note_edit(start);
        debounce.cancel();
        assert!(!debounce.is_armed());
        assert!(!debounce.poll(start + Duration::from_secs(10)));
    }
}
