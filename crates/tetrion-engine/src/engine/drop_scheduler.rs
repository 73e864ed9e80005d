use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Decides when the falling piece takes an automatic step down.
///
/// The host reports elapsed time through [`advance`](Self::advance) at any
/// cadence. Once the accumulated time reaches the interval the scheduler fires
/// and re-arms from zero, so a single call fires at most once and any excess
/// time is discarded.
///
/// A stopped scheduler never fires and keeps no pending time: after
/// [`stop`](Self::stop), a later [`start`](Self::start) waits a full interval
/// before the next drop.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tetrion_engine::DropScheduler;
///
/// let mut scheduler = DropScheduler::new(Duration::from_millis(1000));
/// assert!(!scheduler.advance(Duration::from_millis(600)));
/// assert!(scheduler.advance(Duration::from_millis(400)));
/// assert!(!scheduler.advance(Duration::from_millis(999)));
///
/// scheduler.stop();
/// assert!(!scheduler.advance(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone)]
pub struct DropScheduler {
    interval: Duration,
    elapsed: Duration,
    state: SchedulerState,
}

impl DropScheduler {
    /// Creates a running scheduler.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            state: SchedulerState::Running,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Time left until the next drop, or `None` while stopped.
    #[must_use]
    pub fn until_next_drop(&self) -> Option<Duration> {
        self.state
            .is_running()
            .then(|| self.interval.saturating_sub(self.elapsed))
    }

    /// Re-arms the scheduler from zero.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = SchedulerState::Running;
    }

    /// Stops the scheduler and discards any pending time.
    pub fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = SchedulerState::Stopped;
    }

    /// Accounts for `elapsed` time and returns whether a drop step is due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.state.is_stopped() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        true
    }
}
