//! Fixed-interval polling of the evaluator.
//!
//! The loop wakes up on a short tick and only evaluates once `query_delay`
//! has elapsed on the monotonic clock since the last poll. Between ticks the
//! task is parked, so signal handling stays responsive.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tokio::time::Instant;
use tracing::debug;

use crate::display::DisplayAdapter;
use crate::error::CoreResult;
use crate::evaluator::{EventSource, evaluate};
use crate::policy::PolicyWindow;
use crate::status::Status;

/// Default delay between calendar queries
pub const DEFAULT_QUERY_DELAY: Duration = Duration::from_secs(10);

/// How often the loop checks whether a poll is due
pub const TICK: Duration = Duration::from_millis(100);

/// Where the loop currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the query delay to elapse
    Idle,
    /// Evaluator and display update in flight
    Polling,
}

/// Settings fixed at startup.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub calendar_id: String,
    pub policy: PolicyWindow,
    pub query_delay: Duration,
    pub lookahead: usize,
    pub brightness: f32,
}

pub struct PollLoop<S> {
    source: S,
    adapter: DisplayAdapter,
    settings: PollSettings,
    state: PollState,
    last_poll: Option<Instant>,
}

impl<S: EventSource> PollLoop<S> {
    pub fn new(source: S, adapter: DisplayAdapter, settings: PollSettings) -> Self {
        PollLoop {
            source,
            adapter,
            settings,
            state: PollState::Idle,
            last_poll: None,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn last_poll(&self) -> Option<Instant> {
        self.last_poll
    }

    /// Whether the query delay has elapsed since the last poll.
    pub fn is_due(&self) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => last.elapsed() >= self.settings.query_delay,
        }
    }

    /// Run one poll if due, returning the status that was displayed.
    ///
    /// An evaluator error leaves `last_poll` untouched and is returned.
    pub async fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> CoreResult<Option<Status>> {
        if !self.is_due() {
            return Ok(None);
        }

        self.state = PollState::Polling;
        debug!(state = ?self.state, "Poll due");

        let result = evaluate(
            now,
            &self.settings.policy,
            &mut self.source,
            &self.settings.calendar_id,
            self.settings.lookahead,
        )
        .await;

        let status = match result {
            Ok(status) => status,
            Err(e) => {
                self.state = PollState::Idle;
                return Err(e);
            }
        };

        self.adapter.set_status(status, self.settings.brightness);
        self.last_poll = Some(Instant::now());
        self.state = PollState::Idle;

        Ok(Some(status))
    }

    /// Poll forever using the local wall clock. Only returns on error.
    pub async fn run(&mut self) -> CoreResult<()> {
        self.run_with(Local::now).await
    }

    /// Poll forever, reading wall-clock time from `wall_clock`.
    pub async fn run_with<Tz, F>(&mut self, mut wall_clock: F) -> CoreResult<()>
    where
        Tz: TimeZone,
        F: FnMut() -> DateTime<Tz>,
    {
        loop {
            self.tick(&wall_clock()).await?;
            tokio::time::sleep(TICK).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tests::{RecordingSink, SinkCall};
    use crate::error::CoreError;
    use crate::evaluator::tests::{FakeSource, accepted_event, friday_10am};
    use chrono::Utc;

    fn settings() -> PollSettings {
        PollSettings {
            calendar_id: "primary".to_string(),
            policy: PolicyWindow::default(),
            query_delay: DEFAULT_QUERY_DELAY,
            lookahead: 5,
            brightness: 0.2,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_polls_immediately() {
        let now = friday_10am();
        let source = FakeSource::new(vec![accepted_event(now)]);
        let (sink, calls) = RecordingSink::new();
        let mut poll = PollLoop::new(source, DisplayAdapter::new(Box::new(sink)), settings());

        let status = poll.tick(&now).await.unwrap();

        assert_eq!(status, Some(Status::Busy));
        assert_eq!(poll.state(), PollState::Idle);
        assert!(poll.last_poll().is_some());
        assert!(calls.borrow().contains(&SinkCall::SetAll(255, 0, 0, 0.2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_query_delay() {
        let now = friday_10am();
        let adapter = DisplayAdapter::headless();
        let mut poll = PollLoop::new(FakeSource::new(vec![]), adapter, settings());

        assert_eq!(poll.tick(&now).await.unwrap(), Some(Status::Free));

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(poll.tick(&now).await.unwrap(), None);
        assert_eq!(poll.source.calls, 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(poll.tick(&now).await.unwrap(), Some(Status::Free));
        assert_eq!(poll.source.calls, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_office_is_displayed_without_querying() {
        let saturday = Utc.with_ymd_and_hms(2021, 2, 27, 10, 0, 0).unwrap();
        let (sink, calls) = RecordingSink::new();
        let mut poll = PollLoop::new(
            FakeSource::new(vec![accepted_event(saturday)]),
            DisplayAdapter::new(Box::new(sink)),
            settings(),
        );

        let status = poll.tick(&saturday).await.unwrap();

        assert_eq!(status, Some(Status::OutOfOffice));
        assert_eq!(poll.source.calls, 0);
        assert!(calls.borrow().contains(&SinkCall::SetAll(0, 0, 0, 0.2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_does_not_record_poll() {
        let adapter = DisplayAdapter::headless();
        let mut poll = PollLoop::new(FakeSource::failing(), adapter, settings());

        let result = poll.tick(&friday_10am()).await;

        assert!(matches!(result, Err(CoreError::Provider(_))));
        assert!(poll.last_poll().is_none());
        assert_eq!(poll.state(), PollState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_source_failure() {
        let adapter = DisplayAdapter::headless();
        let mut poll = PollLoop::new(FakeSource::failing(), adapter, settings());

        let result = poll.run_with(friday_10am).await;

        assert!(matches!(result, Err(CoreError::Provider(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_at_query_delay() {
        let adapter = DisplayAdapter::headless();
        let mut poll = PollLoop::new(FakeSource::new(vec![]), adapter, settings());

        let run = poll.run_with(friday_10am);
        let outcome = tokio::time::timeout(Duration::from_secs(25), run).await;

        assert!(outcome.is_err(), "run should not return on success");
        // polls at 0s, 10s and 20s
        assert_eq!(poll.source.calls, 3);
    }
}
