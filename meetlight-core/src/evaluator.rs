//! Status evaluation: office-hours policy combined with filtered events.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use tracing::info;

use crate::error::CoreResult;
use crate::event::Event;
use crate::filter::is_relevant;
use crate::policy::PolicyWindow;
use crate::status::Status;

/// Number of upcoming events inspected per poll
pub const DEFAULT_LOOKAHEAD: usize = 5;

/// Source of upcoming calendar events.
///
/// Implementations return events ordered by start time ascending, limited
/// to events that have not yet ended.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    async fn list_upcoming_events(
        &mut self,
        calendar_id: &str,
        max_results: usize,
    ) -> CoreResult<Vec<Event>>;
}

/// Evaluate the meeting status for `calendar_id` at `now`.
///
/// Outside office hours the event source is never queried. Errors from the
/// source are returned to the caller untouched.
pub async fn evaluate<Tz, S>(
    now: &DateTime<Tz>,
    policy: &PolicyWindow,
    source: &mut S,
    calendar_id: &str,
    lookahead: usize,
) -> CoreResult<Status>
where
    Tz: TimeZone,
    S: EventSource,
{
    info!(
        weekday = now.weekday().num_days_from_monday(),
        hour = now.hour(),
        "Checking office hours"
    );

    let status = if policy.contains(now) {
        let mut events = source.list_upcoming_events(calendar_id, lookahead).await?;
        events.truncate(lookahead);
        info!(
            "There are {} event(s) on the calendar",
            events.iter().filter(|e| is_relevant(e, now)).count()
        );
        classify(now, policy, &events)
    } else {
        Status::OutOfOffice
    };

    info!(%status, "Status");
    Ok(status)
}

/// The same policy as [`evaluate`], over an already fetched event list.
pub fn classify<Tz: TimeZone>(
    now: &DateTime<Tz>,
    policy: &PolicyWindow,
    events: &[Event],
) -> Status {
    if !policy.contains(now) {
        return Status::OutOfOffice;
    }

    busy_or_free(events.iter().filter(|e| is_relevant(e, now)).count())
}

fn busy_or_free(relevant: usize) -> Status {
    if relevant > 0 {
        Status::Busy
    } else {
        Status::Free
    }
}
