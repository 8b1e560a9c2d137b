//! Decides whether a single event counts as "currently active" for the user.

use chrono::{DateTime, TimeZone};

use crate::event::Event;

/// Whether the event has started, compared at day granularity.
///
/// The start is brought into `now`'s timezone and only the calendar dates
/// are compared, so an event starting later today counts as started.
/// An event starting tomorrow does not.
pub fn has_started<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> bool {
    let start = event.start.local_in(&now.timezone());
    let elapsed = now.date_naive() - start.date();
    elapsed.num_days() >= 0
}

/// Whether the calendar owner is attending: at least one attendee is
/// `self` and has accepted.
pub fn is_attending(event: &Event) -> bool {
    event.attendees.iter().any(|a| a.is_accepted_self())
}

pub fn is_relevant<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> bool {
    has_started(event, now) && is_attending(event)
}
