//! Provider-neutral event types.
//!
//! Event sources convert their API responses into these types; the status
//! policy works exclusively with them.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// A calendar event as seen by the status policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub start: EventTime,
    /// Event attendees, including the calendar owner when invited
    pub attendees: Vec<Attendee>,
}

/// An event attendee
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    /// Email address, when the provider exposes it
    pub email: Option<String>,
    /// Whether this attendee is the owner of the polled calendar
    pub is_self: bool,
    pub response_status: ParticipationStatus,
}

impl Attendee {
    pub fn is_accepted_self(&self) -> bool {
        self.is_self && self.response_status == ParticipationStatus::Accepted
    }
}

/// Attendee response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationStatus {
    Accepted,
    Declined,
    Tentative,
    NeedsAction,
    Other,
}

impl ParticipationStatus {
    /// Parse Google's `responseStatus` strings. Unknown values map to `Other`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "accepted" => ParticipationStatus::Accepted,
            "declined" => ParticipationStatus::Declined,
            "tentative" => ParticipationStatus::Tentative,
            "needsAction" => ParticipationStatus::NeedsAction,
            _ => ParticipationStatus::Other,
        }
    }
}

/// Start of an event: either a timed instant or an all-day date.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    DateTime(DateTime<FixedOffset>),
    /// All-day event, starting at local midnight
    Date(NaiveDate),
}

impl EventTime {
    /// Wall-clock start in the timezone of `tz`.
    ///
    /// All-day dates carry no zone and are read as midnight in `tz`.
    pub fn local_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDateTime {
        match self {
            EventTime::DateTime(dt) => dt.with_timezone(tz).naive_local(),
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
        }
    }
}
