use anyhow::{Result, bail};
use meetlight_core::event::{Attendee, Event, EventTime, ParticipationStatus};

/// Convert from Google API types to meetlight types
pub trait FromGoogle<T> {
    fn from_google(value: T) -> Result<Self>
    where
        Self: Sized;
}

impl FromGoogle<google_calendar::types::Event> for Event {
    fn from_google(event: google_calendar::types::Event) -> Result<Self> {
        let start = match event.start {
            Some(ref start) => {
                if let Some(dt) = start.date_time {
                    EventTime::DateTime(dt.fixed_offset())
                } else if let Some(d) = start.date {
                    EventTime::Date(d)
                } else {
                    bail!("Event {} has no start time", event.id);
                }
            }
            None => bail!("Event {} has no start time", event.id),
        };

        let attendees = event
            .attendees
            .iter()
            .map(|a| Attendee {
                email: if a.email.is_empty() {
                    None
                } else {
                    Some(a.email.clone())
                },
                is_self: a.self_,
                response_status: ParticipationStatus::from_wire(&a.response_status),
            })
            .collect();

        Ok(Event {
            id: event.id,
            summary: event.summary,
            start,
            attendees,
        })
    }
}
