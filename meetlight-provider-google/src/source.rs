//! Upcoming events from Google Calendar.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use google_calendar::types::OrderBy;
use meetlight_core::{CoreError, CoreResult, Event, EventSource};
use tracing::debug;

use crate::convert::FromGoogle;
use crate::session::Session;

/// Events starting later than this can never count as started today
const HORIZON_DAYS: i64 = 1;

pub struct GoogleEventSource {
    session: Session,
}

impl GoogleEventSource {
    pub fn new(session: Session) -> Self {
        GoogleEventSource { session }
    }

    async fn fetch(&mut self, calendar_id: &str, max_results: usize) -> Result<Vec<Event>> {
        self.session.refresh_if_needed().await?;
        let client = self.session.client();

        let now = Utc::now();
        let time_min = now.to_rfc3339();
        let time_max = (now + Duration::days(HORIZON_DAYS)).to_rfc3339();

        let response = client
            .events()
            .list_all(
                calendar_id,
                "",
                0,
                OrderBy::StartTime,
                &[],
                "", // search query
                &[],
                false,
                false,
                true, // single_events, required for ordering by start time
                &time_max,
                &time_min,
                "",
                "",
            )
            .await
            .with_context(|| format!("Failed to fetch events for calendar {}", calendar_id))?;

        debug!(count = response.body.len(), "Fetched upcoming events");

        select_upcoming(response.body, max_results)
    }
}

/// Keep the first `max` non-cancelled events, in the order the API returned them.
fn select_upcoming(items: Vec<google_calendar::types::Event>, max: usize) -> Result<Vec<Event>> {
    items
        .into_iter()
        .filter(|e| e.status != "cancelled")
        .take(max)
        .map(Event::from_google)
        .collect()
}

impl EventSource for GoogleEventSource {
    async fn list_upcoming_events(
        &mut self,
        calendar_id: &str,
        max_results: usize,
    ) -> CoreResult<Vec<Event>> {
        self.fetch(calendar_id, max_results)
            .await
            .map_err(|e| CoreError::Provider(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::tests::google_event;
    use serde_json::json;

    fn listed(id: &str, status: &str) -> google_calendar::types::Event {
        google_event(json!({
            "id": id,
            "status": status,
            "start": { "dateTime": "2021-02-26T10:00:00Z" }
        }))
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_cancelled_events_are_skipped() {
        let items = vec![
            listed("a", "confirmed"),
            listed("b", "cancelled"),
            listed("c", "tentative"),
        ];

        let events = select_upcoming(items, 5).unwrap();

        assert_eq!(ids(&events), vec!["a", "c"]);
    }

    #[test]
    fn test_truncates_after_filtering() {
        let mut items = vec![listed("gone-1", "cancelled"), listed("gone-2", "cancelled")];
        for i in 0..7 {
            items.push(listed(&format!("e{}", i), "confirmed"));
        }

        let events = select_upcoming(items, 5).unwrap();

        assert_eq!(ids(&events), vec!["e0", "e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_preserves_api_order() {
        let items = vec![
            listed("third", "confirmed"),
            listed("first", "confirmed"),
            listed("second", "confirmed"),
        ];

        let events = select_upcoming(items, 5).unwrap();

        assert_eq!(ids(&events), vec!["third", "first", "second"]);
    }

    #[test]
    fn test_empty_listing() {
        assert!(select_upcoming(vec![], 5).unwrap().is_empty());
    }

    #[test]
    fn test_unconvertible_event_fails_selection() {
        let broken = google_event(json!({ "id": "broken" }));
        let items = vec![listed("a", "confirmed"), broken];

        assert!(select_upcoming(items, 5).is_err());
    }

    #[test]
    fn test_events_past_the_limit_are_not_converted() {
        let broken = google_event(json!({ "id": "broken" }));
        let items = vec![listed("a", "confirmed"), broken];

        let events = select_upcoming(items, 1).unwrap();

        assert_eq!(ids(&events), vec!["a"]);
    }
}
