// src/provider/mod.rs
//
// The collector only ever talks to a `RaceDataProvider`: one call for a
// season's schedule, one call per race for its final classification.
// `ErgastProvider` is the live HTTP implementation; tests plug in stubs.

pub mod cache;
pub mod ergast;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::consts::{RACE_SESSION, RACE_SESSION_SLOT};

pub use ergast::ErgastProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: crate::core::net::NetError,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no race classification published for {year} {event}")]
    NoClassification { year: i32, event: String },
    #[error("cache error: {0}")]
    Cache(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Weekend layout. Determines what runs in each of the five session slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventFormat {
    Conventional,
    /// 2021-2022 sprint weekends
    Sprint,
    /// 2023 sprint weekends
    SprintShootout,
    /// 2024 onward
    SprintQualifying,
    Testing,
}

impl EventFormat {
    /// Session names for slots 1..=5; empty string = no session.
    pub fn sessions(&self) -> [&'static str; 5] {
        match self {
            EventFormat::Conventional =>
                ["Practice 1", "Practice 2", "Practice 3", "Qualifying", "Race"],
            EventFormat::Sprint =>
                ["Practice 1", "Qualifying", "Practice 2", "Sprint", "Race"],
            EventFormat::SprintShootout =>
                ["Practice 1", "Qualifying", "Sprint Shootout", "Sprint", "Race"],
            EventFormat::SprintQualifying =>
                ["Practice 1", "Sprint Qualifying", "Sprint", "Qualifying", "Race"],
            EventFormat::Testing =>
                ["Practice 1", "Practice 2", "Practice 3", "", ""],
        }
    }
}

/// One row of a season schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct EventInfo {
    pub round: u32,
    pub event_name: String,
    pub event_date: Option<NaiveDate>,
    pub location: String,
    pub country: String,
    pub format: EventFormat,
}

impl EventInfo {
    /// Session in 1-based `slot`, if the weekend has one there.
    pub fn session(&self, slot: usize) -> Option<&'static str> {
        let name = *self.format.sessions().get(slot.checked_sub(1)?)?;
        (!name.is_empty()).then_some(name)
    }

    /// Full Grand Prix: slot 5 holds the race.
    pub fn is_race(&self) -> bool {
        self.session(RACE_SESSION_SLOT) == Some(RACE_SESSION)
    }

    /// "Melbourne, Australia, 2000-03-12"; whatever parts are known.
    pub fn venue(&self) -> String {
        let date = self.event_date.map(|d| d.to_string()).unwrap_or_default();
        [self.location.as_str(), self.country.as_str(), date.as_str()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One classification row as the provider reports it. Any field may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverResult {
    pub full_name: Option<String>,
    pub driver_id: Option<String>,
    pub team_name: Option<String>,
    pub position: Option<String>,
    pub points: Option<String>,
    pub grid_position: Option<String>,
    pub status: Option<String>,
    pub nationality: Option<String>,
}

pub trait RaceDataProvider {
    /// Every event of `year`, in calendar order.
    fn schedule(&mut self, year: i32) -> Result<Vec<EventInfo>, ProviderError>;

    /// Final classification of the race session only (no laps, telemetry or weather).
    fn race_results(&mut self, year: i32, event: &EventInfo) -> Result<Vec<DriverResult>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(format: EventFormat) -> EventInfo {
        EventInfo {
            round: 1,
            event_name: s!("Pre-Season Testing"),
            event_date: None,
            location: s!("Sakhir"),
            country: s!("Bahrain"),
            format,
        }
    }

    #[test]
    fn every_championship_format_races_in_slot_five() {
        for f in [
            EventFormat::Conventional,
            EventFormat::Sprint,
            EventFormat::SprintShootout,
            EventFormat::SprintQualifying,
        ] {
            assert!(event(f).is_race(), "{f:?}");
        }
    }

    #[test]
    fn testing_has_no_race() {
        let e = event(EventFormat::Testing);
        assert!(!e.is_race());
        assert_eq!(e.session(5), None);
        assert_eq!(e.session(1), Some("Practice 1"));
    }

    #[test]
    fn slot_bounds() {
        let e = event(EventFormat::Conventional);
        assert_eq!(e.session(0), None);
        assert_eq!(e.session(6), None);
        assert_eq!(e.session(4), Some("Qualifying"));
    }

    #[test]
    fn venue_skips_unknown_parts() {
        let mut e = event(EventFormat::Conventional);
        assert_eq!(e.venue(), "Sakhir, Bahrain");
        e.event_date = NaiveDate::from_ymd_opt(2004, 4, 4);
        e.location.clear();
        assert_eq!(e.venue(), "Bahrain, 2004-04-04");
        e.country.clear();
        e.event_date = None;
        assert_eq!(e.venue(), "");
    }
}
