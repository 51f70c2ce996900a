// tests/common/mod.rs
#![allow(dead_code)]
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use f1_scrape::provider::{DriverResult, EventFormat, EventInfo, ProviderError, RaceDataProvider};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("f1_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn event(round: u32, name: &str) -> EventInfo {
    EventInfo {
        round,
        event_name: name.to_string(),
        event_date: None,
        location: String::new(),
        country: String::new(),
        format: EventFormat::Conventional,
    }
}

pub fn result(name: &str, id: &str, pos: &str, pts: &str) -> DriverResult {
    DriverResult {
        full_name: Some(name.to_string()),
        driver_id: Some(id.to_string()),
        team_name: Some("Team".to_string()),
        position: Some(pos.to_string()),
        points: Some(pts.to_string()),
        grid_position: Some("1".to_string()),
        status: Some("Finished".to_string()),
        nationality: Some("Nowhere".to_string()),
    }
}

/// Canned schedules/results; anything not registered fails.
#[derive(Default)]
pub struct StubProvider {
    pub schedules: HashMap<i32, Vec<EventInfo>>,
    pub results: HashMap<(i32, String), Vec<DriverResult>>,
    pub calls: Vec<String>,
}

impl StubProvider {
    pub fn season(mut self, year: i32, events: Vec<EventInfo>) -> Self {
        self.schedules.insert(year, events);
        self
    }

    pub fn race(mut self, year: i32, event: &str, rows: Vec<DriverResult>) -> Self {
        self.results.insert((year, event.to_string()), rows);
        self
    }
}

impl RaceDataProvider for StubProvider {
    fn schedule(&mut self, year: i32) -> Result<Vec<EventInfo>, ProviderError> {
        self.calls.push(format!("schedule {year}"));
        self.schedules
            .get(&year)
            .cloned()
            .ok_or_else(|| ProviderError::Other(format!("no schedule for {year}")))
    }

    fn race_results(&mut self, year: i32, event: &EventInfo) -> Result<Vec<DriverResult>, ProviderError> {
        self.calls.push(format!("results {year} {}", event.event_name));
        self.results
            .get(&(year, event.event_name.clone()))
            .cloned()
            .ok_or_else(|| ProviderError::NoClassification { year, event: event.event_name.clone() })
    }
}
