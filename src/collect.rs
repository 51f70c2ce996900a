// src/collect.rs
//
// Year-by-year collection. Every unit of work (one season's schedule, one
// race's classification) yields either its records or a `UnitFailure`;
// failures are logged, reported and skipped, never fatal.

use std::error::Error;
use std::fmt;
use std::ops::RangeInclusive;

use crate::config::consts::TABLE_SEP;
use crate::config::options::CollectOptions;
use crate::progress::Progress;
use crate::provider::{EventInfo, RaceDataProvider};
use crate::record::DriverRaceRecord;
use crate::store::RecordTable;

/// A schedule (`event == None`) or race that produced no data.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitFailure {
    pub year: i32,
    pub event: Option<String>,
    pub reason: String,
}

impl UnitFailure {
    pub fn schedule(year: i32, reason: impl fmt::Display) -> Self {
        Self { year, event: None, reason: reason.to_string() }
    }

    pub fn race(year: i32, event: &str, reason: impl fmt::Display) -> Self {
        Self { year, event: Some(s!(event)), reason: reason.to_string() }
    }

    pub fn is_schedule(&self) -> bool { self.event.is_none() }

    pub fn console_line(&self) -> String {
        match &self.event {
            None => format!("Error processing year {}: {}", self.year, self.reason),
            Some(ev) => format!("Error loading {} {}: {}", self.year, ev, self.reason),
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            None => write!(f, "Failed to process year {}: {}", self.year, self.reason),
            Some(ev) => write!(f, "Failed to load {} {}: {}", self.year, ev, self.reason),
        }
    }
}

/// Everything one season contributed.
#[derive(Debug, Default)]
pub struct YearOutcome {
    pub year: i32,
    pub events: usize,
    pub races: usize,
    pub races_loaded: usize,
    pub records: Vec<DriverRaceRecord>,
    pub race_failures: Vec<UnitFailure>,
}

/// Counters for a whole run.
#[derive(Debug, Default, PartialEq)]
pub struct RunReport {
    pub years_attempted: usize,
    pub races_attempted: usize,
    pub races_loaded: usize,
    pub failures: Vec<UnitFailure>,
    pub rows_collected: usize,
    pub duplicates_dropped: usize,
    pub cells_filled: usize,
}

impl RunReport {
    pub fn years_failed(&self) -> usize {
        self.failures.iter().filter(|f| f.is_schedule()).count()
    }
    pub fn races_failed(&self) -> usize {
        self.failures.iter().filter(|f| !f.is_schedule()).count()
    }
}

/// Short-lived handle on an optional sink, so it can be lent to a callee
/// and used again afterwards.
fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    progress.as_mut().map(|p| &mut **p as &mut dyn Progress)
}

/// Load one race's classification and flatten it.
pub fn collect_race(
    provider: &mut dyn RaceDataProvider,
    year: i32,
    event: &EventInfo,
) -> Result<Vec<DriverRaceRecord>, UnitFailure> {
    let results = provider
        .race_results(year, event)
        .map_err(|e| UnitFailure::race(year, &event.event_name, e))?;
    match event.venue() {
        v if v.is_empty() => logf!("Loaded {year} {}", event.event_name),
        v => logf!("Loaded {year} {} ({v})", event.event_name),
    }

    Ok(results
        .iter()
        .map(|r| DriverRaceRecord::from_result(year, &event.event_name, r))
        .collect())
}

/// Schedule → race events → records. Only a schedule failure fails the year;
/// race failures are collected in the outcome.
pub fn collect_year(
    provider: &mut dyn RaceDataProvider,
    year: i32,
    mut progress: Option<&mut dyn Progress>,
) -> Result<YearOutcome, UnitFailure> {
    let schedule = provider
        .schedule(year)
        .map_err(|e| UnitFailure::schedule(year, e))?;
    logf!("Loaded schedule for {year}: {} events", schedule.len());

    let races: Vec<&EventInfo> = schedule.iter().filter(|e| e.is_race()).collect();
    logf!("Found {} races for {year}", races.len());

    let mut out = YearOutcome {
        year,
        events: schedule.len(),
        races: races.len(),
        ..Default::default()
    };

    for event in races {
        match collect_race(provider, year, event) {
            Ok(records) => {
                out.races_loaded += 1;
                out.records.extend(records);
            }
            Err(failure) => {
                loge!("{failure}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&failure);
                }
                out.race_failures.push(failure);
            }
        }
    }
    Ok(out)
}

/// Walk `years` in order, then dedup and fill the accumulated table.
pub fn collect(
    provider: &mut dyn RaceDataProvider,
    years: RangeInclusive<i32>,
    mut progress: Option<&mut dyn Progress>,
) -> (RecordTable, RunReport) {
    let mut table = RecordTable::new();
    let mut report = RunReport::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(years.clone().count());
    }

    for year in years {
        report.years_attempted += 1;
        let races_loaded = match collect_year(provider, year, reborrow(&mut progress)) {
            Ok(outcome) => {
                report.races_attempted += outcome.races;
                report.races_loaded += outcome.races_loaded;
                report.failures.extend(outcome.race_failures);
                table.extend(outcome.records);
                outcome.races_loaded
            }
            Err(failure) => {
                loge!("{failure}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&failure);
                }
                report.failures.push(failure);
                0
            }
        };
        if let Some(p) = progress.as_deref_mut() {
            p.year_done(year, races_loaded);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    report.rows_collected = table.len();
    report.duplicates_dropped = table.drop_duplicates();
    report.cells_filled = table.fill_missing();
    logf!("Created table with {} rows ({} duplicates dropped)", table.len(), report.duplicates_dropped);

    (table, report)
}

/// Full collector run: collect, then persist to `opts.out_path`.
/// Only a failure to write the table itself is returned as an error.
pub fn run(
    opts: &CollectOptions,
    provider: &mut dyn RaceDataProvider,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(RecordTable, RunReport), Box<dyn Error>> {
    let (table, report) = collect(provider, opts.years.clone(), reborrow(&mut progress));

    table.save(&opts.out_path, TABLE_SEP)?;
    let msg = format!("Data saved to {}", opts.out_path.display());
    logf!("{msg}");
    if let Some(p) = progress.as_deref_mut() {
        p.log(&msg);
    }

    logf!(
        "Run complete: {} years ({} failed), {}/{} races loaded ({} failed)",
        report.years_attempted,
        report.years_failed(),
        report.races_loaded,
        report.races_attempted,
        report.races_failed(),
    );
    Ok((table, report))
}
