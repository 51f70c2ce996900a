// tests/collect_run.rs
mod common;

use std::fs;

use common::{event, result, tmp_dir, StubProvider};
use f1_scrape::collect::{self, UnitFailure};
use f1_scrape::config::options::CollectOptions;
use f1_scrape::progress::{NullProgress, Progress};
use f1_scrape::provider::EventFormat;
use f1_scrape::record::HEADERS;
use f1_scrape::store::RecordTable;

fn opts(name: &str, years: std::ops::RangeInclusive<i32>) -> CollectOptions {
    let dir = tmp_dir(name);
    f1_scrape::log::init(&dir.join("run.log"));
    CollectOptions {
        years,
        out_path: dir.join("out.csv"),
        log_path: dir.join("run.log"),
        ..CollectOptions::default()
    }
}

#[derive(Default)]
struct Recorder {
    lines: Vec<String>,
    years: Vec<(i32, usize)>,
}

impl Progress for Recorder {
    fn year_done(&mut self, year: i32, races_loaded: usize) {
        self.years.push((year, races_loaded));
    }
    fn item_failed(&mut self, failure: &UnitFailure) {
        self.lines.push(failure.console_line());
    }
}

#[test]
fn one_failed_race_keeps_everything_else() {
    let mut provider = StubProvider::default()
        .season(2000, vec![event(1, "Australian Grand Prix"), event(2, "Brazilian Grand Prix"), event(3, "San Marino Grand Prix")])
        .season(2001, vec![event(1, "Australian Grand Prix")])
        .race(2000, "Australian Grand Prix", vec![result("michael schumacher", "michael_schumacher", "1", "10")])
        // Brazil missing → that race fails
        .race(2000, "San Marino Grand Prix", vec![result("michael schumacher", "michael_schumacher", "1", "10")])
        .race(2001, "Australian Grand Prix", vec![result("michael schumacher", "michael_schumacher", "1", "10")]);

    let o = opts("one_failed_race", 2000..=2001);
    let mut rec = Recorder::default();
    let (table, report) = collect::run(&o, &mut provider, Some(&mut rec)).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(report.races_attempted, 4);
    assert_eq!(report.races_loaded, 3);
    assert_eq!(report.races_failed(), 1);
    assert_eq!(report.years_failed(), 0);
    assert_eq!(report.failures[0].event.as_deref(), Some("Brazilian Grand Prix"));
    assert_eq!(rec.years, vec![(2000, 2), (2001, 1)]);
    assert!(rec.lines[0].starts_with("Error loading 2000 Brazilian Grand Prix:"));

    let back = RecordTable::load(&o.out_path, ',').unwrap();
    assert!(back.skipped.is_empty());
    assert_eq!(back.table, table);
}

#[test]
fn failed_schedule_skips_only_that_year() {
    let mut provider = StubProvider::default()
        .season(2002, vec![event(1, "Malaysian Grand Prix")])
        .race(2002, "Malaysian Grand Prix", vec![result("ralf schumacher", "ralf_schumacher", "1", "10")]);

    let o = opts("failed_schedule", 2001..=2002);
    let (table, report) = collect::run(&o, &mut provider, Some(&mut NullProgress)).unwrap();

    assert_eq!(report.years_attempted, 2);
    assert_eq!(report.years_failed(), 1);
    assert!(report.failures[0].is_schedule());
    assert_eq!(report.failures[0].year, 2001);
    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].driver_name, "Ralf Schumacher");
}

#[test]
fn reprocessed_rows_persist_once() {
    let row = result("rubens barrichello", "barrichello", "1", "10");
    let mut provider = StubProvider::default()
        .season(2000, vec![event(1, "German Grand Prix"), event(1, "German Grand Prix")])
        .race(2000, "German Grand Prix", vec![row.clone(), row]);

    let o = opts("dedup", 2000..=2000);
    let (table, report) = collect::run(&o, &mut provider, None).unwrap();

    assert_eq!(report.rows_collected, 4);
    assert_eq!(report.duplicates_dropped, 3);
    assert_eq!(table.len(), 1);

    let text = fs::read_to_string(&o.out_path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert_eq!(
        text.lines().nth(1).unwrap(),
        "2000,German Grand Prix,Rubens Barrichello,barrichello,Team,1,10.0,1,Finished,Nowhere"
    );
}

#[test]
fn only_race_events_are_loaded() {
    let mut testing = event(0, "Pre-Season Test");
    testing.format = EventFormat::Testing;
    let mut provider = StubProvider::default()
        .season(2020, vec![testing, event(1, "Austrian Grand Prix")])
        .race(2020, "Austrian Grand Prix", vec![result("valtteri bottas", "bottas", "1", "25")]);

    let o = opts("race_filter", 2020..=2020);
    let (table, report) = collect::run(&o, &mut provider, None).unwrap();

    assert_eq!(report.races_attempted, 1);
    assert!(report.failures.is_empty());
    assert_eq!(table.len(), 1);
    assert!(!provider.calls.iter().any(|c| c.contains("Pre-Season Test")));
}

#[test]
fn nothing_retrieved_still_writes_header() {
    let mut provider = StubProvider::default();
    let o = opts("empty", 2000..=2002);
    fs::write(&o.out_path, "stale").unwrap();

    let (table, report) = collect::run(&o, &mut provider, None).unwrap();

    assert!(table.is_empty());
    assert_eq!(report.years_failed(), 3);
    let text = fs::read_to_string(&o.out_path).unwrap();
    assert_eq!(text, format!("{}\n", HEADERS.join(",")));
}

#[test]
fn sentinels_survive_to_disk() {
    let mut bare = result("", "", "", "");
    bare.full_name = None;
    bare.driver_id = None;
    bare.position = None;
    bare.points = None;
    bare.grid_position = None;
    let mut provider = StubProvider::default()
        .season(2005, vec![event(1, "Monaco Grand Prix")])
        .race(2005, "Monaco Grand Prix", vec![bare]);

    let o = opts("sentinels", 2005..=2005);
    collect::run(&o, &mut provider, None).unwrap();

    let back = RecordTable::load(&o.out_path, ',').unwrap().table;
    let r = &back.records()[0];
    assert_eq!(r.driver_name, "Unknown");
    assert_eq!(r.position, -1);
    assert_eq!(r.grid_position, -1);
    assert_eq!(r.points, 0.0);
}
