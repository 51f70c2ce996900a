// benches/table.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use f1_scrape::{csv, provider::ergast, record::HEADERS, store::RecordTable};

// One season's worth of classifications: 20 drivers x 20 races, each race twice.
fn synthetic_table() -> RecordTable {
    let mut table = RecordTable::new();
    for _pass in 0..2 {
        for race in 0..20 {
            let results: Vec<_> = (0..20)
                .map(|d| f1_scrape::provider::DriverResult {
                    full_name: Some(format!("driver number {d}")),
                    driver_id: Some(format!("driver_{d}")),
                    team_name: Some(format!("Team {}", d / 2)),
                    position: Some((d + 1).to_string()),
                    points: Some(if d < 10 { (10 - d).to_string() } else { String::new() }),
                    grid_position: Some(((d * 7) % 20 + 1).to_string()),
                    status: Some("Finished".to_string()),
                    nationality: Some("Nowhere".to_string()),
                })
                .collect();
            let name = format!("Grand Prix {race}");
            table.extend(results.iter().map(|r| {
                f1_scrape::record::DriverRaceRecord::from_result(2000, &name, r)
            }));
        }
    }
    table
}

fn results_body(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| format!(
            r#"{{"position":"{p}","points":"{pts}","grid":"{g}","status":"Finished",
               "Driver":{{"driverId":"d{i}","givenName":"Given{i}","familyName":"Family{i}","nationality":"X"}},
               "Constructor":{{"name":"Team {t}"}}}}"#,
            p = i + 1, pts = n - i, g = (i * 3) % n + 1, t = i / 2,
        ))
        .collect();
    format!(
        r#"{{"MRData":{{"RaceTable":{{"season":"2000","Races":[{{"round":"1","raceName":"Grand Prix","Results":[{}]}}]}}}}}}"#,
        rows.join(",")
    )
}

fn to_text(rows: &[Vec<String>]) -> String {
    let mut buf = Vec::new();
    let _ = csv::write_row(&mut buf, &HEADERS, ',');
    for r in rows {
        let _ = csv::write_row(&mut buf, r, ',');
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn bench_table(c: &mut Criterion) {
    let table = synthetic_table();
    let body = results_body(22);

    c.bench_function("parse_results", |b| {
        b.iter(|| {
            let rows = ergast::parse_results(black_box(&body)).ok().flatten().unwrap_or_default();
            black_box(rows.len())
        })
    });

    c.bench_function("drop_duplicates", |b| {
        b.iter(|| {
            let mut t = table.clone();
            black_box(t.drop_duplicates())
        })
    });

    c.bench_function("write_rows", |b| {
        let rows = table.to_rows();
        b.iter(|| {
            let text = to_text(black_box(&rows));
            black_box(text.len())
        })
    });

    c.bench_function("parse_rows", |b| {
        let text = to_text(&table.to_rows());
        b.iter(|| {
            let rows = csv::parse_rows(black_box(&text), ',');
            black_box(rows.len())
        })
    });
}

criterion_group!(benches, bench_table);
criterion_main!(benches);
