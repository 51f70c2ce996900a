// src/summary.rs
//
// Informational leaderboards printed after a collection run.
// Drivers are grouped in name order first, then stably sorted by value,
// so equal values keep alphabetical order.

use std::collections::BTreeMap;

use crate::store::RecordTable;

pub fn top_by_points(table: &RecordTable, n: usize) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in table.iter() {
        *totals.entry(r.driver_name.as_str()).or_insert(0.0) += r.points;
    }
    let mut ranked: Vec<(String, f64)> = totals.into_iter().map(|(k, v)| (s!(k), v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

pub fn top_by_race_count(table: &RecordTable, n: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in table.iter() {
        *counts.entry(r.driver_name.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (s!(k), v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

fn render_block<V: std::fmt::Display>(title: &str, rows: &[(String, V)]) -> String {
    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut out = join!(title, "\n");
    if rows.is_empty() {
        out.push_str("  (no data)\n");
    }
    for (name, v) in rows {
        out.push_str(&format!("  {name:<width$}  {v}\n"));
    }
    out
}

/// Both leaderboards as printable text.
pub fn format_summary(table: &RecordTable, n: usize) -> String {
    let points: Vec<(String, String)> = top_by_points(table, n)
        .into_iter()
        .map(|(k, v)| (k, crate::record::fmt_points(v)))
        .collect();
    let races = top_by_race_count(table, n);

    let mut out = render_block(&format!("Top {n} drivers by total points:"), &points);
    out.push('\n');
    out.push_str(&render_block("Number of races per driver:", &races));
    out
}
