// src/report/matrix.rs
use std::collections::{BTreeMap, HashMap};

use crate::record::DriverRaceRecord;

/// Distinct RaceName values in order of first appearance (calendar order).
pub fn distinct_circuits(rows: &[&DriverRaceRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in rows {
        if !out.iter().any(|c| c == &r.race_name) {
            out.push(r.race_name.clone());
        }
    }
    out
}

/// Win counts for the top drivers of one season, across every circuit
/// raced that season. Pairs without a win hold 0.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonWinMatrix {
    pub season: i32,
    /// Row labels, most wins first.
    pub drivers: Vec<String>,
    /// Column labels.
    pub circuits: Vec<String>,
    counts: Vec<Vec<u32>>,
}

impl SeasonWinMatrix {
    /// `rows` must already be filtered to `season`.
    ///
    /// Winners are grouped by driver name (alphabetical), then stably
    /// ranked by total wins, so equal totals stay in name order.
    pub fn build(season: i32, rows: &[&DriverRaceRecord], top_n: usize) -> Self {
        let circuits = distinct_circuits(rows);

        let mut wins: BTreeMap<&str, HashMap<&str, u32>> = BTreeMap::new();
        for r in rows.iter().filter(|r| r.is_win()) {
            *wins
                .entry(r.driver_name.as_str())
                .or_default()
                .entry(r.race_name.as_str())
                .or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, u32)> = wins
            .iter()
            .map(|(d, per)| (*d, per.values().sum()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);

        let counts = ranked
            .iter()
            .map(|(d, _)| {
                circuits
                    .iter()
                    .map(|c| wins[d].get(c.as_str()).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            season,
            drivers: ranked.into_iter().map(|(d, _)| s!(d)).collect(),
            circuits,
            counts,
        }
    }

    /// No driver won anything this season.
    pub fn is_empty(&self) -> bool { self.drivers.is_empty() }

    pub fn rows(&self) -> usize { self.drivers.len() }
    pub fn cols(&self) -> usize { self.circuits.len() }

    pub fn cell(&self, row: usize, col: usize) -> u32 {
        self.counts.get(row).and_then(|r| r.get(col)).copied().unwrap_or(0)
    }

    /// Count by label; 0 for unknown drivers/circuits.
    pub fn get(&self, driver: &str, circuit: &str) -> u32 {
        let row = self.drivers.iter().position(|d| d == driver);
        let col = self.circuits.iter().position(|c| c == circuit);
        match (row, col) {
            (Some(r), Some(c)) => self.cell(r, c),
            _ => 0,
        }
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}
