// src/store.rs
//
// In-memory record table: built up incrementally during a collection run,
// cleaned once (dedup + missing-value fill), then persisted in one write.

use std::{collections::HashSet, error::Error, fs, path::Path};

use crate::config::consts::{MISSING_POINTS, MISSING_POSITION};
use crate::csv::{parse_rows, split_header};
use crate::file::write_table;
use crate::record::{DriverRaceRecord, HEADERS};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordTable {
    records: Vec<DriverRaceRecord>,
}

/// Outcome of reading a persisted table.
pub struct Loaded {
    pub table: RecordTable,
    /// (1-based line, reason) for each row that could not be read.
    pub skipped: Vec<(usize, String)>,
}

impl RecordTable {
    pub fn new() -> Self { Self::default() }

    pub fn from_records(records: Vec<DriverRaceRecord>) -> Self { Self { records } }

    pub fn push(&mut self, rec: DriverRaceRecord) { self.records.push(rec); }

    pub fn extend<I: IntoIterator<Item = DriverRaceRecord>>(&mut self, it: I) {
        self.records.extend(it);
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[DriverRaceRecord] { &self.records }
    pub fn iter(&self) -> impl Iterator<Item = &DriverRaceRecord> { self.records.iter() }

    /// Rows of one season, original order.
    pub fn season(&self, year: i32) -> Vec<&DriverRaceRecord> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    /// Remove rows identical to an earlier row across every column.
    /// First occurrence is kept; order is preserved. Returns rows removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.records.len();
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
        self.records.retain(|r| seen.insert(r.to_row()));
        before - self.records.len()
    }

    /// Normalize anything that slipped past coercion: negative positions
    /// become exactly -1, non-finite points become 0. Returns cells changed.
    pub fn fill_missing(&mut self) -> usize {
        let mut changed = 0;
        for r in &mut self.records {
            if r.position < 0 && r.position != MISSING_POSITION {
                r.position = MISSING_POSITION;
                changed += 1;
            }
            if r.grid_position < 0 && r.grid_position != MISSING_POSITION {
                r.grid_position = MISSING_POSITION;
                changed += 1;
            }
            if !r.points.is_finite() {
                r.points = MISSING_POINTS;
                changed += 1;
            }
        }
        changed
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(DriverRaceRecord::to_row).collect()
    }

    /// Write header + all rows, overwriting `path`. Empty tables still get a header.
    pub fn save(&self, path: &Path, sep: char) -> Result<(), Box<dyn Error>> {
        write_table(path, &HEADERS, &self.to_rows(), sep)
    }

    /// Read a table written by `save`. Columns are matched by header name,
    /// so their order in the file does not matter.
    pub fn load(path: &Path, sep: char) -> Result<Loaded, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let (header, rows) = split_header(parse_rows(&text, sep));
        let Some(header) = header else {
            return Ok(Loaded { table: RecordTable::new(), skipped: Vec::new() });
        };

        let mut index = Vec::with_capacity(HEADERS.len());
        for name in HEADERS {
            let ix = header.iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| format!("{}: missing column {name:?}", path.display()))?;
            index.push(ix);
        }

        let mut table = RecordTable::new();
        let mut skipped = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let cells: Option<Vec<String>> = index.iter().map(|&ix| row.get(ix).cloned()).collect();
            let parsed = cells
                .ok_or_else(|| format!("expected {} columns, found {}", header.len(), row.len()))
                .and_then(|c| DriverRaceRecord::from_row(&c));
            match parsed {
                Ok(rec) => table.push(rec),
                Err(reason) => skipped.push((i + 2, reason)),
            }
        }
        Ok(Loaded { table, skipped })
    }
}
