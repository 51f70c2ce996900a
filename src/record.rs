// src/record.rs
//
// One flattened row per (year, race, driver). Every provider row becomes a
// record; nothing about a missing field is ever an error, it becomes a
// sentinel instead:
//   DriverName   full name → driver id → "Unknown", then title-cased
//   Position     -1
//   GridPosition -1
//   Points       0.0
//   text fields  ""

use crate::config::consts::{MISSING_POINTS, MISSING_POSITION, UNKNOWN_DRIVER};
use crate::core::sanitize::{normalize_ws, title_case};
use crate::provider::DriverResult;

/// Column order of the persisted table.
pub const HEADERS: [&str; 10] = [
    "Year", "RaceName", "DriverName", "DriverId", "Team",
    "Position", "Points", "GridPosition", "Status", "Nationality",
];

#[derive(Clone, Debug, PartialEq)]
pub struct DriverRaceRecord {
    pub year: i32,
    pub race_name: String,
    pub driver_name: String,
    pub driver_id: String,
    pub team: String,
    pub position: i64,
    pub points: f64,
    pub grid_position: i64,
    pub status: String,
    pub nationality: String,
}

impl DriverRaceRecord {
    pub fn from_result(year: i32, race_name: &str, r: &DriverResult) -> Self {
        Self {
            year,
            race_name: s!(race_name),
            driver_name: driver_name(r.full_name.as_deref(), r.driver_id.as_deref()),
            driver_id: or_empty!(r.driver_id),
            team: or_empty!(r.team_name),
            position: coerce_int(r.position.as_deref(), "Position"),
            points: coerce_float(r.points.as_deref(), "Points"),
            grid_position: coerce_int(r.grid_position.as_deref(), "GridPosition"),
            status: or_empty!(r.status),
            nationality: or_empty!(r.nationality),
        }
    }

    pub fn is_win(&self) -> bool {
        self.position == 1
    }

    /// Cells in `HEADERS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.race_name.clone(),
            self.driver_name.clone(),
            self.driver_id.clone(),
            self.team.clone(),
            self.position.to_string(),
            fmt_points(self.points),
            self.grid_position.to_string(),
            self.status.clone(),
            self.nationality.clone(),
        ]
    }

    /// Rebuild from cells in `HEADERS` order. Only Year is mandatory;
    /// blank numerics read back as their sentinels.
    pub fn from_row(row: &[String]) -> Result<Self, String> {
        if row.len() != HEADERS.len() {
            return Err(format!("expected {} columns, found {}", HEADERS.len(), row.len()));
        }
        let year = row[0].trim().parse::<i32>()
            .map_err(|_| format!("bad Year {:?}", row[0]))?;
        Ok(Self {
            year,
            race_name: row[1].clone(),
            driver_name: row[2].clone(),
            driver_id: row[3].clone(),
            team: row[4].clone(),
            position: parse_int(&row[5]).unwrap_or(MISSING_POSITION),
            points: row[6].trim().parse::<f64>().unwrap_or(MISSING_POINTS),
            grid_position: parse_int(&row[7]).unwrap_or(MISSING_POSITION),
            status: row[8].clone(),
            nationality: row[9].clone(),
        })
    }
}

/// Preferred display name, never empty.
pub fn driver_name(full_name: Option<&str>, driver_id: Option<&str>) -> String {
    let pick = [full_name, driver_id]
        .into_iter()
        .flatten()
        .map(normalize_ws)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| s!(UNKNOWN_DRIVER));
    title_case(&pick)
}

/// Integer or float text, truncated toward zero ("3", "3.0" → 3).
fn parse_int(raw: &str) -> Option<i64> {
    let t = raw.trim();
    if let Ok(v) = t.parse::<i64>() {
        return Some(v);
    }
    t.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

pub fn coerce_int(raw: Option<&str>, field: &str) -> i64 {
    match raw {
        None => MISSING_POSITION,
        Some(text) => parse_int(text).unwrap_or_else(|| {
            logd!("Unparseable {field} {text:?}; using {MISSING_POSITION}");
            MISSING_POSITION
        }),
    }
}

pub fn coerce_float(raw: Option<&str>, field: &str) -> f64 {
    match raw {
        None => MISSING_POINTS,
        Some(text) => text.trim().parse::<f64>().unwrap_or_else(|_| {
            logd!("Unparseable {field} {text:?}; using {MISSING_POINTS}");
            MISSING_POINTS
        }),
    }
}

/// Always carries a fractional part: 25 → "25.0", 4.5 → "4.5".
pub fn fmt_points(p: f64) -> String {
    format!("{p:?}")
}
