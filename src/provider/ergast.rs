// src/provider/ergast.rs
//! Live provider backed by the Ergast-compatible Jolpica API.
//!
//! Schedule: `GET {base}/{year}.json`
//! Results:  `GET {base}/{year}/{round}/results.json`
//!
//! Only the final classification is ever requested; laps, pit stops and
//! timing endpoints are never touched.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Deserialize;
use ureq::Agent;

use super::cache::{Cache, CacheCategory};
use super::{DriverResult, EventFormat, EventInfo, ProviderError, RaceDataProvider};
use crate::config::consts::{CACHE_TTL_HOURS, PAGE_LIMIT};
use crate::config::options::ProviderOptions;
use crate::core::net;
use crate::core::throttle::RateLimiter;

/* ---------------- Wire format ---------------- */

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "MRData")]
    mr_data: MrData,
}

#[derive(Deserialize)]
struct MrData {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<WireRace>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRace {
    #[serde(default)]
    round: Option<String>,
    #[serde(default)]
    race_name: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(rename = "Circuit", default)]
    circuit: Option<WireCircuit>,
    #[serde(rename = "Sprint", default)]
    sprint: Option<serde_json::Value>,
    #[serde(rename = "SprintShootout", default)]
    sprint_shootout: Option<serde_json::Value>,
    #[serde(rename = "SprintQualifying", default)]
    sprint_qualifying: Option<serde_json::Value>,
    #[serde(rename = "Results", default)]
    results: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireCircuit {
    #[serde(rename = "Location", default)]
    location: Option<WireLocation>,
}

#[derive(Deserialize)]
struct WireLocation {
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Deserialize)]
struct WireResult {
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    points: Option<String>,
    #[serde(default)]
    grid: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "Driver", default)]
    driver: Option<WireDriver>,
    #[serde(rename = "Constructor", default)]
    constructor: Option<WireConstructor>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDriver {
    #[serde(default)]
    driver_id: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    nationality: Option<String>,
}

#[derive(Deserialize)]
struct WireConstructor {
    #[serde(default)]
    name: Option<String>,
}

/* ---------------- Decoding ---------------- */

fn detect_format(year: i32, race: &WireRace) -> EventFormat {
    if race.sprint_qualifying.is_some() && year >= 2024 {
        EventFormat::SprintQualifying
    } else if race.sprint_shootout.is_some() || (race.sprint.is_some() && year == 2023) {
        EventFormat::SprintShootout
    } else if race.sprint.is_some() {
        EventFormat::Sprint
    } else if race.sprint_qualifying.is_some() {
        // Some mirrors label the 2023 shootout as sprint qualifying.
        EventFormat::SprintShootout
    } else {
        EventFormat::Conventional
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn full_name(d: &WireDriver) -> Option<String> {
    let given = d.given_name.as_deref().unwrap_or("").trim();
    let family = d.family_name.as_deref().unwrap_or("").trim();
    let name = join!(given, " ", family);
    let name = name.trim();
    (!name.is_empty()).then(|| s!(name))
}

/// Decode a season schedule. Rows without a round number are dropped.
pub fn parse_schedule(body: &str, year: i32) -> Result<Vec<EventInfo>, serde_json::Error> {
    let env: Envelope = serde_json::from_str(body)?;
    let mut events = Vec::with_capacity(env.mr_data.race_table.races.len());

    for race in env.mr_data.race_table.races {
        let Some(round) = race.round.as_deref().and_then(|r| r.trim().parse::<u32>().ok()) else {
            logw!("Schedule {year}: skipping event without a round number");
            continue;
        };
        let format = detect_format(year, &race);
        let (location, country) = race.circuit
            .and_then(|c| c.location)
            .map(|l| (or_empty!(l.locality), or_empty!(l.country)))
            .unwrap_or_default();

        events.push(EventInfo {
            round,
            event_name: race.race_name.unwrap_or_else(|| format!("Round {round}")),
            event_date: race.date.as_deref().and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            location,
            country,
            format,
        });
    }
    events.sort_by_key(|e| e.round);
    Ok(events)
}

/// Decode a race classification. `None` when the race has no results yet.
pub fn parse_results(body: &str) -> Result<Option<Vec<DriverResult>>, serde_json::Error> {
    let env: Envelope = serde_json::from_str(body)?;
    let Some(race) = env.mr_data.race_table.races.into_iter().next() else {
        return Ok(None);
    };
    if race.results.is_empty() {
        return Ok(None);
    }

    let rows = race.results
        .into_iter()
        .map(|r| {
            let (full, id, nationality) = match &r.driver {
                Some(d) => (full_name(d), d.driver_id.clone(), d.nationality.clone()),
                None => (None, None, None),
            };
            DriverResult {
                full_name: full,
                driver_id: non_empty(id),
                team_name: r.constructor.and_then(|c| c.name),
                position: non_empty(r.position),
                points: non_empty(r.points),
                grid_position: non_empty(r.grid),
                status: r.status,
                nationality,
            }
        })
        .collect();
    Ok(Some(rows))
}

/* ---------------- Provider ---------------- */

pub struct ErgastProvider {
    agent: Agent,
    opts: ProviderOptions,
    cache: Option<Cache>,
    limiter: RateLimiter,
}

impl ErgastProvider {
    pub fn new(opts: ProviderOptions) -> Result<Self, ProviderError> {
        let cache = match &opts.cache_dir {
            Some(dir) => Some(Cache::open(dir)?),
            None => None,
        };
        Ok(Self::with_cache(opts, cache))
    }

    /// Live requests only; `opts.cache_dir` is ignored.
    pub fn uncached(opts: ProviderOptions) -> Self {
        Self::with_cache(opts, None)
    }

    fn with_cache(opts: ProviderOptions, cache: Option<Cache>) -> Self {
        Self {
            agent: net::agent(opts.timeout),
            limiter: RateLimiter::new(opts.burst, opts.hourly_limit, opts.request_pause),
            opts,
            cache,
        }
    }

    /// Seasons still in progress can change; everything older is final.
    fn ttl_for(year: i32) -> Option<Duration> {
        (year >= Local::now().year()).then(|| Duration::hours(CACHE_TTL_HOURS))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json?limit={}", self.opts.base_url.trim_end_matches('/'), path, PAGE_LIMIT)
    }

    /// Cached-or-live GET of `path`, decoded with `decode`.
    /// Only bodies that decode cleanly are written to the cache.
    fn fetch<T, F>(
        &mut self,
        category: CacheCategory,
        path: &str,
        ttl: Option<Duration>,
        decode: F,
    ) -> Result<T, ProviderError>
    where
        F: Fn(&str) -> Result<T, serde_json::Error>,
    {
        let url = self.url(path);

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(category, path, ttl) {
                match decode(&body) {
                    Ok(v) => {
                        logd!("Cache hit: {path}");
                        return Ok(v);
                    }
                    Err(e) => {
                        logw!("Discarding unreadable cache entry {path}: {e}");
                        cache.remove(category, path);
                    }
                }
            }
        }

        self.limiter.acquire();
        let body = net::http_get(&self.agent, &url, &self.opts.retry)
            .map_err(|source| ProviderError::Http { url: url.clone(), source })?;
        let value = decode(&body).map_err(|source| ProviderError::Decode { url, source })?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(category, path, &body) {
                logw!("Could not cache {path}: {e}");
            }
        }
        Ok(value)
    }
}

impl RaceDataProvider for ErgastProvider {
    fn schedule(&mut self, year: i32) -> Result<Vec<EventInfo>, ProviderError> {
        let path = format!("{year}");
        self.fetch(CacheCategory::Schedule, &path, Self::ttl_for(year), |b| parse_schedule(b, year))
    }

    fn race_results(&mut self, year: i32, event: &EventInfo) -> Result<Vec<DriverResult>, ProviderError> {
        let path = format!("{year}/{}/results", event.round);
        self.fetch(CacheCategory::Results, &path, Self::ttl_for(year), parse_results)?
            .ok_or_else(|| ProviderError::NoClassification { year, event: event.event_name.clone() })
    }
}
