// src/provider/cache.rs
//! File-based response cache.
//!
//! Raw JSON bodies are stored under `<dir>/<category>/<key>.json`, wrapped
//! with the time they were fetched. Entries without a TTL never expire.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::sanitize::cache_key;

#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCategory {
    Schedule,
    Results,
}

impl CacheCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            CacheCategory::Schedule => "schedule",
            CacheCategory::Results => "results",
        }
    }
}

pub struct Cache {
    base_dir: PathBuf,
}

impl Cache {
    /// Open (and create on first use) the cache rooted at `base_dir`.
    pub fn open(base_dir: &Path) -> io::Result<Self> {
        if !base_dir.exists() {
            fs::create_dir_all(base_dir)?;
            logf!("Created cache directory: {}", base_dir.display());
        }
        logf!("Cache enabled");
        Ok(Self { base_dir: base_dir.to_path_buf() })
    }

    fn entry_path(&self, category: CacheCategory, key: &str) -> PathBuf {
        self.base_dir
            .join(category.dir_name())
            .join(format!("{}.json", cache_key(key)))
    }

    /// Cached body, if present and not older than `ttl`.
    pub fn get(&self, category: CacheCategory, key: &str, ttl: Option<Duration>) -> Option<String> {
        let path = self.entry_path(category, key);
        let text = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry<String> = serde_json::from_str(&text).ok()?;

        if let Some(ttl) = ttl {
            if Utc::now() - entry.cached_at > ttl {
                let _ = fs::remove_file(&path);
                return None;
            }
        }
        Some(entry.data)
    }

    pub fn set(&self, category: CacheCategory, key: &str, body: &str) -> io::Result<()> {
        let path = self.entry_path(category, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entry = CacheEntry { data: body, cached_at: Utc::now() };
        let text = serde_json::to_string(&entry).map_err(io::Error::other)?;
        fs::write(&path, text)
    }

    pub fn remove(&self, category: CacheCategory, key: &str) {
        let _ = fs::remove_file(self.entry_path(category, key));
    }
}
