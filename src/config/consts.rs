// src/config/consts.rs

// Provider (Ergast-compatible Jolpica mirror)
pub const API_BASE: &str = "https://api.jolpi.ca/ergast/f1";
pub const USER_AGENT: &str = concat!("f1_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const PAGE_LIMIT: u32 = 100;
pub const RACE_SESSION: &str = "Race";
pub const RACE_SESSION_SLOT: usize = 5;

// Politeness / retry. Jolpica allows 4 req/s burst and 500 req/h sustained.
pub const REQUEST_PAUSE_MS: u64 = 250;
pub const RATE_BURST: u32 = 4;
pub const RATE_PER_HOUR: u32 = 500;
pub const RETRY_MAX: u32 = 6;
pub const RETRY_INITIAL_MS: u64 = 1_000;
pub const RETRY_MAX_MS: u64 = 60_000;
pub const RETRY_AFTER_MAX_SECS: u64 = 3_600;

// Local cache
pub const CACHE_DIR: &str = "f1_cache_2000_2025";
pub const CACHE_TTL_HOURS: i64 = 24;

// Collector
pub const YEAR_START: i32 = 2000;
pub const YEAR_END: i32 = 2025; // inclusive
pub const DATA_FILE: &str = "f1_driver_data_2000_2025.csv";
pub const DEFAULT_LOG_FILE: &str = "f1_data_log.txt";
pub const TABLE_SEP: char = ',';
pub const SUMMARY_TOP_N: usize = 5;
pub const UNKNOWN_DRIVER: &str = "Unknown";
pub const MISSING_POSITION: i64 = -1;
pub const MISSING_POINTS: f64 = 0.0;

// Reporter
pub const REPORT_SEASON: i32 = 2000;
pub const REPORT_TOP_N: usize = 5;
pub const HEATMAP_FILE: &str = "f1_2000_driver_performance.png";

// Heatmap layout (pixels)
pub const CELL_W: u32 = 56;
pub const CELL_H: u32 = 44;
pub const MARGIN: u32 = 24;
pub const TITLE_PX: f32 = 26.0;
pub const LABEL_PX: f32 = 16.0;
pub const CELL_PX: f32 = 18.0;
pub const COLORBAR_W: u32 = 22;

// Fonts tried in order; first readable one wins.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
