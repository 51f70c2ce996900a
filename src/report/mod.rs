// src/report/mod.rs
//
// Season heatmap: table file → one season → win matrix → PNG.
// Every failure happens before the image is written, so a failed run
// never leaves a new (or truncated) image behind.

pub mod matrix;
pub mod render;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::consts::TABLE_SEP;
use crate::config::options::ReportOptions;
use crate::store::RecordTable;

pub use matrix::SeasonWinMatrix;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{} not found. Please ensure the file exists in the current directory.", .0.display())]
    MissingInput(PathBuf),
    #[error("No data found for the {0} season in the CSV.")]
    EmptySeason(i32),
    #[error("No race winners recorded for the {0} season.")]
    NoWinners(i32),
    #[error("could not read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub struct ReportOutcome {
    pub path: PathBuf,
    pub matrix: SeasonWinMatrix,
    pub season_rows: usize,
    /// Table rows that could not be parsed and were ignored.
    pub rows_skipped: usize,
    /// False when no font was available and text was left out.
    pub labelled: bool,
}

/// Load the table and build the season's win matrix.
pub fn build_matrix(opts: &ReportOptions) -> Result<(SeasonWinMatrix, usize, usize), ReportError> {
    if !opts.input.is_file() {
        return Err(ReportError::MissingInput(opts.input.clone()));
    }
    let loaded = RecordTable::load(&opts.input, TABLE_SEP)
        .map_err(|e| ReportError::Read { path: opts.input.clone(), reason: e.to_string() })?;

    let season = loaded.table.season(opts.season);
    if season.is_empty() {
        return Err(ReportError::EmptySeason(opts.season));
    }

    let m = SeasonWinMatrix::build(opts.season, &season, opts.top_n);
    if m.is_empty() {
        return Err(ReportError::NoWinners(opts.season));
    }
    Ok((m, season.len(), loaded.skipped.len()))
}

pub fn run(opts: &ReportOptions) -> Result<ReportOutcome, ReportError> {
    let (matrix, season_rows, rows_skipped) = build_matrix(opts)?;

    let font = render::load_font();
    let img = render::render_heatmap(&matrix, &opts.title(), font.as_ref());

    if let Some(parent) = opts.out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::Write {
                path: opts.out_path.clone(),
                source: image::ImageError::IoError(e),
            })?;
        }
    }
    img.save(&opts.out_path)
        .map_err(|source| ReportError::Write { path: opts.out_path.clone(), source })?;

    Ok(ReportOutcome {
        path: opts.out_path.clone(),
        matrix,
        season_rows,
        rows_skipped,
        labelled: font.is_some(),
    })
}
