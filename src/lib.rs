// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;

pub mod csv;
pub mod file;
pub mod record;
pub mod store;

pub mod provider;
pub mod progress;
pub mod collect;
pub mod summary;
pub mod report;
