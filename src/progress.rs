// src/progress.rs
use crate::collect::UnitFailure;

/// Lightweight progress reporting used by the collector.
/// Frontends implement this to surface status to users; the log file is
/// written independently of whichever sink is attached.
pub trait Progress {
    /// Called at the start with the number of years to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One year finished (successfully or not).
    fn year_done(&mut self, _year: i32, _races_loaded: usize) {}

    /// A schedule or race could not be retrieved.
    fn item_failed(&mut self, _failure: &UnitFailure) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Plain stdout lines, one per year plus one per failure.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self { Self::default() }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn year_done(&mut self, year: i32, races_loaded: usize) {
        self.done += 1;
        println!("Processing years: {}/{} ({year}: {races_loaded} races)", self.done, self.total);
    }
    fn item_failed(&mut self, failure: &UnitFailure) {
        println!("{}", failure.console_line());
    }
    fn finish(&mut self) {
        println!("Processing years: done ({}/{})", self.done, self.total);
    }
}
