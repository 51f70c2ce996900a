// src/bin/report.rs
use f1_scrape::{config::options::ReportOptions, report};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let opts = ReportOptions::default();
    let outcome = match report::run(&opts) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if outcome.rows_skipped > 0 {
        eprintln!("Warning: {} unreadable rows in {} were ignored", outcome.rows_skipped, opts.input.display());
    }
    if !outcome.labelled {
        eprintln!("Warning: no TrueType font found; heatmap written without labels");
    }
    println!("Plot saved as {}", outcome.path.display());
    Ok(())
}
