// src/bin/collect.rs
use f1_scrape::{
    collect,
    config::options::{CollectOptions, ProviderOptions},
    progress::ConsoleProgress,
    provider::ErgastProvider,
    summary,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let opts = CollectOptions::default();
    f1_scrape::log::init(&opts.log_path);

    let mut progress = ConsoleProgress::new();
    let mut provider = open_provider(ProviderOptions::default());

    let (table, report) = match collect::run(&opts, &mut provider, Some(&mut progress)) {
        Ok(v) => v,
        Err(e) => {
            f1_scrape::loge!("Could not write {}: {e}", opts.out_path.display());
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if !report.failures.is_empty() {
        println!(
            "{} of {} years and {} of {} races could not be retrieved (see {})",
            report.years_failed(),
            report.years_attempted,
            report.races_failed(),
            report.races_attempted,
            opts.log_path.display(),
        );
    }

    println!();
    print!("{}", summary::format_summary(&table, opts.summary_top_n));
    f1_scrape::logf!("Printed summary statistics");
    Ok(())
}

/// A cache that cannot be opened only costs speed: carry on uncached.
fn open_provider(opts: ProviderOptions) -> ErgastProvider {
    let uncached = ProviderOptions { cache_dir: None, ..opts.clone() };
    ErgastProvider::new(opts).unwrap_or_else(|e| {
        f1_scrape::logw!("{e}; continuing without a response cache");
        println!("Warning: {e}; continuing without a response cache");
        ErgastProvider::uncached(uncached)
    })
}
