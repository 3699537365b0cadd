use anyhow::Result;
use clap::Parser;
use dromfinder::common_scraper::{run_scraper_with_options, ScrapingOptions};
use dromfinder::debug;
use dromfinder::scraper::HttpPageSource;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Dromfinder - used car listing scraper")]
struct Args {
    /// Site root to scrape, with trailing slash
    #[clap(short, long, default_value = "https://auto.drom.ru/")]
    url: String,

    /// Base name of the output CSV (the run date and .csv are appended)
    #[clap(short, long, default_value = "cars")]
    output: String,

    /// Error log file (defaults to logs_<output>.log)
    #[clap(short, long)]
    log: Option<PathBuf>,

    /// Number of listing pages to scrape
    #[clap(short, long, default_value = "100")]
    pages: usize,

    /// Listing slots read per page
    #[clap(short, long, default_value = "20")]
    slots: usize,

    /// Pause before each page request, in milliseconds
    #[clap(long, default_value = "2000")]
    delay_ms: u64,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    debug::set_debug(args.debug);

    println!("Dromfinder - Used Car Listing Scraper");
    println!("=====================================");

    let log_file = args
        .log
        .unwrap_or_else(|| PathBuf::from(format!("logs_{}.log", args.output)));

    let options = ScrapingOptions {
        base_url: args.url,
        output_name: args.output,
        log_file,
        max_pages: args.pages,
        slots_per_page: args.slots,
        delay: Duration::from_millis(args.delay_ms),
        show_progress: true,
    };

    let source = HttpPageSource::new()?;
    let summary = run_scraper_with_options(&source, &options)?;

    println!("\n=== Summary ===");
    println!("Pages fetched: {}", summary.pages_fetched);
    println!("Cars written: {}", summary.cars_written);
    println!("Slots failed: {}", summary.slots_failed);
    if let Some(status) = summary.stopped_early {
        println!("Stopped early: HTTP {}", status);
    }
    println!("Saved to: {}", summary.csv_path.display());
    println!("Errors logged to: {}", options.log_file.display());

    Ok(())
}
