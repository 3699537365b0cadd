use crate::error_log::ErrorLog;
use crate::scraper::{page_url, ListingSelectors};
use crate::tui::ScraperTUI;
use crate::{debug_eprintln, debug_println, utils};
use anyhow::Result;
use chrono::Local;
use scraper::Html;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScrapingOptions {
    /// Site root, with trailing slash.
    pub base_url: String,
    /// CSV base name; the run date and `.csv` are appended.
    pub output_name: String,
    /// Error log path, used as given.
    pub log_file: PathBuf,
    pub max_pages: usize,
    pub slots_per_page: usize,
    /// Pause before every page request.
    pub delay: Duration,
    pub show_progress: bool,
}

impl Default for ScrapingOptions {
    fn default() -> Self {
        Self {
            base_url: "https://auto.drom.ru/".to_string(),
            output_name: "cars".to_string(),
            log_file: PathBuf::from("logs_cars.log"),
            max_pages: 100,
            slots_per_page: 20,
            delay: Duration::from_secs(2),
            show_progress: true,
        }
    }
}

/// Raw response of one listing page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapingSummary {
    pub csv_path: PathBuf,
    pub pages_fetched: usize,
    pub cars_written: usize,
    pub slots_failed: usize,
    /// HTTP status of the page that ended the run before `max_pages`.
    pub stopped_early: Option<u16>,
}

/// Runs one scraping pass: pages `1..=max_pages`, `slots_per_page` slots each.
///
/// Slot-level extraction failures go to the error log and the run goes on.
/// Fetch, CSV and log I/O failures abort the run; rows written so far stay
/// in the CSV. A non-success HTTP status is taken as the end of the listings.
pub fn run_scraper_with_options<S: PageSource>(
    source: &S,
    options: &ScrapingOptions,
) -> Result<ScrapingSummary> {
    let error_log = ErrorLog::create(&options.log_file)?;
    let csv_path = utils::create_car_csv(&options.output_name, Local::now().date_naive())?;
    println!("Writing cars to {}", csv_path.display());
    println!("Logging extraction errors to {}", error_log.path().display());

    let selectors = ListingSelectors::new()?;
    let tui = ScraperTUI::new(options.max_pages, options.show_progress);

    let mut summary = ScrapingSummary {
        csv_path,
        pages_fetched: 0,
        cars_written: 0,
        slots_failed: 0,
        stopped_early: None,
    };

    for page in 1..=options.max_pages {
        if !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }

        let url = page_url(&options.base_url, page);
        let fetched = source.fetch(&url)?;

        if !fetched.is_success() {
            debug_println!("Page {} returned status {}", url, fetched.status);
            tui.stop_at_page(page, fetched.status);
            summary.stopped_early = Some(fetched.status);
            break;
        }
        summary.pages_fetched += 1;

        let document = Html::parse_document(&fetched.body);
        let listings = selectors.listings(&document);
        debug_println!("Found {} listings on page {}", listings.len(), page);

        for slot in 0..options.slots_per_page {
            match selectors.parse_slot(&listings, slot) {
                Ok(car) => {
                    utils::append_car_to_csv(&summary.csv_path, &car)?;
                    summary.cars_written += 1;
                }
                Err(e) => {
                    debug_eprintln!("Error extracting page {} slot {}: {:#}", page, slot, e);
                    error_log.add_error(page, slot, &format!("{:#}", e))?;
                    summary.slots_failed += 1;
                }
            }
        }

        tui.update_page(page, summary.cars_written, summary.slots_failed);
    }

    tui.finish(&summary)?;

    Ok(summary)
}
