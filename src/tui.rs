use crate::common_scraper::ScrapingSummary;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;

/// Page-level progress bar plus a colored end-of-run summary.
pub struct ScraperTUI {
    bar: ProgressBar,
    enabled: bool,
}

impl ScraperTUI {
    pub fn new(total_pages: usize, enabled: bool) -> Self {
        let bar = if enabled {
            let style = ProgressStyle::with_template(
                "{spinner} Page {pos}/{len} [{bar:30}] {elapsed_precise} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░ ");
            let bar = ProgressBar::new(total_pages as u64);
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar, enabled }
    }

    pub fn update_page(&self, page: usize, cars_written: usize, slots_failed: usize) {
        self.bar.set_position(page as u64);
        self.bar
            .set_message(format!("{} cars, {} failed", cars_written, slots_failed));
    }

    /// Reports a page that ended pagination early (non-success status).
    pub fn stop_at_page(&self, page: usize, status: u16) {
        self.bar
            .println(format!("⏹ Page {} returned HTTP {}, stopping", page, status));
    }

    pub fn finish(&self, summary: &ScrapingSummary) -> io::Result<()> {
        self.bar.finish_and_clear();
        if !self.enabled {
            return Ok(());
        }

        execute!(
            io::stdout(),
            Print("─".repeat(80)),
            Print("\n"),
            SetForegroundColor(Color::Green),
            Print(format!("✅ Scraping completed: {} cars written", summary.cars_written)),
            ResetColor
        )?;

        if summary.slots_failed > 0 {
            execute!(
                io::stdout(),
                SetForegroundColor(Color::Red),
                Print(format!(", {} slots failed", summary.slots_failed)),
                ResetColor
            )?;
        }

        execute!(
            io::stdout(),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(" | {} pages\n", summary.pages_fetched)),
            ResetColor
        )?;

        Ok(())
    }
}
