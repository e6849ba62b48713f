use crate::models::{Slot, Snapshot, TimeRange};
use crate::scrapers::traits::AvailabilityScraper;
use crate::scrapers::types::ScrapeParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use headless_chrome::{Browser, LaunchOptions};
use scraper::{Html, Selector};
use std::thread;
use tracing::{debug, info, warn};

/// Browser-based collector for ClubSpark booking sheets.
///
/// The booking sheet is rendered client-side, so a plain GET returns an
/// empty shell; we need a real browser to see the slots.
pub struct ClubSparkScraper {
    browser: Browser,
    params: ScrapeParams,
}

impl ClubSparkScraper {
    pub fn new(params: ScrapeParams) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self { browser, params })
    }

    /// The dates to visit, one per day of the horizon.
    ///
    /// After 20:00 the site keeps showing slots from earlier the same
    /// day, so an evening run shifts the whole window to tomorrow.
    fn collection_dates(&self) -> Vec<NaiveDate> {
        let now = Local::now();
        let cutoff = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        let first_day = if now.time() > cutoff { 1 } else { 0 };

        (first_day..first_day + self.params.days_ahead as i64)
            .map(|days| (now + Duration::days(days)).date_naive())
            .collect()
    }

    fn booking_url(park: &str, date: NaiveDate) -> String {
        format!(
            "https://clubspark.lta.org.uk/{park}/Booking/BookByDate#?date={}&role=guest",
            date.format("%Y-%m-%d")
        )
    }

    /// Fetch one park/date booking sheet and return its rendered HTML.
    fn fetch_booking_sheet(&self, url: &str) -> Result<String> {
        let tab = self.browser.new_tab()?;
        tab.navigate_to(url)?;
        tab.wait_until_navigated()?;

        // The sheet fills in after navigation settles
        thread::sleep(std::time::Duration::from_secs(2));
        tab.wait_for_element(".booking-sheet")?;

        let html_result = tab.evaluate("document.documentElement.outerHTML", false)?;
        let html = html_result
            .value
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();

        let _ = tab.close(true);
        Ok(html)
    }
}

#[async_trait]
impl AvailabilityScraper for ClubSparkScraper {
    async fn collect(&self) -> Result<Snapshot> {
        let dates = self.collection_dates();
        let mut snapshot = Snapshot::default();

        for park in &self.params.parks {
            info!("Checking {park}...");
            for &date in &dates {
                let url = Self::booking_url(park, date);
                debug!("Fetching {url}");

                let html = match self.fetch_booking_sheet(&url) {
                    Ok(html) => html,
                    Err(e) => {
                        warn!("Skipping {park} {date}: {e:#}");
                        continue;
                    }
                };

                for slot in parse_booking_sheet(&html, &url) {
                    snapshot.push(park, date, slot);
                }
            }
        }

        info!(
            "✅ Collected {} paid slots across {} parks",
            snapshot.slot_count(),
            self.params.parks.len()
        );
        Ok(snapshot)
    }

    fn source_name(&self) -> &'static str {
        "ClubSpark"
    }
}

/// Pull the paid, unbooked slots out of a rendered booking sheet.
///
/// Cells missing a recognizable time or price are skipped with a
/// warning; one broken cell never takes down the collection pass.
pub fn parse_booking_sheet(html: &str, url: &str) -> Vec<Slot> {
    let document = Html::parse_document(html);
    let cell_selector = Selector::parse(".book-interval.not-booked").unwrap();
    let time_selector = Selector::parse(".available-booking-slot").unwrap();
    let cost_selector = Selector::parse(".cost").unwrap();

    let mut slots = Vec::new();

    for cell in document.select(&cell_selector) {
        let time_text = match cell.select(&time_selector).next() {
            Some(el) => el.text().collect::<String>(),
            None => continue,
        };
        let Some(time) = extract_time_range(&time_text) else {
            warn!("Skipping slot with unrecognizable time: {:?}", time_text.trim());
            continue;
        };

        let cost_text = cell
            .select(&cost_selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        // Free and unpriced courts are noise, drop them here
        if let Some(slot) = Slot::paid(time, &cost_text, url) {
            slots.push(slot);
        }
    }

    slots
}

/// Find an `HH:MM - HH:MM` range anywhere in a cell's text, which also
/// carries labels like "Book at 09:00 - 10:00".
fn extract_time_range(text: &str) -> Option<TimeRange> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(3).find_map(|window| {
        if window[1] == "-" {
            TimeRange::parse(&format!("{} - {}", window[0], window[2]))
        } else {
            None
        }
    })
}
