use std::fs;
use std::path::Path;

use court_scout::diff::diff;
use court_scout::filter;
use court_scout::notify::Mailer;
use court_scout::render::render_report;
use court_scout::report::project;
use court_scout::scrapers::{AvailabilityScraper, ClubSparkScraper, ScrapeParams};
use court_scout::store;
use tracing::{error, info, warn, Level};

const SNAPSHOT_PATH: &str = "park_data.json";
const POLICY_PATH: &str = "desired_availability.json";
const UPDATES_PATH: &str = "availability_updates.html";
const FULL_REPORT_PATH: &str = "output.html";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🎾 Court Scout - Hackney Tennis Availability");
    info!("============================================");

    // Collection happens entirely up front; the core below is pure
    let scraper = ClubSparkScraper::new(ScrapeParams::default())?;
    info!("Collecting booking sheets from {}...", scraper.source_name());
    let current = scraper.collect().await?;

    let previous = store::load(Path::new(SNAPSHOT_PATH));
    let new_slots = diff(&previous, &current);
    info!("{} newly opened slots since last run", new_slots.slot_count());

    let mailer = Mailer::from_env()?;
    let mut failed_stages: Vec<&str> = Vec::new();

    // Filtered updates. A missing or broken policy kills only this path;
    // the unfiltered report and the snapshot save still go ahead.
    match filter::load_policy(Path::new(POLICY_PATH)) {
        Ok(policy) => {
            let matched = filter::filter(&new_slots, &policy);
            if matched.is_empty() {
                info!("No new slots match the desired availability");
                // Drop any stale updates file so a scheduled mailer
                // never re-sends an old report
                if Path::new(UPDATES_PATH).exists() {
                    if let Err(e) = fs::remove_file(UPDATES_PATH) {
                        warn!("Could not remove stale {UPDATES_PATH}: {e}");
                    }
                }
            } else {
                info!("✅ {} new slots match the desired availability", matched.slot_count());
                let html = render_report(&project(&matched));
                match fs::write(UPDATES_PATH, &html) {
                    Ok(()) => info!("💾 Saved filtered updates to {UPDATES_PATH}"),
                    Err(e) => {
                        error!("Could not write {UPDATES_PATH}: {e}");
                        failed_stages.push("updates-report");
                    }
                }
                if let Some(mailer) = &mailer {
                    let subject = "Hourly Hackney Tennis Availability Updates";
                    if let Err(e) = mailer.send(subject, &html).await {
                        error!("Email delivery failed: {e:#}");
                        failed_stages.push("notify");
                    }
                }
            }
        }
        Err(e) => {
            error!("Preference policy unavailable, skipping filtered updates: {e:#}");
            failed_stages.push("policy");
        }
    }

    // Full availability report, independent of anyone's preferences
    let full_html = render_report(&project(&current));
    match fs::write(FULL_REPORT_PATH, full_html) {
        Ok(()) => info!("💾 Saved full availability report to {FULL_REPORT_PATH}"),
        Err(e) => {
            error!("Could not write {FULL_REPORT_PATH}: {e}");
            failed_stages.push("full-report");
        }
    }

    // Persist last: the diff above consumed the previous baseline, and
    // save destroys it
    match store::save(Path::new(SNAPSHOT_PATH), &current) {
        Ok(()) => info!("💾 Saved snapshot baseline to {SNAPSHOT_PATH}"),
        Err(e) => {
            error!("Could not persist snapshot: {e:#}");
            failed_stages.push("save");
        }
    }

    if failed_stages.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("run finished with failed stages: {}", failed_stages.join(", "))
    }
}
