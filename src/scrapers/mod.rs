pub mod clubspark;
pub mod traits;
pub mod types;

pub use clubspark::ClubSparkScraper;
pub use traits::AvailabilityScraper;
pub use types::ScrapeParams;
