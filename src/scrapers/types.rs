use serde::{Deserialize, Serialize};

/// Which parks to visit and how far ahead to look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeParams {
    /// ClubSpark venue slugs, one per park.
    pub parks: Vec<String>,
    /// Number of consecutive days to check.
    pub days_ahead: u32,
}

impl Default for ScrapeParams {
    fn default() -> Self {
        Self {
            parks: [
                "LondonFieldsPark",
                "ClissoldParkHackney",
                "HackneyDowns",
                "AskeGardens",
                "MillfieldsParkMiddlesex",
                "SpringHillParkTennis",
            ]
            .map(String::from)
            .to_vec(),
            days_ahead: 7,
        }
    }
}
