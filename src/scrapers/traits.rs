use crate::models::Snapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for availability collectors.
/// The core pipeline only ever sees a Snapshot, so other booking
/// providers can be added behind this seam later.
#[async_trait]
pub trait AvailabilityScraper: Send + Sync {
    /// Collect one coherent pass over every park and date.
    async fn collect(&self) -> Result<Snapshot>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
