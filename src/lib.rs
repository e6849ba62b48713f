pub mod diff;
pub mod filter;
pub mod models;
pub mod notify;
pub mod render;
pub mod report;
pub mod scrapers;
pub mod store;
