mod fetch;
mod models;
mod parse;
mod scraper_error;

pub use fetch::PageFetcher;
pub use parse::parse_snapshot_html;
pub use scraper_error::ScrapeError;
