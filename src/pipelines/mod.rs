pub mod scrape;

pub use scrape::{process, search_url};
