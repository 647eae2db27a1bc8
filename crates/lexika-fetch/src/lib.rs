mod http;
mod import;

pub use http::{FetchError, HttpFetcher};
pub use import::parse_tabular;
