//! Individual signal sources.

mod google_news;
mod newsapi;
mod serper;

pub(crate) use google_news::fetch_google_news_rss;
pub(crate) use newsapi::fetch_newsapi_articles;
pub(crate) use serper::fetch_serper_results;

/// Upper bound on signals kept from any single source.
pub(crate) const MAX_RESULTS_PER_SOURCE: usize = 5;
