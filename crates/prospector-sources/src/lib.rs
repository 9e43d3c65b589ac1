//! Signal collection for prospect companies.
//!
//! Pulls recent news (NewsAPI, or Google News RSS when no NewsAPI key is
//! configured) and web search results (Serper) for a company name and
//! normalizes every source into [`AggregatedSignal`]s. A failing source
//! contributes an empty list; aggregation itself never fails.
//!
//! [`AggregatedSignal`]: prospector_core::AggregatedSignal

pub mod aggregator;
pub mod error;
pub mod types;

mod sources;

pub use aggregator::SourceAggregator;
pub use error::SourceError;
pub use types::SourcesConfig;
