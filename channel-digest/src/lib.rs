pub mod types;
pub mod traits;
pub mod normalize;
pub mod fetcher;
pub mod resolver;
pub mod parser;
pub mod feed;
pub mod filter;
pub mod aggregator;
pub mod pipeline;
pub mod config;
pub mod render;
pub mod cli;
pub mod utils;

pub use types::*;
pub use traits::{ChannelResolver, FeedSource};
pub use fetcher::Fetcher;
pub use resolver::PageResolver;
pub use parser::FeedParser;
pub use feed::ChannelFeed;
pub use filter::{EntryFilter, FilterPolicy};
pub use aggregator::{AggregatedResult, DigestAggregator, GroupSection, GroupingMode};
pub use pipeline::{DigestPipeline, RunReport};
pub use config::{ChannelList, ChannelSpec, DigestConfig};
pub use render::OutputFormat;
pub use cli::Args;
