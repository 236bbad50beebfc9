pub mod config;
pub mod engine;
pub mod error;
pub mod facets;
pub mod filter;
pub mod normalizer;
pub mod popularity;
pub mod protocol;
pub mod relevance;
pub mod repository;
pub mod server;
pub mod service;
pub mod sorting;
pub mod suggestion;
pub mod transport;
pub mod types;

pub use config::{RelevanceWeights, SearchConfig};
pub use engine::SearchEngine;
pub use error::SearchError;
pub use repository::{CatalogRepository, HistoryRepository, MemoryCatalog, MemoryHistory};
pub use service::SearchService;
pub use types::*;
