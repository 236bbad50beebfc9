use clap::Parser;

// ---------------------------------------------------------------------------
// Search configuration
// ---------------------------------------------------------------------------

/// Per-field relevance weights. A field contributes
/// `weight * matched_tokens / total_tokens` to an item's score.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceWeights {
	pub name: f64,
	pub brand: f64,
	pub tags: f64,
	pub keywords: f64,
	pub category: f64,
	pub vendor: f64,
	pub description: f64,
	/// Added when the whole normalized name equals the normalized query.
	pub exact_name_bonus: f64,
}

impl Default for RelevanceWeights {
	fn default() -> Self {
		Self {
			name: 10.0,
			brand: 5.0,
			tags: 5.0,
			keywords: 5.0,
			category: 2.0,
			vendor: 2.0,
			description: 1.0,
			exact_name_bonus: 100.0,
		}
	}
}

/// Configuration for a `SearchEngine`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
	pub weights: RelevanceWeights,
	pub default_page_size: usize,
	pub max_page_size: usize,
	/// Snapshots at least this large are scanned in parallel.
	pub parallel_threshold: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			weights: RelevanceWeights::default(),
			default_page_size: 20,
			max_page_size: 50,
			parallel_threshold: 2048,
		}
	}
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
	name = "storefront-search-engine",
	about = "Product search and discovery engine over JSON-RPC 2.0 / NDJSON stdio"
)]
pub struct CliArgs {
	/// JSON file holding an array of catalog items to load at startup
	#[arg(long, env = "STOREFRONT_SEARCH_CATALOG")]
	pub catalog: Option<String>,

	/// Default page size when a request names none
	#[arg(long, default_value = "20", env = "STOREFRONT_SEARCH_DEFAULT_PAGE_SIZE")]
	pub default_page_size: usize,

	/// Upper bound applied to every requested page size
	#[arg(long, default_value = "50", env = "STOREFRONT_SEARCH_MAX_PAGE_SIZE")]
	pub max_page_size: usize,

	/// Catalog size from which match/filter scans run in parallel
	#[arg(long, default_value = "2048", env = "STOREFRONT_SEARCH_PARALLEL_THRESHOLD")]
	pub parallel_threshold: usize,

	/// Score bonus for an exact full-name match
	#[arg(long, default_value = "100", env = "STOREFRONT_SEARCH_EXACT_NAME_BONUS")]
	pub exact_name_bonus: f64,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "info", env = "STOREFRONT_SEARCH_LOG_LEVEL")]
	pub log_level: String,
}

impl CliArgs {
	pub fn search_config(&self) -> SearchConfig {
		let max_page_size = self.max_page_size.max(1);
		SearchConfig {
			weights: RelevanceWeights {
				exact_name_bonus: self.exact_name_bonus,
				..RelevanceWeights::default()
			},
			default_page_size: self.default_page_size.clamp(1, max_page_size),
			max_page_size,
			parallel_threshold: self.parallel_threshold,
		}
	}
}
