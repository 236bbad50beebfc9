// ---------------------------------------------------------------------------
// SearchEngine: composes the search pipeline over a supplied snapshot
// ---------------------------------------------------------------------------
//
// search:     normalize -> filter + match -> sort -> facets -> paginate
// suggest:    normalize -> suggestion engine
// popularity: history log -> aggregator
//
// The engine owns only its configuration. Each call reads the snapshot it is
// handed and returns freshly owned results, so one engine can serve any
// number of threads at once.
// ---------------------------------------------------------------------------

use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::facets::compute_facets;
use crate::filter::FilterPipeline;
use crate::normalizer::{normalize_required, NormalizedQuery};
use crate::popularity;
use crate::relevance::{score_item, ScoredItem};
use crate::sorting::{paginate, sort_items, PageRequest};
use crate::suggestion;
use crate::types::{
	CatalogItem, PopularSearchEntry, RecentSearchEntry, SearchFilters, SearchHistoryEvent,
	SearchResultPage, SuggestionEntry,
};

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
	config: SearchConfig,
}

impl SearchEngine {
	pub fn new(config: SearchConfig) -> Self {
		Self { config }
	}

	// -- Search --------------------------------------------------------------

	/// Run a free-text search with structured filters over `items`.
	///
	/// Fails with `InvalidQuery` for a blank query, `InvalidFilter` for
	/// contradictory constraints and `InvalidPagination` for non-positive
	/// page fields. A page past the end is not an error.
	pub fn search(
		&self,
		items: &[CatalogItem],
		query: &str,
		filters: &SearchFilters,
	) -> Result<SearchResultPage, SearchError> {
		let normalized = normalize_required(query)?;
		let pipeline = FilterPipeline::from_filters(filters)?;
		let request = PageRequest::from_filters(filters, &self.config)?;

		let mut matched = self.scan(items, &normalized, &pipeline);
		sort_items(&mut matched, filters.sort_by, filters.sort_order);

		let facets = compute_facets(matched.iter().map(|s| s.item));
		let (page, info) = paginate(&matched, request);

		tracing::debug!(
			query = %normalized.text,
			candidates = items.len(),
			total = info.total,
			page = info.current_page,
			"search complete"
		);

		Ok(SearchResultPage {
			items: page.iter().map(|s| s.item.clone()).collect(),
			total: info.total,
			total_pages: info.total_pages,
			current_page: info.current_page,
			page_size: info.page_size,
			has_next_page: info.has_next_page,
			has_previous_page: info.has_previous_page,
			facets,
		})
	}

	/// Filter and score every item. Large snapshots are scanned with rayon;
	/// the later sort is a total order, so the result does not depend on how
	/// the scan was partitioned.
	fn scan<'a>(
		&self,
		items: &'a [CatalogItem],
		query: &NormalizedQuery,
		pipeline: &FilterPipeline,
	) -> Vec<ScoredItem<'a>> {
		let weights = &self.config.weights;
		let evaluate = |item: &'a CatalogItem| -> Option<ScoredItem<'a>> {
			if !pipeline.accepts(item) {
				return None;
			}
			score_item(item, query, weights).map(|score| ScoredItem { item, score })
		};

		if items.len() >= self.config.parallel_threshold {
			items.par_iter().filter_map(&evaluate).collect()
		} else {
			items.iter().filter_map(&evaluate).collect()
		}
	}

	// -- Suggestions ---------------------------------------------------------

	/// Autocomplete display strings for `query`.
	pub fn suggest(
		&self,
		items: &[CatalogItem],
		query: &str,
		limit: i64,
	) -> Result<Vec<String>, SearchError> {
		Ok(self
			.suggest_entries(items, query, limit)?
			.into_iter()
			.map(|entry| entry.text)
			.collect())
	}

	/// Like [`SearchEngine::suggest`], keeping each entry's source.
	pub fn suggest_entries(
		&self,
		items: &[CatalogItem],
		query: &str,
		limit: i64,
	) -> Result<Vec<SuggestionEntry>, SearchError> {
		let normalized = normalize_required(query)?;
		Ok(suggestion::suggest(items, &normalized, limit))
	}

	// -- History -------------------------------------------------------------

	pub fn popular_searches(
		&self,
		events: &[SearchHistoryEvent],
		limit: i64,
	) -> Vec<PopularSearchEntry> {
		popularity::popular_searches(events, limit)
	}

	pub fn recent_searches(
		&self,
		events: &[SearchHistoryEvent],
		user_id: &str,
		limit: i64,
	) -> Vec<RecentSearchEntry> {
		popularity::recent_searches(events, user_id, limit)
	}
}
