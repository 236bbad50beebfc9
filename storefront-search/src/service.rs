// ---------------------------------------------------------------------------
// SearchService: engine + repositories
// ---------------------------------------------------------------------------
//
// Pulls a fresh snapshot from the repositories on every call and hands it to
// the engine. Holds no state of its own beyond the collaborators.
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::repository::{CatalogRepository, HistoryRepository};
use crate::types::{
	PopularSearchEntry, RecentSearchEntry, SearchFilters, SearchResultPage, SuggestionEntry,
};

pub struct SearchService<C, H> {
	engine: SearchEngine,
	catalog: C,
	history: H,
}

impl<C, H> SearchService<C, H>
where
	C: CatalogRepository,
	H: HistoryRepository,
{
	pub fn new(engine: SearchEngine, catalog: C, history: H) -> Self {
		Self {
			engine,
			catalog,
			history,
		}
	}

	pub fn engine(&self) -> &SearchEngine {
		&self.engine
	}

	pub fn catalog(&self) -> &C {
		&self.catalog
	}

	pub fn history(&self) -> &H {
		&self.history
	}

	pub fn search(
		&self,
		query: &str,
		filters: &SearchFilters,
	) -> Result<SearchResultPage, SearchError> {
		let items = self.catalog.list_active_items()?;
		self.engine.search(&items, query, filters)
	}

	/// Search, then append the query to the history log. The page is
	/// returned even when recording fails.
	pub fn search_and_record(
		&self,
		user_id: Option<&str>,
		query: &str,
		filters: &SearchFilters,
	) -> Result<SearchResultPage, SearchError> {
		let page = self.search(query, filters)?;
		if let Err(e) = self.history.record_search_event(user_id, query) {
			tracing::warn!(code = e.code(), "failed to record search: {}", e);
		}
		Ok(page)
	}

	pub fn suggest(&self, query: &str, limit: i64) -> Result<Vec<SuggestionEntry>, SearchError> {
		let items = self.catalog.list_active_items()?;
		self.engine.suggest_entries(&items, query, limit)
	}

	/// Most frequent queries, optionally only counting events at or after
	/// `since`.
	pub fn popular_searches(
		&self,
		limit: i64,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<PopularSearchEntry>, SearchError> {
		let events = self.history.list_search_events(since)?;
		Ok(self.engine.popular_searches(&events, limit))
	}

	pub fn recent_searches(
		&self,
		user_id: &str,
		limit: i64,
	) -> Result<Vec<RecentSearchEntry>, SearchError> {
		let events = self.history.list_search_events(None)?;
		Ok(self.engine.recent_searches(&events, user_id, limit))
	}
}
