// ---------------------------------------------------------------------------
// Repositories: read-only catalog snapshots and the search-history log
// ---------------------------------------------------------------------------
//
// The search core never talks to a datastore. Whatever owns products and
// search events implements these traits; the in-memory versions below back
// the engine binary and the tests.
// ---------------------------------------------------------------------------

use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::SearchError;
use crate::normalizer::normalize_required;
use crate::types::{CatalogItem, SearchHistoryEvent};

pub trait CatalogRepository: Send + Sync {
	/// Current snapshot of active catalog items, with category and vendor
	/// names filled in where the store has them.
	fn list_active_items(&self) -> Result<Vec<CatalogItem>, SearchError>;
}

pub trait HistoryRepository: Send + Sync {
	/// Recorded events, optionally only those at or after `since`.
	fn list_search_events(
		&self,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<SearchHistoryEvent>, SearchError>;

	/// Append one event. The query is stored in normalized form.
	fn record_search_event(
		&self,
		user_id: Option<&str>,
		query: &str,
	) -> Result<SearchHistoryEvent, SearchError>;
}

fn poisoned(what: &str) -> SearchError {
	SearchError::Repository(format!("{what} lock poisoned"))
}

// ---------------------------------------------------------------------------
// MemoryCatalog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryCatalog {
	items: RwLock<Vec<CatalogItem>>,
}

impl MemoryCatalog {
	pub fn new(items: Vec<CatalogItem>) -> Self {
		Self {
			items: RwLock::new(items),
		}
	}

	/// Swap in a new snapshot. Returns the number of items loaded.
	pub fn replace(&self, items: Vec<CatalogItem>) -> Result<usize, SearchError> {
		let count = items.len();
		*self.items.write().map_err(|_| poisoned("catalog"))? = items;
		Ok(count)
	}

	/// Load a JSON array of catalog items from disk, replacing the snapshot.
	pub fn load_file(&self, path: impl AsRef<Path>) -> Result<usize, SearchError> {
		let raw = std::fs::read_to_string(path.as_ref())?;
		let items: Vec<CatalogItem> = serde_json::from_str(&raw)
			.map_err(|e| SearchError::Serialization(format!("Invalid catalog file: {}", e)))?;
		self.replace(items)
	}

	/// Total number of items held, inactive ones included.
	pub fn len(&self) -> Result<usize, SearchError> {
		Ok(self.items.read().map_err(|_| poisoned("catalog"))?.len())
	}

	pub fn is_empty(&self) -> Result<bool, SearchError> {
		Ok(self.len()? == 0)
	}
}

impl CatalogRepository for MemoryCatalog {
	fn list_active_items(&self) -> Result<Vec<CatalogItem>, SearchError> {
		let items = self.items.read().map_err(|_| poisoned("catalog"))?;
		Ok(items.iter().filter(|i| i.is_active).cloned().collect())
	}
}

// ---------------------------------------------------------------------------
// MemoryHistory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryHistory {
	events: RwLock<Vec<SearchHistoryEvent>>,
}

impl MemoryHistory {
	/// Append an event with an explicit timestamp.
	pub fn record_at(
		&self,
		user_id: Option<&str>,
		query: &str,
		timestamp: DateTime<Utc>,
	) -> Result<SearchHistoryEvent, SearchError> {
		let normalized = normalize_required(query)?;
		let event = SearchHistoryEvent {
			id: Uuid::new_v4(),
			user_id: user_id.map(str::to_string),
			query: normalized.text,
			timestamp,
		};
		self.events
			.write()
			.map_err(|_| poisoned("history"))?
			.push(event.clone());
		Ok(event)
	}

	pub fn len(&self) -> Result<usize, SearchError> {
		Ok(self.events.read().map_err(|_| poisoned("history"))?.len())
	}

	pub fn is_empty(&self) -> Result<bool, SearchError> {
		Ok(self.len()? == 0)
	}
}

impl HistoryRepository for MemoryHistory {
	fn list_search_events(
		&self,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<SearchHistoryEvent>, SearchError> {
		let events = self.events.read().map_err(|_| poisoned("history"))?;
		Ok(events
			.iter()
			.filter(|e| since.is_none_or(|since| e.timestamp >= since))
			.cloned()
			.collect())
	}

	fn record_search_event(
		&self,
		user_id: Option<&str>,
		query: &str,
	) -> Result<SearchHistoryEvent, SearchError> {
		self.record_at(user_id, query, Utc::now())
	}
}
