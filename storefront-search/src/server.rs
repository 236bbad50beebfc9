// ---------------------------------------------------------------------------
// SearchServer: JSON-RPC dispatcher
// ---------------------------------------------------------------------------
//
// Routes incoming JSON-RPC 2.0 requests (NDJSON over stdin) to a
// `SearchService` backed by the in-memory catalog and history. A main
// `run()` loop reads lines, `dispatch()` matches the method name, and each
// method has a free-standing handler.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::protocol::*;
use crate::repository::{MemoryCatalog, MemoryHistory};
use crate::service::SearchService;
use crate::transport::NdjsonTransport;
use crate::types::{CatalogItem, SearchFilters};

type MemoryService = SearchService<MemoryCatalog, MemoryHistory>;

const DEFAULT_SUGGESTION_LIMIT: i64 = 10;
const DEFAULT_POPULAR_LIMIT: i64 = 10;
const DEFAULT_RECENT_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub struct SearchServer {
	transport: NdjsonTransport,
	service: MemoryService,
}

impl SearchServer {
	/// Create a server over `catalog` with an empty search history.
	pub fn new(
		transport: NdjsonTransport,
		engine: SearchEngine,
		catalog: MemoryCatalog,
	) -> Self {
		Self {
			transport,
			service: SearchService::new(engine, catalog, MemoryHistory::default()),
		}
	}

	/// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
	pub fn run(&mut self) -> Result<(), SearchError> {
		let stdin = io::stdin();
		let reader = stdin.lock();

		for line_result in reader.lines() {
			let line = line_result?;
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(&line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			self.dispatch(request);
		}

		Ok(())
	}

	// ── Dispatch ──────────────────────────────────────────────────────────

	fn dispatch(&mut self, req: JsonRpcRequest) {
		let id = req.id;
		let svc = &self.service;
		let result = match req.method.as_str() {
			// -- Catalog -------------------------------------------------
			"catalog/load" => handle_catalog_load(svc, req.params),
			"catalog/loadFile" => handle_catalog_load_file(svc, req.params),
			"catalog/size" => handle_catalog_size(svc),

			// -- Search --------------------------------------------------
			"search/query" => handle_query(svc, req.params),
			"search/suggest" => handle_suggest(svc, req.params),
			"search/popular" => handle_popular(svc, req.params),

			// -- History -------------------------------------------------
			"history/record" => handle_history_record(svc, req.params),
			"history/recent" => handle_history_recent(svc, req.params),
			"history/size" => svc
				.history()
				.len()
				.map(|count| serde_json::json!({ "count": count })),

			// -- Unknown -------------------------------------------------
			_ => {
				self.transport.write_error(
					id,
					METHOD_NOT_FOUND,
					format!("Unknown method: {}", req.method),
					None,
				);
				return;
			}
		};

		match result {
			Ok(value) => self.transport.write_response(id, value),
			Err(e) => {
				tracing::warn!(method = %req.method, code = e.code(), "request rejected: {}", e);
				self.transport.write_search_error(id, &e);
			}
		}
	}
}

// ---------------------------------------------------------------------------
// Param types
// ---------------------------------------------------------------------------

fn parse_params<T: serde::de::DeserializeOwned>(
	params: serde_json::Value,
) -> Result<T, SearchError> {
	serde_json::from_value(params)
		.map_err(|e| SearchError::Serialization(format!("Invalid params: {}", e)))
}

fn to_value(value: impl serde::Serialize) -> Result<serde_json::Value, SearchError> {
	serde_json::to_value(value).map_err(|e| SearchError::Serialization(e.to_string()))
}

#[derive(Deserialize)]
struct LoadParams {
	items: Vec<CatalogItem>,
}

#[derive(Deserialize)]
struct LoadFileParams {
	path: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryParams {
	query: String,
	#[serde(default)]
	filters: SearchFilters,
	user_id: Option<String>,
	#[serde(default = "default_record")]
	record: bool,
}

fn default_record() -> bool {
	true
}

#[derive(Deserialize)]
struct SuggestParams {
	query: String,
	limit: Option<i64>,
}

#[derive(Deserialize)]
struct PopularParams {
	limit: Option<i64>,
	since: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordParams {
	user_id: Option<String>,
	query: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentParams {
	user_id: String,
	limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_catalog_load(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	let p: LoadParams = parse_params(params)?;
	let count = svc.catalog().replace(p.items)?;
	tracing::info!(count, "catalog loaded");
	Ok(serde_json::json!({ "count": count }))
}

fn handle_catalog_load_file(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	let p: LoadFileParams = parse_params(params)?;
	let count = svc.catalog().load_file(&p.path)?;
	tracing::info!(count, path = %p.path, "catalog loaded from file");
	Ok(serde_json::json!({ "count": count }))
}

fn handle_catalog_size(svc: &MemoryService) -> Result<serde_json::Value, SearchError> {
	use crate::repository::CatalogRepository;

	let count = svc.catalog().len()?;
	let active = svc.catalog().list_active_items()?.len();
	Ok(serde_json::json!({ "count": count, "active": active }))
}

fn handle_query(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	let p: QueryParams = parse_params(params)?;
	let page = if p.record {
		svc.search_and_record(p.user_id.as_deref(), &p.query, &p.filters)?
	} else {
		svc.search(&p.query, &p.filters)?
	};
	to_value(page)
}

fn handle_suggest(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	let p: SuggestParams = parse_params(params)?;
	let entries = svc.suggest(&p.query, p.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT))?;
	let suggestions: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
	Ok(serde_json::json!({
		"suggestions": suggestions,
		"entries": entries,
	}))
}

fn handle_popular(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	let p: PopularParams = if params.is_null() {
		PopularParams {
			limit: None,
			since: None,
		}
	} else {
		parse_params(params)?
	};
	let popular = svc.popular_searches(p.limit.unwrap_or(DEFAULT_POPULAR_LIMIT), p.since)?;
	Ok(serde_json::json!({ "searches": popular }))
}

fn handle_history_record(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	use crate::repository::HistoryRepository;

	let p: RecordParams = parse_params(params)?;
	let event = svc
		.history()
		.record_search_event(p.user_id.as_deref(), &p.query)?;
	Ok(serde_json::json!({ "event": event }))
}

fn handle_history_recent(
	svc: &MemoryService,
	params: serde_json::Value,
) -> Result<serde_json::Value, SearchError> {
	let p: RecentParams = parse_params(params)?;
	let recent = svc.recent_searches(&p.user_id, p.limit.unwrap_or(DEFAULT_RECENT_LIMIT))?;
	Ok(serde_json::json!({ "searches": recent }))
}
