// ---------------------------------------------------------------------------
// Integration tests for storefront-search-engine JSON-RPC 2.0 / NDJSON
// ---------------------------------------------------------------------------
//
// Each test spawns a fresh storefront-search-engine binary and communicates
// via stdin/stdout using newline-delimited JSON-RPC 2.0 messages.
// ---------------------------------------------------------------------------

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

struct SearchProcess {
	child: Child,
	reader: BufReader<std::process::ChildStdout>,
	next_id: AtomicU64,
}

impl SearchProcess {
	fn spawn() -> Self {
		Self::spawn_with_args(&[])
	}

	fn spawn_with_args(args: &[&str]) -> Self {
		let bin = env!("CARGO_BIN_EXE_storefront-search-engine");
		let mut child = Command::new(bin)
			.args(args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::null())
			.spawn()
			.expect("failed to spawn storefront-search-engine");

		let stdout = child.stdout.take().expect("no stdout");
		let reader = BufReader::new(stdout);

		Self {
			child,
			reader,
			next_id: AtomicU64::new(1),
		}
	}

	fn send(&mut self, method: &str, params: Value) -> RpcResponse {
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		let request = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});

		let stdin = self.child.stdin.as_mut().expect("no stdin");
		let mut line = serde_json::to_string(&request).unwrap();
		line.push('\n');
		stdin.write_all(line.as_bytes()).unwrap();
		stdin.flush().unwrap();

		loop {
			let mut buf = String::new();
			let bytes_read = self
				.reader
				.read_line(&mut buf)
				.expect("failed to read from stdout");
			if bytes_read == 0 {
				panic!("unexpected EOF while waiting for response to id={}", id);
			}
			let buf = buf.trim();
			if buf.is_empty() {
				continue;
			}
			let parsed: Value = serde_json::from_str(buf)
				.unwrap_or_else(|e| panic!("invalid JSON from engine: {e}\nline: {buf}"));
			let resp_id = parsed["id"].as_u64().expect("response id is not u64");
			assert_eq!(resp_id, id, "response id mismatch");
			if let Some(error) = parsed.get("error") {
				return RpcResponse::Error(error.clone());
			}
			return RpcResponse::Ok(parsed.get("result").cloned().unwrap_or(Value::Null));
		}
	}

	fn call(&mut self, method: &str, params: Value) -> Value {
		match self.send(method, params) {
			RpcResponse::Ok(v) => v,
			RpcResponse::Error(e) => panic!("expected success, got error: {e}"),
		}
	}

	fn call_err(&mut self, method: &str, params: Value) -> Value {
		match self.send(method, params) {
			RpcResponse::Error(e) => e,
			RpcResponse::Ok(v) => panic!("expected error, got success: {v}"),
		}
	}

	/// Load the three-item DentalPro catalog.
	fn load_dental(&mut self) -> Value {
		self.call("catalog/load", json!({ "items": dental_items() }))
	}
}

impl Drop for SearchProcess {
	fn drop(&mut self) {
		drop(self.child.stdin.take());
		let _ = self.child.wait();
	}
}

#[derive(Debug)]
enum RpcResponse {
	Ok(Value),
	Error(Value),
}

fn product(id: &str, name: &str, price: &str, category: &str) -> Value {
	json!({
		"id": id,
		"name": name,
		"brand": "DentalPro",
		"price": price,
		"stock": 5,
		"categoryId": category,
		"vendorId": "vendor-1",
		"createdAt": "2026-01-01T00:00:00Z",
	})
}

fn dental_items() -> Value {
	json!([
		product("1", "Professional Dental Mirror", "25.99", "instruments"),
		product("2", "Dental Scaler Set", "45.99", "instruments"),
		product("3", "LED Dental Light", "199.99", "lighting"),
	])
}

fn item_names(page: &Value) -> Vec<String> {
	page["items"]
		.as_array()
		.expect("items should be array")
		.iter()
		.map(|i| i["name"].as_str().unwrap().to_string())
		.collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn load_and_size() {
	let mut proc = SearchProcess::spawn();
	let result = proc.load_dental();
	assert_eq!(result["count"], 3);

	let size = proc.call("catalog/size", json!({}));
	assert_eq!(size["count"], 3);
	assert_eq!(size["active"], 3);
}

#[test]
fn price_window_search() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let page = proc.call(
		"search/query",
		json!({
			"query": "dental",
			"filters": { "minPrice": 30, "maxPrice": 50 }
		}),
	);
	assert_eq!(page["total"], 1);
	assert_eq!(item_names(&page), vec!["Dental Scaler Set"]);
}

#[test]
fn price_sort_descending() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let page = proc.call(
		"search/query",
		json!({
			"query": "dental",
			"filters": { "sortBy": "price", "sortOrder": "desc" }
		}),
	);
	assert_eq!(
		item_names(&page),
		vec!["LED Dental Light", "Dental Scaler Set", "Professional Dental Mirror"]
	);
	assert_eq!(page["totalPages"], 1);
	assert_eq!(page["hasNextPage"], false);
	assert_eq!(page["hasPreviousPage"], false);
}

#[test]
fn facets_are_returned() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let page = proc.call("search/query", json!({ "query": "dental" }));
	let categories = page["facets"]["categories"].as_array().unwrap();
	assert_eq!(categories[0]["value"], "instruments");
	assert_eq!(categories[0]["count"], 2);
	assert_eq!(page["facets"]["brands"][0]["count"], 3);
}

#[test]
fn unknown_product_is_empty() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let page = proc.call("search/query", json!({ "query": "nonexistent product" }));
	assert_eq!(page["total"], 0);
	assert!(page["items"].as_array().unwrap().is_empty());
}

#[test]
fn blank_query_is_rejected() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let err = proc.call_err("search/query", json!({ "query": "   " }));
	assert_eq!(err["code"], -32000);
	assert_eq!(err["data"]["searchCode"], "SEARCH_INVALID_QUERY");
}

#[test]
fn invalid_pagination_and_filters_are_rejected() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let err = proc.call_err(
		"search/query",
		json!({ "query": "dental", "filters": { "page": 0 } }),
	);
	assert_eq!(err["data"]["searchCode"], "SEARCH_INVALID_PAGINATION");

	let err = proc.call_err(
		"search/query",
		json!({ "query": "dental", "filters": { "minPrice": 50, "maxPrice": 30 } }),
	);
	assert_eq!(err["data"]["searchCode"], "SEARCH_INVALID_FILTER");
}

#[test]
fn suggestions() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	let result = proc.call("search/suggest", json!({ "query": "dent", "limit": 2 }));
	let suggestions = result["suggestions"].as_array().unwrap();
	assert_eq!(suggestions.len(), 2);
	assert_eq!(suggestions[0], "LED Dental Light");
	assert_eq!(result["entries"][0]["source"], "product");
}

#[test]
fn searches_feed_popularity_and_recent_history() {
	let mut proc = SearchProcess::spawn();
	proc.load_dental();

	proc.call("search/query", json!({ "query": "Dental Mirror", "userId": "u1" }));
	proc.call("search/query", json!({ "query": "dental mirror!", "userId": "u2" }));
	proc.call("search/query", json!({ "query": "scaler", "userId": "u1" }));
	proc.call(
		"search/query",
		json!({ "query": "light", "userId": "u1", "record": false }),
	);

	let size = proc.call("history/size", json!({}));
	assert_eq!(size["count"], 3);

	let popular = proc.call("search/popular", json!({ "limit": 5 }));
	let searches = popular["searches"].as_array().unwrap();
	assert_eq!(searches[0]["query"], "dental mirror");
	assert_eq!(searches[0]["count"], 2);
	assert_eq!(searches[1]["query"], "scaler");

	let recent = proc.call("history/recent", json!({ "userId": "u1" }));
	let queries: Vec<&str> = recent["searches"]
		.as_array()
		.unwrap()
		.iter()
		.map(|s| s["query"].as_str().unwrap())
		.collect();
	assert_eq!(queries.len(), 2);
	assert!(queries.contains(&"dental mirror"));
	assert!(queries.contains(&"scaler"));
}

#[test]
fn history_record_directly() {
	let mut proc = SearchProcess::spawn();

	let result = proc.call("history/record", json!({ "query": "  LED  Light " }));
	assert_eq!(result["event"]["query"], "led light");
	assert!(!result["event"]["id"].as_str().unwrap().is_empty());

	let err = proc.call_err("history/record", json!({ "query": "?!" }));
	assert_eq!(err["data"]["searchCode"], "SEARCH_INVALID_QUERY");

	let popular = proc.call("search/popular", Value::Null);
	assert_eq!(popular["searches"][0]["query"], "led light");
}

#[test]
fn load_catalog_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(dental_items().to_string().as_bytes()).unwrap();
	let path = file.path().to_str().unwrap().to_string();

	let mut proc = SearchProcess::spawn();
	let result = proc.call("catalog/loadFile", json!({ "path": path }));
	assert_eq!(result["count"], 3);

	let page = proc.call("search/query", json!({ "query": "scaler" }));
	assert_eq!(item_names(&page), vec!["Dental Scaler Set"]);
}

#[test]
fn catalog_flag_loads_at_startup() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(dental_items().to_string().as_bytes()).unwrap();
	let path = file.path().to_str().unwrap().to_string();

	let mut proc = SearchProcess::spawn_with_args(&["--catalog", path.as_str(), "--max-page-size", "2"]);
	let size = proc.call("catalog/size", json!({}));
	assert_eq!(size["count"], 3);

	let page = proc.call(
		"search/query",
		json!({ "query": "dental", "filters": { "pageSize": 100 } }),
	);
	assert_eq!(page["pageSize"], 2);
	assert_eq!(page["totalPages"], 2);
	assert_eq!(page["hasNextPage"], true);
}

#[test]
fn missing_file_is_an_io_error() {
	let mut proc = SearchProcess::spawn();
	let err = proc.call_err(
		"catalog/loadFile",
		json!({ "path": "/nonexistent/catalog.json" }),
	);
	assert_eq!(err["data"]["searchCode"], "SEARCH_IO");
}

#[test]
fn unknown_method() {
	let mut proc = SearchProcess::spawn();
	let err = proc.call_err("search/explode", json!({}));
	assert_eq!(err["code"], -32601);
}
