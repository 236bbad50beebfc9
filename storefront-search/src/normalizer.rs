// ---------------------------------------------------------------------------
// Query Normalizer
// ---------------------------------------------------------------------------
//
// Lower-cases, strips punctuation, collapses whitespace. The same routine is
// used for matching, suggestion lookup, and popularity grouping so the three
// agree on what "the same query" means.
// ---------------------------------------------------------------------------

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SearchError;

static PUNCTUATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("valid regex"));

/// A cleaned query and its tokens, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
	pub text: String,
	pub tokens: Vec<String>,
}

impl NormalizedQuery {
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

/// Normalize free text. Punctuation becomes a word boundary, so
/// `"t-shirt"` yields the tokens `["t", "shirt"]`.
pub fn normalize(raw: &str) -> NormalizedQuery {
	let lower = raw.to_lowercase();
	let spaced = PUNCTUATION.replace_all(&lower, " ");
	let tokens: Vec<String> = spaced.split_whitespace().map(str::to_string).collect();
	NormalizedQuery {
		text: tokens.join(" "),
		tokens,
	}
}

/// Like [`normalize`], but rejects input that is empty once cleaned.
pub fn normalize_required(raw: &str) -> Result<NormalizedQuery, SearchError> {
	let query = normalize(raw);
	if query.is_empty() {
		return Err(SearchError::InvalidQuery);
	}
	Ok(query)
}

/// Normalized display text, for comparing catalog strings against a query.
pub fn normalize_text(raw: &str) -> String {
	normalize(raw).text
}
