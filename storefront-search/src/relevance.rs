// ---------------------------------------------------------------------------
// Relevance Matcher
// ---------------------------------------------------------------------------
//
// Pure functions: decide whether a catalog item matches a normalized query
// and, if so, how well. Matching is plain case-insensitive substring
// containment per token; no stemming, no edit distance.
// ---------------------------------------------------------------------------

use std::cmp::Ordering;

use crate::config::RelevanceWeights;
use crate::normalizer::{normalize_text, NormalizedQuery};
use crate::types::CatalogItem;

/// A matched item and its relevance score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredItem<'a> {
	pub item: &'a CatalogItem,
	pub score: f64,
}

// ---------------------------------------------------------------------------
// Field hits
// ---------------------------------------------------------------------------

/// Number of query tokens contained in `text`.
fn text_hits(text: &str, tokens: &[String]) -> usize {
	if text.is_empty() {
		return 0;
	}
	let lower = text.to_lowercase();
	tokens
		.iter()
		.filter(|t| lower.contains(t.as_str()))
		.count()
}

/// Number of query tokens contained in at least one of `values`.
fn list_hits(values: &[String], tokens: &[String]) -> usize {
	if values.is_empty() {
		return 0;
	}
	let lowered: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
	tokens
		.iter()
		.filter(|t| lowered.iter().any(|v| v.contains(t.as_str())))
		.count()
}

/// Token hits for every searchable field of one item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct FieldHits {
	name: usize,
	brand: usize,
	tags: usize,
	keywords: usize,
	category: usize,
	vendor: usize,
	description: usize,
}

impl FieldHits {
	fn collect(item: &CatalogItem, tokens: &[String]) -> Self {
		Self {
			name: text_hits(&item.name, tokens),
			brand: text_hits(&item.brand, tokens),
			tags: list_hits(&item.tags, tokens),
			keywords: list_hits(&item.search_keywords, tokens),
			category: text_hits(item.category_name.as_deref().unwrap_or(""), tokens),
			vendor: text_hits(item.vendor_name.as_deref().unwrap_or(""), tokens),
			description: text_hits(&item.description, tokens),
		}
	}

	fn any(&self) -> bool {
		self.name
			+ self.brand
			+ self.tags
			+ self.keywords
			+ self.category
			+ self.vendor
			+ self.description
			> 0
	}

	fn weighted(&self, weights: &RelevanceWeights, token_count: usize) -> f64 {
		let n = token_count as f64;
		(weights.name * self.name as f64
			+ weights.brand * self.brand as f64
			+ weights.tags * self.tags as f64
			+ weights.keywords * self.keywords as f64
			+ weights.category * self.category as f64
			+ weights.vendor * self.vendor as f64
			+ weights.description * self.description as f64)
			/ n
	}
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score `item` against `query`. Returns `None` when no token occurs in any
/// searchable field, so non-matches drop out of the candidate set.
pub fn score_item(
	item: &CatalogItem,
	query: &NormalizedQuery,
	weights: &RelevanceWeights,
) -> Option<f64> {
	if query.is_empty() {
		return None;
	}

	let hits = FieldHits::collect(item, &query.tokens);
	if !hits.any() {
		return None;
	}

	let mut score = hits.weighted(weights, query.tokens.len());
	if normalize_text(&item.name) == query.text {
		score += weights.exact_name_bonus;
	}
	Some(score)
}

/// Match predicate: true when at least one token occurs in a searchable field.
pub fn matches(item: &CatalogItem, query: &NormalizedQuery) -> bool {
	!query.is_empty() && FieldHits::collect(item, &query.tokens).any()
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Deterministic tie-break for equal primary keys: best sellers first, then
/// higher rated, then newer, then by id.
pub fn compare_ties(a: &CatalogItem, b: &CatalogItem) -> Ordering {
	b.total_sold
		.cmp(&a.total_sold)
		.then_with(|| b.average_rating.total_cmp(&a.average_rating))
		.then_with(|| b.created_at.cmp(&a.created_at))
		.then_with(|| a.id.cmp(&b.id))
}

/// Relevance order: score descending, then [`compare_ties`].
pub fn compare_relevance(a: &ScoredItem<'_>, b: &ScoredItem<'_>) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then_with(|| compare_ties(a.item, b.item))
}
