use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A product as supplied by the catalog store. Read-only input to every
/// search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub brand: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub search_keywords: Vec<String>,
	pub price: Decimal,
	#[serde(default)]
	pub stock: u32,
	#[serde(default)]
	pub average_rating: f64,
	#[serde(default)]
	pub review_count: u32,
	#[serde(default)]
	pub total_sold: u64,
	pub category_id: String,
	/// Denormalized by the catalog store for matching and suggestions.
	#[serde(default)]
	pub category_name: Option<String>,
	pub vendor_id: String,
	#[serde(default)]
	pub vendor_name: Option<String>,
	#[serde(default = "default_active")]
	pub is_active: bool,
	pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
	true
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Result ordering. Unrecognised keys, `null` and numbers fall back to
/// `Relevance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum SortKey {
	#[default]
	Relevance,
	Price,
	Rating,
	Newest,
}

impl SortKey {
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_lowercase().as_str() {
			"price" => Self::Price,
			"rating" | "averagerating" | "average_rating" => Self::Rating,
			"newest" | "createdat" | "created_at" | "date" => Self::Newest,
			_ => Self::Relevance,
		}
	}

	/// Direction used when the request does not name one.
	pub fn default_direction(self) -> SortDirection {
		match self {
			Self::Price => SortDirection::Asc,
			Self::Relevance | Self::Rating | Self::Newest => SortDirection::Desc,
		}
	}
}

impl From<serde_json::Value> for SortKey {
	fn from(raw: serde_json::Value) -> Self {
		sort_token(raw).map(|t| Self::parse(&t)).unwrap_or_default()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	Desc,
}

impl SortDirection {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_lowercase().as_str() {
			"asc" | "ascending" | "1" => Some(Self::Asc),
			"desc" | "descending" | "-1" => Some(Self::Desc),
			_ => None,
		}
	}
}

/// Sort fields arrive as strings or numbers (`1` / `-1`); anything else
/// carries no preference.
fn sort_token(raw: serde_json::Value) -> Option<String> {
	match raw {
		serde_json::Value::String(s) => Some(s),
		serde_json::Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn lenient_direction<'de, D>(deserializer: D) -> Result<Option<SortDirection>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = serde_json::Value::deserialize(deserializer)?;
	Ok(sort_token(raw).as_deref().and_then(SortDirection::parse))
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Structured constraints for one search request. Every field is optional;
/// absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
	pub min_price: Option<Decimal>,
	pub max_price: Option<Decimal>,
	pub category_id: Option<String>,
	pub vendor_id: Option<String>,
	pub min_rating: Option<f64>,
	pub in_stock_only: bool,
	pub sort_by: SortKey,
	#[serde(deserialize_with = "lenient_direction")]
	pub sort_order: Option<SortDirection>,
	/// 1-based. Defaults to 1.
	pub page: Option<i64>,
	/// Defaults to the configured page size; clamped to the configured maximum.
	pub page_size: Option<i64>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
	pub items: Vec<CatalogItem>,
	pub total: usize,
	pub total_pages: usize,
	pub current_page: usize,
	pub page_size: usize,
	pub has_next_page: bool,
	pub has_previous_page: bool,
	pub facets: SearchFacets,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFacets {
	pub categories: Vec<FacetCount>,
	pub vendors: Vec<FacetCount>,
	pub brands: Vec<FacetCount>,
	pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCount {
	pub value: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
	pub min: Decimal,
	pub max: Decimal,
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Where a suggestion came from. Declaration order is output priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
	Product,
	Category,
	Brand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEntry {
	pub text: String,
	pub source: SuggestionSource,
}

// ---------------------------------------------------------------------------
// Search history
// ---------------------------------------------------------------------------

/// One recorded search. Appended by the caller, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEvent {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	#[serde(default)]
	pub user_id: Option<String>,
	pub query: String,
	pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularSearchEntry {
	pub query: String,
	pub count: usize,
	pub last_searched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearchEntry {
	pub query: String,
	pub searched_at: DateTime<Utc>,
}
