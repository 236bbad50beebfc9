// ---------------------------------------------------------------------------
// Filter Pipeline
// ---------------------------------------------------------------------------
//
// Structured constraints from `SearchFilters`, compiled into an ordered list
// of pure predicates. Only supplied constraints become predicates, except the
// active-flag check which is always first and not configurable.
// ---------------------------------------------------------------------------

use rust_decimal::Decimal;

use crate::error::SearchError;
use crate::types::{CatalogItem, SearchFilters};

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
	Active,
	PriceRange {
		min: Option<Decimal>,
		max: Option<Decimal>,
	},
	Category(String),
	Vendor(String),
	MinRating(f64),
	InStock,
}

impl Predicate {
	fn accepts(&self, item: &CatalogItem) -> bool {
		match self {
			Self::Active => item.is_active,
			Self::PriceRange { min, max } => {
				min.is_none_or(|min| item.price >= min) && max.is_none_or(|max| item.price <= max)
			}
			// Unknown ids simply match nothing.
			Self::Category(id) => item.category_id == *id,
			Self::Vendor(id) => item.vendor_id == *id,
			Self::MinRating(min) => item.average_rating >= *min,
			Self::InStock => item.stock > 0,
		}
	}
}

/// The logical AND of all supplied constraints, evaluated in a fixed order:
/// active, price, category, vendor, rating, stock.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPipeline {
	predicates: Vec<Predicate>,
}

impl FilterPipeline {
	/// Validate `filters` and compile the predicates they imply.
	pub fn from_filters(filters: &SearchFilters) -> Result<Self, SearchError> {
		validate(filters)?;

		let mut predicates = vec![Predicate::Active];

		if filters.min_price.is_some() || filters.max_price.is_some() {
			predicates.push(Predicate::PriceRange {
				min: filters.min_price,
				max: filters.max_price,
			});
		}
		if let Some(id) = non_blank(filters.category_id.as_deref()) {
			predicates.push(Predicate::Category(id.to_string()));
		}
		if let Some(id) = non_blank(filters.vendor_id.as_deref()) {
			predicates.push(Predicate::Vendor(id.to_string()));
		}
		if let Some(min) = filters.min_rating {
			predicates.push(Predicate::MinRating(min));
		}
		if filters.in_stock_only {
			predicates.push(Predicate::InStock);
		}

		Ok(Self { predicates })
	}

	pub fn accepts(&self, item: &CatalogItem) -> bool {
		self.predicates.iter().all(|p| p.accepts(item))
	}
}

/// Blank ids from form-encoded callers mean "no constraint".
fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

fn validate(filters: &SearchFilters) -> Result<(), SearchError> {
	if let Some(min) = filters.min_price {
		if min.is_sign_negative() && !min.is_zero() {
			return Err(SearchError::InvalidFilter(format!(
				"minPrice must not be negative (got {min})"
			)));
		}
	}
	if let Some(max) = filters.max_price {
		if max.is_sign_negative() && !max.is_zero() {
			return Err(SearchError::InvalidFilter(format!(
				"maxPrice must not be negative (got {max})"
			)));
		}
	}
	if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
		if min > max {
			return Err(SearchError::InvalidFilter(format!(
				"minPrice {min} exceeds maxPrice {max}"
			)));
		}
	}
	if let Some(rating) = filters.min_rating {
		if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
			return Err(SearchError::InvalidFilter(format!(
				"minRating must be between 0 and {MAX_RATING} (got {rating})"
			)));
		}
	}
	Ok(())
}
