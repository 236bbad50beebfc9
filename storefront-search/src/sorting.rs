// ---------------------------------------------------------------------------
// Sort & Paginate
// ---------------------------------------------------------------------------
//
// Orders the matched/filtered set and slices one page out of it. Every sort
// key falls back to the relevance order on ties, so the overall order is
// total and repeated queries paginate stably.
// ---------------------------------------------------------------------------

use std::cmp::Ordering;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::relevance::{compare_relevance, ScoredItem};
use crate::types::{SearchFilters, SortDirection, SortKey};

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
	match direction {
		SortDirection::Asc => ordering,
		SortDirection::Desc => ordering.reverse(),
	}
}

/// Sort `items` in place. `direction` is ignored for relevance, which is
/// always best-first.
pub fn sort_items(items: &mut [ScoredItem<'_>], key: SortKey, direction: Option<SortDirection>) {
	let direction = direction.unwrap_or_else(|| key.default_direction());

	match key {
		SortKey::Relevance => items.sort_by(compare_relevance),
		SortKey::Price => items.sort_by(|a, b| {
			directed(a.item.price.cmp(&b.item.price), direction)
				.then_with(|| compare_relevance(a, b))
		}),
		SortKey::Rating => items.sort_by(|a, b| {
			directed(
				a.item
					.average_rating
					.total_cmp(&b.item.average_rating)
					.then_with(|| a.item.review_count.cmp(&b.item.review_count)),
				direction,
			)
			.then_with(|| compare_relevance(a, b))
		}),
		SortKey::Newest => items.sort_by(|a, b| {
			directed(a.item.created_at.cmp(&b.item.created_at), direction)
				.then_with(|| compare_relevance(a, b))
		}),
	}
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A validated, clamped page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub page: usize,
	pub page_size: usize,
}

impl PageRequest {
	/// Resolve the page fields of `filters` against `config`. Zero or negative
	/// values are rejected; oversized pages are clamped to `max_page_size`.
	pub fn from_filters(filters: &SearchFilters, config: &SearchConfig) -> Result<Self, SearchError> {
		let page = filters.page.unwrap_or(1);
		if page < 1 {
			return Err(SearchError::InvalidPagination(format!(
				"page must be at least 1 (got {page})"
			)));
		}

		let requested = match filters.page_size {
			Some(size) if size < 1 => {
				return Err(SearchError::InvalidPagination(format!(
					"pageSize must be at least 1 (got {size})"
				)));
			}
			Some(size) => usize::try_from(size).unwrap_or(usize::MAX),
			None => config.default_page_size,
		};
		let max = config.max_page_size.max(1);

		Ok(Self {
			page: usize::try_from(page).unwrap_or(usize::MAX),
			page_size: requested.clamp(1, max),
		})
	}
}

/// Page metadata for a result set of `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
	pub total: usize,
	pub total_pages: usize,
	pub current_page: usize,
	pub page_size: usize,
	pub has_next_page: bool,
	pub has_previous_page: bool,
}

/// Slice one page out of an already sorted sequence. A page past the end
/// yields an empty slice; the metadata still reports the real totals.
pub fn paginate<T>(sorted: &[T], request: PageRequest) -> (&[T], PageInfo) {
	let total = sorted.len();
	let total_pages = total.div_ceil(request.page_size);

	let start = (request.page - 1).saturating_mul(request.page_size);
	let slice = if start >= total {
		&sorted[0..0]
	} else {
		let end = start.saturating_add(request.page_size).min(total);
		&sorted[start..end]
	};

	let info = PageInfo {
		total,
		total_pages,
		current_page: request.page,
		page_size: request.page_size,
		has_next_page: request.page < total_pages,
		has_previous_page: request.page > 1,
	};
	(slice, info)
}
