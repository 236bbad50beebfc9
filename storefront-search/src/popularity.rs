// ---------------------------------------------------------------------------
// Popularity Aggregator
// ---------------------------------------------------------------------------
//
// Frequency ranking over the search-history log. Read-only and idempotent:
// the same log always produces the same ranking. Queries are grouped by
// their normalized form; events that normalize to nothing are skipped.
// ---------------------------------------------------------------------------

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::normalizer::normalize_text;
use crate::types::{PopularSearchEntry, RecentSearchEntry, SearchHistoryEvent};

/// Top `limit` queries by occurrence count. Ties go to the query searched
/// most recently, then alphabetical order.
pub fn popular_searches(events: &[SearchHistoryEvent], limit: i64) -> Vec<PopularSearchEntry> {
	if limit <= 0 || events.is_empty() {
		return Vec::new();
	}
	let limit = usize::try_from(limit).unwrap_or(usize::MAX);

	let mut groups: HashMap<String, (usize, DateTime<Utc>)> = HashMap::new();
	for event in events {
		let query = normalize_text(&event.query);
		if query.is_empty() {
			continue;
		}
		groups
			.entry(query)
			.and_modify(|(count, latest)| {
				*count += 1;
				if event.timestamp > *latest {
					*latest = event.timestamp;
				}
			})
			.or_insert((1, event.timestamp));
	}

	let mut ranked: Vec<PopularSearchEntry> = groups
		.into_iter()
		.map(|(query, (count, last_searched_at))| PopularSearchEntry {
			query,
			count,
			last_searched_at,
		})
		.collect();

	ranked.sort_by(|a, b| {
		b.count
			.cmp(&a.count)
			.then_with(|| b.last_searched_at.cmp(&a.last_searched_at))
			.then_with(|| a.query.cmp(&b.query))
	});
	ranked.truncate(limit);
	ranked
}

/// One user's distinct queries, most recently searched first.
pub fn recent_searches(
	events: &[SearchHistoryEvent],
	user_id: &str,
	limit: i64,
) -> Vec<RecentSearchEntry> {
	if limit <= 0 {
		return Vec::new();
	}
	let limit = usize::try_from(limit).unwrap_or(usize::MAX);

	let mut latest: HashMap<String, DateTime<Utc>> = HashMap::new();
	for event in events
		.iter()
		.filter(|e| e.user_id.as_deref() == Some(user_id))
	{
		let query = normalize_text(&event.query);
		if query.is_empty() {
			continue;
		}
		let slot = latest.entry(query).or_insert(event.timestamp);
		if event.timestamp > *slot {
			*slot = event.timestamp;
		}
	}

	let mut recent: Vec<RecentSearchEntry> = latest
		.into_iter()
		.map(|(query, searched_at)| RecentSearchEntry { query, searched_at })
		.collect();
	recent.sort_by(|a, b| {
		b.searched_at
			.cmp(&a.searched_at)
			.then_with(|| a.query.cmp(&b.query))
	});
	recent.truncate(limit);
	recent
}
