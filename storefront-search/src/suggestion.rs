// ---------------------------------------------------------------------------
// Suggestion Engine
// ---------------------------------------------------------------------------
//
// Autocomplete candidates from product names, category names and brand
// names. Candidates are compared in normalized form, deduplicated by exact
// display string (first source wins), grouped by source and ordered
// shortest-first inside each group.
// ---------------------------------------------------------------------------

use std::collections::HashSet;

use crate::normalizer::{normalize_text, NormalizedQuery};
use crate::types::{CatalogItem, SuggestionEntry, SuggestionSource};

/// Build up to `limit` suggestions for `query`. A non-positive limit yields
/// an empty list.
pub fn suggest(items: &[CatalogItem], query: &NormalizedQuery, limit: i64) -> Vec<SuggestionEntry> {
	if limit <= 0 || query.is_empty() {
		return Vec::new();
	}
	let limit = usize::try_from(limit).unwrap_or(usize::MAX);

	let mut candidates: Vec<SuggestionEntry> = Vec::new();
	for item in items.iter().filter(|i| i.is_active) {
		push_candidate(&mut candidates, &item.name, SuggestionSource::Product, query);
		if let Some(category) = item.category_name.as_deref() {
			push_candidate(&mut candidates, category, SuggestionSource::Category, query);
		}
		push_candidate(&mut candidates, &item.brand, SuggestionSource::Brand, query);
	}

	candidates.sort_by(|a, b| {
		a.source
			.cmp(&b.source)
			.then_with(|| a.text.chars().count().cmp(&b.text.chars().count()))
			.then_with(|| a.text.cmp(&b.text))
	});

	// After sorting, the first occurrence of a string carries its
	// highest-priority source.
	let mut seen: HashSet<String> = HashSet::new();
	candidates
		.into_iter()
		.filter(|entry| seen.insert(entry.text.clone()))
		.take(limit)
		.collect()
}

fn push_candidate(
	out: &mut Vec<SuggestionEntry>,
	display: &str,
	source: SuggestionSource,
	query: &NormalizedQuery,
) {
	let display = display.trim();
	if display.is_empty() {
		return;
	}
	if normalize_text(display).contains(query.text.as_str()) {
		out.push(SuggestionEntry {
			text: display.to_string(),
			source,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::normalizer::normalize;
	use crate::test_support::item;

	fn texts(entries: &[SuggestionEntry]) -> Vec<&str> {
		entries.iter().map(|e| e.text.as_str()).collect()
	}

	fn catalog() -> Vec<CatalogItem> {
		let mut mirror = item("1", "Professional Dental Mirror", 2599);
		mirror.brand = "DentalPro".into();
		mirror.category_name = Some("Dental Instruments".into());
		let mut scaler = item("2", "Dental Scaler Set", 4599);
		scaler.brand = "DentalPro".into();
		scaler.category_name = Some("Dental Instruments".into());
		let mut light = item("3", "LED Dental Light", 19999);
		light.brand = "DentalPro".into();
		light.category_name = Some("Lighting".into());
		vec![mirror, scaler, light]
	}

	#[test]
	fn groups_products_then_categories_then_brands() {
		let result = suggest(&catalog(), &normalize("dental"), 10);
		assert_eq!(
			texts(&result),
			vec![
				"LED Dental Light",
				"Dental Scaler Set",
				"Professional Dental Mirror",
				"Dental Instruments",
				"DentalPro",
			]
		);
		assert_eq!(result[0].source, SuggestionSource::Product);
		assert_eq!(result[3].source, SuggestionSource::Category);
		assert_eq!(result[4].source, SuggestionSource::Brand);
	}

	#[test]
	fn equal_length_ties_are_alphabetical() {
		let items = vec![item("1", "Mirror B", 100), item("2", "Mirror A", 100)];
		let result = suggest(&items, &normalize("mirror"), 10);
		assert_eq!(texts(&result), vec!["Mirror A", "Mirror B"]);
	}

	#[test]
	fn same_string_from_two_sources_is_emitted_once() {
		let mut a = item("1", "Acme", 100);
		a.brand = "Acme".into();
		let result = suggest(&[a], &normalize("acme"), 10);
		assert_eq!(result.len(), 1);
		assert_eq!(result[0].source, SuggestionSource::Product);
	}

	#[test]
	fn substring_match_is_supported() {
		let result = suggest(&catalog(), &normalize("ight"), 10);
		assert_eq!(texts(&result), vec!["LED Dental Light", "Lighting"]);
	}

	#[test]
	fn respects_limit() {
		let result = suggest(&catalog(), &normalize("dental"), 2);
		assert_eq!(result.len(), 2);
	}

	#[test]
	fn non_positive_limit_is_empty() {
		assert!(suggest(&catalog(), &normalize("dental"), 0).is_empty());
		assert!(suggest(&catalog(), &normalize("dental"), -3).is_empty());
	}

	#[test]
	fn no_match_is_empty() {
		assert!(suggest(&catalog(), &normalize("keyboard"), 5).is_empty());
	}

	#[test]
	fn inactive_items_do_not_suggest() {
		let mut hidden = item("1", "Hidden Mirror", 100);
		hidden.is_active = false;
		assert!(suggest(&[hidden], &normalize("mirror"), 5).is_empty());
	}

	#[test]
	fn never_returns_duplicates() {
		let mut items = catalog();
		items.extend(catalog());
		let result = suggest(&items, &normalize("d"), 50);
		let unique: HashSet<&str> = texts(&result).into_iter().collect();
		assert_eq!(unique.len(), result.len());
	}
}
