// ---------------------------------------------------------------------------
// Facets: category / vendor / brand counts and price range of a result set
// ---------------------------------------------------------------------------

use std::collections::HashMap;

use crate::types::{CatalogItem, FacetCount, PriceRange, SearchFacets};

/// Compute facets over every item of a filtered result set, not only the
/// visible page.
pub fn compute_facets<'a, I>(items: I) -> SearchFacets
where
	I: IntoIterator<Item = &'a CatalogItem>,
{
	let mut categories = FacetCounter::default();
	let mut vendors = FacetCounter::default();
	let mut brands = FacetCounter::default();
	let mut price_range: Option<PriceRange> = None;

	for item in items {
		categories.add(&item.category_id, item.category_name.as_deref());
		vendors.add(&item.vendor_id, item.vendor_name.as_deref());
		if !item.brand.trim().is_empty() {
			brands.add(item.brand.trim(), None);
		}
		price_range = Some(match price_range {
			Some(range) => PriceRange {
				min: range.min.min(item.price),
				max: range.max.max(item.price),
			},
			None => PriceRange {
				min: item.price,
				max: item.price,
			},
		});
	}

	SearchFacets {
		categories: categories.finish(),
		vendors: vendors.finish(),
		brands: brands.finish(),
		price_range,
	}
}

#[derive(Default)]
struct FacetCounter {
	counts: HashMap<String, (usize, Option<String>)>,
}

impl FacetCounter {
	fn add(&mut self, value: &str, label: Option<&str>) {
		let slot = self
			.counts
			.entry(value.to_string())
			.or_insert((0, None));
		slot.0 += 1;
		if slot.1.is_none() {
			slot.1 = label.map(str::to_string);
		}
	}

	/// Count descending, then value ascending.
	fn finish(self) -> Vec<FacetCount> {
		let mut out: Vec<FacetCount> = self
			.counts
			.into_iter()
			.map(|(value, (count, label))| FacetCount { value, label, count })
			.collect();
		out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
		out
	}
}
