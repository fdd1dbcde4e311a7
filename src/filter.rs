use crate::dataset::Dataset;
use crate::models::{FilteredRow, FilteredTable, Selection, TableShape, Unit, YearRange};
use std::collections::{BTreeMap, BTreeSet};

/// Grouping key for region-level aggregation; the derived ordering is the output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct AggregateKey {
    year: i32,
    region: String,
    unit: Unit,
}

/// Select the rows matching a region or country, a unit set and an inclusive year range.
///
/// - `units` empty: empty table ([`TableShape::Empty`]).
/// - `country` empty: rows of `region`, summed per `(year, region, unit)`.
/// - `country` set: that country's rows as they are, in dataset order.
///
/// A reversed range or unknown region is not rejected here; it just matches nothing.
pub fn filter(
    dataset: &Dataset,
    region: &str,
    country: &str,
    units: &BTreeSet<Unit>,
    years: YearRange,
) -> FilteredTable {
    if units.is_empty() {
        return FilteredTable::empty();
    }

    if country.trim().is_empty() {
        let mut groups: BTreeMap<AggregateKey, f64> = BTreeMap::new();
        for r in dataset.rows() {
            if r.region == region && units.contains(&r.unit) && years.contains(r.year) {
                let key = AggregateKey {
                    year: r.year,
                    region: r.region.clone(),
                    unit: r.unit,
                };
                *groups.entry(key).or_default() += r.value;
            }
        }
        let rows = groups
            .into_iter()
            .map(|(key, value)| FilteredRow {
                country: None,
                region: key.region,
                year: key.year,
                unit: key.unit,
                value,
            })
            .collect();
        FilteredTable {
            shape: TableShape::RegionAggregate,
            rows,
        }
    } else {
        let rows = dataset
            .rows()
            .iter()
            .filter(|r| r.country == country && units.contains(&r.unit) && years.contains(r.year))
            .map(|r| FilteredRow {
                country: Some(r.country.clone()),
                region: r.region.clone(),
                year: r.year,
                unit: r.unit,
                value: r.value,
            })
            .collect();
        FilteredTable {
            shape: TableShape::Country,
            rows,
        }
    }
}

/// [`filter`] driven by a [`Selection`].
pub fn filter_selection(dataset: &Dataset, selection: &Selection) -> FilteredTable {
    filter(
        dataset,
        &selection.region,
        selection.country().unwrap_or(""),
        &selection.units,
        selection.years,
    )
}
