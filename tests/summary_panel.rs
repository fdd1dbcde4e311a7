use regional_dashboard::models::{FilteredRow, FilteredTable, TableShape};
use regional_dashboard::summary::{self, DISPLAY_ORDER};
use regional_dashboard::{Dataset, Selection, Unit, YearRange, filter_selection};

fn aggregate(rows: &[(Unit, f64)]) -> FilteredTable {
    FilteredTable {
        shape: TableShape::RegionAggregate,
        rows: rows
            .iter()
            .map(|&(unit, value)| FilteredRow {
                country: None,
                region: "R".into(),
                year: 2000,
                unit,
                value,
            })
            .collect(),
    }
}

#[test]
fn totals_are_divided_by_thousand_and_grouped() {
    let s = summary::summarize(&aggregate(&[
        (Unit::Euro, 1_234_567_000.0),
        (Unit::Euro, 1_000.0),
        (Unit::Cars, 499.0),
        (Unit::Units, 2_500.0),
    ]));
    assert_eq!(s.formatted(Unit::Euro), "1,234,568");
    assert_eq!(s.total(Unit::Euro), 1_234_568.0);
    assert_eq!(s.formatted(Unit::Cars), "0");
    // 2.5 rounds half to even
    assert_eq!(s.formatted(Unit::Units), "2");
}

#[test]
fn missing_units_total_zero_in_card_order() {
    let s = summary::summarize(&aggregate(&[(Unit::Cars, 30_000.0)]));
    let entries: Vec<(&str, &str)> = s.entries().collect();
    assert_eq!(
        entries,
        vec![("Total Cars", "30"), ("Total Units", "0"), ("Total Euro", "0")]
    );
    assert_eq!(s.totals.len(), DISPLAY_ORDER.len());
}

#[test]
fn empty_table_gives_zero_cards() {
    let s = summary::summarize(&FilteredTable::empty());
    assert!(s.entries().all(|(_, v)| v == "0"));
}

#[test]
fn locale_changes_separator() {
    let s = summary::summarize_with_locale(
        &aggregate(&[(Unit::Euro, 12_345_678_000.0)]),
        regional_dashboard::format::map_locale("de"),
    );
    assert_eq!(s.formatted(Unit::Euro), "12.345.678");
}

#[test]
fn sample_region_totals_match_rows() {
    let ds = Dataset::load().unwrap();
    let sel = Selection::new("Oceania", YearRange::new(2007, 2007));
    let table = filter_selection(&ds, &sel);
    let s = summary::summarize(&table);
    let euro: f64 = table.rows_of(Unit::Euro).map(|r| r.value).sum();
    assert_eq!(s.total(Unit::Euro), euro / 1000.0);
}
