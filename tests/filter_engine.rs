use regional_dashboard::models::{Row, WORLD_REGION};
use regional_dashboard::{Dataset, Selection, TableShape, Unit, YearRange, filter, filter_selection};
use std::collections::BTreeSet;

fn row(country: &str, region: &str, year: i32, unit: Unit, value: f64) -> Row {
    Row {
        country: country.into(),
        region: region.into(),
        year,
        unit,
        value,
    }
}

/// Two countries of region R: A = 10, B = 20 cars in 2000.
fn scenario() -> Dataset {
    Dataset::from_rows(vec![
        row("A", "R", 2000, Unit::Cars, 10.0),
        row("B", "R", 2000, Unit::Cars, 20.0),
    ])
}

fn units(list: &[Unit]) -> BTreeSet<Unit> {
    list.iter().copied().collect()
}

#[test]
fn region_without_country_sums_countries() {
    let t = filter(&scenario(), "R", "", &units(&[Unit::Cars]), YearRange::new(2000, 2000));
    assert_eq!(t.shape, TableShape::RegionAggregate);
    assert_eq!(t.len(), 1);
    let r = &t.rows[0];
    assert_eq!((r.year, r.region.as_str(), r.unit, r.value), (2000, "R", Unit::Cars, 30.0));
    assert_eq!(r.country, None);
}

#[test]
fn country_returns_raw_rows() {
    let t = filter(&scenario(), "R", "A", &units(&[Unit::Cars]), YearRange::new(2000, 2000));
    assert_eq!(t.shape, TableShape::Country);
    assert_eq!(t.len(), 1);
    assert_eq!(t.rows[0].country.as_deref(), Some("A"));
    assert_eq!(t.rows[0].value, 10.0);
}

#[test]
fn empty_units_give_empty_table() {
    let ds = Dataset::load().unwrap();
    let t = filter(&ds, "Europe", "", &BTreeSet::new(), YearRange::new(1952, 2007));
    assert_eq!(t.shape, TableShape::Empty);
    assert!(t.is_empty());
    assert!(t.shape.columns().is_empty());
}

#[test]
fn year_range_is_inclusive() {
    let ds = Dataset::load().unwrap();
    let years = YearRange::new(1962, 1972);
    let t = filter(&ds, "Europe", "", &units(&Unit::ALL), years);
    assert!(t.rows.iter().all(|r| years.contains(r.year)));
    let seen: BTreeSet<i32> = t.rows.iter().map(|r| r.year).collect();
    assert_eq!(seen, [1962, 1967, 1972].into_iter().collect());
    // one row per (year, unit)
    assert_eq!(t.len(), 3 * 3);
}

#[test]
fn region_rows_are_ordered_by_year_then_unit() {
    let ds = Dataset::load().unwrap();
    let t = filter(&ds, "Asia", "", &units(&[Unit::Units, Unit::Cars]), YearRange::new(1952, 1957));
    let keys: Vec<(i32, Unit)> = t.rows.iter().map(|r| (r.year, r.unit)).collect();
    assert_eq!(
        keys,
        vec![(1952, Unit::Cars), (1952, Unit::Units), (1957, Unit::Cars), (1957, Unit::Units)]
    );
}

#[test]
fn country_filter_never_aggregates() {
    let ds = Dataset::load().unwrap();
    let t = filter(&ds, "Europe", "Norway", &units(&Unit::ALL), YearRange::new(1952, 2007));
    assert_eq!(t.len(), 12 * 3);
    assert!(t.rows.iter().all(|r| r.country.as_deref() == Some("Norway")));
}

#[test]
fn world_region_uses_world_rows() {
    let ds = Dataset::load().unwrap();
    let t = filter(&ds, WORLD_REGION, "", &units(&[Unit::Euro]), YearRange::new(2007, 2007));
    assert_eq!(t.len(), 1);
    let direct = ds
        .world_rows()
        .iter()
        .find(|r| r.year == 2007 && r.unit == Unit::Euro)
        .unwrap();
    assert_eq!(t.rows[0].value, direct.value);
}

#[test]
fn filter_is_idempotent() {
    let ds = Dataset::load().unwrap();
    let sel = Selection::new("Americas", YearRange::new(1967, 1992)).with_units([Unit::Cars, Unit::Euro]);
    assert_eq!(filter_selection(&ds, &sel), filter_selection(&ds, &sel));
    let country = sel.clone().with_country("Chile");
    assert_eq!(filter_selection(&ds, &country), filter_selection(&ds, &country));
}

#[test]
fn reversed_range_or_unknown_region_match_nothing() {
    let ds = Dataset::load().unwrap();
    assert!(filter(&ds, "Europe", "", &units(&Unit::ALL), YearRange::new(2000, 1990)).is_empty());
    assert!(filter(&ds, "Atlantis", "", &units(&Unit::ALL), YearRange::new(1952, 2007)).is_empty());
}
