use regional_dashboard::chart::{self, Axis, ChartStyle, EMPTY_TITLE, Rgb8};
use regional_dashboard::{Dataset, FilteredTable, Selection, Unit, YearRange, filter_selection};

#[test]
fn empty_table_renders_placeholder() {
    let spec = chart::render(&FilteredTable::empty(), &ChartStyle::default());
    assert_eq!(spec.title, EMPTY_TITLE);
    assert_eq!(spec.series.len(), 3);
    assert!(spec.is_empty());
    assert_eq!(spec.year_span(), None);
}

#[test]
fn series_layout_and_colors() {
    let ds = Dataset::load().unwrap();
    let sel = Selection::new("Europe", YearRange::new(1952, 2007));
    let spec = chart::render(&filter_selection(&ds, &sel), &ChartStyle::default());

    assert_eq!(spec.title, "Europe");
    assert_eq!(spec.y_title, "EUR");
    assert_eq!(spec.y2_title, "Number");
    let layout: Vec<(Unit, Axis, Rgb8)> = spec.series.iter().map(|s| (s.name, s.axis, s.color)).collect();
    assert_eq!(
        layout,
        vec![
            (Unit::Euro, Axis::Primary, Rgb8::BLACK),
            (Unit::Units, Axis::Primary, Rgb8::GREY),
            (Unit::Cars, Axis::Secondary, Rgb8::RED),
        ]
    );
    for s in &spec.series {
        assert_eq!(s.x.len(), 12);
        assert_eq!(s.x.len(), s.y.len());
    }
    assert_eq!(spec.year_span(), Some((1952, 2007)));
    assert_eq!(spec.series_on(Axis::Secondary).count(), 1);
}

#[test]
fn country_title_includes_region() {
    let ds = Dataset::load().unwrap();
    let sel = Selection::new("Asia", YearRange::new(1952, 2007)).with_country("Korea, Rep.");
    let spec = chart::render(&filter_selection(&ds, &sel), &ChartStyle::default());
    assert_eq!(spec.title, "Asia, Korea, Rep.");
}

#[test]
fn unselected_units_leave_empty_series() {
    let ds = Dataset::load().unwrap();
    let sel = Selection::new("Africa", YearRange::new(1952, 1962)).with_units([Unit::Cars]);
    let spec = chart::render(&filter_selection(&ds, &sel), &ChartStyle::default());
    assert!(spec.series_of(Unit::Euro).unwrap().is_empty());
    assert_eq!(spec.series_of(Unit::Cars).unwrap().x, vec![1952, 1957, 1962]);
    assert_eq!(spec.value_span(Axis::Primary), None);
    assert!(spec.value_span(Axis::Secondary).is_some());
}

#[test]
fn style_is_carried_through() {
    let style = ChartStyle {
        font: "DejaVu Sans".into(),
        paper_bgcolor: Rgb8::from_hex("#fafafa").unwrap(),
        plot_bgcolor: Rgb8::WHITE,
    };
    let spec = chart::render(&FilteredTable::empty(), &style);
    assert_eq!(spec.style, style);
}
