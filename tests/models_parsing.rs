use regional_dashboard::{Selection, SelectionError, Unit, YearRange};
use std::collections::BTreeSet;

#[test]
fn unit_list_accepts_commas_and_semicolons() {
    let all: BTreeSet<Unit> = Unit::ALL.into_iter().collect();
    assert_eq!(Unit::parse_list("cars,euro,units").unwrap(), all);
    assert_eq!(Unit::parse_list("cars;euro;units").unwrap(), all);
    assert_eq!(Unit::parse_list(" Cars , EURO ; units ").unwrap(), all);
    assert_eq!(
        Unit::parse_list("euro,,euro,").unwrap(),
        [Unit::Euro].into_iter().collect()
    );
    assert!(Unit::parse_list("").unwrap().is_empty());
    assert_eq!(
        Unit::parse_list("cars,horses"),
        Err(SelectionError::UnknownUnit("horses".into()))
    );
}

#[test]
fn units_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Unit::Euro).unwrap(), "\"euro\"");
    assert_eq!(Unit::Units.to_string(), "units");
}

#[test]
fn year_range_parsing() {
    assert_eq!("1952:2007".parse::<YearRange>(), Ok(YearRange::new(1952, 2007)));
    assert_eq!("1977".parse::<YearRange>(), Ok(YearRange::new(1977, 1977)));
    assert_eq!(" 1960 : 1970 ".parse::<YearRange>(), Ok(YearRange::new(1960, 1970)));
    assert!("1960-1970".parse::<YearRange>().is_err());
    assert!("2000:1990".parse::<YearRange>().unwrap().is_reversed());
    let r = YearRange::new(1962, 1972);
    assert!(r.contains(1962) && r.contains(1972));
    assert!(!r.contains(1957) && !r.contains(1977));
    assert_eq!(r.to_string(), "1962:1972");
}

#[test]
fn blank_country_means_whole_region() {
    let sel = Selection::new("Europe", YearRange::new(1952, 2007)).with_country("  ");
    assert_eq!(sel.country(), None);
    let sel = sel.with_country("Spain");
    assert_eq!(sel.country(), Some("Spain"));
}
