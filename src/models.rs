use crate::error::SelectionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Region label of the synthetic aggregate rows.
pub const WORLD_REGION: &str = "World";

/// One of the three measured quantities. Ordering is alphabetical by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Cars,
    Euro,
    Units,
}

impl Unit {
    /// Dataset column order (the order the long-format blocks are stacked in).
    pub const ALL: [Unit; 3] = [Unit::Cars, Unit::Euro, Unit::Units];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cars => "cars",
            Unit::Euro => "euro",
            Unit::Units => "units",
        }
    }

    /// Parse a list of unit names separated by comma or semicolon (e.g. `cars,euro`).
    /// Blank entries are skipped, so `""` yields the empty set.
    pub fn parse_list(s: &str) -> Result<BTreeSet<Unit>, SelectionError> {
        s.split([',', ';'])
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(|x| x.parse::<Unit>())
            .collect()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cars" => Ok(Unit::Cars),
            "euro" => Ok(Unit::Euro),
            "units" => Ok(Unit::Units),
            _ => Err(SelectionError::UnknownUnit(s.to_string())),
        }
    }
}

/// Inclusive year range like 1952..=2007.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Accepts `YYYY` (single year) or `YYYY:YYYY`. Reversed ranges parse fine;
/// rejecting them is up to the caller.
impl FromStr for YearRange {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SelectionError::MalformedYearRange(s.to_string());
        if let Some((a, b)) = s.split_once(':') {
            let start = a.trim().parse::<i32>().map_err(|_| malformed())?;
            let end = b.trim().parse::<i32>().map_err(|_| malformed())?;
            Ok(YearRange { start, end })
        } else {
            let y = s.trim().parse::<i32>().map_err(|_| malformed())?;
            Ok(YearRange { start: y, end: y })
        }
    }
}

/// Raw record of the bundled sample (wide format, one column per measurement).
///
/// The serde renames relabel the sample's columns to the dashboard vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub country: String,
    #[serde(rename = "continent")]
    pub region: String,
    pub year: i32,
    #[serde(rename = "lifeExp")]
    pub cars: f64,
    #[serde(rename = "pop")]
    pub euro: f64,
    #[serde(rename = "gdpPercap")]
    pub units: f64,
}

impl SampleRecord {
    pub fn value(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Cars => self.cars,
            Unit::Euro => self.euro,
            Unit::Units => self.units,
        }
    }
}

/// Tidy structure used by this crate (one row = one observation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub country: String,
    pub region: String,
    pub year: i32,
    pub unit: Unit,
    pub value: f64,
}

impl Row {
    pub fn is_world(&self) -> bool {
        self.region == WORLD_REGION && self.country.is_empty()
    }
}

/// What the user has picked in the controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub region: String,
    /// `None` means "no country selected, aggregate the whole region".
    pub country: Option<String>,
    pub units: BTreeSet<Unit>,
    pub years: YearRange,
}

impl Selection {
    /// Whole region, all units.
    pub fn new(region: impl Into<String>, years: YearRange) -> Self {
        Self {
            region: region.into(),
            country: None,
            units: Unit::ALL.into_iter().collect(),
            years,
        }
    }

    /// An empty name clears the country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        let country = country.into();
        self.country = if country.trim().is_empty() {
            None
        } else {
            Some(country)
        };
        self
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.units = units.into_iter().collect();
        self
    }

    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    /// Switching region always resets the country.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self.country = None;
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Which columns a filtered table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    /// No unit selected; no rows and no columns.
    Empty,
    /// `year, region, unit, value`, summed across the region's countries.
    RegionAggregate,
    /// `country, region, year, unit, value`, one row per observation.
    Country,
}

impl TableShape {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableShape::Empty => &[],
            TableShape::RegionAggregate => &["year", "region", "unit", "value"],
            TableShape::Country => &["country", "region", "year", "unit", "value"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub region: String,
    pub year: i32,
    pub unit: Unit,
    pub value: f64,
}

/// Output of the filter engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredTable {
    pub shape: TableShape,
    pub rows: Vec<FilteredRow>,
}

impl FilteredTable {
    pub fn empty() -> Self {
        Self {
            shape: TableShape::Empty,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Units that occur in at least one row.
    pub fn units(&self) -> BTreeSet<Unit> {
        self.rows.iter().map(|r| r.unit).collect()
    }

    /// Rows of one unit, in table order.
    pub fn rows_of(&self, unit: Unit) -> impl Iterator<Item = &FilteredRow> {
        self.rows.iter().filter(move |r| r.unit == unit)
    }
}
