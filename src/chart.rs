//! Chart spec for the dual-axis time series.
//!
//! A `ChartSpec` is plain data (serializable to JSON for web consumers); drawing it to
//! an image is [`crate::viz::render_chart`]'s job.

use crate::models::{FilteredTable, TableShape, Unit};
use serde::{Deserialize, Serialize};

/// Title shown when there is nothing to plot.
pub const EMPTY_TITLE: &str = "Select a unit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };
    pub const GREY: Rgb8 = Rgb8 { r: 128, g: 128, b: 128 };
    pub const RED: Rgb8 = Rgb8 { r: 255, g: 0, b: 0 };
    pub const WHITE: Rgb8 = Rgb8 { r: 255, g: 255, b: 255 };

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Rgb8> {
        let h = s.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
        Some(Rgb8 {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
        })
    }
}

/// Presentation settings that come from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub font: String,
    pub paper_bgcolor: Rgb8,
    pub plot_bgcolor: Rgb8,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            paper_bgcolor: Rgb8::WHITE,
            plot_bgcolor: Rgb8::WHITE,
        }
    }
}

/// One line of the chart, x = year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: Unit,
    pub axis: Axis,
    pub color: Rgb8,
    pub x: Vec<i32>,
    pub y: Vec<f64>,
}

impl Series {
    fn new(name: Unit, axis: Axis, color: Rgb8) -> Self {
        Self {
            name,
            axis,
            color,
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    /// Primary (left) axis title.
    pub y_title: String,
    /// Secondary (right) axis title.
    pub y2_title: String,
    pub series: Vec<Series>,
    pub style: ChartStyle,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }

    pub fn series_on(&self, axis: Axis) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.axis == axis)
    }

    pub fn series_of(&self, unit: Unit) -> Option<&Series> {
        self.series.iter().find(|s| s.name == unit)
    }

    /// Min and max year over all series.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let xs = self.series.iter().flat_map(|s| s.x.iter().copied());
        let (mut lo, mut hi) = (i32::MAX, i32::MIN);
        for x in xs {
            lo = lo.min(x);
            hi = hi.max(x);
        }
        (lo <= hi).then_some((lo, hi))
    }

    /// Min and max value over the series of one axis.
    pub fn value_span(&self, axis: Axis) -> Option<(f64, f64)> {
        let ys = self.series_on(axis).flat_map(|s| s.y.iter().copied());
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for y in ys.filter(|y| y.is_finite()) {
            lo = lo.min(y);
            hi = hi.max(y);
        }
        (lo <= hi).then_some((lo, hi))
    }
}

/// `euro` and `units` on the primary axis, `cars` on the secondary axis.
fn empty_series() -> Vec<Series> {
    vec![
        Series::new(Unit::Euro, Axis::Primary, Rgb8::BLACK),
        Series::new(Unit::Units, Axis::Primary, Rgb8::GREY),
        Series::new(Unit::Cars, Axis::Secondary, Rgb8::RED),
    ]
}

/// Build the chart for a filtered table. Performs no aggregation of its own.
pub fn render(table: &FilteredTable, style: &ChartStyle) -> ChartSpec {
    let mut series = empty_series();

    let title = match table.rows.first() {
        None => EMPTY_TITLE.to_string(),
        Some(first) => {
            for s in series.iter_mut() {
                for r in table.rows_of(s.name) {
                    s.x.push(r.year);
                    s.y.push(r.value);
                }
            }
            match (table.shape, first.country.as_deref()) {
                (TableShape::Country, Some(c)) if !c.is_empty() => {
                    format!("{}, {}", first.region, c)
                }
                _ => first.region.clone(),
            }
        }
    };

    ChartSpec {
        title,
        y_title: "EUR".to_string(),
        y2_title: "Number".to_string(),
        series,
        style: style.clone(),
    }
}
