//! Loading the sample dataset into long format.
//!
//! Pipeline: read the wide sample records (columns are relabelled by
//! [`SampleRecord`]'s serde renames), melt them into one [`Row`] per unit, then
//! append the "World" aggregate rows.
//!
//! ```
//! use regional_dashboard::Dataset;
//!
//! let ds = Dataset::load()?;
//! assert!(ds.regions().iter().any(|r| r == "World"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{Row, SampleRecord, Unit, WORLD_REGION, YearRange};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use indexmap::IndexSet;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bundled sample (gapminder-shaped: country, continent, year, lifeExp, pop, gdpPercap).
const SAMPLE_CSV: &str = include_str!("../assets/sample_gapminder.csv");

/// Immutable long-format table: base rows followed by the "World" aggregate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
    base_len: usize,
}

impl Dataset {
    /// Build the dataset from the bundled sample.
    pub fn load() -> Result<Self> {
        Self::from_reader(SAMPLE_CSV.as_bytes()).context("bundled sample dataset is unavailable")
    }

    /// Same pipeline over a CSV file with the sample's header.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("read {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut records = Vec::new();
        for (idx, rec) in rdr.deserialize::<SampleRecord>().enumerate() {
            // +2: header line and 1-based numbering
            let rec = rec.with_context(|| format!("malformed record on line {}", idx + 2))?;
            if rec.region == WORLD_REGION {
                bail!(
                    "line {}: region '{WORLD_REGION}' is reserved for the computed aggregate",
                    idx + 2
                );
            }
            records.push(rec);
        }
        if records.is_empty() {
            bail!("dataset contains no records");
        }
        Ok(Self::from_records(&records))
    }

    /// Melt wide records and append the world aggregate.
    pub fn from_records(records: &[SampleRecord]) -> Self {
        Self::from_rows(melt(records))
    }

    /// Build from base rows already in long format. Rows labelled "World" are
    /// dropped; the aggregate is always recomputed from the real countries.
    pub fn from_rows(mut base: Vec<Row>) -> Self {
        let before = base.len();
        base.retain(|r| r.region != WORLD_REGION);
        if base.len() != before {
            log::warn!("dropped {} rows labelled '{WORLD_REGION}'", before - base.len());
        }
        let world = world_aggregate(&base);
        let base_len = base.len();
        let mut rows = base;
        rows.extend(world);
        log::info!(
            "dataset ready: {} base rows, {} world rows",
            base_len,
            rows.len() - base_len
        );
        Self { rows, base_len }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn base_rows(&self) -> &[Row] {
        &self.rows[..self.base_len]
    }

    pub fn world_rows(&self) -> &[Row] {
        &self.rows[self.base_len..]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct years.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.rows.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.rows.iter().map(|r| r.year).min()?;
        let max = self.rows.iter().map(|r| r.year).max()?;
        Some(YearRange::new(min, max))
    }

    /// Distinct regions in first-appearance order ("World" comes last).
    pub fn regions(&self) -> Vec<String> {
        let set: IndexSet<&str> = self.rows.iter().map(|r| r.region.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct non-empty country names of a region, in first-appearance order.
    pub fn countries_in(&self, region: &str) -> Vec<String> {
        let set: IndexSet<&str> = self
            .rows
            .iter()
            .filter(|r| r.region == region && !r.country.is_empty())
            .map(|r| r.country.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Every non-empty country name, in first-appearance order.
    pub fn countries(&self) -> Vec<String> {
        let set: IndexSet<&str> = self
            .rows
            .iter()
            .filter(|r| !r.country.is_empty())
            .map(|r| r.country.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Units present, in dataset order.
    pub fn units(&self) -> Vec<Unit> {
        let set: IndexSet<Unit> = self.rows.iter().map(|r| r.unit).collect();
        set.into_iter().collect()
    }
}

/// Wide to long, keeping `country, region, year` as id columns.
/// Rows are stacked unit-major: every `cars` row, then `euro`, then `units`.
fn melt(records: &[SampleRecord]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(records.len() * Unit::ALL.len());
    for unit in Unit::ALL {
        rows.extend(records.iter().map(|rec| Row {
            country: rec.country.clone(),
            region: rec.region.clone(),
            year: rec.year,
            unit,
            value: rec.value(unit),
        }));
    }
    rows
}

/// Sum of `value` per `(year, unit)`, ordered by year then unit.
fn world_aggregate(base: &[Row]) -> Vec<Row> {
    let mut sums: BTreeMap<(i32, Unit), f64> = BTreeMap::new();
    for r in base {
        *sums.entry((r.year, r.unit)).or_default() += r.value;
    }
    sums.into_iter()
        .map(|((year, unit), value)| Row {
            country: String::new(),
            region: WORLD_REGION.to_string(),
            year,
            unit,
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, region: &str, year: i32, cars: f64) -> SampleRecord {
        SampleRecord {
            country: country.into(),
            region: region.into(),
            year,
            cars,
            euro: cars * 10.0,
            units: cars * 100.0,
        }
    }

    #[test]
    fn melt_stacks_unit_major() {
        let rows = melt(&[rec("A", "R", 2000, 1.0), rec("B", "R", 2000, 2.0)]);
        let units: Vec<Unit> = rows.iter().map(|r| r.unit).collect();
        assert_eq!(
            units,
            vec![Unit::Cars, Unit::Cars, Unit::Euro, Unit::Euro, Unit::Units, Unit::Units]
        );
        assert_eq!(rows[3].country, "B");
        assert_eq!(rows[3].value, 20.0);
    }

    #[test]
    fn world_rows_are_ordered_by_year_then_unit() {
        let ds = Dataset::from_records(&[rec("A", "R", 2005, 1.0), rec("A", "R", 2000, 2.0)]);
        let keys: Vec<(i32, Unit)> = ds.world_rows().iter().map(|r| (r.year, r.unit)).collect();
        assert_eq!(keys[0], (2000, Unit::Cars));
        assert_eq!(keys[2], (2000, Unit::Units));
        assert_eq!(keys[3], (2005, Unit::Cars));
        assert!(ds.world_rows().iter().all(Row::is_world));
    }

    #[test]
    fn empty_source_is_an_error() {
        let csv = "country,continent,year,lifeExp,pop,gdpPercap\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }
}
