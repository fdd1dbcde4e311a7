//! Choices offered by the dashboard controls, derived once from the dataset.

use crate::dataset::Dataset;
use crate::models::{Selection, Unit, WORLD_REGION, YearRange};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOption {
    pub name: String,
    pub countries: Vec<String>,
}

/// Year range slider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSlider {
    pub min: i32,
    pub max: i32,
    /// Sorted distinct years of the dataset.
    pub marks: Vec<i32>,
    pub step: i32,
    /// Minimum distance between the two handles.
    pub pushable: i32,
}

impl YearSlider {
    /// Values the start handle may take while the end handle sits at `end`.
    pub fn start_range(&self, end: i32) -> RangeInclusive<i32> {
        self.min..=(end - self.pushable).max(self.min)
    }

    /// Values the end handle may take while the start handle sits at `start`.
    pub fn end_range(&self, start: i32) -> RangeInclusive<i32> {
        (start + self.pushable).min(self.max)..=self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlOptions {
    pub regions: Vec<RegionOption>,
    pub units: Vec<Unit>,
    pub years: YearSlider,
}

impl ControlOptions {
    /// Regions in first-appearance order, each with its countries; "World" lists every country.
    pub fn from_dataset(ds: &Dataset) -> Self {
        let regions = ds
            .regions()
            .into_iter()
            .map(|name| {
                let countries = if name == WORLD_REGION {
                    ds.countries()
                } else {
                    ds.countries_in(&name)
                };
                RegionOption { name, countries }
            })
            .collect();

        let bounds = ds.year_bounds().unwrap_or(YearRange::new(0, 0));
        Self {
            regions,
            units: ds.units(),
            years: YearSlider {
                min: bounds.start,
                max: bounds.end,
                marks: ds.years(),
                step: 5,
                pushable: 2,
            },
        }
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r.name == region)
    }

    /// Country choices after picking `region`; `None` for an unknown region.
    pub fn countries_for(&self, region: &str) -> Option<&[String]> {
        self.regions
            .iter()
            .find(|r| r.name == region)
            .map(|r| r.countries.as_slice())
    }

    pub fn full_years(&self) -> YearRange {
        YearRange::new(self.years.min, self.years.max)
    }

    /// First region, no country, every unit, the full year range.
    pub fn default_selection(&self) -> Selection {
        let region = self
            .regions
            .first()
            .map(|r| r.name.clone())
            .unwrap_or_else(|| WORLD_REGION.to_string());
        Selection::new(region, self.full_years()).with_units(self.units.iter().copied())
    }
}
