//! Recompute-all-views entry point shared by every shell (CLI, HTTP, desktop, tests).

use crate::chart::{self, ChartSpec, ChartStyle};
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::filter::filter_selection;
use crate::format::map_locale;
use crate::models::{Selection, Unit};
use crate::options::ControlOptions;
use crate::summary::{self, Summary};
use crate::table::{self, TableView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything derived from one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    pub chart: ChartSpec,
    pub summary: Summary,
    pub table: TableView,
}

/// Derive chart, summary and table for `selection`.
///
/// Chart and table follow the unit checklist. The summary panel always totals all
/// three units for the selected region/country and years.
pub fn recompute(dataset: &Dataset, selection: &Selection, style: &ChartStyle) -> DashboardViews {
    recompute_with_locale(dataset, selection, style, "en")
}

pub fn recompute_with_locale(
    dataset: &Dataset,
    selection: &Selection,
    style: &ChartStyle,
    locale_tag: &str,
) -> DashboardViews {
    let locale = map_locale(locale_tag);
    let filtered = filter_selection(dataset, selection);

    let panel_selection = selection.clone().with_units(Unit::ALL);
    let panel = filter_selection(dataset, &panel_selection);

    log::debug!(
        "recompute region={} country={:?} units={:?} years={} -> {} rows",
        selection.region,
        selection.country,
        selection.units,
        selection.years,
        filtered.len()
    );

    DashboardViews {
        chart: chart::render(&filtered, style),
        summary: summary::summarize_with_locale(&panel, locale),
        table: table::render_with_locale(&filtered, locale),
    }
}

/// Immutable dataset plus the control options and presentation settings derived from it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    options: ControlOptions,
    style: ChartStyle,
    locale: String,
}

impl Dashboard {
    pub fn new(dataset: Dataset, style: ChartStyle) -> Self {
        let options = ControlOptions::from_dataset(&dataset);
        Self {
            dataset: Arc::new(dataset),
            options,
            style,
            locale: "en".to_string(),
        }
    }

    /// Locale tag for number formatting (see [`crate::format::map_locale`]).
    pub fn with_locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn default_selection(&self) -> Selection {
        self.options.default_selection()
    }

    /// Reject selections a user could type but the controls would never produce.
    pub fn validate(&self, selection: &Selection) -> Result<(), SelectionError> {
        let countries = self
            .options
            .countries_for(&selection.region)
            .ok_or_else(|| SelectionError::UnknownRegion(selection.region.clone()))?;
        if let Some(country) = selection.country()
            && !countries.iter().any(|c| c == country)
        {
            return Err(SelectionError::CountryNotInRegion {
                country: country.to_string(),
                region: selection.region.clone(),
            });
        }
        if selection.years.is_reversed() {
            return Err(SelectionError::ReversedYearRange {
                start: selection.years.start,
                end: selection.years.end,
            });
        }
        Ok(())
    }

    pub fn views(&self, selection: &Selection) -> DashboardViews {
        recompute_with_locale(&self.dataset, selection, &self.style, &self.locale)
    }
}
