use crate::format::thousands;
use crate::models::{FilteredTable, Unit};
use num_format::Locale;
use serde::{Deserialize, Serialize};

/// Card order of the summary panel.
pub const DISPLAY_ORDER: [Unit; 3] = [Unit::Cars, Unit::Units, Unit::Euro];

/// Totals are reported in thousands.
const SCALE: f64 = 1_000.0;

/// Total of one unit, already divided by 1000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTotal {
    pub unit: Unit,
    pub label: String,
    pub total: f64,
    pub formatted: String,
}

/// Per-unit totals for the summary panel. Always carries all three units;
/// a unit with no rows totals zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub totals: Vec<UnitTotal>,
}

impl Summary {
    fn get(&self, unit: Unit) -> Option<&UnitTotal> {
        self.totals.iter().find(|t| t.unit == unit)
    }

    pub fn total(&self, unit: Unit) -> f64 {
        self.get(unit).map(|t| t.total).unwrap_or(0.0)
    }

    pub fn formatted(&self, unit: Unit) -> String {
        self.get(unit)
            .map(|t| t.formatted.clone())
            .unwrap_or_else(|| "0".to_string())
    }

    /// `(label, formatted total)` pairs in card order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.totals
            .iter()
            .map(|t| (t.label.as_str(), t.formatted.as_str()))
    }
}

pub fn label(unit: Unit) -> &'static str {
    match unit {
        Unit::Cars => "Total Cars",
        Unit::Units => "Total Units",
        Unit::Euro => "Total Euro",
    }
}

/// Sum `value` per unit, divide by 1000, format with English separators.
pub fn summarize(table: &FilteredTable) -> Summary {
    summarize_with_locale(table, &Locale::en)
}

pub fn summarize_with_locale(table: &FilteredTable, locale: &Locale) -> Summary {
    let totals = DISPLAY_ORDER
        .iter()
        .map(|&unit| {
            let total = table.rows_of(unit).map(|r| r.value).sum::<f64>() / SCALE;
            UnitTotal {
                unit,
                label: label(unit).to_string(),
                total,
                formatted: thousands(total, locale),
            }
        })
        .collect();
    Summary { totals }
}
