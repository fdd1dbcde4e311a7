//! Table view: `year, unit, value` rows with formatted values, multi-column sorting
//! and fixed-size pages.

use crate::error::SelectionError;
use crate::format::thousands;
use crate::models::{FilteredTable, Unit};
use num_format::Locale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableColumn {
    Year,
    Unit,
    Value,
}

impl TableColumn {
    pub const ALL: [TableColumn; 3] = [TableColumn::Year, TableColumn::Unit, TableColumn::Value];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableColumn::Year => "year",
            TableColumn::Unit => "unit",
            TableColumn::Value => "value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort expression such as `value:desc`; direction defaults to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: TableColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: TableColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: TableColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }

    /// Header-click behaviour of a multi-sort table: an unsorted column is appended
    /// ascending, ascending flips to descending, descending drops out.
    pub fn toggle(keys: &[SortKey], column: TableColumn) -> Vec<SortKey> {
        let mut out = Vec::with_capacity(keys.len() + 1);
        let mut seen = false;
        for k in keys {
            if k.column != column {
                out.push(*k);
                continue;
            }
            seen = true;
            if k.direction == SortDirection::Asc {
                out.push(SortKey::desc(column));
            }
        }
        if !seen {
            out.push(SortKey::asc(column));
        }
        out
    }

    /// Inverse of [`SortKey::parse_list`].
    pub fn join(keys: &[SortKey]) -> String {
        keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }

    /// Parse a comma-separated list (`unit,value:desc`). Blank input yields no keys.
    pub fn parse_list(s: &str) -> Result<Vec<SortKey>, SelectionError> {
        s.split(',')
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(|x| x.parse::<SortKey>())
            .collect()
    }
}

impl FromStr for SortKey {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectionError::InvalidSortKey(s.to_string());
        let (col, dir) = match s.split_once(':') {
            Some((c, d)) => (c.trim(), d.trim()),
            None => (s.trim(), "asc"),
        };
        let column = match col.to_ascii_lowercase().as_str() {
            "year" => TableColumn::Year,
            "unit" => TableColumn::Unit,
            "value" => TableColumn::Value,
            _ => return Err(invalid()),
        };
        let direction = match dir.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(invalid()),
        };
        Ok(SortKey { column, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.column.as_str()),
            SortDirection::Desc => write!(f, "{}:desc", self.column.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub year: i32,
    pub unit: Unit,
    /// Display text, e.g. `1,234,568`.
    pub value: String,
    /// Unformatted value; sorting uses this, not the text.
    pub raw_value: f64,
}

impl TableRow {
    fn compare(&self, other: &TableRow, column: TableColumn) -> Ordering {
        match column {
            TableColumn::Year => self.year.cmp(&other.year),
            TableColumn::Unit => self.unit.as_str().cmp(other.unit.as_str()),
            TableColumn::Value => self.raw_value.total_cmp(&other.raw_value),
        }
    }
}

/// Rows ready for display. The consuming shell sorts (multi-column) and pages them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub page_size: usize,
    pub sortable: bool,
    pub multi_sort: bool,
}

impl TableView {
    /// Stable multi-key sort; earlier keys take precedence.
    pub fn sort_by(&mut self, keys: &[SortKey]) {
        if keys.is_empty() {
            return;
        }
        self.rows.sort_by(|a, b| {
            keys.iter()
                .map(|k| {
                    let ord = a.compare(b, k.column);
                    match k.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                })
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Builder form of [`TableView::sort_by`].
    pub fn sorted(mut self, keys: &[SortKey]) -> Self {
        self.sort_by(keys);
        self
    }

    /// At least one page, even when empty.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Rows of page `n` (0-based); out-of-range pages are empty.
    pub fn page(&self, n: usize) -> &[TableRow] {
        let start = n.saturating_mul(self.page_size);
        if start >= self.rows.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }
}

/// Select `year, unit, value` and format the value (English separators, no decimals).
pub fn render(table: &FilteredTable) -> TableView {
    render_with_locale(table, &Locale::en)
}

pub fn render_with_locale(table: &FilteredTable, locale: &Locale) -> TableView {
    let rows = table
        .rows
        .iter()
        .map(|r| TableRow {
            year: r.year,
            unit: r.unit,
            value: thousands(r.value, locale),
            raw_value: r.value,
        })
        .collect();
    TableView {
        columns: TableColumn::ALL.to_vec(),
        rows,
        page_size: PAGE_SIZE,
        sortable: true,
        multi_sort: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parsing() {
        assert_eq!("value:desc".parse::<SortKey>(), Ok(SortKey::desc(TableColumn::Value)));
        assert_eq!(" Year ".parse::<SortKey>(), Ok(SortKey::asc(TableColumn::Year)));
        assert!("country".parse::<SortKey>().is_err());
        assert!("unit:sideways".parse::<SortKey>().is_err());
        assert!(SortKey::parse_list("").unwrap().is_empty());
        assert_eq!(
            SortKey::parse_list("unit, value:desc").unwrap(),
            vec![SortKey::asc(TableColumn::Unit), SortKey::desc(TableColumn::Value)]
        );
    }

    #[test]
    fn display_is_parseable() {
        let k = SortKey::desc(TableColumn::Value);
        assert_eq!(k.to_string(), "value:desc");
        assert_eq!(k.to_string().parse::<SortKey>(), Ok(k));
    }
}
