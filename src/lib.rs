//! regional_dashboard
//!
//! A small library for exploring a regional long-format dataset (`cars`, `euro`,
//! `units` per country and year). Pairs with the `rdash` CLI/HTTP dashboard and
//! the `rdash-gui` desktop app.
//!
//! ### Features
//! - Load the bundled sample (or any CSV with the same header) into long format,
//!   with "World" aggregate rows appended
//! - Filter by region, country, units and an inclusive year range
//! - Summary totals, a dual-axis chart spec and a sortable, paged table view
//! - Export filtered rows as CSV or JSON and render the chart to SVG/PNG
//!
//! ### Example
//! ```no_run
//! use regional_dashboard::{Dashboard, Dataset};
//!
//! let dashboard = Dashboard::new(Dataset::load()?, Default::default());
//! let selection = dashboard.default_selection();
//! let views = dashboard.views(&selection);
//! println!("{}", views.chart.title);
//! for (label, total) in views.summary.entries() {
//!     println!("{label}: {total}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod options;
pub mod server;
pub mod storage;
pub mod summary;
pub mod table;
pub mod viz;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardViews, recompute};
pub use dataset::Dataset;
pub use error::SelectionError;
pub use filter::{filter, filter_selection};
pub use models::{FilteredRow, FilteredTable, Row, Selection, TableShape, Unit, YearRange};
