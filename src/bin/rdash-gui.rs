/*!
 * Desktop dashboard for the regional cars/euro/units dataset.
 *
 * Native controls (region, country, units, years) drive the same recompute the
 * HTTP dashboard uses:
 * - Summary cards for the selected region/country and years
 * - Dual-axis chart (EUR on one plot, Number on a second plot below it)
 * - Sortable, paged table
 * - CSV/JSON export of the filtered rows and chart image export
 */

use anyhow::Result;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use regional_dashboard::chart::{Axis, ChartSpec};
use regional_dashboard::dashboard::DashboardViews;
use regional_dashboard::table::{SortDirection, SortKey};
use regional_dashboard::{Dashboard, DashboardConfig, Dataset, Selection};
use regional_dashboard::{filter_selection, storage, viz};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    // Optional settings in the user's config dir, e.g. ~/.config/rdash/config.toml
    let config_path = dirs::config_dir()
        .map(|d| d.join("rdash").join("config.toml"))
        .filter(|p| p.exists());
    let config = DashboardConfig::load_or_default(config_path.as_deref())?;
    let dataset = match &config.data_path {
        Some(p) => Dataset::from_path(p)?,
        None => Dataset::load()?,
    };
    let dashboard = Dashboard::new(dataset, config.chart_style()?).with_locale(config.locale.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title(config.app_title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "rdash",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(dashboard, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportKind {
    Csv,
    Json,
    Svg,
    Png,
}

impl ExportKind {
    fn extension(self) -> &'static str {
        match self {
            ExportKind::Csv => "csv",
            ExportKind::Json => "json",
            ExportKind::Svg => "svg",
            ExportKind::Png => "png",
        }
    }
}

struct DashboardApp {
    dashboard: Dashboard,
    config: DashboardConfig,
    selection: Selection,
    sort: Vec<SortKey>,
    page: usize,
    views: DashboardViews,

    output_dir: PathBuf,
    status_message: String,
    error_message: String,
}

impl DashboardApp {
    fn new(dashboard: Dashboard, config: DashboardConfig) -> Self {
        let selection = dashboard.default_selection();
        let views = dashboard.views(&selection);
        let output_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            dashboard,
            config,
            selection,
            sort: Vec::new(),
            page: 0,
            views,
            output_dir,
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    fn refresh(&mut self) {
        let mut views = self.dashboard.views(&self.selection);
        views.table.sort_by(&self.sort);
        self.page = self.page.min(views.table.page_count() - 1);
        self.views = views;
    }

    fn controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        let options = self.dashboard.options().clone();

        ui.horizontal_top(|ui| {
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label("Region");
                    for name in options.region_names() {
                        if ui.radio(self.selection.region == name, name).clicked() && self.selection.region != name {
                            self.selection = self.selection.clone().with_region(name);
                            changed = true;
                        }
                    }
                });
            });

            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label("Country");
                    let countries = options.countries_for(&self.selection.region).unwrap_or_default();
                    let current = self.selection.country().unwrap_or("(all)").to_string();
                    egui::ComboBox::from_id_salt("country")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            if ui.selectable_label(self.selection.country.is_none(), "(all)").clicked() {
                                self.selection.country = None;
                                changed = true;
                            }
                            for c in countries {
                                let selected = self.selection.country() == Some(c.as_str());
                                if ui.selectable_label(selected, c.as_str()).clicked() && !selected {
                                    self.selection.country = Some(c.clone());
                                    changed = true;
                                }
                            }
                        });
                });
            });

            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label("Units");
                    for unit in &options.units {
                        let mut on = self.selection.units.contains(unit);
                        if ui.checkbox(&mut on, unit.as_str()).changed() {
                            if on {
                                self.selection.units.insert(*unit);
                            } else {
                                self.selection.units.remove(unit);
                            }
                            changed = true;
                        }
                    }
                });
            });

            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label("Years");
                    let slider = &options.years;
                    let years = &mut self.selection.years;
                    ui.horizontal(|ui| {
                        changed |= ui
                            .add(
                                egui::DragValue::new(&mut years.start)
                                    .range(slider.start_range(years.end))
                                    .speed(slider.step),
                            )
                            .changed();
                        ui.label("to");
                        changed |= ui
                            .add(
                                egui::DragValue::new(&mut years.end)
                                    .range(slider.end_range(years.start))
                                    .speed(slider.step),
                            )
                            .changed();
                    });
                    if ui.small_button("Full range").clicked() {
                        *years = options.full_years();
                        changed = true;
                    }
                });
            });
        });
        changed
    }

    fn summary_cards(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (label, total) in self.views.summary.entries() {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.label(label);
                        ui.heading(total);
                    });
                });
            }
        });
    }

    fn chart(&self, ui: &mut egui::Ui) {
        let spec = &self.views.chart;
        ui.label(egui::RichText::new(spec.title.as_str()).strong().size(18.0));
        let (x_min, x_max) = spec
            .year_span()
            .map(|(a, b)| (a as f64, b as f64))
            .unwrap_or((0.0, 1.0));
        for (axis, id, y_title) in [
            (Axis::Primary, "chart_primary", spec.y_title.as_str()),
            (Axis::Secondary, "chart_secondary", spec.y2_title.as_str()),
        ] {
            Plot::new(id)
                .height(200.0)
                .legend(Legend::default())
                .include_x(x_min)
                .include_x(x_max)
                .x_axis_label("Year")
                .y_axis_label(y_title)
                .show(ui, |plot_ui| {
                    for line in lines(spec, axis) {
                        plot_ui.line(line);
                    }
                });
        }
    }

    /// Returns true when the sort order changed.
    fn table(&mut self, ui: &mut egui::Ui) -> bool {
        let mut resort = false;
        let table = &self.views.table;
        let pages = table.page_count();
        egui::Grid::new("rows").striped(true).min_col_width(90.0).show(ui, |ui| {
            for column in &table.columns {
                let marker = match self.sort.iter().find(|k| k.column == *column).map(|k| k.direction) {
                    Some(SortDirection::Asc) => " ▲",
                    Some(SortDirection::Desc) => " ▼",
                    None => "",
                };
                if ui.button(format!("{}{marker}", column.as_str())).clicked() {
                    self.sort = SortKey::toggle(&self.sort, *column);
                    resort = true;
                }
            }
            ui.end_row();
            for row in table.page(self.page) {
                ui.label(row.year.to_string());
                ui.label(row.unit.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(row.value.as_str());
                });
                ui.end_row();
            }
        });
        ui.horizontal(|ui| {
            if ui.add_enabled(self.page > 0, egui::Button::new("◀")).clicked() {
                self.page -= 1;
            }
            ui.label(format!("page {} of {}", self.page + 1, pages));
            if ui.add_enabled(self.page + 1 < pages, egui::Button::new("▶")).clicked() {
                self.page += 1;
            }
        });
        resort
    }

    fn export(&mut self, kind: ExportKind) {
        let ext = kind.extension();
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.output_dir)
            .set_file_name(format!("dashboard.{ext}"))
            .add_filter(ext.to_ascii_uppercase(), &[ext])
            .save_file()
        else {
            return;
        };
        match self.write_export(kind, &path) {
            Ok(()) => {
                self.status_message = format!("Wrote {}", path.display());
                self.error_message.clear();
                if let Some(dir) = path.parent() {
                    self.output_dir = dir.to_path_buf();
                }
            }
            Err(err) => {
                self.error_message = format!("Export failed: {err:#}");
                self.status_message.clear();
            }
        }
    }

    fn write_export(&self, kind: ExportKind, path: &Path) -> Result<()> {
        match kind {
            ExportKind::Csv | ExportKind::Json => {
                let filtered = filter_selection(self.dashboard.dataset(), &self.selection);
                if kind == ExportKind::Csv {
                    storage::save_csv(&filtered, path)
                } else {
                    storage::save_json(&filtered, path)
                }
            }
            ExportKind::Svg | ExportKind::Png => {
                viz::render_chart_with_font(&self.views.chart, path, 1000, 600, self.config.font_path.as_deref())
            }
        }
    }
}

fn lines(spec: &ChartSpec, axis: Axis) -> Vec<Line> {
    spec.series_on(axis)
        .map(|s| {
            let pts: Vec<[f64; 2]> = s.points().map(|(x, y)| [x as f64, y]).collect();
            Line::new(PlotPoints::new(pts))
                .name(s.name.as_str())
                .color(egui::Color32::from_rgb(s.color.r, s.color.g, s.color.b))
                .width(2.0)
        })
        .collect()
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.config.footer.as_str());
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, self.status_message.as_str());
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, self.error_message.as_str());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(self.config.heading.as_str());
                ui.label(self.config.description.as_str());
                ui.add_space(10.0);

                let mut changed = self.controls(ui);
                ui.add_space(10.0);
                self.summary_cards(ui);
                ui.add_space(10.0);
                self.chart(ui);
                ui.add_space(10.0);
                changed |= self.table(ui);

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label("Export:");
                    for (kind, label) in [
                        (ExportKind::Csv, "CSV"),
                        (ExportKind::Json, "JSON"),
                        (ExportKind::Svg, "Chart SVG"),
                        (ExportKind::Png, "Chart PNG"),
                    ] {
                        if ui.button(label).clicked() {
                            self.export(kind);
                        }
                    }
                });

                if changed {
                    self.refresh();
                }
            });
        });
    }
}
