//! Visualization: render a [`ChartSpec`] to **SVG** or **PNG**.
//!
//! - Dual Y axes: `euro`/`units` on the left, `cars` on the right
//! - Large magnitudes scaled per axis (`EUR (millions)`)
//! - Title on top, then a horizontal legend strip, then the plot
//!
//! Text needs a TrueType font (the `ab_glyph` path does not discover OS fonts). One is
//! looked up once per process: the configured `font_path`, then the user font
//! directory, then common system locations. Without one the chart is drawn with
//! lines, mesh and axes but no text.

pub mod text;
pub mod util;

use crate::chart::{Axis, ChartSpec, Rgb8};
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use text::{estimate_text_width_px, truncate_to_width};
use util::{choose_axis_scale, compute_label_area_px, scaled_axis_title, tick_label, widen_if_flat};

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_BYTES: OnceLock<Option<&'static [u8]>> = OnceLock::new();

fn font_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(p) = explicit {
        out.push(p.to_path_buf());
    }
    if let Some(dir) = dirs::font_dir() {
        out.push(dir.join("DejaVuSans.ttf"));
    }
    out.extend(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));
    out
}

/// Load the first readable font. Only the first call's `explicit` path is considered.
fn font_bytes(explicit: Option<&Path>) -> Option<&'static [u8]> {
    *FONT_BYTES.get_or_init(|| {
        let found = font_candidates(explicit)
            .into_iter()
            .find_map(|p| std::fs::read(&p).ok().map(|bytes| (p, bytes)));
        match found {
            Some((path, bytes)) => {
                log::info!("chart font: {}", path.display());
                Some(&*Box::leak(bytes.into_boxed_slice()))
            }
            None => {
                log::warn!("no TrueType font found; charts are drawn without text");
                None
            }
        }
    })
}

/// Register the font under "sans-serif" and the chart's font family.
/// Returns whether text can be drawn.
fn ensure_fonts_registered(family: &str, explicit: Option<&Path>) -> bool {
    let Some(bytes) = font_bytes(explicit) else {
        return false;
    };
    ["sans-serif", family].iter().all(|name| {
        plotters::style::register_font(name, plotters::style::FontStyle::Normal, bytes).is_ok()
    })
}

/// Whether a font for chart text is available on this machine.
pub fn font_available(explicit: Option<&Path>) -> bool {
    font_bytes(explicit).is_some()
}

fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Draw the chart to `out_path`; `.svg` selects SVG output, anything else PNG.
pub fn render_chart<P: AsRef<Path>>(spec: &ChartSpec, out_path: P, width: u32, height: u32) -> Result<()> {
    render_chart_with_font(spec, out_path, width, height, None)
}

/// [`render_chart`] with an explicit font file to try first.
pub fn render_chart_with_font<P: AsRef<Path>>(
    spec: &ChartSpec,
    out_path: P,
    width: u32,
    height: u32,
    font_path: Option<&Path>,
) -> Result<()> {
    let with_text = ensure_fonts_registered(&spec.style.font, font_path);
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, spec, with_text)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, spec, with_text)?;
    }
    Ok(())
}

/// Draw the chart into an in-memory SVG document.
pub fn render_chart_svg(spec: &ChartSpec, width: u32, height: u32, font_path: Option<&Path>) -> Result<String> {
    let with_text = ensure_fonts_registered(&spec.style.font, font_path);
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_chart(root, spec, with_text)?;
    }
    Ok(buf)
}

/// Scaled range and axis title for one Y axis.
struct AxisFrame {
    min: f64,
    max: f64,
    scale: f64,
    title: String,
}

impl AxisFrame {
    fn for_axis(spec: &ChartSpec, axis: Axis) -> Self {
        let base_title = match axis {
            Axis::Primary => spec.y_title.as_str(),
            Axis::Secondary => spec.y2_title.as_str(),
        };
        let (min, max) = spec.value_span(axis).unwrap_or((0.0, 1.0));
        let (scale, word) = choose_axis_scale(min.abs().max(max.abs()));
        let (min, max) = widen_if_flat(min / scale, max / scale);
        Self {
            min,
            max,
            scale,
            title: scaled_axis_title(base_title, word),
        }
    }
}

/// Horizontal legend strip above the plot: a short line in the series color, then its name.
fn draw_legend<DB>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec, family: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    const FONT_PX: u32 = 14;
    let (_, h) = area.dim_in_pixel();
    let y = (h / 2) as i32;
    let mut x = 16i32;
    for s in &spec.series {
        let color = rgb(s.color);
        area.draw(&PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2)))
            .map_err(|e| anyhow!("{:?}", e))?;
        let label = s.name.as_str();
        area.draw(&Text::new(label, (x + 30, y - FONT_PX as i32 / 2), (family, FONT_PX)))
            .map_err(|e| anyhow!("{:?}", e))?;
        x += 30 + estimate_text_width_px(label, FONT_PX) as i32 + 24;
    }
    Ok(())
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec, with_text: bool) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;
    const LEGEND_PX: u32 = 28;
    const Y_TICKS: usize = 10;

    root.fill(&rgb(spec.style.paper_bgcolor))
        .map_err(|e| anyhow!("{:?}", e))?;

    let (x_min, x_max) = match spec.year_span() {
        Some((lo, hi)) if lo == hi => (lo as f64 - 1.0, hi as f64 + 1.0),
        Some((lo, hi)) => (lo as f64, hi as f64),
        None => (0.0, 1.0),
    };
    let primary = AxisFrame::for_axis(spec, Axis::Primary);
    let secondary = AxisFrame::for_axis(spec, Axis::Secondary);

    let family = spec.style.font.as_str();
    let (root_w, _) = root.dim_in_pixel();

    // Title, then the legend strip, then the plot.
    let plot_area = if with_text {
        let title = truncate_to_width(&spec.title, 24, root_w.saturating_sub(2 * MARGIN));
        let below_title = root
            .margin(MARGIN / 2, 0, MARGIN, MARGIN)
            .titled(&title, (family, 24))
            .map_err(|e| anyhow!("{:?}", e))?;
        let (legend, rest) = below_title.split_vertically(LEGEND_PX);
        draw_legend(&legend, spec, family)?;
        rest
    } else {
        root.clone()
    };

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(MARGIN);
    if with_text {
        builder
            .set_label_area_size(
                LabelAreaPosition::Left,
                compute_label_area_px(primary.min, primary.max, Y_TICKS, 12),
            )
            .set_label_area_size(
                LabelAreaPosition::Right,
                compute_label_area_px(secondary.min, secondary.max, Y_TICKS, 12),
            )
            .set_label_area_size(LabelAreaPosition::Bottom, 44);
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, primary.min..primary.max)
        .map_err(|e| anyhow!("{:?}", e))?
        .set_secondary_coord(x_min..x_max, secondary.min..secondary.max);

    chart
        .plotting_area()
        .fill(&rgb(spec.style.plot_bgcolor))
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
    let y_label_fmt = |v: &f64| tick_label(*v);
    let x_label_count = ((x_max - x_min) as usize + 1).min(12);

    if with_text {
        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(primary.title.as_str())
            .x_labels(x_label_count)
            .y_labels(Y_TICKS)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style((family, 12))
            .axis_desc_style((family, 16))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        chart
            .configure_secondary_axes()
            .y_desc(secondary.title.as_str())
            .y_labels(Y_TICKS)
            .y_label_formatter(&y_label_fmt)
            .label_style((family, 12))
            .axis_desc_style((family, 16))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    } else {
        chart
            .configure_mesh()
            .x_labels(0)
            .y_labels(0)
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    for s in &spec.series {
        let style = ShapeStyle {
            color: rgb(s.color).to_rgba(),
            filled: false,
            stroke_width: 2,
        };
        match s.axis {
            Axis::Primary => {
                let pts: Vec<(f64, f64)> = s.points().map(|(x, y)| (x as f64, y / primary.scale)).collect();
                chart
                    .draw_series(LineSeries::new(pts, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            Axis::Secondary => {
                let pts: Vec<(f64, f64)> = s.points().map(|(x, y)| (x as f64, y / secondary.scale)).collect();
                chart
                    .draw_secondary_series(LineSeries::new(pts, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
