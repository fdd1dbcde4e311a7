//! Utility functions for visualization: axis scaling, ranges and label gutters.

use super::text::estimate_text_width_px;

/// Pick a single Y-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Axis title with the scale word appended, e.g. `EUR (millions)`.
pub fn scaled_axis_title(title: &str, scale_word: &str) -> String {
    if scale_word.is_empty() {
        title.to_string()
    } else {
        format!("{title} ({scale_word})")
    }
}

/// Widen a degenerate range so Plotters gets a non-empty coordinate span.
pub fn widen_if_flat(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

/// Tick label text for a scaled value; must match what the mesh formatter prints.
pub fn tick_label(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Compute a tight label area width for a Y axis (in pixels),
/// based on the formatted tick labels that will appear.
/// - `ymin_scaled..ymax_scaled`: the **scaled** Y range you pass to Plotters
/// - `ticks`: how many Y labels you plan to show (e.g., 10)
/// - `font_px`: font size used for axis labels (e.g., 12)
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_label_area_px(ymin_scaled: f64, ymax_scaled: f64, ticks: usize, font_px: u32) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin_scaled + (ymax_scaled - ymin_scaled) * t;
        max_px = max_px.max(estimate_text_width_px(&tick_label(v), font_px));
    }

    // Room for tick marks and the rotated axis title.
    let with_padding = max_px.saturating_add(30);
    with_padding.clamp(48, 140)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_follows_magnitude() {
        assert_eq!(choose_axis_scale(950.0), (1.0, ""));
        assert_eq!(choose_axis_scale(12_000.0).1, "thousands");
        assert_eq!(choose_axis_scale(3.5e9).1, "billions");
        assert_eq!(scaled_axis_title("EUR", "millions"), "EUR (millions)");
        assert_eq!(scaled_axis_title("Number", ""), "Number");
    }

    #[test]
    fn flat_range_is_widened() {
        assert_eq!(widen_if_flat(5.0, 5.0), (4.0, 6.0));
        assert_eq!(widen_if_flat(1.0, 2.0), (1.0, 2.0));
    }

    #[test]
    fn label_area_is_clamped() {
        let w = compute_label_area_px(0.0, 1.0, 10, 12);
        assert!((48..=140).contains(&w));
    }
}
