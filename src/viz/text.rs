//! Text measurement and truncation.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Shorten `text` so it fits `max_px`, ending in a single ellipsis when cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut kept = text.to_string();
    while !kept.is_empty() && estimate_text_width_px(&kept, font_px) + estimate_text_width_px("…", font_px) > max_px {
        kept.pop();
    }
    if kept.is_empty() {
        return String::new();
    }
    kept.push('…');
    kept
}
