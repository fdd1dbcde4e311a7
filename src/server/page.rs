//! Server-rendered dashboard page. Plain HTML forms and links, no scripts.

use super::AppState;
use crate::dashboard::DashboardViews;
use crate::models::{Selection, Unit};
use crate::table::{SortDirection, SortKey, TableColumn};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:0 2em}\
.cards{display:flex;gap:1em}.card{border:1px solid #ccc;border-radius:4px;padding:.5em 1em}\
.card h4{margin:0;font-weight:normal}.card p{margin:.2em 0 0;font-size:1.4em}\
form fieldset{display:inline-block;vertical-align:top;border:1px solid #ddd}\
table{border-collapse:collapse}td,th{padding:2px 10px;border-bottom:1px solid #eee}\
td.num{text-align:right}th a{text-decoration:none}";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn enc(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// Query string reproducing `selection` with the given sort and page.
pub(super) fn view_href(selection: &Selection, sort: &[SortKey], page: usize) -> String {
    let units = selection.units.iter().map(Unit::as_str).collect::<Vec<_>>().join(",");
    let mut href = format!("/?region={}", enc(&selection.region));
    if let Some(c) = selection.country() {
        let _ = write!(href, "&country={}", enc(c));
    }
    let _ = write!(
        href,
        "&units={}&from={}&to={}",
        enc(&units),
        selection.years.start,
        selection.years.end
    );
    if !sort.is_empty() {
        let _ = write!(href, "&sort={}", enc(&SortKey::join(sort)));
    }
    if page > 0 {
        let _ = write!(href, "&page={page}");
    }
    href
}

fn sort_marker(sort: &[SortKey], column: TableColumn) -> &'static str {
    match sort.iter().find(|k| k.column == column).map(|k| k.direction) {
        Some(SortDirection::Asc) => " &#9650;",
        Some(SortDirection::Desc) => " &#9660;",
        None => "",
    }
}

fn controls(out: &mut String, state: &AppState, selection: &Selection) {
    let options = state.dashboard.options();
    out.push_str("<form method=\"get\" action=\"/\"><input type=\"hidden\" name=\"form\" value=\"1\">");

    out.push_str("<fieldset><legend>Region</legend>");
    for name in options.region_names() {
        let checked = if name == selection.region { " checked" } else { "" };
        let _ = write!(
            out,
            "<label><input type=\"radio\" name=\"region\" value=\"{v}\"{checked}> {v}</label><br>",
            v = escape(name)
        );
    }
    out.push_str("</fieldset>");

    out.push_str("<fieldset><legend>Country</legend><select name=\"country\"><option value=\"\">(all)</option>");
    for c in options.countries_for(&selection.region).unwrap_or_default() {
        let selected = if selection.country() == Some(c.as_str()) { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{v}\"{selected}>{v}</option>", v = escape(c));
    }
    out.push_str("</select></fieldset>");

    out.push_str("<fieldset><legend>Units</legend>");
    for unit in &options.units {
        let checked = if selection.units.contains(unit) { " checked" } else { "" };
        let _ = write!(
            out,
            "<label><input type=\"checkbox\" name=\"unit_{u}\" value=\"1\"{checked}> {u}</label><br>",
            u = unit.as_str()
        );
    }
    out.push_str("</fieldset>");

    out.push_str("<fieldset><legend>Years</legend>");
    for (name, current) in [("from", selection.years.start), ("to", selection.years.end)] {
        let _ = write!(out, "<select name=\"{name}\">");
        for y in &options.years.marks {
            let selected = if *y == current { " selected" } else { "" };
            let _ = write!(out, "<option{selected}>{y}</option>");
        }
        out.push_str("</select> ");
    }
    out.push_str("</fieldset> <button type=\"submit\">Apply</button></form>");
}

fn summary_cards(out: &mut String, views: &DashboardViews) {
    out.push_str("<div class=\"cards\">");
    for (label, total) in views.summary.entries() {
        let _ = write!(
            out,
            "<div class=\"card\"><h4>{}</h4><p>{}</p></div>",
            escape(label),
            escape(total)
        );
    }
    out.push_str("</div>");
}

fn table(out: &mut String, selection: &Selection, views: &DashboardViews, sort: &[SortKey], page: usize) {
    let view = &views.table;
    let pages = view.page_count();
    let page = page.min(pages - 1);

    out.push_str("<table><thead><tr>");
    for column in &view.columns {
        let href = view_href(selection, &SortKey::toggle(sort, *column), 0);
        let _ = write!(
            out,
            "<th><a href=\"{}\">{}{}</a></th>",
            escape(&href),
            column.as_str(),
            sort_marker(sort, *column)
        );
    }
    out.push_str("</tr></thead><tbody>");
    for row in view.page(page) {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td></tr>",
            row.year,
            row.unit,
            escape(&row.value)
        );
    }
    out.push_str("</tbody></table><p>");
    if page > 0 {
        let _ = write!(out, "<a href=\"{}\">&laquo; prev</a> ", escape(&view_href(selection, sort, page - 1)));
    }
    let _ = write!(out, "page {} of {}", page + 1, pages);
    if page + 1 < pages {
        let _ = write!(out, " <a href=\"{}\">next &raquo;</a>", escape(&view_href(selection, sort, page + 1)));
    }
    out.push_str("</p>");
}

pub(super) fn render_page(
    state: &AppState,
    selection: &Selection,
    views: &DashboardViews,
    svg: &str,
    sort: &[SortKey],
    page: usize,
) -> String {
    let cfg = &state.config;
    let mut out = String::with_capacity(svg.len() + 16 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape(&cfg.app_title)
    );
    let _ = write!(
        out,
        "<h1>{}</h1><p>{}</p>",
        escape(&cfg.heading),
        escape(&cfg.description)
    );
    controls(&mut out, state, selection);
    summary_cards(&mut out, views);
    let _ = write!(out, "<div class=\"chart\">{svg}</div>");
    table(&mut out, selection, views, sort, page);
    let _ = write!(out, "<footer><p>{}</p></footer></body></html>", escape(&cfg.footer));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearRange;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn href_encodes_names_and_sort() {
        let sel = Selection::new("Asia", YearRange::new(1952, 2007))
            .with_country("Korea, Rep.")
            .with_units([Unit::Cars, Unit::Euro]);
        let href = view_href(&sel, &[SortKey::desc(TableColumn::Value)], 2);
        assert_eq!(
            href,
            "/?region=Asia&country=Korea%2C%20Rep%2E&units=cars%2Ceuro&from=1952&to=2007&sort=value%3Adesc&page=2"
        );
    }
}
