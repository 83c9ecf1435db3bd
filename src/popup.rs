//! popup.rs: the HTML card shown when a marker is clicked.

use crate::points::{Category, PointOfInterest};

/// Heading colour for labels outside the enumerated categories.
const ACCENT: &str = "#00D4FF";

pub fn popup_html(point: &PointOfInterest) -> String {
    let heading = if Category::is_known(&point.category) {
        point.category_kind().color()
    } else {
        ACCENT
    };
    format!(
        "<div style=\"font-family: 'Inter', sans-serif; min-width: 180px;\">\
         <div style=\"font-weight: 600; color: {heading}; font-size: 0.95rem; margin-bottom: 4px;\">{}</div>\
         <div style=\"font-size: 0.78rem; color: #888; margin-bottom: 4px;\">{}</div>\
         <div style=\"font-size: 0.75rem; color: #666;\">📍 {}</div>\
         </div>",
        escape(&point.name),
        escape(&point.kind),
        escape(&point.address),
    )
}

/// Escape text for HTML bodies and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
