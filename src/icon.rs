//! icon.rs: teardrop marker glyphs, one colour per category.

use std::collections::HashMap;

use crate::points::Category;

/// Glyph box in pixels.
pub const ICON_SIZE: (u32, u32) = (32, 42);
/// Offset of the teardrop tip from the glyph's top-left corner.
pub const ICON_ANCHOR: (i32, i32) = (16, 42);
/// Offset of the popup from the anchor.
pub const POPUP_ANCHOR: (i32, i32) = (0, -44);

const TEARDROP: &str =
    "M16 0C7.163 0 0 7.163 0 16c0 10 16 26 16 26S32 26 32 16C32 7.163 24.837 0 16 0z";

/// Renderable marker icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Self-contained `<svg>` element.
    pub svg: String,
    pub color: &'static str,
    pub size: (u32, u32),
    pub anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
}

/// Build the glyph for a raw category label.
pub fn create_icon(category: &str) -> Glyph {
    let color = Category::from_label(category).color();
    let id = glow_id(category);
    let (w, h) = ICON_SIZE;

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs><filter id="{id}"><feGaussianBlur stdDeviation="2" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter></defs><path d="{TEARDROP}" fill="{color}" filter="url(#{id})" opacity="0.9"/><circle cx="16" cy="16" r="7" fill="#0A0A0A"/><circle cx="16" cy="16" r="4" fill="{color}"/></svg>"##
    );

    Glyph {
        svg,
        color,
        size: ICON_SIZE,
        anchor: ICON_ANCHOR,
        popup_anchor: POPUP_ANCHOR,
    }
}

/// Filter ids end up in `id="..."` and `url(#...)`, so only keep characters
/// that are safe in both.
fn glow_id(category: &str) -> String {
    let slug: String = category
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if slug.is_empty() {
        "glow-outro".to_string()
    } else {
        format!("glow-{slug}")
    }
}

/// Caches glyphs per category label.
#[derive(Debug, Default)]
pub struct IconFactory {
    cache: HashMap<String, Glyph>,
}

impl IconFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_icon(&mut self, category: &str) -> Glyph {
        self.cache
            .entry(category.to_string())
            .or_insert_with(|| create_icon(category))
            .clone()
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
