//! Style descriptions and the built-in style catalog.
//!
//! The catalog mirrors the preset templates the service understands; free
//! text is equally valid since the service matches on substrings. The picker
//! filters catalog entries with fuzzy matching as the user types.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// One entry of the built-in style catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStyle {
    /// Display name shown on the picker chip
    pub name: &'static str,

    /// Value submitted as the style description
    pub value: &'static str,

    /// Short hint of the look
    pub blurb: &'static str,
}

/// Styles the service has dedicated templates for.
pub const CATALOG: &[CatalogStyle] = &[
    CatalogStyle {
        name: "Cinematic",
        value: "cinematic",
        blurb: "teal shadows, warm highlights, lifted contrast",
    },
    CatalogStyle {
        name: "Vintage",
        value: "vintage",
        blurb: "faded film tones, warm cast, soft clarity",
    },
    CatalogStyle {
        name: "Dramatic",
        value: "dramatic",
        blurb: "deep blacks, punchy contrast, cool cast",
    },
    CatalogStyle {
        name: "Dreamy",
        value: "dreamy",
        blurb: "airy glow, lifted shadows, gentle contrast",
    },
    CatalogStyle {
        name: "Moody",
        value: "moody",
        blurb: "underexposed, muted color, heavy shadows",
    },
    CatalogStyle {
        name: "Soft",
        value: "soft",
        blurb: "low contrast, bright exposure, pastel tones",
    },
];

/// Fuzzy filter over the style catalog.
pub struct CatalogFilter {
    matcher: Matcher,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Catalog entries matching `query`, best first. An empty query returns
    /// the whole catalog in its defined order.
    pub fn filter(&mut self, query: &str) -> Vec<CatalogStyle> {
        if query.is_empty() {
            return CATALOG.to_vec();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut buf = Vec::new();
        let mut scored: Vec<(u32, CatalogStyle)> = CATALOG
            .iter()
            .filter_map(|style| {
                buf.clear();
                let haystack = Utf32Str::new(style.name, &mut buf);
                pattern
                    .score(haystack, &mut self.matcher)
                    .map(|score| (score, *style))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, style)| style).collect()
    }
}

/// Look up a catalog entry by its submitted value.
#[must_use]
pub fn catalog_style(value: &str) -> Option<CatalogStyle> {
    CATALOG
        .iter()
        .find(|style| style.value.eq_ignore_ascii_case(value))
        .copied()
}
