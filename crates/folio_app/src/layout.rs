//! Document layout
//!
//! Fixed block layout standing in for the renderer: sections stack
//! vertically, cards stack inside their section, the portfolio is a grid.
//! Nothing here is responsive; every size comes from `LayoutMetrics`.

use folio_config::SiteConfig;
use folio_motion::{ElementBounds, ItemKey, MountedElements};

/// Fixed sizes, in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Height of a section with no bound motion (hero, about, palette, ...)
    pub static_section: f32,
    /// Vertical padding above and below each section's content
    pub section_padding: f32,
    /// Label plus heading block
    pub heading: f32,
    pub experience_card: f32,
    pub language_card: f32,
    pub language_columns: usize,
    /// Offset of the progress track from the top of its card
    pub progress_offset: f32,
    pub progress_height: f32,
    /// Category filter buttons above the grid
    pub filter_bar: f32,
    pub portfolio_columns: usize,
    pub portfolio_tile: f32,
    pub contact_element: f32,
    pub gap: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            static_section: 900.0,
            section_padding: 96.0,
            heading: 160.0,
            experience_card: 320.0,
            language_card: 220.0,
            language_columns: 2,
            progress_offset: 170.0,
            progress_height: 8.0,
            filter_bar: 80.0,
            portfolio_columns: 3,
            portfolio_tile: 360.0,
            contact_element: 320.0,
            gap: 32.0,
        }
    }
}

/// Vertical extent of one section
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBlock {
    pub name: &'static str,
    pub top: f32,
    pub height: f32,
}

/// Positions of every section and bound element
#[derive(Clone, Debug, Default)]
pub struct DocumentLayout {
    sections: Vec<SectionBlock>,
    elements: Vec<(ItemKey, ElementBounds)>,
}

struct Cursor<'a> {
    layout: &'a mut DocumentLayout,
    metrics: LayoutMetrics,
    y: f32,
}

impl Cursor<'_> {
    fn spacer(&mut self, name: &'static str, height: f32) {
        self.layout.sections.push(SectionBlock {
            name,
            top: self.y,
            height,
        });
        self.y += height;
    }

    /// Lay out a section whose body is `rows` rows of `row_height`
    fn section(&mut self, name: &'static str, extra: f32, rows: usize, row_height: f32) -> f32 {
        let m = self.metrics;
        let body_top = self.y + m.section_padding + m.heading + extra;
        let body = rows as f32 * (row_height + m.gap);
        let height = m.section_padding * 2.0 + m.heading + extra + body;
        self.spacer(name, height);
        body_top
    }

    fn place(&mut self, key: ItemKey, top: f32, height: f32) {
        self.layout.elements.push((key, ElementBounds::new(top, height)));
    }
}

fn rows_for(count: usize, columns: usize) -> usize {
    count.div_ceil(columns.max(1))
}

impl DocumentLayout {
    /// Lay out the page with `portfolio` as the visible grid
    pub fn compute(config: &SiteConfig, portfolio: &[ItemKey], metrics: LayoutMetrics) -> Self {
        let mut layout = Self::default();
        let mut cursor = Cursor {
            layout: &mut layout,
            metrics,
            y: 0.0,
        };
        let row = |height: f32| height + metrics.gap;

        cursor.spacer("hero", metrics.static_section);
        cursor.spacer("about", metrics.static_section);

        let entries = &config.experience.entries;
        let top = cursor.section("experience", 0.0, entries.len(), metrics.experience_card);
        for (i, entry) in entries.iter().enumerate() {
            let card_top = top + i as f32 * row(metrics.experience_card);
            cursor.place(entry.key(), card_top, metrics.experience_card);
        }

        cursor.spacer("palette", metrics.static_section);

        let languages = &config.languages.languages;
        let columns = metrics.language_columns.max(1);
        let rows = rows_for(languages.len(), columns);
        let top = cursor.section("languages", 0.0, rows, metrics.language_card);
        for (i, language) in languages.iter().enumerate() {
            let card_top = top + (i / columns) as f32 * row(metrics.language_card);
            cursor.place(language.card_key(), card_top, metrics.language_card);
            cursor.place(
                language.bar_key(),
                card_top + metrics.progress_offset,
                metrics.progress_height,
            );
        }

        cursor.spacer("finale", metrics.static_section);

        let columns = metrics.portfolio_columns.max(1);
        let rows = rows_for(portfolio.len(), columns);
        let top = cursor.section("portfolio", metrics.filter_bar, rows, metrics.portfolio_tile);
        for (i, key) in portfolio.iter().enumerate() {
            let tile_top = top + (i / columns) as f32 * row(metrics.portfolio_tile);
            cursor.place(key.clone(), tile_top, metrics.portfolio_tile);
        }

        let contact = config.contact.element_keys();
        let top = cursor.section("contact", 0.0, contact.len(), metrics.contact_element);
        for (i, key) in contact.into_iter().enumerate() {
            let block_top = top + i as f32 * row(metrics.contact_element);
            cursor.place(key, block_top, metrics.contact_element);
        }

        cursor.spacer("footer", metrics.static_section / 2.0);

        layout
    }

    pub fn sections(&self) -> &[SectionBlock] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionBlock> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn total_height(&self) -> f32 {
        self.sections.last().map(|s| s.top + s.height).unwrap_or(0.0)
    }

    pub fn bounds(&self, key: &ItemKey) -> Option<ElementBounds> {
        self.elements
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bounds)| *bounds)
    }

    /// Replace the mounted set with this layout's elements
    pub fn mount_into(&self, mounted: &mut MountedElements) {
        mounted.clear();
        for (key, bounds) in &self.elements {
            mounted.mount(key.clone(), *bounds);
        }
    }
}
