//! Site content models
//!
//! One table per section, in the order they appear on the page:
//! `[site]`, `[experience]`, `[languages]`, `[portfolio]`, `[contact]`,
//! `[motion]`.

use crate::error::{ConfigError, Result};
use crate::motion::MotionSettings;
use folio_motion::{Categorized, ItemKey, ProgressSpec, ALL_CATEGORY};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::Path;

/// Complete site configuration
#[derive(Clone, Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteMeta,
    pub experience: ExperienceSection,
    pub languages: LanguagesSection,
    pub portfolio: PortfolioSection,
    pub contact: ContactSection,
    #[serde(default)]
    pub motion: MotionSettings,
}

/// Page metadata
#[derive(Clone, Debug, Deserialize)]
pub struct SiteMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            language: default_language(),
        }
    }
}

/// Label and two-part heading shared by every section
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SectionHeading {
    /// Small caps label above the heading, e.g. `PORTFOLIO`
    pub label: String,
    pub heading: String,
    /// Highlighted tail of the heading
    #[serde(default)]
    pub accent: String,
}

impl SectionHeading {
    pub fn full(&self) -> String {
        format!("{}{}", self.heading, self.accent)
    }
}

// =============================================================================
// Experience
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct ExperienceSection {
    #[serde(flatten)]
    pub heading: SectionHeading,
    #[serde(default)]
    pub entries: Vec<ExperienceEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub organization: String,
    pub period: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contributions: Vec<String>,
}

impl ExperienceEntry {
    pub fn key(&self) -> ItemKey {
        ItemKey::scoped("experience", &slugify(&self.organization))
    }
}

// =============================================================================
// Languages
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct LanguagesSection {
    #[serde(flatten)]
    pub heading: SectionHeading,
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Language {
    pub name: String,
    pub level: String,
    /// Declared proficiency; rendered as the bar's `data-width`
    pub percentage: f32,
    #[serde(default)]
    pub flag: String,
}

impl Language {
    /// Key of the language card
    pub fn card_key(&self) -> ItemKey {
        ItemKey::scoped("languages", &slugify(&self.name))
    }

    /// Key of the card's progress bar
    pub fn bar_key(&self) -> ItemKey {
        ItemKey::scoped("languages", &format!("{}/bar", slugify(&self.name)))
    }

    /// Width attribute as the renderer writes it, e.g. `"85%"`
    pub fn data_width(&self) -> String {
        format!("{}%", self.percentage)
    }

    pub fn progress(&self) -> ProgressSpec {
        ProgressSpec::from_data_width(&self.data_width())
    }
}

// =============================================================================
// Portfolio
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct PortfolioSection {
    #[serde(flatten)]
    pub heading: SectionHeading,
    /// Filter buttons in display order; `"All"` shows everything
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub items: Vec<PortfolioItem>,
}

fn default_categories() -> Vec<String> {
    vec![ALL_CATEGORY.to_string()]
}

impl PortfolioSection {
    /// Number of items shown under `category`
    pub fn count_in(&self, category: &str) -> usize {
        self.items
            .iter()
            .filter(|item| category == ALL_CATEGORY || item.category == category)
            .count()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stable identifier; defaults to the image file stem
    #[serde(default)]
    pub slug: Option<String>,
}

impl PortfolioItem {
    pub fn slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => Path::new(&self.image)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(slugify)
                .unwrap_or_else(|| slugify(&self.title)),
        }
    }
}

impl Categorized for PortfolioItem {
    fn item_key(&self) -> ItemKey {
        ItemKey::scoped("portfolio", &self.slug())
    }

    fn category(&self) -> &str {
        &self.category
    }
}

// =============================================================================
// Contact
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct ContactSection {
    #[serde(flatten)]
    pub heading: SectionHeading,
    #[serde(default)]
    pub description: String,
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub availability: String,
}

impl ContactSection {
    /// Revealed blocks in document order: the heading, the info column
    /// (email, LinkedIn, location and availability cards) and the form
    pub fn element_keys(&self) -> Vec<ItemKey> {
        ["header", "info", "form"]
            .iter()
            .map(|name| ItemKey::scoped("contact", name))
            .collect()
    }
}

// =============================================================================
// Loading
// =============================================================================

const DEFAULT_SITE: &str = include_str!("default_site.toml");

impl SiteConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(
            path = %path.display(),
            items = config.portfolio.items.len(),
            "loaded site config"
        );
        Ok(config)
    }

    /// The bundled site
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_SITE)
    }

    /// Raw text of the bundled site, for `folio check` and as a template
    pub fn embedded_source() -> &'static str {
        DEFAULT_SITE
    }

    /// Check cross-field rules serde cannot express
    pub fn validate(&self) -> Result<()> {
        let categories: FxHashSet<&str> = self
            .portfolio
            .categories
            .iter()
            .map(String::as_str)
            .collect();
        if !categories.contains(ALL_CATEGORY) {
            return Err(ConfigError::Invalid(format!(
                "portfolio.categories must include \"{ALL_CATEGORY}\""
            )));
        }

        let mut slugs = FxHashSet::default();
        for item in &self.portfolio.items {
            if item.category == ALL_CATEGORY || !categories.contains(item.category.as_str()) {
                return Err(ConfigError::UnknownCategory {
                    item: item.title.clone(),
                    category: item.category.clone(),
                });
            }
            if !slugs.insert(item.slug()) {
                return Err(ConfigError::DuplicateKey {
                    section: "portfolio",
                    key: item.slug(),
                });
            }
        }

        unique_keys("experience", self.experience.entries.iter().map(ExperienceEntry::key))?;
        unique_keys("languages", self.languages.languages.iter().map(Language::card_key))?;

        for language in &self.languages.languages {
            if !(0.0..=100.0).contains(&language.percentage) {
                tracing::warn!(
                    language = %language.name,
                    percentage = language.percentage,
                    "proficiency outside 0-100, bar will be clamped"
                );
            }
        }

        self.motion.velocity.check().map_err(ConfigError::Invalid)
    }
}

fn unique_keys(section: &'static str, keys: impl Iterator<Item = ItemKey>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(ConfigError::DuplicateKey {
                section,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Lowercase ASCII words joined by dashes
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
