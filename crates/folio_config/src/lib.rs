//! Folio Config
//!
//! Typed site configuration loaded from TOML. The bundled site is available
//! through [`SiteConfig::embedded`]; [`SiteConfig::load`] reads a file with
//! the same layout.

pub mod error;
pub mod motion;
pub mod site;

pub use error::{ConfigError, Result};
pub use motion::{MotionSettings, ThresholdSettings, VelocitySettings};
pub use site::{
    slugify, ContactSection, ExperienceEntry, ExperienceSection, Language, LanguagesSection,
    PortfolioItem, PortfolioSection, SectionHeading, SiteConfig, SiteMeta,
};
