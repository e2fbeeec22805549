//! Folio Page Harness
//!
//! Drives the motion core the way the rendered page does: lays the sections
//! out, mounts element bounds, binds every section's motion and routes
//! scroll and frame events to it.
//!
//! # Example
//!
//! ```
//! use folio_app::{Page, PageOptions};
//! use folio_config::SiteConfig;
//! use std::time::Duration;
//!
//! let mut page = Page::new(SiteConfig::embedded()?, PageOptions::default());
//! page.mount();
//!
//! let report = page.select_category("Logo Design")?;
//! assert_eq!(report.bound, 4);
//!
//! page.scroll_to(2400.0, Duration::from_millis(16));
//! page.frame(Duration::from_millis(32));
//! page.teardown();
//! # Ok::<(), folio_app::FolioError>(())
//! ```

pub mod contact;
mod error;
pub mod layout;
pub mod page;
pub mod sections;

pub use contact::{ContactFields, ContactForm, FormError, FormStatus};
pub use error::{FolioError, Result};
pub use layout::{DocumentLayout, LayoutMetrics, SectionBlock};
pub use page::{ElementReport, FrameReport, Page, PageOptions};
pub use sections::{LanguagesMotion, PortfolioMotion, RevealSection, SectionMotion};
