//! The page
//!
//! Owns everything with page lifetime: the layout, the mounted element table,
//! the animation scheduler, the velocity skew loop and the section
//! controllers. The host feeds it scroll positions and frame timestamps.
//!
//! ```ignore
//! let mut page = Page::new(SiteConfig::embedded()?, PageOptions::default());
//! page.mount();
//!
//! // on scroll
//! page.scroll_to(window_scroll_y, now);
//! // on animation frame
//! let frame = page.frame(now);
//! ```

use crate::contact::ContactForm;
use crate::error::{FolioError, Result};
use crate::layout::{DocumentLayout, LayoutMetrics};
use crate::sections::{LanguagesMotion, PortfolioMotion, RevealSection, SectionMotion};
use folio_animation::{AnimationScheduler, MotionProperties};
use folio_config::SiteConfig;
use folio_motion::{
    BindingEvent, BindingState, ElementLookup, ItemKey, MountedElements, RebindReport,
    VelocityController, Viewport,
};
use std::time::Duration;

/// Host-side page parameters
#[derive(Clone, Copy, Debug)]
pub struct PageOptions {
    pub viewport_height: f32,
    pub metrics: LayoutMetrics,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            viewport_height: 900.0,
            metrics: LayoutMetrics::default(),
        }
    }
}

/// Result of one animation frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Skew applied to the page content, in degrees
    pub skew_deg: f32,
    /// Whether any timeline still needs frames
    pub animating: bool,
}

/// Motion state of one bound element
#[derive(Clone, Debug, PartialEq)]
pub struct ElementReport {
    pub section: &'static str,
    pub key: ItemKey,
    pub state: BindingState,
    /// `None` until the entrance has been built
    pub value: Option<MotionProperties>,
}

pub struct Page {
    config: SiteConfig,
    options: PageOptions,
    scheduler: AnimationScheduler,
    layout: DocumentLayout,
    elements: MountedElements,
    velocity: VelocityController,
    skew_deg: f32,
    scroll_y: f32,
    last_frame: Option<Duration>,
    mounted: bool,
    experience: RevealSection,
    languages: LanguagesMotion,
    portfolio: PortfolioMotion,
    contact: RevealSection,
    form: ContactForm,
}

impl Page {
    pub fn new(config: SiteConfig, options: PageOptions) -> Self {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        Self {
            experience: RevealSection::experience(&config, handle.clone()),
            languages: LanguagesMotion::new(&config, handle.clone()),
            portfolio: PortfolioMotion::new(&config, handle.clone()),
            contact: RevealSection::contact(&config, handle),
            velocity: VelocityController::new(config.motion.velocity.to_config()),
            config,
            options,
            scheduler,
            layout: DocumentLayout::default(),
            elements: MountedElements::new(),
            skew_deg: 0.0,
            scroll_y: 0.0,
            last_frame: None,
            mounted: false,
            form: ContactForm::new(),
        }
    }

    /// Lay out the document, bind every section and start the skew loop
    ///
    /// Elements already past their line at scroll 0 reveal on this call.
    pub fn mount(&mut self) -> Vec<BindingEvent> {
        if self.mounted {
            return Vec::new();
        }

        let visible = self.portfolio.visible_for(self.portfolio.active_category());
        self.relayout(&visible);

        let elements = &self.elements;
        let sections: [&mut dyn SectionMotion; 4] = [
            &mut self.experience,
            &mut self.languages,
            &mut self.portfolio,
            &mut self.contact,
        ];
        for section in sections {
            section.mount(elements);
        }
        self.velocity.start();
        self.mounted = true;

        tracing::debug!(
            height = self.layout.total_height(),
            live = self.live_handles(),
            "page mounted"
        );
        self.sync()
    }

    /// Record a scroll position and fire any threshold crossings
    pub fn scroll_to(&mut self, scroll_y: f32, now: Duration) -> Vec<BindingEvent> {
        if !self.mounted {
            return Vec::new();
        }
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll());
        self.velocity.on_scroll(self.scroll_y, now);
        self.sync()
    }

    /// Advance timelines, the skew loop and the contact form by one frame
    pub fn frame(&mut self, now: Duration) -> FrameReport {
        let dt_ms = self
            .last_frame
            .map(|last| now.saturating_sub(last).as_secs_f32() * 1000.0)
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        let animating = self.scheduler.tick_with(dt_ms);
        self.velocity.frame(now, &mut self.skew_deg);
        if self.form.poll(now) {
            tracing::debug!("contact form reset");
        }

        FrameReport {
            skew_deg: self.skew_deg,
            animating,
        }
    }

    /// Filter the portfolio
    ///
    /// The grid is re-laid out and remounted first, then the collection
    /// disposes the old handles and binds the new set. A shorter document
    /// pulls the scroll position back to its new end.
    pub fn select_category(&mut self, category: &str) -> Result<RebindReport> {
        if !self.mounted {
            return Err(FolioError::NotMounted);
        }
        if !self.portfolio.has_category(category) {
            return Err(FolioError::UnknownCategory(category.to_string()));
        }

        let visible = self.portfolio.visible_for(category);
        self.relayout(&visible);
        self.scroll_y = self.scroll_y.min(self.max_scroll());
        let report = self.portfolio.select_category(category, &self.elements);
        self.sync();
        Ok(report)
    }

    /// Submit the contact form; the confirmation clears on a later `frame`
    pub fn submit_contact(&mut self, now: Duration) -> Result<()> {
        self.form.submit(now)?;
        Ok(())
    }

    /// Dispose every handle and stop the skew loop
    ///
    /// Returns the number of handles that were still live. Safe to call twice.
    pub fn teardown(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let sections: [&mut dyn SectionMotion; 4] = [
            &mut self.experience,
            &mut self.languages,
            &mut self.portfolio,
            &mut self.contact,
        ];
        let disposed: usize = sections.into_iter().map(|section| section.teardown()).sum();
        self.velocity.stop(&mut self.skew_deg);
        self.elements.clear();
        self.mounted = false;

        tracing::debug!(disposed, "page torn down");
        disposed
    }

    fn relayout(&mut self, portfolio: &[ItemKey]) {
        self.layout = DocumentLayout::compute(&self.config, portfolio, self.options.metrics);
        self.layout.mount_into(&mut self.elements);
    }

    /// Furthest the viewport can scroll in the current layout
    fn max_scroll(&self) -> f32 {
        (self.layout.total_height() - self.options.viewport_height).max(0.0)
    }

    fn sync(&mut self) -> Vec<BindingEvent> {
        let viewport = self.viewport();
        let elements = &self.elements;
        let sections: [&mut dyn SectionMotion; 4] = [
            &mut self.experience,
            &mut self.languages,
            &mut self.portfolio,
            &mut self.contact,
        ];
        sections
            .into_iter()
            .flat_map(|section| section.sync(&viewport, elements))
            .collect()
    }

    /// Sections in page order
    pub fn sections(&self) -> [&dyn SectionMotion; 4] {
        [&self.experience, &self.languages, &self.portfolio, &self.contact]
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_y, self.options.viewport_height)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn elements(&self) -> &dyn ElementLookup {
        &self.elements
    }

    pub fn portfolio(&self) -> &PortfolioMotion {
        &self.portfolio
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn skew_deg(&self) -> f32 {
        self.skew_deg
    }

    pub fn velocity(&self) -> &VelocityController {
        &self.velocity
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn live_handles(&self) -> usize {
        self.sections().iter().map(|s| s.live_handles()).sum()
    }

    /// Motion state of every bound element, in page order
    pub fn element_reports(&self) -> Vec<ElementReport> {
        let mut reports = Vec::new();
        for section in self.sections() {
            let registry = section.registry();
            for handle in section.handles() {
                let Some(key) = registry.key(handle) else {
                    continue;
                };
                reports.push(ElementReport {
                    section: section.name(),
                    key: key.clone(),
                    state: registry.state(handle),
                    value: registry.value(handle),
                });
            }
        }
        reports
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.teardown();
    }
}
