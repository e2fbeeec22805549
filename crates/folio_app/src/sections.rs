//! Section motion controllers
//!
//! Each animated section owns one `AnimationRegistry` and knows which of its
//! elements get which motion. The page drives all of them through
//! `SectionMotion`.

use folio_animation::{SchedulerHandle, StaggerConfig, StaggerIndex};
use folio_config::{PortfolioItem, SiteConfig};
use folio_motion::{
    bind_progress, bind_section, AnimationHandle, AnimationRegistry, BindingEvent, ElementLookup,
    FilterState, FilterableCollection, ItemKey, ProgressSpec, RebindReport, RevealSpec, Viewport,
};

/// Lifecycle shared by every animated section
pub trait SectionMotion {
    fn name(&self) -> &'static str;

    /// Bind handles for the currently rendered elements
    fn mount(&mut self, elements: &dyn ElementLookup);

    /// Route threshold crossings for this frame
    fn sync(&mut self, viewport: &Viewport, elements: &dyn ElementLookup) -> Vec<BindingEvent> {
        self.registry_mut().sync(viewport, elements)
    }

    /// Dispose every handle; returns how many were live
    fn teardown(&mut self) -> usize;

    fn registry(&self) -> &AnimationRegistry;

    fn registry_mut(&mut self) -> &mut AnimationRegistry;

    /// Handles currently held, in element order
    fn handles(&self) -> Vec<AnimationHandle>;

    fn live_handles(&self) -> usize {
        self.registry().live_count()
    }
}

// =============================================================================
// Plain reveal sections (experience, contact)
// =============================================================================

/// A section that reveals a fixed list of elements
#[derive(Debug)]
pub struct RevealSection {
    name: &'static str,
    registry: AnimationRegistry,
    keys: Vec<ItemKey>,
    spec: RevealSpec,
    handles: Vec<AnimationHandle>,
}

impl RevealSection {
    pub fn new(
        name: &'static str,
        scheduler: SchedulerHandle,
        keys: Vec<ItemKey>,
        spec: RevealSpec,
    ) -> Self {
        Self {
            name,
            registry: AnimationRegistry::new(name, scheduler),
            keys,
            spec,
            handles: Vec::new(),
        }
    }

    /// Cards slide in from alternating sides with a slight turn
    pub fn experience(config: &SiteConfig, scheduler: SchedulerHandle) -> Self {
        let motion = &config.motion;
        let spec = RevealSpec::new()
            .offset(-100.0, 0.0)
            .rotation(-15.0)
            .alternating()
            .duration(motion.experience_ms)
            .easing(motion.easing)
            .stagger(StaggerConfig::none())
            .threshold(motion.thresholds.experience);
        let keys = config.experience.entries.iter().map(|e| e.key()).collect();
        Self::new("experience", scheduler, keys, spec)
    }

    /// Contact elements rise in one after another
    pub fn contact(config: &SiteConfig, scheduler: SchedulerHandle) -> Self {
        let motion = &config.motion;
        let spec = RevealSpec::new()
            .offset(0.0, 50.0)
            .duration(motion.reveal_ms)
            .easing(motion.easing)
            .stagger(StaggerConfig::new(motion.stagger_ms))
            .threshold(motion.thresholds.reveal);
        Self::new("contact", scheduler, config.contact.element_keys(), spec)
    }

    pub fn spec(&self) -> &RevealSpec {
        &self.spec
    }
}

impl SectionMotion for RevealSection {
    fn name(&self) -> &'static str {
        self.name
    }

    fn mount(&mut self, elements: &dyn ElementLookup) {
        self.teardown();
        self.handles = bind_section(&mut self.registry, &self.keys, &self.spec, elements);
    }

    fn teardown(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        self.registry.dispose_all(&handles)
    }

    fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut AnimationRegistry {
        &mut self.registry
    }

    fn handles(&self) -> Vec<AnimationHandle> {
        self.handles.clone()
    }
}

// =============================================================================
// Languages: card reveal plus one progress bar per card
// =============================================================================

#[derive(Debug)]
pub struct LanguagesMotion {
    registry: AnimationRegistry,
    cards: Vec<ItemKey>,
    card_spec: RevealSpec,
    bars: Vec<(ItemKey, ProgressSpec)>,
    handles: Vec<AnimationHandle>,
}

impl LanguagesMotion {
    pub fn new(config: &SiteConfig, scheduler: SchedulerHandle) -> Self {
        let motion = &config.motion;
        let languages = &config.languages.languages;

        let card_spec = RevealSpec::new()
            .offset(0.0, 60.0)
            .scale(0.9)
            .duration(motion.reveal_ms)
            .easing(motion.easing)
            .stagger(StaggerConfig::new(motion.stagger_ms))
            .threshold(motion.thresholds.reveal);

        let bars = languages
            .iter()
            .map(|language| {
                let spec = language
                    .progress()
                    .duration(motion.progress_ms)
                    .easing(motion.easing)
                    .threshold(motion.thresholds.progress);
                (language.bar_key(), spec)
            })
            .collect();

        Self {
            registry: AnimationRegistry::new("languages", scheduler),
            cards: languages.iter().map(|l| l.card_key()).collect(),
            card_spec,
            bars,
            handles: Vec::new(),
        }
    }

    pub fn bars(&self) -> &[(ItemKey, ProgressSpec)] {
        &self.bars
    }
}

impl SectionMotion for LanguagesMotion {
    fn name(&self) -> &'static str {
        "languages"
    }

    fn mount(&mut self, elements: &dyn ElementLookup) {
        self.teardown();
        let mut handles = bind_section(&mut self.registry, &self.cards, &self.card_spec, elements);
        for (key, spec) in &self.bars {
            handles.push(bind_progress(&mut self.registry, key, spec, elements));
        }
        self.handles = handles;
    }

    fn teardown(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        self.registry.dispose_all(&handles)
    }

    fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut AnimationRegistry {
        &mut self.registry
    }

    fn handles(&self) -> Vec<AnimationHandle> {
        self.handles.clone()
    }
}

// =============================================================================
// Portfolio: filterable grid
// =============================================================================

#[derive(Debug)]
pub struct PortfolioMotion {
    registry: AnimationRegistry,
    collection: FilterableCollection,
    master: Vec<PortfolioItem>,
    categories: Vec<String>,
}

impl PortfolioMotion {
    pub fn new(config: &SiteConfig, scheduler: SchedulerHandle) -> Self {
        let motion = &config.motion;
        let spec = RevealSpec::new()
            .offset(0.0, 80.0)
            .scale(0.9)
            .duration(motion.reveal_ms)
            .easing(motion.easing)
            .stagger(StaggerConfig::new(motion.stagger_ms).index(StaggerIndex::Cyclic(3)))
            .threshold(motion.thresholds.reveal);

        Self {
            registry: AnimationRegistry::new("portfolio", scheduler),
            collection: FilterableCollection::new(spec),
            master: config.portfolio.items.clone(),
            categories: config.portfolio.categories.clone(),
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn active_category(&self) -> &str {
        self.collection.active_category()
    }

    pub fn visible(&self) -> &[ItemKey] {
        self.collection.visible()
    }

    /// Items that `category` would show, in master order
    pub fn visible_for(&self, category: &str) -> Vec<ItemKey> {
        FilterState::filtered(category, &self.master)
    }

    /// Rebind to `category`; the new set must already be mounted
    pub fn select_category(
        &mut self,
        category: &str,
        elements: &dyn ElementLookup,
    ) -> RebindReport {
        self.collection
            .set_category(&mut self.registry, category, &self.master, elements)
    }
}

impl SectionMotion for PortfolioMotion {
    fn name(&self) -> &'static str {
        "portfolio"
    }

    fn mount(&mut self, elements: &dyn ElementLookup) {
        let category = self.collection.active_category().to_string();
        self.select_category(&category, elements);
    }

    fn teardown(&mut self) -> usize {
        self.collection.teardown(&mut self.registry)
    }

    fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut AnimationRegistry {
        &mut self.registry
    }

    fn handles(&self) -> Vec<AnimationHandle> {
        self.collection.handles().to_vec()
    }
}
