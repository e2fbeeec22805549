//! End-to-end scroll scenarios for the motion core

use folio_animation::{AnimationScheduler, StaggerConfig, StaggerIndex};
use folio_motion::*;
use std::time::Duration;

const VIEWPORT_HEIGHT: f32 = 900.0;

struct Work {
    slug: &'static str,
    category: &'static str,
}

impl Categorized for Work {
    fn item_key(&self) -> ItemKey {
        ItemKey::scoped("portfolio", self.slug)
    }

    fn category(&self) -> &str {
        self.category
    }
}

fn master() -> Vec<Work> {
    [
        ("requin-brand", "Brand Design"),
        ("the-foreshadow-logo", "Logo Design"),
        ("pitch-deck", "Presentation Design"),
        ("mcc-logo", "Logo Design"),
        ("football-poster", "Sports Design"),
        ("mcc-ai-logo", "Logo Design"),
        ("concept-art", "Art & Concept"),
        ("finish-the-juice-logo", "Logo Design"),
    ]
    .into_iter()
    .map(|(slug, category)| Work { slug, category })
    .collect()
}

/// Three-column grid starting at `top`, rows 400px apart
fn mount_grid(elements: &mut MountedElements, keys: &[ItemKey], top: f32) {
    elements.clear();
    for (i, key) in keys.iter().enumerate() {
        let row = (i / 3) as f32;
        elements.mount(key.clone(), ElementBounds::new(top + row * 400.0, 360.0));
    }
}

fn grid_spec() -> RevealSpec {
    RevealSpec::new()
        .offset(0.0, 80.0)
        .scale(0.9)
        .stagger(StaggerConfig::new(100.0).index(StaggerIndex::Cyclic(3)))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("folio_motion=trace")
        .with_test_writer()
        .try_init();
}

#[test]
fn logo_filter_plays_each_logo_once() {
    init_tracing();
    let scheduler = AnimationScheduler::new();
    let mut registry = AnimationRegistry::new("portfolio", scheduler.handle());
    let mut elements = MountedElements::new();
    let mut grid = FilterableCollection::new(grid_spec());
    let master = master();

    mount_grid(&mut elements, &FilterState::filtered(ALL_CATEGORY, &master), 3000.0);
    grid.set_category(&mut registry, ALL_CATEGORY, &master, &elements);

    let logos = FilterState::filtered("Logo Design", &master);
    mount_grid(&mut elements, &logos, 3000.0);
    let report = grid.set_category(&mut registry, "Logo Design", &master, &elements);

    let slugs: Vec<&str> = grid.visible().iter().map(ItemKey::as_str).collect();
    assert_eq!(
        slugs,
        [
            "portfolio/the-foreshadow-logo",
            "portfolio/mcc-logo",
            "portfolio/mcc-ai-logo",
            "portfolio/finish-the-juice-logo",
        ]
    );
    assert_eq!(report.bound, 4);
    assert_eq!(report.disposed, 8);

    // Scroll down through the grid in small steps
    let mut scroll = 0.0;
    while scroll <= 4000.0 {
        registry.sync(&Viewport::new(scroll, VIEWPORT_HEIGHT), &elements);
        scheduler.tick_with(16.0);
        scroll += 120.0;
    }

    for handle in grid.handles() {
        assert_eq!(registry.plays(*handle), 1);
        assert_eq!(registry.reverses(*handle), 0);
    }

    // Cyclic stagger: fourth item starts a new row at delay 0
    let delays: Vec<f32> = grid
        .handles()
        .iter()
        .map(|h| registry.snapshot(*h).unwrap().total_ms - 600.0)
        .collect();
    assert_eq!(delays, [0.0, 100.0, 200.0, 0.0]);
}

#[test]
fn scrolling_back_reverses_the_section() {
    let scheduler = AnimationScheduler::new();
    let mut registry = AnimationRegistry::new("contact", scheduler.handle());
    let mut elements = MountedElements::new();
    let keys: Vec<ItemKey> = ["email", "linkedin", "location"]
        .iter()
        .map(|item| ItemKey::scoped("contact", item))
        .collect();
    for (i, key) in keys.iter().enumerate() {
        elements.mount(key.clone(), ElementBounds::new(2000.0 + 100.0 * i as f32, 80.0));
    }

    let spec = RevealSpec::new().offset(0.0, 50.0);
    let handles = bind_section(&mut registry, &keys, &spec, &elements);

    registry.sync(&Viewport::new(2000.0, VIEWPORT_HEIGHT), &elements);
    for _ in 0..60 {
        scheduler.tick_with(16.0);
    }
    for handle in &handles {
        let value = registry.value(*handle).unwrap();
        assert!((value.opacity.unwrap() - 1.0).abs() < 1e-3);
    }

    let events = registry.sync(&Viewport::new(0.0, VIEWPORT_HEIGHT), &elements);
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.action == BindingAction::Reverse));

    for _ in 0..60 {
        scheduler.tick_with(16.0);
    }
    for handle in &handles {
        assert_eq!(registry.state(*handle), BindingState::Reversed);
        assert_eq!(registry.value(*handle).unwrap().opacity, Some(0.0));
        assert_eq!(registry.plays(*handle), 1);
    }
}

#[test]
fn rapid_filter_changes_leave_one_subscription_per_item() {
    let scheduler = AnimationScheduler::new();
    let mut registry = AnimationRegistry::new("portfolio", scheduler.handle());
    let mut elements = MountedElements::new();
    let mut grid = FilterableCollection::new(grid_spec());
    let master = master();

    for category in [ALL_CATEGORY, "Logo Design", "Logo Design", "Brand Design", ALL_CATEGORY] {
        let visible = FilterState::filtered(category, &master);
        mount_grid(&mut elements, &visible, 1000.0);
        grid.set_category(&mut registry, category, &master, &elements);

        assert_eq!(registry.live_count(), visible.len());
        for key in &visible {
            assert_eq!(registry.subscriptions_for(key), 1);
        }
    }
}

#[test]
fn teardown_mid_animation_is_quiet() {
    let scheduler = AnimationScheduler::new();
    let mut registry = AnimationRegistry::new("languages", scheduler.handle());
    let mut elements = MountedElements::new();
    let bar = ItemKey::scoped("languages", "bengali/bar");
    elements.mount(bar.clone(), ElementBounds::new(500.0, 8.0));

    let spec = ProgressSpec::from_data_width("100%");
    let handle = bind_progress(&mut registry, &bar, &spec, &elements);
    registry.sync(&Viewport::new(0.0, VIEWPORT_HEIGHT), &elements);
    scheduler.tick_with(200.0);
    assert!(scheduler.has_active_animations());

    elements.unmount(&bar);
    assert_eq!(registry.teardown(), 1);
    assert!(!registry.dispose(handle));
    assert_eq!(registry.dispose_all(&[handle, handle]), 0);
    assert!(!scheduler.has_active_animations());
}

#[test]
fn velocity_converges_after_idle() {
    let mut controller = VelocityController::new(VelocityConfig::default());
    let mut skew = 0.0_f32;
    controller.start();

    let mut now = Duration::ZERO;
    let frame = Duration::from_millis(16);
    for step in 0..20 {
        controller.on_scroll(step as f32 * 60.0, now);
        controller.frame(now, &mut skew);
        now += frame;
    }
    assert!(skew > 0.5 && skew <= 3.0);

    for _ in 0..300 {
        controller.frame(now, &mut skew);
        now += frame;
    }
    assert_eq!(controller.phase(), SkewPhase::Idle);
    assert!(skew.abs() < 1e-3);

    controller.stop(&mut skew);
    assert_eq!(skew, 0.0);
}
