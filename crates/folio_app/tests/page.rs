//! Page-level scroll sessions against the bundled site

use folio_app::{FolioError, FormError, FormStatus, Page, PageOptions, SectionMotion};
use folio_config::SiteConfig;
use folio_motion::{BindingAction, BindingState, ItemKey, ALL_CATEGORY};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

struct Session {
    page: Page,
    now: Duration,
}

impl Session {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("folio_app=debug,folio_motion=debug")
            .with_test_writer()
            .try_init();

        let config = SiteConfig::embedded().unwrap();
        let mut page = Page::new(config, PageOptions::default());
        page.mount();
        Self {
            page,
            now: Duration::ZERO,
        }
    }

    fn scroll(&mut self, y: f32) -> Vec<folio_motion::BindingEvent> {
        self.now += FRAME;
        let events = self.page.scroll_to(y, self.now);
        self.page.frame(self.now);
        events
    }

    fn idle(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.now += FRAME;
            self.page.frame(self.now);
        }
    }

    fn section(&self, name: &str) -> &dyn SectionMotion {
        self.page
            .sections()
            .into_iter()
            .find(|s| s.name() == name)
            .unwrap()
    }
}

#[test]
fn mount_binds_every_section() {
    let session = Session::new();
    let page = &session.page;

    assert!(page.is_mounted());
    assert_eq!(session.section("experience").live_handles(), 4);
    assert_eq!(session.section("languages").live_handles(), 8);
    assert_eq!(session.section("portfolio").live_handles(), 28);
    assert_eq!(session.section("contact").live_handles(), 3);
    assert_eq!(page.live_handles(), 43);

    // Nothing is near the top of the page, so nothing has been built yet
    assert!(page.element_reports().iter().all(|r| r.state == BindingState::Armed));
    assert_eq!(page.scheduler().timeline_count(), 0);
}

#[test]
fn logo_filter_reveals_each_logo_once() {
    let mut session = Session::new();
    let report = session.page.select_category("Logo Design").unwrap();
    assert_eq!(report.disposed, 28);
    assert_eq!(report.bound, 4);
    assert_eq!(report.removed.len(), 24);
    assert_eq!(session.page.portfolio().active_category(), "Logo Design");

    let visible: Vec<&str> = session
        .page
        .portfolio()
        .visible()
        .iter()
        .map(ItemKey::as_str)
        .collect();
    assert_eq!(
        visible,
        [
            "portfolio/the-foreshadow-logo",
            "portfolio/mcc-logo",
            "portfolio/mcc-ai-logo",
            "portfolio/finish-the-juice-logo",
        ]
    );

    let mut plays = 0;
    let mut y = 0.0;
    while y < 9000.0 {
        plays += session
            .scroll(y)
            .iter()
            .filter(|e| e.key.as_str().starts_with("portfolio/") && e.action == BindingAction::Play)
            .count();
        y += 150.0;
    }
    assert_eq!(plays, 4);

    let portfolio = session.section("portfolio");
    for handle in portfolio.handles() {
        assert_eq!(portfolio.registry().plays(handle), 1);
    }
}

#[test]
fn scrolling_back_reverses_experience() {
    let mut session = Session::new();

    let events = session.scroll(3000.0);
    let entered: Vec<_> = events
        .iter()
        .filter(|e| e.key.as_str().starts_with("experience/"))
        .collect();
    assert_eq!(entered.len(), 4);
    assert!(entered.iter().all(|e| e.action == BindingAction::Play));
    session.idle(Duration::from_millis(900));

    let events = session.scroll(0.0);
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.action == BindingAction::Reverse));
    session.idle(Duration::from_millis(900));

    let experience = session.section("experience");
    for handle in experience.handles() {
        assert_eq!(experience.registry().state(handle), BindingState::Reversed);
        assert_eq!(experience.registry().plays(handle), 1);
        let value = experience.registry().value(handle).unwrap();
        assert_eq!(value.opacity, Some(0.0));
        assert_eq!(value.translate_x.map(f32::abs), Some(100.0));
    }
}

#[test]
fn progress_bars_fill_to_their_declared_width() {
    let mut session = Session::new();
    session.scroll(4500.0);
    session.idle(Duration::from_millis(1200));

    let widths: Vec<f32> = session
        .page
        .element_reports()
        .into_iter()
        .filter(|r| r.key.as_str().ends_with("/bar"))
        .filter_map(|r| r.value.and_then(|v| v.width_percent))
        .collect();
    assert_eq!(widths, [100.0, 85.0, 60.0, 40.0]);
}

#[test]
fn velocity_skew_settles_after_scrolling_stops() {
    let mut session = Session::new();
    for step in 1..=20 {
        session.scroll(step as f32 * 80.0);
    }
    assert!(session.page.skew_deg() > 0.5);
    assert!(session.page.skew_deg() <= 3.0);

    session.idle(Duration::from_millis(2000));
    assert!(session.page.skew_deg().abs() < 1e-3);
}

#[test]
fn repeated_filtering_keeps_one_subscription_per_tile() {
    let mut session = Session::new();
    let categories = [
        "Sports Design",
        "Creative Design",
        "Creative Design",
        ALL_CATEGORY,
        "Political Design",
    ];
    for category in categories {
        session.page.select_category(category).unwrap();
        session.scroll(7000.0);

        let portfolio = session.section("portfolio");
        let visible = session.page.portfolio().visible();
        assert_eq!(portfolio.registry().subscription_count(), visible.len());
        for key in visible {
            assert_eq!(portfolio.registry().subscriptions_for(key), 1);
        }
    }
}

#[test]
fn filtering_pulls_scroll_back_inside_shorter_page() {
    let mut session = Session::new();
    session.scroll(100_000.0);
    let bottom = session.page.layout().total_height() - session.page.viewport().height;
    assert_eq!(session.page.scroll_y(), bottom);

    session.page.select_category("Logo Design").unwrap();
    let new_bottom = session.page.layout().total_height() - session.page.viewport().height;
    assert!(new_bottom < bottom);
    assert_eq!(session.page.scroll_y(), new_bottom);
    assert_eq!(session.page.viewport().scroll_y, new_bottom);
}

#[test]
fn empty_contact_submission_is_rejected() {
    let mut session = Session::new();
    let now = session.now;
    assert!(matches!(
        session.page.submit_contact(now),
        Err(FolioError::Form(FormError::MissingField("name")))
    ));
    assert_eq!(session.page.form().status(), FormStatus::Editing);
}

#[test]
fn unknown_category_is_rejected() {
    let mut session = Session::new();
    let err = session.page.select_category("Sculpture").unwrap_err();
    assert!(matches!(err, FolioError::UnknownCategory(ref c) if c == "Sculpture"));
    assert_eq!(session.page.portfolio().active_category(), ALL_CATEGORY);
}

#[test]
fn teardown_disposes_everything_once() {
    let mut session = Session::new();
    session.scroll(3000.0);

    assert_eq!(session.page.teardown(), 43);
    assert_eq!(session.page.teardown(), 0);
    assert_eq!(session.page.live_handles(), 0);
    assert_eq!(session.page.skew_deg(), 0.0);
    assert!(!session.page.scheduler().has_active_animations());

    assert!(session.page.scroll_to(5000.0, Duration::from_secs(10)).is_empty());
    assert!(matches!(
        session.page.select_category(ALL_CATEGORY),
        Err(FolioError::NotMounted)
    ));
}

#[test]
fn contact_form_resets_after_confirmation() {
    let mut session = Session::new();
    session.page.form_mut().edit(|fields| {
        fields.name = "Alam".to_string();
        fields.email = "alam@example.com".to_string();
        fields.subject = "Hello".to_string();
        fields.message = "Open to a chat?".to_string();
    });

    let now = session.now;
    session.page.submit_contact(now).unwrap();
    assert!(matches!(
        session.page.submit_contact(now),
        Err(FolioError::Form(FormError::AlreadySubmitted))
    ));
    session.idle(Duration::from_millis(2900));
    assert!(session.page.form().is_submitted());

    session.idle(Duration::from_millis(200));
    assert_eq!(session.page.form().status(), FormStatus::Editing);
    assert!(session.page.form().fields().name.is_empty());
}
