use folio_config::{ConfigError, SiteConfig};
use folio_motion::{Categorized, FilterState, Threshold, ALL_CATEGORY};

const MINIMAL: &str = r#"
[experience]
label = "EXPERIENCE"
heading = "Leadership"

[languages]
label = "LANGUAGES"
heading = "Multilingual"

[portfolio]
label = "PORTFOLIO"
heading = "Works"
categories = ["All", "Logo Design"]

[[portfolio.items]]
title = "One"
category = "Logo Design"
image = "/images/one.png"

[contact]
label = "CONTACT"
heading = "Get In"
email = "someone@example.com"
"#;

#[test]
fn embedded_site_loads() {
    let config = SiteConfig::embedded().unwrap();

    assert_eq!(config.site.title, "Md Asif Khan - Portfolio");
    assert_eq!(config.experience.entries.len(), 4);
    assert_eq!(config.languages.languages.len(), 4);
    assert_eq!(config.portfolio.categories.len(), 8);
    assert_eq!(config.portfolio.items.len(), 28);
    assert_eq!(config.contact.heading.full(), "Get In Touch");
    assert_eq!(config.motion.thresholds.experience, Threshold::new(0.8));
}

#[test]
fn embedded_logo_filter() {
    let config = SiteConfig::embedded().unwrap();
    let logos = FilterState::filtered("Logo Design", &config.portfolio.items);

    let keys: Vec<&str> = logos.iter().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        [
            "portfolio/the-foreshadow-logo",
            "portfolio/mcc-logo",
            "portfolio/mcc-ai-logo",
            "portfolio/finish-the-juice-logo",
        ]
    );
    assert_eq!(config.portfolio.count_in(ALL_CATEGORY), 28);
    assert_eq!(config.portfolio.count_in("Creative Design"), 6);
}

#[test]
fn defaults_fill_optional_tables() {
    let config = SiteConfig::from_toml(MINIMAL).unwrap();
    assert_eq!(config.site.language, "en");
    assert_eq!(config.motion.stagger_ms, 100.0);
    assert_eq!(config.portfolio.items[0].item_key().as_str(), "portfolio/one");
    assert_eq!(config.portfolio.items[0].category(), "Logo Design");
}

#[test]
fn unknown_category_is_rejected() {
    let text = MINIMAL.replace("category = \"Logo Design\"", "category = \"Sculpture\"");
    let err = SiteConfig::from_toml(&text).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownCategory { ref category, .. } if category == "Sculpture"
    ));
}

#[test]
fn duplicate_slug_is_rejected() {
    let text = format!(
        r#"{MINIMAL}
[[portfolio.items]]
title = "Two"
category = "Logo Design"
image = "/other/one.jpg"
"#
    );
    let err = SiteConfig::from_toml(&text).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateKey { section: "portfolio", .. }));
}

#[test]
fn missing_all_category_is_rejected() {
    let text = MINIMAL.replace(
        "categories = [\"All\", \"Logo Design\"]",
        "categories = [\"Logo Design\"]",
    );
    assert!(matches!(SiteConfig::from_toml(&text), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(SiteConfig::from_toml("[experience"), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SiteConfig::load(std::path::Path::new("/nonexistent/folio.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/folio.toml"));
}
