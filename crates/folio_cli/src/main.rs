//! Folio CLI
//!
//! Inspect the site configuration and replay scroll sessions headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_app::{Page, PageOptions};
use folio_config::SiteConfig;
use folio_motion::{BindingState, ALL_CATEGORY};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Portfolio motion tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site config (defaults to the bundled site)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sections, categories and item counts
    Sections,

    /// Scroll through the page and report every element's motion state
    Simulate {
        /// Pixels scrolled per frame
        #[arg(short, long, default_value = "120")]
        step: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Portfolio category to filter by before scrolling
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// Scroll back to the top after reaching the bottom
        #[arg(long)]
        back: bool,

        /// Viewport height in pixels
        #[arg(long, default_value = "900")]
        viewport: f32,
    },

    /// Validate a site config file
    Check {
        /// Config file to validate
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Sections => cmd_sections(&load_site(cli.config.as_deref())?),

        Commands::Simulate {
            step,
            fps,
            category,
            back,
            viewport,
        } => {
            let site = load_site(cli.config.as_deref())?;
            cmd_simulate(site, step, fps, category.as_deref(), back, viewport)
        }

        Commands::Check { path } => cmd_check(&path),
    }
}

fn load_site(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load site config {}", path.display())),
        None => SiteConfig::embedded().context("Bundled site config is invalid"),
    }
}

fn cmd_sections(site: &SiteConfig) -> Result<()> {
    println!("{}", site.site.title);
    println!();
    println!("  {:<12} {:<28} {:>5}", "section", "heading", "items");
    let rows = [
        (&site.experience.heading, site.experience.entries.len()),
        (&site.languages.heading, site.languages.languages.len()),
        (&site.portfolio.heading, site.portfolio.items.len()),
        (&site.contact.heading, site.contact.element_keys().len()),
    ];
    for (heading, count) in rows {
        println!("  {:<12} {:<28} {:>5}", heading.label, heading.full(), count);
    }

    println!();
    println!("  portfolio categories:");
    for category in &site.portfolio.categories {
        println!("    {:<24} {:>3}", category, site.portfolio.count_in(category));
    }
    Ok(())
}

fn cmd_simulate(
    site: SiteConfig,
    step: f32,
    fps: u32,
    category: Option<&str>,
    back: bool,
    viewport: f32,
) -> Result<()> {
    if step.is_nan() || step <= 0.0 {
        anyhow::bail!("--step must be positive, got {step}");
    }
    let fps = fps.max(1);
    let frame = Duration::from_secs_f64(1.0 / f64::from(fps));

    let mut page = Page::new(
        site,
        PageOptions {
            viewport_height: viewport,
            ..PageOptions::default()
        },
    );
    page.mount();

    if let Some(category) = category {
        let report = page
            .select_category(category)
            .with_context(|| format!("Cannot filter by '{category}'"))?;
        info!(
            "Filtered to {}: {} shown, {} removed, {} added",
            category,
            report.bound,
            report.removed.len(),
            report.added.len()
        );
    }

    let bottom = (page.layout().total_height() - viewport).max(0.0);
    let mut now = Duration::ZERO;
    let mut peak_skew: f32 = 0.0;
    let mut stops = Vec::new();
    let mut y = 0.0;
    while y < bottom {
        y = (y + step).min(bottom);
        stops.push(y);
    }
    if back {
        stops.extend(stops.clone().into_iter().rev().skip(1));
        stops.push(0.0);
    }

    for y in stops {
        now += frame;
        for event in page.scroll_to(y, now) {
            debug!("{:>8.0}px  {:?} {}", y, event.action, event.key);
        }
        peak_skew = peak_skew.max(page.frame(now).skew_deg);
    }

    for _ in 0..settle_frames(fps) {
        now += frame;
        page.frame(now);
    }

    println!("{:<12} {:<40} {:<9} value", "section", "element", "state");
    let reports = page.element_reports();
    for report in &reports {
        let value = report
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<40} {:<9} {}",
            report.section,
            report.key.as_str(),
            state_label(report.state),
            value
        );
    }

    let revealed = reports
        .iter()
        .filter(|r| r.state == BindingState::Revealed)
        .count();
    println!();
    println!(
        "{} elements, {} revealed, category {}, peak skew {:.2}deg, final skew {:.3}deg",
        reports.len(),
        revealed,
        page.portfolio().active_category(),
        peak_skew,
        page.skew_deg()
    );

    let disposed = page.teardown();
    debug!("Disposed {} handles", disposed);
    Ok(())
}

/// Frames run after the last scroll so timelines and the skew can settle
fn settle_frames(fps: u32) -> u32 {
    fps.max(1).saturating_mul(2)
}

fn state_label(state: BindingState) -> &'static str {
    match state {
        BindingState::Armed => "armed",
        BindingState::Revealed => "revealed",
        BindingState::Reversed => "reversed",
        BindingState::Disposed => "disposed",
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let site = SiteConfig::load(path).with_context(|| format!("{} is invalid", path.display()))?;

    info!(
        "{} is valid: {} experience entries, {} languages, {} portfolio items in {} categories",
        path.display(),
        site.experience.entries.len(),
        site.languages.languages.len(),
        site.portfolio.items.len(),
        site.portfolio
            .categories
            .iter()
            .filter(|c| c.as_str() != ALL_CATEGORY)
            .count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_frames_cover_two_seconds() {
        assert_eq!(settle_frames(60), 120);
        assert_eq!(settle_frames(0), 2);
        assert_eq!(settle_frames(u32::MAX), u32::MAX);
        assert_eq!(settle_frames(u32::MAX / 2 + 1), u32::MAX);
    }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::parse_from([
            "folio",
            "-v",
            "simulate",
            "--fps",
            "4294967295",
            "-k",
            "Logo Design",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Simulate { fps, category, step, .. } => {
                assert_eq!(fps, u32::MAX);
                assert_eq!(category.as_deref(), Some("Logo Design"));
                assert_eq!(step, 120.0);
            }
            _ => panic!("expected simulate"),
        }
    }
}
