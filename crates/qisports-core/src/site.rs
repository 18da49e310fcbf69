//! Site orchestrator
//!
//! Owns the runtime and every controller. The header and the loader live
//! for the whole session; the carousel and scroll reveal belong to the
//! current page and are torn down and mounted again on each page change.
//! Hosts drive a `Site` with elapsed time, scroll input, carousel input and
//! navigation, and read the document back for rendering.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::content::SiteContent;
use crate::controllers::{
    CarouselController, Controller, HeaderController, HeaderVisualState, LoaderController, LoaderPhase,
    RevealController,
};
use crate::dom::Document;
use crate::navigation::{Location, RouteChange, Router, ScrollCoordinator};
use crate::page::{build_page, build_shell, Page, Shell};
use crate::runtime::{Runtime, RuntimeEvent, Viewport};
use crate::Result;

/// Observable state change, stamped with the clock time it happened at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub change: Change,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Change {
    Route { location: String },
    Page { page: Page },
    Loader { phase: LoaderPhase },
    Slide { index: usize },
    Header { state: HeaderVisualState },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    page: Page,
    loader: LoaderPhase,
    slide: Option<usize>,
    header: HeaderVisualState,
}

pub struct Site {
    config: AppConfig,
    content: SiteContent,
    rt: Runtime,
    shell: Shell,
    router: Router,
    scroll: ScrollCoordinator,
    page: Page,
    header: HeaderController,
    loader: LoaderController,
    carousel: Option<CarouselController>,
    reveal: Option<RevealController>,
    timeline: Vec<TimelineEntry>,
    snapshot: Snapshot,
}

impl Site {
    /// Start at the home page
    pub fn new(config: AppConfig, content: SiteContent) -> Result<Self> {
        Self::open(config, content, "/")
    }

    /// Start at an arbitrary location; the first location never shows the loader
    pub fn open(config: AppConfig, content: SiteContent, href: &str) -> Result<Self> {
        let viewport = Viewport {
            width: config.viewport.width,
            height: config.viewport.height,
        };
        let mut doc = Document::new();
        let shell = build_shell(&mut doc, &content, viewport, config.viewport.header_height);
        let mut rt = Runtime::new(doc, viewport);

        let header = HeaderController::mount(&mut rt, &config.header);
        let loader = LoaderController::mount(&mut rt, shell.loader, &config.loader);
        let snapshot = Snapshot {
            page: Page::Home,
            loader: loader.phase(),
            slide: None,
            header: header.state(),
        };

        let mut site = Self {
            scroll: ScrollCoordinator::new(&config.navigation),
            config,
            content,
            rt,
            shell,
            router: Router::new(),
            page: Page::Home,
            header,
            loader,
            carousel: None,
            reveal: None,
            timeline: Vec::new(),
            snapshot,
        };
        site.navigate(href)?;
        info!(location = %site.location(), "Site ready");
        Ok(site)
    }

    // --- input ------------------------------------------------------------

    pub fn navigate(&mut self, href: &str) -> Result<RouteChange> {
        let change = self.router.navigate(href)?;
        match &change {
            RouteChange::Initial { to } => {
                self.load_page(to)?;
            }
            RouteChange::Path { to, .. } => {
                self.loader.start(&mut self.rt);
                self.load_page(to)?;
            }
            RouteChange::Anchor { to } => {
                if let Some(hash) = &to.hash {
                    self.scroll.scroll_to_anchor(&mut self.rt, hash);
                }
            }
            RouteChange::Unchanged => {}
        }
        if change != RouteChange::Unchanged {
            self.push(Change::Route {
                location: self.location().to_string(),
            });
        }
        self.settle();
        Ok(change)
    }

    /// Advance the clock by `dt`, firing every timer on its exact deadline
    pub fn advance(&mut self, dt: Duration) {
        let target = self.rt.now() + dt;
        self.advance_to(target);
    }

    pub fn advance_to(&mut self, target: Duration) {
        loop {
            let events = self.rt.step(target);
            self.dispatch(events);
            self.record_changes();
            if self.rt.now() >= target && !self.rt.has_due_timers() {
                break;
            }
        }
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.rt.scroll_by(delta);
        self.settle();
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.rt.set_scroll(y);
        self.settle();
    }

    pub fn next_slide(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.next(&mut self.rt);
        }
        self.settle();
    }

    pub fn previous_slide(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.previous(&mut self.rt);
        }
        self.settle();
    }

    pub fn go_to_slide(&mut self, index: usize) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.go_to_slide(&mut self.rt, index as isize);
        }
        self.settle();
    }

    /// Release every controller registration
    pub fn teardown(&mut self) {
        self.unmount_page();
        self.header.teardown(&mut self.rt);
        self.loader.teardown(&mut self.rt);
        info!("Site torn down");
    }

    // --- state ------------------------------------------------------------

    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    pub fn document(&self) -> &Document {
        self.rt.document()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn now(&self) -> Duration {
        self.rt.now()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn location(&self) -> Location {
        self.router.current().cloned().unwrap_or_default()
    }

    pub fn scroll_y(&self) -> f64 {
        self.rt.scroll_y()
    }

    pub fn max_scroll(&self) -> f64 {
        self.rt.max_scroll()
    }

    pub fn loader_phase(&self) -> LoaderPhase {
        self.loader.phase()
    }

    pub fn header_state(&self) -> HeaderVisualState {
        self.header.state()
    }

    /// Current slide and slide count, when the page has a carousel
    pub fn carousel(&self) -> Option<(usize, usize)> {
        self.carousel
            .as_ref()
            .filter(|c| c.total() > 0)
            .map(|c| (c.current(), c.total()))
    }

    /// True while tweens are running or the loader is up
    pub fn is_animating(&self) -> bool {
        !self.rt.tweens().is_empty() || self.loader.is_visible()
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn take_timeline(&mut self) -> Vec<TimelineEntry> {
        std::mem::take(&mut self.timeline)
    }

    // --- internals --------------------------------------------------------

    fn load_page(&mut self, to: &Location) -> Result<()> {
        let page = Page::from_path(&to.path).unwrap_or_else(|| {
            warn!(path = %to.path, "Unknown route, showing home");
            Page::Home
        });

        self.unmount_page();
        let viewport = self.rt.viewport();
        build_page(
            self.rt.document_mut(),
            self.shell.main,
            page,
            &self.content,
            viewport,
            self.config.viewport.header_height,
        );
        self.page = page;
        self.scroll.reset(&mut self.rt);

        self.carousel = Some(CarouselController::mount(&mut self.rt, &self.config.carousel));
        self.reveal = Some(RevealController::mount(&mut self.rt, &self.config.reveal)?);

        if let Some(hash) = &to.hash {
            self.scroll.scroll_to_anchor(&mut self.rt, hash);
        }
        debug!(?page, "Page loaded");
        Ok(())
    }

    fn unmount_page(&mut self) {
        if let Some(mut carousel) = self.carousel.take() {
            carousel.teardown(&mut self.rt);
        }
        if let Some(mut reveal) = self.reveal.take() {
            reveal.teardown(&mut self.rt);
        }
    }

    /// Deliver events raised outside of `advance`
    fn settle(&mut self) {
        let events = self.rt.take_events();
        self.dispatch(events);
        self.record_changes();
    }

    fn dispatch(&mut self, mut events: Vec<RuntimeEvent>) {
        while !events.is_empty() {
            for event in &events {
                self.route_event(event);
            }
            events = self.rt.take_events();
        }
    }

    fn route_event(&mut self, event: &RuntimeEvent) {
        let owner = event.owner();
        if owner == self.header.owner() {
            self.header.handle(&mut self.rt, event);
            return;
        }
        if owner == self.loader.owner() {
            self.loader.handle(&mut self.rt, event);
            return;
        }
        if let Some(carousel) = self.carousel.as_mut() {
            if carousel.owner() == owner {
                carousel.handle(&mut self.rt, event);
                return;
            }
        }
        if let Some(reveal) = self.reveal.as_mut() {
            if reveal.owner() == owner {
                reveal.handle(&mut self.rt, event);
                return;
            }
        }
        debug!(?owner, "Dropping event for released owner");
    }

    fn push(&mut self, change: Change) {
        self.timeline.push(TimelineEntry {
            at_ms: self.rt.now().as_millis() as u64,
            change,
        });
    }

    fn record_changes(&mut self) {
        let current = Snapshot {
            page: self.page,
            loader: self.loader.phase(),
            slide: self.carousel().map(|(index, _)| index),
            header: self.header.state(),
        };
        let previous = self.snapshot;
        if current.page != previous.page {
            self.push(Change::Page { page: current.page });
        }
        if current.loader != previous.loader {
            self.push(Change::Loader { phase: current.loader });
        }
        if let Some(index) = current.slide {
            if current.slide != previous.slide {
                self.push(Change::Slide { index });
            }
        }
        if current.header != previous.header {
            self.push(Change::Header { state: current.header });
        }
        self.snapshot = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::ms;

    fn site() -> Site {
        Site::new(AppConfig::default(), SiteContent::default()).unwrap()
    }

    fn loader_phases(site: &Site) -> Vec<(u64, LoaderPhase)> {
        site.timeline()
            .iter()
            .filter_map(|e| match e.change {
                Change::Loader { phase } => Some((e.at_ms, phase)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_render_has_no_loader() {
        let mut site = site();
        assert_eq!(site.page(), Page::Home);
        assert_eq!(site.loader_phase(), LoaderPhase::Hidden);
        assert_eq!(site.carousel(), Some((0, 3)));
        site.advance(ms(3000));
        assert!(loader_phases(&site).is_empty());
    }

    #[test]
    fn test_route_change_runs_loader_and_swaps_page() {
        let mut site = site();
        site.scroll_to(900.0);
        let change = site.navigate("/about").unwrap();
        assert!(matches!(change, RouteChange::Path { .. }));
        assert_eq!(site.page(), Page::About);
        assert_eq!(site.scroll_y(), 0.0);
        assert_eq!(site.carousel(), None);

        site.advance(ms(3000));
        assert_eq!(
            loader_phases(&site),
            vec![
                (0, LoaderPhase::Showing),
                (1000, LoaderPhase::Visible),
                (1500, LoaderPhase::Hiding),
                (2200, LoaderPhase::Hidden),
            ]
        );
    }

    #[test]
    fn test_anchor_navigation_scrolls_without_loader() {
        let mut site = site();
        site.navigate("#work").unwrap();
        assert_eq!(site.loader_phase(), LoaderPhase::Hidden);
        site.advance(ms(1000));
        let work = site.document().find_by_dom_id("work").unwrap();
        let top = site.document().layout(work).unwrap().top;
        assert_eq!(site.scroll_y(), top - 100.0);
        assert_eq!(site.header_state(), HeaderVisualState::Solid);
    }

    #[test]
    fn test_path_with_anchor_scrolls_after_load() {
        let mut site = Site::open(AppConfig::default(), SiteContent::default(), "/about").unwrap();
        site.navigate("/#services").unwrap();
        assert_eq!(site.page(), Page::Home);
        assert_eq!(site.loader_phase(), LoaderPhase::Showing);
        site.advance(ms(1000));
        assert!(site.scroll_y() > 0.0);
    }

    #[test]
    fn test_unknown_route_falls_back_to_home() {
        let site = Site::open(AppConfig::default(), SiteContent::default(), "/blog").unwrap();
        assert_eq!(site.page(), Page::Home);
        assert_eq!(site.location().path, "/blog");
    }

    #[test]
    fn test_manual_slide_resets_auto_advance() {
        let mut site = site();
        site.advance(ms(3000));
        site.go_to_slide(1);
        site.advance(ms(4999));
        assert_eq!(site.carousel(), Some((1, 3)));
        site.advance(ms(1));
        assert_eq!(site.carousel(), Some((2, 3)));
    }

    #[test]
    fn test_remount_does_not_duplicate_registrations() {
        let mut site = site();
        let triggers = site.runtime().triggers().len();
        let timers = site.runtime().timers().len();

        site.navigate("/about").unwrap();
        site.navigate("/").unwrap();
        site.advance(ms(5000));
        assert_eq!(site.runtime().triggers().len(), triggers);
        assert_eq!(site.runtime().timers().len(), timers);
    }

    #[test]
    fn test_last_route_wins() {
        let mut site = site();
        site.navigate("/about").unwrap();
        site.advance(ms(1200));
        site.navigate("/contact").unwrap();
        assert_eq!(site.page(), Page::Contact);
        site.advance(ms(1400));
        assert_eq!(site.loader_phase(), LoaderPhase::Visible);
        site.advance(ms(1000));
        assert_eq!(site.loader_phase(), LoaderPhase::Hidden);
    }

    #[test]
    fn test_header_follows_scroll() {
        let mut site = site();
        site.scroll_by(150.0);
        assert_eq!(site.header_state(), HeaderVisualState::Solid);
        site.scroll_by(-100.0);
        assert_eq!(site.header_state(), HeaderVisualState::Transparent);
        let headers: Vec<_> = site
            .timeline()
            .iter()
            .filter(|e| matches!(e.change, Change::Header { .. }))
            .collect();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_timeline_json_shape() {
        let entry = TimelineEntry {
            at_ms: 1500,
            change: Change::Loader { phase: LoaderPhase::Hiding },
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({ "at_ms": 1500, "kind": "loader", "phase": "hiding" })
        );
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut site = site();
        site.navigate("/about").unwrap();
        site.teardown();
        assert!(site.runtime().triggers().is_empty());
        assert!(site.runtime().timers().is_empty());
    }
}
