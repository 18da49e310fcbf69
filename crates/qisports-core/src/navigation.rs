//! Routing signals and scroll coordination
//!
//! The router only classifies location changes; pages, the loader and the
//! scroll position react to the classification. Hrefs are resolved against
//! the current location the way a browser resolves link targets.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::anim::{EasingType, TweenSpec};
use crate::config::NavigationConfig;
use crate::dom::Property;
use crate::runtime::Runtime;
use crate::Result;

const BASE_URL: &str = "http://site.local/";

/// Path plus optional in-page anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub hash: Option<String>,
}

impl Location {
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            hash: None,
        }
    }

    /// Resolve an href (`/about`, `#work`, `/#services`, `contact`) against `self`
    pub fn resolve(&self, href: &str) -> Result<Location> {
        let base = Url::parse(BASE_URL)?.join(&self.to_string())?;
        let url = base.join(href.trim())?;
        Ok(Location {
            path: url.path().to_string(),
            hash: url.fragment().filter(|f| !f.is_empty()).map(str::to_string),
        })
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hash {
            Some(hash) => write!(f, "{}#{}", self.path, hash),
            None => write!(f, "{}", self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteChange {
    /// First location after startup
    Initial { to: Location },
    /// Different path; the page changes
    Path { from: Location, to: Location },
    /// Same path with an anchor; scroll within the page
    Anchor { to: Location },
    /// Same path, no anchor
    Unchanged,
}

/// Tracks the current location
#[derive(Debug, Default)]
pub struct Router {
    current: Option<Location>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    pub fn navigate(&mut self, href: &str) -> Result<RouteChange> {
        let base = self.current.clone().unwrap_or_default();
        let to = base.resolve(href)?;

        let change = match self.current.take() {
            None => RouteChange::Initial { to: to.clone() },
            Some(from) if from.path != to.path => RouteChange::Path { from, to: to.clone() },
            Some(_) if to.hash.is_some() => RouteChange::Anchor { to: to.clone() },
            Some(_) => RouteChange::Unchanged,
        };
        debug!(href, location = %to, "Navigate");
        self.current = Some(to);
        Ok(change)
    }
}

/// The only writer of the window scroll position on navigation
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    config: NavigationConfig,
}

impl ScrollCoordinator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Jump to the top of the document
    pub fn reset(&self, rt: &mut Runtime) {
        rt.set_scroll(0.0);
    }

    /// Smooth-scroll so the anchor sits just below the fixed header
    ///
    /// Returns the target scroll offset, or `None` when the anchor does not
    /// exist on the page.
    pub fn scroll_to_anchor(&self, rt: &mut Runtime, anchor: &str) -> Option<f64> {
        let doc = rt.document();
        let Some(target) = doc.find_by_dom_id(anchor) else {
            warn!(anchor, "Anchor not found on page");
            return None;
        };
        let top = doc.layout(target).map(|r| r.top).unwrap_or(0.0);
        let offset = doc.header_height() + self.config.anchor_offset;
        let y = (top - offset).clamp(0.0, rt.max_scroll());

        let window = doc.window();
        rt.kill_property(window, Property::ScrollY);
        rt.tween(
            TweenSpec::to(window, Property::ScrollY, y)
                .duration(Duration::from_millis(self.config.scroll_duration_ms))
                .delay(Duration::from_millis(self.config.scroll_delay_ms))
                .easing(EasingType::PowerInOut(2)),
        );
        debug!(anchor, y, "Scrolling to anchor");
        Some(y)
    }
}
