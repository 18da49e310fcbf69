//! Scroll triggers
//!
//! A trigger binds an element's position relative to the viewport to an
//! action: scrubbed channels whose progress follows the scroll position,
//! tweens played the first time the element enters, or enter/leave
//! notifications delivered to the owning controller.
//!
//! Positions use the `"<element edge> <viewport edge>"` notation, e.g.
//! `"top bottom"` (element top meets viewport bottom), `"top 85%"` or
//! `"top top-=100"`.

use std::fmt;
use std::str::FromStr;

use crate::anim::timing::range_progress;
use crate::anim::{EasingType, TweenSpec, Value};
use crate::dom::{Document, ElementId, Property, Rect};
use crate::runtime::OwnerId;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Percent(f64),
    Pixels(f64),
}

impl Edge {
    /// Offset of this edge from the start of an extent
    pub fn resolve(&self, extent: f64) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent / 2.0,
            Edge::Bottom => extent,
            Edge::Percent(p) => extent * p / 100.0,
            Edge::Pixels(px) => *px,
        }
    }
}

/// An edge plus a relative pixel offset (`top+=100`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub edge: Edge,
    pub offset: f64,
}

impl Anchor {
    pub const fn at(edge: Edge) -> Self {
        Self { edge, offset: 0.0 }
    }

    pub const fn offset(edge: Edge, offset: f64) -> Self {
        Self { edge, offset }
    }

    pub fn resolve(&self, extent: f64) -> f64 {
        self.edge.resolve(extent) + self.offset
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTriggerPosition(s.to_string());

        let (base, offset) = if let Some((base, rest)) = s.split_once("+=") {
            (base, rest.parse::<f64>().map_err(|_| invalid())?)
        } else if let Some((base, rest)) = s.split_once("-=") {
            (base, -rest.parse::<f64>().map_err(|_| invalid())?)
        } else {
            (s, 0.0)
        };

        let edge = match base {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            other => {
                if let Some(p) = other.strip_suffix('%') {
                    Edge::Percent(p.parse().map_err(|_| invalid())?)
                } else if let Some(px) = other.strip_suffix("px") {
                    Edge::Pixels(px.parse().map_err(|_| invalid())?)
                } else {
                    Edge::Pixels(other.parse().map_err(|_| invalid())?)
                }
            }
        };
        Ok(Anchor { edge, offset })
    }
}

/// Where a trigger starts or ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPosition {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPosition {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Element edge meets viewport edge, no offsets
    pub const fn edges(element: Edge, viewport: Edge) -> Self {
        Self::new(Anchor::at(element), Anchor::at(viewport))
    }

    /// Scroll offset at which the element anchor meets the viewport anchor
    pub fn resolve(&self, rect: Rect, viewport_height: f64) -> f64 {
        let element = rect.top + self.element.resolve(rect.height);
        element - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for TriggerPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(TriggerPosition {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(Error::InvalidTriggerPosition(s.to_string())),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edge {
            Edge::Top => write!(f, "top")?,
            Edge::Center => write!(f, "center")?,
            Edge::Bottom => write!(f, "bottom")?,
            Edge::Percent(p) => write!(f, "{}%", p)?,
            Edge::Pixels(px) => write!(f, "{}px", px)?,
        }
        if self.offset > 0.0 {
            write!(f, "+={}", self.offset)?;
        } else if self.offset < 0.0 {
            write!(f, "-={}", -self.offset)?;
        }
        Ok(())
    }
}

impl fmt::Display for TriggerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(u64);

/// A property driven directly by scroll progress
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubChannel {
    pub target: ElementId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerAction {
    /// Progress between start and end drives the channels; reversible
    Scrub {
        channels: Vec<ScrubChannel>,
        easing: EasingType,
    },
    /// Tweens started the first time the start is crossed; never reversed
    PlayOnce(Vec<TweenSpec>),
    /// Crossing events are reported to the owner
    Notify,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSpec {
    pub trigger: ElementId,
    pub start: TriggerPosition,
    pub end: Option<TriggerPosition>,
    pub action: TriggerAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEventKind {
    /// Scrolled forward past the start
    Enter,
    /// Scrolled forward past the end
    Leave,
    /// Scrolled back above the end
    EnterBack,
    /// Scrolled back above the start
    LeaveBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub id: TriggerId,
    pub owner: OwnerId,
    pub kind: TriggerEventKind,
}

#[derive(Debug, Clone)]
struct Registration {
    id: TriggerId,
    owner: OwnerId,
    spec: TriggerSpec,
    past_start: Option<bool>,
    past_end: Option<bool>,
    last_progress: Option<f64>,
    played: bool,
}

/// Output of one evaluation pass
#[derive(Debug, Default)]
pub struct Evaluation {
    pub plays: Vec<TweenSpec>,
    pub events: Vec<TriggerEvent>,
}

#[derive(Debug, Default)]
pub struct TriggerRegistry {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, owner: OwnerId, spec: TriggerSpec) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            owner,
            spec,
            past_start: None,
            past_end: None,
            last_progress: None,
            played: false,
        });
        id
    }

    pub fn kill(&mut self, id: TriggerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    pub fn kill_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.owner != owner);
        before - self.registrations.len()
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    pub fn count_for(&self, owner: OwnerId) -> usize {
        self.registrations.iter().filter(|r| r.owner == owner).count()
    }

    /// Number of registrations bound to an element
    pub fn count_on(&self, element: ElementId) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.spec.trigger == element)
            .count()
    }

    pub fn specs_on(&self, element: ElementId) -> impl Iterator<Item = &TriggerSpec> {
        self.registrations
            .iter()
            .filter(move |r| r.spec.trigger == element)
            .map(|r| &r.spec)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Evaluate every trigger against a scroll position
    ///
    /// Scrub channels are written to the document directly; tweens to play
    /// and events to deliver are returned. Triggers on missing elements are
    /// skipped.
    pub fn evaluate(&mut self, doc: &mut Document, scroll_y: f64, viewport_height: f64) -> Evaluation {
        let mut out = Evaluation::default();

        for reg in &mut self.registrations {
            let Some(rect) = doc.layout(reg.spec.trigger) else {
                continue;
            };
            let start = reg.spec.start.resolve(rect, viewport_height);
            let end = reg.spec.end.map(|e| e.resolve(rect, viewport_height));

            if let TriggerAction::Scrub { channels, easing } = &reg.spec.action {
                let progress = range_progress(scroll_y, start, end.unwrap_or(start));
                if reg.last_progress == Some(progress) {
                    continue;
                }
                reg.last_progress = Some(progress);
                for channel in channels {
                    let value = if progress >= 1.0 {
                        channel.to
                    } else if progress <= 0.0 {
                        channel.from
                    } else {
                        channel.from.lerp(&channel.to, easing.apply(progress))
                    };
                    doc.set_value(channel.target, channel.property, value);
                }
                continue;
            }

            for kind in crossings(reg, scroll_y >= start, end.map(|e| scroll_y >= e)) {
                match &reg.spec.action {
                    TriggerAction::PlayOnce(tweens) => {
                        if kind == TriggerEventKind::Enter && !reg.played {
                            reg.played = true;
                            out.plays.extend(tweens.iter().cloned());
                        }
                    }
                    TriggerAction::Notify => out.events.push(TriggerEvent {
                        id: reg.id,
                        owner: reg.owner,
                        kind,
                    }),
                    TriggerAction::Scrub { .. } => {}
                }
            }
        }

        out
    }
}

/// Crossing events since the previous evaluation, in scroll order
fn crossings(reg: &mut Registration, past_start: bool, past_end: Option<bool>) -> Vec<TriggerEventKind> {
    let mut forward = Vec::new();
    let mut backward = Vec::new();

    if reg.past_start != Some(past_start) {
        if past_start {
            forward.push(TriggerEventKind::Enter);
        } else if reg.past_start == Some(true) {
            backward.push(TriggerEventKind::LeaveBack);
        }
        reg.past_start = Some(past_start);
    }

    if let Some(past_end) = past_end {
        if reg.past_end != Some(past_end) {
            if past_end {
                forward.push(TriggerEventKind::Leave);
            } else if reg.past_end == Some(true) {
                backward.insert(0, TriggerEventKind::EnterBack);
            }
            reg.past_end = Some(past_end);
        }
    }

    forward.extend(backward);
    forward
}
