//! Sticky header
//!
//! Transparent over the hero, solid once the page has scrolled past a
//! threshold. The controller only reacts to threshold crossings, and a
//! transition to the state it is already in does nothing.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::Controller;
use crate::anim::{EasingType, TweenSpec};
use crate::config::HeaderConfig;
use crate::dom::{ElementId, ElementKind, Property};
use crate::runtime::{OwnerId, Runtime, RuntimeEvent};
use crate::trigger::{Anchor, Edge, TriggerAction, TriggerEventKind, TriggerId, TriggerPosition, TriggerSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderVisualState {
    Transparent,
    Solid,
}

#[derive(Debug)]
pub struct HeaderController {
    owner: OwnerId,
    header: Option<ElementId>,
    /// Logo and nav links, recolored with the header
    texts: Vec<ElementId>,
    state: HeaderVisualState,
    trigger: Option<TriggerId>,
    config: HeaderConfig,
}

impl HeaderController {
    pub fn mount(rt: &mut Runtime, config: &HeaderConfig) -> Self {
        let owner = rt.allocate_owner();
        let doc = rt.document();
        let header = doc.header();
        let texts = header
            .map(|h| {
                doc.descendants(h)
                    .into_iter()
                    .filter(|id| {
                        doc.get(*id)
                            .is_some_and(|el| matches!(el.kind, ElementKind::LogoText | ElementKind::NavLink { .. }))
                    })
                    .collect()
            })
            .unwrap_or_default();
        let anchor = doc.main().unwrap_or_else(|| doc.window());

        let mut controller = Self {
            owner,
            header,
            texts,
            state: HeaderVisualState::Transparent,
            trigger: None,
            config: config.clone(),
        };
        controller.apply_immediately(rt);

        // element top meets `threshold` px above the viewport top
        let start = TriggerPosition::new(
            Anchor::at(Edge::Top),
            Anchor::offset(Edge::Top, -controller.config.threshold),
        );
        controller.trigger = Some(rt.register_trigger(
            owner,
            TriggerSpec {
                trigger: anchor,
                start,
                end: None,
                action: TriggerAction::Notify,
            },
        ));

        if rt.scroll_y() >= controller.config.threshold {
            controller.transition_to(rt, HeaderVisualState::Solid);
        }
        controller
    }

    pub fn state(&self) -> HeaderVisualState {
        self.state
    }

    /// Tween toward a visual state; returns false when already there
    ///
    /// Running header tweens are killed first so the latest target wins.
    pub fn transition_to(&mut self, rt: &mut Runtime, state: HeaderVisualState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        debug!(?state, "Header transition");

        let (background, shadow, text) = self.targets();
        let duration = Duration::from_millis(self.config.duration_ms);
        let easing = EasingType::PowerOut(1);

        if let Some(header) = self.header {
            rt.kill_tweens_of(header);
            rt.tween(TweenSpec::to(header, Property::Background, background).duration(duration).easing(easing));
            rt.tween(TweenSpec::to(header, Property::ShadowAlpha, shadow).duration(duration).easing(easing));
        }
        for id in &self.texts {
            rt.kill_tweens_of(*id);
            rt.tween(TweenSpec::to(*id, Property::Color, text).duration(duration).easing(easing));
        }
        true
    }

    fn targets(&self) -> (crate::anim::Rgba, f64, crate::anim::Rgba) {
        match self.state {
            HeaderVisualState::Transparent => (
                self.config.transparent_background,
                0.0,
                self.config.transparent_text,
            ),
            HeaderVisualState::Solid => (self.config.solid_background, 1.0, self.config.solid_text),
        }
    }

    fn apply_immediately(&self, rt: &mut Runtime) {
        let (background, shadow, text) = self.targets();
        if let Some(header) = self.header {
            rt.set(header, Property::Background, background);
            rt.set(header, Property::ShadowAlpha, shadow);
        }
        for id in &self.texts {
            rt.set(*id, Property::Color, text);
        }
    }
}

impl Controller for HeaderController {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    fn handle(&mut self, rt: &mut Runtime, event: &RuntimeEvent) {
        let RuntimeEvent::Trigger(event) = event else {
            return;
        };
        if Some(event.id) != self.trigger {
            return;
        }
        match event.kind {
            TriggerEventKind::Enter | TriggerEventKind::EnterBack => {
                self.transition_to(rt, HeaderVisualState::Solid);
            }
            TriggerEventKind::LeaveBack | TriggerEventKind::Leave => {
                self.transition_to(rt, HeaderVisualState::Transparent);
            }
        }
    }

    fn teardown(&mut self, rt: &mut Runtime) {
        rt.release(self.owner);
        self.trigger = None;
        if let Some(header) = self.header {
            rt.kill_tweens_of(header);
        }
        for id in &self.texts {
            rt.kill_tweens_of(*id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{ms, Rgba, Value};
    use crate::content::SiteContent;
    use crate::page::{test_runtime, Page};

    fn pump(rt: &mut Runtime, header: &mut HeaderController, target: u64) {
        let mut events = rt.take_events();
        loop {
            for event in &events {
                if event.owner() == header.owner() {
                    header.handle(rt, event);
                }
            }
            if rt.now() >= ms(target) && !rt.has_due_timers() {
                break;
            }
            events = rt.step(ms(target));
        }
    }

    fn background(rt: &Runtime, header: &HeaderController) -> Option<Value> {
        rt.document().value(header.header.unwrap(), Property::Background)
    }

    #[test]
    fn test_initial_state() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        let header = HeaderController::mount(&mut rt, &HeaderConfig::default());
        assert_eq!(header.state(), HeaderVisualState::Transparent);
        assert_eq!(background(&rt, &header), Some(Value::Color(Rgba::new(255, 255, 255, 0.0))));
        let logo = header.texts[0];
        assert_eq!(
            rt.document().value(logo, Property::Color),
            Some(Value::Color(Rgba::new(255, 255, 255, 0.8)))
        );
    }

    #[test]
    fn test_threshold_round_trip() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        let mut header = HeaderController::mount(&mut rt, &HeaderConfig::default());

        rt.set_scroll(99.0);
        pump(&mut rt, &mut header, 100);
        assert_eq!(header.state(), HeaderVisualState::Transparent);

        rt.set_scroll(150.0);
        pump(&mut rt, &mut header, 500);
        assert_eq!(header.state(), HeaderVisualState::Solid);
        assert_eq!(background(&rt, &header), Some(Value::Color(Rgba::opaque(255, 255, 255))));
        assert_eq!(
            rt.document().value(header.texts[1], Property::Color),
            Some(Value::Color(Rgba::opaque(0x4A, 0x4A, 0x5A)))
        );

        rt.set_scroll(0.0);
        pump(&mut rt, &mut header, 900);
        assert_eq!(header.state(), HeaderVisualState::Transparent);
        assert_eq!(background(&rt, &header), Some(Value::Color(Rgba::new(255, 255, 255, 0.0))));
    }

    #[test]
    fn test_rapid_oscillation_settles_on_last_state() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        let mut header = HeaderController::mount(&mut rt, &HeaderConfig::default());
        let el = header.header.unwrap();

        for i in 0..10u64 {
            rt.set_scroll(if i % 2 == 0 { 200.0 } else { 50.0 });
            pump(&mut rt, &mut header, i * 20 + 20);
            // never more than one running tween per header property
            assert!(rt.tweens().count_for(el) <= 2);
        }
        assert_eq!(header.state(), HeaderVisualState::Transparent);
        pump(&mut rt, &mut header, 1000);
        assert_eq!(background(&rt, &header), Some(Value::Color(Rgba::new(255, 255, 255, 0.0))));
    }

    #[test]
    fn test_transition_is_idempotent() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        let mut header = HeaderController::mount(&mut rt, &HeaderConfig::default());
        assert!(!header.transition_to(&mut rt, HeaderVisualState::Transparent));
        assert!(rt.tweens().is_empty());
        assert!(header.transition_to(&mut rt, HeaderVisualState::Solid));
        let running = rt.tweens().len();
        assert!(!header.transition_to(&mut rt, HeaderVisualState::Solid));
        assert_eq!(rt.tweens().len(), running);
    }

    #[test]
    fn test_mount_below_threshold_starts_solid() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        rt.set_scroll(400.0);
        let header = HeaderController::mount(&mut rt, &HeaderConfig::default());
        assert_eq!(header.state(), HeaderVisualState::Solid);
    }
}
