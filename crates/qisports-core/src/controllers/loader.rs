//! Page-transition loader
//!
//! Full-screen overlay shown on route changes. One phase timer is pending
//! at a time:
//!
//! ```text
//! Hidden -> Showing -> Visible -> Hiding -> Hidden
//!           |<---------- dwell ---------->|
//! ```
//!
//! A route change in any phase kills the loader tweens, drops the pending
//! timer and starts over from `Showing`.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::Controller;
use crate::anim::{choreography_length, EasingType, TweenSpec};
use crate::config::LoaderConfig;
use crate::dom::Property;
use crate::page::LoaderElements;
use crate::runtime::{OwnerId, Runtime, RuntimeEvent};
use crate::timer::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderPhase {
    Hidden,
    Showing,
    Visible,
    Hiding,
}

#[derive(Debug)]
pub struct LoaderController {
    owner: OwnerId,
    elements: LoaderElements,
    phase: LoaderPhase,
    timer: Option<TimerId>,
    started_at: Duration,
    dwell: Duration,
}

impl LoaderController {
    pub fn mount(rt: &mut Runtime, elements: LoaderElements, config: &LoaderConfig) -> Self {
        Self {
            owner: rt.allocate_owner(),
            elements,
            phase: LoaderPhase::Hidden,
            timer: None,
            started_at: Duration::ZERO,
            dwell: Duration::from_millis(config.dwell_ms),
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != LoaderPhase::Hidden
    }

    /// Show tweens, in the order they were authored
    pub fn show_choreography(&self) -> Vec<TweenSpec> {
        let LoaderElements { overlay, logo, caption } = self.elements;
        let elastic = EasingType::ElasticOut { amplitude: 1.0, period: 0.5 };
        vec![
            TweenSpec::to(overlay, Property::Opacity, 1.0)
                .duration(Duration::from_millis(400))
                .easing(EasingType::PowerInOut(2)),
            TweenSpec::from_to(logo, Property::Scale, 0.8, 1.0)
                .duration(Duration::from_millis(800))
                .delay(Duration::from_millis(200))
                .easing(elastic),
            TweenSpec::from_to(logo, Property::Opacity, 0.0, 1.0)
                .duration(Duration::from_millis(800))
                .delay(Duration::from_millis(200))
                .easing(elastic),
            TweenSpec::from_to(caption, Property::Y, 20.0, 0.0)
                .duration(Duration::from_millis(600))
                .delay(Duration::from_millis(400))
                .easing(EasingType::PowerOut(2)),
            TweenSpec::from_to(caption, Property::Opacity, 0.0, 1.0)
                .duration(Duration::from_millis(600))
                .delay(Duration::from_millis(400))
                .easing(EasingType::PowerOut(2)),
        ]
    }

    pub fn hide_choreography(&self) -> Vec<TweenSpec> {
        let LoaderElements { overlay, logo, caption } = self.elements;
        let power2_in = EasingType::PowerIn(2);
        vec![
            TweenSpec::to(logo, Property::Scale, 0.8)
                .duration(Duration::from_millis(400))
                .easing(power2_in),
            TweenSpec::to(logo, Property::Opacity, 0.0)
                .duration(Duration::from_millis(400))
                .easing(power2_in),
            TweenSpec::to(caption, Property::Y, -20.0)
                .duration(Duration::from_millis(400))
                .delay(Duration::from_millis(100))
                .easing(power2_in),
            TweenSpec::to(caption, Property::Opacity, 0.0)
                .duration(Duration::from_millis(400))
                .delay(Duration::from_millis(100))
                .easing(power2_in),
            TweenSpec::to(overlay, Property::Opacity, 0.0)
                .duration(Duration::from_millis(500))
                .delay(Duration::from_millis(200))
                .easing(EasingType::PowerInOut(2)),
        ]
    }

    /// Route change: (re)start the show/dwell/hide cycle
    pub fn start(&mut self, rt: &mut Runtime) {
        self.cancel(rt);
        self.started_at = rt.now();
        let show = self.show_choreography();
        let settle = choreography_length(&show).min(self.dwell);
        for spec in show {
            rt.tween(spec);
        }
        self.enter(LoaderPhase::Showing);
        self.timer = Some(rt.set_timeout(self.owner, settle));
    }

    fn hide(&mut self, rt: &mut Runtime) {
        self.kill_tweens(rt);
        let hide = self.hide_choreography();
        let length = choreography_length(&hide);
        for spec in hide {
            rt.tween(spec);
        }
        self.enter(LoaderPhase::Hiding);
        self.timer = Some(rt.set_timeout(self.owner, length));
    }

    fn on_timer(&mut self, rt: &mut Runtime) {
        self.timer = None;
        match self.phase {
            LoaderPhase::Showing => {
                let elapsed = rt.now().saturating_sub(self.started_at);
                if elapsed >= self.dwell {
                    self.hide(rt);
                } else {
                    self.enter(LoaderPhase::Visible);
                    self.timer = Some(rt.set_timeout(self.owner, self.dwell - elapsed));
                }
            }
            LoaderPhase::Visible => self.hide(rt),
            LoaderPhase::Hiding => self.enter(LoaderPhase::Hidden),
            LoaderPhase::Hidden => {}
        }
    }

    fn enter(&mut self, phase: LoaderPhase) {
        debug!(from = ?self.phase, to = ?phase, "Loader phase");
        self.phase = phase;
    }

    fn cancel(&mut self, rt: &mut Runtime) {
        if let Some(timer) = self.timer.take() {
            rt.clear_timer(timer);
        }
        self.kill_tweens(rt);
    }

    fn kill_tweens(&self, rt: &mut Runtime) {
        let LoaderElements { overlay, logo, caption } = self.elements;
        for id in [overlay, logo, caption] {
            rt.kill_tweens_of(id);
        }
    }
}

impl Controller for LoaderController {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    fn handle(&mut self, rt: &mut Runtime, event: &RuntimeEvent) {
        if let RuntimeEvent::Timer { id, .. } = event {
            if self.timer == Some(*id) {
                self.on_timer(rt);
            }
        }
    }

    fn teardown(&mut self, rt: &mut Runtime) {
        self.cancel(rt);
        rt.release(self.owner);
        self.phase = LoaderPhase::Hidden;
    }
}
