//! Hero carousel
//!
//! Slides sit side by side in a strip one viewport wide each; showing a
//! slide tweens the strip's `x`. An interval timer advances the slides on
//! its own cadence, and any manual navigation restarts that interval so the
//! next automatic move is a full period away.

use tracing::debug;

use super::Controller;
use crate::anim::TweenSpec;
use crate::config::CarouselConfig;
use crate::dom::{ElementId, ElementKind, Property};
use crate::runtime::{OwnerId, Runtime, RuntimeEvent};
use crate::timer::TimerId;

/// Wrap any index into `0..total`; `None` when there are no slides
pub fn wrap_index(index: isize, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    Some(index.rem_euclid(total as isize) as usize)
}

pub fn wrap_next(current: usize, total: usize) -> Option<usize> {
    wrap_index(current as isize + 1, total)
}

pub fn wrap_prev(current: usize, total: usize) -> Option<usize> {
    wrap_index(current as isize - 1, total)
}

#[derive(Debug)]
pub struct CarouselController {
    owner: OwnerId,
    strip: Option<ElementId>,
    dots: Vec<ElementId>,
    total: usize,
    current: usize,
    /// Viewport width at mount; not re-measured on resize
    slide_width: f64,
    timer: Option<TimerId>,
    config: CarouselConfig,
}

impl CarouselController {
    pub fn mount(rt: &mut Runtime, config: &CarouselConfig) -> Self {
        let owner = rt.allocate_owner();
        let doc = rt.document();
        let strip = doc.first(|el| el.kind == ElementKind::CarouselStrip);
        let total = strip
            .map(|s| {
                doc.children(s)
                    .iter()
                    .filter(|c| doc.get(**c).is_some_and(|el| matches!(el.kind, ElementKind::Slide { .. })))
                    .count()
            })
            .unwrap_or(0);

        let mut dots: Vec<(usize, ElementId)> = doc
            .select(|el| matches!(el.kind, ElementKind::CarouselDot { .. }))
            .into_iter()
            .filter_map(|id| match doc.get(id).map(|el| &el.kind) {
                Some(ElementKind::CarouselDot { index }) => Some((*index, id)),
                _ => None,
            })
            .collect();
        dots.sort();

        let mut carousel = Self {
            owner,
            strip,
            dots: dots.into_iter().map(|(_, id)| id).collect(),
            total,
            current: 0,
            slide_width: rt.viewport().width,
            timer: None,
            config: config.clone(),
        };
        carousel.mark_active(rt);

        if total > 1 {
            carousel.timer = Some(rt.set_interval(owner, carousel.config.interval()));
        }
        debug!(total, "Carousel mounted");
        carousel
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Manual navigation: show a slide and restart the auto-advance interval
    pub fn go_to_slide(&mut self, rt: &mut Runtime, index: isize) {
        if self.total <= 1 {
            return;
        }
        self.show(rt, index);
        self.restart_timer(rt);
    }

    pub fn next(&mut self, rt: &mut Runtime) {
        if let Some(index) = wrap_next(self.current, self.total) {
            self.go_to_slide(rt, index as isize);
        }
    }

    pub fn previous(&mut self, rt: &mut Runtime) {
        if let Some(index) = wrap_prev(self.current, self.total) {
            self.go_to_slide(rt, index as isize);
        }
    }

    /// Automatic move; leaves the interval running on its cadence
    fn advance(&mut self, rt: &mut Runtime) {
        if let Some(index) = wrap_next(self.current, self.total) {
            self.show(rt, index as isize);
        }
    }

    fn show(&mut self, rt: &mut Runtime, index: isize) {
        let Some(index) = wrap_index(index, self.total) else {
            return;
        };
        self.current = index;
        if let Some(strip) = self.strip {
            rt.kill_property(strip, Property::X);
            rt.tween(
                TweenSpec::to(strip, Property::X, -(index as f64) * self.slide_width)
                    .duration(self.config.slide_duration())
                    .easing(self.config.easing),
            );
        }
        self.mark_active(rt);
        debug!(index, "Showing slide");
    }

    fn mark_active(&self, rt: &mut Runtime) {
        for (i, dot) in self.dots.iter().enumerate() {
            if let Some(el) = rt.document_mut().get_mut(*dot) {
                el.active = i == self.current;
            }
        }
    }

    fn restart_timer(&mut self, rt: &mut Runtime) {
        if let Some(timer) = self.timer.take() {
            rt.clear_timer(timer);
        }
        self.timer = Some(rt.set_interval(self.owner, self.config.interval()));
    }
}

impl Controller for CarouselController {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    fn handle(&mut self, rt: &mut Runtime, event: &RuntimeEvent) {
        if let RuntimeEvent::Timer { id, .. } = event {
            if self.timer == Some(*id) {
                self.advance(rt);
            }
        }
    }

    fn teardown(&mut self, rt: &mut Runtime) {
        if let Some(timer) = self.timer.take() {
            rt.clear_timer(timer);
        }
        if let Some(strip) = self.strip {
            rt.kill_property(strip, Property::X);
        }
        rt.release(self.owner);
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{ms, Value};
    use crate::content::SiteContent;
    use crate::page::{test_runtime, Page};

    fn slides(n: usize) -> SiteContent {
        SiteContent::default().with_hero_slides((0..n).map(|i| format!("/images/{}.jpg", i)).collect())
    }

    fn dispatch(rt: &mut Runtime, carousel: &mut CarouselController, target: u64) {
        loop {
            let events = rt.step(ms(target));
            for event in &events {
                if event.owner() == carousel.owner() {
                    carousel.handle(rt, event);
                }
            }
            if rt.now() >= ms(target) && !rt.has_due_timers() {
                break;
            }
        }
    }

    fn strip_x(rt: &Runtime, carousel: &CarouselController) -> f64 {
        let strip = carousel.strip.unwrap();
        rt.document().value(strip, Property::X).and_then(|v| v.as_scalar()).unwrap()
    }

    fn active_dots(rt: &Runtime, carousel: &CarouselController) -> Vec<usize> {
        carousel
            .dots
            .iter()
            .enumerate()
            .filter(|(_, d)| rt.document().get(**d).is_some_and(|el| el.active))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_wrap_for_all_counts() {
        assert_eq!(wrap_next(0, 0), None);
        assert_eq!(wrap_prev(0, 0), None);
        for total in 1..10 {
            assert_eq!(wrap_prev(0, total), Some(total - 1));
            assert_eq!(wrap_next(total - 1, total), Some(0));
            for current in 0..total {
                let next = wrap_next(current, total).unwrap();
                assert!(next < total);
                assert_eq!(wrap_prev(next, total), Some(current));
            }
        }
        assert_eq!(wrap_index(-7, 3), Some(2));
        assert_eq!(wrap_index(7, 3), Some(1));
    }

    #[test]
    fn test_navigation_moves_strip_and_dots() {
        let (mut rt, _) = test_runtime(Page::Home, &slides(3));
        let config = CarouselConfig::default();
        let mut carousel = CarouselController::mount(&mut rt, &config);
        assert_eq!(carousel.total(), 3);
        assert_eq!(active_dots(&rt, &carousel), vec![0]);

        carousel.previous(&mut rt);
        assert_eq!(carousel.current(), 2);
        assert_eq!(active_dots(&rt, &carousel), vec![2]);
        dispatch(&mut rt, &mut carousel, 800);
        assert_eq!(strip_x(&rt, &carousel), -2560.0);

        carousel.next(&mut rt);
        assert_eq!(carousel.current(), 0);
        dispatch(&mut rt, &mut carousel, 1600);
        assert_eq!(strip_x(&rt, &carousel), 0.0);
    }

    #[test]
    fn test_new_slide_cancels_previous_transition() {
        let (mut rt, _) = test_runtime(Page::Home, &slides(4));
        let mut carousel = CarouselController::mount(&mut rt, &CarouselConfig::default());
        let strip = carousel.strip.unwrap();

        carousel.go_to_slide(&mut rt, 3);
        dispatch(&mut rt, &mut carousel, 300);
        carousel.go_to_slide(&mut rt, 1);
        assert_eq!(rt.tweens().count_for(strip), 1);
        dispatch(&mut rt, &mut carousel, 1100);
        assert_eq!(strip_x(&rt, &carousel), -1280.0);
        assert_eq!(rt.document().value(strip, Property::X), Some(Value::Scalar(-1280.0)));
    }

    #[test]
    fn test_manual_navigation_resets_timer() {
        let (mut rt, _) = test_runtime(Page::Home, &slides(3));
        let mut carousel = CarouselController::mount(&mut rt, &CarouselConfig::default());

        dispatch(&mut rt, &mut carousel, 3000);
        carousel.go_to_slide(&mut rt, 1);
        let timer = carousel.timer().unwrap();
        assert_eq!(rt.timers().due(timer), Some(ms(8000)));

        dispatch(&mut rt, &mut carousel, 7999);
        assert_eq!(carousel.current(), 1);
        dispatch(&mut rt, &mut carousel, 8000);
        assert_eq!(carousel.current(), 2);
        // auto-advance keeps its cadence
        assert_eq!(rt.timers().due(timer), Some(ms(13000)));
    }

    #[test]
    fn test_auto_advance_wraps() {
        let (mut rt, _) = test_runtime(Page::Home, &slides(3));
        let mut carousel = CarouselController::mount(&mut rt, &CarouselConfig::default());
        dispatch(&mut rt, &mut carousel, 15000);
        assert_eq!(carousel.current(), 0);
        assert_eq!(active_dots(&rt, &carousel), vec![0]);
    }

    #[test]
    fn test_single_slide_is_static() {
        for n in [0, 1] {
            let (mut rt, _) = test_runtime(Page::Home, &slides(n));
            let mut carousel = CarouselController::mount(&mut rt, &CarouselConfig::default());
            assert!(carousel.timer().is_none());
            assert!(rt.timers().is_empty());
            carousel.next(&mut rt);
            carousel.go_to_slide(&mut rt, 5);
            assert_eq!(carousel.current(), 0);
            assert!(rt.tweens().is_empty());
        }
    }

    #[test]
    fn test_teardown_releases_timer() {
        let (mut rt, _) = test_runtime(Page::Home, &slides(3));
        let mut carousel = CarouselController::mount(&mut rt, &CarouselConfig::default());
        carousel.teardown(&mut rt);
        assert_eq!(rt.timers().count_for(carousel.owner()), 0);
        dispatch(&mut rt, &mut carousel, 20000);
        assert_eq!(carousel.current(), 0);
    }
}
