//! Time-based tweens
//!
//! A tween drives one property of one element from a start value to an end
//! value over a duration, after an optional delay. Adding a tween for a
//! target/property pair that is already animating replaces the running one,
//! so the most recent command always wins and nothing stacks.

use std::time::Duration;

use super::easing::EasingType;
use super::timing::{is_complete, progress};
use super::value::Value;
use crate::dom::{Document, ElementId, Property};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

/// Declarative description of a tween
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub target: ElementId,
    pub property: Property,
    /// Explicit start value; rendered immediately when set.
    /// `None` reads the current value when the tween starts.
    pub from: Option<Value>,
    pub to: Value,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EasingType,
}

impl TweenSpec {
    pub fn to(target: ElementId, property: Property, to: impl Into<Value>) -> Self {
        Self {
            target,
            property,
            from: None,
            to: to.into(),
            duration: Duration::from_millis(500),
            delay: Duration::ZERO,
            easing: EasingType::default(),
        }
    }

    pub fn from_to(
        target: ElementId,
        property: Property,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Self {
            from: Some(from.into()),
            ..Self::to(target, property, to)
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration
    pub fn end_offset(&self) -> Duration {
        self.delay + self.duration
    }
}

/// Latest end offset of a group of tweens started together
pub fn choreography_length(specs: &[TweenSpec]) -> Duration {
    specs
        .iter()
        .map(TweenSpec::end_offset)
        .max()
        .unwrap_or(Duration::ZERO)
}

#[derive(Debug, Clone)]
struct ActiveTween {
    id: TweenId,
    spec: TweenSpec,
    start: Duration,
    from: Option<Value>,
}

/// Owns all running tweens
#[derive(Debug, Default)]
pub struct TweenEngine {
    tweens: Vec<ActiveTween>,
    next_id: u64,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween at clock time `now`
    pub fn add(&mut self, doc: &mut Document, now: Duration, spec: TweenSpec) -> TweenId {
        self.kill_property(spec.target, spec.property);

        if let Some(from) = spec.from {
            doc.set_value(spec.target, spec.property, from);
        }

        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push(ActiveTween {
            id,
            start: now + spec.delay,
            from: spec.from,
            spec,
        });
        id
    }

    /// Advance all tweens to clock time `now`
    ///
    /// Returns the number of tweens still running. Tweens whose target has
    /// disappeared are dropped silently.
    pub fn update(&mut self, doc: &mut Document, now: Duration) -> usize {
        self.tweens.retain_mut(|tween| {
            if now < tween.start {
                return true;
            }
            let spec = &tween.spec;
            let from = match tween.from {
                Some(from) => from,
                None => match doc.value(spec.target, spec.property) {
                    Some(current) => {
                        tween.from = Some(current);
                        current
                    }
                    None => return false,
                },
            };

            let done = is_complete(tween.start, spec.duration, now);
            let value = if done {
                spec.to
            } else {
                let t = progress(tween.start, spec.duration, now);
                from.lerp(&spec.to, spec.easing.apply(t))
            };

            doc.set_value(spec.target, spec.property, value) && !done
        });
        self.tweens.len()
    }

    pub fn kill(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.id != id);
        self.tweens.len() != before
    }

    /// Kill every tween on an element, leaving it at its current value
    pub fn kill_tweens_of(&mut self, target: ElementId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.spec.target != target);
        before - self.tweens.len()
    }

    pub fn kill_property(&mut self, target: ElementId, property: Property) -> usize {
        let before = self.tweens.len();
        self.tweens
            .retain(|t| !(t.spec.target == target && t.spec.property == property));
        before - self.tweens.len()
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == id)
    }

    pub fn count_for(&self, target: ElementId) -> usize {
        self.tweens.iter().filter(|t| t.spec.target == target).count()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::timing::ms;
    use crate::dom::ElementKind;

    fn doc_with_strip() -> (Document, ElementId) {
        let mut doc = Document::new();
        let strip = doc.append(doc.window(), ElementKind::CarouselStrip);
        (doc, strip)
    }

    #[test]
    fn test_tween_reaches_target_exactly() {
        let (mut doc, strip) = doc_with_strip();
        let mut engine = TweenEngine::new();
        engine.add(
            &mut doc,
            ms(0),
            TweenSpec::to(strip, Property::X, -1280.0).duration(ms(800)),
        );

        engine.update(&mut doc, ms(400));
        let mid = doc.value(strip, Property::X).and_then(|v| v.as_scalar()).unwrap();
        assert!(mid < 0.0 && mid > -1280.0);

        assert_eq!(engine.update(&mut doc, ms(800)), 0);
        assert_eq!(doc.value(strip, Property::X), Some(Value::Scalar(-1280.0)));
    }

    #[test]
    fn test_delay_and_lazy_from() {
        let (mut doc, strip) = doc_with_strip();
        let mut engine = TweenEngine::new();
        engine.add(
            &mut doc,
            ms(0),
            TweenSpec::to(strip, Property::Opacity, 0.0)
                .duration(ms(100))
                .delay(ms(200))
                .easing(EasingType::Linear),
        );
        // value changed before the tween starts is picked up as the start value
        doc.set_value(strip, Property::Opacity, Value::Scalar(0.5));
        engine.update(&mut doc, ms(100));
        assert_eq!(doc.value(strip, Property::Opacity), Some(Value::Scalar(0.5)));
        engine.update(&mut doc, ms(250));
        assert_eq!(doc.value(strip, Property::Opacity), Some(Value::Scalar(0.25)));
    }

    #[test]
    fn test_from_is_rendered_immediately() {
        let (mut doc, strip) = doc_with_strip();
        let mut engine = TweenEngine::new();
        engine.add(
            &mut doc,
            ms(0),
            TweenSpec::from_to(strip, Property::Scale, 0.8, 1.0).delay(ms(200)),
        );
        assert_eq!(doc.value(strip, Property::Scale), Some(Value::Scalar(0.8)));
    }

    #[test]
    fn test_same_property_overwrites() {
        let (mut doc, strip) = doc_with_strip();
        let mut engine = TweenEngine::new();
        let first = engine.add(&mut doc, ms(0), TweenSpec::to(strip, Property::X, -100.0));
        let second = engine.add(&mut doc, ms(0), TweenSpec::to(strip, Property::X, -200.0));
        let other = engine.add(&mut doc, ms(0), TweenSpec::to(strip, Property::Y, -50.0));
        assert!(!engine.is_active(first));
        assert!(engine.is_active(second));
        assert!(engine.is_active(other));
        assert_eq!(engine.count_for(strip), 2);
    }

    #[test]
    fn test_missing_target_is_dropped() {
        let (mut doc, strip) = doc_with_strip();
        let mut engine = TweenEngine::new();
        engine.add(&mut doc, ms(0), TweenSpec::to(strip, Property::X, -100.0));
        doc.remove(strip);
        assert_eq!(engine.update(&mut doc, ms(10)), 0);
    }

    #[test]
    fn test_choreography_length() {
        let (_, strip) = doc_with_strip();
        let specs = vec![
            TweenSpec::to(strip, Property::Opacity, 1.0).duration(ms(400)),
            TweenSpec::to(strip, Property::Scale, 1.0).duration(ms(800)).delay(ms(200)),
            TweenSpec::to(strip, Property::Y, 0.0).duration(ms(600)).delay(ms(400)),
        ];
        assert_eq!(choreography_length(&specs), ms(1000));
        assert_eq!(choreography_length(&[]), Duration::ZERO);
    }
}
