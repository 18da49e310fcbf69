//! Scroll reveal
//!
//! Registers the page's scroll-driven entrances:
//! - every section except the hero fades and rises while it scrolls into view
//! - `h2`/`h3` headings are split into words that slide up once, staggered
//! - card grids stagger in once their section comes into view
//! - the hero strip drifts up slower than the page (parallax)
//! - the hero copy fades in after mount
//!
//! Registration is guarded per element and effect, so registering again
//! after new content appears only picks up what is new.

use std::collections::HashSet;
use std::time::Duration;

use tracing::debug;

use super::Controller;
use crate::anim::{EasingType, TweenSpec, Value};
use crate::config::RevealConfig;
use crate::dom::{Document, ElementId, ElementKind, Property};
use crate::runtime::{OwnerId, Runtime, RuntimeEvent};
use crate::trigger::{Edge, ScrubChannel, TriggerAction, TriggerPosition, TriggerSpec};
use crate::Result;

/// Split heading text into word fragments
///
/// Every fragment but the last keeps a trailing space, so concatenating the
/// fragments gives back the original text. Empty text has no fragments.
pub fn split_words(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let words: Vec<&str> = text.split(' ').collect();
    let last = words.len() - 1;
    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| if i < last { format!("{} ", word) } else { word.to_string() })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Effect {
    SectionFade,
    HeadingWords,
    CardStagger,
    Parallax,
    HeroIntro,
}

#[derive(Debug)]
pub struct RevealController {
    owner: OwnerId,
    config: RevealConfig,
    heading_start: TriggerPosition,
    card_start: TriggerPosition,
    registered: HashSet<(ElementId, Effect)>,
}

impl RevealController {
    pub fn mount(rt: &mut Runtime, config: &RevealConfig) -> Result<Self> {
        let mut reveal = Self {
            owner: rt.allocate_owner(),
            config: config.clone(),
            heading_start: config.heading_start.parse()?,
            card_start: config.card_start.parse()?,
            registered: HashSet::new(),
        };
        let count = reveal.register(rt);
        debug!(count, "Scroll reveal mounted");
        Ok(reveal)
    }

    /// Register effects for every eligible element not registered yet
    ///
    /// Returns the number of new registrations.
    pub fn register(&mut self, rt: &mut Runtime) -> usize {
        let mut count = 0;
        let sections = rt.document().sections();

        for section in sections {
            let is_hero = rt
                .document()
                .get(section)
                .is_some_and(|el| el.dom_id.as_deref() == Some("home"));

            if is_hero {
                count += self.register_hero(rt, section);
                continue;
            }

            if self.claim(section, Effect::SectionFade) {
                self.register_section_fade(rt, section);
                count += 1;
            }

            for heading in rt.document().headings_in(section) {
                if self.claim(heading, Effect::HeadingWords) && self.register_heading(rt, heading) {
                    count += 1;
                }
            }

            let cards = direct_cards(rt.document(), section);
            if !cards.is_empty() && self.claim(section, Effect::CardStagger) {
                self.register_cards(rt, section, &cards);
                count += 1;
            }
        }
        count
    }

    fn claim(&mut self, element: ElementId, effect: Effect) -> bool {
        self.registered.insert((element, effect))
    }

    fn register_section_fade(&self, rt: &mut Runtime, section: ElementId) {
        let spec = TriggerSpec {
            trigger: section,
            start: TriggerPosition::edges(Edge::Top, Edge::Bottom),
            end: Some(TriggerPosition::edges(Edge::Top, Edge::Center)),
            action: TriggerAction::Scrub {
                channels: vec![
                    ScrubChannel {
                        target: section,
                        property: Property::Opacity,
                        from: Value::Scalar(0.0),
                        to: Value::Scalar(1.0),
                    },
                    ScrubChannel {
                        target: section,
                        property: Property::Y,
                        from: Value::Scalar(self.config.section_offset),
                        to: Value::Scalar(0.0),
                    },
                ],
                easing: EasingType::PowerOut(2),
            },
        };
        rt.register_trigger(self.owner, spec);
    }

    /// False when the heading has no text to animate
    fn register_heading(&self, rt: &mut Runtime, heading: ElementId) -> bool {
        let words = ensure_split(rt.document_mut(), heading);
        if words.is_empty() {
            return false;
        }
        let duration = Duration::from_millis(self.config.word_duration_ms);
        let stagger = Duration::from_millis(self.config.word_stagger_ms);
        let tweens = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                TweenSpec::from_to(*word, Property::YPercent, 100.0, 0.0)
                    .duration(duration)
                    .delay(stagger * i as u32)
                    .easing(EasingType::PowerOut(3))
            })
            .collect();
        rt.register_trigger(
            self.owner,
            TriggerSpec {
                trigger: heading,
                start: self.heading_start,
                end: None,
                action: TriggerAction::PlayOnce(tweens),
            },
        );
        true
    }

    fn register_cards(&self, rt: &mut Runtime, section: ElementId, cards: &[ElementId]) {
        let stagger = Duration::from_millis(self.config.card_stagger_ms);
        let mut tweens = Vec::with_capacity(cards.len() * 2);
        for (i, card) in cards.iter().enumerate() {
            let delay = stagger * i as u32;
            tweens.push(
                TweenSpec::from_to(*card, Property::Opacity, 0.0, 1.0)
                    .duration(Duration::from_millis(600))
                    .delay(delay)
                    .easing(EasingType::PowerOut(2)),
            );
            tweens.push(
                TweenSpec::from_to(*card, Property::Y, self.config.section_offset, 0.0)
                    .duration(Duration::from_millis(600))
                    .delay(delay)
                    .easing(EasingType::PowerOut(2)),
            );
        }
        rt.register_trigger(
            self.owner,
            TriggerSpec {
                trigger: section,
                start: self.card_start,
                end: None,
                action: TriggerAction::PlayOnce(tweens),
            },
        );
    }

    fn register_hero(&mut self, rt: &mut Runtime, hero: ElementId) -> usize {
        let mut count = 0;

        let strip = rt
            .document()
            .kind_in(hero, &ElementKind::CarouselStrip)
            .into_iter()
            .next();
        if let Some(strip) = strip {
            if self.claim(strip, Effect::Parallax) {
                let height = rt.document().layout(strip).map(|r| r.height).unwrap_or(0.0);
                rt.register_trigger(
                    self.owner,
                    TriggerSpec {
                        trigger: hero,
                        start: TriggerPosition::edges(Edge::Top, Edge::Top),
                        end: Some(TriggerPosition::edges(Edge::Bottom, Edge::Top)),
                        action: TriggerAction::Scrub {
                            channels: vec![ScrubChannel {
                                target: strip,
                                property: Property::Y,
                                from: Value::Scalar(0.0),
                                to: Value::Scalar(-self.config.parallax_ratio * height),
                            }],
                            easing: EasingType::Linear,
                        },
                    },
                );
                count += 1;
            }
        }

        let intro = rt
            .document()
            .kind_in(hero, &ElementKind::HeroContent)
            .into_iter()
            .next();
        if let Some(intro) = intro {
            if self.claim(intro, Effect::HeroIntro) {
                rt.tween(
                    TweenSpec::from_to(intro, Property::Opacity, 0.0, 1.0)
                        .duration(Duration::from_millis(1500))
                        .delay(Duration::from_millis(500))
                        .easing(EasingType::PowerOut(2)),
                );
            }
        }
        count
    }
}

impl Controller for RevealController {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Reveal effects play on their own; nothing to react to
    fn handle(&mut self, _rt: &mut Runtime, _event: &RuntimeEvent) {}

    fn teardown(&mut self, rt: &mut Runtime) {
        rt.release(self.owner);
        self.registered.clear();
    }
}

/// Cards directly inside a section, ignoring nested cards
fn direct_cards(doc: &Document, section: ElementId) -> Vec<ElementId> {
    doc.kind_in(section, &ElementKind::Card)
        .into_iter()
        .filter(|card| doc.get(*card).and_then(|el| el.parent) == Some(section))
        .collect()
}

/// Word fragments of a heading, splitting it on first use
fn ensure_split(doc: &mut Document, heading: ElementId) -> Vec<ElementId> {
    let existing = doc.kind_in(heading, &ElementKind::Word);
    if !existing.is_empty() {
        return existing;
    }
    let Some(el) = doc.get(heading) else {
        return Vec::new();
    };
    let text = el.text.clone().unwrap_or_default();
    let layout = el.layout;

    split_words(&text)
        .into_iter()
        .map(|fragment| {
            let word = doc.append(heading, ElementKind::Word);
            doc.set_text(word, fragment);
            doc.set_layout(word, layout);
            word
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::ms;
    use crate::content::SiteContent;
    use crate::dom::HeadingLevel;
    use crate::page::{test_runtime, Page};

    /// Scrub and play-once registrations bound to an element
    fn trigger_kinds(rt: &Runtime, element: ElementId) -> (usize, usize) {
        rt.triggers()
            .specs_on(element)
            .fold((0, 0), |(scrub, once), spec| match spec.action {
                TriggerAction::Scrub { .. } => (scrub + 1, once),
                TriggerAction::PlayOnce(_) => (scrub, once + 1),
                TriggerAction::Notify => (scrub, once),
            })
    }

    fn word_texts(doc: &Document, heading: ElementId) -> Vec<String> {
        doc.kind_in(heading, &ElementKind::Word)
            .into_iter()
            .filter_map(|w| doc.get(w).and_then(|el| el.text.clone()))
            .collect()
    }

    #[test]
    fn test_split_round_trip() {
        for text in ["Our Services", "Community Impact", "What We Do", "Single", "a  b", " lead", "trail "] {
            let fragments = split_words(text);
            assert_eq!(fragments.concat(), text);
            assert_eq!(fragments.len(), text.split(' ').count());
        }
        assert_eq!(split_words("Our Work"), vec!["Our ".to_string(), "Work".to_string()]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_one_trigger_per_section_and_heading() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        let mut reveal = RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();

        let check = |rt: &Runtime| {
            let doc = rt.document();
            for section in doc.sections() {
                let hero = doc.get(section).is_some_and(|el| el.dom_id.as_deref() == Some("home"));
                if hero {
                    continue;
                }
                let has_cards = !direct_cards(doc, section).is_empty();
                assert_eq!(trigger_kinds(rt, section), (1, usize::from(has_cards)));
                for heading in doc.headings_in(section) {
                    assert_eq!(rt.triggers().count_on(heading), 1);
                }
            }
        };
        check(&rt);
        let total = rt.triggers().len();

        assert_eq!(reveal.register(&mut rt), 0);
        assert_eq!(rt.triggers().len(), total);

        reveal.teardown(&mut rt);
        assert!(rt.triggers().is_empty());

        let mut again = RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        check(&rt);
        assert_eq!(rt.triggers().len(), total);
        again.teardown(&mut rt);
    }

    #[test]
    fn test_headings_are_split_once() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        let mut reveal = RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let services = rt.document().find_by_dom_id("services").unwrap();
        let heading = rt.document().headings_in(services)[0];
        assert_eq!(word_texts(rt.document(), heading), vec!["Our ", "Services"]);

        reveal.teardown(&mut rt);
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        assert_eq!(word_texts(rt.document(), heading).len(), 2);
    }

    #[test]
    fn test_words_wait_hidden_then_play_once() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let services = rt.document().find_by_dom_id("services").unwrap();
        let heading = rt.document().headings_in(services)[0];
        let words = rt.document().kind_in(heading, &ElementKind::Word);
        let y_percent = |rt: &Runtime, w: ElementId| rt.document().value(w, Property::YPercent);

        assert_eq!(y_percent(&rt, words[0]), Some(Value::Scalar(100.0)));

        let heading_top = rt.document().layout(heading).unwrap().top;
        rt.set_scroll(heading_top);
        rt.step(ms(10_000));
        for word in &words {
            assert_eq!(y_percent(&rt, *word), Some(Value::Scalar(0.0)));
        }

        // scrolling away and back does not replay
        rt.set_scroll(0.0);
        rt.set_scroll(heading_top);
        assert!(rt.tweens().is_empty());
    }

    #[test]
    fn test_word_stagger() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let csr = rt.document().find_by_dom_id("csr").unwrap();
        let heading = rt.document().headings_in(csr)[0];
        let words = rt.document().kind_in(heading, &ElementKind::Word);
        assert_eq!(words.len(), 2);

        let top = rt.document().layout(heading).unwrap().top;
        rt.step(ms(2000));
        rt.set_scroll(top);
        rt.step(ms(2020));
        let first = rt.document().value(words[0], Property::YPercent).and_then(|v| v.as_scalar()).unwrap();
        let second = rt.document().value(words[1], Property::YPercent).and_then(|v| v.as_scalar()).unwrap();
        assert!(first < 100.0);
        assert_eq!(second, 100.0);
    }

    #[test]
    fn test_section_scrub_reverses() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let work = rt.document().find_by_dom_id("work").unwrap();
        let top = rt.document().layout(work).unwrap().top;
        let opacity = |rt: &Runtime| rt.document().value(work, Property::Opacity).and_then(|v| v.as_scalar()).unwrap();

        assert_eq!(opacity(&rt), 0.0);
        rt.set_scroll(top - 400.0);
        assert_eq!(opacity(&rt), 1.0);
        assert_eq!(rt.document().value(work, Property::Y), Some(Value::Scalar(0.0)));
        rt.set_scroll(top - 600.0);
        let mid = opacity(&rt);
        assert!(mid > 0.0 && mid < 1.0);
        rt.set_scroll(0.0);
        assert_eq!(opacity(&rt), 0.0);
    }

    #[test]
    fn test_parallax_and_carousel_channels_are_independent() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let strip = rt.document().first(|el| el.kind == ElementKind::CarouselStrip).unwrap();
        rt.tween(TweenSpec::to(strip, Property::X, -1280.0).duration(ms(800)));

        rt.set_scroll(400.0);
        rt.step(ms(800));
        assert_eq!(rt.document().value(strip, Property::Y), Some(Value::Scalar(-80.0)));
        assert_eq!(rt.document().value(strip, Property::X), Some(Value::Scalar(-1280.0)));
    }

    #[test]
    fn test_cards_stagger_in() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let services = rt.document().find_by_dom_id("services").unwrap();
        let cards = direct_cards(rt.document(), services);
        assert_eq!(trigger_kinds(&rt, services), (1, 1));
        assert_eq!(rt.triggers().count_on(cards[0]), 0);
        assert_eq!(rt.document().value(cards[5], Property::Opacity), Some(Value::Scalar(0.0)));

        let top = rt.document().layout(cards[0]).unwrap().top;
        rt.set_scroll(top);
        rt.step(ms(1200));
        assert_eq!(rt.document().value(cards[5], Property::Opacity), Some(Value::Scalar(1.0)));
    }

    #[test]
    fn test_cards_start_with_section_top() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let services = rt.document().find_by_dom_id("services").unwrap();
        let cards = direct_cards(rt.document(), services);
        let opacity = |rt: &Runtime, card: ElementId| rt.document().value(card, Property::Opacity);

        let section_top = rt.document().layout(services).unwrap().top;
        let card_top = rt.document().layout(cards[0]).unwrap().top;
        assert!(card_top > section_top);
        let start = section_top - 0.8 * rt.viewport().height;

        rt.set_scroll(start - 1.0);
        rt.step(ms(5000));
        assert_eq!(opacity(&rt, cards[0]), Some(Value::Scalar(0.0)));

        // first card is still below the 80% line
        rt.set_scroll(start + 1.0);
        assert!(card_top - rt.scroll_y() > 0.8 * rt.viewport().height);
        rt.step(ms(10_000));
        for card in &cards {
            assert_eq!(opacity(&rt, *card), Some(Value::Scalar(1.0)));
        }
    }

    #[test]
    fn test_hero_intro_fades_in() {
        let (mut rt, _) = test_runtime(Page::Home, &SiteContent::default());
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        let intro = rt.document().first(|el| el.kind == ElementKind::HeroContent).unwrap();
        rt.step(ms(400));
        assert_eq!(rt.document().value(intro, Property::Opacity), Some(Value::Scalar(0.0)));
        // halfway through the fade, eased power2.out
        rt.step(ms(1250));
        let mid = rt.document().value(intro, Property::Opacity).and_then(|v| v.as_scalar()).unwrap();
        assert!((mid - 0.875).abs() < 1e-9);
        rt.step(ms(2000));
        assert_eq!(rt.document().value(intro, Property::Opacity), Some(Value::Scalar(1.0)));
        // hero h1 lines are not split
        let h1 = rt.document().first(|el| el.kind == ElementKind::Heading(HeadingLevel::H1)).unwrap();
        assert!(rt.document().kind_in(h1, &ElementKind::Word).is_empty());
    }

    #[test]
    fn test_empty_heading_has_no_words() {
        let (mut rt, _) = test_runtime(Page::Contact, &SiteContent::default());
        let contact = rt.document().find_by_dom_id("contact").unwrap();
        let empty = rt.document_mut().append(contact, ElementKind::Heading(HeadingLevel::H3));
        rt.document_mut().set_text(empty, "");
        RevealController::mount(&mut rt, &RevealConfig::default()).unwrap();
        assert!(rt.document().kind_in(empty, &ElementKind::Word).is_empty());
        assert_eq!(rt.triggers().count_on(empty), 0);
    }
}
