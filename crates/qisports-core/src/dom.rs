//! In-memory document model
//!
//! A small arena of elements standing in for the page's DOM: kinds, html
//! style ids, text, layout boxes in document pixels and the animatable
//! style that tweens and scroll triggers write to. Removed slots are reused
//! by later appends; every reuse bumps the slot's generation, so stale ids
//! resolve to `None` and operations on them are silently skipped.

use serde::Serialize;

use crate::anim::{Rgba, Value};

/// Stable handle to an element slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId {
    index: usize,
    generation: u32,
}

impl ElementId {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Document root; carries the scroll position
    Window,
    Header,
    LogoText,
    NavLink { href: String },
    Main,
    Section,
    Heading(HeadingLevel),
    /// One word fragment of a split heading
    Word,
    Paragraph,
    Card,
    Link { href: String },
    HeroContent,
    CarouselStrip,
    Slide { source: String },
    CarouselDot { index: usize },
    CarouselArrow(ArrowDirection),
    Footer,
    LoaderOverlay,
    LoaderLogo,
    LoaderCaption,
}

/// Vertical layout box in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Animatable properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    /// Vertical offset as a percentage of the element's own height
    YPercent,
    Opacity,
    Scale,
    ShadowAlpha,
    Background,
    Color,
    /// Window scroll position
    ScrollY,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub opacity: f64,
    pub scale: f64,
    pub shadow_alpha: f64,
    pub background: Rgba,
    pub color: Rgba,
    pub scroll_y: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            opacity: 1.0,
            scale: 1.0,
            shadow_alpha: 0.0,
            background: Rgba::new(0, 0, 0, 0.0),
            color: Rgba::opaque(255, 255, 255),
            scroll_y: 0.0,
        }
    }
}

impl Style {
    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::X => Value::Scalar(self.x),
            Property::Y => Value::Scalar(self.y),
            Property::YPercent => Value::Scalar(self.y_percent),
            Property::Opacity => Value::Scalar(self.opacity),
            Property::Scale => Value::Scalar(self.scale),
            Property::ShadowAlpha => Value::Scalar(self.shadow_alpha),
            Property::ScrollY => Value::Scalar(self.scroll_y),
            Property::Background => Value::Color(self.background),
            Property::Color => Value::Color(self.color),
        }
    }

    /// Write a value; a value of the wrong kind is ignored
    pub fn set(&mut self, property: Property, value: Value) {
        match (property, value) {
            (Property::X, Value::Scalar(v)) => self.x = v,
            (Property::Y, Value::Scalar(v)) => self.y = v,
            (Property::YPercent, Value::Scalar(v)) => self.y_percent = v,
            (Property::Opacity, Value::Scalar(v)) => self.opacity = v,
            (Property::Scale, Value::Scalar(v)) => self.scale = v,
            (Property::ShadowAlpha, Value::Scalar(v)) => self.shadow_alpha = v,
            (Property::ScrollY, Value::Scalar(v)) => self.scroll_y = v,
            (Property::Background, Value::Color(c)) => self.background = c,
            (Property::Color, Value::Color(c)) => self.color = c,
            _ => {}
        }
    }

    /// Hidden the way `autoAlpha` hides: fully transparent means invisible
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Html-style id used for anchors (`#services`)
    pub dom_id: Option<String>,
    pub text: Option<String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub layout: Rect,
    pub style: Style,
    /// Active indicator class (carousel dots)
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    window: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let window = ElementId { index: 0, generation: 0 };
        let root = Element {
            id: window,
            kind: ElementKind::Window,
            dom_id: None,
            text: None,
            parent: None,
            children: Vec::new(),
            layout: Rect::default(),
            style: Style::default(),
            active: false,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(root),
            }],
            free: Vec::new(),
            window,
        }
    }

    pub fn window(&self) -> ElementId {
        self.window
    }

    /// Append a new element as the last child of `parent`
    ///
    /// A missing parent attaches the element to the window.
    pub fn append(&mut self, parent: ElementId, kind: ElementKind) -> ElementId {
        let parent = if self.contains(parent) { parent } else { self.window };
        let id = match self.free.pop() {
            Some(index) => ElementId {
                index,
                generation: self.slots[index].generation,
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    element: None,
                });
                ElementId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        self.slots[id.index].element = Some(Element {
            id,
            kind,
            dom_id: None,
            text: None,
            parent: Some(parent),
            children: Vec::new(),
            layout: Rect::default(),
            style: Style::default(),
            active: false,
        });
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    pub fn set_dom_id(&mut self, id: ElementId, dom_id: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.dom_id = Some(dom_id.into());
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.text = Some(text.into());
        }
    }

    pub fn set_layout(&mut self, id: ElementId, layout: Rect) {
        if let Some(el) = self.get_mut(id) {
            el.layout = layout;
        }
    }

    pub fn layout(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(|el| el.layout)
    }

    pub fn value(&self, id: ElementId, property: Property) -> Option<Value> {
        self.get(id).map(|el| el.style.get(property))
    }

    /// Returns false when the element is missing
    pub fn set_value(&mut self, id: ElementId, property: Property, value: Value) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.style.set(property, value);
                true
            }
            None => false,
        }
    }

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.get(id).map(|el| &el.style)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// All live descendants in document order (pre-order)
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Live elements matching a predicate, in document order
    pub fn select(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.descendants(self.window)
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(&predicate))
            .collect()
    }

    pub fn first(&self, predicate: impl Fn(&Element) -> bool) -> Option<ElementId> {
        self.select(predicate).into_iter().next()
    }

    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.first(|el| el.dom_id.as_deref() == Some(dom_id))
    }

    pub fn sections(&self) -> Vec<ElementId> {
        self.select(|el| el.kind == ElementKind::Section)
    }

    /// `h2`/`h3` headings below an element
    pub fn headings_in(&self, id: ElementId) -> Vec<ElementId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| {
                self.get(*d).is_some_and(|el| {
                    matches!(
                        el.kind,
                        ElementKind::Heading(HeadingLevel::H2) | ElementKind::Heading(HeadingLevel::H3)
                    )
                })
            })
            .collect()
    }

    pub fn kind_in(&self, id: ElementId, kind: &ElementKind) -> Vec<ElementId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.get(*d).is_some_and(|el| &el.kind == kind))
            .collect()
    }

    pub fn header(&self) -> Option<ElementId> {
        self.first(|el| el.kind == ElementKind::Header)
    }

    pub fn main(&self) -> Option<ElementId> {
        self.first(|el| el.kind == ElementKind::Main)
    }

    /// Measured header height, 0 when there is no header
    pub fn header_height(&self) -> f64 {
        self.header()
            .and_then(|h| self.layout(h))
            .map(|r| r.height)
            .unwrap_or(0.0)
    }

    /// Remove an element and its subtree
    pub fn remove(&mut self, id: ElementId) {
        if id == self.window {
            return;
        }
        let Some(parent) = self.get(id).map(|el| el.parent) else {
            return;
        };
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for d in doomed {
            let slot = &mut self.slots[d.index];
            slot.element = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(d.index);
        }
        if let Some(p) = parent.and_then(|p| self.get_mut(p)) {
            p.children.retain(|c| *c != id);
        }
    }

    /// Remove all children of an element, keeping the element itself
    pub fn clear_children(&mut self, id: ElementId) {
        let children: Vec<ElementId> = self.children(id).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    /// Bottom edge of the lowest element
    pub fn height(&self) -> f64 {
        self.slots
            .iter()
            .filter_map(|slot| slot.element.as_ref())
            .filter(|el| !matches!(el.kind, ElementKind::LoaderOverlay | ElementKind::LoaderLogo | ElementKind::LoaderCaption))
            .map(|el| el.layout.bottom())
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
