//! Single-threaded animation runtime
//!
//! Owns the document, the virtual clock, running tweens, scroll triggers
//! and timers. Controllers never hold callbacks inside the runtime; instead
//! `step` returns the timer firings and trigger crossings that happened, each
//! tagged with the owner that registered it, and the caller routes them.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::anim::{TweenEngine, TweenId, TweenSpec, Value};
use crate::dom::{Document, ElementId, Property};
use crate::timer::{TimerId, TimerQueue};
use crate::trigger::{TriggerAction, TriggerEvent, TriggerId, TriggerRegistry, TriggerSpec};

/// Identifies the controller that owns a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OwnerId(u64);

impl OwnerId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Something a controller has to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    Timer { id: TimerId, owner: OwnerId },
    Trigger(TriggerEvent),
}

impl RuntimeEvent {
    pub fn owner(&self) -> OwnerId {
        match self {
            RuntimeEvent::Timer { owner, .. } => *owner,
            RuntimeEvent::Trigger(event) => event.owner,
        }
    }
}

#[derive(Debug)]
pub struct Runtime {
    now: Duration,
    viewport: Viewport,
    doc: Document,
    tweens: TweenEngine,
    triggers: TriggerRegistry,
    timers: TimerQueue,
    next_owner: u64,
    pending: Vec<RuntimeEvent>,
}

impl Runtime {
    pub fn new(doc: Document, viewport: Viewport) -> Self {
        Self {
            now: Duration::ZERO,
            viewport,
            doc,
            tweens: TweenEngine::new(),
            triggers: TriggerRegistry::new(),
            timers: TimerQueue::new(),
            next_owner: 1,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Offsets already captured by mounted controllers are not re-measured
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh();
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn tweens(&self) -> &TweenEngine {
        &self.tweens
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn allocate_owner(&mut self) -> OwnerId {
        let id = OwnerId(self.next_owner);
        self.next_owner += 1;
        id
    }

    // --- tweens -----------------------------------------------------------

    pub fn tween(&mut self, spec: TweenSpec) -> TweenId {
        self.tweens.add(&mut self.doc, self.now, spec)
    }

    pub fn kill_tweens_of(&mut self, target: ElementId) -> usize {
        self.tweens.kill_tweens_of(target)
    }

    pub fn kill_property(&mut self, target: ElementId, property: Property) -> usize {
        self.tweens.kill_property(target, property)
    }

    /// Set a value immediately, without a tween
    pub fn set(&mut self, target: ElementId, property: Property, value: impl Into<Value>) {
        self.tweens.kill_property(target, property);
        self.doc.set_value(target, property, value.into());
    }

    // --- triggers ---------------------------------------------------------

    /// Register a trigger and evaluate it against the current scroll position
    ///
    /// Explicit start values of play-once tweens are rendered right away so
    /// elements wait in their hidden state.
    pub fn register_trigger(&mut self, owner: OwnerId, spec: TriggerSpec) -> TriggerId {
        if let TriggerAction::PlayOnce(tweens) = &spec.action {
            for tween in tweens {
                if let Some(from) = tween.from {
                    self.doc.set_value(tween.target, tween.property, from);
                }
            }
        }
        let id = self.triggers.register(owner, spec);
        self.refresh();
        id
    }

    pub fn kill_trigger(&mut self, id: TriggerId) -> bool {
        self.triggers.kill(id)
    }

    /// Re-evaluate all triggers at the current scroll position
    pub fn refresh(&mut self) {
        let scroll = self.scroll_y();
        let evaluation = self
            .triggers
            .evaluate(&mut self.doc, scroll, self.viewport.height);
        for spec in evaluation.plays {
            self.tweens.add(&mut self.doc, self.now, spec);
        }
        self.pending
            .extend(evaluation.events.into_iter().map(RuntimeEvent::Trigger));
    }

    // --- timers -----------------------------------------------------------

    pub fn set_timeout(&mut self, owner: OwnerId, delay: Duration) -> TimerId {
        self.timers.set_timeout(self.now, owner, delay)
    }

    pub fn set_interval(&mut self, owner: OwnerId, period: Duration) -> TimerId {
        self.timers.set_interval(self.now, owner, period)
    }

    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        self.timers.clear(id)
    }

    /// Drop every trigger and timer registered by an owner
    pub fn release(&mut self, owner: OwnerId) {
        let triggers = self.triggers.kill_owner(owner);
        let timers = self.timers.clear_owner(owner);
        self.pending.retain(|e| e.owner() != owner);
        debug!(?owner, triggers, timers, "Released registrations");
    }

    // --- scroll -----------------------------------------------------------

    pub fn scroll_y(&self) -> f64 {
        self.doc
            .style(self.doc.window())
            .map(|s| s.scroll_y)
            .unwrap_or(0.0)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.doc.height() - self.viewport.height).max(0.0)
    }

    /// Jump to a scroll position, cancelling any scroll tween in flight
    pub fn set_scroll(&mut self, y: f64) {
        let y = y.clamp(0.0, self.max_scroll());
        let window = self.doc.window();
        self.tweens.kill_property(window, Property::ScrollY);
        self.doc.set_value(window, Property::ScrollY, Value::Scalar(y));
        self.refresh();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll(self.scroll_y() + delta);
    }

    // --- clock ------------------------------------------------------------

    /// Events produced outside of `step` (registration, scroll jumps)
    pub fn take_events(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_due_timers(&self) -> bool {
        self.timers.has_due(self.now)
    }

    /// Advance the clock toward `target`, stopping early at the next timer
    ///
    /// Tweens are updated to the new time, triggers re-evaluated (scroll
    /// tweens move the window) and due timers fired. Returns all events
    /// collected since the last call.
    pub fn step(&mut self, target: Duration) -> Vec<RuntimeEvent> {
        let until = match self.timers.next_due() {
            Some(due) if due < target => due,
            _ => target,
        };
        self.now = self.now.max(until);

        self.tweens.update(&mut self.doc, self.now);
        self.refresh();

        for (id, owner) in self.timers.pop_due(self.now) {
            self.pending.push(RuntimeEvent::Timer { id, owner });
        }
        self.take_events()
    }
}
