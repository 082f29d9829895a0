//! Callbacks a host attaches to an [`AnimationContext`](super::AnimationContext).
//!
//! Every hook runs after the context has already updated its table, so a hook
//! sees the post-mutation state and cannot veto it.

use tracing::info;

use crate::dsl::ast::Direction;
use crate::dsl::shape::{AnimationObject, Vec2};

/// Per-operation notifications. All methods default to doing nothing.
pub trait AnimationHooks {
    fn on_declared(&mut self, _name: &str, _object: &AnimationObject) {}

    /// `from` is the position the object had before the place.
    fn on_placed(&mut self, _name: &str, _object: &mut AnimationObject, _from: Vec2) {}

    /// The context never moves an object on shift; that is up to the hook.
    fn on_shifted(&mut self, _name: &str, _object: &mut AnimationObject, _direction: Direction) {}

    /// Receives the object after it has been unbound.
    fn on_erased(&mut self, _name: &str, _object: AnimationObject) {}
}

impl<H: AnimationHooks + ?Sized> AnimationHooks for &mut H {
    fn on_declared(&mut self, name: &str, object: &AnimationObject) {
        (**self).on_declared(name, object)
    }

    fn on_placed(&mut self, name: &str, object: &mut AnimationObject, from: Vec2) {
        (**self).on_placed(name, object, from)
    }

    fn on_shifted(&mut self, name: &str, object: &mut AnimationObject, direction: Direction) {
        (**self).on_shifted(name, object, direction)
    }

    fn on_erased(&mut self, name: &str, object: AnimationObject) {
        (**self).on_erased(name, object)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl AnimationHooks for NoHooks {}

/// A hook call as seen by [`RecordingHooks`].
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    Declared { name: String },
    Placed { name: String, from: Vec2, to: Vec2 },
    Shifted { name: String, direction: Direction },
    Erased { name: String },
}

/// Keeps every hook call in order. Mostly useful in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingHooks {
    pub events: Vec<HookEvent>,
}

impl AnimationHooks for RecordingHooks {
    fn on_declared(&mut self, name: &str, _object: &AnimationObject) {
        self.events.push(HookEvent::Declared { name: name.into() });
    }

    fn on_placed(&mut self, name: &str, object: &mut AnimationObject, from: Vec2) {
        self.events.push(HookEvent::Placed {
            name: name.into(),
            from,
            to: object.position,
        });
    }

    fn on_shifted(&mut self, name: &str, _object: &mut AnimationObject, direction: Direction) {
        self.events.push(HookEvent::Shifted {
            name: name.into(),
            direction,
        });
    }

    fn on_erased(&mut self, name: &str, _object: AnimationObject) {
        self.events.push(HookEvent::Erased { name: name.into() });
    }
}

/// Moves shifted objects by a fixed distance and logs every change.
#[derive(Debug, Clone, Copy)]
pub struct SteppingHooks {
    pub step: f32,
}

impl SteppingHooks {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl Default for SteppingHooks {
    fn default() -> Self {
        Self { step: 10.0 }
    }
}

impl AnimationHooks for SteppingHooks {
    fn on_declared(&mut self, name: &str, object: &AnimationObject) {
        info!(name, shapes = object.shapes().len(), "declared");
    }

    fn on_placed(&mut self, name: &str, object: &mut AnimationObject, from: Vec2) {
        let to = object.position;
        info!(name, from.x = from.x, from.y = from.y, to.x = to.x, to.y = to.y, "placed");
    }

    fn on_shifted(&mut self, name: &str, object: &mut AnimationObject, direction: Direction) {
        object.position += direction.unit() * self.step;
        let to = object.position;
        info!(name, %direction, to.x = to.x, to.y = to.y, "shifted");
    }

    fn on_erased(&mut self, name: &str, _object: AnimationObject) {
        info!(name, "erased");
    }
}
