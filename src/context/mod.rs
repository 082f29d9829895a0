//! Animation context: the live name to object table that atomic commands mutate.
//!
//! The context applies every mapping change itself and then notifies its
//! [`AnimationHooks`], so hosts can animate without being able to break the
//! table invariant: a name is bound if and only if it was declared and not
//! yet erased.

pub mod hooks;

pub use hooks::{AnimationHooks, HookEvent, NoHooks, RecordingHooks, SteppingHooks};

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::dsl::ast::Direction;
use crate::dsl::shape::{AnimationObject, Vec2};

/// A command referenced a name in a way the object table does not allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    DuplicateName(String),
    UndeclaredName(String),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::DuplicateName(name) => write!(f, "Object '{name}' is already declared"),
            ContextError::UndeclaredName(name) => write!(f, "Object '{name}' is not declared"),
        }
    }
}

impl std::error::Error for ContextError {}

/// Owns the objects of one animation run.
#[derive(Debug, Default)]
pub struct AnimationContext<H = NoHooks> {
    objects: HashMap<String, AnimationObject>,
    hooks: H,
}

impl AnimationContext<NoHooks> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: AnimationHooks> AnimationContext<H> {
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            objects: HashMap::new(),
            hooks,
        }
    }

    /// Bind `name` to `object`, then fire `on_declared`.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        object: AnimationObject,
    ) -> Result<(), ContextError> {
        let name = name.into();
        if self.objects.contains_key(&name) {
            return Err(ContextError::DuplicateName(name));
        }

        debug!(name = %name, shapes = object.shapes().len(), "declare");
        let object = self.objects.entry(name.clone()).or_insert(object);
        self.hooks.on_declared(&name, object);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AnimationObject> {
        self.objects.get(name)
    }

    /// Move the object to `position`, then fire `on_placed` with its previous position.
    pub fn place(&mut self, name: &str, position: Vec2) -> Result<(), ContextError> {
        let object = lookup_mut(&mut self.objects, name)?;
        let from = object.position;
        object.position = position;
        self.hooks.on_placed(name, object, from);
        Ok(())
    }

    /// Fire `on_shifted`. The context itself does not move anything.
    pub fn shift(&mut self, name: &str, direction: Direction) -> Result<(), ContextError> {
        let object = lookup_mut(&mut self.objects, name)?;
        self.hooks.on_shifted(name, object, direction);
        Ok(())
    }

    /// Unbind `name`, then hand the removed object to `on_erased`.
    pub fn erase(&mut self, name: &str) -> Result<(), ContextError> {
        let object = self
            .objects
            .remove(name)
            .ok_or_else(|| ContextError::UndeclaredName(name.to_string()))?;

        debug!(name, "erase");
        self.hooks.on_erased(name, object);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All bound objects, in no particular order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &AnimationObject)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    /// Drop every binding, e.g. before replaying a script. Hooks are not notified.
    pub fn reset(&mut self) {
        self.objects.clear();
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }
}

fn lookup_mut<'a>(
    objects: &'a mut HashMap<String, AnimationObject>,
    name: &str,
) -> Result<&'a mut AnimationObject, ContextError> {
    objects
        .get_mut(name)
        .ok_or_else(|| ContextError::UndeclaredName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::shape::Shape;

    fn dot() -> AnimationObject {
        AnimationObject::with_shapes(vec![Shape::Circle {
            center: Vec2::ZERO,
            radius: 1.0,
        }])
    }

    #[test]
    fn declare_and_get() {
        let mut ctx = AnimationContext::new();
        ctx.declare("dot", dot()).unwrap();
        assert!(ctx.contains("dot"));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("dot").unwrap().shapes().len(), 1);
        assert!(ctx.get("other").is_none());
    }

    #[test]
    fn declare_twice_is_duplicate() {
        let mut ctx = AnimationContext::new();
        ctx.declare("dot", dot()).unwrap();
        let err = ctx.declare("dot", AnimationObject::new()).unwrap_err();
        assert_eq!(err, ContextError::DuplicateName("dot".into()));
        // The original binding is untouched.
        assert_eq!(ctx.get("dot").unwrap().shapes().len(), 1);
    }

    #[test]
    fn undeclared_names_fail() {
        let mut ctx = AnimationContext::new();
        assert_eq!(
            ctx.shift("x", Direction::Up),
            Err(ContextError::UndeclaredName("x".into()))
        );
        assert_eq!(
            ctx.place("x", Vec2::ZERO),
            Err(ContextError::UndeclaredName("x".into()))
        );
        assert_eq!(ctx.erase("x"), Err(ContextError::UndeclaredName("x".into())));
    }

    #[test]
    fn place_updates_position() {
        let mut ctx = AnimationContext::new();
        ctx.declare("dot", dot()).unwrap();
        ctx.place("dot", Vec2::new(5.0, 6.0)).unwrap();
        assert_eq!(ctx.get("dot").unwrap().position, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn shift_without_hooks_does_not_move() {
        let mut ctx = AnimationContext::new();
        ctx.declare("dot", dot()).unwrap();
        ctx.shift("dot", Direction::Right).unwrap();
        assert_eq!(ctx.get("dot").unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn erase_unbinds_and_allows_redeclare() {
        let mut ctx = AnimationContext::new();
        ctx.declare("dot", dot()).unwrap();
        ctx.erase("dot").unwrap();
        assert!(ctx.is_empty());
        ctx.declare("dot", dot()).unwrap();
        assert!(ctx.contains("dot"));
    }

    #[test]
    fn hooks_fire_after_mutation() {
        let mut ctx = AnimationContext::with_hooks(RecordingHooks::default());
        ctx.declare("dot", dot()).unwrap();
        ctx.place("dot", Vec2::new(1.0, 2.0)).unwrap();
        ctx.shift("dot", Direction::Down).unwrap();
        ctx.erase("dot").unwrap();

        assert_eq!(
            ctx.hooks().events,
            vec![
                HookEvent::Declared {
                    name: "dot".into()
                },
                HookEvent::Placed {
                    name: "dot".into(),
                    from: Vec2::ZERO,
                    to: Vec2::new(1.0, 2.0),
                },
                HookEvent::Shifted {
                    name: "dot".into(),
                    direction: Direction::Down,
                },
                HookEvent::Erased {
                    name: "dot".into()
                },
            ]
        );
    }

    #[test]
    fn failed_operations_do_not_fire_hooks() {
        let mut ctx = AnimationContext::with_hooks(RecordingHooks::default());
        ctx.declare("dot", dot()).unwrap();
        let _ = ctx.declare("dot", dot());
        let _ = ctx.shift("missing", Direction::Up);
        assert_eq!(ctx.hooks().events.len(), 1);
    }

    #[test]
    fn reset_clears_objects() {
        let mut ctx = AnimationContext::new();
        ctx.declare("a", dot()).unwrap();
        ctx.declare("b", dot()).unwrap();
        let mut names: Vec<&str> = ctx.objects().map(|(name, _)| name).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
        ctx.reset();
        assert!(ctx.is_empty());
    }

    #[test]
    fn context_error_display() {
        assert_eq!(
            ContextError::DuplicateName("x".into()).to_string(),
            "Object 'x' is already declared"
        );
        assert_eq!(
            ContextError::UndeclaredName("y".into()).to_string(),
            "Object 'y' is not declared"
        );
    }
}
