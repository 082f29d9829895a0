//! Command model for the animation scene language.
//!
//! The parser produces [`Command`]s that mirror the source one to one. Only
//! [`AtomicCommand`]s can run against a context; loops have to go through
//! [`flatten`](super::flatten) first.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::context::{AnimationContext, AnimationHooks, ContextError};

use super::shape::{AnimationObject, Vec2};

/// Direction of a `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step in screen axes (up is negative y).
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(s)
    }
}

/// A command with direct execution semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicCommand {
    Define {
        name: String,
        object: AnimationObject,
    },
    Place {
        name: String,
        position: Vec2,
    },
    Shift {
        name: String,
        direction: Direction,
    },
    Erase {
        name: String,
    },
}

impl AtomicCommand {
    /// Name of the object this command targets.
    pub fn name(&self) -> &str {
        match self {
            AtomicCommand::Define { name, .. }
            | AtomicCommand::Place { name, .. }
            | AtomicCommand::Shift { name, .. }
            | AtomicCommand::Erase { name } => name,
        }
    }

    /// Perform this command's single mutation on `context`.
    ///
    /// Consumes the command so a `Define` hands its object to the context.
    pub fn execute<H: AnimationHooks>(
        self,
        context: &mut AnimationContext<H>,
    ) -> Result<(), ContextError> {
        match self {
            AtomicCommand::Define { name, object } => context.declare(name, object),
            AtomicCommand::Place { name, position } => context.place(&name, position),
            AtomicCommand::Shift { name, direction } => context.shift(&name, direction),
            AtomicCommand::Erase { name } => context.erase(&name),
        }
    }
}

impl fmt::Display for AtomicCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomicCommand::Define { name, object } => {
                write!(f, "(define {name} <{} shapes>)", object.shapes().len())
            }
            AtomicCommand::Place { name, position } => {
                write!(f, "(place {name} ({} {}))", position.x, position.y)
            }
            AtomicCommand::Shift { name, direction } => write!(f, "(shift {name} {direction})"),
            AtomicCommand::Erase { name } => write!(f, "(erase {name})"),
        }
    }
}

/// The shared, immutable command list of a loop.
///
/// Cloning is a reference-count bump. Dropping the last owner tears nested
/// bodies down with a work list, so nesting depth never reaches the call stack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopBody(Arc<Vec<Command>>);

impl Deref for LoopBody {
    type Target = [Command];

    fn deref(&self) -> &[Command] {
        &self.0
    }
}

impl From<Vec<Command>> for LoopBody {
    fn from(commands: Vec<Command>) -> Self {
        LoopBody(Arc::new(commands))
    }
}

impl Drop for LoopBody {
    fn drop(&mut self) {
        let Some(commands) = Arc::get_mut(&mut self.0) else {
            return;
        };
        let mut pending = std::mem::take(commands);
        while let Some(command) = pending.pop() {
            if let Command::Loop { mut body, .. } = command {
                if let Some(inner) = Arc::get_mut(&mut body.0) {
                    pending.append(inner);
                }
            }
        }
    }
}

/// A command as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Atomic(AtomicCommand),
    /// Repeat `body` `count` times. Counts of zero or less run nothing.
    Loop { count: i64, body: LoopBody },
}

impl Command {
    pub fn define(name: impl Into<String>, object: AnimationObject) -> Self {
        Command::Atomic(AtomicCommand::Define {
            name: name.into(),
            object,
        })
    }

    pub fn place(name: impl Into<String>, position: Vec2) -> Self {
        Command::Atomic(AtomicCommand::Place {
            name: name.into(),
            position,
        })
    }

    pub fn shift(name: impl Into<String>, direction: Direction) -> Self {
        Command::Atomic(AtomicCommand::Shift {
            name: name.into(),
            direction,
        })
    }

    pub fn erase(name: impl Into<String>) -> Self {
        Command::Atomic(AtomicCommand::Erase { name: name.into() })
    }

    pub fn repeat(count: i64, body: Vec<Command>) -> Self {
        Command::Loop {
            count,
            body: body.into(),
        }
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Command::Atomic(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // (remaining body commands, whether the next one is the first)
        let mut open: Vec<(std::slice::Iter<'_, Command>, bool)> = Vec::new();
        let mut current = self;
        loop {
            match current {
                Command::Atomic(command) => write!(f, "{command}")?,
                Command::Loop { count, body } => {
                    write!(f, "(loop {count} (")?;
                    open.push((body.iter(), true));
                }
            }

            current = loop {
                let Some((rest, first)) = open.last_mut() else {
                    return Ok(());
                };
                match rest.next() {
                    Some(next) => {
                        if !*first {
                            f.write_str(" ")?;
                        }
                        *first = false;
                        break next;
                    }
                    None => {
                        f.write_str("))")?;
                        open.pop();
                    }
                }
            };
        }
    }
}
