//! Loop flattening. Turns the parser's structural command stream into a
//! linear stream of atomic commands.
//!
//! Expansion is driven by an explicit stack of frames instead of recursion.
//! The bottom frame reads the upstream command stream exactly once; every
//! loop node pushes a frame that replays its body `count` times. Memory is
//! proportional to loop nesting depth, never to the expanded length.
//!
//! Bodies never change, so a pass that yields no atomic command (directly or
//! through nested loops) would yield none on every later pass either. Such a
//! frame ends right away instead of spinning through its remaining count.

use tracing::{debug, warn};

use super::ast::{AtomicCommand, Command, LoopBody};

/// One in-progress pass over a loop body.
struct LoopFrame {
    body: LoopBody,
    cursor: usize,
    remaining: i64,
    /// An atomic command came out of the current pass.
    emitted: bool,
    /// An atomic command came out of any pass so far.
    produced: bool,
}

impl LoopFrame {
    fn new(count: i64, body: LoopBody) -> Self {
        Self {
            body,
            cursor: 0,
            remaining: count,
            emitted: false,
            produced: false,
        }
    }

    fn finished(&self) -> bool {
        self.remaining <= 0
    }

    fn next_command(&mut self) -> Option<&Command> {
        let command = self.body.get(self.cursor)?;
        self.cursor += 1;
        Some(command)
    }

    fn record_output(&mut self) {
        self.emitted = true;
        self.produced = true;
    }

    /// Close the current pass and rewind for the next one, if any remains.
    fn end_iteration(&mut self) {
        if !self.emitted {
            self.remaining = 0;
            return;
        }
        self.remaining -= 1;
        self.emitted = false;
        if self.remaining > 0 {
            self.cursor = 0;
        }
    }
}

enum Frame<I> {
    /// The upstream stream; runs a single pass.
    Initial(I),
    Counted(LoopFrame),
}

/// What the top frame produced on one pull.
enum Pulled<E> {
    Atomic(AtomicCommand),
    Loop(i64, LoopBody),
    Failed(E),
    Exhausted,
    Continue,
}

/// Lazy iterator over the atomic commands of a structural command stream.
pub struct Flatten<I> {
    frames: Vec<Frame<I>>,
}

impl<I, E> Flatten<I>
where
    I: Iterator<Item = Result<Command, E>>,
{
    pub fn new(commands: I) -> Self {
        Self {
            frames: vec![Frame::Initial(commands)],
        }
    }

    /// Current loop nesting depth (0 when reading top-level commands).
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    fn pull(&mut self) -> Option<Pulled<E>> {
        let frame = self.frames.last_mut()?;
        let pulled = match frame {
            Frame::Initial(commands) => match commands.next() {
                Some(Ok(Command::Atomic(command))) => Pulled::Atomic(command),
                Some(Ok(Command::Loop { count, body })) => Pulled::Loop(count, body),
                Some(Err(e)) => Pulled::Failed(e),
                None => Pulled::Exhausted,
            },
            Frame::Counted(frame) if frame.finished() => Pulled::Exhausted,
            Frame::Counted(frame) => match frame.next_command() {
                Some(Command::Atomic(command)) => Pulled::Atomic(command.clone()),
                Some(Command::Loop { count, body }) => Pulled::Loop(*count, body.clone()),
                None => {
                    frame.end_iteration();
                    Pulled::Continue
                }
            },
        };
        Some(pulled)
    }

    fn push_loop(&mut self, count: i64, body: LoopBody) {
        if count <= 0 {
            warn!(count, "loop count is not positive, skipping body");
            return;
        }
        if body.is_empty() {
            debug!(count, "skipping loop with empty body");
            return;
        }
        debug!(count, depth = self.frames.len(), "entering loop");
        self.frames.push(Frame::Counted(LoopFrame::new(count, body)));
    }

    /// Note an atomic command coming out of the innermost frame.
    fn record_output(&mut self) {
        if let Some(Frame::Counted(frame)) = self.frames.last_mut() {
            frame.record_output();
        }
    }

    fn pop_frame(&mut self) {
        if let Some(Frame::Counted(done)) = self.frames.pop() {
            if done.produced {
                self.record_output();
            }
        }
    }
}

impl<I, E> Iterator for Flatten<I>
where
    I: Iterator<Item = Result<Command, E>>,
{
    type Item = Result<AtomicCommand, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.pull()? {
                Pulled::Atomic(command) => {
                    self.record_output();
                    return Some(Ok(command));
                }
                Pulled::Loop(count, body) => self.push_loop(count, body),
                Pulled::Failed(e) => {
                    self.frames.clear();
                    return Some(Err(e));
                }
                Pulled::Exhausted => self.pop_frame(),
                Pulled::Continue => {}
            }
        }
    }
}

/// Adds [`flatten_loops`](FlattenExt::flatten_loops) to structural command streams.
pub trait FlattenExt<E>: Iterator<Item = Result<Command, E>> + Sized {
    fn flatten_loops(self) -> Flatten<Self> {
        Flatten::new(self)
    }
}

impl<I, E> FlattenExt<E> for I where I: Iterator<Item = Result<Command, E>> {}
