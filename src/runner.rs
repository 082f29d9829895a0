//! Drives the atomic command stream against an [`AnimationContext`].

use std::fmt;

use tracing::{debug, trace};

use crate::context::{AnimationContext, AnimationHooks, ContextError};
use crate::dsl::{self, Commands, ScriptError};

/// Anything that can stop a run: a bad script or a bad name.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    Script(ScriptError),
    Context(ContextError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Script(e) => write!(f, "{e}"),
            RunError::Context(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Script(e) => Some(e),
            RunError::Context(e) => Some(e),
        }
    }
}

impl From<ScriptError> for RunError {
    fn from(e: ScriptError) -> Self {
        RunError::Script(e)
    }
}

impl From<ContextError> for RunError {
    fn from(e: ContextError) -> Self {
        RunError::Context(e)
    }
}

/// Run every atomic command of `source` against `context`.
///
/// Returns the number of commands executed. Commands before the first
/// error have already been applied when an error comes back.
pub fn execute_all<H: AnimationHooks>(
    source: &str,
    context: &mut AnimationContext<H>,
) -> Result<usize, RunError> {
    let mut executed = 0;
    for command in dsl::commands(source) {
        command?.execute(context)?;
        executed += 1;
    }
    debug!(executed, "script finished");
    Ok(executed)
}

/// Outcome of a single [`Player::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// One command ran; carries the name it targeted.
    Executed(String),
    Finished,
    /// The step hit an error. See [`Player::error`].
    Failed,
}

/// Step-wise executor for hosts that animate between commands.
///
/// Only pulls a command when asked, so stopping early never reads the rest
/// of the script.
pub struct Player<'src, H: AnimationHooks = crate::context::NoHooks> {
    context: AnimationContext<H>,
    commands: Commands<'src>,
    error: Option<RunError>,
    executed: usize,
    finished: bool,
    failed: bool,
}

impl<'src, H: AnimationHooks> Player<'src, H> {
    pub fn new(source: &'src str, context: AnimationContext<H>) -> Self {
        Self {
            context,
            commands: dsl::commands(source),
            error: None,
            executed: 0,
            finished: false,
            failed: false,
        }
    }

    /// Execute the next atomic command.
    ///
    /// A player that failed keeps answering `Failed`, even once the error
    /// has been taken.
    pub fn step(&mut self) -> Step {
        if self.finished {
            return if self.failed {
                Step::Failed
            } else {
                Step::Finished
            };
        }

        let command = match self.commands.next() {
            Some(Ok(command)) => command,
            Some(Err(e)) => return self.fail(e.into()),
            None => {
                self.finished = true;
                debug!(executed = self.executed, "player finished");
                return Step::Finished;
            }
        };

        trace!(%command, "step");
        let name = command.name().to_string();
        match command.execute(&mut self.context) {
            Ok(()) => {
                self.executed += 1;
                Step::Executed(name)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Step until finished or until `limit` commands ran in this call.
    /// Returns the number executed.
    pub fn run(&mut self, limit: Option<usize>) -> usize {
        let mut count = 0;
        while limit.map_or(true, |max| count < max) {
            match self.step() {
                Step::Executed(_) => count += 1,
                Step::Finished | Step::Failed => break,
            }
        }
        count
    }

    /// Drop all objects and start over on a new script. Hooks are kept.
    pub fn restart(&mut self, source: &'src str) {
        self.context.reset();
        self.commands = dsl::commands(source);
        self.error = None;
        self.executed = 0;
        self.finished = false;
        self.failed = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn error(&self) -> Option<&RunError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<RunError> {
        self.error.take()
    }

    /// Commands executed since construction or the last restart.
    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn context(&self) -> &AnimationContext<H> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AnimationContext<H> {
        &mut self.context
    }

    pub fn into_context(self) -> AnimationContext<H> {
        self.context
    }

    fn fail(&mut self, error: RunError) -> Step {
        debug!(%error, "player stopped");
        self.error = Some(error);
        self.finished = true;
        self.failed = true;
        Step::Failed
    }
}
