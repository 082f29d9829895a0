//! animparse: a small S-expression language for 2D scene animation.
//!
//! Scripts go through a lazy pipeline of tokenizer, parser and loop
//! flattener. The resulting atomic commands run against an
//! [`AnimationContext`](context::AnimationContext), which hosts extend with
//! [`AnimationHooks`](context::AnimationHooks).

pub mod config;
pub mod context;
pub mod dsl;
pub mod runner;

pub use context::{AnimationContext, AnimationHooks, ContextError};
pub use dsl::{commands, flatten, parse, tokenize, AtomicCommand, Command, ScriptError};
pub use runner::{execute_all, Player, RunError, Step};
