pub mod builtin;
pub mod error;

mod action;
mod action_kinds;

pub use action::{Action, ActionBuilder, CaptureEnv, Named, NullCaptureEnv};
pub use action_kinds::{ActionKind, ActionKinds};
