pub mod error;

mod command;
mod command_writer;
mod designate_mode;
mod dispatcher;
mod trace;

pub use command::{Command, CommandKind};
pub use command_writer::CommandWriter;
pub use designate_mode::DesignateMode;
pub use dispatcher::CommandDispatcher;
pub use trace::{TraceLog, TraceNode};
