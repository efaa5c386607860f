pub mod commands;
pub mod config;
pub mod confirm;
pub mod gate;
pub mod prompt;
pub mod registry;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_util;

pub use commands::build_registry;
pub use config::BotConfig;
pub use confirm::{ConfirmChoice, CONFIRM_TIMEOUT};
pub use gate::{CommandGate, ConsentChoice};
pub use prompt::{assemble_prompt, HISTORY_WINDOW};
pub use registry::{Command, CommandRegistry};
pub use surface::{Invocation, InvocationKind, Surface, TargetUser};
