//! Classnote core: turns free-form Korean teacher commands into schedule,
//! incident-record and parent-communication actions.

pub mod brain;
pub mod config;
pub mod error;
pub mod roster;

#[cfg(test)]
mod tests;

pub use brain::{ActionIntent, CommandInterpreter, Interpretation};
pub use config::InterpreterConfig;
pub use error::AppError;
pub use roster::Roster;
