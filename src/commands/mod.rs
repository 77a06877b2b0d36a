//! Drawing commands and command-line input handling

pub mod definition;
pub mod input;

pub use definition::{ArgKind, ArgSpec, CommandDefinition, CommandFlags, CommandManager, CommandType};
pub use input::{InputManager, InputOutcome, KEY_ENTER, KEY_ESCAPE, KEY_SPACE};
