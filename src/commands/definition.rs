//! Command registry.
//!
//! Every drawing command is described by a static [`CommandDefinition`]:
//! its name, keyboard shortcut and the ordered arguments it prompts for.
//! The definitions drive the input state machine; the command palette UI
//! lists them via [`CommandManager::get_commands`].

use bitflags::bitflags;

/// Whether a command creates or edits entities, or operates on the
/// document itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Draws or edits scene entities
    Entity,
    /// Acts on the document (undo, redo)
    Tool,
}

/// The kind of value one command step expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A coordinate, entered as "x,y"
    Point,
    /// A positive length, entered as a number or as a point measured
    /// from the previous point
    Distance,
    /// An angle in degrees
    Angle,
    /// Free text
    Text,
    /// The current selection set, filled when the command starts
    Selection,
}

/// One prompted argument of a command
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    /// Expected value kind
    pub kind: ArgKind,
    /// Prompt shown on the command line
    pub prompt: &'static str,
    /// Optional arguments accept Enter and take a default
    pub optional: bool,
}

impl ArgSpec {
    const fn required(kind: ArgKind, prompt: &'static str) -> Self {
        ArgSpec {
            kind,
            prompt,
            optional: false,
        }
    }

    const fn optional(kind: ArgKind, prompt: &'static str) -> Self {
        ArgSpec {
            kind,
            prompt,
            optional: true,
        }
    }
}

bitflags! {
    /// Behavioural flags of a command
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CommandFlags: u8 {
        /// Keeps prompting for further input after each commit
        const REPEATING = 0b0000_0001;
        /// Requires a non-empty selection to start
        const NEEDS_SELECTION = 0b0000_0010;
    }
}

/// A drawing command and the inputs it takes
#[derive(Debug)]
pub struct CommandDefinition {
    /// Full command name, typed on the command line
    pub name: &'static str,
    /// Short alias
    pub shortcut: &'static str,
    /// Entity or tool command
    pub command_type: CommandType,
    /// Prompted arguments in order; selection args come first
    pub args: &'static [ArgSpec],
    /// Behavioural flags
    pub flags: CommandFlags,
}

impl CommandDefinition {
    /// Whether this command repeats until Enter or Escape
    pub fn is_repeating(&self) -> bool {
        self.flags.contains(CommandFlags::REPEATING)
    }

    /// Whether this command needs a selection to start
    pub fn needs_selection(&self) -> bool {
        self.flags.contains(CommandFlags::NEEDS_SELECTION)
    }

    /// Whether a token matches the name or shortcut (case-insensitive)
    pub fn matches(&self, token: &str) -> bool {
        self.name.eq_ignore_ascii_case(token) || self.shortcut.eq_ignore_ascii_case(token)
    }
}

/// The built-in command set
static COMMANDS: [CommandDefinition; 10] = [
    CommandDefinition {
        name: "Point",
        shortcut: "PO",
        command_type: CommandType::Entity,
        args: &[ArgSpec::required(ArgKind::Point, "Specify point:")],
        flags: CommandFlags::REPEATING,
    },
    CommandDefinition {
        name: "Line",
        shortcut: "L",
        command_type: CommandType::Entity,
        args: &[
            ArgSpec::required(ArgKind::Point, "Specify first point:"),
            ArgSpec::required(ArgKind::Point, "Specify next point:"),
        ],
        flags: CommandFlags::REPEATING,
    },
    CommandDefinition {
        name: "Circle",
        shortcut: "C",
        command_type: CommandType::Entity,
        args: &[
            ArgSpec::required(ArgKind::Point, "Specify centre point:"),
            ArgSpec::required(ArgKind::Distance, "Specify radius:"),
        ],
        flags: CommandFlags::empty(),
    },
    CommandDefinition {
        name: "Arc",
        shortcut: "A",
        command_type: CommandType::Entity,
        args: &[
            ArgSpec::required(ArgKind::Point, "Specify centre point:"),
            ArgSpec::required(ArgKind::Point, "Specify start point:"),
            ArgSpec::required(ArgKind::Point, "Specify end point:"),
        ],
        flags: CommandFlags::empty(),
    },
    CommandDefinition {
        name: "Text",
        shortcut: "DT",
        command_type: CommandType::Entity,
        args: &[
            ArgSpec::required(ArgKind::Point, "Specify insertion point:"),
            ArgSpec::optional(ArgKind::Distance, "Specify height <current>:"),
            ArgSpec::required(ArgKind::Text, "Enter text:"),
        ],
        flags: CommandFlags::empty(),
    },
    CommandDefinition {
        name: "Erase",
        shortcut: "E",
        command_type: CommandType::Entity,
        args: &[ArgSpec::required(ArgKind::Selection, "Select entities:")],
        flags: CommandFlags::NEEDS_SELECTION,
    },
    CommandDefinition {
        name: "Move",
        shortcut: "M",
        command_type: CommandType::Entity,
        args: &[
            ArgSpec::required(ArgKind::Selection, "Select entities:"),
            ArgSpec::required(ArgKind::Point, "Specify base point:"),
            ArgSpec::required(ArgKind::Point, "Specify second point:"),
        ],
        flags: CommandFlags::NEEDS_SELECTION,
    },
    CommandDefinition {
        name: "Copy",
        shortcut: "CO",
        command_type: CommandType::Entity,
        args: &[
            ArgSpec::required(ArgKind::Selection, "Select entities:"),
            ArgSpec::required(ArgKind::Point, "Specify base point:"),
            ArgSpec::required(ArgKind::Point, "Specify second point:"),
        ],
        flags: CommandFlags::NEEDS_SELECTION,
    },
    CommandDefinition {
        name: "Undo",
        shortcut: "U",
        command_type: CommandType::Tool,
        args: &[],
        flags: CommandFlags::empty(),
    },
    CommandDefinition {
        name: "Redo",
        shortcut: "RE",
        command_type: CommandType::Tool,
        args: &[],
        flags: CommandFlags::empty(),
    },
];

/// Lookup over the built-in command set
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandManager;

impl CommandManager {
    /// Create a manager over the built-in commands
    pub fn new() -> Self {
        CommandManager
    }

    /// All commands, in palette order
    pub fn get_commands(&self) -> &'static [CommandDefinition] {
        &COMMANDS
    }

    /// Resolve a token to a command by name or shortcut
    pub fn resolve(&self, token: &str) -> Option<&'static CommandDefinition> {
        COMMANDS.iter().find(|c| c.matches(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name_and_shortcut() {
        let manager = CommandManager::new();
        assert_eq!(manager.resolve("line").unwrap().name, "Line");
        assert_eq!(manager.resolve("L").unwrap().name, "Line");
        assert_eq!(manager.resolve("co").unwrap().name, "Copy");
        assert!(manager.resolve("bogus").is_none());
    }

    #[test]
    fn test_shortcuts_are_unique() {
        let manager = CommandManager::new();
        let commands = manager.get_commands();
        for (i, a) in commands.iter().enumerate() {
            for b in &commands[i + 1..] {
                assert!(!a.shortcut.eq_ignore_ascii_case(b.shortcut));
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
    }

    #[test]
    fn test_flags() {
        let manager = CommandManager::new();
        assert!(manager.resolve("Line").unwrap().is_repeating());
        assert!(manager.resolve("Erase").unwrap().needs_selection());
        assert!(!manager.resolve("Circle").unwrap().is_repeating());
    }
}
