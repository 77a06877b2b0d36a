//! # designcore
//!
//! The drawing engine behind a 2D CAD application: entity model, style
//! registries, selection, undo/redo, command-line input and a DXF codec.
//! The crate is UI-agnostic; a shell binds the command line, property
//! panel and canvas to a [`Document`] through plain method calls and two
//! callbacks (notify and paint).
//!
//! ## Features
//!
//! - Entity model with property reflection for UI binding
//! - Layer, text style, dimension style and line type registries with a
//!   single current item each
//! - Polymorphic undo/redo over entity and registry mutations
//! - Token-driven command input (Point, Line, Circle, Arc, Text, Erase,
//!   Move, Copy, Undo, Redo)
//! - Version-aware ASCII DXF reader and writer (R12 through 2018)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use designcore::Document;
//!
//! let mut doc = Document::new()?;
//!
//! // Draw a line from the command line
//! doc.on_command("L");
//! doc.on_command("0,0");
//! doc.on_command("100,50");
//! doc.on_command("Escape");
//!
//! // Save as DXF R2000
//! let text = doc.save_file(designcore::types::DxfVersion::AC1015)?;
//! # Ok::<(), designcore::error::CoreError>(())
//! ```

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod property;
pub mod scene;
pub mod styles;
pub mod types;

pub use commands::{CommandManager, InputManager, InputOutcome};
pub use document::Document;
pub use entities::{Entity, PropertyValue};
pub use error::{CoreError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use property::PropertyManager;
pub use scene::Scene;
pub use styles::StyleManagers;
pub use types::{Colour, DxfVersion, Handle, LineWeight, Vector2};
