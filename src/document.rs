//! The drawing document.
//!
//! A [`Document`] ties together the scene, the style registries, the
//! command input machine and the DXF codec behind one façade.  The
//! application shell owns documents and passes them into dispatch; there
//! is no global active document.

use tracing::info;

use crate::commands::{InputManager, InputOutcome};
use crate::entities::PropertyValue;
use crate::error::Result;
use crate::io::dxf;
use crate::notification::{Notification, NotificationCollection, NotificationType};
use crate::property::PropertyManager;
use crate::scene::{Clipboard, Scene, UndoItem};
use crate::styles::{Layer, RegistryKind, StyleManagers};
use crate::types::{DxfVersion, Vector2};

/// Called when the document produces a user-facing notification
pub type NotifyCallback = Box<dyn Fn(&Notification)>;
/// Called when the drawing changed and needs repainting
pub type PaintCallback = Box<dyn Fn()>;

/// A complete drawing: entities, styles, input state and history
pub struct Document {
    version: DxfVersion,
    /// Entity storage, selection and undo history
    pub scene: Scene,
    /// Layer, text style, dimension style and line type registries
    pub styles: StyleManagers,
    /// Command-line input machine
    pub input: InputManager,
    /// Entity clipboard
    pub clipboard: Clipboard,
    properties: PropertyManager,
    notifications: NotificationCollection,
    notify_callback: Option<NotifyCallback>,
    paint_callback: Option<PaintCallback>,
}

impl Document {
    /// Create an empty drawing with the standard defaults
    pub fn new() -> Result<Self> {
        Ok(Document {
            version: DxfVersion::default(),
            scene: Scene::new(),
            styles: StyleManagers::new()?,
            input: InputManager::new(),
            clipboard: Clipboard::new(),
            properties: PropertyManager::new(),
            notifications: NotificationCollection::new(),
            notify_callback: None,
            paint_callback: None,
        })
    }

    /// The document's DXF version
    pub fn version(&self) -> DxfVersion {
        self.version
    }

    /// Versions the codec can write, oldest first
    pub fn supported_dxf_versions(&self) -> &'static [DxfVersion] {
        &DxfVersion::ALL
    }

    /// Notifications raised so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Register the callback fired on every notification
    pub fn set_external_notify_callback(&mut self, callback: NotifyCallback) {
        self.notify_callback = Some(callback);
    }

    /// Register the callback fired when the drawing needs repainting
    pub fn set_external_paint_callback(&mut self, callback: PaintCallback) {
        self.paint_callback = Some(callback);
    }

    /// Feed one command-line token to the document
    pub fn on_command(&mut self, token: &str) -> InputOutcome {
        let outcome = self
            .input
            .on_command(token, &mut self.scene, &mut self.styles);
        match outcome {
            InputOutcome::Committed => self.request_paint(),
            InputOutcome::Undo => {
                self.undo();
            }
            InputOutcome::Redo => {
                self.redo();
            }
            InputOutcome::Pending | InputOutcome::Cancelled => {}
        }
        outcome
    }

    /// The current command-line prompt
    pub fn prompt(&self) -> &str {
        self.input.prompt()
    }

    /// Revert the most recent step; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(item) = self.scene.history.pop_undo() else {
            return false;
        };
        item.revert(&mut self.scene, &mut self.styles);
        self.scene.history.push_redo(item);
        self.request_paint();
        true
    }

    /// Reapply the most recently reverted step; false when there is
    /// nothing to redo
    pub fn redo(&mut self) -> bool {
        let Some(item) = self.scene.history.pop_redo() else {
            return false;
        };
        item.reapply(&mut self.scene, &mut self.styles);
        self.scene.history.push_undo(item);
        self.request_paint();
        true
    }

    /// Run a style registry edit as one undoable step.
    ///
    /// The whole registry is captured either side of the edit; a failed
    /// edit records nothing (partial changes inside `edit` are the
    /// closure's responsibility to avoid).
    pub fn edit_registry<R>(
        &mut self,
        kind: RegistryKind,
        edit: impl FnOnce(&mut StyleManagers) -> Result<R>,
    ) -> Result<R> {
        let before = self.styles.snapshot(kind);
        let value = edit(&mut self.styles)?;
        let after = self.styles.snapshot(kind);
        self.scene.history.push(UndoItem::Registry { before, after });
        self.request_paint();
        Ok(value)
    }

    /// Look up a layer by name, falling back to layer "0".
    ///
    /// Entities can reference layers that were deleted later; rendering
    /// treats them as being on the default layer.
    pub fn resolve_layer(&self, name: &str) -> &Layer {
        self.styles
            .layers
            .item_by_name(name)
            .or_else(|_| self.styles.layers.item_by_name("0"))
            .unwrap_or_else(|_| &self.styles.layers.items()[0])
    }

    // Property panel access, operating on the selection.

    /// Distinct entity type names in the selection, sorted
    pub fn get_item_types(&self) -> Vec<&'static str> {
        self.properties.get_item_types(&self.scene)
    }

    /// Editable property names for a selected type
    pub fn get_item_properties(&self, item_type: &str) -> Vec<&'static str> {
        self.properties.get_item_properties(&self.scene, item_type)
    }

    /// Property value from the first selected entity of a type
    pub fn get_item_property_value(
        &self,
        item_type: &str,
        property: &str,
    ) -> Option<PropertyValue> {
        self.properties
            .get_item_property_value(&self.scene, item_type, property)
    }

    /// Set a property across the selection as one undoable step
    pub fn set_item_properties(
        &mut self,
        property: &str,
        value: &PropertyValue,
        item_type: Option<&str>,
    ) -> Result<usize> {
        let changed =
            self.properties
                .set_item_properties(&mut self.scene, property, value, item_type)?;
        if changed > 0 {
            self.request_paint();
        }
        Ok(changed)
    }

    /// Copy the selection to the clipboard, relative to `base_point`
    pub fn copy_selection(&mut self, base_point: Vector2) {
        self.clipboard.copy(&self.scene, base_point);
    }

    /// Paste the clipboard at `target` as one undoable step.
    ///
    /// Returns the number of entities added.
    pub fn paste(&mut self, target: Vector2) -> usize {
        let pasted = self.clipboard.paste(&mut self.scene, target);
        if !pasted.is_empty() {
            self.request_paint();
        }
        pasted.len()
    }

    /// Replace the drawing with the contents of a DXF text.
    ///
    /// Parsing happens against a staging drawing; on any parse error the
    /// live document is left untouched.  Opening clears selection,
    /// history and clipboard.
    pub fn open_file(&mut self, text: &str) -> Result<()> {
        let staged = dxf::read_drawing(text)?;
        info!(
            version = staged.version.label(),
            entities = staged.scene.len(),
            "drawing opened"
        );
        self.version = staged.version;
        self.scene = staged.scene;
        self.styles = staged.styles;
        self.clipboard.clear();
        self.input = InputManager::new();
        for notification in staged.notifications.iter() {
            self.notify(notification.clone());
        }
        self.notify(Notification::new(NotificationType::Info, "Drawing opened"));
        self.request_paint();
        Ok(())
    }

    /// Serialize the drawing to DXF text at the given version
    pub fn save_file(&mut self, version: DxfVersion) -> Result<String> {
        let output = dxf::write_drawing(&self.scene, &self.styles, version, |notification| {
            if let Some(callback) = &self.notify_callback {
                callback(&notification);
            }
            self.notifications.push(notification);
        });
        self.version = version;
        self.notify(Notification::new(
            NotificationType::Info,
            format!("Drawing saved as {}", version.label()),
        ));
        Ok(output)
    }

    /// Raise a notification and fire the external callback
    pub fn notify(&mut self, notification: Notification) {
        if let Some(callback) = &self.notify_callback {
            callback(&notification);
        }
        self.notifications.push(notification);
    }

    fn request_paint(&self) {
        if let Some(callback) = &self.paint_callback {
            callback();
        }
    }
}
