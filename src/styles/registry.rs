//! Generic style registry.
//!
//! Layers, text styles, dimension styles and line types all share one
//! lifecycle: an ordered collection of named items with case-insensitive
//! unique names and exactly one "current" item.  Indices are positional
//! within the live collection, not stable ids; callers must re-resolve an
//! index after any structural change.

use crate::entities::PropertyValue;
use crate::error::{CoreError, Result};

/// Behaviour required of a registry item type
pub trait StyleItem: Clone {
    /// The item's name
    fn name(&self) -> &str;

    /// Rename the item; uniqueness is enforced by the registry
    fn set_name(&mut self, name: String);

    /// Built-in items can be neither deleted nor renamed
    fn is_indelible(&self) -> bool {
        false
    }

    /// Base used when generating default names ("NEW_LAYER" etc.)
    fn default_base_name() -> &'static str;

    /// Create an item with default property values and the given name
    fn with_name(name: String) -> Self;

    /// Read a typed property by name
    fn get_property(&self, name: &str) -> Option<PropertyValue>;

    /// Write a typed property by name, validating type and range
    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()>;
}

/// Point-in-time copy of a registry, used by undo records
#[derive(Debug, Clone)]
pub struct StyleSnapshot<T: StyleItem> {
    items: Vec<T>,
    current: String,
}

/// Ordered collection of named style items with a single current item
#[derive(Debug, Clone)]
pub struct StyleRegistry<T: StyleItem> {
    items: Vec<T>,
    /// Name of the current item; kept in step with renames and deletes
    current: String,
    /// Item kind for error messages ("layer", "text style", ...)
    kind: &'static str,
}

impl<T: StyleItem> StyleRegistry<T> {
    /// Create an empty registry
    pub fn new(kind: &'static str) -> Self {
        StyleRegistry {
            items: Vec::new(),
            current: String::new(),
            kind,
        }
    }

    /// All items in collection order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Look up an item by name (case-insensitive)
    pub fn item_by_name(&self, name: &str) -> Result<&T> {
        self.items
            .iter()
            .find(|i| i.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::not_found(self.kind, name))
    }

    /// Look up an item mutably by name (case-insensitive)
    pub fn item_by_name_mut(&mut self, name: &str) -> Result<&mut T> {
        let kind = self.kind;
        self.items
            .iter_mut()
            .find(|i| i.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::not_found(kind, name))
    }

    /// Positional index of an item by name, if present
    pub fn item_index(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.name().eq_ignore_ascii_case(name))
    }

    /// Check whether an item exists (case-insensitive)
    pub fn item_exists(&self, name: &str) -> bool {
        self.item_index(name).is_some()
    }

    /// Item at a positional index
    pub fn item_at(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(CoreError::IndexOutOfRange(index))
    }

    /// Add a pre-built item; fails if the name is already taken
    pub fn add_item(&mut self, item: T) -> Result<&T> {
        if self.item_exists(item.name()) {
            return Err(CoreError::invalid_value(
                "name",
                format!("{} '{}' already exists", self.kind, item.name()),
            ));
        }
        if self.current.is_empty() {
            self.current = item.name().to_string();
        }
        self.items.push(item);
        Ok(self.items.last().unwrap())
    }

    /// Append a new item with a generated unique name and default values.
    ///
    /// Does not change the current item.
    pub fn new_item(&mut self) -> &T {
        let name = self.unique_name(T::default_base_name(), None);
        self.items.push(T::with_name(name));
        if self.current.is_empty() {
            self.current = self.items[0].name().to_string();
        }
        self.items.last().unwrap()
    }

    /// Update one property of the item at `index`.
    ///
    /// "name" routes through [`rename_style`](Self::rename_style) so the
    /// uniqueness rules always apply.
    pub fn update_item(&mut self, index: usize, property: &str, value: &PropertyValue) -> Result<()> {
        if property == "name" {
            let requested = value.expect_text(property)?.to_string();
            self.rename_style(index, &requested)?;
            return Ok(());
        }
        let item = self
            .items
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange(index))?;
        item.set_property(property, value)
    }

    /// Rename the item at `index`, returning the effective name.
    ///
    /// Permissive-rename policy: a requested name that is empty or collides
    /// with another item (case-insensitive) is substituted with a generated
    /// unique alternative rather than failing.  Callers must re-read the
    /// returned name instead of assuming the request applied verbatim.
    pub fn rename_style(&mut self, index: usize, new_name: &str) -> Result<String> {
        let item = self
            .items
            .get(index)
            .ok_or(CoreError::IndexOutOfRange(index))?;
        if item.is_indelible() {
            return Err(CoreError::ProtectedItem(item.name().to_string()));
        }
        let old_name = item.name().to_string();

        // Renaming to the item's own name (any case) is a plain case change
        let effective = if !new_name.is_empty() && new_name.eq_ignore_ascii_case(&old_name) {
            new_name.to_string()
        } else if new_name.is_empty() {
            self.unique_name(T::default_base_name(), Some(index))
        } else {
            self.unique_name(new_name, Some(index))
        };

        self.items[index].set_name(effective.clone());
        if self.current.eq_ignore_ascii_case(&old_name) {
            self.current = effective.clone();
        }
        Ok(effective)
    }

    /// Delete the item at `index`.
    ///
    /// Built-in items fail with `ProtectedItem`.  If the deleted item was
    /// current, current is reassigned to an indelible item when one exists,
    /// otherwise to the first remaining item.
    pub fn delete_style(&mut self, index: usize) -> Result<()> {
        let item = self
            .items
            .get(index)
            .ok_or(CoreError::IndexOutOfRange(index))?;
        if item.is_indelible() {
            return Err(CoreError::ProtectedItem(item.name().to_string()));
        }
        let removed = self.items.remove(index);

        if self.current.eq_ignore_ascii_case(removed.name()) {
            self.current = self
                .items
                .iter()
                .find(|i| i.is_indelible())
                .or_else(|| self.items.first())
                .map(|i| i.name().to_string())
                .unwrap_or_default();
        }
        Ok(())
    }

    /// Set the current item by name
    pub fn set_cstyle(&mut self, name: &str) -> Result<()> {
        let canonical = self.item_by_name(name)?.name().to_string();
        self.current = canonical;
        Ok(())
    }

    /// Name of the current item
    pub fn get_cstyle(&self) -> &str {
        &self.current
    }

    /// The current item
    pub fn current_item(&self) -> Result<&T> {
        self.item_by_name(&self.current.clone())
    }

    /// Generate a unique name from a requested base.
    ///
    /// Returns the base itself when free, otherwise `"{base}_{n}"` with the
    /// smallest `n >= 1` that is unique (case-insensitive).  `exclude` skips
    /// one index when checking, so an item can keep its own name.
    fn unique_name(&self, base: &str, exclude: Option<usize>) -> String {
        let taken = |candidate: &str| {
            self.items.iter().enumerate().any(|(i, item)| {
                Some(i) != exclude && item.name().eq_ignore_ascii_case(candidate)
            })
        };
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{}_{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Capture a point-in-time copy for undo records
    pub fn snapshot(&self) -> StyleSnapshot<T> {
        StyleSnapshot {
            items: self.items.clone(),
            current: self.current.clone(),
        }
    }

    /// Restore a previously captured snapshot
    pub fn restore(&mut self, snapshot: &StyleSnapshot<T>) {
        self.items = snapshot.items.clone();
        self.current = snapshot.current.clone();
    }
}
