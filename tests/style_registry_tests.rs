//! Integration tests for the style registries

use designcore::entities::PropertyValue;
use designcore::error::CoreError;
use designcore::styles::{StyleItem, StyleManagers};

use proptest::prelude::*;

/// A fresh drawing always carries the mandatory items, each current
#[test]
fn test_fresh_registries_have_defaults() {
    let styles = StyleManagers::new().unwrap();
    assert_eq!(styles.layers.get_cstyle(), "0");
    assert_eq!(styles.text_styles.get_cstyle(), "STANDARD");
    assert_eq!(styles.dim_styles.get_cstyle(), "STANDARD");
    assert_eq!(styles.line_types.get_cstyle(), "ByLayer");
    for name in styles.line_types.indelible_items() {
        assert!(styles.line_types.item_exists(name));
    }
}

/// new_item generates distinct names and never steals the current item
#[test]
fn test_new_layers_unique_and_current_stable() {
    let mut styles = StyleManagers::new().unwrap();
    for _ in 0..5 {
        styles.layers.new_item();
    }
    assert_eq!(styles.layers.item_count(), 6);
    assert_eq!(styles.layers.get_cstyle(), "0");

    let mut names: Vec<String> = styles
        .layers
        .items()
        .iter()
        .map(|l| l.name.to_uppercase())
        .collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 6);
}

/// Deleting the current layer reassigns current to layer "0"
#[test]
fn test_delete_current_layer_reassigns() {
    let mut styles = StyleManagers::new().unwrap();
    let name = styles.layers.new_item().name.clone();
    styles.layers.set_cstyle(&name).unwrap();
    let index = styles.layers.item_index(&name).unwrap();
    styles.layers.delete_style(index).unwrap();
    assert_eq!(styles.layers.get_cstyle(), "0");
}

/// Layer "0" can be neither deleted nor renamed
#[test]
fn test_layer_zero_protected() {
    let mut styles = StyleManagers::new().unwrap();
    let index = styles.layers.item_index("0").unwrap();
    assert!(matches!(
        styles.layers.delete_style(index),
        Err(CoreError::ProtectedItem(_))
    ));
    assert!(matches!(
        styles.layers.rename_style(index, "BASE"),
        Err(CoreError::ProtectedItem(_))
    ));
}

/// update_item routes name changes through the rename rules
#[test]
fn test_update_item_rename_collision() {
    let mut styles = StyleManagers::new().unwrap();
    styles.layers.new_item();
    styles.layers.new_item();
    let first = styles.layers.items()[1].name.clone();
    styles
        .layers
        .update_item(2, "name", &PropertyValue::Text(first.clone()))
        .unwrap();
    let matching = styles
        .layers
        .items()
        .iter()
        .filter(|l| l.name.eq_ignore_ascii_case(&first))
        .count();
    assert_eq!(matching, 1);
}

/// Loading an optional line type twice keeps exactly one copy
#[test]
fn test_optional_line_types_idempotent() {
    let mut styles = StyleManagers::new().unwrap();
    let optional: Vec<_> = styles.line_types.optional_styles().to_vec();
    assert!(!optional.is_empty());
    for style in &optional {
        styles.line_types.add_item(style).unwrap();
        styles.line_types.add_item(style).unwrap();
    }
    assert_eq!(styles.line_types.item_count(), 3 + optional.len());
}

/// Registry lookups are case-insensitive but preserve the stored case
#[test]
fn test_case_insensitive_current() {
    let mut styles = StyleManagers::new().unwrap();
    styles.text_styles.set_cstyle("standard").unwrap();
    assert_eq!(styles.text_styles.get_cstyle(), "STANDARD");
}

proptest! {
    /// Renaming to any requested name never produces duplicates; the
    /// effective name is the request itself or a suffixed variant of it
    #[test]
    fn prop_rename_never_duplicates(requested in "[A-Za-z0-9_]{0,12}") {
        let mut styles = StyleManagers::new().unwrap();
        styles.layers.new_item();
        styles.layers.new_item();
        let effective = styles.layers.rename_style(2, &requested).unwrap();
        if !requested.is_empty() {
            prop_assert!(effective.starts_with(&requested) || effective.eq_ignore_ascii_case(&requested));
        }
        let mut names: Vec<String> = styles
            .layers
            .items()
            .iter()
            .map(|l| l.name.to_uppercase())
            .collect();
        names.sort();
        let before = names.len();
        names.dedup();
        prop_assert_eq!(before, names.len());
    }

    /// Any sequence of new_item calls yields pairwise distinct names
    #[test]
    fn prop_new_items_distinct(count in 1usize..20) {
        let mut styles = StyleManagers::new().unwrap();
        for _ in 0..count {
            styles.layers.new_item();
        }
        let mut names: Vec<String> = styles
            .layers
            .items()
            .iter()
            .map(|l| l.name().to_uppercase())
            .collect();
        names.sort();
        let before = names.len();
        names.dedup();
        prop_assert_eq!(before, names.len());
    }
}
