//! Integration tests for command-line driven drawing

use designcore::entities::Entity;
use designcore::types::Vector2;
use designcore::{Document, InputOutcome};

/// The canonical line scenario: two points make one entity and one
/// undoable step
#[test]
fn test_line_command_scenario() {
    let mut doc = Document::new().unwrap();
    assert_eq!(doc.prompt(), "Command:");

    doc.on_command("L");
    assert_eq!(doc.prompt(), "Specify first point:");
    doc.on_command("0,0");
    assert_eq!(doc.prompt(), "Specify next point:");
    let outcome = doc.on_command("10,10");
    assert_eq!(outcome, InputOutcome::Committed);

    assert_eq!(doc.scene.len(), 1);
    assert_eq!(doc.scene.history.undo_len(), 1);
    match doc.scene.iter().next().unwrap() {
        Entity::Line(line) => {
            assert_eq!(line.start, Vector2::new(0.0, 0.0));
            assert_eq!(line.end, Vector2::new(10.0, 10.0));
        }
        other => panic!("expected a line, got {:?}", other),
    };
}

/// Escape mid-command leaves the scene and history untouched
#[test]
fn test_escape_is_free_of_side_effects() {
    let mut doc = Document::new().unwrap();
    doc.on_command("C");
    doc.on_command("3,3");
    let outcome = doc.on_command("Escape");
    assert_eq!(outcome, InputOutcome::Cancelled);
    assert_eq!(doc.scene.len(), 0);
    assert_eq!(doc.scene.history.undo_len(), 0);
    assert_eq!(doc.prompt(), "Command:");
}

/// A chain of line segments commits one undo step per segment
#[test]
fn test_polyline_style_line_chain() {
    let mut doc = Document::new().unwrap();
    doc.on_command("Line");
    doc.on_command("0,0");
    doc.on_command("10,0");
    doc.on_command("10,10");
    doc.on_command("0,10");
    doc.on_command("Enter");

    assert_eq!(doc.scene.len(), 3);
    assert_eq!(doc.scene.history.undo_len(), 3);
    assert_eq!(doc.prompt(), "Command:");

    // three undos remove all three segments
    doc.on_command("U");
    doc.on_command("U");
    doc.on_command("U");
    assert_eq!(doc.scene.len(), 0);
}

/// Unknown commands report through the prompt without breaking input
#[test]
fn test_unknown_command_recovers() {
    let mut doc = Document::new().unwrap();
    doc.on_command("CHAMFER");
    assert!(doc.prompt().contains("Unknown command"));
    doc.on_command("PO");
    doc.on_command("1,1");
    assert_eq!(doc.scene.len(), 1);
}

/// Space behaves like Enter
#[test]
fn test_space_ends_repeating_command() {
    let mut doc = Document::new().unwrap();
    doc.on_command("L");
    doc.on_command("0,0");
    doc.on_command("5,5");
    doc.on_command("Space");
    assert_eq!(doc.prompt(), "Command:");
    assert_eq!(doc.scene.len(), 1);
}

/// Erase works through selection and is undoable
#[test]
fn test_erase_and_undo() {
    let mut doc = Document::new().unwrap();
    doc.on_command("PO");
    doc.on_command("1,1");
    doc.on_command("Escape");
    doc.scene.select_all();

    doc.on_command("E");
    assert_eq!(doc.scene.len(), 0);

    doc.on_command("U");
    assert_eq!(doc.scene.len(), 1);
}

/// get_commands exposes the palette in a stable order
#[test]
fn test_command_palette() {
    let doc = Document::new().unwrap();
    let names: Vec<&str> = doc
        .input
        .commands()
        .get_commands()
        .iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(
        names,
        vec!["Point", "Line", "Circle", "Arc", "Text", "Erase", "Move", "Copy", "Undo", "Redo"]
    );
}

/// The arc command builds from centre, start and end points
#[test]
fn test_arc_from_three_points() {
    let mut doc = Document::new().unwrap();
    doc.on_command("A");
    doc.on_command("0,0");
    doc.on_command("5,0");
    doc.on_command("0,5");
    match doc.scene.iter().next().unwrap() {
        Entity::Arc(arc) => {
            assert_eq!(arc.radius, 5.0);
            assert_eq!(arc.start_angle, 0.0);
            assert_eq!(arc.end_angle, 90.0);
        }
        other => panic!("expected an arc, got {:?}", other),
    };
}
