//! Command-line input state machine.
//!
//! Tokens arrive one at a time from the command line: command names,
//! coordinate pairs, numbers, free text and the key tokens `Escape`,
//! `Enter` and `Space` (Space is treated as Enter).  The machine is
//! either idle or prompting for the next argument of an active command;
//! Escape always returns to idle and discards accumulated input without
//! recording anything.

use tracing::{debug, warn};

use super::definition::{ArgKind, CommandDefinition, CommandManager, CommandType};
use crate::entities::{Arc, Circle, Entity, Line, Point, Text};
use crate::scene::Scene;
use crate::styles::StyleManagers;
use crate::types::Vector2;

/// Key token sent when Escape is pressed
pub const KEY_ESCAPE: &str = "Escape";
/// Key token sent when Enter is pressed
pub const KEY_ENTER: &str = "Enter";
/// Key token sent when Space is pressed; accepted like Enter
pub const KEY_SPACE: &str = "Space";

const IDLE_PROMPT: &str = "Command:";

/// A parsed argument value
#[derive(Debug, Clone, PartialEq)]
enum InputValue {
    Point(Vector2),
    Number(f64),
    Text(String),
}

/// What a token did to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Token consumed; check [`InputManager::prompt`] for what comes next
    Pending,
    /// A command step committed and changed the drawing
    Committed,
    /// The active command was cancelled, discarding its input
    Cancelled,
    /// Undo was requested
    Undo,
    /// Redo was requested
    Redo,
}

#[derive(Debug)]
enum InputState {
    Idle,
    Prompting {
        command: &'static CommandDefinition,
        step: usize,
        values: Vec<InputValue>,
    },
}

/// Per-document command input machine
#[derive(Debug)]
pub struct InputManager {
    commands: CommandManager,
    state: InputState,
    prompt: String,
}

impl Default for InputManager {
    fn default() -> Self {
        InputManager::new()
    }
}

impl InputManager {
    /// Create an idle input manager
    pub fn new() -> Self {
        InputManager {
            commands: CommandManager::new(),
            state: InputState::Idle,
            prompt: IDLE_PROMPT.to_string(),
        }
    }

    /// The command registry
    pub fn commands(&self) -> &CommandManager {
        &self.commands
    }

    /// The current prompt string for the command line UI
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether a command is currently collecting input
    pub fn is_active(&self) -> bool {
        matches!(self.state, InputState::Prompting { .. })
    }

    /// Feed one token to the machine
    pub fn on_command(
        &mut self,
        token: &str,
        scene: &mut Scene,
        styles: &mut StyleManagers,
    ) -> InputOutcome {
        if token == KEY_ESCAPE {
            return self.cancel();
        }
        if token == KEY_ENTER || token == KEY_SPACE {
            return self.on_enter(scene, styles);
        }
        match self.state {
            InputState::Idle => self.start_command(token, scene, styles),
            InputState::Prompting { .. } => self.on_argument(token, scene, styles),
        }
    }

    /// Abandon the active command, discarding its input
    fn cancel(&mut self) -> InputOutcome {
        match self.state {
            InputState::Idle => InputOutcome::Pending,
            InputState::Prompting { command, .. } => {
                debug!(command = command.name, "command cancelled");
                self.reset();
                InputOutcome::Cancelled
            }
        }
    }

    fn reset(&mut self) {
        self.state = InputState::Idle;
        self.prompt = IDLE_PROMPT.to_string();
    }

    fn on_enter(&mut self, scene: &mut Scene, styles: &mut StyleManagers) -> InputOutcome {
        let (command, step) = match &self.state {
            InputState::Idle => return InputOutcome::Pending,
            InputState::Prompting { command, step, .. } => (*command, *step),
        };
        // a repeating command ends on Enter; segments already placed stay
        if command.is_repeating() {
            self.reset();
            return InputOutcome::Pending;
        }
        match command.args.get(step) {
            Some(spec) if spec.optional => {
                self.push_default(step, styles);
                self.advance(scene, styles)
            }
            Some(spec) => {
                self.prompt = format!("A value is required. {}", spec.prompt);
                InputOutcome::Pending
            }
            None => InputOutcome::Pending,
        }
    }

    fn start_command(
        &mut self,
        token: &str,
        scene: &mut Scene,
        styles: &mut StyleManagers,
    ) -> InputOutcome {
        let Some(command) = self.commands.resolve(token) else {
            warn!(token, "unknown command");
            self.prompt = format!("Unknown command \"{}\". {}", token, IDLE_PROMPT);
            return InputOutcome::Pending;
        };
        if command.command_type == CommandType::Tool {
            return match command.name {
                "Undo" => InputOutcome::Undo,
                _ => InputOutcome::Redo,
            };
        }
        if command.needs_selection() && scene.selection.is_empty() {
            self.prompt = format!("Nothing selected. {}", IDLE_PROMPT);
            return InputOutcome::Pending;
        }
        let step = first_prompted_step(command, 0);
        self.state = InputState::Prompting {
            command,
            step,
            values: Vec::new(),
        };
        if step >= command.args.len() {
            // all arguments were selection args; commit at once
            return self.commit(scene, styles);
        }
        self.prompt = command.args[step].prompt.to_string();
        InputOutcome::Pending
    }

    fn on_argument(
        &mut self,
        token: &str,
        scene: &mut Scene,
        styles: &mut StyleManagers,
    ) -> InputOutcome {
        let (command, step) = match &self.state {
            InputState::Prompting { command, step, .. } => (*command, *step),
            InputState::Idle => return InputOutcome::Pending,
        };
        let spec = &command.args[step];
        let parsed = match spec.kind {
            ArgKind::Point => parse_point(token).map(InputValue::Point),
            ArgKind::Distance => self.parse_distance(token),
            ArgKind::Angle => parse_number(token).map(InputValue::Number),
            ArgKind::Text => Ok(InputValue::Text(token.to_string())),
            ArgKind::Selection => Ok(InputValue::Text(String::new())),
        };
        match parsed {
            Ok(value) => {
                if let InputState::Prompting { values, .. } = &mut self.state {
                    values.push(value);
                }
                self.advance(scene, styles)
            }
            Err(message) => {
                debug!(token, step, "input rejected: {}", message);
                self.prompt = format!("{} {}", message, spec.prompt);
                InputOutcome::Pending
            }
        }
    }

    /// Parse a distance token: a positive number, or a point measured
    /// from the most recent point argument
    fn parse_distance(&self, token: &str) -> Result<InputValue, String> {
        if let Ok(number) = parse_number(token) {
            if number <= 0.0 {
                return Err("Distance must be positive.".to_string());
            }
            return Ok(InputValue::Number(number));
        }
        let point = parse_point(token)?;
        let reference = match &self.state {
            InputState::Prompting { values, .. } => values.iter().rev().find_map(|v| match v {
                InputValue::Point(p) => Some(*p),
                _ => None,
            }),
            InputState::Idle => None,
        };
        match reference {
            Some(reference) => {
                let distance = reference.distance(&point);
                if distance <= 0.0 {
                    Err("Distance must be positive.".to_string())
                } else {
                    Ok(InputValue::Number(distance))
                }
            }
            None => Err("Requires a number.".to_string()),
        }
    }

    fn push_default(&mut self, step: usize, styles: &StyleManagers) {
        let default = self.default_for(step, styles);
        if let Some(default) = default {
            if let InputState::Prompting { values, .. } = &mut self.state {
                values.push(default);
            }
        }
    }

    fn default_for(&self, step: usize, styles: &StyleManagers) -> Option<InputValue> {
        match &self.state {
            InputState::Prompting { command, .. } => match (command.name, step) {
                // text height defaults to the current style's fixed height
                ("Text", 1) => {
                    let height = styles
                        .text_styles
                        .item_by_name(styles.text_styles.get_cstyle())
                        .map(|s| s.text_height)
                        .unwrap_or(0.0);
                    Some(InputValue::Number(if height > 0.0 { height } else { 2.5 }))
                }
                _ => None,
            },
            InputState::Idle => None,
        }
    }

    /// Move to the next step, committing when the argument list is done
    fn advance(&mut self, scene: &mut Scene, styles: &mut StyleManagers) -> InputOutcome {
        let (command, step) = match &self.state {
            InputState::Prompting { command, step, .. } => (*command, *step),
            InputState::Idle => return InputOutcome::Pending,
        };
        let next = first_prompted_step(command, step + 1);
        if next >= command.args.len() {
            return self.commit(scene, styles);
        }
        if let InputState::Prompting { step, .. } = &mut self.state {
            *step = next;
        }
        self.prompt = command.args[next].prompt.to_string();
        InputOutcome::Pending
    }

    /// Apply the collected command to the scene as one undo step
    fn commit(&mut self, scene: &mut Scene, styles: &mut StyleManagers) -> InputOutcome {
        let (command, values) = match &mut self.state {
            InputState::Prompting { command, values, .. } => {
                (*command, std::mem::take(values))
            }
            InputState::Idle => return InputOutcome::Pending,
        };
        let outcome = match command.name {
            "Point" => {
                let location = point_arg(&values, 0);
                let mut entity = Entity::Point(Point::at(location));
                stamp(&mut entity, styles);
                scene.add_entities(vec![entity]);
                // keep prompting for further points
                self.restart_repeating(command, Vec::new());
                InputOutcome::Committed
            }
            "Line" => {
                let start = point_arg(&values, 0);
                let end = point_arg(&values, 1);
                let mut entity = Entity::Line(Line::from_points(start, end));
                stamp(&mut entity, styles);
                scene.add_entities(vec![entity]);
                // the segment end becomes the next segment's start
                self.restart_repeating(command, vec![InputValue::Point(end)]);
                InputOutcome::Committed
            }
            "Circle" => {
                let centre = point_arg(&values, 0);
                let radius = number_arg(&values, 1);
                let mut entity = Entity::Circle(Circle::new(centre, radius));
                stamp(&mut entity, styles);
                scene.add_entities(vec![entity]);
                self.reset();
                InputOutcome::Committed
            }
            "Arc" => {
                let centre = point_arg(&values, 0);
                let start = point_arg(&values, 1);
                let end = point_arg(&values, 2);
                let mut entity = Entity::Arc(Arc::from_points(centre, start, end));
                stamp(&mut entity, styles);
                scene.add_entities(vec![entity]);
                self.reset();
                InputOutcome::Committed
            }
            "Text" => {
                let insertion = point_arg(&values, 0);
                let height = number_arg(&values, 1);
                let string = text_arg(&values, 2);
                let mut text = Text::new(insertion, height, string);
                text.style_name = styles.text_styles.get_cstyle().to_string();
                let mut entity = Entity::Text(text);
                stamp(&mut entity, styles);
                scene.add_entities(vec![entity]);
                self.reset();
                InputOutcome::Committed
            }
            "Erase" => {
                let handles = scene.selection.handles().to_vec();
                scene.erase_entities(&handles);
                self.reset();
                InputOutcome::Committed
            }
            "Move" => {
                // the selection arg prompts nothing, so the two points
                // sit at indices 0 and 1
                let offset = point_arg(&values, 1) - point_arg(&values, 0);
                translate_selection(scene, offset, false);
                self.reset();
                InputOutcome::Committed
            }
            "Copy" => {
                let offset = point_arg(&values, 1) - point_arg(&values, 0);
                translate_selection(scene, offset, true);
                self.reset();
                InputOutcome::Committed
            }
            other => {
                warn!(command = other, "command has no commit handler");
                self.reset();
                InputOutcome::Pending
            }
        };
        outcome
    }

    /// Re-arm a repeating command with carried-over values
    fn restart_repeating(
        &mut self,
        command: &'static CommandDefinition,
        carried: Vec<InputValue>,
    ) {
        let step = carried.len().min(command.args.len().saturating_sub(1));
        self.prompt = command.args[step].prompt.to_string();
        self.state = InputState::Prompting {
            command,
            step,
            values: carried,
        };
    }
}

/// First argument index at or after `from` that actually prompts
fn first_prompted_step(command: &CommandDefinition, from: usize) -> usize {
    let mut step = from;
    while step < command.args.len() && command.args[step].kind == ArgKind::Selection {
        step += 1;
    }
    step
}

/// Move or copy the selection by an offset as one undo step
fn translate_selection(scene: &mut Scene, offset: Vector2, copy: bool) {
    let handles = scene.selection.handles().to_vec();
    if copy {
        let mut copies = Vec::with_capacity(handles.len());
        for handle in &handles {
            if let Some(entity) = scene.entity(*handle) {
                let mut duplicate = entity.clone();
                duplicate.translate(offset);
                copies.push(duplicate);
            }
        }
        scene.add_entities(copies);
    } else {
        let mut before = Vec::with_capacity(handles.len());
        let mut after = Vec::with_capacity(handles.len());
        for handle in &handles {
            if let Some(entity) = scene.entity_mut(*handle) {
                before.push(entity.clone());
                entity.translate(offset);
                after.push(entity.clone());
            }
        }
        scene.record_modification(before, after);
    }
}

/// Apply current styles to a freshly created entity
fn stamp(entity: &mut Entity, styles: &StyleManagers) {
    let common = entity.common_mut();
    common.layer = styles.layers.get_cstyle().to_string();
}

fn parse_point(token: &str) -> Result<Vector2, String> {
    let mut parts = token.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Requires a point (x,y).".to_string());
    };
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|_| "Requires a point (x,y).".to_string())?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| "Requires a point (x,y).".to_string())?;
    if !x.is_finite() || !y.is_finite() {
        return Err("Requires a point (x,y).".to_string());
    }
    Ok(Vector2::new(x, y))
}

fn parse_number(token: &str) -> Result<f64, String> {
    let value: f64 = token
        .trim()
        .parse()
        .map_err(|_| "Requires a number.".to_string())?;
    if !value.is_finite() {
        return Err("Requires a number.".to_string());
    }
    Ok(value)
}

fn point_arg(values: &[InputValue], index: usize) -> Vector2 {
    match values.get(index) {
        Some(InputValue::Point(p)) => *p,
        _ => Vector2::ZERO,
    }
}

fn number_arg(values: &[InputValue], index: usize) -> f64 {
    match values.get(index) {
        Some(InputValue::Number(n)) => *n,
        _ => 0.0,
    }
}

fn text_arg(values: &[InputValue], index: usize) -> String {
    match values.get(index) {
        Some(InputValue::Text(t)) => t.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (InputManager, Scene, StyleManagers) {
        (
            InputManager::new(),
            Scene::new(),
            StyleManagers::new().unwrap(),
        )
    }

    #[test]
    fn test_line_two_points_commits_one_segment() {
        let (mut input, mut scene, mut styles) = setup();
        assert_eq!(
            input.on_command("Line", &mut scene, &mut styles),
            InputOutcome::Pending
        );
        assert_eq!(input.prompt(), "Specify first point:");
        input.on_command("0,0", &mut scene, &mut styles);
        assert_eq!(input.prompt(), "Specify next point:");
        let outcome = input.on_command("10,10", &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Committed);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.history.undo_len(), 1);
        // still prompting for the next segment
        assert!(input.is_active());
        assert_eq!(input.prompt(), "Specify next point:");
    }

    #[test]
    fn test_line_continues_from_last_point() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("L", &mut scene, &mut styles);
        input.on_command("0,0", &mut scene, &mut styles);
        input.on_command("10,0", &mut scene, &mut styles);
        input.on_command("10,10", &mut scene, &mut styles);
        assert_eq!(scene.len(), 2);
        let second = scene.iter().nth(1).unwrap();
        match second {
            Entity::Line(line) => {
                assert_eq!(line.start, Vector2::new(10.0, 0.0));
                assert_eq!(line.end, Vector2::new(10.0, 10.0));
            }
            other => panic!("expected a line, got {:?}", other),
        }
        // Enter ends the run
        input.on_command(KEY_ENTER, &mut scene, &mut styles);
        assert!(!input.is_active());
    }

    #[test]
    fn test_escape_discards_without_undo_record() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("Circle", &mut scene, &mut styles);
        input.on_command("5,5", &mut scene, &mut styles);
        let outcome = input.on_command(KEY_ESCAPE, &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Cancelled);
        assert_eq!(scene.len(), 0);
        assert_eq!(scene.history.undo_len(), 0);
        assert_eq!(input.prompt(), "Command:");
    }

    #[test]
    fn test_malformed_point_reprompts() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("Line", &mut scene, &mut styles);
        let outcome = input.on_command("not-a-point", &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Pending);
        assert!(input.prompt().contains("Specify first point:"));
        // a valid point still works afterwards
        input.on_command("1,1", &mut scene, &mut styles);
        assert_eq!(input.prompt(), "Specify next point:");
    }

    #[test]
    fn test_unknown_command_is_non_fatal() {
        let (mut input, mut scene, mut styles) = setup();
        let outcome = input.on_command("FILLET", &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Pending);
        assert!(input.prompt().contains("Unknown command"));
        assert!(!input.is_active());
        // a real command still starts
        input.on_command("C", &mut scene, &mut styles);
        assert!(input.is_active());
    }

    #[test]
    fn test_circle_radius_from_number_or_point() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("C", &mut scene, &mut styles);
        input.on_command("0,0", &mut scene, &mut styles);
        input.on_command("2.5", &mut scene, &mut styles);
        assert_eq!(scene.len(), 1);

        input.on_command("C", &mut scene, &mut styles);
        input.on_command("0,0", &mut scene, &mut styles);
        input.on_command("3,4", &mut scene, &mut styles);
        match scene.iter().nth(1).unwrap() {
            Entity::Circle(circle) => assert_eq!(circle.radius, 5.0),
            other => panic!("expected a circle, got {:?}", other),
        };
    }

    #[test]
    fn test_text_height_default_on_enter() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("DT", &mut scene, &mut styles);
        input.on_command("1,1", &mut scene, &mut styles);
        input.on_command(KEY_ENTER, &mut scene, &mut styles);
        let outcome = input.on_command("hello", &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Committed);
        match scene.iter().next().unwrap() {
            Entity::Text(text) => {
                assert_eq!(text.height, 2.5);
                assert_eq!(text.string, "hello");
            }
            other => panic!("expected text, got {:?}", other),
        };
    }

    #[test]
    fn test_enter_mid_required_args_reprompts() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("C", &mut scene, &mut styles);
        let outcome = input.on_command(KEY_ENTER, &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Pending);
        assert!(input.is_active());
        assert!(input.prompt().contains("Specify centre point:"));
    }

    #[test]
    fn test_erase_needs_selection() {
        let (mut input, mut scene, mut styles) = setup();
        input.on_command("E", &mut scene, &mut styles);
        assert!(!input.is_active());
        assert!(input.prompt().contains("Nothing selected"));

        scene.add_entities(vec![Entity::Point(Point::at(Vector2::ZERO))]);
        scene.select_all();
        let outcome = input.on_command("E", &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Committed);
        assert_eq!(scene.len(), 0);
        assert!(scene.selection.is_empty());
    }

    #[test]
    fn test_move_translates_selection() {
        let (mut input, mut scene, mut styles) = setup();
        scene.add_entities(vec![Entity::Point(Point::at(Vector2::new(1.0, 1.0)))]);
        scene.select_all();
        input.on_command("M", &mut scene, &mut styles);
        input.on_command("0,0", &mut scene, &mut styles);
        let outcome = input.on_command("4,3", &mut scene, &mut styles);
        assert_eq!(outcome, InputOutcome::Committed);
        match scene.iter().next().unwrap() {
            Entity::Point(p) => assert_eq!(p.location, Vector2::new(5.0, 4.0)),
            other => panic!("expected a point, got {:?}", other),
        };
    }

    #[test]
    fn test_copy_keeps_original_and_translates_duplicate() {
        let (mut input, mut scene, mut styles) = setup();
        scene.add_entities(vec![Entity::Point(Point::at(Vector2::new(1.0, 2.0)))]);
        scene.select_all();
        input.on_command("CO", &mut scene, &mut styles);
        input.on_command("0,0", &mut scene, &mut styles);
        input.on_command("10,0", &mut scene, &mut styles);
        assert_eq!(scene.len(), 2);
        match scene.iter().next().unwrap() {
            Entity::Point(p) => assert_eq!(p.location, Vector2::new(1.0, 2.0)),
            other => panic!("expected a point, got {:?}", other),
        };
        match scene.iter().nth(1).unwrap() {
            Entity::Point(p) => assert_eq!(p.location, Vector2::new(11.0, 2.0)),
            other => panic!("expected a point, got {:?}", other),
        };
    }

    #[test]
    fn test_undo_redo_tokens() {
        let (mut input, mut scene, mut styles) = setup();
        assert_eq!(
            input.on_command("U", &mut scene, &mut styles),
            InputOutcome::Undo
        );
        assert_eq!(
            input.on_command("Redo", &mut scene, &mut styles),
            InputOutcome::Redo
        );
    }

    #[test]
    fn test_new_entity_takes_current_layer() {
        let (mut input, mut scene, mut styles) = setup();
        let name = styles.layers.new_item().name.clone();
        styles.layers.set_cstyle(&name).unwrap();
        input.on_command("PO", &mut scene, &mut styles);
        input.on_command("1,2", &mut scene, &mut styles);
        assert_eq!(scene.iter().next().unwrap().common().layer, name);
    }
}
