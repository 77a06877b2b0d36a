//! ASCII DXF reader.
//!
//! Parses into a fresh staging drawing; callers swap it in only on
//! success so a malformed file never corrupts the live document.
//! Unknown sections, table records and entity types are skipped with a
//! notification, never an abort.

use tracing::debug;

use super::code_pair::{CodePair, CodePairScanner};
use crate::entities::{
    AlignedDimension, Arc, Circle, Entity, EntityCommon, Hatch, HorizontalAlignment, Insert, Line,
    Point, Polyline, Text, VerticalAlignment,
};
use crate::error::{CoreError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::scene::Scene;
use crate::styles::{DimStyle, Layer, LineType, StyleManagers, TextStyle};
use crate::types::{Colour, DxfVersion, LineWeight, Vector2};

/// The result of parsing a DXF text
#[derive(Debug)]
pub struct DxfDrawing {
    /// Declared file version; defaults when the header omits $ACADVER
    pub version: DxfVersion,
    /// Parsed entities
    pub scene: Scene,
    /// Parsed style tables merged over the standard defaults
    pub styles: StyleManagers,
    /// Non-fatal issues encountered while reading
    pub notifications: NotificationCollection,
}

/// Parse DXF text into a staging drawing
pub fn read_drawing(text: &str) -> Result<DxfDrawing> {
    Reader::new(text)?.read()
}

struct Reader<'a> {
    scanner: CodePairScanner<'a>,
    drawing: DxfDrawing,
    current_layer: Option<String>,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Result<Self> {
        Ok(Reader {
            scanner: CodePairScanner::new(text),
            drawing: DxfDrawing {
                version: DxfVersion::default(),
                scene: Scene::new(),
                styles: StyleManagers::new()?,
                notifications: NotificationCollection::new(),
            },
            current_layer: None,
        })
    }

    fn read(mut self) -> Result<DxfDrawing> {
        while let Some(pair) = self.scanner.read_pair()? {
            if pair.is_record("EOF") {
                break;
            }
            if !pair.is_record("SECTION") {
                continue;
            }
            let Some(name_pair) = self.scanner.read_pair()? else {
                return Err(CoreError::parse(pair.line, "SECTION without a name"));
            };
            if name_pair.code != 2 {
                return Err(CoreError::parse(name_pair.line, "SECTION without a name"));
            }
            match name_pair.value.as_str() {
                "HEADER" => self.read_header()?,
                "TABLES" => self.read_tables()?,
                "ENTITIES" => self.read_entities()?,
                other => {
                    debug!(section = other, "skipping section");
                    self.drawing.notifications.notify(
                        NotificationType::Warning,
                        format!("{} section skipped", other),
                    );
                    self.skip_section()?;
                }
            }
        }

        // the header's current layer may name a layer the file never defines
        if let Some(clayer) = self.current_layer.take() {
            if self.drawing.styles.layers.item_exists(&clayer) {
                self.drawing.styles.layers.set_cstyle(&clayer)?;
            } else {
                self.drawing.notifications.notify(
                    NotificationType::Warning,
                    format!("current layer '{}' does not exist, using '0'", clayer),
                );
            }
        }
        Ok(self.drawing)
    }

    fn skip_section(&mut self) -> Result<()> {
        while let Some(pair) = self.scanner.read_pair()? {
            if pair.is_record("ENDSEC") {
                break;
            }
        }
        Ok(())
    }

    fn read_header(&mut self) -> Result<()> {
        let mut variable = String::new();
        while let Some(pair) = self.scanner.read_pair()? {
            if pair.is_record("ENDSEC") {
                break;
            }
            match pair.code {
                9 => variable = pair.value,
                1 if variable == "$ACADVER" => {
                    self.drawing.version = DxfVersion::from_code(&pair.value)?;
                }
                8 if variable == "$CLAYER" => {
                    self.current_layer = Some(pair.value);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn read_tables(&mut self) -> Result<()> {
        while let Some(pair) = self.scanner.read_pair()? {
            if pair.is_record("ENDSEC") {
                break;
            }
            if pair.code != 0 {
                continue;
            }
            match pair.value.as_str() {
                "LAYER" => self.read_layer_record()?,
                "LTYPE" => self.read_line_type_record()?,
                "STYLE" => self.read_text_style_record()?,
                "DIMSTYLE" => self.read_dim_style_record()?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Consume the pairs of one table record or entity, stopping before
    /// the next code 0
    fn record_pairs(&mut self) -> Result<Vec<CodePair>> {
        let mut pairs = Vec::new();
        loop {
            let at_record = match self.scanner.peek()? {
                Some(pair) => pair.code == 0,
                None => true,
            };
            if at_record {
                break;
            }
            if let Some(pair) = self.scanner.read_pair()? {
                pairs.push(pair);
            }
        }
        Ok(pairs)
    }

    fn read_layer_record(&mut self) -> Result<()> {
        let pairs = self.record_pairs()?;
        let mut layer = Layer::new("");
        for pair in &pairs {
            match pair.code {
                2 => layer.name = pair.value.clone(),
                6 => layer.line_type = pair.value.clone(),
                62 => {
                    // a negative colour index marks the layer as off
                    let index = pair.as_i32()?;
                    layer.on = index >= 0;
                    layer.colour = Colour::from_index(index.unsigned_abs().min(256) as i16);
                }
                420 => layer.colour = Colour::from_true_colour(pair.as_i32()? as u32),
                70 => {
                    let flags = pair.as_i32()?;
                    layer.frozen = flags & 1 != 0;
                    layer.locked = flags & 4 != 0;
                }
                290 => layer.plotting = pair.as_i32()? != 0,
                370 => layer.line_weight = LineWeight::from_value(pair.as_i32()? as i16),
                _ => {}
            }
        }
        if layer.name.is_empty() {
            return Ok(());
        }
        self.merge_layer(layer)
    }

    fn merge_layer(&mut self, layer: Layer) -> Result<()> {
        if self.drawing.styles.layers.item_exists(&layer.name) {
            let existing = self.drawing.styles.layers.item_by_name_mut(&layer.name)?;
            let name = existing.name.clone();
            *existing = layer;
            existing.name = name;
        } else {
            self.drawing.styles.layers.add_item(layer)?;
        }
        Ok(())
    }

    fn read_line_type_record(&mut self) -> Result<()> {
        let pairs = self.record_pairs()?;
        let mut line_type = LineType::continuous("");
        line_type.description.clear();
        for pair in &pairs {
            match pair.code {
                2 => line_type.name = pair.value.clone(),
                3 => line_type.description = pair.value.clone(),
                49 => line_type.pattern.push(pair.as_f64()?),
                _ => {}
            }
        }
        if line_type.name.is_empty() || self.drawing.styles.line_types.item_exists(&line_type.name)
        {
            return Ok(());
        }
        self.drawing.styles.line_types.add_item(&line_type)
    }

    fn read_text_style_record(&mut self) -> Result<()> {
        let pairs = self.record_pairs()?;
        let mut style = TextStyle::new("");
        for pair in &pairs {
            match pair.code {
                2 => style.name = pair.value.clone(),
                3 => style.font = pair.value.clone(),
                40 => style.text_height = pair.as_f64()?.max(0.0),
                41 => style.width_factor = pair.as_f64()?,
                50 => style.oblique_angle = pair.as_f64()?,
                71 => {
                    let flags = pair.as_i32()?;
                    style.backwards = flags & 2 != 0;
                    style.upside_down = flags & 4 != 0;
                }
                70 => style.vertical = pair.as_i32()? & 4 != 0,
                _ => {}
            }
        }
        if style.name.is_empty() {
            return Ok(());
        }
        self.merge_text_style(style)
    }

    fn merge_text_style(&mut self, style: TextStyle) -> Result<()> {
        if self.drawing.styles.text_styles.item_exists(&style.name) {
            let existing = self.drawing.styles.text_styles.item_by_name_mut(&style.name)?;
            let name = existing.name.clone();
            *existing = style;
            existing.name = name;
        } else {
            self.drawing.styles.text_styles.add_item(style)?;
        }
        Ok(())
    }

    fn read_dim_style_record(&mut self) -> Result<()> {
        let pairs = self.record_pairs()?;
        let mut style = DimStyle::new("");
        for pair in &pairs {
            match pair.code {
                2 => style.name = pair.value.clone(),
                40 => style.scale = pair.as_f64()?,
                41 => style.arrow_size = pair.as_f64()?,
                42 => style.extension_line_offset = pair.as_f64()?,
                44 => style.extension_line_extension = pair.as_f64()?,
                140 => style.text_height = pair.as_f64()?,
                147 => style.text_gap = pair.as_f64()?,
                271 => style.decimal_places = pair.as_i32()?.clamp(0, 8) as u8,
                _ => {}
            }
        }
        if style.name.is_empty() {
            return Ok(());
        }
        if self.drawing.styles.dim_styles.item_exists(&style.name) {
            let existing = self.drawing.styles.dim_styles.item_by_name_mut(&style.name)?;
            let name = existing.name.clone();
            *existing = style;
            existing.name = name;
        } else {
            self.drawing.styles.dim_styles.add_item(style)?;
        }
        Ok(())
    }

    fn read_entities(&mut self) -> Result<()> {
        while let Some(pair) = self.scanner.read_pair()? {
            if pair.is_record("ENDSEC") {
                break;
            }
            if pair.code != 0 {
                continue;
            }
            let entity = match pair.value.as_str() {
                "POINT" => Some(self.read_point()?),
                "LINE" => Some(self.read_line()?),
                "CIRCLE" => Some(self.read_circle()?),
                "ARC" => Some(self.read_arc()?),
                "LWPOLYLINE" => Some(self.read_lwpolyline()?),
                "POLYLINE" => Some(self.read_polyline()?),
                "TEXT" => Some(self.read_text()?),
                "DIMENSION" => Some(self.read_dimension()?),
                "HATCH" => Some(self.read_hatch()?),
                "INSERT" => Some(self.read_insert()?),
                other => {
                    debug!(entity = other, "skipping entity");
                    self.drawing.notifications.notify(
                        NotificationType::NotSupported,
                        format!("{} entity skipped", other),
                    );
                    // its pairs are consumed by the next loop iteration
                    None
                }
            };
            if let Some(entity) = entity {
                self.drawing.scene.insert_loaded(entity);
            }
        }
        Ok(())
    }

    fn read_point(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut point = Point::at(Vector2::ZERO);
        for pair in &pairs {
            if apply_common(&mut point.common, pair)? {
                continue;
            }
            match pair.code {
                10 => point.location.x = pair.as_f64()?,
                20 => point.location.y = pair.as_f64()?,
                _ => {}
            }
        }
        Ok(Entity::Point(point))
    }

    fn read_line(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut line = Line::from_points(Vector2::ZERO, Vector2::ZERO);
        for pair in &pairs {
            if apply_common(&mut line.common, pair)? {
                continue;
            }
            match pair.code {
                10 => line.start.x = pair.as_f64()?,
                20 => line.start.y = pair.as_f64()?,
                11 => line.end.x = pair.as_f64()?,
                21 => line.end.y = pair.as_f64()?,
                _ => {}
            }
        }
        Ok(Entity::Line(line))
    }

    fn read_circle(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut circle = Circle::new(Vector2::ZERO, 1.0);
        for pair in &pairs {
            if apply_common(&mut circle.common, pair)? {
                continue;
            }
            match pair.code {
                10 => circle.centre.x = pair.as_f64()?,
                20 => circle.centre.y = pair.as_f64()?,
                40 => circle.radius = pair.as_f64()?,
                _ => {}
            }
        }
        if circle.radius <= 0.0 {
            return Err(CoreError::parse(
                pairs.first().map(|p| p.line).unwrap_or(0),
                "CIRCLE radius must be positive",
            ));
        }
        Ok(Entity::Circle(circle))
    }

    fn read_arc(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut arc = Arc::new(Vector2::ZERO, 1.0, 0.0, 360.0);
        for pair in &pairs {
            if apply_common(&mut arc.common, pair)? {
                continue;
            }
            match pair.code {
                10 => arc.centre.x = pair.as_f64()?,
                20 => arc.centre.y = pair.as_f64()?,
                40 => arc.radius = pair.as_f64()?,
                50 => arc.start_angle = pair.as_f64()?,
                51 => arc.end_angle = pair.as_f64()?,
                _ => {}
            }
        }
        Ok(Entity::Arc(arc))
    }

    fn read_lwpolyline(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut polyline = Polyline::from_points(Vec::new());
        for pair in &pairs {
            if apply_common(&mut polyline.common, pair)? {
                continue;
            }
            match pair.code {
                70 => polyline.closed = pair.as_i32()? & 1 != 0,
                43 => polyline.width = pair.as_f64()?,
                10 => polyline.points.push(Vector2::new(pair.as_f64()?, 0.0)),
                20 => {
                    if let Some(last) = polyline.points.last_mut() {
                        last.y = pair.as_f64()?;
                    }
                }
                _ => {}
            }
        }
        Ok(Entity::Polyline(polyline))
    }

    /// Legacy R12 polyline: a POLYLINE record followed by VERTEX records
    /// and closed by SEQEND
    fn read_polyline(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut polyline = Polyline::from_points(Vec::new());
        for pair in &pairs {
            if apply_common(&mut polyline.common, pair)? {
                continue;
            }
            match pair.code {
                70 => polyline.closed = pair.as_i32()? & 1 != 0,
                40 => polyline.width = pair.as_f64()?,
                _ => {}
            }
        }
        loop {
            let Some(pair) = self.scanner.read_pair()? else {
                return Err(CoreError::parse(0, "POLYLINE without SEQEND"));
            };
            if pair.is_record("SEQEND") {
                self.record_pairs()?;
                break;
            }
            if pair.is_record("VERTEX") {
                let vertex_pairs = self.record_pairs()?;
                let mut vertex = Vector2::ZERO;
                for pair in &vertex_pairs {
                    match pair.code {
                        10 => vertex.x = pair.as_f64()?,
                        20 => vertex.y = pair.as_f64()?,
                        _ => {}
                    }
                }
                polyline.points.push(vertex);
            } else if pair.code == 0 {
                return Err(CoreError::parse(
                    pair.line,
                    format!("unexpected {} inside POLYLINE", pair.value),
                ));
            }
        }
        Ok(Entity::Polyline(polyline))
    }

    fn read_text(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut text = Text::new(Vector2::ZERO, 1.0, "");
        for pair in &pairs {
            if apply_common(&mut text.common, pair)? {
                continue;
            }
            match pair.code {
                10 => text.insertion.x = pair.as_f64()?,
                20 => text.insertion.y = pair.as_f64()?,
                40 => text.height = pair.as_f64()?,
                50 => text.rotation = pair.as_f64()?,
                1 => text.string = pair.value.clone(),
                7 => text.style_name = pair.value.clone(),
                72 => {
                    let index = pair.as_i32()?.clamp(0, 2) as usize;
                    text.horizontal_alignment = HorizontalAlignment::ALL[index];
                }
                73 => {
                    let index = pair.as_i32()?.clamp(0, 3) as usize;
                    text.vertical_alignment = VerticalAlignment::ALL[index];
                }
                _ => {}
            }
        }
        Ok(Entity::Text(text))
    }

    fn read_dimension(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut dimension = AlignedDimension::new(Vector2::ZERO, Vector2::ZERO, Vector2::ZERO);
        for pair in &pairs {
            if apply_common(&mut dimension.common, pair)? {
                continue;
            }
            match pair.code {
                13 => dimension.p1.x = pair.as_f64()?,
                23 => dimension.p1.y = pair.as_f64()?,
                14 => dimension.p2.x = pair.as_f64()?,
                24 => dimension.p2.y = pair.as_f64()?,
                10 => dimension.location.x = pair.as_f64()?,
                20 => dimension.location.y = pair.as_f64()?,
                3 => dimension.dim_style = pair.value.clone(),
                1 => dimension.text_override = pair.value.clone(),
                _ => {}
            }
        }
        Ok(Entity::AlignedDimension(dimension))
    }

    fn read_hatch(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut hatch = Hatch::new(Vec::new());
        // seed points also use codes 10/20; stop collecting boundary
        // vertices once the boundary block is done
        let mut in_boundary = true;
        for pair in &pairs {
            if apply_common(&mut hatch.common, pair)? {
                continue;
            }
            match pair.code {
                2 => hatch.pattern_name = pair.value.clone(),
                52 => hatch.angle = pair.as_f64()?,
                41 => hatch.scale = pair.as_f64()?,
                75 | 98 => in_boundary = false,
                10 if in_boundary => hatch.points.push(Vector2::new(pair.as_f64()?, 0.0)),
                20 if in_boundary => {
                    if let Some(last) = hatch.points.last_mut() {
                        last.y = pair.as_f64()?;
                    }
                }
                _ => {}
            }
        }
        Ok(Entity::Hatch(hatch))
    }

    fn read_insert(&mut self) -> Result<Entity> {
        let pairs = self.record_pairs()?;
        let mut insert = Insert::new("", Vector2::ZERO);
        for pair in &pairs {
            if apply_common(&mut insert.common, pair)? {
                continue;
            }
            match pair.code {
                2 => insert.block_name = pair.value.clone(),
                10 => insert.insertion.x = pair.as_f64()?,
                20 => insert.insertion.y = pair.as_f64()?,
                41 => insert.x_scale = pair.as_f64()?,
                42 => insert.y_scale = pair.as_f64()?,
                50 => insert.rotation = pair.as_f64()?,
                _ => {}
            }
        }
        Ok(Entity::Insert(insert))
    }
}

/// Apply a shared entity code; true when the pair was consumed
fn apply_common(common: &mut EntityCommon, pair: &CodePair) -> Result<bool> {
    match pair.code {
        5 => common.handle = pair.as_handle()?,
        8 => common.layer = pair.value.clone(),
        6 => common.line_type = pair.value.clone(),
        62 => common.colour = Colour::from_index(pair.as_i32()?.clamp(0, 256) as i16),
        420 => common.colour = Colour::from_true_colour(pair.as_i32()? as u32),
        370 => common.line_weight = LineWeight::from_value(pair.as_i32()? as i16),
        60 => common.visible = pair.as_i32()? != 1,
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dxf(pairs: &[(i32, &str)]) -> String {
        let mut out = String::new();
        for (code, value) in pairs {
            out.push_str(&format!("{}\n{}\n", code, value));
        }
        out
    }

    #[test]
    fn test_read_minimal_drawing() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "HEADER"),
            (9, "$ACADVER"),
            (1, "AC1015"),
            (0, "ENDSEC"),
            (0, "SECTION"),
            (2, "ENTITIES"),
            (0, "LINE"),
            (8, "0"),
            (10, "0.0"),
            (20, "0.0"),
            (11, "10.0"),
            (21, "5.0"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let drawing = read_drawing(&text).unwrap();
        assert_eq!(drawing.version, DxfVersion::AC1015);
        assert_eq!(drawing.scene.len(), 1);
        match drawing.scene.iter().next().unwrap() {
            Entity::Line(line) => assert_eq!(line.end, Vector2::new(10.0, 5.0)),
            other => panic!("expected a line, got {:?}", other),
        };
    }

    #[test]
    fn test_unknown_entity_skipped_with_notification() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "ENTITIES"),
            (0, "ELLIPSE"),
            (10, "1.0"),
            (20, "1.0"),
            (0, "POINT"),
            (10, "2.0"),
            (20, "3.0"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let drawing = read_drawing(&text).unwrap();
        assert_eq!(drawing.scene.len(), 1);
        assert!(drawing
            .notifications
            .has_type(NotificationType::NotSupported));
    }

    #[test]
    fn test_layer_table_merges_defaults() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "TABLES"),
            (0, "TABLE"),
            (2, "LAYER"),
            (0, "LAYER"),
            (2, "WALLS"),
            (62, "1"),
            (6, "Continuous"),
            (0, "LAYER"),
            (2, "0"),
            (62, "7"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let drawing = read_drawing(&text).unwrap();
        // "0" from the file merged over the built-in, WALLS added
        assert_eq!(drawing.styles.layers.item_count(), 2);
        let walls = drawing.styles.layers.item_by_name("WALLS").unwrap();
        assert_eq!(walls.colour, Colour::Index(1));
    }

    #[test]
    fn test_negative_layer_colour_turns_layer_off() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "TABLES"),
            (0, "LAYER"),
            (2, "HIDDEN_STUFF"),
            (62, "-3"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let drawing = read_drawing(&text).unwrap();
        let layer = drawing.styles.layers.item_by_name("HIDDEN_STUFF").unwrap();
        assert!(!layer.on);
        assert_eq!(layer.colour, Colour::Index(3));
    }

    #[test]
    fn test_missing_clayer_falls_back() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "HEADER"),
            (9, "$CLAYER"),
            (8, "GONE"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let drawing = read_drawing(&text).unwrap();
        assert_eq!(drawing.styles.layers.get_cstyle(), "0");
        assert!(drawing.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_legacy_polyline_with_vertices() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "ENTITIES"),
            (0, "POLYLINE"),
            (8, "0"),
            (70, "1"),
            (0, "VERTEX"),
            (10, "0.0"),
            (20, "0.0"),
            (0, "VERTEX"),
            (10, "5.0"),
            (20, "0.0"),
            (0, "VERTEX"),
            (10, "5.0"),
            (20, "5.0"),
            (0, "SEQEND"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let drawing = read_drawing(&text).unwrap();
        match drawing.scene.iter().next().unwrap() {
            Entity::Polyline(polyline) => {
                assert_eq!(polyline.vertex_count(), 3);
                assert!(polyline.closed);
            }
            other => panic!("expected a polyline, got {:?}", other),
        };
    }

    #[test]
    fn test_unsupported_version_is_an_error() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "HEADER"),
            (9, "$ACADVER"),
            (1, "AC1006"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        assert!(matches!(
            read_drawing(&text),
            Err(CoreError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_entity_handles_reserved() {
        let text = dxf(&[
            (0, "SECTION"),
            (2, "ENTITIES"),
            (0, "POINT"),
            (5, "2F"),
            (10, "1.0"),
            (20, "1.0"),
            (0, "ENDSEC"),
            (0, "EOF"),
        ]);
        let mut drawing = read_drawing(&text).unwrap();
        assert!(drawing.scene.allocate_handle().value() > 0x2F);
    }
}
