//! ASCII DXF writer.
//!
//! Serializes a drawing at a chosen version.  Constructs the target
//! version cannot carry are downgraded deterministically: R12 gets
//! POLYLINE/VERTEX/SEQEND instead of LWPOLYLINE and nearest-ACI colours
//! instead of true colour, and HATCH entities are omitted with a
//! notification.

use std::fmt::Write as _;

use tracing::debug;

use crate::entities::{Entity, EntityCommon};
use crate::notification::{Notification, NotificationType};
use crate::scene::Scene;
use crate::styles::{Layer, StyleManagers};
use crate::types::{Colour, DxfVersion, LineWeight};

/// Serialize a drawing to DXF text.
///
/// `notify` receives one notification per construct the target version
/// had to drop.
pub fn write_drawing(
    scene: &Scene,
    styles: &StyleManagers,
    version: DxfVersion,
    mut notify: impl FnMut(Notification),
) -> String {
    let mut writer = PairWriter::new(version);
    writer.write_header(styles);
    writer.write_tables(styles);
    writer.write_entities(scene, &mut notify);
    writer.finish()
}

/// Emits group code / value pairs in the standard two-line layout
struct PairWriter {
    out: String,
    version: DxfVersion,
}

impl PairWriter {
    fn new(version: DxfVersion) -> Self {
        PairWriter {
            out: String::new(),
            version,
        }
    }

    fn finish(mut self) -> String {
        self.string(0, "EOF");
        self.out
    }

    /// Codes are right-aligned in a three character field
    fn code(&mut self, code: i32) {
        let _ = writeln!(self.out, "{:>3}", code);
    }

    fn string(&mut self, code: i32, value: &str) {
        self.code(code);
        let _ = writeln!(self.out, "{}", value);
    }

    fn int(&mut self, code: i32, value: i32) {
        self.code(code);
        let _ = writeln!(self.out, "{}", value);
    }

    /// Doubles keep at least one decimal place, with trailing zeros
    /// trimmed
    fn double(&mut self, code: i32, value: f64) {
        self.code(code);
        if value == value.trunc() {
            let _ = writeln!(self.out, "{:.1}", value);
        } else {
            let formatted = format!("{:.12}", value);
            let trimmed = formatted.trim_end_matches('0');
            if trimmed.ends_with('.') {
                let _ = writeln!(self.out, "{}0", trimmed);
            } else {
                let _ = writeln!(self.out, "{}", trimmed);
            }
        }
    }

    fn point(&mut self, base_code: i32, x: f64, y: f64) {
        self.double(base_code, x);
        self.double(base_code + 10, y);
        // z is always written, and always zero
        self.double(base_code + 20, 0.0);
    }

    fn section(&mut self, name: &str) {
        self.string(0, "SECTION");
        self.string(2, name);
    }

    fn end_section(&mut self) {
        self.string(0, "ENDSEC");
    }

    fn write_header(&mut self, styles: &StyleManagers) {
        self.section("HEADER");
        self.string(9, "$ACADVER");
        self.string(1, self.version.code());
        self.string(9, "$CLAYER");
        self.string(8, styles.layers.get_cstyle());
        self.string(9, "$CELTYPE");
        self.string(6, styles.line_types.get_cstyle());
        self.string(9, "$INSUNITS");
        self.int(70, 4);
        self.end_section();
    }

    fn write_tables(&mut self, styles: &StyleManagers) {
        self.section("TABLES");

        self.string(0, "TABLE");
        self.string(2, "LTYPE");
        self.int(70, styles.line_types.item_count() as i32);
        for line_type in styles.line_types.items() {
            self.string(0, "LTYPE");
            self.string(2, &line_type.name);
            self.int(70, 0);
            self.string(3, &line_type.description);
            self.int(72, 65);
            self.int(73, line_type.pattern.len() as i32);
            self.double(40, line_type.pattern_length());
            for element in &line_type.pattern {
                self.double(49, *element);
            }
        }
        self.string(0, "ENDTAB");

        self.string(0, "TABLE");
        self.string(2, "LAYER");
        self.int(70, styles.layers.item_count() as i32);
        for layer in styles.layers.items() {
            self.write_layer(layer);
        }
        self.string(0, "ENDTAB");

        self.string(0, "TABLE");
        self.string(2, "STYLE");
        self.int(70, styles.text_styles.item_count() as i32);
        for style in styles.text_styles.items() {
            self.string(0, "STYLE");
            self.string(2, &style.name);
            let mut flags = 0;
            if style.vertical {
                flags |= 4;
            }
            self.int(70, flags);
            self.double(40, style.text_height);
            self.double(41, style.width_factor);
            self.double(50, style.oblique_angle);
            let mut generation = 0;
            if style.backwards {
                generation |= 2;
            }
            if style.upside_down {
                generation |= 4;
            }
            self.int(71, generation);
            self.string(3, &style.font);
        }
        self.string(0, "ENDTAB");

        self.string(0, "TABLE");
        self.string(2, "DIMSTYLE");
        self.int(70, styles.dim_styles.item_count() as i32);
        for style in styles.dim_styles.items() {
            self.string(0, "DIMSTYLE");
            self.string(2, &style.name);
            self.int(70, 0);
            self.double(40, style.scale);
            self.double(41, style.arrow_size);
            self.double(42, style.extension_line_offset);
            self.double(44, style.extension_line_extension);
            self.double(140, style.text_height);
            self.double(147, style.text_gap);
            self.int(271, style.decimal_places as i32);
        }
        self.string(0, "ENDTAB");

        self.end_section();
    }

    fn write_layer(&mut self, layer: &Layer) {
        self.string(0, "LAYER");
        self.string(2, &layer.name);
        let mut flags = 0;
        if layer.frozen {
            flags |= 1;
        }
        if layer.locked {
            flags |= 4;
        }
        self.int(70, flags);
        // off is encoded as a negated colour index
        let index = self.colour_index(layer.colour);
        self.int(62, if layer.on { index } else { -index.max(1) });
        if self.version.supports_true_colour() {
            if let Some(true_colour) = layer.colour.as_true_colour() {
                self.int(420, true_colour as i32);
            }
        }
        self.string(6, &layer.line_type);
        if self.version > DxfVersion::AC1009 {
            self.int(370, layer.line_weight.value() as i32);
            self.int(290, layer.plotting as i32);
        }
    }

    fn write_entities(&mut self, scene: &Scene, notify: &mut impl FnMut(Notification)) {
        self.section("ENTITIES");
        for entity in scene.iter() {
            self.write_entity(entity, notify);
        }
        self.end_section();
    }

    fn write_entity(&mut self, entity: &Entity, notify: &mut impl FnMut(Notification)) {
        match entity {
            Entity::Point(point) => {
                self.entity_start("POINT", entity.common());
                self.point(10, point.location.x, point.location.y);
            }
            Entity::Line(line) => {
                self.entity_start("LINE", entity.common());
                self.point(10, line.start.x, line.start.y);
                self.point(11, line.end.x, line.end.y);
            }
            Entity::Circle(circle) => {
                self.entity_start("CIRCLE", entity.common());
                self.point(10, circle.centre.x, circle.centre.y);
                self.double(40, circle.radius);
            }
            Entity::Arc(arc) => {
                self.entity_start("ARC", entity.common());
                self.point(10, arc.centre.x, arc.centre.y);
                self.double(40, arc.radius);
                self.double(50, arc.start_angle);
                self.double(51, arc.end_angle);
            }
            Entity::Polyline(polyline) => {
                if self.version.supports_lwpolyline() {
                    self.entity_start("LWPOLYLINE", entity.common());
                    self.int(90, polyline.vertex_count() as i32);
                    self.int(70, polyline.closed as i32);
                    self.double(43, polyline.width);
                    for point in &polyline.points {
                        self.double(10, point.x);
                        self.double(20, point.y);
                    }
                } else {
                    // R12 has no LWPOLYLINE
                    self.entity_start("POLYLINE", entity.common());
                    self.int(66, 1);
                    self.int(70, polyline.closed as i32);
                    self.double(40, polyline.width);
                    for point in &polyline.points {
                        self.string(0, "VERTEX");
                        self.string(8, &polyline.common.layer);
                        self.point(10, point.x, point.y);
                    }
                    self.string(0, "SEQEND");
                }
            }
            Entity::Text(text) => {
                self.entity_start("TEXT", entity.common());
                self.point(10, text.insertion.x, text.insertion.y);
                self.double(40, text.height);
                self.double(50, text.rotation);
                self.string(1, &text.string);
                self.string(7, &text.style_name);
                self.int(72, text.horizontal_alignment.index() as i32);
                self.int(73, text.vertical_alignment.index() as i32);
            }
            Entity::AlignedDimension(dimension) => {
                self.entity_start("DIMENSION", entity.common());
                self.point(10, dimension.location.x, dimension.location.y);
                self.point(13, dimension.p1.x, dimension.p1.y);
                self.point(14, dimension.p2.x, dimension.p2.y);
                // type 1 = aligned
                self.int(70, 1);
                self.string(3, &dimension.dim_style);
                if !dimension.text_override.is_empty() {
                    self.string(1, &dimension.text_override);
                }
            }
            Entity::Hatch(hatch) => {
                if self.version == DxfVersion::AC1009 {
                    debug!(handle = %entity.handle(), "HATCH omitted for R12 output");
                    notify(Notification::new(
                        NotificationType::NotSupported,
                        "HATCH entity omitted, not supported before R2000",
                    ));
                    return;
                }
                self.entity_start("HATCH", entity.common());
                self.string(2, &hatch.pattern_name);
                self.int(70, hatch.pattern_name.eq_ignore_ascii_case("SOLID") as i32);
                self.int(91, 1);
                self.int(92, 2);
                self.int(93, hatch.points.len() as i32);
                for point in &hatch.points {
                    self.double(10, point.x);
                    self.double(20, point.y);
                }
                self.int(75, 0);
                self.double(52, hatch.angle);
                self.double(41, hatch.scale);
                self.int(98, 0);
            }
            Entity::Insert(insert) => {
                self.entity_start("INSERT", entity.common());
                self.string(2, &insert.block_name);
                self.point(10, insert.insertion.x, insert.insertion.y);
                self.double(41, insert.x_scale);
                self.double(42, insert.y_scale);
                self.double(50, insert.rotation);
            }
        }
    }

    /// Entity record opener with the shared codes
    fn entity_start(&mut self, kind: &str, common: &EntityCommon) {
        self.string(0, kind);
        if !common.handle.is_null() {
            let handle = format!("{:X}", common.handle.value());
            self.string(5, &handle);
        }
        self.string(8, &common.layer);
        if !common.line_type.eq_ignore_ascii_case("BYLAYER") {
            self.string(6, &common.line_type);
        }
        if common.colour != Colour::ByLayer {
            let index = self.colour_index(common.colour);
            self.int(62, index);
            if self.version.supports_true_colour() {
                if let Some(true_colour) = common.colour.as_true_colour() {
                    self.int(420, true_colour as i32);
                }
            }
        }
        if self.version > DxfVersion::AC1009 && common.line_weight != LineWeight::ByLayer {
            self.int(370, common.line_weight.value() as i32);
        }
        if !common.visible {
            self.int(60, 1);
        }
    }

    /// The ACI index written for a colour, downgrading true colour
    fn colour_index(&self, colour: Colour) -> i32 {
        colour.approximate_index() as i32
    }
}
