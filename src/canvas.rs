use crate::error::{Result, lopdf_err};
use crate::font::{StandardFont, encode_winansi};
use crate::types::{Color, Pt};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat, dictionary};
use std::collections::BTreeSet;

/// Display-list entry. Coordinates are PDF user space: origin at the
/// bottom-left of the page, y growing upwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SaveState,
    RestoreState,
    Translate(Pt, Pt),
    /// Counter-clockwise rotation in radians.
    Rotate(f32),
    // Applies both fill and stroke alpha (ca/CA). Values outside 0..1 are clamped.
    SetOpacity {
        fill: f32,
        stroke: f32,
    },
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(Pt),
    SetFontName(String),
    SetFontSize(Pt),
    MoveTo {
        x: Pt,
        y: Pt,
    },
    LineTo {
        x: Pt,
        y: Pt,
    },
    CurveTo {
        x1: Pt,
        y1: Pt,
        x2: Pt,
        y2: Pt,
        x: Pt,
        y: Pt,
    },
    ClosePath,
    Fill,
    FillEvenOdd,
    Stroke,
    FillStroke,
    /// Text with its baseline origin at (x, y) in the current coordinate system.
    DrawString {
        x: Pt,
        y: Pt,
        text: String,
    },
    // Raster-focused: page-space origin plus the full text-space linear
    // transform (font size included). Emitted by the PDF parser only.
    DrawStringTransformed {
        x: Pt,
        y: Pt,
        text: String,
        m00: f32,
        m01: f32,
        m10: f32,
        m11: f32,
    },
    BeginArtifact {
        subtype: Option<String>,
    },
    EndMarkedContent,
}

/// Resources an emitted overlay expects to find on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayResources {
    pub fonts: BTreeSet<StandardFont>,
    /// (fill, stroke) alpha quantized to thousandths.
    pub opacities: BTreeSet<(u16, u16)>,
}

/// Resource name for a quantized opacity pair.
pub fn extgstate_name(key: (u16, u16)) -> String {
    format!("FSGS{}_{}", key.0, key.1)
}

pub(crate) fn quantize_opacity(fill: f32, stroke: f32) -> (u16, u16) {
    let q = |v: f32| ((v * 1000.0).round() as i32).clamp(0, 1000) as u16;
    (q(fill), q(stroke))
}

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    commands: Vec<Command>,
    depth: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_state(&mut self) {
        self.depth += 1;
        self.commands.push(Command::SaveState);
    }

    pub fn restore_state(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(Command::RestoreState);
    }

    pub fn translate(&mut self, x: Pt, y: Pt) {
        self.commands.push(Command::Translate(x, y));
    }

    pub fn rotate(&mut self, radians: f32) {
        if radians.abs() > f32::EPSILON {
            self.commands.push(Command::Rotate(radians));
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.commands.push(Command::SetOpacity {
            fill: opacity,
            stroke: opacity,
        });
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.commands.push(Command::SetFillColor(color));
    }

    pub fn set_font(&mut self, font: StandardFont, size: Pt) {
        self.commands
            .push(Command::SetFontName(font.base_font().to_string()));
        self.commands.push(Command::SetFontSize(size));
    }

    pub fn draw_string(&mut self, x: Pt, y: Pt, text: impl Into<String>) {
        self.commands.push(Command::DrawString {
            x,
            y,
            text: text.into(),
        });
    }

    pub fn begin_artifact(&mut self, subtype: Option<&str>) {
        self.commands.push(Command::BeginArtifact {
            subtype: subtype.map(str::to_string),
        });
    }

    pub fn end_marked_content(&mut self) {
        self.commands.push(Command::EndMarkedContent);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Close any open save states and hand back the command list.
    pub fn finish(mut self) -> Vec<Command> {
        while self.depth > 0 {
            self.restore_state();
        }
        self.commands
    }
}

/// Lower a command list to content-stream operations. Fonts are addressed
/// through their fixed resource names; opacities through [`extgstate_name`].
pub fn emit_content(commands: &[Command]) -> (Content, OverlayResources) {
    let mut ops: Vec<Operation> = Vec::with_capacity(commands.len() * 2);
    let mut resources = OverlayResources::default();
    let mut current_font = StandardFont::Helvetica;
    let mut current_size = Pt::from_f32(12.0);

    for cmd in commands {
        match cmd {
            Command::SaveState => ops.push(Operation::new("q", vec![])),
            Command::RestoreState => ops.push(Operation::new("Q", vec![])),
            Command::Translate(x, y) => ops.push(Operation::new(
                "cm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    Object::Real(x.to_f32()),
                    Object::Real(y.to_f32()),
                ],
            )),
            Command::Rotate(angle) => {
                let (sin, cos) = angle.sin_cos();
                ops.push(Operation::new(
                    "cm",
                    vec![
                        Object::Real(cos),
                        Object::Real(sin),
                        Object::Real(-sin),
                        Object::Real(cos),
                        0.into(),
                        0.into(),
                    ],
                ));
            }
            Command::SetOpacity { fill, stroke } => {
                let key = quantize_opacity(*fill, *stroke);
                resources.opacities.insert(key);
                ops.push(Operation::new(
                    "gs",
                    vec![Object::Name(extgstate_name(key).into_bytes())],
                ));
            }
            Command::SetFillColor(color) => ops.push(Operation::new(
                "rg",
                vec![
                    Object::Real(color.r),
                    Object::Real(color.g),
                    Object::Real(color.b),
                ],
            )),
            Command::SetStrokeColor(color) => ops.push(Operation::new(
                "RG",
                vec![
                    Object::Real(color.r),
                    Object::Real(color.g),
                    Object::Real(color.b),
                ],
            )),
            Command::SetLineWidth(width) => {
                ops.push(Operation::new("w", vec![Object::Real(width.to_f32())]))
            }
            Command::SetFontName(name) => {
                current_font = StandardFont::from_base_font(name).unwrap_or(StandardFont::Helvetica);
            }
            Command::SetFontSize(size) => current_size = *size,
            Command::MoveTo { x, y } => ops.push(Operation::new(
                "m",
                vec![Object::Real(x.to_f32()), Object::Real(y.to_f32())],
            )),
            Command::LineTo { x, y } => ops.push(Operation::new(
                "l",
                vec![Object::Real(x.to_f32()), Object::Real(y.to_f32())],
            )),
            Command::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => ops.push(Operation::new(
                "c",
                [x1, y1, x2, y2, x, y]
                    .iter()
                    .map(|v| Object::Real(v.to_f32()))
                    .collect(),
            )),
            Command::ClosePath => ops.push(Operation::new("h", vec![])),
            Command::Fill => ops.push(Operation::new("f", vec![])),
            Command::FillEvenOdd => ops.push(Operation::new("f*", vec![])),
            Command::Stroke => ops.push(Operation::new("S", vec![])),
            Command::FillStroke => ops.push(Operation::new("B", vec![])),
            Command::DrawString { x, y, text } => {
                let (bytes, replaced) = encode_winansi(text);
                if replaced > 0 {
                    log::warn!(
                        "{replaced} character(s) outside WinAnsi replaced in {:?}",
                        text
                    );
                }
                resources.fonts.insert(current_font);
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(current_font.resource_name().as_bytes().to_vec()),
                        Object::Real(current_size.to_f32()),
                    ],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![Object::Real(x.to_f32()), Object::Real(y.to_f32())],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(bytes, StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            Command::DrawStringTransformed { .. } => {
                // Produced by the parser for painting; never written back.
            }
            Command::BeginArtifact { subtype } => match subtype {
                Some(subtype) => ops.push(Operation::new(
                    "BDC",
                    vec![
                        Object::Name(b"Artifact".to_vec()),
                        Object::Dictionary(dictionary! {
                            "Subtype" => Object::Name(subtype.as_bytes().to_vec()),
                        }),
                    ],
                )),
                None => ops.push(Operation::new(
                    "BMC",
                    vec![Object::Name(b"Artifact".to_vec())],
                )),
            },
            Command::EndMarkedContent => ops.push(Operation::new("EMC", vec![])),
        }
    }

    (Content { operations: ops }, resources)
}

/// Encode a command list to content-stream bytes.
pub fn encode_commands(commands: &[Command]) -> Result<(Vec<u8>, OverlayResources)> {
    let (content, resources) = emit_content(commands);
    let bytes = content.encode().map_err(lopdf_err)?;
    Ok((bytes, resources))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(content: &Content) -> Vec<&str> {
        content
            .operations
            .iter()
            .map(|op| op.operator.as_str())
            .collect()
    }

    #[test]
    fn finish_balances_open_states() {
        let mut canvas = Canvas::new();
        canvas.save_state();
        canvas.save_state();
        canvas.restore_state();
        let cmds = canvas.finish();
        let saves = cmds.iter().filter(|c| **c == Command::SaveState).count();
        let restores = cmds.iter().filter(|c| **c == Command::RestoreState).count();
        assert_eq!(saves, restores);
    }

    #[test]
    fn draw_string_emits_text_object_with_resource_font() {
        let mut canvas = Canvas::new();
        canvas.set_font(StandardFont::HelveticaBold, Pt::from_f32(9.0));
        canvas.draw_string(Pt::from_f32(10.0), Pt::from_f32(20.0), "X");
        let (content, resources) = emit_content(&canvas.finish());
        assert_eq!(operators(&content), vec!["BT", "Tf", "Td", "Tj", "ET"]);
        let tf = &content.operations[1];
        assert_eq!(tf.operands[0].as_name().ok(), Some(&b"FSHelvB"[..]));
        assert!(resources.fonts.contains(&StandardFont::HelveticaBold));
        assert!(!resources.fonts.contains(&StandardFont::Helvetica));
    }

    #[test]
    fn zero_rotation_is_dropped() {
        let mut canvas = Canvas::new();
        canvas.rotate(0.0);
        assert!(canvas.is_empty());
    }

    #[test]
    fn opacity_maps_to_named_extgstate() {
        let mut canvas = Canvas::new();
        canvas.set_opacity(0.5);
        let (content, resources) = emit_content(canvas.commands());
        assert_eq!(resources.opacities.iter().copied().collect::<Vec<_>>(), vec![(500, 500)]);
        assert_eq!(
            content.operations[0].operands[0].as_name().ok(),
            Some(extgstate_name((500, 500)).as_bytes())
        );
    }

    #[test]
    fn artifact_uses_marked_content_dictionary() {
        let mut canvas = Canvas::new();
        canvas.begin_artifact(Some("Watermark"));
        canvas.end_marked_content();
        let (bytes, _) = encode_commands(canvas.commands()).expect("encode");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Artifact"), "{text}");
        assert!(text.contains("/Watermark"), "{text}");
        assert!(text.contains("EMC"), "{text}");
    }
}
