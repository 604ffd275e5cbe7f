//! Reads a page's content stream back into display-list commands.
//!
//! Covers what form templates and our own overlays use: paths, colours,
//! opacity, simple-font text and form XObjects. Images and shadings are
//! skipped.

use crate::canvas::Command;
use crate::error::{FormError, Result};
use crate::font::{StandardFont, decode_winansi};
use crate::types::{Color, PageBox, Pt};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary as LoDictionary, Document as LoDocument, Object as LoObject, ObjectId};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    fn identity() -> Self {
        Self::from_operands(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    fn from_operands(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self::from_operands(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    fn concat(self, rhs: Self) -> Self {
        Self {
            a: self.a * rhs.a + self.b * rhs.c,
            b: self.a * rhs.b + self.b * rhs.d,
            c: self.c * rhs.a + self.d * rhs.c,
            d: self.c * rhs.b + self.d * rhs.d,
            e: self.e * rhs.a + self.f * rhs.c + rhs.e,
            f: self.e * rhs.b + self.f * rhs.d + rhs.f,
        }
    }

    fn transform_point(self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn scale_factor(self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

#[derive(Clone, Default)]
struct PdfFontResource {
    font_name: String,
    default_width: f32,
    widths: HashMap<u8, f32>,
}

impl PdfFontResource {
    fn advance(&self, code: u8) -> f32 {
        if let Some(width) = self.widths.get(&code) {
            return *width;
        }
        match StandardFont::from_base_font(&self.font_name) {
            Some(font) => font.advance(code) as f32,
            None => self.default_width,
        }
    }
}

#[derive(Clone, Default)]
struct PdfResources {
    fonts: HashMap<String, PdfFontResource>,
    xobjects: HashMap<String, ObjectId>,
    extgstates: HashMap<String, (f32, f32)>,
}

impl PdfResources {
    fn merged(&self, child: &PdfResources) -> PdfResources {
        let mut out = self.clone();
        out.fonts
            .extend(child.fonts.iter().map(|(k, v)| (k.clone(), v.clone())));
        out.xobjects.extend(child.xobjects.iter().map(|(k, v)| (k.clone(), *v)));
        out.extgstates
            .extend(child.extgstates.iter().map(|(k, v)| (k.clone(), *v)));
        out
    }
}

#[derive(Clone)]
struct ParseState {
    ctm: Matrix,
    font_resource: Option<String>,
    font_size: f32,
    text_matrix: Matrix,
    text_line_matrix: Matrix,
    text_leading: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_h_scale: f32,
    text_rise: f32,
    text_render_mode: i64,
}

impl Default for ParseState {
    fn default() -> Self {
        Self {
            ctm: Matrix::identity(),
            font_resource: None,
            font_size: 12.0,
            text_matrix: Matrix::identity(),
            text_line_matrix: Matrix::identity(),
            text_leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_h_scale: 1.0,
            text_rise: 0.0,
            text_render_mode: 0,
        }
    }
}

/// Display list for one page, in PDF user space.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub page_box: PageBox,
    pub commands: Vec<Command>,
}

/// A text show operation resolved to page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font_name: String,
    pub x: f32,
    pub y: f32,
    /// Effective glyph height in points.
    pub size: f32,
    /// Inside a `/Artifact` marked-content block.
    pub artifact: bool,
}

impl ParsedPage {
    /// Every drawn string in stream order.
    pub fn text_runs(&self) -> Vec<TextRun> {
        let mut out = Vec::new();
        let mut font_name = String::from("Helvetica");
        let mut artifact_depth = 0usize;
        for cmd in &self.commands {
            match cmd {
                Command::SetFontName(name) => font_name = name.clone(),
                Command::BeginArtifact { .. } => artifact_depth += 1,
                Command::EndMarkedContent => artifact_depth = artifact_depth.saturating_sub(1),
                Command::DrawStringTransformed {
                    x,
                    y,
                    text,
                    m10,
                    m11,
                    ..
                } => out.push(TextRun {
                    text: text.clone(),
                    font_name: font_name.clone(),
                    x: x.to_f32(),
                    y: y.to_f32(),
                    size: (m10 * m10 + m11 * m11).sqrt(),
                    artifact: artifact_depth > 0,
                }),
                _ => {}
            }
        }
        out
    }
}

fn raster_err(message: impl std::fmt::Display) -> FormError {
    FormError::RasterizationFailed(message.to_string())
}

/// Parse page `page_index` (zero-based) of a loaded document.
pub fn parse_page(doc: &LoDocument, page_index: usize) -> Result<ParsedPage> {
    let pages = doc.get_pages();
    let page_id = pages
        .values()
        .nth(page_index)
        .copied()
        .ok_or_else(|| raster_err(format!("page {page_index} not present ({} pages)", pages.len())))?;
    let page_dict = doc
        .get_object(page_id)
        .and_then(LoObject::as_dict)
        .map_err(raster_err)?;
    let page_box = page_box_for(doc, page_id);
    let resources = match inherited(doc, page_id, b"Resources") {
        Some(obj) => resources_from_object(doc, obj),
        None => PdfResources::default(),
    };

    let mut state = ParseState::default();
    let mut stack = Vec::new();
    let mut commands = Vec::new();
    let mut visited_forms = HashSet::new();
    let mut marked: Vec<bool> = Vec::new();

    // An operation may start in one stream and finish in the next, so the
    // streams are joined before decoding.
    let content = Content::decode(&page_content(doc, page_dict)).map_err(raster_err)?;
    parse_operations(
        doc,
        &content.operations,
        &resources,
        &mut state,
        &mut stack,
        &mut marked,
        &mut commands,
        &mut visited_forms,
    );

    Ok(ParsedPage { page_box, commands })
}

fn page_content(doc: &LoDocument, page: &LoDictionary) -> Vec<u8> {
    let mut out = Vec::new();
    for stream_id in content_ids(doc, page) {
        let Ok(stream) = doc.get_object(stream_id).and_then(LoObject::as_stream) else {
            continue;
        };
        match stream.decompressed_content() {
            Ok(bytes) => out.extend_from_slice(&bytes),
            Err(_) => out.extend_from_slice(&stream.content),
        }
        out.push(b'\n');
    }
    out
}

fn content_ids(doc: &LoDocument, page: &LoDictionary) -> Vec<ObjectId> {
    let Ok(contents) = page.get(b"Contents") else {
        return Vec::new();
    };
    match contents {
        LoObject::Reference(id) => match doc.get_object(*id) {
            Ok(LoObject::Array(items)) => items.iter().filter_map(|o| o.as_reference().ok()).collect(),
            _ => vec![*id],
        },
        LoObject::Array(items) => items.iter().filter_map(|o| o.as_reference().ok()).collect(),
        _ => Vec::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn parse_operations(
    doc: &LoDocument,
    operations: &[Operation],
    resources: &PdfResources,
    state: &mut ParseState,
    stack: &mut Vec<ParseState>,
    marked: &mut Vec<bool>,
    commands: &mut Vec<Command>,
    visited_forms: &mut HashSet<ObjectId>,
) {
    for op in operations {
        match op.operator.as_str() {
            "q" => {
                stack.push(state.clone());
                commands.push(Command::SaveState);
            }
            "Q" => {
                if let Some(prev) = stack.pop() {
                    *state = prev;
                    commands.push(Command::RestoreState);
                }
            }
            "cm" => {
                if let Some([a, b, c, d, e, f]) = op_f32_6(op) {
                    state.ctm = Matrix::from_operands(a, b, c, d, e, f).concat(state.ctm);
                }
            }
            "w" => {
                if let Some(width) = op_f32(op, 0) {
                    let scaled = width.max(0.0) * state.ctm.scale_factor();
                    commands.push(Command::SetLineWidth(Pt::from_f32(scaled)));
                }
            }
            "gs" => {
                if let Some(name) = op_name(op, 0) {
                    if let Some((fill, stroke)) = resources.extgstates.get(&name).copied() {
                        commands.push(Command::SetOpacity { fill, stroke });
                    }
                }
            }
            "rg" => {
                if let Some([r, g, b]) = op_f32_3(op) {
                    commands.push(Command::SetFillColor(Color::rgb(r, g, b)));
                }
            }
            "RG" => {
                if let Some([r, g, b]) = op_f32_3(op) {
                    commands.push(Command::SetStrokeColor(Color::rgb(r, g, b)));
                }
            }
            "g" => {
                if let Some(gray) = op_f32(op, 0) {
                    commands.push(Command::SetFillColor(Color::gray(gray)));
                }
            }
            "G" => {
                if let Some(gray) = op_f32(op, 0) {
                    commands.push(Command::SetStrokeColor(Color::gray(gray)));
                }
            }
            "k" => {
                if let Some([c, m, y, k]) = op_f32_4(op) {
                    commands.push(Command::SetFillColor(cmyk_to_rgb(c, m, y, k)));
                }
            }
            "K" => {
                if let Some([c, m, y, k]) = op_f32_4(op) {
                    commands.push(Command::SetStrokeColor(cmyk_to_rgb(c, m, y, k)));
                }
            }
            "m" => {
                if let Some([x, y]) = op_f32_2(op) {
                    let (x, y) = state.ctm.transform_point(x, y);
                    commands.push(Command::MoveTo {
                        x: Pt::from_f32(x),
                        y: Pt::from_f32(y),
                    });
                }
            }
            "l" => {
                if let Some([x, y]) = op_f32_2(op) {
                    let (x, y) = state.ctm.transform_point(x, y);
                    commands.push(Command::LineTo {
                        x: Pt::from_f32(x),
                        y: Pt::from_f32(y),
                    });
                }
            }
            "c" => {
                if let Some([x1, y1, x2, y2, x, y]) = op_f32_6(op) {
                    commands.push(curve(state.ctm, (x1, y1), (x2, y2), (x, y)));
                }
            }
            "re" => {
                if let Some([x, y, w, h]) = op_f32_4(op) {
                    let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
                    for (idx, (px, py)) in corners.into_iter().enumerate() {
                        let (px, py) = state.ctm.transform_point(px, py);
                        let (x, y) = (Pt::from_f32(px), Pt::from_f32(py));
                        commands.push(if idx == 0 {
                            Command::MoveTo { x, y }
                        } else {
                            Command::LineTo { x, y }
                        });
                    }
                    commands.push(Command::ClosePath);
                }
            }
            "h" => commands.push(Command::ClosePath),
            "f" | "F" => commands.push(Command::Fill),
            "f*" => commands.push(Command::FillEvenOdd),
            "S" => commands.push(Command::Stroke),
            "B" | "B*" => commands.push(Command::FillStroke),
            "s" => {
                commands.push(Command::ClosePath);
                commands.push(Command::Stroke);
            }
            "b" | "b*" => {
                commands.push(Command::ClosePath);
                commands.push(Command::FillStroke);
            }
            "BMC" | "BDC" => {
                let is_artifact = op_name(op, 0).as_deref() == Some("Artifact");
                if is_artifact {
                    let subtype = op
                        .operands
                        .get(1)
                        .and_then(|o| resolve_object(doc, o).as_dict().ok())
                        .and_then(|d| d.get(b"Subtype").ok())
                        .and_then(|o| o.as_name().ok())
                        .map(name_bytes_to_string);
                    commands.push(Command::BeginArtifact { subtype });
                }
                marked.push(is_artifact);
            }
            "EMC" => {
                if marked.pop() == Some(true) {
                    commands.push(Command::EndMarkedContent);
                }
            }
            "BT" => {
                state.text_matrix = Matrix::identity();
                state.text_line_matrix = Matrix::identity();
            }
            "TL" => {
                if let Some(leading) = op_f32(op, 0) {
                    state.text_leading = leading;
                }
            }
            "Tc" => {
                if let Some(spacing) = op_f32(op, 0) {
                    state.char_spacing = spacing;
                }
            }
            "Tw" => {
                if let Some(spacing) = op_f32(op, 0) {
                    state.word_spacing = spacing;
                }
            }
            "Tz" => {
                if let Some(percent) = op_f32(op, 0) {
                    state.text_h_scale = (percent / 100.0).max(0.0);
                }
            }
            "Ts" => {
                if let Some(rise) = op_f32(op, 0) {
                    state.text_rise = rise;
                }
            }
            "Tr" => {
                if let Some(mode) = op_i64(op, 0) {
                    state.text_render_mode = mode.clamp(0, 7);
                }
            }
            "Tf" => {
                if let Some(res_name) = op_name(op, 0) {
                    let font_name = resources
                        .fonts
                        .get(&res_name)
                        .map(|f| f.font_name.clone())
                        .unwrap_or_else(|| res_name.clone());
                    state.font_resource = Some(res_name);
                    state.font_size = op_f32(op, 1).unwrap_or(12.0).abs();
                    commands.push(Command::SetFontName(font_name));
                }
            }
            "Td" | "TD" => {
                if let Some([tx, ty]) = op_f32_2(op) {
                    if op.operator == "TD" {
                        state.text_leading = -ty;
                    }
                    next_line(state, tx, ty);
                }
            }
            "T*" => {
                let leading = state.text_leading;
                next_line(state, 0.0, -leading);
            }
            "Tm" => {
                if let Some([a, b, c, d, e, f]) = op_f32_6(op) {
                    let tm = Matrix::from_operands(a, b, c, d, e, f);
                    state.text_matrix = tm;
                    state.text_line_matrix = tm;
                }
            }
            "Tj" => {
                if let Some(bytes) = op.operands.first().and_then(|o| o.as_str().ok()) {
                    show_text(commands, state, resources, bytes);
                }
            }
            "'" => {
                let leading = state.text_leading;
                next_line(state, 0.0, -leading);
                if let Some(bytes) = op.operands.first().and_then(|o| o.as_str().ok()) {
                    show_text(commands, state, resources, bytes);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac)) = (op_f32(op, 0), op_f32(op, 1)) {
                    state.word_spacing = aw;
                    state.char_spacing = ac;
                }
                let leading = state.text_leading;
                next_line(state, 0.0, -leading);
                if let Some(bytes) = op.operands.get(2).and_then(|o| o.as_str().ok()) {
                    show_text(commands, state, resources, bytes);
                }
            }
            "TJ" => {
                if let Some(items) = op.operands.first().and_then(|o| o.as_array().ok()) {
                    for item in items {
                        if let Ok(bytes) = item.as_str() {
                            show_text(commands, state, resources, bytes);
                        } else if let Some(adj) = obj_to_f32(item) {
                            // Thousandths of text-space units.
                            let tx = -(adj / 1000.0) * state.font_size * state.text_h_scale;
                            advance_text_matrix(state, tx);
                        }
                    }
                }
            }
            "Do" => {
                if let Some(obj_id) = op_name(op, 0).and_then(|n| resources.xobjects.get(&n).copied()) {
                    parse_xobject(doc, obj_id, resources, state, marked, commands, visited_forms);
                }
            }
            _ => {}
        }
    }
}

fn parse_xobject(
    doc: &LoDocument,
    obj_id: ObjectId,
    parent_resources: &PdfResources,
    state: &ParseState,
    marked: &mut Vec<bool>,
    commands: &mut Vec<Command>,
    visited_forms: &mut HashSet<ObjectId>,
) {
    let Ok(stream) = doc.get_object(obj_id).and_then(LoObject::as_stream) else {
        return;
    };
    let subtype = stream
        .dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(name_bytes_to_string)
        .unwrap_or_default();
    if subtype != "Form" {
        log::trace!("raster skips {subtype} xobject {obj_id:?}");
        return;
    }
    if !visited_forms.insert(obj_id) {
        return;
    }
    let Ok(bytes) = stream.get_plain_content() else {
        visited_forms.remove(&obj_id);
        return;
    };
    let Ok(content) = Content::decode(&bytes) else {
        visited_forms.remove(&obj_id);
        return;
    };
    let form_resources = match stream.dict.get(b"Resources") {
        Ok(obj) => parent_resources.merged(&resources_from_object(doc, obj)),
        Err(_) => parent_resources.clone(),
    };
    let form_matrix = stream
        .dict
        .get(b"Matrix")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_array().ok())
        .and_then(|arr| matrix_from_array(arr))
        .unwrap_or_else(Matrix::identity);

    let mut nested = state.clone();
    nested.ctm = form_matrix.concat(nested.ctm);
    let mut nested_stack = Vec::new();
    commands.push(Command::SaveState);
    parse_operations(
        doc,
        &content.operations,
        &form_resources,
        &mut nested,
        &mut nested_stack,
        marked,
        commands,
        visited_forms,
    );
    for _ in nested_stack {
        commands.push(Command::RestoreState);
    }
    commands.push(Command::RestoreState);
    visited_forms.remove(&obj_id);
}

fn curve(ctm: Matrix, p1: (f32, f32), p2: (f32, f32), p: (f32, f32)) -> Command {
    let (x1, y1) = ctm.transform_point(p1.0, p1.1);
    let (x2, y2) = ctm.transform_point(p2.0, p2.1);
    let (x, y) = ctm.transform_point(p.0, p.1);
    Command::CurveTo {
        x1: Pt::from_f32(x1),
        y1: Pt::from_f32(y1),
        x2: Pt::from_f32(x2),
        y2: Pt::from_f32(y2),
        x: Pt::from_f32(x),
        y: Pt::from_f32(y),
    }
}

fn next_line(state: &mut ParseState, tx: f32, ty: f32) {
    state.text_line_matrix = Matrix::translation(tx, ty).concat(state.text_line_matrix);
    state.text_matrix = state.text_line_matrix;
}

fn advance_text_matrix(state: &mut ParseState, tx: f32) {
    state.text_matrix = Matrix::translation(tx, 0.0).concat(state.text_matrix);
}

fn show_text(commands: &mut Vec<Command>, state: &mut ParseState, resources: &PdfResources, bytes: &[u8]) {
    let font = state
        .font_resource
        .as_ref()
        .and_then(|name| resources.fonts.get(name))
        .cloned()
        .unwrap_or_else(|| PdfFontResource {
            font_name: "Helvetica".to_string(),
            default_width: 500.0,
            widths: HashMap::new(),
        });

    let invisible = matches!(state.text_render_mode, 3 | 7);
    if !bytes.is_empty() && !invisible {
        let render = Matrix::from_operands(
            state.font_size * state.text_h_scale,
            0.0,
            0.0,
            state.font_size,
            0.0,
            state.text_rise,
        )
        .concat(state.text_matrix)
        .concat(state.ctm);
        commands.push(Command::DrawStringTransformed {
            x: Pt::from_f32(render.e),
            y: Pt::from_f32(render.f),
            text: decode_winansi(bytes),
            m00: render.a,
            m01: render.b,
            m10: render.c,
            m11: render.d,
        });
    }

    let mut advance = 0.0f32;
    for code in bytes {
        advance += font.advance(*code) / 1000.0 * state.font_size + state.char_spacing;
        if *code == b' ' {
            advance += state.word_spacing;
        }
    }
    advance_text_matrix(state, advance * state.text_h_scale);
}

fn resources_from_object(doc: &LoDocument, obj: &LoObject) -> PdfResources {
    let Ok(dict) = resolve_object(doc, obj).as_dict() else {
        return PdfResources::default();
    };
    let mut out = PdfResources::default();

    if let Some(fonts) = dict.get(b"Font").ok().and_then(|o| resolve_object(doc, o).as_dict().ok()) {
        for (name, font_obj) in fonts.iter() {
            out.fonts
                .insert(name_bytes_to_string(name), font_resource(doc, font_obj));
        }
    }

    if let Some(xobjects) = dict
        .get(b"XObject")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_dict().ok())
    {
        for (name, obj) in xobjects.iter() {
            if let Ok(id) = obj.as_reference() {
                out.xobjects.insert(name_bytes_to_string(name), id);
            }
        }
    }

    if let Some(states) = dict
        .get(b"ExtGState")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_dict().ok())
    {
        for (name, gs_obj) in states.iter() {
            let Ok(gs) = resolve_object(doc, gs_obj).as_dict() else {
                continue;
            };
            let alpha = |key: &[u8]| {
                gs.get(key)
                    .ok()
                    .and_then(obj_to_f32)
                    .unwrap_or(1.0)
                    .clamp(0.0, 1.0)
            };
            out.extgstates
                .insert(name_bytes_to_string(name), (alpha(b"ca"), alpha(b"CA")));
        }
    }

    out
}

fn font_resource(doc: &LoDocument, obj: &LoObject) -> PdfFontResource {
    let Ok(dict) = resolve_object(doc, obj).as_dict() else {
        return PdfFontResource {
            font_name: "Helvetica".to_string(),
            default_width: 500.0,
            widths: HashMap::new(),
        };
    };
    let font_name = dict
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(name_bytes_to_string)
        .unwrap_or_else(|| "Helvetica".to_string());

    let mut default_width = 500.0f32;
    if let Some(missing) = dict
        .get(b"FontDescriptor")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_dict().ok())
        .and_then(|d| d.get(b"MissingWidth").ok())
        .and_then(|o| obj_to_f32(resolve_object(doc, o)))
    {
        default_width = missing.max(0.0);
    }

    let first_char = dict
        .get(b"FirstChar")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_i64().ok())
        .unwrap_or(0);
    let mut widths = HashMap::new();
    if let Some(arr) = dict
        .get(b"Widths")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_array().ok())
    {
        for (idx, width_obj) in arr.iter().enumerate() {
            let Some(width) = obj_to_f32(resolve_object(doc, width_obj)) else {
                continue;
            };
            let Ok(code) = u8::try_from(first_char + idx as i64) else {
                break;
            };
            widths.insert(code, width.max(0.0));
        }
    }

    PdfFontResource {
        font_name,
        default_width,
        widths,
    }
}

fn inherited<'a>(doc: &'a LoDocument, mut id: ObjectId, key: &[u8]) -> Option<&'a LoObject> {
    for _ in 0..64 {
        let dict = doc.get_object(id).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

fn page_box_for(doc: &LoDocument, page_id: ObjectId) -> PageBox {
    [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .into_iter()
        .find_map(|key| {
            let arr = resolve_object(doc, inherited(doc, page_id, key)?)
                .as_array()
                .ok()?;
            parse_box_array(doc, arr)
        })
        .unwrap_or(PageBox {
            x0: 0.0,
            y0: 0.0,
            x1: 612.0,
            y1: 792.0,
        })
}

fn parse_box_array(doc: &LoDocument, arr: &[LoObject]) -> Option<PageBox> {
    if arr.len() < 4 {
        return None;
    }
    let v: Vec<f32> = arr
        .iter()
        .take(4)
        .map(|o| obj_to_f32(resolve_object(doc, o)))
        .collect::<Option<_>>()?;
    let page_box = PageBox {
        x0: v[0].min(v[2]),
        y0: v[1].min(v[3]),
        x1: v[0].max(v[2]),
        y1: v[1].max(v[3]),
    };
    (page_box.width() >= 1.0 && page_box.height() >= 1.0).then_some(page_box)
}

fn matrix_from_array(arr: &[LoObject]) -> Option<Matrix> {
    if arr.len() != 6 {
        return None;
    }
    let v: Vec<f32> = arr.iter().map(obj_to_f32).collect::<Option<_>>()?;
    Some(Matrix::from_operands(v[0], v[1], v[2], v[3], v[4], v[5]))
}

fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> Color {
    let r = (1.0 - c.clamp(0.0, 1.0)) * (1.0 - k.clamp(0.0, 1.0));
    let g = (1.0 - m.clamp(0.0, 1.0)) * (1.0 - k.clamp(0.0, 1.0));
    let b = (1.0 - y.clamp(0.0, 1.0)) * (1.0 - k.clamp(0.0, 1.0));
    Color::rgb(r, g, b)
}

fn resolve_object<'a>(doc: &'a LoDocument, obj: &'a LoObject) -> &'a LoObject {
    let mut current = obj;
    for _ in 0..32 {
        match current {
            LoObject::Reference(id) => match doc.get_object(*id) {
                Ok(next) => current = next,
                Err(_) => return current,
            },
            _ => return current,
        }
    }
    current
}

fn op_name(op: &Operation, idx: usize) -> Option<String> {
    let name = op.operands.get(idx)?.as_name().ok()?;
    Some(name_bytes_to_string(name))
}

fn op_f32(op: &Operation, idx: usize) -> Option<f32> {
    obj_to_f32(op.operands.get(idx)?)
}

fn op_i64(op: &Operation, idx: usize) -> Option<i64> {
    op.operands.get(idx)?.as_i64().ok()
}

fn op_f32_2(op: &Operation) -> Option<[f32; 2]> {
    Some([op_f32(op, 0)?, op_f32(op, 1)?])
}

fn op_f32_3(op: &Operation) -> Option<[f32; 3]> {
    Some([op_f32(op, 0)?, op_f32(op, 1)?, op_f32(op, 2)?])
}

fn op_f32_4(op: &Operation) -> Option<[f32; 4]> {
    Some([
        op_f32(op, 0)?,
        op_f32(op, 1)?,
        op_f32(op, 2)?,
        op_f32(op, 3)?,
    ])
}

fn op_f32_6(op: &Operation) -> Option<[f32; 6]> {
    Some([
        op_f32(op, 0)?,
        op_f32(op, 1)?,
        op_f32(op, 2)?,
        op_f32(op, 3)?,
        op_f32(op, 4)?,
        op_f32(op, 5)?,
    ])
}

fn obj_to_f32(obj: &LoObject) -> Option<f32> {
    if let Ok(v) = obj.as_float() {
        return Some(v);
    }
    obj.as_i64().ok().map(|v| v as f32)
}

fn name_bytes_to_string(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_string()
}
