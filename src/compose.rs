//! Page compositor: loads the template, isolates the target page and draws
//! formatted field values on top of the existing content.

use crate::canvas::{Canvas, Command, OverlayResources, encode_commands, extgstate_name};
use crate::document::DocumentRequest;
use crate::error::{FieldIssue, FormError, Result, lopdf_err};
use crate::font::StandardFont;
use crate::format::format_field;
use crate::registry::{PageMode, TemplateDescriptor};
use crate::schema::{Align, FieldSchema};
use crate::types::{Color, PageBox, Pt};
use lopdf::{Dictionary, Document as LoDocument, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

// Guards against cyclic /Parent chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// One field that made it onto the page, with the geometry actually used.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnField {
    pub name: &'static str,
    pub text: String,
    pub x: Pt,
    pub y: Pt,
    pub font: StandardFont,
    pub font_size: Pt,
    pub text_width: Pt,
}

impl DrawnField {
    pub fn right_edge(&self) -> Pt {
        self.x + self.text_width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EmbeddedFonts {
    regular: ObjectId,
    bold: ObjectId,
}

impl EmbeddedFonts {
    fn id(&self, font: StandardFont) -> ObjectId {
        match font {
            StandardFont::Helvetica => self.regular,
            StandardFont::HelveticaBold => self.bold,
        }
    }
}

/// A template page with the request's values drawn on it. Owned by a
/// single render call.
#[derive(Debug)]
pub struct CompositedPage {
    document: LoDocument,
    page_id: ObjectId,
    page_index: usize,
    descriptor: TemplateDescriptor,
    fonts: EmbeddedFonts,
    drawn: Vec<DrawnField>,
    issues: Vec<FieldIssue>,
    watermarked: bool,
}

impl CompositedPage {
    pub fn descriptor(&self) -> &TemplateDescriptor {
        &self.descriptor
    }

    pub fn document(&self) -> &LoDocument {
        &self.document
    }

    pub fn page_id(&self) -> ObjectId {
        self.page_id
    }

    /// Zero-based index of the target page in this document.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    pub fn drawn_fields(&self) -> &[DrawnField] {
        &self.drawn
    }

    pub fn drawn_field(&self, name: &str) -> Option<&DrawnField> {
        self.drawn.iter().find(|f| f.name == name)
    }

    /// Fields skipped because their values could not be coerced.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_watermarked(&self) -> bool {
        self.watermarked
    }

    pub(crate) fn mark_watermarked(&mut self) {
        self.watermarked = true;
    }

    /// Visible area of the target page (CropBox, else MediaBox).
    pub fn page_box(&self) -> PageBox {
        let dict = self
            .document
            .get_object(self.page_id)
            .and_then(Object::as_dict)
            .ok();
        dict.and_then(|d| {
            box_from_dict(&self.document, d, b"CropBox")
                .or_else(|| box_from_dict(&self.document, d, b"MediaBox"))
        })
        .unwrap_or(PageBox {
            x0: 0.0,
            y0: 0.0,
            x1: 612.0,
            y1: 792.0,
        })
    }

    /// Append a command list as a new content stream on the target page and
    /// register the resources it refers to.
    pub fn stamp(&mut self, commands: &[Command]) -> Result<()> {
        if commands.is_empty() {
            return Ok(());
        }
        let (bytes, needs) = encode_commands(commands)?;
        self.ensure_resources(&needs)?;
        self.document
            .add_page_contents(self.page_id, bytes)
            .map_err(lopdf_err)?;
        Ok(())
    }

    pub(crate) fn into_document(self) -> LoDocument {
        self.document
    }

    fn ensure_resources(&mut self, needs: &OverlayResources) -> Result<()> {
        let mut resources = owned_resources(&self.document, self.page_id)?;

        if !needs.fonts.is_empty() {
            let mut fonts = owned_subdict(&self.document, &resources, b"Font");
            for font in &needs.fonts {
                fonts.set(
                    font.resource_name().as_bytes().to_vec(),
                    Object::Reference(self.fonts.id(*font)),
                );
            }
            resources.set("Font", Object::Dictionary(fonts));
        }

        if !needs.opacities.is_empty() {
            let mut states = owned_subdict(&self.document, &resources, b"ExtGState");
            for key in &needs.opacities {
                let name = extgstate_name(*key);
                if states.has(name.as_bytes()) {
                    continue;
                }
                let gs_id = self.document.add_object(dictionary! {
                    "Type" => "ExtGState",
                    "ca" => Object::Real(key.0 as f32 / 1000.0),
                    "CA" => Object::Real(key.1 as f32 / 1000.0),
                });
                states.set(name.into_bytes(), Object::Reference(gs_id));
            }
            resources.set("ExtGState", Object::Dictionary(states));
        }

        let page = self
            .document
            .get_object_mut(self.page_id)
            .and_then(Object::as_dict_mut)
            .map_err(lopdf_err)?;
        page.set("Resources", Object::Dictionary(resources));
        Ok(())
    }
}

/// Draw every schema field that has a value onto the descriptor's target page.
///
/// Template problems (unparseable bytes, encryption, missing page) are fatal.
/// A field whose value cannot be coerced is logged, recorded in
/// [`CompositedPage::issues`] and left off the page.
pub fn composite(
    template: &[u8],
    descriptor: &TemplateDescriptor,
    schema: &FieldSchema,
    request: &DocumentRequest,
) -> Result<CompositedPage> {
    let invalid = |message: String| FormError::TemplateInvalid {
        asset_path: descriptor.asset_path.to_string(),
        message,
    };
    let source = LoDocument::load_mem(template).map_err(|e| invalid(e.to_string()))?;
    if source.is_encrypted() {
        return Err(invalid("template PDF is encrypted".to_string()));
    }

    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let Some(&source_page_id) = page_ids.get(descriptor.source_page_index) else {
        return Err(FormError::PageOutOfRange {
            asset_path: descriptor.asset_path.to_string(),
            index: descriptor.source_page_index,
            page_count: page_ids.len(),
        });
    };

    let (mut document, page_id, page_index) = match descriptor.page_mode {
        PageMode::InPlace => {
            let mut document = source;
            materialize_inherited(&mut document, source_page_id)?;
            (document, source_page_id, descriptor.source_page_index)
        }
        PageMode::Extract => {
            let (document, page_id) = extract_page(&source, source_page_id)?;
            (document, page_id, 0)
        }
    };

    isolate_existing_content(&mut document, page_id)?;
    let fonts = embed_fonts(&mut document);

    let mut page = CompositedPage {
        document,
        page_id,
        page_index,
        descriptor: descriptor.clone(),
        fonts,
        drawn: Vec::new(),
        issues: Vec::new(),
        watermarked: false,
    };
    page.ensure_resources(&OverlayResources {
        fonts: [StandardFont::Helvetica, StandardFont::HelveticaBold].into(),
        ..OverlayResources::default()
    })?;

    let mut canvas = Canvas::new();
    canvas.save_state();
    canvas.set_fill_color(Color::BLACK);
    for spec in schema.fields {
        let text = match format_field(spec, request, schema.currency_decimals) {
            Ok(text) => text,
            Err(issue) => {
                log::warn!(
                    "{} {}: {issue}",
                    descriptor.document_type,
                    descriptor.revision_year
                );
                page.issues.push(issue);
                continue;
            }
        };
        if text.is_empty() {
            continue;
        }
        let font = StandardFont::for_weight(spec.bold);
        let font_size = Pt::from_f32(spec.font_size);
        let text_width = font.measure_text_width(font_size, &text);
        let x = match (spec.align, spec.width) {
            (Align::Right, Some(width)) => Pt::from_f32(spec.x + width) - text_width,
            _ => Pt::from_f32(spec.x),
        };
        let y = Pt::from_f32(spec.y);
        canvas.set_font(font, font_size);
        canvas.draw_string(x, y, text.clone());
        page.drawn.push(DrawnField {
            name: spec.name,
            text,
            x,
            y,
            font,
            font_size,
            text_width,
        });
    }
    let commands = canvas.finish();
    page.stamp(&commands)?;

    log::debug!(
        "composited {} {} from {} page {}: {} drawn, {} skipped",
        descriptor.document_type,
        descriptor.revision_year,
        descriptor.asset_path,
        descriptor.source_page_index,
        page.drawn.len(),
        page.issues.len()
    );
    Ok(page)
}

/// Add the two standard fonts to the document. Called once per composition;
/// every later overlay on the page points at these objects.
fn embed_fonts(document: &mut LoDocument) -> EmbeddedFonts {
    let mut add = |font: StandardFont| {
        document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        })
    };
    EmbeddedFonts {
        regular: add(StandardFont::Helvetica),
        bold: add(StandardFont::HelveticaBold),
    }
}

/// Wrap the page's current content in `q ... Q` so anything appended later
/// starts from the default graphics state.
fn isolate_existing_content(document: &mut LoDocument, page_id: ObjectId) -> Result<()> {
    let existing = content_stream_ids(document, page_id)?;
    let open = document.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
    // Streams are concatenated without separators; the leading newline keeps
    // a template's final token from running into the restore.
    let close = document.add_object(Stream::new(dictionary! {}, b"\nQ\n".to_vec()));
    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(open));
    contents.extend(existing.into_iter().map(Object::Reference));
    contents.push(Object::Reference(close));
    let page = document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(lopdf_err)?;
    page.set("Contents", Object::Array(contents));
    Ok(())
}

fn content_stream_ids(document: &LoDocument, page_id: ObjectId) -> Result<Vec<ObjectId>> {
    let page = document
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(lopdf_err)?;
    let Ok(contents) = page.get(b"Contents") else {
        return Ok(Vec::new());
    };
    let items = match contents {
        Object::Reference(id) => match document.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            Ok(Object::Stream(_)) => return Ok(vec![*id]),
            _ => return Ok(Vec::new()),
        },
        Object::Array(items) => items.clone(),
        _ => Vec::new(),
    };
    Ok(items
        .iter()
        .filter_map(|o| o.as_reference().ok())
        .collect())
}

fn inherited_attribute(document: &LoDocument, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = document.get_object(id).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

/// Copy inherited page attributes onto the page itself so later edits to
/// the page's resources never touch shared ancestors.
fn materialize_inherited(document: &mut LoDocument, page_id: ObjectId) -> Result<()> {
    let mut found = Vec::new();
    for key in INHERITABLE {
        if let Some(value) = inherited_attribute(document, page_id, key) {
            found.push((key, value));
        }
    }
    let page = document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(lopdf_err)?;
    for (key, value) in found {
        if !page.has(key) {
            page.set(key.to_vec(), value);
        }
    }
    Ok(())
}

/// Deep-copy one page and everything it references into a new single-page
/// document. Other pages reachable through back-references are dropped.
fn extract_page(source: &LoDocument, page_id: ObjectId) -> Result<(LoDocument, ObjectId)> {
    let mut page = source
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(lopdf_err)?
        .clone();
    for key in INHERITABLE {
        if !page.has(key) {
            if let Some(value) = inherited_attribute(source, page_id, key) {
                page.set(key.to_vec(), value);
            }
        }
    }
    page.remove(b"Parent");

    let mut target = LoDocument::with_version(source.version.clone());
    let pages_id = target.new_object_id();
    let new_page_id = target.new_object_id();

    let mut copier = GraphCopier {
        source,
        target: &mut target,
        remap: HashMap::from([(page_id, new_page_id)]),
    };
    let mut copied = copier.copy_dict(&page);
    copied.set("Parent", Object::Reference(pages_id));
    target
        .objects
        .insert(new_page_id, Object::Dictionary(copied));

    target.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(new_page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = target.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    target.trailer.set("Root", catalog_id);
    Ok((target, new_page_id))
}

struct GraphCopier<'a> {
    source: &'a LoDocument,
    target: &'a mut LoDocument,
    remap: HashMap<ObjectId, ObjectId>,
}

impl GraphCopier<'_> {
    fn copy(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(*id),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dict(dict)),
            Object::Array(items) => Object::Array(items.iter().map(|o| self.copy(o)).collect()),
            Object::Stream(stream) => {
                let mut out = stream.clone();
                out.dict = self.copy_dict(&stream.dict);
                Object::Stream(out)
            }
            other => other.clone(),
        }
    }

    fn copy_dict(&mut self, dict: &Dictionary) -> Dictionary {
        let mut out = Dictionary::new();
        for (key, value) in dict.iter() {
            out.set(key.clone(), self.copy(value));
        }
        out
    }

    fn copy_reference(&mut self, id: ObjectId) -> Object {
        if let Some(mapped) = self.remap.get(&id) {
            return Object::Reference(*mapped);
        }
        let Ok(object) = self.source.get_object(id) else {
            return Object::Null;
        };
        if is_page_tree_node(object) {
            return Object::Null;
        }
        let new_id = self.target.new_object_id();
        self.remap.insert(id, new_id);
        let copied = self.copy(object);
        self.target.objects.insert(new_id, copied);
        Object::Reference(new_id)
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page") | Ok(b"Pages")
    )
}

fn resolve<'a>(document: &'a LoDocument, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn owned_resources(document: &LoDocument, page_id: ObjectId) -> Result<Dictionary> {
    let page = document
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(lopdf_err)?;
    Ok(match page.get(b"Resources") {
        Ok(obj) => resolve(document, obj).as_dict().cloned().unwrap_or_default(),
        Err(_) => Dictionary::new(),
    })
}

fn owned_subdict(document: &LoDocument, resources: &Dictionary, key: &[u8]) -> Dictionary {
    match resources.get(key) {
        Ok(obj) => resolve(document, obj).as_dict().cloned().unwrap_or_default(),
        Err(_) => Dictionary::new(),
    }
}

fn box_from_dict(document: &LoDocument, dict: &Dictionary, key: &[u8]) -> Option<PageBox> {
    let arr = resolve(document, dict.get(key).ok()?).as_array().ok()?;
    if arr.len() < 4 {
        return None;
    }
    let mut v = [0.0f32; 4];
    for (slot, obj) in v.iter_mut().zip(arr) {
        let obj = resolve(document, obj);
        *slot = obj
            .as_float()
            .ok()
            .or_else(|| obj.as_i64().ok().map(|n| n as f32))?;
    }
    Some(PageBox {
        x0: v[0].min(v[2]),
        y0: v[1].min(v[3]),
        x1: v[0].max(v[2]),
        y1: v[1].max(v[3]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentType;
    use crate::registry;
    use crate::schema::schema_for;
    use lopdf::content::Content;

    /// Multi-page letter PDF; page N carries the text "page N". Pages inherit
    /// MediaBox and Resources from the tree root.
    fn template_pdf(page_count: usize) -> Vec<u8> {
        let mut doc = LoDocument::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Times-Roman",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let mut kids = Vec::new();
        for n in 1..=page_count {
            let content = format!("BT /F1 18 Tf 72 720 Td (page {n}) Tj ET 2 w").into_bytes();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut out = Vec::new();
        doc.save_to(&mut out).expect("save template");
        out
    }

    fn page_text(doc: &LoDocument, page_id: ObjectId) -> String {
        let bytes = doc.get_page_content(page_id).expect("content");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn jane_doe() -> DocumentRequest {
        DocumentRequest::new(DocumentType::W9, 2024)
            .with_field("name", "Jane Doe")
            .with_field("tinType", "ssn")
            .with_field("ssn", "123-45-6789")
    }

    #[test]
    fn in_place_keeps_every_page_and_draws_on_target() {
        let descriptor = registry::resolve(DocumentType::W9, 2024).expect("w9");
        let schema = schema_for(DocumentType::W9, 2024).expect("schema");
        let page = composite(&template_pdf(3), &descriptor, schema, &jane_doe()).expect("composite");
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.page_index(), 0);

        let text = page_text(page.document(), page.page_id());
        assert!(text.contains("(page 1)"), "template content kept");
        assert!(text.contains("(Jane Doe)"));
        assert!(text.contains("/FSHelvB"));
        let names: Vec<&str> = page.drawn_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "ssn1", "ssn2", "ssn3"]);
    }

    #[test]
    fn extract_yields_single_page_with_source_content() {
        let descriptor = registry::resolve(DocumentType::Form1099Nec, 2024).expect("nec");
        let schema = schema_for(DocumentType::Form1099Nec, 2024).expect("schema");
        let request = DocumentRequest::new(DocumentType::Form1099Nec, 2024)
            .with_field("recipientName", "Sam Roe")
            .with_field("nonemployeeCompensation", "12500");
        let page = composite(&template_pdf(3), &descriptor, schema, &request).expect("composite");
        assert_eq!(page.page_count(), 1);
        let text = page_text(page.document(), page.page_id());
        assert!(text.contains("(page 3)"), "{text}");
        assert!(!text.contains("(page 1)"));
        assert!(text.contains("(12,500.00)"));
        let media = page.page_box();
        assert_eq!((media.width(), media.height()), (612.0, 792.0));
    }

    #[test]
    fn page_index_past_end_is_fatal() {
        let descriptor = registry::resolve(DocumentType::Form1099Misc, 2023).expect("misc");
        let schema = schema_for(DocumentType::Form1099Misc, 2023).expect("schema");
        let request = DocumentRequest::new(DocumentType::Form1099Misc, 2023);
        let err = composite(&template_pdf(2), &descriptor, schema, &request).expect_err("short");
        assert!(matches!(
            err,
            FormError::PageOutOfRange {
                index: 2,
                page_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn garbage_template_is_invalid() {
        let descriptor = registry::resolve(DocumentType::W9, 2024).expect("w9");
        let schema = schema_for(DocumentType::W9, 2024).expect("schema");
        let err = composite(b"not a pdf", &descriptor, schema, &jane_doe()).expect_err("garbage");
        assert!(matches!(err, FormError::TemplateInvalid { .. }));
    }

    #[test]
    fn right_aligned_currency_ends_at_box_edge() {
        let descriptor = registry::resolve(DocumentType::Form1099Nec, 2024).expect("nec");
        let schema = schema_for(DocumentType::Form1099Nec, 2024).expect("schema");
        let request = DocumentRequest::new(DocumentType::Form1099Nec, 2024)
            .with_field("nonemployeeCompensation", 1234.5)
            .with_field("federalTaxWithheld", 0);
        let page = composite(&template_pdf(3), &descriptor, schema, &request).expect("composite");
        let spec = schema.field("nonemployeeCompensation").expect("box 1");
        let drawn = page.drawn_field("nonemployeeCompensation").expect("drawn");
        assert_eq!(drawn.text, "1,234.50");
        let edge = Pt::from_f32(spec.x + spec.width.expect("width"));
        assert!((drawn.right_edge().to_milli_i64() - edge.to_milli_i64()).abs() <= 1);
        assert!(page.drawn_field("federalTaxWithheld").is_none());
    }

    #[test]
    fn bad_values_are_skipped_not_fatal() {
        let descriptor = registry::resolve(DocumentType::W9, 2024).expect("w9");
        let schema = schema_for(DocumentType::W9, 2024).expect("schema");
        let request = jane_doe()
            .with_field("businessName", serde_json::json!(["a", "b"]))
            .with_field("ssn", "12-34");
        let page = composite(&template_pdf(1), &descriptor, schema, &request).expect("composite");
        let skipped: Vec<&str> = page.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(skipped, vec!["businessName", "ssn1", "ssn2", "ssn3"]);
        assert!(page.drawn_field("name").is_some());
    }

    #[test]
    fn fonts_are_embedded_once_as_standard_type1() {
        let descriptor = registry::resolve(DocumentType::W9, 2024).expect("w9");
        let schema = schema_for(DocumentType::W9, 2024).expect("schema");
        let request = jane_doe().with_field("llc", true);
        let page = composite(&template_pdf(1), &descriptor, schema, &request).expect("composite");
        let ours: Vec<String> = page
            .document()
            .objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .filter(|d| d.get(b"Encoding").and_then(Object::as_name).ok() == Some(&b"WinAnsiEncoding"[..]))
            .filter_map(|d| d.get(b"BaseFont").and_then(Object::as_name).ok())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .collect();
        assert_eq!(ours.len(), 2);
        assert!(ours.contains(&"Helvetica".to_string()));
        assert!(ours.contains(&"Helvetica-Bold".to_string()));
    }

    #[test]
    fn existing_content_is_wrapped_before_overlay() {
        let descriptor = registry::resolve(DocumentType::W9, 2024).expect("w9");
        let schema = schema_for(DocumentType::W9, 2024).expect("schema");
        let page = composite(&template_pdf(1), &descriptor, schema, &jane_doe()).expect("composite");
        let bytes = page
            .document()
            .get_page_content(page.page_id())
            .expect("content");
        let content = Content::decode(&bytes).expect("decode");
        let ops: Vec<&str> = content.operations.iter().map(|o| o.operator.as_str()).collect();
        assert_eq!(ops.first(), Some(&"q"));
        let template_end = ops.iter().position(|o| *o == "w").expect("template op");
        assert_eq!(ops[template_end + 1], "Q");
    }
}
