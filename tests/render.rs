mod common;

use common::{TEMPLATE_PAGES, engine, full_store, page_count, parse};
use formstamp::{
    CHECK_MARK, DocumentRequest, DocumentType, FieldRole, FormEngine, FormError, ImageFormat,
    MemoryTemplateStore, PageMode, PreviewFonts, StandardFont, TextRun, WATERMARK_SUBTYPE,
    apply_watermark, finalize, rasterize_pdf, resolve, schema_for, supported_revisions,
};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

fn runs_of(bytes: &[u8], page_index: usize) -> Vec<TextRun> {
    parse(bytes, page_index).text_runs()
}

fn run_named<'a>(runs: &'a [TextRun], text: &str) -> Vec<&'a TextRun> {
    runs.iter().filter(|r| r.text == text).collect()
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

fn jane_doe() -> DocumentRequest {
    DocumentRequest::new(DocumentType::W9, 2024)
        .with_field("name", "Jane Doe")
        .with_field("tinType", "ssn")
        .with_field("ssn", "123-45-6789")
}

#[test]
fn every_supported_revision_renders_from_its_asset() {
    let engine = engine();
    for (document_type, year) in supported_revisions() {
        let descriptor = resolve(document_type, year).expect("descriptor");
        let bytes = engine
            .render_final(&DocumentRequest::new(document_type, year))
            .unwrap_or_else(|e| panic!("{document_type} {year}: {e}"));
        let expected_pages = match descriptor.page_mode {
            PageMode::InPlace => TEMPLATE_PAGES,
            PageMode::Extract => 1,
        };
        assert_eq!(page_count(&bytes), expected_pages, "{document_type} {year}");
    }
}

#[test]
fn w9_2024_scenario_draws_bold_name_and_ssn_groups() {
    let engine = engine();
    let bytes = engine.render_final(&jane_doe()).expect("render");
    let schema = schema_for(DocumentType::W9, 2024).expect("schema");
    let runs = runs_of(&bytes, 0);

    let name = run_named(&runs, "Jane Doe");
    assert_eq!(name.len(), 1);
    let spec = schema.field("name").expect("name spec");
    assert_eq!(name[0].font_name, "Helvetica-Bold");
    assert!(close(name[0].x, spec.x) && close(name[0].y, spec.y));

    for (text, field) in [("123", "ssn1"), ("45", "ssn2"), ("6789", "ssn3")] {
        let spec = schema.field(field).expect("ssn spec");
        let hits = run_named(&runs, text);
        assert_eq!(hits.len(), 1, "{field}");
        assert!(close(hits[0].x, spec.x) && close(hits[0].y, spec.y), "{field}");
        assert_eq!(hits[0].font_name, "Helvetica");
    }

    assert!(runs.iter().all(|r| !r.artifact));
    assert!(run_named(&runs, "PREVIEW").is_empty());
}

#[test]
fn zero_currency_is_blank_and_nonzero_is_right_aligned() {
    let engine = engine();
    let request = DocumentRequest::new(DocumentType::Form1099Nec, 2024)
        .with_field("nonemployeeCompensation", "$12,500.5")
        .with_field("federalTaxWithheld", 0)
        .with_field("stateTaxWithheld", "0.00");
    let bytes = engine.render_final(&request).expect("render");
    let runs = runs_of(&bytes, 0);

    assert!(run_named(&runs, "0.00").is_empty());
    assert!(run_named(&runs, "0").is_empty());

    let schema = schema_for(DocumentType::Form1099Nec, 2024).expect("schema");
    let spec = schema.field("nonemployeeCompensation").expect("box 1");
    let hits = run_named(&runs, "12,500.50");
    assert_eq!(hits.len(), 1);
    let width = StandardFont::Helvetica
        .measure_text_width(formstamp::Pt::from_f32(spec.font_size), "12,500.50")
        .to_f32();
    let edge = spec.x + spec.width.expect("width");
    assert!(close(hits[0].x + width, edge), "{} + {width} vs {edge}", hits[0].x);
}

#[test]
fn schedule_c_amounts_have_no_cents() {
    let schema = schema_for(DocumentType::ScheduleC, 2024).expect("schema");
    let field = schema
        .fields
        .iter()
        .find(|f| matches!(f.role, FieldRole::Currency))
        .expect("currency field");
    let request = DocumentRequest::new(DocumentType::ScheduleC, 2024).with_field(field.name, 48250.6);
    let bytes = engine().render_final(&request).expect("render");
    assert_eq!(run_named(&runs_of(&bytes, 0), "48,251").len(), 1);
}

#[test]
fn checkbox_draws_one_mark_only_when_truthy() {
    let engine = engine();
    let schema = schema_for(DocumentType::W9, 2024).expect("schema");
    let spec = schema.field("llc").expect("llc");

    let checked = engine
        .render_final(&jane_doe().with_field("llc", true))
        .expect("checked");
    let runs = runs_of(&checked, 0);
    let marks = run_named(&runs, CHECK_MARK);
    assert_eq!(marks.len(), 1);
    assert!(close(marks[0].x, spec.x) && close(marks[0].y, spec.y));
    assert_eq!(marks[0].font_name, "Helvetica-Bold");

    for falsy in [serde_json::json!(false), serde_json::json!("no"), serde_json::json!(0)] {
        let bytes = engine
            .render_final(&jane_doe().with_field("llc", falsy))
            .expect("unchecked");
        assert!(run_named(&runs_of(&bytes, 0), CHECK_MARK).is_empty());
    }
}

#[test]
fn identical_requests_give_identical_bytes() {
    let engine = engine();
    let request = jane_doe().with_field("llc", true).with_field("city", "Austin");
    let a = engine.render_final(&request).expect("a");
    let b = engine.render_final(&request).expect("b");
    assert!(a == b, "final output must be byte-identical");
}

#[test]
fn extraction_keeps_only_the_third_source_page() {
    let engine = engine();
    let request = DocumentRequest::new(DocumentType::Form1099Misc, 2024)
        .with_field("recipientName", "Sam Roe");
    let bytes = engine.render_final(&request).expect("render");
    assert_eq!(page_count(&bytes), 1);
    let runs = runs_of(&bytes, 0);
    assert!(runs.iter().any(|r| r.text.ends_with("page 3")));
    assert!(!runs.iter().any(|r| r.text.ends_with("page 1") || r.text.ends_with("page 2")));
    assert_eq!(run_named(&runs, "Sam Roe").len(), 1);
}

#[test]
fn preview_carries_watermark_and_final_does_not() {
    let engine = engine();
    let mut page = engine.compose(&jane_doe()).expect("compose");
    assert!(apply_watermark(&mut page, engine.watermark()).expect("first"));
    assert!(!apply_watermark(&mut page, engine.watermark()).expect("second"));
    let watermarked = finalize(page).expect("package");
    let parsed = parse(&watermarked, 0);
    assert!(parsed.commands.contains(&formstamp::Command::BeginArtifact {
        subtype: Some(WATERMARK_SUBTYPE.to_string())
    }));
    let runs = parsed.text_runs();
    let marks: Vec<&str> = runs
        .iter()
        .filter(|r| r.artifact)
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(marks, vec!["FORMSTAMP", "PREVIEW"]);
    assert!(runs.iter().filter(|r| r.artifact).all(|r| r.font_name == "Helvetica-Bold"));

    let final_bytes = engine.render_final(&jane_doe()).expect("final");
    assert!(runs_of(&final_bytes, 0).iter().all(|r| !r.artifact));
}

#[test]
fn preview_is_a_2x_png_of_the_target_page() {
    let engine = engine();
    let image = engine.render_preview(&jane_doe()).expect("preview");
    assert_eq!(image.format, ImageFormat::Png);
    assert_eq!((image.width, image.height), (1224, 1584));
    let decoded = image::load_from_memory(&image.bytes).expect("decode").to_rgb8();
    assert_eq!(decoded.dimensions(), (1224, 1584));
    // Header band of the synthetic template lands near the top of the image.
    let band = decoded.get_pixel(600, (792 - 755) * 2);
    assert!(band.0[0] < 250, "{:?}", band.0);
    assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
}

#[test]
fn jpeg_preview_is_configurable() {
    let engine = FormEngine::builder()
        .template_store(full_store())
        .preview_format(ImageFormat::Jpeg)
        .jpeg_quality(70)
        .raster_scale(1.0)
        .build()
        .expect("engine");
    let request = DocumentRequest::new(DocumentType::Form1099Nec, 2025);
    let image = engine.render_preview(&request).expect("preview");
    assert_eq!(&image.bytes[..2], &[0xFF, 0xD8]);
    assert_eq!((image.width, image.height), (612, 792));
    assert_eq!(image.mime_type(), "image/jpeg");
}

#[test]
fn preview_image_shows_the_watermark_the_final_lacks() {
    let engine = engine();
    let preview = engine.render_preview(&jane_doe()).expect("preview");
    let final_bytes = engine.render_final(&jane_doe()).expect("final");
    let clean = rasterize_pdf(
        &final_bytes,
        0,
        engine.raster_options(),
        &PreviewFonts::discover(),
    )
    .expect("clean raster");
    let preview = image::load_from_memory(&preview.bytes).expect("decode").to_rgb8();
    let clean = image::load_from_memory(&clean.bytes).expect("decode").to_rgb8();
    assert_eq!(preview.dimensions(), clean.dimensions());

    // Watermark is centred on the page: (306, 396) pt is (612, 792) px at 2x.
    let mut differing = 0usize;
    for y in 592..992 {
        for x in 312..912 {
            if preview.get_pixel(x, y) != clean.get_pixel(x, y) {
                differing += 1;
            }
        }
    }
    assert!(differing > 1_000, "only {differing} pixels differ");
    // Header band is template art, untouched by the watermark.
    assert_eq!(preview.get_pixel(80, 80), clean.get_pixel(80, 80));
}

#[test]
fn preview_without_fonts_fails_instead_of_dropping_the_watermark() {
    let engine = FormEngine::builder()
        .template_store(full_store())
        .system_fonts(false)
        .build()
        .expect("engine");
    let err = engine.render_preview(&jane_doe()).expect_err("no fonts");
    assert!(matches!(err, FormError::RasterizationFailed(_)), "{err}");
    assert!(engine.render_final(&jane_doe()).is_ok());
}

#[test]
fn operators_split_across_content_streams_still_paint() {
    let mut store = MemoryTemplateStore::new();
    store.insert(
        "w9/fw9-2024.pdf",
        common::split_contents_template(&["0 0 612 792", " re f"]),
    );
    let engine = FormEngine::builder()
        .template_store(store)
        .build()
        .expect("engine");
    let image = engine.render_preview(&jane_doe()).expect("preview");
    let decoded = image::load_from_memory(&image.bytes).expect("decode").to_rgb8();
    assert_eq!(decoded.get_pixel(10, 10).0, [0, 0, 0]);
}

#[test]
fn preview_and_final_differ() {
    let engine = engine();
    let final_bytes = engine.render_final(&jane_doe()).expect("final");
    let preview = engine.render_preview(&jane_doe()).expect("preview");
    assert_ne!(final_bytes, preview.bytes);
    assert!(final_bytes.starts_with(b"%PDF-"));
}

#[test]
fn concurrent_renders_agree() {
    let engine = engine();
    let request = jane_doe().with_field("llc", true);
    let expected = engine.render_final(&request).expect("baseline");
    let outputs: Vec<Vec<u8>> = (0..16)
        .into_par_iter()
        .map(|_| engine.render_final(&request).expect("render"))
        .collect();
    assert!(outputs.iter().all(|o| *o == expected));
}

#[test]
fn json_request_round_trips_into_a_render() {
    let request: DocumentRequest = serde_json::from_str(
        r#"{"documentType":"pay-stub","revisionYear":2025,
            "fields":{"employeeName":"Ada Park","grossPay":"3,200","netPay":2750.25}}"#,
    )
    .expect("json");
    let bytes = engine().render_final(&request).expect("render");
    let runs = runs_of(&bytes, 0);
    assert_eq!(run_named(&runs, "Ada Park").len(), 1);
    assert_eq!(run_named(&runs, "3,200.00").len(), 1);
    assert_eq!(run_named(&runs, "2,750.25").len(), 1);
}

#[test]
fn unsupported_revision_and_missing_asset_are_fatal() {
    let engine = engine();
    let err = engine
        .render_final(&DocumentRequest::new(DocumentType::Form1099Misc, 2022))
        .expect_err("no 2022 misc");
    assert!(matches!(err, FormError::UnsupportedRevision { .. }));

    let mut store = MemoryTemplateStore::new();
    store.insert("w9/fw9-2018.pdf", common::synthetic_template("w9", 1));
    let sparse = FormEngine::builder()
        .template_store(store)
        .system_fonts(false)
        .build()
        .expect("engine");
    assert!(sparse.render_final(&DocumentRequest::new(DocumentType::W9, 2020)).is_ok());
    let err = sparse
        .render_preview(&DocumentRequest::new(DocumentType::W9, 2024))
        .expect_err("missing 2024 asset");
    assert!(matches!(err, FormError::AssetNotFound { .. }));
}

#[test]
fn short_template_reports_page_out_of_range() {
    let mut store = MemoryTemplateStore::new();
    store.insert("1099/f1099nec-2024.pdf", common::synthetic_template("nec", 2));
    let engine = FormEngine::builder()
        .template_store(store)
        .system_fonts(false)
        .build()
        .expect("engine");
    let err = engine
        .render_final(&DocumentRequest::new(DocumentType::Form1099Nec, 2024))
        .expect_err("short");
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
fn metrics_count_drawn_and_skipped_fields() {
    let engine = engine();
    let request = jane_doe().with_field("businessName", serde_json::json!({"a": 1}));
    let (_, metrics) = engine
        .render_with_metrics(&request, formstamp::RenderMode::Final)
        .expect("render");
    assert_eq!(metrics.document_type, "w9");
    assert_eq!(metrics.mode, "final");
    assert_eq!(metrics.fields_drawn, 4);
    assert_eq!(metrics.fields_skipped, 1);
    assert!(metrics.output_bytes > 0);
}
