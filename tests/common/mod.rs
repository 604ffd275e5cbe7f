#![allow(dead_code)]

use formstamp::{FormEngine, MemoryTemplateStore, ParsedPage, asset_paths, parse_page};
use lopdf::{Document, Object, Stream, dictionary};

pub const TEMPLATE_PAGES: usize = 3;

/// Letter-size stand-in for a government form. Page N shows a grey header
/// band and the text "page N"; MediaBox and Resources are inherited from the
/// page tree root like real IRS files.
pub fn synthetic_template(label: &str, page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
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
        let content = format!(
            "0.85 g 36 740 540 30 re f 0 g BT /F1 14 Tf 48 750 Td ({label} page {n}) Tj ET"
        );
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
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
    doc.save_to(&mut out).expect("save synthetic template");
    out
}

/// One-page letter template whose page `Contents` is an array of streams.
pub fn split_contents_template(parts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let contents: Vec<Object> = parts
        .iter()
        .map(|part| {
            let id = doc.add_object(Stream::new(dictionary! {}, part.as_bytes().to_vec()));
            Object::Reference(id)
        })
        .collect();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => contents,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save split template");
    out
}

/// Store holding a three-page synthetic template for every registered asset.
pub fn full_store() -> MemoryTemplateStore {
    let mut store = MemoryTemplateStore::new();
    for path in asset_paths() {
        store.insert(path, synthetic_template(path, TEMPLATE_PAGES));
    }
    store
}

pub fn engine() -> FormEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    FormEngine::builder()
        .template_store(full_store())
        .build()
        .expect("engine")
}

pub fn parse(bytes: &[u8], page_index: usize) -> ParsedPage {
    let doc = Document::load_mem(bytes).expect("reload output");
    parse_page(&doc, page_index).expect("parse page")
}

pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes).expect("reload output").get_pages().len()
}
