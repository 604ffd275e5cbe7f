use super::{FieldSchema, FieldSpec, TinKind, bold_text, check, city_state_zip, text, tin};
use crate::document::DocumentType;

const ADDRESS_KEYS: [&str; 3] = ["city", "state", "zip"];

// Rev. October 2018 layout, unchanged through the 2023 filing year.
static W9_2018_FIELDS: [FieldSpec; 22] = [
    bold_text("name", 43.0, 676.0, 10.0),
    text("businessName", 43.0, 652.0, 10.0),
    check("individual", 66.0, 618.0, 9.0),
    check("cCorporation", 174.0, 618.0, 9.0),
    check("sCorporation", 246.0, 618.0, 9.0),
    check("partnership", 318.0, 618.0, 9.0),
    check("trustEstate", 390.0, 618.0, 9.0),
    check("llc", 66.0, 604.0, 9.0),
    text("llcTaxClassification", 359.0, 604.0, 9.0),
    check("other", 66.0, 580.0, 9.0),
    text("otherDescription", 135.0, 580.0, 9.0),
    text("exemptPayeeCode", 538.0, 616.0, 9.0),
    text("fatcaCode", 516.0, 586.0, 9.0),
    text("address", 43.0, 556.0, 10.0),
    city_state_zip("cityStateZip", ADDRESS_KEYS, 43.0, 532.0, 10.0),
    text("requester", 396.0, 556.0, 9.0),
    text("accountNumbers", 43.0, 508.0, 10.0),
    tin("ssn1", TinKind::Ssn, 0, 418.0, 470.0, 11.0),
    tin("ssn2", TinKind::Ssn, 1, 476.0, 470.0, 11.0),
    tin("ssn3", TinKind::Ssn, 2, 520.0, 470.0, 11.0),
    tin("ein1", TinKind::Ein, 0, 418.0, 422.0, 11.0),
    tin("ein2", TinKind::Ein, 1, 462.0, 422.0, 11.0),
];

pub(super) static W9_2018: FieldSchema = FieldSchema {
    document_type: DocumentType::W9,
    years: 2018..=2023,
    currency_decimals: 2,
    fields: &W9_2018_FIELDS,
};

// Rev. March 2024 adds line 3b (foreign partners) and moves the TIN boxes.
static W9_2024_FIELDS: [FieldSpec; 24] = [
    bold_text("name", 43.0, 688.0, 10.0),
    text("businessName", 43.0, 664.0, 10.0),
    check("individual", 66.0, 628.0, 9.0),
    check("cCorporation", 174.0, 628.0, 9.0),
    check("sCorporation", 246.0, 628.0, 9.0),
    check("partnership", 318.0, 628.0, 9.0),
    check("trustEstate", 390.0, 628.0, 9.0),
    check("llc", 66.0, 614.0, 9.0),
    text("llcTaxClassification", 359.0, 614.0, 9.0),
    check("other", 66.0, 590.0, 9.0),
    text("otherDescription", 135.0, 590.0, 9.0),
    check("foreignPartners", 493.0, 566.0, 9.0),
    text("exemptPayeeCode", 538.0, 626.0, 9.0),
    text("fatcaCode", 516.0, 596.0, 9.0),
    text("address", 43.0, 538.0, 10.0),
    city_state_zip("cityStateZip", ADDRESS_KEYS, 43.0, 514.0, 10.0),
    text("requester", 396.0, 538.0, 9.0),
    text("accountNumbers", 43.0, 490.0, 10.0),
    tin("ssn1", TinKind::Ssn, 0, 416.0, 452.0, 11.0),
    tin("ssn2", TinKind::Ssn, 1, 474.0, 452.0, 11.0),
    tin("ssn3", TinKind::Ssn, 2, 518.0, 452.0, 11.0),
    tin("ein1", TinKind::Ein, 0, 416.0, 404.0, 11.0),
    tin("ein2", TinKind::Ein, 1, 460.0, 404.0, 11.0),
    text("signatureDate", 410.0, 272.0, 10.0),
];

pub(super) static W9_2024: FieldSchema = FieldSchema {
    document_type: DocumentType::W9,
    years: 2024..=2025,
    currency_decimals: 2,
    fields: &W9_2024_FIELDS,
};
