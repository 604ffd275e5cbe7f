use super::{FieldSchema, FieldSpec, check, city_state_zip, money, text};
use crate::document::DocumentType;

const PAYER_ADDRESS: [&str; 3] = ["payerCity", "payerState", "payerZip"];
const RECIPIENT_ADDRESS: [&str; 3] = ["recipientCity", "recipientState", "recipientZip"];

// Copy B, 2022 revision (also used for 2023).
static NEC_2022_FIELDS: [FieldSpec; 17] = [
    text("payerName", 40.0, 716.0, 9.0),
    text("payerAddress", 40.0, 704.0, 9.0),
    city_state_zip("payerCityStateZip", PAYER_ADDRESS, 40.0, 692.0, 9.0),
    text("payerPhone", 40.0, 680.0, 9.0),
    text("payerTin", 40.0, 636.0, 10.0),
    text("recipientTin", 152.0, 636.0, 10.0),
    text("recipientName", 40.0, 606.0, 10.0),
    text("recipientAddress", 40.0, 570.0, 9.0),
    city_state_zip("recipientCityStateZip", RECIPIENT_ADDRESS, 40.0, 546.0, 9.0),
    text("accountNumber", 40.0, 510.0, 9.0),
    money("nonemployeeCompensation", 300.0, 630.0, 86.0, 10.0),
    check("directSales", 395.0, 602.0, 9.0),
    money("federalTaxWithheld", 300.0, 566.0, 86.0, 10.0),
    money("stateTaxWithheld", 300.0, 522.0, 70.0, 9.0),
    text("statePayerNumber", 385.0, 522.0, 9.0),
    money("stateIncome", 480.0, 522.0, 80.0, 9.0),
    check("secondTinNotice", 250.0, 510.0, 9.0),
];

pub(super) static NEC_2022: FieldSchema = FieldSchema {
    document_type: DocumentType::Form1099Nec,
    years: 2022..=2023,
    currency_decimals: 2,
    fields: &NEC_2022_FIELDS,
};

// 2024 adds box 3 (excess golden parachute) and shifts the withholding row.
static NEC_2024_FIELDS: [FieldSpec; 18] = [
    text("payerName", 40.0, 716.0, 9.0),
    text("payerAddress", 40.0, 704.0, 9.0),
    city_state_zip("payerCityStateZip", PAYER_ADDRESS, 40.0, 692.0, 9.0),
    text("payerPhone", 40.0, 680.0, 9.0),
    text("payerTin", 40.0, 640.0, 10.0),
    text("recipientTin", 152.0, 640.0, 10.0),
    text("recipientName", 40.0, 610.0, 10.0),
    text("recipientAddress", 40.0, 574.0, 9.0),
    city_state_zip("recipientCityStateZip", RECIPIENT_ADDRESS, 40.0, 550.0, 9.0),
    text("accountNumber", 40.0, 514.0, 9.0),
    money("nonemployeeCompensation", 300.0, 636.0, 86.0, 10.0),
    check("directSales", 395.0, 612.0, 9.0),
    money("excessGoldenParachute", 300.0, 588.0, 86.0, 10.0),
    money("federalTaxWithheld", 300.0, 562.0, 86.0, 10.0),
    money("stateTaxWithheld", 300.0, 518.0, 70.0, 9.0),
    text("statePayerNumber", 385.0, 518.0, 9.0),
    money("stateIncome", 480.0, 518.0, 80.0, 9.0),
    check("secondTinNotice", 250.0, 514.0, 9.0),
];

pub(super) static NEC_2024: FieldSchema = FieldSchema {
    document_type: DocumentType::Form1099Nec,
    years: 2024..=2024,
    currency_decimals: 2,
    fields: &NEC_2024_FIELDS,
};

static NEC_2025_FIELDS: [FieldSpec; 18] = [
    text("payerName", 40.0, 718.0, 9.0),
    text("payerAddress", 40.0, 706.0, 9.0),
    city_state_zip("payerCityStateZip", PAYER_ADDRESS, 40.0, 694.0, 9.0),
    text("payerPhone", 40.0, 682.0, 9.0),
    text("payerTin", 40.0, 642.0, 10.0),
    text("recipientTin", 152.0, 642.0, 10.0),
    text("recipientName", 40.0, 612.0, 10.0),
    text("recipientAddress", 40.0, 576.0, 9.0),
    city_state_zip("recipientCityStateZip", RECIPIENT_ADDRESS, 40.0, 552.0, 9.0),
    text("accountNumber", 40.0, 516.0, 9.0),
    money("nonemployeeCompensation", 302.0, 638.0, 86.0, 10.0),
    check("directSales", 397.0, 614.0, 9.0),
    money("excessGoldenParachute", 302.0, 590.0, 86.0, 10.0),
    money("federalTaxWithheld", 302.0, 564.0, 86.0, 10.0),
    money("stateTaxWithheld", 302.0, 520.0, 70.0, 9.0),
    text("statePayerNumber", 387.0, 520.0, 9.0),
    money("stateIncome", 482.0, 520.0, 80.0, 9.0),
    check("secondTinNotice", 252.0, 516.0, 9.0),
];

pub(super) static NEC_2025: FieldSchema = FieldSchema {
    document_type: DocumentType::Form1099Nec,
    years: 2025..=2025,
    currency_decimals: 2,
    fields: &NEC_2025_FIELDS,
};

static MISC_2023_FIELDS: [FieldSpec; 27] = [
    text("payerName", 40.0, 716.0, 9.0),
    text("payerAddress", 40.0, 704.0, 9.0),
    city_state_zip("payerCityStateZip", PAYER_ADDRESS, 40.0, 692.0, 9.0),
    text("payerPhone", 40.0, 680.0, 9.0),
    text("payerTin", 40.0, 628.0, 10.0),
    text("recipientTin", 152.0, 628.0, 10.0),
    text("recipientName", 40.0, 598.0, 10.0),
    text("recipientAddress", 40.0, 562.0, 9.0),
    city_state_zip("recipientCityStateZip", RECIPIENT_ADDRESS, 40.0, 538.0, 9.0),
    text("accountNumber", 40.0, 502.0, 9.0),
    money("rents", 300.0, 712.0, 86.0, 10.0),
    money("royalties", 300.0, 688.0, 86.0, 10.0),
    money("otherIncome", 300.0, 664.0, 86.0, 10.0),
    money("federalTaxWithheld", 400.0, 664.0, 80.0, 10.0),
    money("fishingBoatProceeds", 300.0, 640.0, 86.0, 10.0),
    money("medicalPayments", 400.0, 640.0, 80.0, 10.0),
    check("directSales", 300.0, 616.0, 9.0),
    money("substitutePayments", 400.0, 616.0, 80.0, 10.0),
    money("cropInsurance", 300.0, 592.0, 86.0, 10.0),
    money("grossAttorneyProceeds", 400.0, 592.0, 80.0, 10.0),
    money("fishPurchased", 300.0, 568.0, 86.0, 10.0),
    money("section409aDeferrals", 400.0, 568.0, 80.0, 10.0),
    check("fatcaFiling", 300.0, 544.0, 9.0),
    money("excessGoldenParachute", 400.0, 544.0, 80.0, 10.0),
    money("nonqualifiedDeferredCompensation", 300.0, 520.0, 86.0, 10.0),
    money("stateTaxWithheld", 400.0, 496.0, 70.0, 9.0),
    money("stateIncome", 480.0, 496.0, 80.0, 9.0),
];

pub(super) static MISC_2023: FieldSchema = FieldSchema {
    document_type: DocumentType::Form1099Misc,
    years: 2023..=2023,
    currency_decimals: 2,
    fields: &MISC_2023_FIELDS,
};

static MISC_2024_FIELDS: [FieldSpec; 28] = [
    text("payerName", 40.0, 716.0, 9.0),
    text("payerAddress", 40.0, 704.0, 9.0),
    city_state_zip("payerCityStateZip", PAYER_ADDRESS, 40.0, 692.0, 9.0),
    text("payerPhone", 40.0, 680.0, 9.0),
    text("payerTin", 40.0, 630.0, 10.0),
    text("recipientTin", 152.0, 630.0, 10.0),
    text("recipientName", 40.0, 600.0, 10.0),
    text("recipientAddress", 40.0, 564.0, 9.0),
    city_state_zip("recipientCityStateZip", RECIPIENT_ADDRESS, 40.0, 540.0, 9.0),
    text("accountNumber", 40.0, 504.0, 9.0),
    money("rents", 300.0, 714.0, 86.0, 10.0),
    money("royalties", 300.0, 690.0, 86.0, 10.0),
    money("otherIncome", 300.0, 666.0, 86.0, 10.0),
    money("federalTaxWithheld", 400.0, 666.0, 80.0, 10.0),
    money("fishingBoatProceeds", 300.0, 642.0, 86.0, 10.0),
    money("medicalPayments", 400.0, 642.0, 80.0, 10.0),
    check("directSales", 300.0, 618.0, 9.0),
    money("substitutePayments", 400.0, 618.0, 80.0, 10.0),
    money("cropInsurance", 300.0, 594.0, 86.0, 10.0),
    money("grossAttorneyProceeds", 400.0, 594.0, 80.0, 10.0),
    money("fishPurchased", 300.0, 570.0, 86.0, 10.0),
    money("section409aDeferrals", 400.0, 570.0, 80.0, 10.0),
    check("fatcaFiling", 300.0, 546.0, 9.0),
    money("excessGoldenParachute", 400.0, 546.0, 80.0, 10.0),
    money("nonqualifiedDeferredCompensation", 300.0, 522.0, 86.0, 10.0),
    money("stateTaxWithheld", 400.0, 498.0, 70.0, 9.0),
    text("statePayerNumber", 300.0, 498.0, 9.0),
    money("stateIncome", 480.0, 498.0, 80.0, 9.0),
];

pub(super) static MISC_2024: FieldSchema = FieldSchema {
    document_type: DocumentType::Form1099Misc,
    years: 2024..=2024,
    currency_decimals: 2,
    fields: &MISC_2024_FIELDS,
};
