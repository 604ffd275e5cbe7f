use super::{FieldSchema, FieldSpec, bold_text, check, city_state_zip, money, text};
use crate::document::DocumentType;

static PAYSTUB_CLASSIC_FIELDS: [FieldSpec; 27] = [
    bold_text("companyName", 40.0, 740.0, 14.0),
    text("companyAddress", 40.0, 724.0, 9.0),
    city_state_zip(
        "companyCityStateZip",
        ["companyCity", "companyState", "companyZip"],
        40.0,
        712.0,
        9.0,
    ),
    bold_text("employeeName", 40.0, 660.0, 11.0),
    text("employeeAddress", 40.0, 646.0, 9.0),
    city_state_zip(
        "employeeCityStateZip",
        ["employeeCity", "employeeState", "employeeZip"],
        40.0,
        634.0,
        9.0,
    ),
    text("employeeId", 330.0, 660.0, 9.0),
    text("ssnLast4", 330.0, 646.0, 9.0),
    text("payPeriodStart", 460.0, 700.0, 9.0),
    text("payPeriodEnd", 460.0, 688.0, 9.0),
    text("payDate", 460.0, 676.0, 9.0),
    text("checkNumber", 460.0, 740.0, 9.0),
    text("hours", 160.0, 560.0, 9.0),
    money("payRate", 40.0, 560.0, 80.0, 9.0),
    money("grossPay", 220.0, 560.0, 90.0, 9.0),
    money("ytdGross", 480.0, 560.0, 90.0, 9.0),
    money("federalTax", 220.0, 500.0, 90.0, 9.0),
    money("stateTax", 220.0, 488.0, 90.0, 9.0),
    money("socialSecurity", 220.0, 476.0, 90.0, 9.0),
    money("medicare", 220.0, 464.0, 90.0, 9.0),
    money("otherDeductions", 220.0, 452.0, 90.0, 9.0),
    money("totalDeductions", 220.0, 436.0, 90.0, 9.0),
    money("ytdDeductions", 480.0, 436.0, 90.0, 9.0),
    money("netPay", 220.0, 400.0, 90.0, 11.0),
    money("ytdNet", 480.0, 400.0, 90.0, 9.0),
    check("directDeposit", 40.0, 370.0, 9.0),
    text("memo", 60.0, 370.0, 9.0),
];

pub(super) static PAYSTUB_CLASSIC: FieldSchema = FieldSchema {
    document_type: DocumentType::PayStub,
    years: 2024..=2026,
    currency_decimals: 2,
    fields: &PAYSTUB_CLASSIC_FIELDS,
};
