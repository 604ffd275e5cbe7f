use super::{FieldSchema, FieldSpec, check, city_state_zip, money, text};
use crate::document::DocumentType;

const BUSINESS_ADDRESS: [&str; 3] = ["city", "state", "zip"];

// 2023 revision.
static SCHEDULE_C_2023_FIELDS: [FieldSpec; 47] = [
    text("proprietorName", 36.0, 706.0, 9.0),
    text("ssn", 470.0, 706.0, 9.0),
    text("principalBusiness", 50.0, 682.0, 9.0),
    text("businessCode", 470.0, 682.0, 9.0),
    text("businessName", 50.0, 658.0, 9.0),
    text("ein", 470.0, 658.0, 9.0),
    text("businessAddress", 150.0, 646.0, 9.0),
    city_state_zip("cityStateZip", BUSINESS_ADDRESS, 150.0, 634.0, 9.0),
    check("accountingCash", 138.0, 622.0, 8.0),
    check("accountingAccrual", 188.0, 622.0, 8.0),
    check("accountingOther", 246.0, 622.0, 8.0),
    check("materiallyParticipatedYes", 522.0, 610.0, 8.0),
    check("materiallyParticipatedNo", 554.0, 610.0, 8.0),
    money("grossReceipts", 490.0, 550.0, 78.0, 9.0),
    money("returnsAllowances", 490.0, 538.0, 78.0, 9.0),
    money("line3", 490.0, 526.0, 78.0, 9.0),
    money("costOfGoodsSold", 490.0, 514.0, 78.0, 9.0),
    money("grossProfit", 490.0, 502.0, 78.0, 9.0),
    money("otherIncome", 490.0, 490.0, 78.0, 9.0),
    money("grossIncome", 490.0, 478.0, 78.0, 9.0),
    money("advertising", 206.0, 454.0, 72.0, 9.0),
    money("carTruckExpenses", 206.0, 442.0, 72.0, 9.0),
    money("commissionsFees", 206.0, 430.0, 72.0, 9.0),
    money("contractLabor", 206.0, 418.0, 72.0, 9.0),
    money("depletion", 206.0, 406.0, 72.0, 9.0),
    money("depreciation", 206.0, 394.0, 72.0, 9.0),
    money("employeeBenefits", 206.0, 370.0, 72.0, 9.0),
    money("insurance", 206.0, 358.0, 72.0, 9.0),
    money("mortgageInterest", 206.0, 346.0, 72.0, 9.0),
    money("otherInterest", 206.0, 334.0, 72.0, 9.0),
    money("legalProfessional", 206.0, 322.0, 72.0, 9.0),
    money("officeExpense", 490.0, 454.0, 78.0, 9.0),
    money("pensionPlans", 490.0, 442.0, 78.0, 9.0),
    money("rentVehicles", 490.0, 430.0, 78.0, 9.0),
    money("rentOther", 490.0, 418.0, 78.0, 9.0),
    money("repairs", 490.0, 406.0, 78.0, 9.0),
    money("supplies", 490.0, 394.0, 78.0, 9.0),
    money("taxesLicenses", 490.0, 382.0, 78.0, 9.0),
    money("travel", 490.0, 370.0, 78.0, 9.0),
    money("meals", 490.0, 358.0, 78.0, 9.0),
    money("utilities", 490.0, 346.0, 78.0, 9.0),
    money("wages", 490.0, 334.0, 78.0, 9.0),
    money("otherExpenses", 490.0, 310.0, 78.0, 9.0),
    money("totalExpenses", 490.0, 298.0, 78.0, 9.0),
    money("tentativeProfit", 490.0, 286.0, 78.0, 9.0),
    money("homeOffice", 490.0, 250.0, 78.0, 9.0),
    money("netProfit", 490.0, 226.0, 78.0, 9.0),
];

// 2024 revision: the header block sits 4pt higher.
static SCHEDULE_C_2024_FIELDS: [FieldSpec; 47] = [
    text("proprietorName", 36.0, 710.0, 9.0),
    text("ssn", 470.0, 710.0, 9.0),
    text("principalBusiness", 50.0, 686.0, 9.0),
    text("businessCode", 470.0, 686.0, 9.0),
    text("businessName", 50.0, 662.0, 9.0),
    text("ein", 470.0, 662.0, 9.0),
    text("businessAddress", 150.0, 650.0, 9.0),
    city_state_zip("cityStateZip", BUSINESS_ADDRESS, 150.0, 638.0, 9.0),
    check("accountingCash", 138.0, 626.0, 8.0),
    check("accountingAccrual", 188.0, 626.0, 8.0),
    check("accountingOther", 246.0, 626.0, 8.0),
    check("materiallyParticipatedYes", 522.0, 614.0, 8.0),
    check("materiallyParticipatedNo", 554.0, 614.0, 8.0),
    money("grossReceipts", 490.0, 554.0, 78.0, 9.0),
    money("returnsAllowances", 490.0, 542.0, 78.0, 9.0),
    money("line3", 490.0, 530.0, 78.0, 9.0),
    money("costOfGoodsSold", 490.0, 518.0, 78.0, 9.0),
    money("grossProfit", 490.0, 506.0, 78.0, 9.0),
    money("otherIncome", 490.0, 494.0, 78.0, 9.0),
    money("grossIncome", 490.0, 482.0, 78.0, 9.0),
    money("advertising", 206.0, 458.0, 72.0, 9.0),
    money("carTruckExpenses", 206.0, 446.0, 72.0, 9.0),
    money("commissionsFees", 206.0, 434.0, 72.0, 9.0),
    money("contractLabor", 206.0, 422.0, 72.0, 9.0),
    money("depletion", 206.0, 410.0, 72.0, 9.0),
    money("depreciation", 206.0, 398.0, 72.0, 9.0),
    money("employeeBenefits", 206.0, 374.0, 72.0, 9.0),
    money("insurance", 206.0, 362.0, 72.0, 9.0),
    money("mortgageInterest", 206.0, 350.0, 72.0, 9.0),
    money("otherInterest", 206.0, 338.0, 72.0, 9.0),
    money("legalProfessional", 206.0, 326.0, 72.0, 9.0),
    money("officeExpense", 490.0, 458.0, 78.0, 9.0),
    money("pensionPlans", 490.0, 446.0, 78.0, 9.0),
    money("rentVehicles", 490.0, 434.0, 78.0, 9.0),
    money("rentOther", 490.0, 422.0, 78.0, 9.0),
    money("repairs", 490.0, 410.0, 78.0, 9.0),
    money("supplies", 490.0, 398.0, 78.0, 9.0),
    money("taxesLicenses", 490.0, 386.0, 78.0, 9.0),
    money("travel", 490.0, 374.0, 78.0, 9.0),
    money("meals", 490.0, 362.0, 78.0, 9.0),
    money("utilities", 490.0, 350.0, 78.0, 9.0),
    money("wages", 490.0, 338.0, 78.0, 9.0),
    money("otherExpenses", 490.0, 314.0, 78.0, 9.0),
    money("totalExpenses", 490.0, 302.0, 78.0, 9.0),
    money("tentativeProfit", 490.0, 290.0, 78.0, 9.0),
    money("homeOffice", 490.0, 254.0, 78.0, 9.0),
    money("netProfit", 490.0, 230.0, 78.0, 9.0),
];

pub(super) static SCHEDULE_C_2023: FieldSchema = FieldSchema {
    document_type: DocumentType::ScheduleC,
    years: 2023..=2023,
    currency_decimals: 0,
    fields: &SCHEDULE_C_2023_FIELDS,
};

pub(super) static SCHEDULE_C_2024: FieldSchema = FieldSchema {
    document_type: DocumentType::ScheduleC,
    years: 2024..=2024,
    currency_decimals: 0,
    fields: &SCHEDULE_C_2024_FIELDS,
};
