use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "pay-stub", alias = "paystub")]
    PayStub,
    #[serde(rename = "w9", alias = "w-9")]
    W9,
    #[serde(rename = "1099-nec", alias = "1099nec")]
    Form1099Nec,
    #[serde(rename = "1099-misc", alias = "1099misc")]
    Form1099Misc,
    #[serde(rename = "schedule-c", alias = "schedulec")]
    ScheduleC,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::PayStub,
        DocumentType::W9,
        DocumentType::Form1099Nec,
        DocumentType::Form1099Misc,
        DocumentType::ScheduleC,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::PayStub => "pay-stub",
            DocumentType::W9 => "w9",
            DocumentType::Form1099Nec => "1099-nec",
            DocumentType::Form1099Misc => "1099-misc",
            DocumentType::ScheduleC => "schedule-c",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pay-stub" | "paystub" => Ok(DocumentType::PayStub),
            "w9" | "w-9" => Ok(DocumentType::W9),
            "1099-nec" | "1099nec" => Ok(DocumentType::Form1099Nec),
            "1099-misc" | "1099misc" => Ok(DocumentType::Form1099Misc),
            "schedule-c" | "schedulec" => Ok(DocumentType::ScheduleC),
            other => Err(format!("unknown document type: {other}")),
        }
    }
}

/// Form data for one render. The engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub document_type: DocumentType,
    pub revision_year: u16,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl DocumentRequest {
    pub fn new(document_type: DocumentType, revision_year: u16) -> Self {
        Self {
            document_type,
            revision_year,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
