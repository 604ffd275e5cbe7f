//! Static coordinate tables, one per template revision.
//!
//! Coordinates are PDF user-space points with the origin at the bottom-left
//! of the target page. Each table covers an explicit year range that lines up
//! with exactly one registry entry.

mod form1099;
mod paystub;
mod schedule_c;
mod w9;

use crate::document::DocumentType;
use crate::error::{FormError, Result};
use crate::format::rule_for;
use std::collections::HashSet;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    /// Text ends at `x + width`.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Text,
    Currency,
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TinKind {
    Ssn,
    Ein,
}

/// Where a field's value comes from in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Field(&'static str),
    CityStateZip {
        city: &'static str,
        state: &'static str,
        zip: &'static str,
    },
    /// One printed group of a split taxpayer id.
    Tin { kind: TinKind, group: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    pub align: Align,
    /// Box width; required for right-aligned fields.
    pub width: Option<f32>,
    pub role: FieldRole,
    pub source: ValueSource,
}

#[derive(Debug)]
pub struct FieldSchema {
    pub document_type: DocumentType,
    pub years: RangeInclusive<u16>,
    pub currency_decimals: u8,
    pub fields: &'static [FieldSpec],
}

impl FieldSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Static checks on the table itself: unique names, a formatter rule for
    /// every field, and a width on every right-aligned field.
    pub fn validate(&self) -> std::result::Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField(field.name));
            }
            if rule_for(field).is_none() {
                return Err(SchemaError::NoFormatRule(field.name));
            }
            if field.align == Align::Right && field.width.is_none_or(|w| w <= 0.0) {
                return Err(SchemaError::MissingWidth(field.name));
            }
            if field.font_size <= 0.0 || !field.x.is_finite() || !field.y.is_finite() {
                return Err(SchemaError::BadGeometry(field.name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field {0} appears twice")]
    DuplicateField(&'static str),
    #[error("field {0} has no formatter rule for its role and source")]
    NoFormatRule(&'static str),
    #[error("right-aligned field {0} has no box width")]
    MissingWidth(&'static str),
    #[error("field {0} has an unusable position or size")]
    BadGeometry(&'static str),
}

static SCHEMAS: &[&FieldSchema] = &[
    &w9::W9_2018,
    &w9::W9_2024,
    &form1099::NEC_2022,
    &form1099::NEC_2024,
    &form1099::NEC_2025,
    &form1099::MISC_2023,
    &form1099::MISC_2024,
    &schedule_c::SCHEDULE_C_2023,
    &schedule_c::SCHEDULE_C_2024,
    &paystub::PAYSTUB_CLASSIC,
];

pub fn schema_for(document_type: DocumentType, revision_year: u16) -> Result<&'static FieldSchema> {
    SCHEMAS
        .iter()
        .copied()
        .find(|s| s.document_type == document_type && s.years.contains(&revision_year))
        .ok_or(FormError::UnsupportedRevision {
            document_type,
            revision_year,
        })
}

pub fn all_schemas() -> &'static [&'static FieldSchema] {
    SCHEMAS
}

// Table helpers. Each takes the request key as the field name.

pub(crate) const fn text(name: &'static str, x: f32, y: f32, font_size: f32) -> FieldSpec {
    FieldSpec {
        name,
        x,
        y,
        font_size,
        bold: false,
        align: Align::Left,
        width: None,
        role: FieldRole::Text,
        source: ValueSource::Field(name),
    }
}

pub(crate) const fn bold_text(name: &'static str, x: f32, y: f32, font_size: f32) -> FieldSpec {
    let mut spec = text(name, x, y, font_size);
    spec.bold = true;
    spec
}

pub(crate) const fn money(
    name: &'static str,
    x: f32,
    y: f32,
    width: f32,
    font_size: f32,
) -> FieldSpec {
    FieldSpec {
        name,
        x,
        y,
        font_size,
        bold: false,
        align: Align::Right,
        width: Some(width),
        role: FieldRole::Currency,
        source: ValueSource::Field(name),
    }
}

pub(crate) const fn check(name: &'static str, x: f32, y: f32, font_size: f32) -> FieldSpec {
    FieldSpec {
        name,
        x,
        y,
        font_size,
        bold: true,
        align: Align::Left,
        width: None,
        role: FieldRole::Checkbox,
        source: ValueSource::Field(name),
    }
}

pub(crate) const fn city_state_zip(
    name: &'static str,
    keys: [&'static str; 3],
    x: f32,
    y: f32,
    font_size: f32,
) -> FieldSpec {
    FieldSpec {
        name,
        x,
        y,
        font_size,
        bold: false,
        align: Align::Left,
        width: None,
        role: FieldRole::Text,
        source: ValueSource::CityStateZip {
            city: keys[0],
            state: keys[1],
            zip: keys[2],
        },
    }
}

pub(crate) const fn tin(
    name: &'static str,
    kind: TinKind,
    group: u8,
    x: f32,
    y: f32,
    font_size: f32,
) -> FieldSpec {
    FieldSpec {
        name,
        x,
        y,
        font_size,
        bold: false,
        align: Align::Left,
        width: None,
        role: FieldRole::Text,
        source: ValueSource::Tin { kind, group },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn every_table_validates() {
        for schema in all_schemas() {
            schema
                .validate()
                .unwrap_or_else(|e| panic!("{} {:?}: {e}", schema.document_type, schema.years));
        }
    }

    #[test]
    fn schema_years_match_registry_exactly() {
        for (doc_type, year) in registry::supported_revisions() {
            schema_for(doc_type, year).unwrap_or_else(|e| panic!("{doc_type} {year}: {e}"));
        }
        for schema in all_schemas() {
            for year in schema.years.clone() {
                assert!(
                    registry::resolve(schema.document_type, year).is_ok(),
                    "schema {} {year} has no template",
                    schema.document_type
                );
            }
        }
    }

    #[test]
    fn schema_ranges_do_not_overlap() {
        for (i, a) in all_schemas().iter().enumerate() {
            for b in &all_schemas()[i + 1..] {
                if a.document_type != b.document_type {
                    continue;
                }
                let overlap = a.years.start() <= b.years.end() && b.years.start() <= a.years.end();
                assert!(!overlap, "{} {:?} vs {:?}", a.document_type, a.years, b.years);
            }
        }
    }

    #[test]
    fn decimals_follow_document_type() {
        for schema in all_schemas() {
            let expected = match schema.document_type {
                DocumentType::ScheduleC => 0,
                _ => 2,
            };
            assert_eq!(schema.currency_decimals, expected, "{}", schema.document_type);
        }
    }

    #[test]
    fn each_schedule_c_revision_owns_its_table() {
        let y2023 = schema_for(DocumentType::ScheduleC, 2023).expect("2023");
        let y2024 = schema_for(DocumentType::ScheduleC, 2024).expect("2024");
        assert!(!std::ptr::eq(y2023.fields, y2024.fields));
        let name = |s: &FieldSchema| s.field("proprietorName").expect("field").y;
        assert_eq!(name(y2023), 706.0);
        assert_eq!(name(y2024), 710.0);
        let profit = |s: &FieldSchema| s.field("netProfit").expect("field").y;
        assert_eq!(profit(y2023), 226.0);
        assert_eq!(profit(y2024), 230.0);
    }

    #[test]
    fn checkboxes_are_bold() {
        for schema in all_schemas() {
            for field in schema.fields.iter().filter(|f| f.role == FieldRole::Checkbox) {
                assert!(field.bold, "{}", field.name);
            }
        }
    }

    #[test]
    fn validation_catches_table_mistakes() {
        static DUP: [FieldSpec; 2] = [text("a", 1.0, 1.0, 9.0), text("a", 2.0, 2.0, 9.0)];
        let schema = FieldSchema {
            document_type: DocumentType::W9,
            years: 2000..=2000,
            currency_decimals: 2,
            fields: &DUP,
        };
        assert_eq!(schema.validate(), Err(SchemaError::DuplicateField("a")));

        static NO_WIDTH: [FieldSpec; 1] = [FieldSpec {
            width: None,
            ..money("box1", 1.0, 1.0, 10.0, 9.0)
        }];
        let schema = FieldSchema {
            fields: &NO_WIDTH,
            ..schema
        };
        assert_eq!(schema.validate(), Err(SchemaError::MissingWidth("box1")));

        static BAD_RULE: [FieldSpec; 1] = [FieldSpec {
            role: FieldRole::Checkbox,
            ..tin("ssn1", TinKind::Ssn, 0, 1.0, 1.0, 9.0)
        }];
        let schema = FieldSchema {
            fields: &BAD_RULE,
            ..schema
        };
        assert_eq!(schema.validate(), Err(SchemaError::NoFormatRule("ssn1")));
    }

    #[test]
    fn w9_carries_split_tin_groups() {
        let schema = schema_for(DocumentType::W9, 2024).expect("w9");
        let ssn_groups: Vec<u8> = schema
            .fields
            .iter()
            .filter_map(|f| match f.source {
                ValueSource::Tin {
                    kind: TinKind::Ssn,
                    group,
                } => Some(group),
                _ => None,
            })
            .collect();
        assert_eq!(ssn_groups, vec![0, 1, 2]);
        assert!(schema.field("ein2").is_some());
    }
}
