//! Typed decoding of the store's property values.
//!
//! On the wire every property is `{ "type": "...", "<type>": <shape> }` with
//! a different shape per type. [`LedgerField`] is the tagged union over the
//! types the ledger actually uses; the accessors below default instead of
//! erroring so a missing sub-field can never abort a batch.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// One property value of a ledger page.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerField {
    Title { title: Vec<RichTextSpan> },
    Number { number: Option<f64> },
    Select { select: Option<SelectValue> },
    Formula { formula: FormulaValue },
    Checkbox { checkbox: bool },
    RichText { rich_text: Vec<RichTextSpan> },
}

/// Result of a formula property, itself discriminated by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Date { date: Option<DateValue> },
    Boolean { boolean: Option<bool> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectValue {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichTextSpan {
    #[serde(default)]
    pub plain_text: Option<String>,
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    pub start: String,
}

fn span_text(spans: &[RichTextSpan]) -> Option<&str> {
    let first = spans.first()?;
    first
        .text
        .as_ref()
        .map(|t| t.content.as_str())
        .or(first.plain_text.as_deref())
}

impl LedgerField {
    /// Decode from a raw property value; `None` when the property has a type
    /// the ledger does not use.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Text content: first title/rich-text span, select name, or formula
    /// string. `None` for empty titles and unselected selects.
    pub fn text(&self) -> Option<&str> {
        match self {
            LedgerField::Title { title } => span_text(title),
            LedgerField::RichText { rich_text } => span_text(rich_text),
            LedgerField::Select { select } => select.as_ref().map(|s| s.name.as_str()),
            LedgerField::Formula {
                formula: FormulaValue::String { string },
            } => string.as_deref(),
            _ => None,
        }
    }

    /// Numeric content of a number property or a number formula.
    pub fn number(&self) -> Option<f64> {
        match self {
            LedgerField::Number { number } => *number,
            LedgerField::Formula {
                formula: FormulaValue::Number { number },
            } => *number,
            _ => None,
        }
    }

    /// Checkbox state; missing or non-boolean reads as unchecked.
    pub fn checkbox(&self) -> bool {
        match self {
            LedgerField::Checkbox { checkbox } => *checkbox,
            LedgerField::Formula {
                formula: FormulaValue::Boolean { boolean },
            } => boolean.unwrap_or(false),
            _ => false,
        }
    }

    /// Calendar date of a date formula. Timestamps are truncated to the day.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            LedgerField::Formula {
                formula: FormulaValue::Date { date },
            } => {
                let start = &date.as_ref()?.start;
                NaiveDate::parse_from_str(start.get(..10)?, "%Y-%m-%d").ok()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(v: Value) -> LedgerField {
        LedgerField::from_value(&v).expect("should decode")
    }

    #[test]
    fn test_decode_title() {
        let f = field(json!({
            "id": "abc",
            "type": "title",
            "title": [{"type": "text", "text": {"content": "家賃", "link": null}, "plain_text": "家賃"}]
        }));
        assert_eq!(f.text(), Some("家賃"));
    }

    #[test]
    fn test_empty_title_is_none() {
        let f = field(json!({"type": "title", "title": []}));
        assert_eq!(f.text(), None);
    }

    #[test]
    fn test_decode_select_and_null_select() {
        let f = field(json!({"type": "select", "select": {"id": "x", "name": "食費", "color": "red"}}));
        assert_eq!(f.text(), Some("食費"));

        let f = field(json!({"type": "select", "select": null}));
        assert_eq!(f.text(), None);
    }

    #[test]
    fn test_decode_formula_variants() {
        let n = field(json!({"type": "formula", "formula": {"type": "number", "number": -1200.0}}));
        assert_eq!(n.number(), Some(-1200.0));

        let s = field(json!({"type": "formula", "formula": {"type": "string", "string": "未実行"}}));
        assert_eq!(s.text(), Some("未実行"));

        let d = field(json!({"type": "formula", "formula": {"type": "date", "date": {"start": "2026-07-15", "end": null}}}));
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2026, 7, 15));

        // Timestamped starts truncate to the day.
        let d = field(json!({"type": "formula", "formula": {"type": "date", "date": {"start": "2026-07-15T00:00:00.000+09:00"}}}));
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2026, 7, 15));

        let null_date = field(json!({"type": "formula", "formula": {"type": "date", "date": null}}));
        assert_eq!(null_date.date(), None);
    }

    #[test]
    fn test_decode_checkbox() {
        let f = field(json!({"type": "checkbox", "checkbox": true}));
        assert!(f.checkbox());
        let f = field(json!({"type": "number", "number": 5.0}));
        assert!(!f.checkbox());
    }

    #[test]
    fn test_unused_property_type_decodes_to_none() {
        assert!(LedgerField::from_value(&json!({
            "type": "multi_select",
            "multi_select": []
        }))
        .is_none());
    }
}
