//! # Attribute Grammar
//!
//! Free-text operator input applied to the current target.
//!
//! | Input | Log | Values |
//! |-------|-----|--------|
//! | `30x20x10` | `siz` | `["30", "20", "10"]` |
//! | `2.5 kg`, `300g` | `mas` | `["2.5", "kg"]` |
//! | `x3` | `mult` | `["3"]` |
//! | `pass`, `fail` | `actn` | `["condition", "pass"]` |
//! | `check: …` (`cause:`, `result:`, `note:`) | `actn` | `["check", "…"]` |
//! | anything else | `desc` | `[input]` |
//!
//! Input matching none of the structured forms is kept verbatim as a
//! description rather than rejected.

use rt_02_entity_store::EventField;

/// Audit action keywords accepted as `keyword: text`.
pub const ACTION_KEYWORDS: [&str; 4] = ["check", "cause", "result", "note"];

/// Mass units, longest first.
const MASS_UNITS: [&str; 2] = ["kg", "g"];

/// A parsed attribute update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub field: EventField,
    pub values: Vec<String>,
}

impl Attribute {
    fn new(field: EventField, values: Vec<String>) -> Self {
        Self { field, values }
    }

    /// Parse operator input. Blank input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let parsed = parse_multiplier(text)
            .or_else(|| parse_dimensions(text))
            .or_else(|| parse_mass(text))
            .or_else(|| parse_condition(text))
            .or_else(|| parse_action(text))
            .unwrap_or_else(|| Attribute::new(EventField::Desc, vec![text.to_string()]));
        Some(parsed)
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty()
        && s.parse::<f64>()
            .map(|v| v.is_finite() && v > 0.0)
            .unwrap_or(false)
}

fn parse_multiplier(text: &str) -> Option<Attribute> {
    let digits = text.strip_prefix(['x', 'X'])?;
    let n: u32 = digits.parse().ok().filter(|n| *n > 0)?;
    Some(Attribute::new(EventField::Mult, vec![n.to_string()]))
}

fn parse_dimensions(text: &str) -> Option<Attribute> {
    let parts: Vec<&str> = text.split(['x', 'X']).map(str::trim).collect();
    if parts.len() != 3 || !parts.iter().all(|p| is_number(p)) {
        return None;
    }
    Some(Attribute::new(
        EventField::Siz,
        parts.into_iter().map(String::from).collect(),
    ))
}

fn parse_mass(text: &str) -> Option<Attribute> {
    let lower = text.to_ascii_lowercase();
    MASS_UNITS.iter().find_map(|unit| {
        let amount = lower.strip_suffix(unit)?.trim_end();
        is_number(amount)
            .then(|| Attribute::new(EventField::Mas, vec![amount.to_string(), unit.to_string()]))
    })
}

fn parse_condition(text: &str) -> Option<Attribute> {
    let condition = text.to_ascii_lowercase();
    matches!(condition.as_str(), "pass" | "fail")
        .then(|| Attribute::new(EventField::Actn, vec!["condition".to_string(), condition]))
}

fn parse_action(text: &str) -> Option<Attribute> {
    let (keyword, rest) = text.split_once(':')?;
    let keyword = keyword.trim().to_ascii_lowercase();
    if !ACTION_KEYWORDS.contains(&keyword.as_str()) {
        return None;
    }
    Some(Attribute::new(
        EventField::Actn,
        vec![keyword, rest.trim().to_string()],
    ))
}
