//! Catalog record model.
//!
//! Products arrive as loosely-typed JSON. Every field is read through a
//! tolerant coercion layer: values that are missing, `null`, or cannot be
//! coerced to the expected type all end up as "absent" rather than failing
//! the whole document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flag value marking a new arrival in the catalog.
pub const NEW_ARRIVAL_FLAG: &str = "New to Yoto";

/// Placeholder used for a missing title or author.
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Suitability range in years, as `[min, max]`.
///
/// `min <= max` is not guaranteed by the source and is tolerated as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[i64; 2]")]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether this range shares at least one age with `[lo, hi]`.
    ///
    /// Unbounded ends are `None`.
    pub fn intersects(&self, lo: Option<i64>, hi: Option<i64>) -> bool {
        hi.map_or(true, |hi| self.min <= hi) && lo.map_or(true, |lo| self.max >= lo)
    }
}

impl From<AgeRange> for [i64; 2] {
    fn from(range: AgeRange) -> Self {
        [range.min, range.max]
    }
}

/// One product entry from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProduct")]
pub struct CatalogRecord {
    /// Opaque product identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    /// Price in catalog currency units. `None` means unknown, not free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,
    /// Runtime in seconds. Zero is stored as given but treated as unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u64>,
    pub content_type: Vec<String>,
    pub languages: Vec<String>,
    pub available_for_sale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    pub blurb: String,
}

impl CatalogRecord {
    /// Create a record with only a title set; everything else absent.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: UNKNOWN_TEXT.to_string(),
            price: None,
            age_range: None,
            runtime: None,
            content_type: Vec::new(),
            languages: Vec::new(),
            available_for_sale: false,
            flag: None,
            blurb: String::new(),
        }
    }

    /// Runtime in seconds, with zero treated as unknown.
    pub fn known_runtime(&self) -> Option<u64> {
        self.runtime.filter(|secs| *secs > 0)
    }

    /// Whether the record carries the new-arrival flag (exact match).
    pub fn is_new_arrival(&self) -> bool {
        self.flag.as_deref() == Some(NEW_ARRIVAL_FLAG)
    }

    /// Whether the author is a real name rather than empty or the placeholder.
    pub fn has_known_author(&self) -> bool {
        !self.author.is_empty() && self.author != UNKNOWN_TEXT
    }
}

/// Wire shape of a product before coercion.
///
/// Every field is captured as a raw JSON value so type mismatches never fail
/// deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProduct {
    id: Value,
    title: Value,
    author: Value,
    price: Value,
    age_range: Value,
    runtime: Value,
    content_type: Value,
    languages: Value,
    available_for_sale: Value,
    flag: Value,
    blurb: Value,
}

impl From<RawProduct> for CatalogRecord {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: coerce_text(&raw.id),
            title: coerce_text(&raw.title).unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            author: coerce_text(&raw.author).unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            price: coerce_f64(&raw.price),
            age_range: coerce_age_range(&raw.age_range),
            runtime: coerce_u64(&raw.runtime),
            content_type: coerce_labels(&raw.content_type),
            languages: coerce_labels(&raw.languages),
            available_for_sale: raw.available_for_sale.as_bool().unwrap_or(false),
            flag: coerce_text(&raw.flag),
            blurb: coerce_text(&raw.blurb).unwrap_or_default(),
        }
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v.round() as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn coerce_age_range(value: &Value) -> Option<AgeRange> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    Some(AgeRange::new(coerce_i64(&items[0])?, coerce_i64(&items[1])?))
}

fn coerce_labels(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
