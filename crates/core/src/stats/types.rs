//! Report types produced by the aggregation engine.

use serde::{Deserialize, Serialize};

/// One histogram bucket or named band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
    /// Share of the report's eligible records, 0-100.
    pub percent: f64,
}

/// Headline counts over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicCounts {
    pub total: usize,
    pub available: usize,
    pub available_percent: f64,
    pub new_arrivals: usize,
    pub new_arrival_percent: f64,
}

/// Price summary over records with a positive price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    /// Records with a positive price.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Upper median: element `count / 2` of the ascending prices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub buckets: Vec<Bucket>,
}

/// Runtime summary over records with a known, non-zero runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeReport {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_minutes: Option<f64>,
    pub total_hours: f64,
    pub buckets: Vec<Bucket>,
}

/// List-valued or text field that can be counted by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    ContentType,
    Language,
    Author,
}

/// Occurrences of one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Share of all records carrying this label, 0-100.
    pub percent: f64,
}

/// Most frequent labels of a categorical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub field: CategoryField,
    /// Number of distinct labels seen.
    pub distinct: usize,
    /// Top labels by descending count; ties in first-seen order.
    pub entries: Vec<CategoryCount>,
}

/// Counts per (overlapping) age band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupReport {
    /// Records with a usable age range.
    pub with_age_range: usize,
    /// One entry per configured band. A record may count in several bands.
    pub bands: Vec<Bucket>,
}

/// Full statistics report. Sections not requested are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_types: Option<CategoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<CategoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<CategoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_groups: Option<AgeGroupReport>,
}
