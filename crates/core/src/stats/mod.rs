//! Catalog statistics.
//!
//! [`aggregate`] builds a [`CatalogReport`] from any subset of the available
//! sections. Every report is computed independently from the same borrowed
//! records; nothing is reordered or mutated. Records missing a field a report
//! needs are left out of that report only.

mod age;
mod groups;
mod reports;
mod types;

pub use age::{age_group_report, default_age_bands, AgeBand};
pub use groups::{
    facets, group_by_content_type, group_by_starting_age, AgeBracket, Facets, UNCATEGORIZED,
};
pub use reports::{
    basic_counts, category_report, price_report, runtime_report, PRICE_BOUNDS, RUNTIME_BOUNDS,
};
pub use types::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogRecord;
use crate::query::QueryError;

/// Default number of labels kept in categorical reports.
pub const DEFAULT_TOP_N: usize = 15;

/// A report section that can be requested from [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Basic,
    Price,
    ContentTypes,
    Languages,
    Authors,
    Runtime,
    AgeGroups,
}

impl ReportSection {
    pub const ALL: [ReportSection; 7] = [
        ReportSection::Basic,
        ReportSection::Price,
        ReportSection::ContentTypes,
        ReportSection::Languages,
        ReportSection::Authors,
        ReportSection::Runtime,
        ReportSection::AgeGroups,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSection::Basic => "basic",
            ReportSection::Price => "price",
            ReportSection::ContentTypes => "content_types",
            ReportSection::Languages => "languages",
            ReportSection::Authors => "authors",
            ReportSection::Runtime => "runtime",
            ReportSection::AgeGroups => "age_groups",
        }
    }

    /// Parse a comma-separated section list, e.g. `"price,runtime"`.
    pub fn parse_list(list: &str) -> Result<Vec<ReportSection>, QueryError> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ReportSection::from_str)
            .collect()
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportSection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ReportSection::ALL
            .into_iter()
            .find(|section| section.as_str() == name)
            .ok_or_else(|| QueryError::UnknownSection(s.to_string()))
    }
}

/// What [`aggregate`] should compute.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOptions {
    pub sections: Vec<ReportSection>,
    /// Labels kept per categorical report.
    pub top_n: usize,
    pub age_bands: Vec<AgeBand>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            sections: ReportSection::ALL.to_vec(),
            top_n: DEFAULT_TOP_N,
            age_bands: default_age_bands(),
        }
    }
}

impl AggregateOptions {
    pub fn with_sections(mut self, sections: impl Into<Vec<ReportSection>>) -> Self {
        self.sections = sections.into();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_age_bands(mut self, bands: Vec<AgeBand>) -> Self {
        self.age_bands = bands;
        self
    }

    fn wants(&self, section: ReportSection) -> bool {
        self.sections.contains(&section)
    }
}

/// Compute the requested report sections over `records`.
pub fn aggregate(records: &[CatalogRecord], options: &AggregateOptions) -> CatalogReport {
    debug!(
        records = records.len(),
        sections = options.sections.len(),
        "Aggregating catalog"
    );

    let category = |section, field| {
        options
            .wants(section)
            .then(|| category_report(records, field, options.top_n))
    };

    CatalogReport {
        basic: options
            .wants(ReportSection::Basic)
            .then(|| basic_counts(records)),
        price: options
            .wants(ReportSection::Price)
            .then(|| price_report(records)),
        content_types: category(ReportSection::ContentTypes, CategoryField::ContentType),
        languages: category(ReportSection::Languages, CategoryField::Language),
        authors: category(ReportSection::Authors, CategoryField::Author),
        runtime: options
            .wants(ReportSection::Runtime)
            .then(|| runtime_report(records)),
        age_groups: options
            .wants(ReportSection::AgeGroups)
            .then(|| age_group_report(records, &options.age_bands)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_compute_everything() {
        let report = aggregate(&[CatalogRecord::titled("A")], &AggregateOptions::default());
        assert!(report.basic.is_some());
        assert!(report.price.is_some());
        assert!(report.content_types.is_some());
        assert!(report.languages.is_some());
        assert!(report.authors.is_some());
        assert!(report.runtime.is_some());
        assert!(report.age_groups.is_some());
    }

    #[test]
    fn test_selected_sections_only() {
        let options = AggregateOptions::default()
            .with_sections([ReportSection::Price, ReportSection::AgeGroups]);
        let report = aggregate(&[], &options);

        assert!(report.basic.is_none());
        assert!(report.price.is_some());
        assert!(report.age_groups.is_some());
        assert!(report.runtime.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("basic").is_none());
        assert!(json.get("price").is_some());
    }

    #[test]
    fn test_parse_section_list() {
        let sections = ReportSection::parse_list("price, runtime,,age_groups").unwrap();
        assert_eq!(
            sections,
            vec![
                ReportSection::Price,
                ReportSection::Runtime,
                ReportSection::AgeGroups
            ]
        );

        let err = ReportSection::parse_list("price,popularity").unwrap_err();
        assert_eq!(err, QueryError::UnknownSection("popularity".into()));
    }

    #[test]
    fn test_top_n_is_applied() {
        let mut record = CatalogRecord::titled("A");
        record.content_type = (0..20).map(|i| format!("Type {}", i)).collect();
        let options = AggregateOptions::default()
            .with_sections([ReportSection::ContentTypes])
            .with_top_n(5);

        let report = aggregate(&[record], &options);
        let content_types = report.content_types.unwrap();
        assert_eq!(content_types.entries.len(), 5);
        assert_eq!(content_types.distinct, 20);
    }
}
