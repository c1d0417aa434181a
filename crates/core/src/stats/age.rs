//! Age-group bands.
//!
//! Bands deliberately overlap: a record suitable for ages 3-7 counts in every
//! band its range touches, so band totals can exceed the number of records.

use serde::{Deserialize, Serialize};

use super::reports::percent;
use super::types::{AgeGroupReport, Bucket};
use crate::catalog::CatalogRecord;

/// A named age band. `None` bounds are open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl AgeBand {
    pub fn new(label: impl Into<String>, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    /// Whether `record` has an age range touching this band.
    pub fn contains(&self, record: &CatalogRecord) -> bool {
        record
            .age_range
            .is_some_and(|range| range.intersects(self.min, self.max))
    }
}

/// The stock band set.
pub fn default_age_bands() -> Vec<AgeBand> {
    vec![
        AgeBand::new("Babies (0-2)", None, Some(2)),
        AgeBand::new("Toddlers (2-4)", Some(2), Some(4)),
        AgeBand::new("Preschool (3-5)", Some(3), Some(5)),
        AgeBand::new("Early Elementary (5-8)", Some(5), Some(8)),
        AgeBand::new("Middle Elementary (8-11)", Some(8), Some(11)),
        AgeBand::new("Pre-teen+ (11+)", Some(11), None),
    ]
}

/// Count records per band. Records without an age range are skipped.
pub fn age_group_report(records: &[CatalogRecord], bands: &[AgeBand]) -> AgeGroupReport {
    let with_age_range = records.iter().filter(|r| r.age_range.is_some()).count();

    let bands = bands
        .iter()
        .map(|band| {
            let count = records.iter().filter(|r| band.contains(r)).count();
            Bucket {
                label: band.label.clone(),
                count,
                percent: percent(count, with_age_range),
            }
        })
        .collect();

    AgeGroupReport {
        with_age_range,
        bands,
    }
}
