//! Stable multi-key sorting.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::QueryError;
use crate::catalog::CatalogRecord;

/// Field to order records by.
///
/// Numeric keys treat a missing value as zero. Text keys compare the raw
/// string (case-sensitive) with a missing value as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Author,
    Id,
    Flag,
    Blurb,
    Price,
    Runtime,
    /// Lower end of the age range.
    Age,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Id,
        SortKey::Flag,
        SortKey::Blurb,
        SortKey::Price,
        SortKey::Runtime,
        SortKey::Age,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Id => "id",
            SortKey::Flag => "flag",
            SortKey::Blurb => "blurb",
            SortKey::Price => "price",
            SortKey::Runtime => "runtime",
            SortKey::Age => "age",
        }
    }

    /// Compare two records by this key, ascending.
    pub fn compare(&self, a: &CatalogRecord, b: &CatalogRecord) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Author => a.author.cmp(&b.author),
            SortKey::Id => text_or_empty(&a.id).cmp(text_or_empty(&b.id)),
            SortKey::Flag => text_or_empty(&a.flag).cmp(text_or_empty(&b.flag)),
            SortKey::Blurb => a.blurb.cmp(&b.blurb),
            SortKey::Price => a.price.unwrap_or(0.0).total_cmp(&b.price.unwrap_or(0.0)),
            SortKey::Runtime => a.runtime.unwrap_or(0).cmp(&b.runtime.unwrap_or(0)),
            SortKey::Age => age_key(a).cmp(&age_key(b)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if matches!(name.as_str(), "age_range" | "agerange") {
            return Ok(SortKey::Age);
        }
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| QueryError::UnknownSortKey(s.to_string()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Return the records ordered by `key`.
///
/// The sort is stable in both directions: records with equal keys keep their
/// input order even when descending, because the comparator is inverted
/// rather than the output.
pub fn sort<'a, I>(records: I, key: SortKey, direction: SortDirection) -> Vec<&'a CatalogRecord>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let mut sorted: Vec<&CatalogRecord> = records.into_iter().collect();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| key.compare(a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| key.compare(b, a)),
    }
    sorted
}

fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn age_key(record: &CatalogRecord) -> i64 {
    record.age_range.map_or(0, |range| range.min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AgeRange;

    fn priced(title: &str, price: Option<f64>) -> CatalogRecord {
        let mut record = CatalogRecord::titled(title);
        record.price = price;
        record
    }

    fn titles(records: &[&CatalogRecord]) -> Vec<String> {
        records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_price_ascending_with_missing_as_zero() {
        let records = vec![
            priced("Ten", Some(10.0)),
            priced("None", None),
            priced("Five", Some(5.0)),
        ];
        let sorted = sort(&records, SortKey::Price, SortDirection::Ascending);
        assert_eq!(titles(&sorted), vec!["None", "Five", "Ten"]);
    }

    #[test]
    fn test_descending_keeps_tie_order() {
        let records = vec![
            priced("Cheap", Some(5.0)),
            priced("First Twenty", Some(20.0)),
            priced("Second Twenty", Some(20.0)),
        ];
        let sorted = sort(&records, SortKey::Price, SortDirection::Descending);
        assert_eq!(
            titles(&sorted),
            vec!["First Twenty", "Second Twenty", "Cheap"]
        );
    }

    #[test]
    fn test_age_sorts_by_lower_bound() {
        let mut a = CatalogRecord::titled("Teen");
        a.age_range = Some(AgeRange::new(12, 16));
        let mut b = CatalogRecord::titled("Toddler");
        b.age_range = Some(AgeRange::new(2, 4));
        let c = CatalogRecord::titled("Unknown age");
        let records = vec![a, b, c];

        let sorted = sort(&records, SortKey::Age, SortDirection::Ascending);
        assert_eq!(titles(&sorted), vec!["Unknown age", "Toddler", "Teen"]);
    }

    #[test]
    fn test_runtime_missing_as_zero() {
        let mut a = CatalogRecord::titled("Long");
        a.runtime = Some(7200);
        let b = CatalogRecord::titled("Missing");
        let records = vec![a, b];

        let sorted = sort(&records, SortKey::Runtime, SortDirection::Ascending);
        assert_eq!(titles(&sorted), vec!["Missing", "Long"]);
    }

    #[test]
    fn test_text_keys_are_case_sensitive() {
        let records = vec![
            CatalogRecord::titled("banana"),
            CatalogRecord::titled("Apple"),
            CatalogRecord::titled("cherry"),
        ];
        let sorted = sort(&records, SortKey::Title, SortDirection::Ascending);
        assert_eq!(titles(&sorted), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_missing_id_sorts_as_empty() {
        let mut a = CatalogRecord::titled("With id");
        a.id = Some("a1".into());
        let b = CatalogRecord::titled("No id");
        let records = vec![a, b];

        let sorted = sort(&records, SortKey::Id, SortDirection::Ascending);
        assert_eq!(titles(&sorted), vec!["No id", "With id"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let records = vec![priced("B", Some(2.0)), priced("A", Some(1.0))];
        let _ = sort(&records, SortKey::Price, SortDirection::Ascending);
        assert_eq!(records[0].title, "B");
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("Runtime".parse::<SortKey>().unwrap(), SortKey::Runtime);
        assert_eq!("ageRange".parse::<SortKey>().unwrap(), SortKey::Age);
        assert_eq!(
            "popularity".parse::<SortKey>().unwrap_err(),
            QueryError::UnknownSortKey("popularity".into())
        );
    }

    #[test]
    fn test_sort_key_display_round_trips() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }
}
