//! Grouping and facet listings.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::CatalogRecord;

/// Group label for records with no content type.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Records grouped under each of their content type labels.
///
/// A record with several labels appears in several groups. Groups are keyed
/// in label order; within a group, records keep their input order.
pub fn group_by_content_type(records: &[CatalogRecord]) -> BTreeMap<String, Vec<&CatalogRecord>> {
    let mut groups: BTreeMap<String, Vec<&CatalogRecord>> = BTreeMap::new();
    for record in records {
        if record.content_type.is_empty() {
            groups.entry(UNCATEGORIZED.to_string()).or_default().push(record);
            continue;
        }
        for label in &record.content_type {
            groups.entry(label.clone()).or_default().push(record);
        }
    }
    groups
}

/// One bracket of the starting-age partition.
#[derive(Debug, Clone, Serialize)]
pub struct AgeBracket<'a> {
    pub label: &'static str,
    pub records: Vec<&'a CatalogRecord>,
}

const AGE_BRACKETS: [(&str, i64); 5] = [
    ("0-3", 3),
    ("3-6", 6),
    ("6-9", 9),
    ("9-12", 12),
    ("12+", i64::MAX),
];

/// Partition records by the lower end of their age range.
///
/// Unlike the age-group report this is a true partition: each record with an
/// age range lands in exactly one bracket. Records without one are omitted.
pub fn group_by_starting_age(records: &[CatalogRecord]) -> Vec<AgeBracket<'_>> {
    let mut brackets: Vec<AgeBracket> = AGE_BRACKETS
        .iter()
        .map(|(label, _)| AgeBracket {
            label: *label,
            records: Vec::new(),
        })
        .collect();

    for record in records {
        let Some(range) = record.age_range else {
            continue;
        };
        let slot = AGE_BRACKETS
            .iter()
            .position(|(_, below)| range.min < *below)
            .unwrap_or(AGE_BRACKETS.len() - 1);
        brackets[slot].records.push(record);
    }
    brackets
}

/// Distinct values available for filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub content_types: Vec<String>,
    pub authors: Vec<String>,
    pub languages: Vec<String>,
}

/// Sorted distinct content types, known authors and languages.
pub fn facets(records: &[CatalogRecord]) -> Facets {
    let mut content_types = BTreeSet::new();
    let mut authors = BTreeSet::new();
    let mut languages = BTreeSet::new();

    for record in records {
        content_types.extend(record.content_type.iter().cloned());
        languages.extend(record.languages.iter().cloned());
        if record.has_known_author() {
            authors.insert(record.author.clone());
        }
    }

    Facets {
        content_types: content_types.into_iter().collect(),
        authors: authors.into_iter().collect(),
        languages: languages.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AgeRange;

    fn typed(title: &str, types: &[&str]) -> CatalogRecord {
        let mut record = CatalogRecord::titled(title);
        record.content_type = types.iter().map(|t| t.to_string()).collect();
        record
    }

    fn aged(title: &str, min: i64) -> CatalogRecord {
        let mut record = CatalogRecord::titled(title);
        record.age_range = Some(AgeRange::new(min, min + 3));
        record
    }

    #[test]
    fn test_group_by_content_type() {
        let records = vec![
            typed("A", &["Stories", "Music"]),
            typed("B", &[]),
            typed("C", &["Music"]),
        ];
        let groups = group_by_content_type(&records);

        let keys: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Music", "Stories", UNCATEGORIZED]);
        let music: Vec<_> = groups["Music"].iter().map(|r| r.title.as_str()).collect();
        assert_eq!(music, vec!["A", "C"]);
        assert_eq!(groups[UNCATEGORIZED].len(), 1);
    }

    #[test]
    fn test_group_by_starting_age_is_partition() {
        let records = vec![
            aged("Baby", 0),
            aged("Three", 3),
            aged("Eight", 8),
            aged("Eleven", 11),
            aged("Teen", 13),
            CatalogRecord::titled("Ageless"),
        ];
        let brackets = group_by_starting_age(&records);

        let sizes: Vec<_> = brackets.iter().map(|b| b.records.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 1, 1]);
        assert_eq!(brackets[2].label, "6-9");
        assert_eq!(brackets[2].records[0].title, "Eight");
        assert_eq!(brackets[4].records[0].title, "Teen");
    }

    #[test]
    fn test_facets_are_sorted_and_distinct() {
        let mut a = typed("A", &["Stories", "Music"]);
        a.author = "Roald Dahl".into();
        a.languages = vec!["en".into()];
        let mut b = typed("B", &["Music"]);
        b.author = "Enid Blyton".into();
        b.languages = vec!["en".into(), "cy".into()];
        let c = typed("C", &[]);

        let facets = facets(&[a, b, c]);
        assert_eq!(facets.content_types, vec!["Music", "Stories"]);
        assert_eq!(facets.authors, vec!["Enid Blyton", "Roald Dahl"]);
        assert_eq!(facets.languages, vec!["cy", "en"]);
    }
}
