//! Testing utilities: record fixtures and a mock catalog source.
//!
//! # Example
//!
//! ```rust,ignore
//! use cardshelf_core::testing::{fixtures, MockCatalogSource};
//!
//! let records = fixtures::sample_catalog();
//! let source = MockCatalogSource::with_records(records.clone());
//! ```

mod mock_source;

pub use mock_source::MockCatalogSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{AgeRange, CatalogRecord, NEW_ARRIVAL_FLAG};

    /// Create a test record with reasonable defaults.
    pub fn record(id: &str, title: &str) -> CatalogRecord {
        CatalogRecord {
            id: Some(id.to_string()),
            author: "Test Author".to_string(),
            available_for_sale: true,
            languages: vec!["en".to_string()],
            ..CatalogRecord::titled(title)
        }
    }

    /// Create a priced record suitable for the given ages.
    pub fn priced_record(id: &str, title: &str, price: f64, ages: (i64, i64)) -> CatalogRecord {
        CatalogRecord {
            price: Some(price),
            age_range: Some(AgeRange::new(ages.0, ages.1)),
            ..record(id, title)
        }
    }

    /// A small, varied catalog covering every field and most absence cases.
    pub fn sample_catalog() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord {
                author: "Disney".to_string(),
                runtime: Some(40 * 60),
                content_type: vec!["Stories".to_string(), "Film".to_string()],
                blurb: "Sail across the ocean.".to_string(),
                ..priced_record("moana", "Moana", 8.99, (3, 7))
            },
            CatalogRecord {
                author: "Space Press".to_string(),
                runtime: Some(95 * 60),
                content_type: vec!["Learning".to_string(), "Stories".to_string()],
                flag: Some(NEW_ARRIVAL_FLAG.to_string()),
                ..priced_record("space-trip", "Space Trip", 24.5, (6, 12))
            },
            CatalogRecord {
                author: "Julia Donaldson".to_string(),
                runtime: Some(15 * 60),
                content_type: vec!["Stories".to_string()],
                ..priced_record("gruffalo", "The Gruffalo", 9.99, (2, 5))
            },
            CatalogRecord {
                runtime: Some(0),
                content_type: vec!["Music".to_string(), "Sleep".to_string()],
                languages: vec!["en".to_string(), "fr".to_string()],
                available_for_sale: false,
                ..priced_record("lullabies", "Lullabies", 14.0, (0, 2))
            },
            CatalogRecord {
                author: "Roald Dahl".to_string(),
                runtime: Some(3 * 3600),
                content_type: vec!["Audiobooks".to_string()],
                ..priced_record("bfg", "The BFG", 35.0, (8, 12))
            },
            CatalogRecord {
                languages: Vec::new(),
                available_for_sale: false,
                ..record("mystery", "Mystery Card")
            },
        ]
    }
}
