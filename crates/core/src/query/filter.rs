//! Predicate filtering.
//!
//! A [`FilterCriteria`] is an ordered chain of [`Criterion`]s combined with
//! logical AND. Filtering selects a stable subsequence: retained records keep
//! their relative input order.
//!
//! Numeric range criteria (age, price, runtime) drop records that lack the
//! field they test. Text criteria are case-insensitive substring matches.

use serde::{Deserialize, Serialize};

use super::QueryError;
use crate::catalog::CatalogRecord;

/// One inclusion predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "criterion", content = "value", rename_all = "snake_case")]
pub enum Criterion {
    /// Substring of the title.
    TitleContains(String),
    /// Substring of the author.
    AuthorContains(String),
    /// Substring of any content type label.
    ContentTypeContains(String),
    /// Substring of any language label.
    LanguageContains(String),
    /// Substring of the title, the author, or any content type label.
    Keyword(String),
    /// Upper end of the age range is at least this age.
    MinAge(i64),
    /// Lower end of the age range is at most this age.
    MaxAge(i64),
    MinPrice(f64),
    MaxPrice(f64),
    MinRuntimeMinutes(u64),
    MaxRuntimeMinutes(u64),
    AvailableOnly,
    NewOnly,
}

impl Criterion {
    /// Parse a criterion from its external name and a textual value.
    ///
    /// Boolean criteria (`available_only`, `new_only`) return `Ok(None)`
    /// when the value is false, since an inactive flag is no criterion.
    pub fn parse(name: &str, value: &str) -> Result<Option<Self>, QueryError> {
        let criterion = match name {
            "search" | "title" => Self::TitleContains(value.to_string()),
            "author" => Self::AuthorContains(value.to_string()),
            "content_type" => Self::ContentTypeContains(value.to_string()),
            "language" => Self::LanguageContains(value.to_string()),
            "keyword" | "q" => Self::Keyword(value.to_string()),
            "min_age" => Self::MinAge(parse_number(name, value)?),
            "max_age" => Self::MaxAge(parse_number(name, value)?),
            "min_price" => Self::MinPrice(parse_price(name, value)?),
            "max_price" => Self::MaxPrice(parse_price(name, value)?),
            "min_runtime" => Self::MinRuntimeMinutes(parse_number(name, value)?),
            "max_runtime" => Self::MaxRuntimeMinutes(parse_number(name, value)?),
            "available_only" => {
                if !parse_flag(name, value)? {
                    return Ok(None);
                }
                Self::AvailableOnly
            }
            "new_only" => {
                if !parse_flag(name, value)? {
                    return Ok(None);
                }
                Self::NewOnly
            }
            other => return Err(QueryError::UnknownFilter(other.to_string())),
        };
        Ok(Some(criterion))
    }

    /// Whether `record` satisfies this criterion.
    ///
    /// Only the field under test is inspected.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        match self {
            Self::TitleContains(text) => contains_ci(&record.title, text),
            Self::AuthorContains(text) => contains_ci(&record.author, text),
            Self::ContentTypeContains(text) => any_contains_ci(&record.content_type, text),
            Self::LanguageContains(text) => any_contains_ci(&record.languages, text),
            Self::Keyword(text) => {
                contains_ci(&record.title, text)
                    || contains_ci(&record.author, text)
                    || any_contains_ci(&record.content_type, text)
            }
            Self::MinAge(age) => record.age_range.is_some_and(|r| r.max >= *age),
            Self::MaxAge(age) => record.age_range.is_some_and(|r| r.min <= *age),
            Self::MinPrice(bound) => record.price.is_some_and(|p| p >= *bound),
            Self::MaxPrice(bound) => record.price.is_some_and(|p| p <= *bound),
            Self::MinRuntimeMinutes(minutes) => record
                .known_runtime()
                .is_some_and(|secs| secs >= minutes.saturating_mul(60)),
            Self::MaxRuntimeMinutes(minutes) => record
                .known_runtime()
                .is_some_and(|secs| secs <= minutes.saturating_mul(60)),
            Self::AvailableOnly => record.available_for_sale,
            Self::NewOnly => record.is_new_arrival(),
        }
    }
}

/// An AND-chain of criteria. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    criteria: Vec<Criterion>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a criterion to the chain.
    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    pub fn title_contains(self, text: impl Into<String>) -> Self {
        self.with(Criterion::TitleContains(text.into()))
    }

    pub fn author_contains(self, text: impl Into<String>) -> Self {
        self.with(Criterion::AuthorContains(text.into()))
    }

    pub fn content_type_contains(self, text: impl Into<String>) -> Self {
        self.with(Criterion::ContentTypeContains(text.into()))
    }

    pub fn language_contains(self, text: impl Into<String>) -> Self {
        self.with(Criterion::LanguageContains(text.into()))
    }

    pub fn keyword(self, text: impl Into<String>) -> Self {
        self.with(Criterion::Keyword(text.into()))
    }

    pub fn min_age(self, age: i64) -> Self {
        self.with(Criterion::MinAge(age))
    }

    pub fn max_age(self, age: i64) -> Self {
        self.with(Criterion::MaxAge(age))
    }

    pub fn min_price(self, price: f64) -> Self {
        self.with(Criterion::MinPrice(price))
    }

    pub fn max_price(self, price: f64) -> Self {
        self.with(Criterion::MaxPrice(price))
    }

    pub fn min_runtime_minutes(self, minutes: u64) -> Self {
        self.with(Criterion::MinRuntimeMinutes(minutes))
    }

    pub fn max_runtime_minutes(self, minutes: u64) -> Self {
        self.with(Criterion::MaxRuntimeMinutes(minutes))
    }

    pub fn available_only(self) -> Self {
        self.with(Criterion::AvailableOnly)
    }

    pub fn new_only(self) -> Self {
        self.with(Criterion::NewOnly)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Whether `record` satisfies every criterion in the chain.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }
}

/// Select the records matching all criteria, preserving input order.
///
/// Accepts any iterator of record references, so the output of one filter
/// can be fed straight into another.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a CatalogRecord>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn any_contains_ci(labels: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    labels.iter().any(|label| label.to_lowercase().contains(&needle))
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, QueryError> {
    value
        .trim()
        .parse()
        .map_err(|_| QueryError::invalid(name, value))
}

fn parse_price(name: &str, value: &str) -> Result<f64, QueryError> {
    let price: f64 = parse_number(name, value)?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(QueryError::invalid(name, value))
    }
}

pub(crate) fn parse_flag(name: &str, value: &str) -> Result<bool, QueryError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(QueryError::invalid(name, value)),
    }
}
