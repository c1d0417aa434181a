//! Catalog queries: predicate filtering and stable sorting.
//!
//! Both engines are pure functions over borrowed records. They return views
//! (`Vec<&CatalogRecord>`) and never reorder or mutate the caller's slice, so
//! one loaded catalog can serve any number of independent queries.

mod error;
mod filter;
mod sort;

pub use error::QueryError;
pub use filter::{filter, Criterion, FilterCriteria};
pub use sort::{sort, SortDirection, SortKey};

use serde::Serialize;
use tracing::debug;

use crate::catalog::CatalogRecord;

/// A full query: filter, then optionally sort, then optionally truncate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub criteria: FilterCriteria,
    pub sort: Option<SortKey>,
    pub direction: SortDirection,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(key);
        self.direction = direction;
        self
    }

    pub fn limited_to(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build a query from external `(name, value)` pairs.
    ///
    /// `sort`, `reverse` and `limit` control ordering and truncation; every
    /// other name must be a known filter criterion. `limit` must be positive.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Query::default();
        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref());
            match name {
                "sort" => query.sort = Some(value.parse()?),
                "reverse" => {
                    let reverse = filter::parse_flag(name, value)?;
                    query.direction = SortDirection::from_reverse(reverse);
                }
                "limit" => {
                    let limit: usize = value
                        .trim()
                        .parse()
                        .map_err(|_| QueryError::invalid(name, value))?;
                    if limit == 0 {
                        return Err(QueryError::invalid(name, value));
                    }
                    query.limit = Some(limit);
                }
                _ => {
                    if let Some(criterion) = Criterion::parse(name, value)? {
                        query.criteria.push(criterion);
                    }
                }
            }
        }
        Ok(query)
    }
}

/// Result of [`run_query`].
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    /// Records matching the criteria, before the limit was applied.
    pub matched: usize,
    pub records: Vec<&'a CatalogRecord>,
}

/// Filter, sort and truncate `records` according to `query`.
pub fn run_query<'a>(records: &'a [CatalogRecord], query: &Query) -> QueryResult<'a> {
    let mut selected = filter(records, &query.criteria);
    let matched = selected.len();

    if let Some(key) = query.sort {
        selected = sort(selected, key, query.direction);
    }
    if let Some(limit) = query.limit {
        selected.truncate(limit);
    }

    debug!(
        criteria = query.criteria.criteria().len(),
        sort = ?query.sort,
        matched,
        returned = selected.len(),
        "Ran catalog query"
    );

    QueryResult {
        matched,
        records: selected,
    }
}
