use thiserror::Error;

/// Errors for malformed queries.
///
/// These are caller mistakes (an unknown filter name, a sort key that does
/// not exist) and are always reported, never silently defaulted. Problems in
/// the catalog data itself are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown report section: {0}")]
    UnknownSection(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

impl QueryError {
    pub(crate) fn invalid(name: &str, value: &str) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
