use serde::{Deserialize, Serialize};

/// Paging window of an AQL answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Index of the first result.
    pub start_pos: u64,
    /// Index past the last result.
    pub end_pos: u64,
    /// Number of results returned.
    pub total: u64,
}

/// Answer to an AQL query (`POST /api/search/aql`).
///
/// `T` is the shape of one result row; rows depend on the query's
/// `.include(...)` clause, so [`serde_json::Value`] is the usual choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqlResult<T> {
    /// Result rows.
    pub results: Vec<T>,
    /// Paging window.
    pub range: Range,
}
