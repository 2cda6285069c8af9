use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata record for one movie, as served by the movie-info service.
///
/// The creating service guarantees a non-empty title and cast and a positive
/// release year; the aggregator passes records through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    /// Absent until the record is persisted.
    #[serde(default, alias = "movieInfoId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(alias = "year")]
    pub release_year: u32,
    pub cast: Vec<String>,
    #[serde(alias = "release_date")]
    pub release_date: NaiveDate,
}

impl MovieInfo {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        release_year: u32,
        cast: Vec<String>,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            release_year,
            cast,
            release_date,
        }
    }
}
