use serde::{Deserialize, Deserializer, Serialize};

/// One review of a movie, owned by the review service.
///
/// `movie_info_id` is a weak reference to a [`MovieInfo`](super::MovieInfo)
/// by id, not ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, alias = "reviewId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub movie_info_id: String,
    #[serde(default)]
    pub comment: String,
    pub rating: f64,
}

impl Review {
    pub fn new(
        id: impl Into<String>,
        movie_info_id: impl Into<String>,
        comment: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: Some(id.into()),
            movie_info_id: movie_info_id.into(),
            comment: comment.into(),
            rating,
        }
    }
}

/// The review service stores `movieInfoId` as a number; the movie-info
/// service hands out string ids. Accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
