use serde::{Deserialize, Serialize};

use super::ids::{ContentId, ReviewId, UserId};

/// One user's evaluation of one content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    /// The reviewer.
    pub author_id: UserId,
    pub content_id: ContentId,
    /// Score the reviewer gave the content item.
    pub evaluation: f64,
    /// Hidden ground truth reliability of this review. Opaque to the engine.
    pub quality: f64,
    /// Scores other users gave to this review.
    #[serde(default)]
    pub scores: Vec<f64>,
    #[serde(default)]
    pub published_year: u32,
}
