use serde::{Deserialize, Serialize};

use super::ids::{ContentId, ReviewId, UserId};

/// A published content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub author_id: UserId,
    #[serde(default)]
    pub topic: Vec<f64>,
    /// Hidden ground truth quality.
    pub quality: f64,
    #[serde(default)]
    pub review_ids: Vec<ReviewId>,
    #[serde(default)]
    pub published_year: u32,
}
