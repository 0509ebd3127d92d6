use serde::{Deserialize, Serialize};

use super::ids::{ContentId, ReviewId, UserId};

/// A marketplace participant. Every user may author content, review content
/// and score other users' reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Hidden ground truth: how accurate this user's reviews are. Evaluation
    /// noise is inversely proportional to it.
    pub reviewer_quality: f64,
    /// Hidden ground truth of authored content. Not read by the engine.
    pub author_quality: f64,
    #[serde(default)]
    pub expertise_topic: Vec<f64>,
    #[serde(default)]
    pub interest_topic: Vec<f64>,
    #[serde(default)]
    pub content_ids: Vec<ContentId>,
    #[serde(default)]
    pub review_ids: Vec<ReviewId>,
    #[serde(default)]
    pub joined_year: u32,
    #[serde(default)]
    pub is_bot: bool,
}
