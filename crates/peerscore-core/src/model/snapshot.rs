//! The read-only population handed to the estimation engine.

use serde::{Deserialize, Serialize};

use super::{Content, ContentId, Review, ReviewId, User, UserId};
use crate::errors::SnapshotError;

/// A full population snapshot: users, content and reviews in dense arenas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl PopulationSnapshot {
    pub fn new(users: Vec<User>, content: Vec<Content>, reviews: Vec<Review>) -> Self {
        Self {
            users,
            content,
            reviews,
        }
    }

    #[inline]
    pub fn user(&self, id: UserId) -> &User {
        &self.users[id.index()]
    }

    #[inline]
    pub fn content_item(&self, id: ContentId) -> &Content {
        &self.content[id.index()]
    }

    #[inline]
    pub fn review(&self, id: ReviewId) -> &Review {
        &self.reviews[id.index()]
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn content_count(&self) -> usize {
        self.content.len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.content.is_empty() && self.reviews.is_empty()
    }

    /// Iterate over the reviews received by a content item.
    pub fn reviews_of(&self, id: ContentId) -> impl Iterator<Item = &Review> + '_ {
        self.content_item(id)
            .review_ids
            .iter()
            .map(move |&r| self.review(r))
    }

    /// Iterate over every score received by the reviews a user authored.
    pub fn scores_received_by(&self, id: UserId) -> impl Iterator<Item = f64> + '_ {
        self.user(id)
            .review_ids
            .iter()
            .flat_map(move |&r| self.review(r).scores.iter().copied())
    }

    /// Check the invariants the engine relies on: dense zero-based ids,
    /// in-range references, and agreeing links in both directions.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        check_dense("user", self.users.iter().map(|u| u.id.index()))?;
        check_dense("content", self.content.iter().map(|c| c.id.index()))?;
        check_dense("review", self.reviews.iter().map(|r| r.id.index()))?;

        for review in &self.reviews {
            if review.author_id.index() >= self.users.len() {
                return Err(dangling("review", review.id.index(), "author_id", "user", review.author_id.index()));
            }
            if review.content_id.index() >= self.content.len() {
                return Err(dangling("review", review.id.index(), "content_id", "content", review.content_id.index()));
            }
        }

        let mut listed_by_content = vec![false; self.reviews.len()];
        for content in &self.content {
            if content.author_id.index() >= self.users.len() {
                return Err(dangling("content", content.id.index(), "author_id", "user", content.author_id.index()));
            }
            for &review_id in &content.review_ids {
                let review = self.reviews.get(review_id.index()).ok_or_else(|| {
                    dangling("content", content.id.index(), "review_ids", "review", review_id.index())
                })?;
                if review.content_id != content.id {
                    return Err(SnapshotError::InconsistentLink {
                        entity: "content",
                        id: content.id.index(),
                        target: "review",
                        target_id: review_id.index(),
                    });
                }
                listed_by_content[review_id.index()] = true;
            }
        }

        let mut listed_by_author = vec![false; self.reviews.len()];
        for user in &self.users {
            for &review_id in &user.review_ids {
                let review = self.reviews.get(review_id.index()).ok_or_else(|| {
                    dangling("user", user.id.index(), "review_ids", "review", review_id.index())
                })?;
                if review.author_id != user.id {
                    return Err(SnapshotError::InconsistentLink {
                        entity: "user",
                        id: user.id.index(),
                        target: "review",
                        target_id: review_id.index(),
                    });
                }
                listed_by_author[review_id.index()] = true;
            }
            for &content_id in &user.content_ids {
                let content = self.content.get(content_id.index()).ok_or_else(|| {
                    dangling("user", user.id.index(), "content_ids", "content", content_id.index())
                })?;
                if content.author_id != user.id {
                    return Err(SnapshotError::InconsistentLink {
                        entity: "user",
                        id: user.id.index(),
                        target: "content",
                        target_id: content_id.index(),
                    });
                }
            }
        }

        for review in &self.reviews {
            let i = review.id.index();
            if !listed_by_content[i] {
                return Err(SnapshotError::InconsistentLink {
                    entity: "review",
                    id: i,
                    target: "content",
                    target_id: review.content_id.index(),
                });
            }
            if !listed_by_author[i] {
                return Err(SnapshotError::InconsistentLink {
                    entity: "review",
                    id: i,
                    target: "user",
                    target_id: review.author_id.index(),
                });
            }
        }

        Ok(())
    }

    /// Deserialize a snapshot from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_dense(
    entity: &'static str,
    ids: impl Iterator<Item = usize>,
) -> Result<(), SnapshotError> {
    for (position, found) in ids.enumerate() {
        if position != found {
            return Err(SnapshotError::NonDenseId {
                entity,
                position,
                found,
            });
        }
    }
    Ok(())
}

fn dangling(
    entity: &'static str,
    id: usize,
    field: &'static str,
    target: &'static str,
    target_id: usize,
) -> SnapshotError {
    SnapshotError::DanglingReference {
        entity,
        id,
        field,
        target,
        target_id,
    }
}
