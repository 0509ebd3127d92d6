//! Incremental construction of a consistent `PopulationSnapshot`.
//!
//! Adapters that import a population from elsewhere, and tests, use the
//! builder so that ids stay dense and every link is recorded on both sides.

use super::{Content, ContentId, PopulationSnapshot, Review, ReviewId, User, UserId};
use crate::constants::BOT_TRUE_QUALITY;
use crate::errors::SnapshotError;

#[derive(Debug, Default)]
pub struct PopulationBuilder {
    snapshot: PopulationSnapshot,
    current_year: u32,
}

impl PopulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Year stamped on entities added from now on.
    pub fn set_year(&mut self, year: u32) -> &mut Self {
        self.current_year = year;
        self
    }

    /// Add a genuine user with a one-dimensional topic.
    pub fn add_user(&mut self, reviewer_quality: f64, author_quality: f64) -> UserId {
        self.push_user(reviewer_quality, author_quality, false)
    }

    /// Add a bot: near-zero true qualities, flagged as a bot.
    pub fn add_bot(&mut self) -> UserId {
        self.push_user(BOT_TRUE_QUALITY, BOT_TRUE_QUALITY, true)
    }

    fn push_user(&mut self, reviewer_quality: f64, author_quality: f64, is_bot: bool) -> UserId {
        let id = UserId(self.snapshot.users.len());
        self.snapshot.users.push(User {
            id,
            reviewer_quality,
            author_quality,
            expertise_topic: vec![1.0],
            interest_topic: vec![1.0],
            content_ids: Vec::new(),
            review_ids: Vec::new(),
            joined_year: self.current_year,
            is_bot,
        });
        id
    }

    /// Publish a content item authored by `author` with the given true quality.
    pub fn publish(&mut self, author: UserId, quality: f64) -> Result<ContentId, SnapshotError> {
        let id = ContentId(self.snapshot.content.len());
        let topic = self.user_mut(author, "content", id.index(), "author_id")?
            .expertise_topic
            .clone();
        self.snapshot.users[author.index()].content_ids.push(id);
        self.snapshot.content.push(Content {
            id,
            author_id: author,
            topic,
            quality,
            review_ids: Vec::new(),
            published_year: self.current_year,
        });
        Ok(id)
    }

    /// Record a review whose hidden quality equals the reviewer's true quality
    /// (reviewer and content share a topic).
    pub fn review(
        &mut self,
        reviewer: UserId,
        content: ContentId,
        evaluation: f64,
    ) -> Result<ReviewId, SnapshotError> {
        let quality = self
            .snapshot
            .users
            .get(reviewer.index())
            .map(|u| if u.is_bot { 0.0 } else { u.reviewer_quality })
            .unwrap_or(0.0);
        self.review_with_quality(reviewer, content, evaluation, quality)
    }

    /// Record a review with an explicit hidden review quality.
    pub fn review_with_quality(
        &mut self,
        reviewer: UserId,
        content: ContentId,
        evaluation: f64,
        quality: f64,
    ) -> Result<ReviewId, SnapshotError> {
        let id = ReviewId(self.snapshot.reviews.len());
        self.user_mut(reviewer, "review", id.index(), "author_id")?;
        let item = self
            .snapshot
            .content
            .get_mut(content.index())
            .ok_or(SnapshotError::DanglingReference {
                entity: "review",
                id: id.index(),
                field: "content_id",
                target: "content",
                target_id: content.index(),
            })?;
        item.review_ids.push(id);
        self.snapshot.users[reviewer.index()].review_ids.push(id);
        self.snapshot.reviews.push(Review {
            id,
            author_id: reviewer,
            content_id: content,
            evaluation,
            quality,
            scores: Vec::new(),
            published_year: self.current_year,
        });
        Ok(id)
    }

    /// Attach a score some other user gave to `review`.
    pub fn score(&mut self, review: ReviewId, score: f64) -> Result<(), SnapshotError> {
        let entry = self
            .snapshot
            .reviews
            .get_mut(review.index())
            .ok_or(SnapshotError::DanglingReference {
                entity: "score",
                id: review.index(),
                field: "review_id",
                target: "review",
                target_id: review.index(),
            })?;
        entry.scores.push(score);
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.snapshot.users.len()
    }

    pub fn content_count(&self) -> usize {
        self.snapshot.content.len()
    }

    pub fn review_count(&self) -> usize {
        self.snapshot.reviews.len()
    }

    /// Read access to the population built so far.
    pub fn snapshot(&self) -> &PopulationSnapshot {
        &self.snapshot
    }

    pub fn build(self) -> PopulationSnapshot {
        self.snapshot
    }

    fn user_mut(
        &mut self,
        user: UserId,
        entity: &'static str,
        id: usize,
        field: &'static str,
    ) -> Result<&mut User, SnapshotError> {
        self.snapshot
            .users
            .get_mut(user.index())
            .ok_or(SnapshotError::DanglingReference {
                entity,
                id,
                field,
                target: "user",
                target_id: user.index(),
            })
    }
}
