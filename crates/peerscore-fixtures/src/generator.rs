//! One simulated year of a review marketplace.
//!
//! Genuine users draw uniform reviewer and author qualities. Each publishes
//! content of its author quality, reviews random content with noise
//! `noise_scale / reviewer_quality`, and scores random reviews with noise
//! `noise_scale / own reviewer_quality` around the review's quality. Bots
//! evaluate and score uniformly at random, and genuine users score bot
//! reviews 0.

use peerscore_core::constants::NOISE_SCALE;
use peerscore_core::{
    ContentId, PopulationBuilder, PopulationSnapshot, ReviewId, SnapshotError, UserId,
};

use crate::rng::SimpleRng;

/// Rejection sampling gives up after this many draws and clamps instead.
const MAX_EVALUATION_DRAWS: usize = 10_000;

/// Population size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationSize {
    /// 10 users, unit test scale
    Micro,
    /// 100 users, the default marketplace
    Small,
    /// 1K users
    Medium,
    /// 10K users
    Large,
}

impl PopulationSize {
    pub fn user_count(&self) -> usize {
        match self {
            Self::Micro => 10,
            Self::Small => 100,
            Self::Medium => 1_000,
            Self::Large => 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub users: usize,
    pub content_per_user: usize,
    pub reviews_per_user: usize,
    pub scores_per_user: usize,
    /// Share of users added as bots, rounded down.
    pub bot_fraction: f64,
    pub noise_scale: f64,
    /// Keep evaluations and scores inside [0, 1].
    pub constrain_to_unit: bool,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            users: PopulationSize::Small.user_count(),
            content_per_user: 1,
            reviews_per_user: 3,
            scores_per_user: 10,
            bot_fraction: 0.0,
            noise_scale: NOISE_SCALE,
            constrain_to_unit: true,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    pub fn sized(size: PopulationSize, seed: u64) -> Self {
        Self {
            users: size.user_count(),
            seed,
            ..Self::default()
        }
    }
}

pub fn generate_population(config: &GeneratorConfig) -> Result<PopulationSnapshot, SnapshotError> {
    let mut rng = SimpleRng::new(config.seed);
    let mut b = PopulationBuilder::new();

    let bots = (config.users as f64 * config.bot_fraction.clamp(0.0, 1.0)) as usize;
    let mut users: Vec<UserId> = (0..bots).map(|_| b.add_bot()).collect();
    for _ in bots..config.users {
        let reviewer_quality = rng.next_f64();
        let author_quality = rng.next_f64();
        users.push(b.add_user(reviewer_quality, author_quality));
    }

    for &user in &users {
        let author_quality = b.snapshot().user(user).author_quality;
        for _ in 0..config.content_per_user {
            b.publish(user, author_quality)?;
        }
    }

    if b.content_count() > 0 {
        for &user in &users {
            for _ in 0..config.reviews_per_user {
                let content = ContentId(rng.next_index(b.content_count()));
                let evaluation = draw_evaluation(&b, &mut rng, config, user, content);
                b.review(user, content, evaluation)?;
            }
        }
    }

    if b.review_count() > 0 {
        for &user in &users {
            for _ in 0..config.scores_per_user {
                let review = pick_review(&b, &mut rng);
                let score = draw_score(&b, &mut rng, config, user, review);
                b.score(review, score)?;
            }
        }
    }

    Ok(b.build())
}

fn draw_evaluation(
    b: &PopulationBuilder,
    rng: &mut SimpleRng,
    config: &GeneratorConfig,
    reviewer: UserId,
    content: ContentId,
) -> f64 {
    let snapshot = b.snapshot();
    let user = snapshot.user(reviewer);
    if user.is_bot {
        return rng.next_f64();
    }
    let truth = snapshot.content_item(content).quality;
    let sd = config.noise_scale / user.reviewer_quality;
    if !config.constrain_to_unit {
        return truth + rng.next_normal() * sd;
    }
    for _ in 0..MAX_EVALUATION_DRAWS {
        let evaluation = truth + rng.next_normal() * sd;
        if (0.0..=1.0).contains(&evaluation) {
            return evaluation;
        }
    }
    (truth + rng.next_normal() * sd).clamp(0.0, 1.0)
}

/// A uniformly chosen content item that has reviews, then one of its reviews.
fn pick_review(b: &PopulationBuilder, rng: &mut SimpleRng) -> ReviewId {
    let snapshot = b.snapshot();
    loop {
        let content = &snapshot.content[rng.next_index(snapshot.content_count())];
        if !content.review_ids.is_empty() {
            return content.review_ids[rng.next_index(content.review_ids.len())];
        }
    }
}

fn draw_score(
    b: &PopulationBuilder,
    rng: &mut SimpleRng,
    config: &GeneratorConfig,
    scorer: UserId,
    review: ReviewId,
) -> f64 {
    let snapshot = b.snapshot();
    let user = snapshot.user(scorer);
    if user.is_bot {
        return rng.next_f64();
    }
    let review = snapshot.review(review);
    if snapshot.user(review.author_id).is_bot {
        return 0.0;
    }
    let score = review.quality + rng.next_normal() * config.noise_scale / user.reviewer_quality;
    if config.constrain_to_unit {
        score.clamp(0.0, 1.0)
    } else {
        score
    }
}
