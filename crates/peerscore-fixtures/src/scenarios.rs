//! Hand-built populations with known answers.

use peerscore_core::{PopulationBuilder, PopulationSnapshot, SnapshotError};

/// Three users and one content item.
///
/// User 0 authors the item; users 1 and 2 review it with evaluations 0.9
/// and 0.3. User 0 scores those reviews 0.8 and 0.2, so the reviewers'
/// reputations are 0.8 and 0.2 and user 0 has none.
pub fn minimal() -> Result<PopulationSnapshot, SnapshotError> {
    let mut b = PopulationBuilder::new();
    let author = b.add_user(0.5, 0.6);
    let strong = b.add_user(0.9, 0.5);
    let weak = b.add_user(0.3, 0.5);
    let content = b.publish(author, 0.6)?;
    let first = b.review(strong, content, 0.9)?;
    let second = b.review(weak, content, 0.3)?;
    b.score(first, 0.8)?;
    b.score(second, 0.2)?;
    Ok(b.build())
}

/// No users, content or reviews.
pub fn empty() -> PopulationSnapshot {
    PopulationSnapshot::default()
}

/// Every user and content item shares the same true quality, so any
/// correlation against the truth is undefined.
pub fn zero_variance() -> Result<PopulationSnapshot, SnapshotError> {
    let mut b = PopulationBuilder::new();
    let users: Vec<_> = (0..4).map(|_| b.add_user(0.5, 0.5)).collect();
    let content: Vec<_> = users
        .iter()
        .map(|&u| b.publish(u, 0.5))
        .collect::<Result<_, _>>()?;
    let evaluations = [0.2, 0.4, 0.6, 0.8];
    for (i, &reviewer) in users.iter().enumerate() {
        let target = content[(i + 1) % content.len()];
        let review = b.review(reviewer, target, evaluations[i])?;
        b.score(review, evaluations[(i + 2) % evaluations.len()])?;
    }
    Ok(b.build())
}

/// Content items without any review next to reviewed ones, and a reviewer
/// nobody scored.
pub fn partially_reviewed() -> Result<PopulationSnapshot, SnapshotError> {
    let mut b = PopulationBuilder::new();
    let author = b.add_user(0.5, 0.5);
    let scored = b.add_user(0.8, 0.5);
    let unscored = b.add_user(0.4, 0.5);
    let c0 = b.publish(author, 0.2)?;
    let _c1 = b.publish(author, 0.7)?;
    let c2 = b.publish(author, 0.9)?;
    let _c3 = b.publish(scored, 0.4)?;
    let r = b.review(scored, c0, 0.25)?;
    b.score(r, 0.7)?;
    let r = b.review(scored, c2, 0.85)?;
    b.score(r, 0.9)?;
    b.review(unscored, c2, 0.5)?;
    Ok(b.build())
}
