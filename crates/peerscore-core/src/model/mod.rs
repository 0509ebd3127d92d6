//! Population snapshot model.
//!
//! Users, content and reviews live in dense, zero-based arenas: an entity's
//! id is its position in the owning `Vec`.

pub mod builder;
pub mod content;
pub mod ids;
pub mod review;
pub mod snapshot;
pub mod user;

pub use builder::PopulationBuilder;
pub use content::Content;
pub use ids::{ContentId, ReviewId, UserId};
pub use review::Review;
pub use snapshot::PopulationSnapshot;
pub use user::User;
