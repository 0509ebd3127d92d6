//! Test and benchmark support for the peerscore workspace.
//!
//! - [`generator`]: seeded synthetic marketplaces with hidden ground truth.
//! - [`scenarios`]: small hand-built populations with known answers.
//! - [`loader`]: JSON fixtures under the workspace `test-fixtures/` folder.
//!
//! Deterministic: same seed → same population across runs.

pub mod generator;
pub mod loader;
pub mod rng;
pub mod scenarios;

pub use generator::{generate_population, GeneratorConfig, PopulationSize};
pub use loader::load_population;
pub use rng::SimpleRng;
