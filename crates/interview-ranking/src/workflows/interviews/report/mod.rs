mod insights;
mod summary;
pub mod views;

pub use insights::TENDENCY_THRESHOLD;
pub use summary::Leaderboard;

pub(crate) use insights::{generate_insights, rater_profiles};
