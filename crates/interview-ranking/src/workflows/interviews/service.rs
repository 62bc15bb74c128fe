use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::aggregation::ExclusionPolicy;
use super::domain::{
    CandidateId, CandidateSummary, InterviewSession, NormalizedRating, RawRating, SessionId,
};
use super::engine::{RankingEngine, RankingOptions};
use super::report::views::{RankingInsights, RaterProfile};
use super::report::{generate_insights, rater_profiles, Leaderboard};
use super::repository::{RatingSource, SourceError};

/// Full ranking report for one batch of ratings.
#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub exclusion: ExclusionPolicy,
    pub leaderboard: Leaderboard,
    pub insights: RankingInsights,
    pub raters: Vec<RaterProfile>,
    pub summaries: BTreeMap<CandidateId, CandidateSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<NormalizedRating>>,
}

impl RankingReport {
    /// Run the pipeline and assemble the presentation views around it.
    pub fn build(ratings: &[RawRating], options: &RankingOptions) -> Self {
        let outcome = RankingEngine::compute(ratings, options);
        let leaderboard = Leaderboard::from_outcome(&outcome);
        let raters = rater_profiles(ratings, &outcome.calibrations);
        let insights = generate_insights(&leaderboard, &raters);

        info!(
            ratings = ratings.len(),
            candidates = outcome.summaries.len(),
            raters = raters.len(),
            exclusion = options.exclusion.label(),
            "interview ranking computed"
        );

        Self {
            exclusion: options.exclusion,
            leaderboard,
            insights,
            raters,
            summaries: outcome.summaries,
            ratings: outcome.ratings,
        }
    }
}

/// A ranking report bound to the interview session it was computed for.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRanking {
    pub session_id: SessionId,
    pub interview_date: NaiveDate,
    #[serde(flatten)]
    pub report: RankingReport,
}

/// Service composing a rating source with the ranking engine.
pub struct RankingService<S> {
    source: Arc<S>,
    default_exclusion: ExclusionPolicy,
}

impl<S> RankingService<S>
where
    S: RatingSource + 'static,
{
    pub fn new(source: Arc<S>, default_exclusion: ExclusionPolicy) -> Self {
        Self {
            source,
            default_exclusion,
        }
    }

    pub fn default_exclusion(&self) -> ExclusionPolicy {
        self.default_exclusion
    }

    /// Rank a session, falling back to the configured exclusion policy.
    pub fn rank_session(
        &self,
        session_id: &SessionId,
        exclusion: Option<ExclusionPolicy>,
        include_ratings: bool,
    ) -> Result<SessionRanking, RankingServiceError> {
        let session = self
            .source
            .session(session_id)?
            .ok_or_else(|| RankingServiceError::SessionNotFound(session_id.clone()))?;

        let InterviewSession {
            id,
            interview_date,
            candidates,
            ratings,
        } = session;

        let options = RankingOptions {
            exclusion: exclusion.unwrap_or(self.default_exclusion),
            roster: candidates,
            include_ratings,
        };

        info!(session = %id.0, %interview_date, "ranking interview session");
        let report = RankingReport::build(&ratings, &options);

        Ok(SessionRanking {
            session_id: id,
            interview_date,
            report,
        })
    }
}

/// Error raised by the ranking service.
#[derive(Debug, thiserror::Error)]
pub enum RankingServiceError {
    #[error("interview session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    Source(#[from] SourceError),
}
