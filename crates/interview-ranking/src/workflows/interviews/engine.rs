use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregation::{aggregate, ExclusionPolicy};
use super::calibration::compute_calibrations;
use super::domain::{
    CandidateId, CandidateSummary, NormalizedRating, RaterCalibration, RaterId, RawRating,
};
use super::normalization::normalize_all;
use super::ranking::apply_ranks;

/// Caller controls for a single ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingOptions {
    #[serde(default)]
    pub exclusion: ExclusionPolicy,
    /// Candidates that must appear in the output even without ratings.
    #[serde(default)]
    pub roster: Vec<CandidateId>,
    /// Return the per-rating normalized scores alongside the summaries.
    #[serde(default)]
    pub include_ratings: bool,
}

/// Everything one pass of the pipeline produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub summaries: BTreeMap<CandidateId, CandidateSummary>,
    pub calibrations: BTreeMap<RaterId, RaterCalibration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<NormalizedRating>>,
}

impl RankingOutcome {
    pub fn summary(&self, candidate_id: &CandidateId) -> Option<&CandidateSummary> {
        self.summaries.get(candidate_id)
    }
}

/// Stateless pipeline: calibrate, normalize, aggregate, rank.
pub struct RankingEngine;

impl RankingEngine {
    pub fn compute(ratings: &[RawRating], options: &RankingOptions) -> RankingOutcome {
        let policy = options.exclusion;
        let mut outcome =
            Self::compute_with(ratings, &options.roster, |rating| policy.excludes(rating));
        if !options.include_ratings {
            outcome.ratings = None;
        }
        outcome
    }

    /// Run the pipeline with an arbitrary exclusion predicate. Normalized ratings
    /// are always returned.
    pub fn compute_with<F>(
        ratings: &[RawRating],
        roster: &[CandidateId],
        exclude: F,
    ) -> RankingOutcome
    where
        F: Fn(&NormalizedRating) -> bool,
    {
        // Calibration always sees every rating; exclusion applies to sums only.
        let calibrations = compute_calibrations(ratings);
        let normalized = normalize_all(ratings, &calibrations);
        let mut summaries = aggregate(&normalized, roster, exclude);
        apply_ranks(&mut summaries);

        RankingOutcome {
            summaries,
            calibrations,
            ratings: Some(normalized),
        }
    }
}
