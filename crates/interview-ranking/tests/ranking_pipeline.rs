//! End-to-end ranking scenarios exercised through the public engine and service facade.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use interview_ranking::workflows::interviews::{
        CandidateId, InterviewSession, RatingSource, RawRating, SessionId, SourceError,
    };

    fn scored(candidate: &str, rater: &str, scores: [f64; 3]) -> RawRating {
        RawRating::new(
            candidate,
            rater,
            Some(scores[0]),
            Some(scores[1]),
            Some(scores[2]),
        )
    }

    /// Three faculty interviewers with different habits and one resident.
    ///
    /// `tough` sits ten points under `steady` on every candidate it shares.
    pub(super) fn interview_day() -> Vec<RawRating> {
        vec![
            scored("ava", "tough", [60.0, 62.0, 58.0]).with_rater_name("Dr. Tough"),
            scored("ben", "tough", [50.0, 52.0, 48.0]).with_rater_name("Dr. Tough"),
            scored("cy", "tough", [55.0, 57.0, 53.0]).with_rater_name("Dr. Tough"),
            scored("ava", "steady", [70.0, 72.0, 68.0]),
            scored("dee", "steady", [78.0, 80.0, 76.0]),
            scored("eli", "steady", [66.0, 64.0, 68.0]),
            scored("ben", "resident", [90.0, 90.0, 90.0]).with_exclude_flag(true),
            scored("eli", "resident", [95.0, 95.0, 95.0]).with_exclude_flag(true),
            RawRating::new("fay", "steady", Some(70.0), None, Some(71.0)),
        ]
    }

    #[derive(Default)]
    pub(super) struct SessionStore {
        sessions: Mutex<HashMap<SessionId, InterviewSession>>,
    }

    impl SessionStore {
        pub(super) fn with_day(id: &str) -> Arc<Self> {
            let store = Self::default();
            store.sessions.lock().expect("store mutex poisoned").insert(
                SessionId::from(id),
                InterviewSession {
                    id: SessionId::from(id),
                    interview_date: NaiveDate::from_ymd_opt(2026, 1, 9).expect("valid date"),
                    candidates: vec![CandidateId::from("gus")],
                    ratings: interview_day(),
                },
            );
            Arc::new(store)
        }
    }

    impl RatingSource for SessionStore {
        fn session(&self, id: &SessionId) -> Result<Option<InterviewSession>, SourceError> {
            Ok(self
                .sessions
                .lock()
                .expect("store mutex poisoned")
                .get(id)
                .cloned())
        }
    }
}

use common::*;
use interview_ranking::workflows::interviews::{
    compute_calibrations, CandidateId, ExclusionPolicy, RankingEngine, RankingOptions,
    RankingService, RaterId, SessionId,
};

#[test]
fn ranks_are_competition_ranks_over_complete_candidates() {
    let outcome = RankingEngine::compute(&interview_day(), &RankingOptions::default());

    let mut ranks: Vec<u32> = outcome
        .summaries
        .values()
        .filter(|summary| summary.normalized_total.is_some())
        .map(|summary| summary.normalized_rank)
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks.first(), Some(&1));
    assert!(ranks.iter().all(|rank| *rank as usize <= ranks.len()));

    let fay = outcome.summary(&CandidateId::from("fay")).expect("fay listed");
    assert_eq!(fay.raw_total, None);
    assert_eq!((fay.raw_rank, fay.normalized_rank, fay.rank_change), (0, 0, 0));
}

#[test]
fn rank_change_matches_rank_difference_for_every_candidate() {
    let outcome = RankingEngine::compute(&interview_day(), &RankingOptions::default());
    for summary in outcome.summaries.values() {
        assert_eq!(
            summary.rank_change,
            i64::from(summary.raw_rank) - i64::from(summary.normalized_rank),
            "candidate {}",
            summary.candidate_id
        );
    }
}

#[test]
fn excluding_flagged_ratings_leaves_calibration_untouched() {
    let ratings = interview_day();
    let keep = RankingEngine::compute(&ratings, &RankingOptions::default());
    let drop = RankingEngine::compute(
        &ratings,
        &RankingOptions {
            exclusion: ExclusionPolicy::ExcludeFlagged,
            ..RankingOptions::default()
        },
    );

    assert_eq!(keep.calibrations, drop.calibrations);
    assert_eq!(keep.calibrations, compute_calibrations(&ratings));

    let ben_keep = keep.summary(&CandidateId::from("ben")).expect("ben");
    let ben_drop = drop.summary(&CandidateId::from("ben")).expect("ben");
    assert_eq!(ben_keep.contributing_ratings, 2);
    assert_eq!(ben_drop.contributing_ratings, 1);
}

#[test]
fn thin_rater_history_uses_neutral_calibration() {
    let outcome = RankingEngine::compute(&interview_day(), &RankingOptions::default());
    let resident = outcome
        .calibrations
        .get(&RaterId::from("resident"))
        .expect("resident calibrated");
    assert_eq!(resident.d1.sample_count, 2);

    let lone = RankingEngine::compute(&interview_day()[..1], &RankingOptions::default());
    let tough = lone
        .calibrations
        .get(&RaterId::from("tough"))
        .expect("tough calibrated");
    assert_eq!(tough.d1.mean, 50.0);
    assert_eq!(tough.d1.std_dev, 1.0);
}

#[test]
fn service_ranks_stored_session_with_roster() {
    let service = RankingService::new(
        SessionStore::with_day("jan-9"),
        ExclusionPolicy::ExcludeFlagged,
    );
    let ranking = service
        .rank_session(&SessionId::from("jan-9"), None, true)
        .expect("session ranks");

    assert_eq!(ranking.report.exclusion, ExclusionPolicy::ExcludeFlagged);
    let gus = &ranking.report.summaries[&CandidateId::from("gus")];
    assert_eq!(gus.contributing_ratings, 0);
    assert_eq!(gus.normalized_rank, 0);
    assert_eq!(
        ranking.report.ratings.as_ref().map(Vec::len),
        Some(interview_day().len())
    );
    assert!(ranking
        .report
        .raters
        .iter()
        .any(|profile| profile.rater_id == RaterId::from("resident") && profile.flagged));
}
