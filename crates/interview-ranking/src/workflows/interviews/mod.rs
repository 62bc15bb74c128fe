//! Interview rating normalization and ranking.
//!
//! Raw ratings flow through four pure stages: per-rater calibration, z-score
//! normalization onto a common 0-100 scale, per-candidate aggregation, and
//! competition ranking of both raw and normalized totals. The service and
//! router wrap that pipeline for the hosting application.

pub mod aggregation;
pub mod calibration;
pub mod domain;
pub mod engine;
pub mod normalization;
pub mod ranking;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregation::{aggregate, ExclusionPolicy};
pub use calibration::compute_calibrations;
pub use domain::{
    CandidateId, CandidateSummary, Dimension, DimensionCalibration, InterviewSession,
    NormalizedRating, RaterCalibration, RaterId, RawRating, SessionId,
};
pub use engine::{RankingEngine, RankingOptions, RankingOutcome};
pub use normalization::{normalize, normalize_all};
pub use ranking::{apply_ranks, competition_ranks, RankBasis};
pub use repository::{RatingSource, SourceError};
pub use router::{ranking_router, RankingRequest};
pub use service::{RankingReport, RankingService, RankingServiceError, SessionRanking};
