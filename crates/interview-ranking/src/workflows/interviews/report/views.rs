use super::super::domain::{CandidateId, RaterCalibration, RaterId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Up,
    Down,
    Unchanged,
    Unranked,
}

impl Movement {
    pub fn from_rank_change(raw_rank: u32, normalized_rank: u32, rank_change: i64) -> Self {
        if raw_rank == 0 || normalized_rank == 0 {
            Self::Unranked
        } else if rank_change > 0 {
            Self::Up
        } else if rank_change < 0 {
            Self::Down
        } else {
            Self::Unchanged
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Unchanged => "Unchanged",
            Self::Unranked => "Unranked",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub candidate_id: CandidateId,
    pub normalized_rank: u32,
    pub raw_rank: u32,
    pub rank_change: i64,
    pub normalized_total: Option<f64>,
    pub raw_total: Option<f64>,
    pub contributing_ratings: usize,
    pub movement: Movement,
    pub movement_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterTendency {
    Harsh,
    Neutral,
    Lenient,
    InsufficientData,
}

impl RaterTendency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Harsh => "Harsh",
            Self::Neutral => "Neutral",
            Self::Lenient => "Lenient",
            Self::InsufficientData => "Insufficient Data",
        }
    }
}

/// Rater-level transparency: how far a rater sits from the pool.
#[derive(Debug, Clone, Serialize)]
pub struct RaterProfile {
    pub rater_id: RaterId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rater_name: Option<String>,
    pub ratings: usize,
    pub complete_ratings: usize,
    pub flagged: bool,
    pub calibration: RaterCalibration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_offset: Option<f64>,
    pub tendency: RaterTendency,
    pub tendency_label: &'static str,
}

impl RaterProfile {
    pub fn display_name(&self) -> &str {
        self.rater_name.as_deref().unwrap_or(&self.rater_id.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankShiftView {
    pub candidate_id: CandidateId,
    pub rank_change: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingInsights {
    pub ranked_candidates: usize,
    pub unranked_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_rise: Option<RankShiftView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_drop: Option<RankShiftView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}
