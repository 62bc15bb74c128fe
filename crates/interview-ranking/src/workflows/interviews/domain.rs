use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for interviewed candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

/// Identifier wrapper for interviewers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaterId(pub String);

/// Identifier wrapper for an interview day or session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Display for RaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RaterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The three independent scoring dimensions of an interview rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    D1,
    D2,
    D3,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::D1, Dimension::D2, Dimension::D3];

    pub const fn label(self) -> &'static str {
        match self {
            Self::D1 => "D1",
            Self::D2 => "D2",
            Self::D3 => "D3",
        }
    }
}

/// One rater's assessment of one candidate as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRating {
    pub candidate_id: CandidateId,
    pub rater_id: RaterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rater_name: Option<String>,
    #[serde(default)]
    pub d1: Option<f64>,
    #[serde(default)]
    pub d2: Option<f64>,
    #[serde(default)]
    pub d3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_flag: Option<bool>,
}

impl RawRating {
    pub fn new(
        candidate_id: impl Into<String>,
        rater_id: impl Into<String>,
        d1: Option<f64>,
        d2: Option<f64>,
        d3: Option<f64>,
    ) -> Self {
        Self {
            candidate_id: CandidateId(candidate_id.into()),
            rater_id: RaterId(rater_id.into()),
            rater_name: None,
            d1,
            d2,
            d3,
            exclude_flag: None,
        }
    }

    pub fn with_rater_name(mut self, name: impl Into<String>) -> Self {
        self.rater_name = Some(name.into());
        self
    }

    pub fn with_exclude_flag(mut self, flag: bool) -> Self {
        self.exclude_flag = Some(flag);
        self
    }

    /// Dimension value, treating non-finite numbers as absent.
    pub fn value(&self, dimension: Dimension) -> Option<f64> {
        let value = match dimension {
            Dimension::D1 => self.d1,
            Dimension::D2 => self.d2,
            Dimension::D3 => self.d3,
        };
        value.filter(|v| v.is_finite())
    }

    /// Sum of all three dimensions, or `None` when any is missing.
    pub fn total(&self) -> Option<f64> {
        sum_complete(Dimension::ALL.map(|dimension| self.value(dimension)))
    }

    pub fn is_complete(&self) -> bool {
        self.total().is_some()
    }

    pub fn is_flagged(&self) -> bool {
        self.exclude_flag == Some(true)
    }
}

/// Per-dimension statistics of a single rater's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionCalibration {
    pub mean: f64,
    pub std_dev: f64,
    pub sample_count: usize,
}

/// A rater's calibration across all three dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaterCalibration {
    pub d1: DimensionCalibration,
    pub d2: DimensionCalibration,
    pub d3: DimensionCalibration,
}

impl RaterCalibration {
    pub fn dimension(&self, dimension: Dimension) -> &DimensionCalibration {
        match dimension {
            Dimension::D1 => &self.d1,
            Dimension::D2 => &self.d2,
            Dimension::D3 => &self.d3,
        }
    }
}

/// A rating carrying both its raw and rater-normalized dimension scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRating {
    pub candidate_id: CandidateId,
    pub rater_id: RaterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rater_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_flag: Option<bool>,
    pub raw_d1: Option<f64>,
    pub raw_d2: Option<f64>,
    pub raw_d3: Option<f64>,
    pub normalized_d1: Option<f64>,
    pub normalized_d2: Option<f64>,
    pub normalized_d3: Option<f64>,
    pub raw_total: Option<f64>,
    pub normalized_total: Option<f64>,
}

impl NormalizedRating {
    pub fn raw(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::D1 => self.raw_d1,
            Dimension::D2 => self.raw_d2,
            Dimension::D3 => self.raw_d3,
        }
    }

    pub fn normalized(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::D1 => self.normalized_d1,
            Dimension::D2 => self.normalized_d2,
            Dimension::D3 => self.normalized_d3,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.exclude_flag == Some(true)
    }
}

/// Aggregated standing of a candidate across every contributing rater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub candidate_id: CandidateId,
    pub raw_total: Option<f64>,
    pub normalized_total: Option<f64>,
    pub raw_rank: u32,
    pub normalized_rank: u32,
    pub rank_change: i64,
    pub contributing_ratings: usize,
}

impl CandidateSummary {
    pub fn unranked(candidate_id: CandidateId) -> Self {
        Self {
            candidate_id,
            raw_total: None,
            normalized_total: None,
            raw_rank: 0,
            normalized_rank: 0,
            rank_change: 0,
            contributing_ratings: 0,
        }
    }
}

/// One interview day as delivered by the hosting application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: SessionId,
    pub interview_date: NaiveDate,
    #[serde(default)]
    pub candidates: Vec<CandidateId>,
    pub ratings: Vec<RawRating>,
}

pub(crate) fn sum_complete(values: [Option<f64>; 3]) -> Option<f64> {
    values
        .into_iter()
        .try_fold(0.0, |acc, value| value.map(|v| acc + v))
}
