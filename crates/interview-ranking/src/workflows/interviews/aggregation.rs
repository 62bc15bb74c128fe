use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateSummary, NormalizedRating};

/// Which ratings count toward candidate totals. Calibration never consults this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    #[default]
    KeepAll,
    ExcludeFlagged,
}

impl ExclusionPolicy {
    pub fn from_flag(exclude_flagged: bool) -> Self {
        if exclude_flagged {
            Self::ExcludeFlagged
        } else {
            Self::KeepAll
        }
    }

    pub fn excludes(self, rating: &NormalizedRating) -> bool {
        match self {
            Self::KeepAll => false,
            Self::ExcludeFlagged => rating.is_flagged(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::KeepAll => "keep_all",
            Self::ExcludeFlagged => "exclude_flagged",
        }
    }
}

#[derive(Default)]
struct Accumulator {
    raw_total: Option<f64>,
    normalized_total: Option<f64>,
    contributing: usize,
}

impl Accumulator {
    fn add(&mut self, rating: &NormalizedRating) {
        if let Some(raw) = rating.raw_total {
            self.raw_total = Some(self.raw_total.unwrap_or(0.0) + raw);
            self.contributing += 1;
        }
        if let Some(normalized) = rating.normalized_total {
            self.normalized_total = Some(self.normalized_total.unwrap_or(0.0) + normalized);
        }
    }
}

/// Sum raw and normalized totals per candidate, ranks left at zero.
///
/// Every candidate mentioned by a rating or listed in `roster` appears in the
/// output, including those whose ratings were all excluded or incomplete.
pub fn aggregate<F>(
    ratings: &[NormalizedRating],
    roster: &[CandidateId],
    exclude: F,
) -> BTreeMap<CandidateId, CandidateSummary>
where
    F: Fn(&NormalizedRating) -> bool,
{
    let mut totals: BTreeMap<CandidateId, Accumulator> = roster
        .iter()
        .map(|id| (id.clone(), Accumulator::default()))
        .collect();

    for rating in ratings {
        let entry = totals.entry(rating.candidate_id.clone()).or_default();
        if exclude(rating) {
            continue;
        }
        entry.add(rating);
    }

    totals
        .into_iter()
        .map(|(candidate_id, acc)| {
            let summary = CandidateSummary {
                raw_total: acc.raw_total,
                normalized_total: acc.normalized_total,
                contributing_ratings: acc.contributing,
                ..CandidateSummary::unranked(candidate_id.clone())
            };
            (candidate_id, summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::interviews::domain::RaterId;

    fn normalized(
        candidate: &str,
        rater: &str,
        raw_total: Option<f64>,
        normalized_total: Option<f64>,
        flagged: bool,
    ) -> NormalizedRating {
        NormalizedRating {
            candidate_id: CandidateId::from(candidate),
            rater_id: RaterId::from(rater),
            rater_name: None,
            exclude_flag: flagged.then_some(true),
            raw_d1: None,
            raw_d2: None,
            raw_d3: None,
            normalized_d1: None,
            normalized_d2: None,
            normalized_d3: None,
            raw_total,
            normalized_total,
        }
    }

    #[test]
    fn sums_complete_ratings_per_candidate() {
        let ratings = vec![
            normalized("c1", "r1", Some(180.0), Some(105.0), false),
            normalized("c1", "r2", Some(210.0), Some(150.0), false),
            normalized("c2", "r1", Some(240.0), Some(195.0), false),
        ];

        let summaries = aggregate(&ratings, &[], |_| false);
        let c1 = &summaries[&CandidateId::from("c1")];
        assert_eq!(c1.raw_total, Some(390.0));
        assert_eq!(c1.normalized_total, Some(255.0));
        assert_eq!(c1.contributing_ratings, 2);
        assert_eq!(c1.raw_rank, 0);
        assert_eq!(summaries[&CandidateId::from("c2")].raw_total, Some(240.0));
    }

    #[test]
    fn incomplete_ratings_leave_totals_null() {
        let ratings = vec![normalized("c1", "r1", None, None, false)];
        let summaries = aggregate(&ratings, &[], |_| false);
        let c1 = &summaries[&CandidateId::from("c1")];
        assert_eq!(c1.raw_total, None);
        assert_eq!(c1.normalized_total, None);
        assert_eq!(c1.contributing_ratings, 0);
    }

    #[test]
    fn excluded_ratings_do_not_count_but_candidate_remains() {
        let ratings = vec![
            normalized("c1", "resident", Some(300.0), Some(200.0), true),
            normalized("c1", "faculty", Some(150.0), Some(140.0), false),
            normalized("c2", "resident", Some(270.0), Some(180.0), true),
        ];

        let summaries = aggregate(&ratings, &[], |rating| {
            ExclusionPolicy::ExcludeFlagged.excludes(rating)
        });
        assert_eq!(summaries[&CandidateId::from("c1")].raw_total, Some(150.0));
        let c2 = &summaries[&CandidateId::from("c2")];
        assert_eq!(c2.raw_total, None);
        assert_eq!(c2.normalized_total, None);
    }

    #[test]
    fn roster_candidates_without_ratings_are_kept() {
        let roster = vec![CandidateId::from("quiet")];
        let summaries = aggregate(&[], &roster, |_| false);
        assert_eq!(
            summaries[&CandidateId::from("quiet")],
            CandidateSummary::unranked(CandidateId::from("quiet"))
        );
    }

    #[test]
    fn keep_all_policy_excludes_nothing() {
        let rating = normalized("c1", "r1", Some(1.0), Some(1.0), true);
        assert!(!ExclusionPolicy::KeepAll.excludes(&rating));
        assert!(ExclusionPolicy::ExcludeFlagged.excludes(&rating));
        assert_eq!(ExclusionPolicy::from_flag(true), ExclusionPolicy::ExcludeFlagged);
    }
}
