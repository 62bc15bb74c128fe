use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateSummary};

/// Which total a ranking pass orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBasis {
    Raw,
    Normalized,
}

impl RankBasis {
    pub fn total(self, summary: &CandidateSummary) -> Option<f64> {
        match self {
            Self::Raw => summary.raw_total,
            Self::Normalized => summary.normalized_total,
        }
    }
}

/// Competition ranking (`1, 1, 3, 4, 4, 6`) over the totals picked by `key`.
///
/// Candidates whose key is `None` are left out entirely; callers treat their
/// rank as `0`. Equal totals share a rank and the next distinct total skips
/// ahead by the size of the tie.
pub fn competition_ranks<'a, I, K>(candidates: I, key: K) -> BTreeMap<CandidateId, u32>
where
    I: IntoIterator<Item = &'a CandidateSummary>,
    K: Fn(&CandidateSummary) -> Option<f64>,
{
    let mut scored: Vec<(&CandidateId, f64)> = candidates
        .into_iter()
        .filter_map(|summary| key(summary).map(|total| (&summary.candidate_id, total)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut ranks = BTreeMap::new();
    let mut current_rank: u32 = 0;
    let mut skip_count: u32 = 0;
    let mut previous: Option<f64> = None;

    for (candidate_id, total) in scored {
        match previous {
            Some(prev) if prev == total => skip_count += 1,
            _ => {
                current_rank += 1 + skip_count;
                skip_count = 0;
            }
        }
        previous = Some(total);
        ranks.insert(candidate_id.clone(), current_rank);
    }

    ranks
}

/// Fill raw and normalized ranks plus the induced rank change in place.
///
/// A positive `rank_change` means the candidate moved up once rater bias was
/// removed.
pub fn apply_ranks(summaries: &mut BTreeMap<CandidateId, CandidateSummary>) {
    let raw = competition_ranks(summaries.values(), |s| RankBasis::Raw.total(s));
    let normalized = competition_ranks(summaries.values(), |s| RankBasis::Normalized.total(s));

    for (candidate_id, summary) in summaries.iter_mut() {
        summary.raw_rank = raw.get(candidate_id).copied().unwrap_or(0);
        summary.normalized_rank = normalized.get(candidate_id).copied().unwrap_or(0);
        summary.rank_change = if summary.raw_rank > 0 && summary.normalized_rank > 0 {
            i64::from(summary.raw_rank) - i64::from(summary.normalized_rank)
        } else {
            0
        };
    }
}
