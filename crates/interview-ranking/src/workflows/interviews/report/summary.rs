use super::super::domain::CandidateSummary;
use super::super::engine::RankingOutcome;
use super::views::{LeaderboardEntry, Movement};
use serde::Serialize;

/// Candidates in display order: normalized rank first, unranked last.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn from_outcome(outcome: &RankingOutcome) -> Self {
        let mut summaries: Vec<&CandidateSummary> = outcome.summaries.values().collect();
        summaries.sort_by_key(|summary| {
            (
                rank_sort_key(summary.normalized_rank),
                rank_sort_key(summary.raw_rank),
                summary.candidate_id.clone(),
            )
        });

        let entries = summaries.into_iter().map(entry_for).collect();
        Self { entries }
    }

    pub fn ranked(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.iter().filter(|entry| entry.normalized_rank > 0)
    }

    pub fn unranked(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.iter().filter(|entry| entry.normalized_rank == 0)
    }
}

fn rank_sort_key(rank: u32) -> u32 {
    if rank == 0 {
        u32::MAX
    } else {
        rank
    }
}

fn entry_for(summary: &CandidateSummary) -> LeaderboardEntry {
    let movement = Movement::from_rank_change(
        summary.raw_rank,
        summary.normalized_rank,
        summary.rank_change,
    );
    LeaderboardEntry {
        candidate_id: summary.candidate_id.clone(),
        normalized_rank: summary.normalized_rank,
        raw_rank: summary.raw_rank,
        rank_change: summary.rank_change,
        normalized_total: summary.normalized_total,
        raw_total: summary.raw_total,
        contributing_ratings: summary.contributing_ratings,
        movement,
        movement_label: movement.label(),
    }
}
