use std::collections::BTreeMap;

use super::super::domain::{Dimension, RaterCalibration, RaterId, RawRating};
use super::summary::Leaderboard;
use super::views::{RankShiftView, RankingInsights, RaterProfile, RaterTendency};

/// Points a rater's average must sit from the pool before being called harsh or lenient.
pub const TENDENCY_THRESHOLD: f64 = 5.0;

#[derive(Default)]
struct RaterTally<'a> {
    name: Option<&'a str>,
    ratings: usize,
    complete: usize,
    flagged: bool,
}

pub(crate) fn rater_profiles(
    ratings: &[RawRating],
    calibrations: &BTreeMap<RaterId, RaterCalibration>,
) -> Vec<RaterProfile> {
    let pool_means = Dimension::ALL.map(|dimension| {
        let values: Vec<f64> = ratings
            .iter()
            .filter_map(|rating| rating.value(dimension))
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    });

    let mut tallies: BTreeMap<&RaterId, RaterTally<'_>> = BTreeMap::new();
    for rating in ratings {
        let tally = tallies.entry(&rating.rater_id).or_default();
        tally.ratings += 1;
        if rating.is_complete() {
            tally.complete += 1;
        }
        tally.flagged |= rating.is_flagged();
        if tally.name.is_none() {
            tally.name = rating
                .rater_name
                .as_deref()
                .filter(|name| !name.trim().is_empty());
        }
    }

    calibrations
        .iter()
        .map(|(rater_id, calibration)| {
            let tally = tallies.remove(rater_id).unwrap_or_default();
            let mean_offset = mean_offset(calibration, &pool_means);
            let tendency = classify(mean_offset);
            RaterProfile {
                rater_id: rater_id.clone(),
                rater_name: tally.name.map(str::to_string),
                ratings: tally.ratings,
                complete_ratings: tally.complete,
                flagged: tally.flagged,
                calibration: *calibration,
                mean_offset,
                tendency,
                tendency_label: tendency.label(),
            }
        })
        .collect()
}

fn mean_offset(calibration: &RaterCalibration, pool_means: &[Option<f64>; 3]) -> Option<f64> {
    let offsets: Vec<f64> = Dimension::ALL
        .iter()
        .zip(pool_means)
        .filter_map(|(dimension, pool_mean)| {
            let own = calibration.dimension(*dimension);
            match pool_mean {
                Some(pool) if own.sample_count >= 2 => Some(own.mean - pool),
                _ => None,
            }
        })
        .collect();

    if offsets.is_empty() {
        None
    } else {
        Some(offsets.iter().sum::<f64>() / offsets.len() as f64)
    }
}

fn classify(mean_offset: Option<f64>) -> RaterTendency {
    match mean_offset {
        None => RaterTendency::InsufficientData,
        Some(offset) if offset <= -TENDENCY_THRESHOLD => RaterTendency::Harsh,
        Some(offset) if offset >= TENDENCY_THRESHOLD => RaterTendency::Lenient,
        Some(_) => RaterTendency::Neutral,
    }
}

pub(crate) fn generate_insights(
    leaderboard: &Leaderboard,
    raters: &[RaterProfile],
) -> RankingInsights {
    let ranked_candidates = leaderboard.ranked().count();
    let unranked_candidates = leaderboard.unranked().count();

    let largest_rise = leaderboard
        .ranked()
        .filter(|entry| entry.rank_change > 0)
        .max_by(|a, b| {
            a.rank_change
                .cmp(&b.rank_change)
                .then_with(|| b.candidate_id.cmp(&a.candidate_id))
        })
        .map(|entry| RankShiftView {
            candidate_id: entry.candidate_id.clone(),
            rank_change: entry.rank_change,
        });

    let largest_drop = leaderboard
        .ranked()
        .filter(|entry| entry.rank_change < 0)
        .min_by(|a, b| {
            a.rank_change
                .cmp(&b.rank_change)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        })
        .map(|entry| RankShiftView {
            candidate_id: entry.candidate_id.clone(),
            rank_change: entry.rank_change,
        });

    let mut observations = Vec::new();
    for rater in raters {
        let Some(offset) = rater.mean_offset else {
            continue;
        };
        match rater.tendency {
            RaterTendency::Harsh => observations.push(format!(
                "{} scores {:.1} points below the pool average",
                rater.display_name(),
                offset.abs()
            )),
            RaterTendency::Lenient => observations.push(format!(
                "{} scores {:.1} points above the pool average",
                rater.display_name(),
                offset
            )),
            _ => {}
        }
    }

    if let Some(rise) = &largest_rise {
        observations.push(format!(
            "{} moved up {} place(s) after normalization",
            rise.candidate_id.0, rise.rank_change
        ));
    }
    if let Some(drop) = &largest_drop {
        observations.push(format!(
            "{} moved down {} place(s) after normalization",
            drop.candidate_id.0,
            drop.rank_change.abs()
        ));
    }
    if unranked_candidates > 0 {
        observations.push(format!(
            "{unranked_candidates} candidate(s) lack a complete rating and remain unranked"
        ));
    }

    RankingInsights {
        ranked_candidates,
        unranked_candidates,
        largest_rise,
        largest_drop,
        observations,
    }
}
