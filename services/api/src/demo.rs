use clap::Args;
use interview_ranking::error::AppError;
use interview_ranking::workflows::import::RatingCsvImporter;
use interview_ranking::workflows::interviews::report::views::RaterProfile;
use interview_ranking::workflows::interviews::{
    ExclusionPolicy, NormalizedRating, RankingOptions, RankingReport, RawRating,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Rating CSV export (Candidate ID, Rater ID, Rater Name, D1, D2, D3)
    #[arg(long)]
    pub(crate) ratings: PathBuf,
    /// Leave ratings marked for exclusion out of candidate totals
    #[arg(long)]
    pub(crate) exclude_flagged: bool,
    /// Print the full report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
    /// Include per-rater calibration and tendency
    #[arg(long)]
    pub(crate) show_raters: bool,
    /// Include every normalized rating in the output
    #[arg(long)]
    pub(crate) include_ratings: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leave the resident's flagged ratings out of candidate totals
    #[arg(long)]
    pub(crate) exclude_flagged: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        ratings,
        exclude_flagged,
        json,
        show_raters,
        include_ratings,
    } = args;

    let ratings = RatingCsvImporter::from_path(&ratings)?;
    let options = RankingOptions {
        exclusion: ExclusionPolicy::from_flag(exclude_flagged),
        roster: Vec::new(),
        include_ratings,
    };
    let report = RankingReport::build(&ratings, &options);

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    render_report(&report, show_raters);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let ratings = synthetic_interview_day();
    let options = RankingOptions {
        exclusion: ExclusionPolicy::from_flag(args.exclude_flagged),
        roster: Vec::new(),
        include_ratings: true,
    };
    let report = RankingReport::build(&ratings, &options);

    println!("Interview ranking demo");
    println!(
        "- {} ratings from {} interviewers | exclusion policy: {}",
        ratings.len(),
        report.raters.len(),
        report.exclusion.label()
    );
    println!("Dr. Stone scores low across the board; Dr. Sunny scores high.");

    render_report(&report, true);
    Ok(())
}

fn render_report(report: &RankingReport, show_raters: bool) {
    println!("\nLeaderboard (normalized rank | raw rank | movement)");
    for entry in &report.leaderboard.entries {
        if entry.normalized_rank == 0 {
            println!(
                "  --  {:<12} unranked ({} contributing ratings)",
                entry.candidate_id, entry.contributing_ratings
            );
            continue;
        }
        println!(
            "  #{:<3} {:<12} normalized {:>6} | raw #{:<3} {:>6} | {} ({:+})",
            entry.normalized_rank,
            entry.candidate_id,
            format_total(entry.normalized_total),
            entry.raw_rank,
            format_total(entry.raw_total),
            entry.movement_label,
            entry.rank_change
        );
    }

    if show_raters && !report.raters.is_empty() {
        println!("\nInterviewers");
        for rater in &report.raters {
            render_rater(rater);
        }
    }

    if let Some(ratings) = &report.ratings {
        println!("\nNormalized ratings");
        for rating in ratings {
            render_rating(rating);
        }
    }

    if !report.insights.observations.is_empty() {
        println!("\nObservations");
        for line in &report.insights.observations {
            println!("  - {line}");
        }
    }
}

fn render_rater(rater: &RaterProfile) {
    let offset = rater
        .mean_offset
        .map(|offset| format!("{offset:+.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "  - {}: {} ratings ({} complete) | offset {} | {}{}",
        rater.display_name(),
        rater.ratings,
        rater.complete_ratings,
        offset,
        rater.tendency_label,
        if rater.flagged { " | flagged" } else { "" }
    );
    println!(
        "      D1 {:.1}±{:.1} | D2 {:.1}±{:.1} | D3 {:.1}±{:.1}",
        rater.calibration.d1.mean,
        rater.calibration.d1.std_dev,
        rater.calibration.d2.mean,
        rater.calibration.d2.std_dev,
        rater.calibration.d3.mean,
        rater.calibration.d3.std_dev
    );
}

fn render_rating(rating: &NormalizedRating) {
    println!(
        "  - {} by {}: raw {} -> normalized {}{}",
        rating.candidate_id,
        rating.rater_name.as_deref().unwrap_or(&rating.rater_id.0),
        format_total(rating.raw_total),
        format_total(rating.normalized_total),
        if rating.is_flagged() { " (flagged)" } else { "" }
    );
}

fn format_total(total: Option<f64>) -> String {
    total
        .map(|value| format!("{value:.0}"))
        .unwrap_or_else(|| "-".to_string())
}

fn synthetic_interview_day() -> Vec<RawRating> {
    let stone = |candidate: &str, d1, d2, d3| {
        RawRating::new(candidate, "stone", Some(d1), Some(d2), Some(d3)).with_rater_name("Dr. Stone")
    };
    let sunny = |candidate: &str, d1, d2, d3| {
        RawRating::new(candidate, "sunny", Some(d1), Some(d2), Some(d3)).with_rater_name("Dr. Sunny")
    };
    let resident = |candidate: &str, d1, d2, d3| {
        RawRating::new(candidate, "pgy2-lee", Some(d1), Some(d2), Some(d3))
            .with_rater_name("Lee (PGY-2)")
            .with_exclude_flag(true)
    };

    vec![
        stone("avery", 58.0, 61.0, 55.0),
        stone("blake", 52.0, 50.0, 49.0),
        stone("casey", 63.0, 60.0, 64.0),
        sunny("devon", 84.0, 86.0, 82.0),
        sunny("emery", 90.0, 88.0, 91.0),
        sunny("finley", 80.0, 79.0, 83.0),
        resident("avery", 75.0, 72.0, 78.0),
        resident("emery", 70.0, 74.0, 71.0),
        RawRating::new("gray", "stone", Some(57.0), None, Some(59.0)).with_rater_name("Dr. Stone"),
    ]
}
