use crate::demo::{run_demo, run_rank, DemoArgs, RankArgs};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use interview_ranking::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Interview Ranking",
    about = "Normalize interviewer ratings and rank candidates from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank candidates from a rating CSV export
    Rank(RankArgs),
    /// Walk through a synthetic interview day with a harsh and a lenient rater
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Rating CSV exports to serve as sessions, keyed by file stem
    #[arg(long = "session")]
    pub(crate) sessions: Vec<PathBuf>,
    /// Interview date recorded for loaded sessions (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) interview_date: Option<NaiveDate>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_command_parses_flags() {
        let cli = Cli::try_parse_from([
            "interview-ranking",
            "rank",
            "--ratings",
            "day.csv",
            "--exclude-flagged",
            "--show-raters",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.ratings, PathBuf::from("day.csv"));
                assert!(args.exclude_flagged);
                assert!(args.show_raters);
                assert!(!args.json);
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_repeated_sessions() {
        let cli = Cli::try_parse_from([
            "interview-ranking",
            "serve",
            "--session",
            "a.csv",
            "--session",
            "b.csv",
            "--interview-date",
            "2026-01-09",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.sessions.len(), 2);
                assert_eq!(args.interview_date, NaiveDate::from_ymd_opt(2026, 1, 9));
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["interview-ranking"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
