use anyhow::Context;
use attendance_scorer::{
    config::Settings,
    models::{AttendanceCounters, LeaderboardRow, ScoreResult},
    ranking::{decisive_rule, LeaderboardRanker},
    roster::load_roster,
    scoring::{ScoringAlgorithm, WeightOverrides},
};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "attendance-scorer")]
#[clap(about = "Score attendance records and build fairness leaderboards", long_about = None)]
struct Cli {
    /// Settings file (defaults to config/default and config/local if present)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with partial weight overrides
    #[clap(long, global = true)]
    weights: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single individual from counters
    Score {
        #[clap(flatten)]
        counters: CounterArgs,

        /// Print the result as JSON
        #[clap(long)]
        json: bool,
    },

    /// Rank every individual in a roster file
    Rank {
        /// JSON array of roster entries
        #[clap(short, long)]
        input: PathBuf,

        /// Override the configured minimum number of events
        #[clap(long)]
        min_events: Option<u32>,

        /// Leave out individuals below the minimum
        #[clap(long)]
        eligible_only: bool,

        /// Print the leaderboard as JSON
        #[clap(long)]
        json: bool,
    },

    /// Print the effective weight configuration
    Weights,
}

#[derive(Args)]
struct CounterArgs {
    /// Training presences, late arrivals included
    #[clap(long, default_value_t = 0)]
    training_present: u32,
    /// Late subset of training presences
    #[clap(long, default_value_t = 0)]
    training_late: u32,
    #[clap(long, default_value_t = 0)]
    training_absent: u32,
    #[clap(long, default_value_t = 0)]
    training_no_response: u32,
    /// Match presences, late arrivals included
    #[clap(long, default_value_t = 0)]
    match_present: u32,
    /// Late subset of match presences
    #[clap(long, default_value_t = 0)]
    match_late: u32,
    #[clap(long, default_value_t = 0)]
    match_absent: u32,
    #[clap(long, default_value_t = 0)]
    match_no_response: u32,
    #[clap(long, default_value_t = 0)]
    mvp_awards: u32,
}

impl From<CounterArgs> for AttendanceCounters {
    fn from(args: CounterArgs) -> Self {
        AttendanceCounters {
            training_present: args.training_present,
            training_late: args.training_late,
            training_absent: args.training_absent,
            training_no_response: args.training_no_response,
            match_present: args.match_present,
            match_late: args.match_late,
            match_absent: args.match_absent,
            match_no_response: args.match_no_response,
            mvp_awards: args.mvp_awards,
        }
    }
}

#[derive(Serialize)]
struct RankReport<'a> {
    scored_at: DateTime<Utc>,
    min_events: u32,
    excluded: usize,
    rows: &'a [LeaderboardRow],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::load(cli.config.as_deref()).context("Invalid settings")?;
    if let Some(path) = cli.weights.as_deref() {
        let overrides = read_overrides(path)?;
        settings = settings.with_weight_overrides(&overrides);
        settings.validate().context("Invalid weight overrides")?;
    }

    // Initialize logging; stdout is reserved for results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Effective settings: {:?}", settings);

    match cli.command {
        Commands::Score { counters, json } => {
            let counters = AttendanceCounters::from(counters);
            let algorithm = ScoringAlgorithm::new(settings.scoring.weights.clone())
                .with_min_events(settings.scoring.min_events);
            let result = algorithm.calculate_score(&counters);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_score(&result);
            }
        }

        Commands::Rank {
            input,
            min_events,
            eligible_only,
            json,
        } => {
            let roster = load_roster(&input)
                .with_context(|| format!("Failed to load roster {}", input.display()))?;
            let min_events = min_events.unwrap_or(settings.scoring.min_events);
            info!("Ranking {} with a minimum of {} events", input.display(), min_events);

            let ranker = LeaderboardRanker::new(settings.scoring.weights.clone(), min_events);
            let leaderboard = ranker.leaderboard(&roster, eligible_only);

            if json {
                let report = RankReport {
                    scored_at: Utc::now(),
                    min_events,
                    excluded: leaderboard.excluded,
                    rows: &leaderboard.rows,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_leaderboard(&leaderboard.rows);
                if leaderboard.excluded > 0 {
                    println!(
                        "\n{} individual(s) below {} events not shown",
                        leaderboard.excluded, min_events
                    );
                }
            }
        }

        Commands::Weights => {
            println!("{}", serde_json::to_string_pretty(&settings.scoring.weights)?);
        }
    }

    Ok(())
}

fn read_overrides(path: &Path) -> anyhow::Result<WeightOverrides> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read weight overrides {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid weight overrides in {}", path.display()))
}

fn print_score(result: &ScoreResult) {
    println!("Score:          {:.1} / 100", result.normalized_score);
    println!("Raw points:     {:.2}", result.raw_points);
    println!(
        "Opportunities:  {} (minimum {}{})",
        result.opportunities,
        result.min_events,
        if result.meets_minimum() { "" } else { ", not eligible" }
    );
    println!("No-response:    {:.1}%", result.no_response_rate * 100.0);
    println!("Match presence: {:.1}%", result.match_presence_rate * 100.0);
    println!("Match late:     {:.1}%", result.match_late_rate * 100.0);
    println!();

    for c in &result.breakdown.contributions {
        println!(
            "  {:<22} {:>4} x {:>5.2} = {:>7.2}",
            c.outcome.as_str(),
            c.count,
            c.weight,
            c.points
        );
    }
    if result.breakdown.mvp_bonus != 0.0 {
        println!("  {:<22} {:>24.2}", "MVP bonus", result.breakdown.mvp_bonus);
    }
    println!(
        "  range [{:.1}, {:.1}]",
        result.breakdown.min_points, result.breakdown.max_points
    );
}

fn print_leaderboard(rows: &[LeaderboardRow]) {
    println!(
        "{:>4}  {:<28} {:>6} {:>5} {:>7} {:>7} {:>7}  {}",
        "#", "Name", "Score", "Opps", "NoResp", "MPres", "MLate", "Decided by"
    );

    for (i, row) in rows.iter().enumerate() {
        let entry = &row.entry;
        let decided_by = match i.checked_sub(1).map(|prev| &rows[prev].entry) {
            Some(prev) => decisive_rule(prev, entry).map_or("tie", |rule| rule.as_str()),
            None => "",
        };

        println!(
            "{:>4}  {:<28} {:>6.1} {:>5} {:>6.1}% {:>6.1}% {:>6.1}%  {}{}",
            row.position,
            entry.identity.display_name(),
            entry.score.normalized_score,
            entry.score.opportunities,
            entry.score.no_response_rate * 100.0,
            entry.score.match_presence_rate * 100.0,
            entry.score.match_late_rate * 100.0,
            decided_by,
            if entry.eligible { "" } else { " (ineligible)" }
        );
    }
}
