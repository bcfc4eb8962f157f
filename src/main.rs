use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analytics;
mod config;
mod db;
mod models;
mod profile;
mod report;
mod timeseries;

use config::Config;
use models::{GradedAnswer, InterviewSession};

#[derive(Parser)]
#[command(name = "interview-analytics")]
#[command(about = "Performance analytics for mock interview practice", long_about = None)]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,
    /// Optional TOML file with profile and report settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load sample interviews and answers
    Seed,
    /// Import graded answers from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Show dashboard statistics with trends
    Summary {
        #[arg(long)]
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Show performance over time and interviews by day
    Trends {
        #[arg(long)]
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Show profile statistics
    Profile {
        #[arg(long)]
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn fetch_history(
    pool: &PgPool,
    email: &str,
) -> anyhow::Result<(Vec<InterviewSession>, Vec<GradedAnswer>)> {
    let interviews = db::fetch_interviews(pool, email).await?;
    let answers = db::fetch_answers(pool, email).await?;
    info!(
        interviews = interviews.len(),
        answers = answers.len(),
        "loaded history for {email}"
    );
    Ok((interviews, answers))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let database_url = cli
        .database_url
        .context("DATABASE_URL must be set to a Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            info!(inserted, "import finished");
            println!("Inserted {inserted} answers from {}.", csv.display());
        }
        Commands::Summary { email, json } => {
            let (interviews, answers) = fetch_history(&pool, &email).await?;
            let summary = analytics::compute_summary(&interviews, &answers);

            if json {
                return print_json(&summary);
            }

            for (title, metric) in [
                ("Total Interviews", &summary.total_interviews),
                ("Avg. Score", &summary.average_score),
                ("Best Performance", &summary.best_performance),
                ("Improvement", &summary.improvement),
            ] {
                println!(
                    "{:<18} {:>7}  {} {}",
                    title,
                    metric.value,
                    metric.trend.display_value,
                    metric.trend.direction.arrow()
                );
            }
        }
        Commands::Trends { email, json } => {
            let answers = db::fetch_answers(&pool, &email).await?;
            let series = timeseries::compute_time_series(&answers);

            if json {
                return print_json(&series);
            }

            if series.performance_by_date.is_empty() {
                println!("No scored answers found for {email}.");
                return Ok(());
            }

            println!("Performance over time:");
            for point in series.performance_by_date.iter() {
                println!("- {} ({}) score {}%", point.label, point.interview_ref, point.score);
            }
            println!("Interviews by day:");
            for bucket in series.interviews_by_date.iter() {
                println!("- {}: {}", bucket.label, bucket.count);
            }
        }
        Commands::Profile { email, json } => {
            let (interviews, answers) = fetch_history(&pool, &email).await?;
            let stats = profile::compute_profile(&interviews, &answers, &config.profile);

            if json {
                return print_json(&stats);
            }

            println!("Total interviews: {}", stats.total_interviews);
            println!("Average score: {}%", stats.average_score);
            println!("Total time: {} mins", stats.practice_minutes);
            println!("Level: {:?}", stats.level);
            println!("Badges: {}", stats.badges.join(", "));
        }
        Commands::Report { email, out } => {
            let (interviews, answers) = fetch_history(&pool, &email).await?;
            let report = report::build_report(
                &email,
                &analytics::compute_summary(&interviews, &answers),
                &timeseries::compute_time_series(&answers),
                &profile::compute_profile(&interviews, &answers, &config.profile),
                &interviews,
                &answers,
                &config.report,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
