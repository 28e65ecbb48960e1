use ant_forager::prelude::*;
use ant_forager::session::{self, SessionSummary};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.quiet);

    let summary = session::run(&args)?;
    print_summary(&summary);

    Ok(())
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_summary(summary: &SessionSummary) {
    let stats = &summary.stats;
    let score = stats
        .score
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    println!(
        "\n{}\n{} {} {} {} {} {} {} {}",
        "===".bright_blue().bold(),
        "🐜 Session ended:".green().bold(),
        summary.reason.to_string().yellow(),
        "|".dimmed(),
        format!("games={}", stats.games).cyan(),
        format!("turns={}", stats.turns).cyan(),
        format!("moves={}", stats.moves_sent).cyan(),
        format!("deliveries={}", stats.deliveries).cyan(),
        format!("score={}", score).cyan(),
    );
}
