use anyhow::{Context, Result};
use clap::Parser;
use recruit_fit::data::{load_profile_from_file, save_scored_to_csv};
use recruit_fit::fetch_scored_opportunities;
use std::path::PathBuf;

/// Rank open recruitment opportunities by fit for a player
#[derive(Debug, Parser)]
#[command(name = "recruit-fit")]
struct Args {
    /// Reuse cached needs, reviews and profile instead of refetching
    #[arg(long)]
    use_cache: bool,

    /// Save the ranked list to cache/scored_opportunities.csv
    #[arg(long)]
    save_csv: bool,

    /// How many opportunities to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Load the player profile from a local JSON file instead of the API
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    println!("Recruitment Opportunity Fit Ranking\n");
    println!("Fetching recruitment needs and club reviews...\n");

    let profile_override = match &args.profile {
        Some(path) => {
            let path = path.to_str().context("Profile path is not valid UTF-8")?;
            Some(load_profile_from_file(path)?)
        }
        None => None,
    };

    let scored = fetch_scored_opportunities(args.use_cache, profile_override)
        .await
        .context("Failed to build the scored opportunity list")?;

    if scored.is_empty() {
        println!("No open recruitment needs found.");
        return Ok(());
    }

    println!("Top {} opportunities by fit:\n", scored.len().min(args.top));
    for (i, entry) in scored.iter().take(args.top).enumerate() {
        println!("{}. {}", i + 1, entry.format());
        for reason in &entry.fit.reasons {
            println!("   - {}", reason.text);
        }
    }

    if args.save_csv {
        save_scored_to_csv(&scored, "cache/scored_opportunities.csv")?;
        println!("\nSaved ranked opportunities to cache/scored_opportunities.csv");
    }

    Ok(())
}
