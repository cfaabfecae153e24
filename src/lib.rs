pub mod api;
pub mod models;
pub mod utils;

pub use api::*;
pub use models::*;
pub use utils::*;

use anyhow::{Context, Result};
use api::recruit_api::RecruitApiClient;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use utils::data::{
    load_needs_from_cache, load_profile_from_file, load_reviews_from_cache, save_needs_to_cache,
    save_profile_to_cache, save_reviews_to_cache,
};
use utils::fit_analysis::score_opportunities;

/// Fetch open recruitment needs plus per-club review summaries and return
/// them scored for the player, best fit first.
///
/// The profile normally comes from the signed-in player's stored record
/// (`PLAYER_ID`); `profile_override` replaces it, e.g. for a local profile
/// file passed on the command line.
pub async fn fetch_scored_opportunities(
    use_cache: bool,
    profile_override: Option<PlayerProfile>,
) -> Result<Vec<ScoredOpportunity>> {
    // Load .env file
    dotenv::dotenv().ok();

    let base_url =
        std::env::var("RECRUIT_API_URL").context("RECRUIT_API_URL not set in .env file")?;
    let api_key =
        std::env::var("RECRUIT_API_KEY").context("RECRUIT_API_KEY not set in .env file")?;
    let client = RecruitApiClient::new(base_url, api_key);

    // Cache file paths
    let needs_cache_file = "cache/needs_cache.json";
    let reviews_cache_file = "cache/reviews_cache.json";
    let profile_cache_file = "cache/profile_cache.json";

    let mut needs = if use_cache && Path::new(needs_cache_file).exists() {
        tracing::info!("loading recruitment needs from cache file {}", needs_cache_file);
        load_needs_from_cache(needs_cache_file)?
    } else {
        let needs = client
            .fetch_recruitment_needs()
            .await
            .context("Failed to fetch recruitment needs")?;
        std::fs::create_dir_all("cache").ok();
        save_needs_to_cache(&needs, needs_cache_file)?;
        tracing::info!("saved recruitment needs to cache file {}", needs_cache_file);
        needs
    };

    let summaries = if use_cache && Path::new(reviews_cache_file).exists() {
        tracing::info!("loading review summaries from cache file {}", reviews_cache_file);
        load_reviews_from_cache(reviews_cache_file)?
    } else {
        // One summary per posting club, deduplicated across needs
        let club_ids: BTreeSet<i64> = needs.iter().map(|n| n.created_by_club_id).collect();

        let mut summaries = HashMap::new();
        for club_id in club_ids {
            match client.fetch_club_review_summary(club_id).await {
                Ok(summary) => {
                    summaries.insert(club_id, summary);
                }
                // A club without a reachable summary still gets listed,
                // the rating rule just stays silent for it
                Err(e) => {
                    tracing::warn!(club_id, error = %e, "could not fetch club review summary");
                }
            }
        }
        std::fs::create_dir_all("cache").ok();
        save_reviews_to_cache(&summaries, reviews_cache_file)?;
        summaries
    };

    // Attach the joined attributes the scorer reads
    for need in &mut needs {
        if let Some(summary) = summaries.get(&need.created_by_club_id) {
            need.club_rating = summary.average_rating;
            need.review_count = summary.review_count;
            need.club_logo_url = summary.logo_url.clone();
        }
    }

    let profile = match profile_override {
        Some(profile) => profile,
        None if use_cache && Path::new(profile_cache_file).exists() => {
            tracing::info!("loading player profile from cache file {}", profile_cache_file);
            load_profile_from_file(profile_cache_file)?
        }
        None => {
            let player_id: i64 = std::env::var("PLAYER_ID")
                .context("PLAYER_ID not set in .env file")?
                .parse()
                .context("PLAYER_ID is not a valid id")?;
            let profile = client
                .fetch_player_profile(player_id)
                .await
                .context("Failed to fetch player profile")?;
            std::fs::create_dir_all("cache").ok();
            save_profile_to_cache(&profile, profile_cache_file)?;
            profile
        }
    };

    Ok(score_opportunities(&needs, &profile))
}
