use crate::models::{ClubReviewSummary, Opportunity, PlayerProfile, ScoredOpportunity};
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Save recruitment needs to a JSON cache file
pub fn save_needs_to_cache(needs: &[Opportunity], cache_file: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(needs).context("Failed to serialize needs")?;
    std::fs::write(cache_file, json).context("Failed to write cache file")?;
    Ok(())
}

/// Load recruitment needs from a JSON cache file
pub fn load_needs_from_cache(cache_file: &str) -> Result<Vec<Opportunity>> {
    let json = std::fs::read_to_string(cache_file).context("Failed to read cache file")?;
    let needs: Vec<Opportunity> =
        serde_json::from_str(&json).context("Failed to deserialize needs")?;
    Ok(needs)
}

/// Save per-club review summaries to a JSON cache file
pub fn save_reviews_to_cache(
    summaries: &HashMap<i64, ClubReviewSummary>,
    cache_file: &str,
) -> Result<()> {
    let json =
        serde_json::to_string_pretty(summaries).context("Failed to serialize review summaries")?;
    std::fs::write(cache_file, json)?;
    Ok(())
}

/// Load per-club review summaries from a JSON cache file
pub fn load_reviews_from_cache(cache_file: &str) -> Result<HashMap<i64, ClubReviewSummary>> {
    let json = std::fs::read_to_string(cache_file).context("Failed to read cache file")?;
    let summaries: HashMap<i64, ClubReviewSummary> =
        serde_json::from_str(&json).context("Failed to deserialize review summaries")?;
    Ok(summaries)
}

/// Load a player profile from a JSON file (cache or a hand-written profile)
pub fn load_profile_from_file(path: &str) -> Result<PlayerProfile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file {}", path))?;
    let profile: PlayerProfile =
        serde_json::from_str(&json).context("Failed to deserialize player profile")?;
    Ok(profile)
}

/// Save a player profile to a JSON cache file
pub fn save_profile_to_cache(profile: &PlayerProfile, cache_file: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
    std::fs::write(cache_file, json)?;
    Ok(())
}

/// Save the ranked opportunity list to CSV
pub fn save_scored_to_csv(scored: &[ScoredOpportunity], filename: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename).context("Failed to create CSV file")?;

    writer.write_record([
        "Club",
        "Position",
        "Fit Score",
        "Fit Band",
        "Salary Range",
        "Club Rating",
        "Reviews",
        "Posted",
        "Reasons",
    ])?;

    for entry in scored {
        let opp = &entry.opportunity;
        let reasons = entry
            .fit
            .reasons
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let score = entry.fit.score.to_string();
        let rating = opp
            .club_rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_default();
        let reviews = opp.review_count.to_string();
        let posted = opp.created_at.format("%Y-%m-%d").to_string();
        writer.write_record([
            opp.posting_club_name.as_str(),
            opp.position_needed.as_str(),
            score.as_str(),
            entry.band().label(),
            opp.salary_range.as_deref().unwrap_or(""),
            rating.as_str(),
            reviews.as_str(),
            posted.as_str(),
            reasons.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
