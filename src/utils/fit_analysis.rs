use crate::models::{Opportunity, PlayerProfile, ScoredOpportunity};
use crate::utils::fit_score::calculate_fit;

/// Score every opportunity for the given player and sort descending by fit.
///
/// The sort is stable, so opportunities with equal scores keep the order
/// they arrived in from the backend.
pub fn score_opportunities(
    opportunities: &[Opportunity],
    profile: &PlayerProfile,
) -> Vec<ScoredOpportunity> {
    let mut scored: Vec<ScoredOpportunity> = opportunities
        .iter()
        .map(|opportunity| ScoredOpportunity {
            opportunity: opportunity.clone(),
            fit: calculate_fit(opportunity, profile),
        })
        .collect();

    scored.sort_by(|a, b| b.fit.score.cmp(&a.fit.score));
    scored
}

/// Top N scored opportunities for display
pub fn top_opportunities(
    opportunities: &[Opportunity],
    profile: &PlayerProfile,
    top_n: usize,
) -> Vec<ScoredOpportunity> {
    score_opportunities(opportunities, profile)
        .into_iter()
        .take(top_n)
        .collect()
}
