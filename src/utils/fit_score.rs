use crate::models::{FitReason, FitResult, Opportunity, PlayerProfile};

/// Score a player starts from before any rule contributes
const BASE_SCORE: f64 = 60.0;

/// Hard ceiling, leaves headroom below a perfect 100
const MAX_SCORE: u32 = 95;

const EXACT_POSITION_BONUS: f64 = 25.0;
const SIMILAR_POSITION_BONUS: f64 = 10.0;
const SALARY_EXACT_BONUS: f64 = 15.0;
const SALARY_COMPETITIVE_BONUS: f64 = 8.0;
const COUNTRY_BONUS: f64 = 12.0;
const RATING_HIGH_BONUS: f64 = 15.0;
const RATING_SOLID_BONUS: f64 = 8.0;

/// Canned club-appeal statements drawn by the seeded generator.
/// Placeholder for a real ranking signal, see `random_club_appeal_bonuses`.
const CLUB_APPEAL_POOL: [&str; 10] = [
    "Club has a strong track record of developing players at your level",
    "Squad is on an upward trajectory in its league",
    "Excellent coaching staff with a clear playing philosophy",
    "Plenty of first-team minutes available in this position",
    "Modern training facilities and medical support",
    "Strong scouting visibility for standout performances",
    "Club regularly competes for continental qualification",
    "Stable ownership and reliable wage payments",
    "Passionate supporter base and strong matchday atmosphere",
    "Good record of moving players on to bigger leagues",
];

/// Positions considered adjacent to the given one for scoring purposes.
/// Goalkeeper intentionally maps to nothing.
fn similar_positions(position: &str) -> &'static [&'static str] {
    match position {
        "Centre Back" => &["Full Back", "Defensive Midfielder"],
        "Full Back" => &["Centre Back", "Winger"],
        "Defensive Midfielder" => &["Centre Back", "Central Midfielder"],
        "Central Midfielder" => &["Defensive Midfielder", "Attacking Midfielder"],
        "Attacking Midfielder" => &["Central Midfielder", "Centre Forward", "Winger"],
        "Winger" => &["Centre Forward", "Attacking Midfielder", "Full Back"],
        "Centre Forward" => &["Winger", "Attacking Midfielder"],
        _ => &[],
    }
}

/// Resolve a club's country from known club-name fragments
fn club_country(club_name: &str) -> Option<&'static str> {
    const FRAGMENTS: [(&str, &str); 12] = [
        ("Valencia", "Spain"),
        ("Sevilla", "Spain"),
        ("Porto", "Portugal"),
        ("Braga", "Portugal"),
        ("Ajax", "Netherlands"),
        ("Feyenoord", "Netherlands"),
        ("Marseille", "France"),
        ("Toulouse", "France"),
        ("Leeds", "England"),
        ("Brentford", "England"),
        ("Genoa", "Italy"),
        ("Torino", "Italy"),
    ];

    FRAGMENTS
        .iter()
        .find(|(fragment, _)| club_name.contains(fragment))
        .map(|&(_, country)| country)
}

/// Deterministic fraction in [0, 1) from a numeric seed plus offset.
/// Same formula the product UI uses, so scores stay stable across re-renders.
fn seeded_fraction(seed: f64, offset: f64) -> f64 {
    let x = (seed + offset).sin() * 10000.0;
    x - x.floor()
}

/// Deterministic value in [min, max) from the seed
fn seeded_range(seed: f64, offset: f64, min: f64, max: f64) -> f64 {
    seeded_fraction(seed, offset) * (max - min) + min
}

/// Seed derived from the need id and the player's primary position
fn derive_seed(opportunity: &Opportunity, profile: &PlayerProfile) -> f64 {
    let position_char = profile
        .playing_positions
        .first()
        .and_then(|p| p.chars().next())
        .map(|c| c as u32)
        .unwrap_or(0);

    opportunity.need_id as f64 + position_char as f64
}

/// Draw 1-3 canned club-appeal reasons, each worth 3-8 points.
///
/// Duplicate draws are skipped without retry, so fewer distinct reasons may
/// land than were drawn. This is seeded mock appeal, not a real signal;
/// swap this function out when one exists.
fn random_club_appeal_bonuses(seed: f64, reasons: &mut Vec<FitReason>) -> f64 {
    let num_reasons = seeded_range(seed, 0.0, 1.0, 4.0).floor() as usize;

    let mut picked = Vec::new();
    let mut bonus = 0.0;
    for i in 0..num_reasons {
        let draw = seeded_range(seed, 10.0 + i as f64, 0.0, CLUB_APPEAL_POOL.len() as f64);
        let idx = (draw.floor() as usize).min(CLUB_APPEAL_POOL.len() - 1);
        if picked.contains(&idx) {
            continue;
        }
        picked.push(idx);
        reasons.push(FitReason::new("sparkles", CLUB_APPEAL_POOL[idx]));
        bonus += seeded_range(seed, 20.0 + i as f64, 3.0, 8.0);
    }

    bonus
}

fn contains_currency_symbol(s: &str) -> bool {
    s.contains('€') || s.contains('£') || s.contains('$')
}

/// Compute the fit score and its justifications for one opportunity.
///
/// Pure and total: missing optional fields skip their rule rather than
/// erroring, every rule only adds points, and the final score is rounded
/// and clamped to [0, 95].
pub fn calculate_fit(opportunity: &Opportunity, profile: &PlayerProfile) -> FitResult {
    let seed = derive_seed(opportunity, profile);

    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    // Position match, exact beats adjacent
    let needed = opportunity.position_needed.as_str();
    if profile.playing_positions.iter().any(|p| p == needed) {
        score += EXACT_POSITION_BONUS;
        reasons.push(FitReason::new(
            "target",
            format!("Perfect position match: the club needs a {}", needed),
        ));
    } else if let Some(owned) = profile
        .playing_positions
        .iter()
        .find(|p| similar_positions(p.as_str()).contains(&needed))
    {
        score += SIMILAR_POSITION_BONUS;
        reasons.push(FitReason::new(
            "shuffle",
            format!("Your experience as a {} translates well to {}", owned, needed),
        ));
    }

    // Salary alignment, desired range falls back to the current one
    let wanted = profile
        .desired_salary_range
        .as_deref()
        .or(profile.current_salary_range.as_deref());
    if let (Some(wanted), Some(offered)) = (wanted, opportunity.salary_range.as_deref()) {
        if wanted == offered {
            score += SALARY_EXACT_BONUS;
            reasons.push(FitReason::new(
                "banknote",
                format!("Salary range {} perfectly matches what you are after", offered),
            ));
        } else if contains_currency_symbol(wanted) && contains_currency_symbol(offered) {
            score += SALARY_COMPETITIVE_BONUS;
            reasons.push(FitReason::new(
                "banknote",
                "Club offers a competitive salary for this position",
            ));
        }
    }

    score += random_club_appeal_bonuses(seed, &mut reasons);

    // Country preference
    if let Some(country) = club_country(&opportunity.posting_club_name) {
        if profile.preferred_countries.iter().any(|c| c == country) {
            score += COUNTRY_BONUS;
            reasons.push(FitReason::new(
                "map-pin",
                format!("Based in {}, one of your preferred countries", country),
            ));
        }
    }

    // Club reputation from aggregated reviews
    if let Some(rating) = opportunity.club_rating {
        if rating >= 4.0 && opportunity.review_count >= 4 {
            score += RATING_HIGH_BONUS;
            reasons.push(FitReason::new(
                "star",
                format!(
                    "Highly rated club: {:.1}/5 from {} player reviews",
                    rating, opportunity.review_count
                ),
            ));
        } else if rating >= 3.5 {
            score += RATING_SOLID_BONUS;
            reasons.push(FitReason::new(
                "star",
                "Well regarded club among players who have been there",
            ));
        }
    }

    FitResult {
        score: (score.round() as u32).min(MAX_SCORE),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn opportunity(need_id: i64) -> Opportunity {
        Opportunity {
            need_id,
            position_needed: "Centre Forward".to_string(),
            min_age: None,
            max_age: None,
            salary_range: None,
            preferred_foot: None,
            created_by_club_id: 7,
            posting_club_name: "FC Testhausen".to_string(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            club_rating: None,
            review_count: 0,
            club_logo_url: None,
        }
    }

    fn profile(positions: &[&str]) -> PlayerProfile {
        PlayerProfile {
            playing_positions: positions.iter().map(|p| p.to_string()).collect(),
            preferred_countries: Vec::new(),
            current_salary_range: None,
            desired_salary_range: None,
            languages: Vec::new(),
        }
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let opp = opportunity(17);
        let prof = profile(&["Winger"]);

        let first = calculate_fit(&opp, &prof);
        let second = calculate_fit(&opp, &prof);

        assert_eq!(first.score, second.score);
        assert_eq!(first.reasons, second.reasons);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        // Sweep a range of seeds; every score must land in [60, 95]
        for need_id in 0..200 {
            for positions in [&["Goalkeeper"][..], &["Winger"][..], &[][..]] {
                let opp = opportunity(need_id);
                let fit = calculate_fit(&opp, &profile(positions));
                assert!(fit.score >= 60, "score {} below base for need {}", fit.score, need_id);
                assert!(fit.score <= 95, "score {} above cap for need {}", fit.score, need_id);
            }
        }
    }

    #[test]
    fn test_base_case_only_appeal_reasons() {
        // No position match, no salary, no country, no rating: only the
        // seeded club-appeal draws contribute on top of the base 60.
        let opp = opportunity(5);
        let fit = calculate_fit(&opp, &profile(&["Goalkeeper"]));

        assert!(fit.score >= 60);
        assert!(!fit.reasons.is_empty());
        assert!(fit.reasons.len() <= 3);
        assert!(fit.reasons.iter().all(|r| r.icon == "sparkles"));
    }

    #[test]
    fn test_exact_position_match_adds_25() {
        let prof = profile(&["Winger"]);

        let mut matched = opportunity(33);
        matched.position_needed = "Winger".to_string();
        let mut unmatched = opportunity(33);
        // Not adjacent to Winger, and the seed only depends on the player's
        // primary position so both runs share the same appeal draws
        unmatched.position_needed = "Goalkeeper".to_string();

        let with_match = calculate_fit(&matched, &prof);
        let without = calculate_fit(&unmatched, &prof);

        assert_eq!(with_match.score - without.score, 25);
        assert!(with_match
            .reasons
            .iter()
            .any(|r| r.text.contains("Perfect position match")));
        assert!(!without
            .reasons
            .iter()
            .any(|r| r.text.contains("Perfect position match")));
    }

    #[test]
    fn test_similar_position_adds_10() {
        let prof = profile(&["Winger"]);

        let mut adjacent = opportunity(12);
        adjacent.position_needed = "Centre Forward".to_string();
        let mut unrelated = opportunity(12);
        unrelated.position_needed = "Goalkeeper".to_string();

        let near = calculate_fit(&adjacent, &prof);
        let far = calculate_fit(&unrelated, &prof);

        assert_eq!(near.score - far.score, 10);
        assert!(near.reasons.iter().any(|r| r.text.contains("translates well")));
    }

    #[test]
    fn test_goalkeeper_has_no_similarity_bonus() {
        let prof = profile(&["Goalkeeper"]);

        for needed in [
            "Centre Back",
            "Full Back",
            "Defensive Midfielder",
            "Central Midfielder",
            "Attacking Midfielder",
            "Winger",
            "Centre Forward",
        ] {
            let mut opp = opportunity(64);
            opp.position_needed = needed.to_string();
            let fit = calculate_fit(&opp, &prof);
            assert!(
                !fit.reasons.iter().any(|r| r.text.contains("translates well")),
                "goalkeeper got an adjacency bonus against {}",
                needed
            );
        }
    }

    #[test]
    fn test_salary_exact_and_competitive_tiers() {
        let mut prof = profile(&["Goalkeeper"]);
        prof.desired_salary_range = Some("€2k-3k".to_string());

        let no_salary = opportunity(9);
        let mut exact = opportunity(9);
        exact.salary_range = Some("€2k-3k".to_string());
        let mut close = opportunity(9);
        close.salary_range = Some("€4k-5k".to_string());

        let baseline = calculate_fit(&no_salary, &prof);
        let exact_fit = calculate_fit(&exact, &prof);
        let close_fit = calculate_fit(&close, &prof);

        assert_eq!(exact_fit.score - baseline.score, 15);
        assert!(exact_fit.reasons.iter().any(|r| r.text.contains("perfectly matches")));
        assert_eq!(close_fit.score - baseline.score, 8);
        assert!(close_fit.reasons.iter().any(|r| r.text.contains("competitive salary")));
    }

    #[test]
    fn test_salary_falls_back_to_current_range() {
        let mut prof = profile(&["Goalkeeper"]);
        prof.current_salary_range = Some("£1k-2k".to_string());

        let mut opp = opportunity(21);
        opp.salary_range = Some("£1k-2k".to_string());
        let baseline = calculate_fit(&opportunity(21), &prof);
        let fit = calculate_fit(&opp, &prof);

        assert_eq!(fit.score - baseline.score, 15);
    }

    #[test]
    fn test_country_preference_adds_12() {
        let mut prof = profile(&["Goalkeeper"]);
        prof.preferred_countries = vec!["Spain".to_string()];

        let mut valencia = opportunity(3);
        valencia.posting_club_name = "Valencia CF".to_string();
        let elsewhere = opportunity(3);

        let preferred = calculate_fit(&valencia, &prof);
        let other = calculate_fit(&elsewhere, &prof);

        assert_eq!(preferred.score - other.score, 12);
        assert!(preferred.reasons.iter().any(|r| r.text.contains("Spain")));
    }

    #[test]
    fn test_rating_threshold_edges() {
        let prof = profile(&["Goalkeeper"]);
        let baseline = calculate_fit(&opportunity(50), &prof);

        let mut high = opportunity(50);
        high.club_rating = Some(4.0);
        high.review_count = 4;
        let high_fit = calculate_fit(&high, &prof);
        assert_eq!(high_fit.score - baseline.score, 15);
        assert!(high_fit.reasons.iter().any(|r| r.text.contains("Highly rated")));
        assert!(high_fit.reasons.iter().any(|r| r.text.contains("4.0/5")));

        // Just under the high tier drops to the well-regarded tier
        let mut solid = opportunity(50);
        solid.club_rating = Some(3.99);
        solid.review_count = 4;
        let solid_fit = calculate_fit(&solid, &prof);
        assert_eq!(solid_fit.score - baseline.score, 8);
        assert!(solid_fit.reasons.iter().any(|r| r.text.contains("Well regarded")));

        // High average but too few reviews also drops a tier
        let mut sparse = opportunity(50);
        sparse.club_rating = Some(4.8);
        sparse.review_count = 3;
        let sparse_fit = calculate_fit(&sparse, &prof);
        assert_eq!(sparse_fit.score - baseline.score, 8);

        let mut low = opportunity(50);
        low.club_rating = Some(3.4);
        low.review_count = 10;
        let low_fit = calculate_fit(&low, &prof);
        assert_eq!(low_fit.score, baseline.score);
        assert!(!low_fit.reasons.iter().any(|r| r.icon == "star"));
    }

    #[test]
    fn test_strong_match_clamps_at_95() {
        // Exact position (+25), exact salary (+15) and a highly rated club
        // (+15) push past the cap before the appeal draws even land.
        let mut opp = opportunity(42);
        opp.position_needed = "Winger".to_string();
        opp.salary_range = Some("€2k-3k".to_string());
        opp.club_rating = Some(4.2);
        opp.review_count = 6;

        let mut prof = profile(&["Winger"]);
        prof.desired_salary_range = Some("€2k-3k".to_string());

        let fit = calculate_fit(&opp, &prof);

        assert_eq!(fit.score, 95);
        assert!(fit.reasons.iter().any(|r| r.text.contains("Perfect position match")));
        assert!(fit.reasons.iter().any(|r| r.text.contains("perfectly matches")));
        assert!(fit.reasons.iter().any(|r| r.text.contains("Highly rated")));
    }

    #[test]
    fn test_empty_profile_positions_are_harmless() {
        let fit = calculate_fit(&opportunity(88), &profile(&[]));
        assert!(fit.score >= 60 && fit.score <= 95);
    }

    #[test]
    fn test_seeded_fraction_stays_in_unit_interval() {
        for i in -100..100 {
            let f = seeded_fraction(i as f64, 0.5);
            assert!((0.0..1.0).contains(&f));
        }
    }
}
