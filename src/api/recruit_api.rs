use crate::models::{ClubReviewSummary, Opportunity, PlayerProfile};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Errors from the hosted recruitment backend
#[derive(Debug, Error)]
pub enum RecruitApiError {
    #[error("API key rejected by the recruitment backend")]
    Unauthorized,
    #[error("rate limited by the recruitment backend")]
    RateLimited,
    #[error("recruitment backend returned status {0}")]
    UnexpectedStatus(u16),
}

fn check_status(status: reqwest::StatusCode) -> Result<(), RecruitApiError> {
    match status.as_u16() {
        200..=299 => Ok(()),
        401 | 403 => Err(RecruitApiError::Unauthorized),
        429 => Err(RecruitApiError::RateLimited),
        code => Err(RecruitApiError::UnexpectedStatus(code)),
    }
}

/// One recruitment-need row from the `get_recruitment_needs` RPC
#[derive(Debug, Deserialize)]
struct NeedRow {
    need_id: i64,
    position_needed: Option<String>,
    min_age: Option<u8>,
    max_age: Option<u8>,
    salary_range: Option<String>,
    preferred_foot: Option<String>,
    created_by_club_id: i64,
    club_name: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

/// One review row for a club
#[derive(Debug, Deserialize)]
struct ReviewRow {
    rating: f64,
}

/// Club row carrying the logo used by the list view
#[derive(Debug, Deserialize)]
struct ClubRow {
    logo_url: Option<String>,
}

/// Stored profile row for the signed-in player
#[derive(Debug, Deserialize)]
struct ProfileRow {
    playing_positions: Option<Vec<String>>,
    preferred_countries: Option<Vec<String>>,
    current_salary_range: Option<String>,
    desired_salary_range: Option<String>,
    languages: Option<Vec<String>>,
}

/// Map a wire row into a domain `Opportunity`, dropping rows the scorer
/// cannot use and normalizing the age-range invariant.
fn need_row_to_opportunity(row: NeedRow) -> Option<Opportunity> {
    let position_needed = match row.position_needed {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            tracing::warn!(need_id = row.need_id, "skipping need row without a position");
            return None;
        }
    };

    let (min_age, max_age) = match (row.min_age, row.max_age) {
        // Inverted range from the backend: clear both rather than guess
        (Some(min), Some(max)) if min > max => {
            tracing::warn!(need_id = row.need_id, min, max, "dropping inverted age range");
            (None, None)
        }
        pair => pair,
    };

    Some(Opportunity {
        need_id: row.need_id,
        position_needed,
        min_age,
        max_age,
        salary_range: row.salary_range,
        preferred_foot: row.preferred_foot,
        created_by_club_id: row.created_by_club_id,
        posting_club_name: row.club_name.unwrap_or_default(),
        notes: row.notes,
        created_at: row.created_at,
        // Joined attributes are attached later from the review summaries
        club_rating: None,
        review_count: 0,
        club_logo_url: None,
    })
}

pub struct RecruitApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RecruitApiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Fetch all open recruitment needs.
    ///
    /// Joined attributes (club rating, review count, logo) are left empty
    /// here and attached by the orchestrator from the per-club summaries.
    pub async fn fetch_recruitment_needs(&self) -> Result<Vec<Opportunity>> {
        let url = format!("{}/rest/v1/rpc/get_recruitment_needs", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({}))
            .send()
            .await
            .context("Failed to fetch recruitment needs")?;

        check_status(response.status())?;

        let rows: Vec<NeedRow> = response
            .json()
            .await
            .context("Failed to parse recruitment needs response")?;

        Ok(rows.into_iter().filter_map(need_row_to_opportunity).collect())
    }

    /// Fetch and aggregate the reviews for one club, plus its logo
    pub async fn fetch_club_review_summary(&self, club_id: i64) -> Result<ClubReviewSummary> {
        let response = self
            .get("/rest/v1/club_reviews")
            .query(&[
                ("club_id", format!("eq.{}", club_id).as_str()),
                ("select", "rating"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to fetch reviews for club {}", club_id))?;

        check_status(response.status())?;

        let reviews: Vec<ReviewRow> = response
            .json()
            .await
            .context("Failed to parse club reviews response")?;

        let review_count = reviews.len() as u32;
        let average_rating = if reviews.is_empty() {
            None
        } else {
            Some(reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64)
        };

        let logo_url = self.fetch_club_logo(club_id).await.unwrap_or_else(|e| {
            tracing::warn!(club_id, error = %e, "could not fetch club logo");
            None
        });

        Ok(ClubReviewSummary {
            average_rating,
            review_count,
            logo_url,
        })
    }

    async fn fetch_club_logo(&self, club_id: i64) -> Result<Option<String>> {
        let response = self
            .get("/rest/v1/clubs")
            .query(&[
                ("id", format!("eq.{}", club_id).as_str()),
                ("select", "logo_url"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to fetch club {}", club_id))?;

        check_status(response.status())?;

        let clubs: Vec<ClubRow> = response
            .json()
            .await
            .context("Failed to parse clubs response")?;

        Ok(clubs.into_iter().next().and_then(|c| c.logo_url))
    }

    /// Fetch the signed-in player's stored preference profile
    pub async fn fetch_player_profile(&self, player_id: i64) -> Result<PlayerProfile> {
        let response = self
            .get("/rest/v1/player_profiles")
            .query(&[
                ("player_id", format!("eq.{}", player_id).as_str()),
                (
                    "select",
                    "playing_positions,preferred_countries,current_salary_range,\
                     desired_salary_range,languages",
                ),
            ])
            .send()
            .await
            .context("Failed to fetch player profile")?;

        check_status(response.status())?;

        let rows: Vec<ProfileRow> = response
            .json()
            .await
            .context("Failed to parse player profile response")?;

        let row = rows
            .into_iter()
            .next()
            .with_context(|| format!("No stored profile for player {}", player_id))?;

        Ok(PlayerProfile {
            playing_positions: row.playing_positions.unwrap_or_default(),
            preferred_countries: row.preferred_countries.unwrap_or_default(),
            current_salary_range: row.current_salary_range,
            desired_salary_range: row.desired_salary_range,
            languages: row.languages.unwrap_or_default(),
        })
    }
}
