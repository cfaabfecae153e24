use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A club's posted recruitment need
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub need_id: i64,
    pub position_needed: String,
    pub min_age: Option<u8>, // min <= max whenever both are present
    pub max_age: Option<u8>,
    pub salary_range: Option<String>, // free text, e.g. "€2k-3k"
    pub preferred_foot: Option<String>,
    pub created_by_club_id: i64,
    pub posting_club_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Average review rating for the posting club (0-5), joined separately
    pub club_rating: Option<f64>,
    pub review_count: u32,
    pub club_logo_url: Option<String>,
}

/// The viewing player's stored preferences, loaded once per session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub playing_positions: Vec<String>, // primary position first
    pub preferred_countries: Vec<String>,
    pub current_salary_range: Option<String>,
    pub desired_salary_range: Option<String>,
    pub languages: Vec<String>,
}

/// Aggregated player reviews for one club
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubReviewSummary {
    pub average_rating: Option<f64>, // 0-5, None when the club has no reviews
    pub review_count: u32,
    pub logo_url: Option<String>,
}

/// One justification attached to a fit score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitReason {
    pub icon: String, // icon tag for the rendering layer, e.g. "target"
    pub text: String,
}

impl FitReason {
    pub fn new(icon: &str, text: impl Into<String>) -> Self {
        Self {
            icon: icon.to_string(),
            text: text.into(),
        }
    }
}

/// Output of the fit-score calculator, recomputed on every fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub score: u32, // always in [0, 95]
    pub reasons: Vec<FitReason>,
}

/// Display band for a fit score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    Excellent,
    Good,
    Potential,
    Limited,
}

impl FitBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => FitBand::Excellent,
            70..=84 => FitBand::Good,
            55..=69 => FitBand::Potential,
            _ => FitBand::Limited,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::Excellent => "Excellent Fit",
            FitBand::Good => "Good Fit",
            FitBand::Potential => "Potential Fit",
            FitBand::Limited => "Limited Fit",
        }
    }
}

/// An opportunity annotated with its fit score, ready for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredOpportunity {
    pub opportunity: Opportunity,
    pub fit: FitResult,
}

impl ScoredOpportunity {
    pub fn band(&self) -> FitBand {
        FitBand::from_score(self.fit.score)
    }

    /// Format the scored opportunity as a readable one-line summary
    pub fn format(&self) -> String {
        format!(
            "{} | {} | {}% ({}) | posted {}",
            self.opportunity.posting_club_name,
            self.opportunity.position_needed,
            self.fit.score,
            self.band().label(),
            self.opportunity.created_at.format("%Y-%m-%d"),
        )
    }
}
