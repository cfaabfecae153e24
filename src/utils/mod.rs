pub mod data;
pub mod fit_analysis;
pub mod fit_score;
