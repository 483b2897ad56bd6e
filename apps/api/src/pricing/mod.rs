//! Pricing catalog — decorative tier data for the marketing page.
//!
//! Served read-only; there is no payment integration behind it.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierKind {
    Free,
    Subscription,
    OneTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub name: String,
    pub price: String,
    pub description: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
    #[serde(rename = "type")]
    pub kind: TierKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_supported: Option<bool>,
}

/// The three tiers of the original marketing page, copy included.
pub fn default_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier {
            name: "Basic".to_string(),
            price: "Free".to_string(),
            description: "Essential resume feedback to get started".to_string(),
            features: vec![
                "Single resume analysis".to_string(),
                "Basic formatting feedback".to_string(),
                "Keyword optimization tips".to_string(),
                "Content improvement suggestions".to_string(),
            ],
            is_popular: None,
            kind: TierKind::Free,
            ad_supported: Some(true),
        },
        PricingTier {
            name: "Premium".to_string(),
            price: "$9.99".to_string(),
            description: "Advanced analysis for serious job seekers".to_string(),
            features: vec![
                "Unlimited resume analyses".to_string(),
                "ATS compatibility testing".to_string(),
                "Industry-specific keyword recommendations".to_string(),
                "Downloadable detailed report".to_string(),
                "Section-by-section feedback".to_string(),
            ],
            is_popular: Some(true),
            kind: TierKind::Subscription,
            ad_supported: None,
        },
        PricingTier {
            name: "Professional".to_string(),
            price: "$29.99".to_string(),
            description: "Complete career support for professionals".to_string(),
            features: vec![
                "All Premium features".to_string(),
                "Cover letter analysis".to_string(),
                "LinkedIn profile review".to_string(),
                "Expert rewriting suggestions".to_string(),
                "AI-generated personalization for job applications".to_string(),
                "Priority support".to_string(),
            ],
            is_popular: None,
            kind: TierKind::Subscription,
            ad_supported: None,
        },
    ]
}

/// GET /api/v1/pricing/tiers
pub async fn handle_list_tiers(
    State(_state): State<AppState>,
) -> Result<Json<Vec<PricingTier>>, AppError> {
    Ok(Json(default_tiers()))
}
