//! Normalized wire payload and the validate→submit typestate.

use chrono::NaiveDate;
use serde::Serialize;

use retaildesk_client::{ApiClient, ApiError};
use retaildesk_core::escape_html;

use crate::adjustment::{AdjustmentAction, AdjustmentDraft, LineInput, LineRole};

/// Body of `POST /adjustments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentPayload {
    pub action: AdjustmentAction,
    pub adjustment_date: NaiveDate,
    pub products: Vec<LinePayload>,
}

/// One normalized line: exactly one of the two shapes, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinePayload {
    #[serde(rename_all = "camelCase")]
    Existing {
        product_id: i64,
        adjustment_quantity: i64,
        adjustment_price: f64,
        adjustment_role: LineRole,
    },
    #[serde(rename_all = "camelCase")]
    New {
        name: String,
        new_brand_name: String,
        new_category_name: String,
        adjustment_quantity: i64,
        adjustment_price: f64,
        adjustment_role: LineRole,
    },
}

impl LinePayload {
    pub fn role(&self) -> LineRole {
        match self {
            LinePayload::Existing { adjustment_role, .. } => *adjustment_role,
            LinePayload::New { adjustment_role, .. } => *adjustment_role,
        }
    }
}

/// Proof that a draft passed validation.
///
/// Only [`AdjustmentDraft::validate`] can construct one, which makes
/// [`ValidatedAdjustment::submit`] unreachable for invalid drafts. The
/// confirmation dialog between validate and submit is the view layer's
/// concern.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAdjustment {
    payload: AdjustmentPayload,
}

impl ValidatedAdjustment {
    /// Normalize a validated draft into its wire shape: free text
    /// HTML-escaped, missing source prices coerced to zero, sources before
    /// results.
    pub(crate) fn normalize(
        draft: &AdjustmentDraft,
        action: AdjustmentAction,
        date: NaiveDate,
    ) -> Self {
        let products = draft
            .sources
            .iter()
            .map(|line| normalize_line(line, LineRole::Source))
            .chain(
                draft
                    .results
                    .iter()
                    .map(|line| normalize_line(line, LineRole::Result)),
            )
            .collect();

        Self {
            payload: AdjustmentPayload {
                action,
                adjustment_date: date,
                products,
            },
        }
    }

    pub fn payload(&self) -> &AdjustmentPayload {
        &self.payload
    }

    /// Submit once. Errors propagate unchanged for the caller to surface.
    pub async fn submit(&self, client: &ApiClient) -> Result<(), ApiError> {
        client
            .post_json::<_, serde_json::Value>("/adjustments", &self.payload)
            .await?;
        Ok(())
    }
}

fn normalize_line(line: &LineInput, role: LineRole) -> LinePayload {
    let quantity = line.quantity;
    let price = line.price.unwrap_or(0.0);

    match line.product_id {
        Some(product_id) => LinePayload::Existing {
            product_id,
            adjustment_quantity: quantity,
            adjustment_price: price,
            adjustment_role: role,
        },
        None => LinePayload::New {
            name: escape_html(line.name.as_deref().unwrap_or_default()),
            new_brand_name: escape_html(line.new_brand_name.as_deref().unwrap_or_default()),
            new_category_name: escape_html(line.new_category_name.as_deref().unwrap_or_default()),
            adjustment_quantity: quantity,
            adjustment_price: price,
            adjustment_role: role,
        },
    }
}
