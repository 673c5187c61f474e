//! The adjustment validation rules.
//!
//! Evaluated in order, short-circuiting on the first failure; the error's
//! `Display` text is the single human-readable message shown to the user.
//! Server-side re-validation is assumed; the client's job is to block the
//! request before it is ever made.

use thiserror::Error;

use retaildesk_core::DomainError;

use crate::adjustment::{AdjustmentAction, AdjustmentDraft, LineInput, LineRole};
use crate::payload::ValidatedAdjustment;

/// First violated rule. Rows are numbered 1-based, sources before results,
/// matching the order the form renders them in.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdjustmentError {
    #[error("select an action (COMBINE or SPLIT)")]
    MissingAction,

    #[error("select an adjustment date")]
    MissingDate,

    #[error("row {row}: product name is required")]
    MissingName { row: usize },

    #[error("row {row}: quantity must be greater than 0")]
    NonPositiveQuantity { row: usize },

    #[error("row {row}: price must be 0 or positive")]
    InvalidPrice { row: usize },

    #[error("row {row}: a new product requires a brand name")]
    MissingBrandName { row: usize },

    #[error("row {row}: a new product requires a category name")]
    MissingCategoryName { row: usize },

    #[error("COMBINE requires at least 2 source products")]
    CombineTooFewSources,

    #[error("COMBINE must have exactly 1 result product")]
    CombineResultCount,

    #[error("sources in COMBINE must be existing products")]
    CombineNewSource,

    #[error("all source quantities in COMBINE must be the same")]
    CombineSourceQuantityMismatch,

    #[error("result quantity ({result}) must match source quantity ({base})")]
    CombineResultQuantityMismatch { result: i64, base: i64 },

    #[error("SPLIT requires exactly 1 source product")]
    SplitSourceCount,

    #[error("SPLIT requires at least 2 result products")]
    SplitTooFewResults,

    // The field is spelled `r#source` so thiserror does not treat it as the
    // error's source cause; to rustc it is the same identifier as `source`.
    #[error("quantity mismatch: each result quantity must equal source quantity ({r#source})")]
    SplitQuantityMismatch { r#source: i64 },
}

impl From<AdjustmentError> for DomainError {
    fn from(err: AdjustmentError) -> Self {
        DomainError::validation(err.to_string())
    }
}

impl AdjustmentDraft {
    /// Validate the draft and, on success, normalize it into the wire
    /// payload. The returned [`ValidatedAdjustment`] is the only way to
    /// submit: a failed validation cannot reach the network.
    pub fn validate(&self) -> Result<ValidatedAdjustment, AdjustmentError> {
        let action = self.action.ok_or(AdjustmentError::MissingAction)?;
        let date = self.date.ok_or(AdjustmentError::MissingDate)?;

        let lines = self
            .sources
            .iter()
            .map(|line| (line, LineRole::Source))
            .chain(self.results.iter().map(|line| (line, LineRole::Result)));

        for (i, (line, role)) in lines.enumerate() {
            check_line(line, role, i + 1)?;
        }

        match action {
            AdjustmentAction::Combine => self.check_combine()?,
            AdjustmentAction::Split => self.check_split()?,
        }

        Ok(ValidatedAdjustment::normalize(self, action, date))
    }

    fn check_combine(&self) -> Result<(), AdjustmentError> {
        if self.sources.len() < 2 {
            return Err(AdjustmentError::CombineTooFewSources);
        }
        if self.results.len() != 1 {
            return Err(AdjustmentError::CombineResultCount);
        }

        // COMBINE consumes stock; it cannot consume a product that does not
        // exist yet.
        if self.sources.iter().any(|line| !line.is_existing()) {
            return Err(AdjustmentError::CombineNewSource);
        }

        let base = self.sources[0].quantity;
        if self.sources.iter().any(|line| line.quantity != base) {
            return Err(AdjustmentError::CombineSourceQuantityMismatch);
        }

        let result = self.results[0].quantity;
        if result != base {
            return Err(AdjustmentError::CombineResultQuantityMismatch { result, base });
        }

        Ok(())
    }

    fn check_split(&self) -> Result<(), AdjustmentError> {
        if self.sources.len() != 1 {
            return Err(AdjustmentError::SplitSourceCount);
        }
        if self.results.len() < 2 {
            return Err(AdjustmentError::SplitTooFewResults);
        }

        // Every result carries the full source quantity. A split replicates
        // the count, it does not partition it; the backend expects exactly
        // this shape.
        let source = self.sources[0].quantity;
        if self.results.iter().any(|line| line.quantity != source) {
            return Err(AdjustmentError::SplitQuantityMismatch { source });
        }

        Ok(())
    }
}

fn check_line(line: &LineInput, role: LineRole, row: usize) -> Result<(), AdjustmentError> {
    if line.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        return Err(AdjustmentError::MissingName { row });
    }
    if line.quantity <= 0 {
        return Err(AdjustmentError::NonPositiveQuantity { row });
    }
    if role == LineRole::Result && line.price.is_none_or(|price| price < 0.0) {
        return Err(AdjustmentError::InvalidPrice { row });
    }
    if !line.is_existing() {
        if line
            .new_brand_name
            .as_deref()
            .is_none_or(|brand| brand.trim().is_empty())
        {
            return Err(AdjustmentError::MissingBrandName { row });
        }
        if line
            .new_category_name
            .as_deref()
            .is_none_or(|category| category.trim().is_empty())
        {
            return Err(AdjustmentError::MissingCategoryName { row });
        }
    }
    Ok(())
}
