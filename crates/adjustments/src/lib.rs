//! `retaildesk-adjustments` — stock adjustment drafting, validation and
//! submission.
//!
//! An adjustment either COMBINEs several source products into one result or
//! SPLITs one source into several results. Drafts are validated client-side
//! before any network traffic; only a [`ValidatedAdjustment`] can be
//! submitted, so an invalid draft can never reach the wire.

pub mod adjustment;
pub mod catalog;
pub mod payload;
pub mod validate;

pub use adjustment::{AdjustmentAction, AdjustmentDraft, LineInput, LineRole};
pub use catalog::{Brand, Category, Product, fetch_brands, fetch_categories, fetch_products};
pub use payload::{AdjustmentPayload, LinePayload, ValidatedAdjustment};
pub use validate::AdjustmentError;
