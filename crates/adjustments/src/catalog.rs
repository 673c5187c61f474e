//! Catalog lookups backing the adjustment form.
//!
//! List endpoints answer either as a bare JSON array or as `{data: [...]}`
//! depending on backend version; both are accepted.

use serde::Deserialize;

use retaildesk_client::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Brand {
    #[serde(alias = "brandName")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(alias = "categoryName")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_inner(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

pub async fn fetch_products(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
    let envelope: ListEnvelope<Product> = client.get_json("/products").await?;
    Ok(envelope.into_inner())
}

pub async fn fetch_brands(client: &ApiClient) -> Result<Vec<Brand>, ApiError> {
    let envelope: ListEnvelope<Brand> = client.get_json("/brands").await?;
    Ok(envelope.into_inner())
}

pub async fn fetch_categories(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    let envelope: ListEnvelope<Category> = client.get_json("/categories").await?;
    Ok(envelope.into_inner())
}
