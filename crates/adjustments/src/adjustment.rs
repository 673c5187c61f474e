use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// What the adjustment does with its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentAction {
    /// Several existing source products become one result product.
    Combine,
    /// One source product becomes several result products.
    Split,
}

/// Role of a line item within an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineRole {
    /// Consumed by the adjustment.
    Source,
    /// Produced by the adjustment.
    Result,
}

/// One product line as entered in the creation form.
///
/// A line either references an existing product (`product_id` set) or
/// requests a new one (`new_brand_name` + `new_category_name`, no id).
/// `price` is only meaningful on result lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineInput {
    pub product_id: Option<i64>,
    pub name: Option<String>,
    pub new_brand_name: Option<String>,
    pub new_category_name: Option<String>,
    pub quantity: i64,
    pub price: Option<f64>,
}

impl LineInput {
    /// Line referencing an existing catalog product.
    pub fn existing(product_id: i64, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: Some(product_id),
            name: Some(name.into()),
            quantity,
            ..Default::default()
        }
    }

    /// Line requesting a brand-new product.
    pub fn new_product(
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            product_id: None,
            name: Some(name.into()),
            new_brand_name: Some(brand.into()),
            new_category_name: Some(category.into()),
            quantity,
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn is_existing(&self) -> bool {
        self.product_id.is_some()
    }

    /// Resolve a picked name against the catalog, the way the form does.
    ///
    /// A catalog hit fills `product_id` and clears the new-product fields;
    /// a miss turns the line into a new-product request with that name.
    pub fn select_product(&mut self, catalog: &[Product], picked_name: &str) {
        match catalog.iter().find(|p| p.name == picked_name) {
            Some(product) => {
                self.product_id = Some(product.id);
                self.name = Some(product.name.clone());
                self.new_brand_name = None;
                self.new_category_name = None;
            }
            None => {
                self.product_id = None;
                self.name = Some(picked_name.to_string());
            }
        }
    }
}

/// An adjustment under construction.
///
/// Constructed transiently by the creation form, submitted once, immutable
/// afterwards from the client's perspective (there is no edit flow for a
/// saved adjustment).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentDraft {
    pub action: Option<AdjustmentAction>,
    pub date: Option<NaiveDate>,
    pub sources: Vec<LineInput>,
    pub results: Vec<LineInput>,
}

impl AdjustmentDraft {
    pub fn new(action: AdjustmentAction, date: NaiveDate) -> Self {
        Self {
            action: Some(action),
            date: Some(date),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: 7,
                name: "Kopi Sachet".to_string(),
                brand_name: Some("Kapal Api".to_string()),
                category_name: Some("Beverage".to_string()),
            },
            Product {
                id: 9,
                name: "Mie Instan".to_string(),
                brand_name: None,
                category_name: None,
            },
        ]
    }

    #[test]
    fn selecting_a_catalog_product_fills_the_id_and_clears_new_fields() {
        let mut line = LineInput::new_product("Kopi", "Other", "Other", 3);
        line.select_product(&catalog(), "Kopi Sachet");

        assert_eq!(line.product_id, Some(7));
        assert_eq!(line.name.as_deref(), Some("Kopi Sachet"));
        assert_eq!(line.new_brand_name, None);
        assert_eq!(line.new_category_name, None);
    }

    #[test]
    fn selecting_an_unknown_name_makes_the_line_a_new_product_request() {
        let mut line = LineInput::existing(7, "Kopi Sachet", 3);
        line.select_product(&catalog(), "Kopi Sachet Jumbo");

        assert_eq!(line.product_id, None);
        assert_eq!(line.name.as_deref(), Some("Kopi Sachet Jumbo"));
    }

    #[test]
    fn action_and_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&AdjustmentAction::Combine).unwrap(),
            "\"COMBINE\""
        );
        assert_eq!(serde_json::to_string(&LineRole::Result).unwrap(), "\"RESULT\"");
    }
}
