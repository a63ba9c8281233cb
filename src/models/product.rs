//! Storefront product and cart models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.price, self.original_price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Discount shown on product cards, rounded to a whole percent.
///
/// Zero when there is no original price or it is not above the current price.
pub fn discount_percentage(price: f64, original_price: Option<f64>) -> u32 {
    match original_price {
        Some(original) if original > 0.0 && original > price => {
            (((original - price) / original) * 100.0).round() as u32
        }
        _ => 0,
    }
}

/// Add-to-cart request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: f64,
}

impl Cart {
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }
}
