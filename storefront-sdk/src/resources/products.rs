//! Products resource client
//!
//! This module provides methods for managing the product catalog.

use crate::client::HttpClient;
use crate::envelope::ResultEnvelope;
use crate::error::SdkResult;
use crate::pagination::{PageRequest, PaginatedList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stock level at or below which a product counts as running low
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Client for product operations
#[derive(Debug, Clone)]
pub struct ProductsClient {
    client: Arc<HttpClient>,
}

impl ProductsClient {
    /// Create a new products client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List one page of products
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> SdkResult<ResultEnvelope<PaginatedList<Product>>> {
        self.client.get_page("/products", page).await
    }

    /// Get a product by ID
    pub async fn get(&self, id: u64) -> SdkResult<ResultEnvelope<Product>> {
        self.client.get(&format!("/products/{}", id)).await
    }

    /// Create a new product
    pub async fn create(&self, product: &NewProduct) -> SdkResult<ResultEnvelope<Product>> {
        self.client.post("/products", product).await
    }

    /// Update a product with the fields set in `update`
    pub async fn update(
        &self,
        id: u64,
        update: &ProductUpdate,
    ) -> SdkResult<ResultEnvelope<Product>> {
        self.client.put(&format!("/products/{}", id), update).await
    }

    /// Delete a product
    pub async fn delete(&self, id: u64) -> SdkResult<ResultEnvelope<()>> {
        self.client.delete(&format!("/products/{}", id)).await
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<u32>,
    #[serde(default)]
    pub meta: Option<ProductMeta>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Product {
    /// Price before the discount, when a usable discount is set
    pub fn original_price(&self) -> Option<f64> {
        self.discount_percentage
            .filter(|d| *d > 0.0 && *d < 100.0)
            .map(|d| self.price / (1.0 - d / 100.0))
    }

    /// Whether stock has dropped to the low-stock threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }
}

/// Physical dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    /// Build dimensions only when at least one side is non-zero
    pub fn from_parts(width: Option<f64>, height: Option<f64>, depth: Option<f64>) -> Option<Self> {
        let dims = Self {
            width: width.unwrap_or(0.0),
            height: height.unwrap_or(0.0),
            depth: depth.unwrap_or(0.0),
        };
        if dims.width != 0.0 || dims.height != 0.0 || dims.depth != 0.0 {
            Some(dims)
        } else {
            None
        }
    }
}

/// Customer review attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: Option<String>,
}

/// Bookkeeping fields maintained by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
}

/// Request to create a new product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_order_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl NewProduct {
    /// Create a new product request
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price,
            stock: 0,
            discount_percentage: None,
            tags: Vec::new(),
            brand: None,
            sku: None,
            weight: None,
            dimensions: None,
            minimum_order_quantity: None,
            images: Vec::new(),
            thumbnail: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: Option<Dimensions>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// Partial product update; only set fields are sent
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the update would send nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// Split free-form image input into URLs, one per line or comma, dropping
/// blank entries
pub fn parse_image_list(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}
