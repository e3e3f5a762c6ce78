//! Product catalog endpoints.
//!
//! Reads are public; writes require an admin token.

use reqwest::Method;

use unique_cctv_core::ProductId;

use super::types::{Product, ProductInput};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// List the whole catalog.
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        self.get_public("/products").await
    }

    /// Fetch one product.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, BackendError> {
        self.get_public(&format!("/products/{id}")).await
    }

    /// List products in a category.
    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, BackendError> {
        self.get_public(&format!(
            "/products/category/{}",
            urlencoding::encode(category)
        ))
        .await
    }

    /// Keyword search over the catalog.
    pub async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, BackendError> {
        self.get_public(&format!(
            "/products/search?keyword={}",
            urlencoding::encode(keyword)
        ))
        .await
    }

    /// List the known category names.
    pub async fn product_categories(&self) -> Result<Vec<String>, BackendError> {
        self.get_public("/products/categories").await
    }

    /// Create a product (admin).
    pub async fn create_product(
        &self,
        token: &str,
        input: &ProductInput,
    ) -> Result<Product, BackendError> {
        self.send_authed(Method::POST, "/products", token, Some(input))
            .await
    }

    /// Update a product (admin).
    pub async fn update_product(
        &self,
        token: &str,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, BackendError> {
        self.send_authed(Method::PUT, &format!("/products/{id}"), token, Some(input))
            .await
    }

    /// Delete a product (admin).
    pub async fn delete_product(&self, token: &str, id: &ProductId) -> Result<(), BackendError> {
        self.delete_authed(&format!("/products/{id}"), token).await
    }
}
