//! # Catalog Commands
//!
//! Product listing and lookup over the catalog loaded at startup.

use serde::Serialize;
use shopfinity_core::catalog::{categories, filter_products, ProductFilter};
use shopfinity_core::{ProductId, ProductRecord};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Filtered listing.
///
/// `categories` is computed over the whole catalog so the filter dropdown
/// does not shrink as the user narrows the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductRecord>,
    pub categories: Vec<String>,
    /// Number of products after filtering.
    pub total: usize,
}

/// Lists products passing `filter`, in catalog order.
pub fn list_products(state: &AppState, filter: ProductFilter) -> ProductListResponse {
    debug!(
        search = %filter.search_term,
        category = ?filter.category,
        max_price = %filter.max_price,
        "list_products command"
    );

    let products: Vec<ProductRecord> = filter_products(state.catalog(), &filter)
        .into_iter()
        .cloned()
        .collect();

    ProductListResponse {
        total: products.len(),
        products,
        categories: categories(state.catalog()),
    }
}

/// Looks up a single product.
pub fn get_product(state: &AppState, id: ProductId) -> Result<ProductRecord, ApiError> {
    debug!(product_id = %id, "get_product command");
    state
        .product(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))
}
