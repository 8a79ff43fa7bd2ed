//! # Catalog Filtering
//!
//! Pure filters over the product list the catalog collaborator supplies.
//!
//! ```text
//! products ──► search term (title | description, case-insensitive)
//!          ──► category (exact, optional)
//!          ──► price <= max_price
//!          ──► visible products (catalog order kept)
//! ```
//!
//! There is no relevance ranking.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ProductRecord;
use crate::DEFAULT_MAX_PRICE;

/// Listing filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Substring matched against title and description. Blank matches all.
    pub search_term: String,

    /// Exact category. `None` or blank means every category.
    pub category: Option<String>,

    /// Inclusive price ceiling.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub max_price: Money,
}

impl Default for ProductFilter {
    fn default() -> Self {
        ProductFilter {
            search_term: String::new(),
            category: None,
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}

impl ProductFilter {
    /// Whether a single product passes every criterion.
    pub fn matches(&self, product: &ProductRecord) -> bool {
        let term = self.search_term.trim().to_lowercase();
        let matches_search = term.is_empty()
            || product.title.to_lowercase().contains(&term)
            || product.description.to_lowercase().contains(&term);

        let matches_category = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(category) => product.category == category,
        };

        matches_search && matches_category && product.price <= self.max_price
    }
}

/// Products passing `filter`, in catalog order.
pub fn filter_products<'a>(
    products: &'a [ProductRecord],
    filter: &ProductFilter,
) -> Vec<&'a ProductRecord> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Distinct non-empty categories, first-seen order.
pub fn categories(products: &[ProductRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: u64, title: &str, description: &str, category: &str, cents: i64) -> ProductRecord {
        ProductRecord {
            id: ProductId(id),
            title: title.to_string(),
            price: Money::from_cents(cents),
            image: String::new(),
            description: description.to_string(),
            category: category.to_string(),
            rating: None,
        }
    }

    fn catalog() -> Vec<ProductRecord> {
        vec![
            product(1, "Fjallraven Backpack", "Fits 15 inch laptops", "men's clothing", 10995),
            product(2, "Gold Ring", "Solid gold petite micropave", "jewelery", 16800),
            product(3, "Hard Drive", "USB 3.0 portable storage", "electronics", 6400),
            product(4, "Cotton Jacket", "Great for spring", "men's clothing", 5599),
            product(5, "Gaming Monitor", "49 inch super ultrawide", "electronics", 99999),
        ]
    }

    fn ids(products: Vec<&ProductRecord>) -> Vec<u64> {
        products.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything_under_ceiling() {
        let products = catalog();
        assert_eq!(ids(filter_products(&products, &ProductFilter::default())), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let products = catalog();
        let filter = ProductFilter {
            search_term: "LAPTOP".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(ids(filter_products(&products, &filter)), vec![1]);

        let filter = ProductFilter {
            search_term: "inch".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(ids(filter_products(&products, &filter)), vec![1, 5]);
    }

    #[test]
    fn test_category_and_price_combine() {
        let products = catalog();
        let filter = ProductFilter {
            search_term: String::new(),
            category: Some("electronics".to_string()),
            max_price: Money::from_cents(10000),
        };
        assert_eq!(ids(filter_products(&products, &filter)), vec![3]);
    }

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let products = catalog();
        let filter = ProductFilter {
            max_price: Money::from_cents(6400),
            ..ProductFilter::default()
        };
        assert_eq!(ids(filter_products(&products, &filter)), vec![3, 4]);
    }

    #[test]
    fn test_categories_are_unique_in_first_seen_order() {
        assert_eq!(
            categories(&catalog()),
            vec!["men's clothing", "jewelery", "electronics"]
        );
    }
}
