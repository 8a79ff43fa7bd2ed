//! # Shopfinity Storefront
//!
//! Entry point. All logic lives in the library crate.

fn main() -> anyhow::Result<()> {
    shopfinity_storefront::run()
}
