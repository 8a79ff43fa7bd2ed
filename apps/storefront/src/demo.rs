//! # Demo Catalog
//!
//! Deterministic products for development, shaped like the public catalog
//! feed (`id`, `title`, `price`, `description`, `category`, `image`,
//! `rating`).
//!
//! Products are dealt round-robin across categories so any prefix of the
//! catalog covers every category. Prices and ratings derive from the product
//! index, so the same `count` always yields the same catalog.

use shopfinity_core::{Money, ProductId, ProductRecord, Rating};

/// Product categories with (title, description) pairs.
const CATEGORIES: &[(&str, &[(&str, &str)])] = &[
    (
        "men's clothing",
        &[
            ("Foldsack No. 1 Backpack", "Fits 15 inch laptops, everyday use"),
            ("Casual Premium Slim Fit T-Shirt", "Slim-fitting style, raglan sleeve"),
            ("Cotton Jacket", "Great outerwear for spring and autumn"),
            ("Casual Slim Fit Shirt", "Solid color, light weight"),
            ("Rain Shell", "Packable waterproof shell"),
        ],
    ),
    (
        "jewelery",
        &[
            ("Naga Chain Bracelet", "Gold and silver dragon bracelet"),
            ("Solid Gold Petite Micropave", "Satisfaction guaranteed"),
            ("White Gold Plated Princess Ring", "Classic created wedding ring"),
            ("Rose Gold Plated Tunnel Plug Earrings", "Double flared stainless steel"),
            ("Pearl Stud Earrings", "Freshwater pearls, sterling posts"),
        ],
    ),
    (
        "electronics",
        &[
            ("2TB Portable External Hard Drive", "USB 3.0 and USB 2.0 compatible"),
            ("1TB Internal SSD", "SATA III, fast boot and load times"),
            ("256GB Portable SSD", "Compact storage for gaming consoles"),
            ("27 inch Full HD Monitor", "IPS panel, ultra-thin bezel"),
            ("49 inch Super Ultrawide Monitor", "Curved gaming display, 144Hz"),
        ],
    ),
    (
        "women's clothing",
        &[
            ("Snowboard Jacket Winter Coat", "Detachable liner, warm and breathable"),
            ("Faux Leather Moto Biker Jacket", "Hooded, removable hood"),
            ("Rain Jacket Windbreaker", "Striped climbing raincoat"),
            ("Short Sleeve Boat Neck V", "Lightweight fabric, stretchy"),
            ("Moisture Wicking Short Sleeve", "Breathable, quick drying"),
        ],
    ),
];

/// Builds `count` demo products with ids `1..=count`.
pub fn demo_catalog(count: usize) -> Vec<ProductRecord> {
    (0..count).map(demo_product).collect()
}

fn demo_product(index: usize) -> ProductRecord {
    let (category, items) = CATEGORIES[index % CATEGORIES.len()];
    let round = index / CATEGORIES.len();
    let (title, description) = items[round % items.len()];

    // Edition suffix once a category's titles are used up
    let title = match round / items.len() {
        0 => title.to_string(),
        edition => format!("{} ({})", title, edition + 1),
    };

    // 4.99 .. 499.99, always ending in .x9
    let price_cents = 499 + ((index * 7_919) % 49_500) as i64 / 10 * 10;

    ProductRecord {
        id: ProductId(index as u64 + 1),
        title,
        price: Money::from_cents(price_cents),
        image: format!("https://shopfinity.example/img/{}.jpg", index + 1),
        description: description.to_string(),
        category: category.to_string(),
        rating: Some(Rating {
            rate: 2.5 + ((index * 13) % 25) as f64 / 10.0,
            count: 10 + ((index * 37) % 490) as u32,
        }),
    }
}
