//! # Catalog Seed Generator
//!
//! Writes a demo catalog JSON file for development.
//!
//! ## Usage
//! ```bash
//! # 20 products to ./catalog.json (default)
//! cargo run -p shopfinity-storefront --bin seed-catalog
//!
//! # Custom amount and path
//! cargo run -p shopfinity-storefront --bin seed-catalog -- --count 200 --out ./data/catalog.json
//! ```
//!
//! Point `SHOP_CATALOG_PATH` at the output to serve it.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use shopfinity_core::catalog::categories;
use shopfinity_storefront::demo::demo_catalog;

const DEFAULT_COUNT: usize = 20;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut count = DEFAULT_COUNT;
    let mut out = PathBuf::from("catalog.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                let value = args.get(i + 1).context("--count needs a value")?;
                count = value
                    .parse()
                    .with_context(|| format!("Invalid count: {}", value))?;
                i += 1;
            }
            "--out" | "-o" => {
                let value = args.get(i + 1).context("--out needs a value")?;
                out = PathBuf::from(value);
                i += 1;
            }
            "--help" | "-h" => {
                println!("Shopfinity Catalog Seed Generator");
                println!();
                println!("Usage: seed-catalog [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products (default: {})", DEFAULT_COUNT);
                println!("  -o, --out <PATH>    Output file (default: ./catalog.json)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => bail!("Unknown argument: {} (try --help)", other),
        }
        i += 1;
    }

    println!("🌱 Shopfinity Catalog Seed Generator");
    println!("====================================");
    println!("Output:   {}", out.display());
    println!("Products: {}", count);
    println!();

    let products = demo_catalog(count);
    let json = serde_json::to_string_pretty(&products).context("Failed to encode catalog")?;

    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;

    println!("✓ Wrote {} products", products.len());
    println!("✓ Categories: {}", categories(&products).join(", "));
    Ok(())
}
