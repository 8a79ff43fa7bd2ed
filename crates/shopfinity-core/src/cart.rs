//! # Cart
//!
//! The shopping cart and its line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Cart Method             State Change          │
//! │  ─────────                ───────────             ────────────          │
//! │                                                                         │
//! │  Click "Add to cart" ───► add_product() ───────► push line (qty 1)     │
//! │                                          └──────► or qty += 1           │
//! │                                                                         │
//! │  Change quantity ───────► set_quantity() ──────► line.qty = n          │
//! │                                          └──────► n == 0: remove line   │
//! │                                                                         │
//! │  Click remove ──────────► remove() ────────────► lines.retain(..)      │
//! │                                                                         │
//! │  Checkout ──────────────► (SessionStore) ──────► replaced by Cart::new()│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `ProductId`
//! - Every line has `quantity >= 1`; a line reduced to 0 is removed
//! - Lines keep insertion order
//! - Unit prices are non-negative and the subtotal never exceeds
//!   [`MAX_SUBTOTAL`], so totals cannot overflow

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::order::{OrderTotals, ShippingPolicy};
use crate::types::{ProductId, ProductRecord};

/// Largest subtotal a cart may reach (1 trillion in major units).
///
/// Adds and quantity changes that would pass it fail with
/// `InvalidQuantity` and leave the cart as it was.
pub const MAX_SUBTOTAL: Money = Money::from_cents(100_000_000_000_000);

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// Title, price and image are frozen from the product record at the time
/// the line was created. A later catalog change does not alter the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,

    pub title: String,

    /// Unit price at time of adding (frozen).
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub image: String,

    /// Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with quantity 1 from a catalog product.
    pub fn from_product(product: &ProductRecord) -> Self {
        CartLine {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Which branch `add_product` took.
///
/// Callers use this to give distinct feedback ("added" vs "updated").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Created,
    /// An existing line was bumped to `quantity`.
    Incremented { quantity: u32 },
}

/// What `set_quantity` did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum QuantityChange {
    /// The line now holds the requested quantity.
    Updated,
    /// Quantity 0 was requested and the line was removed.
    Removed,
    /// No line for that product; nothing changed.
    NotInCart,
}

impl QuantityChange {
    /// Whether the cart contents changed.
    pub fn changed(&self) -> bool {
        !matches!(self, QuantityChange::NotInCart)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered collection of cart lines, unique by product id.
///
/// Serializes as a bare JSON array of lines, which is the layout of the
/// `cart_<userId>` record. Deserializing goes through [`Cart::from_lines`],
/// so a hand-edited record cannot break the invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from stored lines, restoring the invariants.
    ///
    /// Zero-quantity lines are dropped and duplicate product ids are merged
    /// (quantities summed, first occurrence keeps its position).
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Read-only view of the lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == product_id)
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1
    /// - Product not in cart: new line with quantity 1
    /// - Negative price: `Validation`, cart unchanged
    /// - Subtotal would pass [`MAX_SUBTOTAL`]: `InvalidQuantity`, cart unchanged
    ///
    /// Always adds exactly one unit per call.
    pub fn add_product(&mut self, product: &ProductRecord) -> CoreResult<AddOutcome> {
        if let Some(index) = self.lines.iter().position(|l| l.id == product.id) {
            let line = &self.lines[index];
            let quantity = line.quantity.checked_add(1).ok_or(CoreError::InvalidQuantity {
                requested: i64::from(line.quantity) + 1,
            })?;
            self.check_ceiling(product.id, line.price, quantity)?;

            self.lines[index].quantity = quantity;
            return Ok(AddOutcome::Incremented { quantity });
        }

        if product.price < Money::zero() {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            }
            .into());
        }
        self.check_ceiling(product.id, product.price, 1)?;

        self.lines.push(CartLine::from_product(product));
        Ok(AddOutcome::Created)
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity < 0`: `InvalidQuantity`, cart unchanged
    /// - subtotal would pass [`MAX_SUBTOTAL`]: `InvalidQuantity`, cart unchanged
    /// - `quantity == 0`: same as [`Cart::remove`]
    /// - product not in cart: no-op
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<QuantityChange> {
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        if quantity == 0 {
            return Ok(if self.remove(product_id) {
                QuantityChange::Removed
            } else {
                QuantityChange::NotInCart
            });
        }

        let quantity = u32::try_from(quantity).map_err(|_| CoreError::InvalidQuantity {
            requested: quantity,
        })?;

        let Some(index) = self.lines.iter().position(|l| l.id == product_id) else {
            return Ok(QuantityChange::NotInCart);
        };
        self.check_ceiling(product_id, self.lines[index].price, quantity)?;

        self.lines[index].quantity = quantity;
        Ok(QuantityChange::Updated)
    }

    /// Fails unless giving `product_id` a line of `price` × `quantity` keeps
    /// the subtotal within [`MAX_SUBTOTAL`].
    fn check_ceiling(&self, product_id: ProductId, price: Money, quantity: u32) -> CoreResult<()> {
        let subtotal = self
            .lines
            .iter()
            .filter(|l| l.id != product_id)
            .try_fold(Money::zero(), |sum, l| {
                l.price
                    .checked_multiply_quantity(l.quantity)
                    .and_then(|total| sum.checked_add(total))
            })
            .and_then(|sum| {
                price
                    .checked_multiply_quantity(quantity)
                    .and_then(|total| sum.checked_add(total))
            });

        match subtotal {
            Some(subtotal) if subtotal <= MAX_SUBTOTAL => Ok(()),
            _ => Err(CoreError::InvalidQuantity {
                requested: i64::from(quantity),
            }),
        }
    }

    /// Removes the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != product_id);
        self.lines.len() != initial_len
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities (the header badge count).
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Σ price × quantity.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal, shipping and total under a shipping policy.
    pub fn totals(&self, policy: &ShippingPolicy) -> OrderTotals {
        OrderTotals::from_subtotal(self.subtotal(), policy)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
