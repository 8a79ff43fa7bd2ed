//! # Orders
//!
//! Order snapshots, shipping rules and the per-user order history.
//!
//! ## Checkout Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart lines                                                             │
//! │    60.00 × 2  = 120.00                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ price × quantity            = 120.00                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shipping = subtotal > 100.00 ? 0 : 10.00 =   0.00                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = subtotal + shipping               = 120.00                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The threshold comparison is strict: a subtotal of exactly 100.00 pays
//! shipping.
//!
//! ## Append-Only History
//! Orders are snapshots. Once placed they are never edited by the store;
//! new orders are prepended so the history reads newest first.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Shipping Policy
// =============================================================================

/// Free shipping above a threshold, flat fee otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Subtotals strictly greater than this ship free.
    pub free_over: Money,

    /// Fee charged at or below the threshold.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    pub const fn new(free_over: Money, flat_fee: Money) -> Self {
        ShippingPolicy {
            free_over,
            flat_fee,
        }
    }

    /// Shipping fee for a subtotal.
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_over {
            Money::zero()
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    /// 10.00 flat fee, free over 100.00.
    fn default() -> Self {
        ShippingPolicy::new(crate::FREE_SHIPPING_OVER, crate::FLAT_SHIPPING_FEE)
    }
}

/// Subtotal / shipping / total triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub shipping: Money,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total: Money,
}

impl OrderTotals {
    pub fn from_subtotal(subtotal: Money, policy: &ShippingPolicy) -> Self {
        let shipping = policy.fee_for(subtotal);
        OrderTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment status. Stored as the display string (`"Processing"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Every new order starts here.
    #[default]
    Processing,
    Shipped,
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line item frozen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            id: line.id,
            title: line.title.clone(),
            price: line.price,
            quantity: line.quantity,
            image: line.image.clone(),
        }
    }
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// A placed order.
///
/// ## Record Layout
/// ```json
/// { "id": "1718035200123", "date": "2024-06-10",
///   "placedAt": "2024-06-10T16:00:00.123Z",
///   "items": [ { "id": 1, "title": "...", "price": 50.0, "quantity": 1, "image": "..." } ],
///   "subtotal": 110.0, "shipping": 0.0, "total": 110.0, "status": "Processing" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Millisecond timestamp of creation, bumped to stay unique.
    pub id: String,

    /// Local calendar date of checkout.
    #[ts(as = "String")]
    pub date: NaiveDate,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    pub items: Vec<OrderLine>,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub shipping: Money,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total: Money,

    pub status: OrderStatus,
}

impl Order {
    /// Snapshots a cart into a new `Processing` order.
    ///
    /// Does not touch the cart; clearing it is the caller's job so that the
    /// two changes can be persisted together.
    pub fn from_cart(
        id: String,
        cart: &Cart,
        policy: &ShippingPolicy,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let totals = cart.totals(policy);
        Order {
            id,
            date: placed_at.with_timezone(&Local).date_naive(),
            placed_at,
            items: cart.lines().iter().map(OrderLine::from).collect(),
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
            status: OrderStatus::Processing,
        }
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            shipping: self.shipping,
            total: self.total,
        }
    }

    /// Σ quantities across the items.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

// =============================================================================
// Order History
// =============================================================================

/// A user's orders, newest first.
///
/// Serializes as a bare JSON array (the `orders_<userId>` record).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        OrderHistory { orders: Vec::new() }
    }

    /// Orders, newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Inserts a new order at the front. Existing entries keep their order.
    pub fn prepend(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    pub fn latest(&self) -> Option<&Order> {
        self.orders.first()
    }

    pub fn find(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Σ order totals (profile "total spent").
    pub fn lifetime_spend(&self) -> Money {
        self.orders.iter().map(|o| o.total).sum()
    }

    /// Σ item quantities across every order (profile "items purchased").
    pub fn items_purchased(&self) -> u64 {
        self.orders.iter().map(Order::item_count).sum()
    }

    /// Largest numeric order id, used to seed the id generator after reload.
    pub fn max_id_stamp(&self) -> Option<i64> {
        self.orders.iter().filter_map(|o| o.id.parse::<i64>().ok()).max()
    }
}

// =============================================================================
// Order Ids
// =============================================================================

/// Issues time-derived order ids that strictly increase.
///
/// ## Collision Handling
/// ```text
/// now = 1718035200123  last = 0              → "1718035200123"
/// now = 1718035200123  last = 1718035200123  → "1718035200124"
/// now = 1718035200120  last = 1718035200124  → "1718035200125" (clock went back)
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderIdGenerator {
    last: i64,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure future ids sort after every id already in `history`.
    pub fn observe(&mut self, history: &OrderHistory) {
        if let Some(stamp) = history.max_id_stamp() {
            self.last = self.last.max(stamp);
        }
    }

    /// Next id for an order placed at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let stamp = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = stamp;
        stamp.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
