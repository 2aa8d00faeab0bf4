//! Core types and ids for the order book.
//!
//! Prices are integer ticks and quantities whole units. [`Side`],
//! [`OrderType`], and [`OrderStatus`] define the order vocabulary and
//! lifecycle; [`Level`] is one aggregated price level in a book summary.

use serde::{Deserialize, Serialize};

/// Unique order identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Price in integer ticks. Signed: zero and negative prices are valid
/// arithmetic operands even though live venues quote positive ticks.
pub type Price = i32;

/// Order quantity in whole units.
pub type Quantity = u32;

/// Arrival sequence number, assigned at admission. Time priority within a
/// price level is FIFO by sequence.
pub type Sequence = u64;

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an aggressive order matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type: how long the order may stay active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Rest on the book until filled or explicitly canceled.
    #[serde(rename = "GTC")]
    GoodTillCancel,
    /// Fill what is possible immediately; cancel the remainder.
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill the whole quantity immediately or not at all.
    #[serde(rename = "FOK")]
    FillOrKill,
}

/// Order lifecycle status. `Filled` and `Canceled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    PartiallyFilled,
    Filled,
    Canceled,
}

/// One aggregated price level in a book summary: total remaining quantity
/// resting at `price`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub price: Price,
    pub quantity: u64,
}
