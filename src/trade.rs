//! Trade records.
//!
//! A [`Trade`] pairs the bid-side and ask-side [`Execution`] of one match.
//! Both descriptors carry the same price (the resting order's) and the
//! same quantity.

use crate::types::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};

/// One side's view of an execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

/// Immutable record of one execution, capturing both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    bid: Execution,
    ask: Execution,
}

impl Trade {
    pub fn new(bid: Execution, ask: Execution) -> Self {
        Self { bid, ask }
    }

    pub fn bid(&self) -> &Execution {
        &self.bid
    }

    pub fn ask(&self) -> &Execution {
        &self.ask
    }
}
