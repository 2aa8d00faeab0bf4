//! Order record and lifecycle transitions.
//!
//! An [`Order`] tracks initial and remaining quantity; filled quantity is
//! derived. Status follows the fills: `Open` until the first fill,
//! `PartiallyFilled` while some quantity remains, `Filled` at zero
//! remaining. `Canceled` and `Filled` are terminal.

use crate::error::BookError;
use crate::types::{OrderId, OrderStatus, OrderType, Price, Quantity, Sequence, Side};
use serde::Serialize;

/// One order, as held by the book's id index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    order_type: OrderType,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
    sequence: Sequence,
    status: OrderStatus,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
        sequence: Sequence,
    ) -> Self {
        Self {
            id,
            order_type,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
            sequence,
            status: OrderStatus::Open,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Arrival sequence; re-assigned when the order is modified.
    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    pub(crate) fn set_sequence(&mut self, sequence: Sequence) {
        self.sequence = sequence;
    }

    /// Transitions to `Canceled`. Canceling an already-canceled order is a
    /// no-op; canceling a filled order is rejected.
    pub fn cancel(&mut self) -> Result<(), BookError> {
        if self.status == OrderStatus::Filled {
            return Err(BookError::IllegalTransition("cannot cancel a filled order"));
        }
        self.status = OrderStatus::Canceled;
        Ok(())
    }

    /// Consumes `quantity` from the remaining quantity and advances the
    /// status accordingly.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), BookError> {
        if quantity > self.remaining_quantity {
            return Err(BookError::Overfill);
        }
        self.remaining_quantity -= quantity;
        self.status = if self.remaining_quantity == 0 {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
        Ok(())
    }

    /// Re-prices the order and replaces its total quantity, keeping the
    /// filled quantity. A `new_total` equal to the filled quantity leaves
    /// the order `Filled`.
    pub fn modify(&mut self, new_price: Price, new_total: Quantity) -> Result<(), BookError> {
        if self.status == OrderStatus::Filled || self.status == OrderStatus::Canceled {
            return Err(BookError::IllegalTransition(
                "cannot modify a filled or canceled order",
            ));
        }
        if new_total < self.filled_quantity() {
            return Err(BookError::ShrinkBelowFilled);
        }
        let filled = self.filled_quantity();
        self.price = new_price;
        self.remaining_quantity = new_total - filled;
        self.initial_quantity = new_total;
        self.status = if self.remaining_quantity == 0 {
            OrderStatus::Filled
        } else if filled > 0 {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::Open
        };
        Ok(())
    }
}
