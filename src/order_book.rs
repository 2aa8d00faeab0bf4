//! Single-symbol order book: bids and asks, price-time priority.
//!
//! The book owns every order through its id index; the two sides hold
//! order ids only, so removal is a level erase plus an index erase and no
//! shared references exist. Each price level is FIFO; best bid is the
//! highest price, best ask the lowest. Matching is delegated to
//! [`crate::matching`] on every add and on every re-matched modify.

use crate::error::BookError;
use crate::logger::{Logger, NullLogger};
use crate::matching::MatchingEngine;
use crate::order::Order;
use crate::trade::Trade;
use crate::types::{Level, OrderId, OrderStatus, OrderType, Price, Quantity, Sequence, Side};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Price -> FIFO queue of resting order ids. Bids iterate best-first in
/// reverse; asks iterate best-first forward.
pub(crate) type BookSide = BTreeMap<Price, VecDeque<OrderId>>;

/// Single-symbol limit order book.
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
    orders: HashMap<OrderId, Order>,
    trades: Vec<Trade>,
    next_seq: Sequence,
    logger: Box<dyn Logger>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Empty book with the null log sink.
    pub fn new() -> Self {
        Self::with_logger(Box::new(NullLogger))
    }

    /// Empty book logging events to `logger`.
    pub fn with_logger(logger: Box<dyn Logger>) -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            orders: HashMap::new(),
            trades: Vec::new(),
            next_seq: 1,
            logger,
        }
    }

    /// Admits a new order: matches it against the opposite side and rests
    /// any good-till-cancel residual at the tail of its price level.
    /// Returns a snapshot of the order after matching; the order is in the
    /// id index iff its status is non-terminal.
    pub fn add_order(
        &mut self,
        id: OrderId,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Order, BookError> {
        if quantity == 0 {
            return Err(BookError::InvalidQuantity);
        }
        if self.orders.contains_key(&id) {
            return Err(BookError::DuplicateId(id));
        }
        let mut order = Order::new(id, order_type, side, price, quantity, self.next_seq);
        self.next_seq += 1;
        self.logger.log(&format!("added order {}", id));

        self.match_against_book(&mut order)?;
        if order.remaining_quantity() > 0 && order.status() != OrderStatus::Canceled {
            self.rest(order.clone());
        }
        Ok(order)
    }

    /// Cancels a resting order: removes it from its price level and the id
    /// index and marks it canceled.
    pub fn cancel_order(&mut self, id: OrderId) -> Result<(), BookError> {
        let mut order = match self.orders.remove(&id) {
            Some(order) => order,
            None => return Err(BookError::NotFound(id)),
        };
        if order.status() == OrderStatus::Filled {
            self.orders.insert(id, order);
            return Err(BookError::IllegalTransition("cannot cancel a filled order"));
        }
        self.remove_from_level(order.side(), order.price(), id);
        order.cancel()?;
        self.logger.log(&format!("canceled order {}", id));
        Ok(())
    }

    /// Re-prices a resting order and replaces its total quantity. The
    /// order leaves its price level, keeps its fill accounting, takes a
    /// fresh arrival sequence (modification always loses time priority),
    /// and re-enters matching as an aggressive order. Validation happens
    /// before any detachment, so an error leaves the book unchanged.
    pub fn modify_order(
        &mut self,
        id: OrderId,
        new_price: Price,
        new_total: Quantity,
    ) -> Result<(), BookError> {
        let mut order = match self.orders.remove(&id) {
            Some(order) => order,
            None => return Err(BookError::NotFound(id)),
        };
        if order.status() == OrderStatus::Filled || order.status() == OrderStatus::Canceled {
            self.orders.insert(id, order);
            return Err(BookError::IllegalTransition(
                "cannot modify a filled or canceled order",
            ));
        }
        if new_total < order.filled_quantity() {
            self.orders.insert(id, order);
            return Err(BookError::ShrinkBelowFilled);
        }

        self.remove_from_level(order.side(), order.price(), id);
        order.modify(new_price, new_total)?;
        order.set_sequence(self.next_seq);
        self.next_seq += 1;
        self.logger.log(&format!(
            "modified order {} to price {} and total quantity {}",
            id, new_price, new_total
        ));

        if order.status() == OrderStatus::Filled {
            self.logger
                .log(&format!("order {} fully filled after modification", id));
            return Ok(());
        }

        self.match_against_book(&mut order)?;
        if order.remaining_quantity() > 0 && order.status() != OrderStatus::Canceled {
            self.rest(order);
        }
        Ok(())
    }

    /// Bid levels, best (highest) price first.
    pub fn get_bids(&self) -> Vec<Level> {
        self.bids
            .iter()
            .rev()
            .map(|(&price, queue)| Level {
                price,
                quantity: self.level_quantity(queue),
            })
            .collect()
    }

    /// Ask levels, best (lowest) price first.
    pub fn get_asks(&self) -> Vec<Level> {
        self.asks
            .iter()
            .map(|(&price, queue)| Level {
                price,
                quantity: self.level_quantity(queue),
            })
            .collect()
    }

    /// Every trade executed on this book, in execution order.
    pub fn get_trade_history(&self) -> &[Trade] {
        &self.trades
    }

    /// Resting order by id, if resident.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Number of resident (non-terminal) orders.
    pub fn open_order_count(&self) -> usize {
        self.orders.len()
    }

    /// Best bid price (None if the bid side is empty).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price (None if the ask side is empty).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    fn match_against_book(&mut self, aggressor: &mut Order) -> Result<(), BookError> {
        let opposite = match aggressor.side() {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };
        let mut engine =
            MatchingEngine::new(&mut self.orders, &mut self.trades, self.logger.as_ref());
        engine.match_order(aggressor, opposite)
    }

    fn rest(&mut self, order: Order) {
        let side = match order.side() {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        side.entry(order.price()).or_default().push_back(order.id());
        self.orders.insert(order.id(), order);
    }

    fn remove_from_level(&mut self, side: Side, price: Price, id: OrderId) {
        let book_side = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(queue) = book_side.get_mut(&price) {
            queue.retain(|&resting| resting != id);
            if queue.is_empty() {
                book_side.remove(&price);
            }
        }
    }

    fn level_quantity(&self, queue: &VecDeque<OrderId>) -> u64 {
        queue
            .iter()
            .filter_map(|id| self.orders.get(id))
            .map(|order| u64::from(order.remaining_quantity()))
            .sum()
    }
}
