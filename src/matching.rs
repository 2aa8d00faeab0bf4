//! Price-time priority matching.
//!
//! [`MatchingEngine`] runs one aggressive order against the opposite book
//! side: FOK liquidity pre-check, best-price match loop with FIFO level
//! consumption, IOC residual cancellation. It is constructed by the book
//! for a single invocation over mutable views of the book's state.

use crate::error::BookError;
use crate::logger::Logger;
use crate::order::Order;
use crate::order_book::BookSide;
use crate::trade::{Execution, Trade};
use crate::types::{OrderId, OrderStatus, OrderType, Price, Side};
use std::collections::{HashMap, VecDeque};

/// Transient matching context over the book's id index, trade history, and
/// log sink. Lives for one `match_order` call.
pub(crate) struct MatchingEngine<'a> {
    orders: &'a mut HashMap<OrderId, Order>,
    trades: &'a mut Vec<Trade>,
    logger: &'a dyn Logger,
}

impl<'a> MatchingEngine<'a> {
    pub(crate) fn new(
        orders: &'a mut HashMap<OrderId, Order>,
        trades: &'a mut Vec<Trade>,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            orders,
            trades,
            logger,
        }
    }

    /// Matches `aggressor` against `opposite` until it is filled, the
    /// acceptable liquidity is exhausted, or its type cancels it.
    ///
    /// The aggressor is not resident in any level or in the id index while
    /// this runs; cancellation therefore only marks the order and logs.
    pub(crate) fn match_order(
        &mut self,
        aggressor: &mut Order,
        opposite: &mut BookSide,
    ) -> Result<(), BookError> {
        if aggressor.order_type() == OrderType::FillOrKill
            && !self.has_sufficient_liquidity(aggressor, opposite)
        {
            self.logger.log(&format!(
                "insufficient liquidity for fill-or-kill order {}",
                aggressor.id()
            ));
            self.cancel_aggressor(aggressor)?;
            return Ok(());
        }

        while aggressor.remaining_quantity() > 0 {
            let Some(best_price) = best_price(aggressor.side(), opposite) else {
                break;
            };
            if !price_acceptable(aggressor, best_price) {
                if matches!(
                    aggressor.order_type(),
                    OrderType::ImmediateOrCancel | OrderType::FillOrKill
                ) {
                    self.logger
                        .log(&format!("price not acceptable for order {}", aggressor.id()));
                    self.cancel_aggressor(aggressor)?;
                }
                break;
            }
            self.process_level(aggressor, opposite, best_price)?;
        }

        if aggressor.order_type() == OrderType::ImmediateOrCancel
            && aggressor.remaining_quantity() > 0
        {
            self.logger.log(&format!(
                "immediate-or-cancel order {} canceled with remaining quantity",
                aggressor.id()
            ));
            self.cancel_aggressor(aggressor)?;
        }
        Ok(())
    }

    /// Consumes the level at `price` in FIFO order until it empties or the
    /// aggressor is filled. Removes the level from the side if it empties.
    fn process_level(
        &mut self,
        aggressor: &mut Order,
        opposite: &mut BookSide,
        price: Price,
    ) -> Result<(), BookError> {
        let Some(queue) = opposite.get_mut(&price) else {
            return Ok(());
        };
        while aggressor.remaining_quantity() > 0 {
            let Some(&resting_id) = queue.front() else {
                break;
            };
            let Some(resting) = self.orders.get_mut(&resting_id) else {
                // stale id left behind by an earlier removal
                queue.pop_front();
                continue;
            };
            let traded = aggressor.remaining_quantity().min(resting.remaining_quantity());
            let execution_price = resting.price();
            aggressor.fill(traded)?;
            resting.fill(traded)?;
            let resting_filled = resting.remaining_quantity() == 0;

            let aggressor_exec = Execution {
                order_id: aggressor.id(),
                price: execution_price,
                quantity: traded,
            };
            let resting_exec = Execution {
                order_id: resting_id,
                price: execution_price,
                quantity: traded,
            };
            let (bid, ask) = match aggressor.side() {
                Side::Buy => (aggressor_exec, resting_exec),
                Side::Sell => (resting_exec, aggressor_exec),
            };
            self.trades.push(Trade::new(bid, ask));
            self.logger.log(&format!(
                "trade executed between orders {} and {}",
                aggressor.id(),
                resting_id
            ));

            if resting_filled {
                queue.pop_front();
                self.orders.remove(&resting_id);
            }
        }
        if queue.is_empty() {
            opposite.remove(&price);
        }
        Ok(())
    }

    fn has_sufficient_liquidity(&self, aggressor: &Order, opposite: &BookSide) -> bool {
        self.available_quantity(aggressor, opposite) >= u64::from(aggressor.remaining_quantity())
    }

    /// Total remaining quantity on price-acceptable levels, walked best
    /// price first, stopping early once the aggressor could be filled.
    /// Read-only.
    fn available_quantity(&self, aggressor: &Order, opposite: &BookSide) -> u64 {
        let needed = u64::from(aggressor.remaining_quantity());
        let mut total = 0u64;
        let levels: Box<dyn Iterator<Item = (&Price, &VecDeque<OrderId>)> + '_> =
            match aggressor.side() {
                Side::Buy => Box::new(opposite.iter()),
                Side::Sell => Box::new(opposite.iter().rev()),
            };
        for (&price, queue) in levels {
            if !price_acceptable(aggressor, price) {
                break;
            }
            for id in queue {
                if let Some(resting) = self.orders.get(id) {
                    total += u64::from(resting.remaining_quantity());
                    if total >= needed {
                        return total;
                    }
                }
            }
        }
        total
    }

    /// Marks the aggressor canceled, erases it from the id index if it is
    /// there, and logs. Idempotent: the IOC price-reject branch and the
    /// IOC residual branch may both request cancellation of one order.
    fn cancel_aggressor(&mut self, aggressor: &mut Order) -> Result<(), BookError> {
        if aggressor.status() == OrderStatus::Canceled {
            return Ok(());
        }
        aggressor.cancel()?;
        self.orders.remove(&aggressor.id());
        self.logger
            .log(&format!("canceled order {}", aggressor.id()));
        Ok(())
    }
}

/// Best opposing price: lowest ask for a buy, highest bid for a sell.
fn best_price(aggressor_side: Side, opposite: &BookSide) -> Option<Price> {
    match aggressor_side {
        Side::Buy => opposite.keys().next().copied(),
        Side::Sell => opposite.keys().next_back().copied(),
    }
}

/// Whether the aggressor's limit crosses the given level price.
fn price_acceptable(aggressor: &Order, level_price: Price) -> bool {
    match aggressor.side() {
        Side::Buy => aggressor.price() >= level_price,
        Side::Sell => aggressor.price() <= level_price,
    }
}
