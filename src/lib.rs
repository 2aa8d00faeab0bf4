//! # Matchbook
//!
//! Single-symbol limit order book with a deterministic price-time priority
//! matching engine for good-till-cancel, immediate-or-cancel, and
//! fill-or-kill orders.
//!
//! ## Entry point
//!
//! Use [`OrderBook`] as the single entry point: create with
//! [`OrderBook::new`] (or [`OrderBook::with_logger`]), then
//! [`OrderBook::add_order`], [`OrderBook::cancel_order`], and
//! [`OrderBook::modify_order`]. Queries ([`OrderBook::get_bids`],
//! [`OrderBook::get_asks`], [`OrderBook::get_trade_history`]) are pure
//! reads.
//!
//! ## Example
//!
//! ```rust
//! use matchbook::{OrderBook, OrderId, OrderType, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(OrderId(1), OrderType::GoodTillCancel, Side::Buy, 100, 10)
//!     .unwrap();
//! let sell = book
//!     .add_order(OrderId(2), OrderType::GoodTillCancel, Side::Sell, 95, 6)
//!     .unwrap();
//! assert_eq!(sell.filled_quantity(), 6);
//!
//! // execution happens at the resting order's price
//! let trade = &book.get_trade_history()[0];
//! assert_eq!(trade.bid().price, 100);
//! assert_eq!(trade.ask().quantity, 6);
//! ```
//!
//! ## Boundary
//!
//! [`server`] exposes the book over TCP as newline-framed JSON commands
//! decoded by [`protocol`]; the core itself is single-threaded and
//! synchronous.

pub mod error;
pub mod logger;
mod matching;
pub mod order;
pub mod order_book;
pub mod order_gen;
pub mod protocol;
pub mod server;
pub mod trade;
pub mod types;

pub use error::BookError;
pub use logger::{ConsoleLogger, Logger, NullLogger};
pub use order::Order;
pub use order_book::OrderBook;
pub use trade::{Execution, Trade};
pub use types::{Level, OrderId, OrderStatus, OrderType, Price, Quantity, Sequence, Side};
