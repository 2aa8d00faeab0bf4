//! Deterministic synthetic order streams.
//!
//! Configurable generator for replay tests, demos, and benchmarks. Same
//! seed and config produce the same sequence of order instructions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{OrderId, OrderType, Price, Quantity, Side};

/// One generated order instruction, ready for `OrderBook::add_order`.
#[derive(Clone, Copy, Debug)]
pub struct NewOrder {
    pub id: OrderId,
    pub order_type: OrderType,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

/// Configuration for the synthetic order generator. All ranges are
/// inclusive; type ratios should sum to at most 1.0, the remainder is
/// fill-or-kill.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed, same stream.
    pub seed: u64,
    /// Number of orders produced by [`Generator::all_orders`].
    pub num_orders: usize,
    /// Probability of Buy. Sell otherwise.
    pub buy_ratio: f64,
    /// Probability of good-till-cancel, then immediate-or-cancel.
    pub gtc_ratio: f64,
    pub ioc_ratio: f64,
    /// Price range in ticks.
    pub price_min: Price,
    pub price_max: Price,
    /// Quantity range, whole units.
    pub quantity_min: Quantity,
    pub quantity_max: Quantity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 1000,
            buy_ratio: 0.5,
            gtc_ratio: 0.8,
            ioc_ratio: 0.1,
            price_min: 95,
            price_max: 105,
            quantity_min: 1,
            quantity_max: 100,
        }
    }
}

/// Deterministic order stream. Ids count up from 1.
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_id: u64,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_id: 1,
        }
    }

    /// Generates the next order instruction, advancing the stream.
    pub fn next_order(&mut self) -> NewOrder {
        let id = OrderId(self.next_id);
        self.next_id += 1;
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let type_roll = self.rng.gen::<f64>();
        let order_type = if type_roll < self.config.gtc_ratio {
            OrderType::GoodTillCancel
        } else if type_roll < self.config.gtc_ratio + self.config.ioc_ratio {
            OrderType::ImmediateOrCancel
        } else {
            OrderType::FillOrKill
        };
        let price = self
            .rng
            .gen_range(self.config.price_min..=self.config.price_max);
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);
        NewOrder {
            id,
            order_type,
            side,
            price,
            quantity,
        }
    }

    /// Collects `num_orders` instructions from the stream.
    pub fn all_orders(mut self) -> Vec<NewOrder> {
        (0..self.config.num_orders)
            .map(|_| self.next_order())
            .collect()
    }
}
