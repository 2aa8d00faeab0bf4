//! Error kinds surfaced by the book and the order lifecycle.
//!
//! Engine-driven IOC/FOK cancellations are normal outcomes, not errors;
//! everything here is a rejected operation that left the book unchanged.

use crate::types::OrderId;

/// Failure of a book or order operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    /// Cancel/modify target id is not in the id index.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// Add with an id that is already resident.
    #[error("duplicate order id {0}")]
    DuplicateId(OrderId),

    /// Add with zero quantity.
    #[error("order quantity must be positive")]
    InvalidQuantity,

    /// Lifecycle transition not permitted from the current status.
    #[error("{0}")]
    IllegalTransition(&'static str),

    /// Modify with a new total below the already-filled quantity.
    #[error("cannot reduce quantity below filled quantity")]
    ShrinkBelowFilled,

    /// Fill larger than the remaining quantity. Unreachable from
    /// well-formed engine use.
    #[error("cannot fill more than remaining quantity")]
    Overfill,
}
