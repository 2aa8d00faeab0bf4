//! Wire protocol for the order server.
//!
//! One JSON object per line. A record with a `command` field is a
//! summary/cancel/modify request; anything else is decoded as an order.
//! Order ids travel as decimal strings; prices and quantities arrive as
//! 64-bit integers and are truncated to the book's 32-bit types.

use crate::types::{Level, OrderId, OrderType, Price, Quantity, Side};
use serde::{Deserialize, Serialize};

/// Malformed command record. Boundary-only: the core never produces this.
#[derive(Debug, thiserror::Error)]
#[error("malformed command record: {0}")]
pub struct DecodeError(String);

/// One decoded request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Order {
        id: OrderId,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    Summary,
    Cancel {
        id: OrderId,
    },
    Modify {
        id: OrderId,
        price: Price,
        quantity: Quantity,
    },
}

/// One reply, serialized as a single JSON line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Message { message: String },
    Error { error: String },
    Summary { bids: Vec<Level>, asks: Vec<Level> },
}

impl Reply {
    pub fn message(message: impl Into<String>) -> Self {
        Reply::Message {
            message: message.into(),
        }
    }

    pub fn error(error: impl std::fmt::Display) -> Self {
        Reply::Error {
            error: error.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct OrderWire {
    id: String,
    #[serde(rename = "type")]
    order_type: OrderType,
    side: Side,
    price: i64,
    quantity: u64,
}

#[derive(Deserialize)]
struct CancelWire {
    id: String,
}

#[derive(Deserialize)]
struct ModifyWire {
    id: String,
    price: i64,
    quantity: u64,
}

/// Decodes one request line.
pub fn decode_request(line: &str) -> Result<Request, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| DecodeError(e.to_string()))?;
    let command = value.get("command").and_then(|c| c.as_str());
    match command {
        Some("summary") => Ok(Request::Summary),
        Some("cancel") => {
            let wire: CancelWire =
                serde_json::from_value(value.clone()).map_err(|e| DecodeError(e.to_string()))?;
            Ok(Request::Cancel {
                id: parse_id(&wire.id)?,
            })
        }
        Some("modify") => {
            let wire: ModifyWire =
                serde_json::from_value(value.clone()).map_err(|e| DecodeError(e.to_string()))?;
            Ok(Request::Modify {
                id: parse_id(&wire.id)?,
                price: wire.price as Price,
                quantity: wire.quantity as Quantity,
            })
        }
        Some(other) => Err(DecodeError(format!("unknown command {:?}", other))),
        None => {
            let wire: OrderWire =
                serde_json::from_value(value).map_err(|e| DecodeError(e.to_string()))?;
            Ok(Request::Order {
                id: parse_id(&wire.id)?,
                order_type: wire.order_type,
                side: wire.side,
                price: wire.price as Price,
                quantity: wire.quantity as Quantity,
            })
        }
    }
}

/// Encodes one reply line (without the trailing newline).
pub fn encode_reply(reply: &Reply) -> String {
    serde_json::to_string(reply).unwrap_or_default()
}

fn parse_id(raw: &str) -> Result<OrderId, DecodeError> {
    raw.parse::<u64>()
        .map(OrderId)
        .map_err(|_| DecodeError(format!("invalid order id {:?}", raw)))
}
