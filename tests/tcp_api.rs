//! TCP boundary integration tests. Spawn the real server on an ephemeral
//! port and drive it over a socket, one JSON line per request.

use matchbook::server;
use matchbook::OrderBook;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_server() -> SocketAddr {
    let book = Arc::new(Mutex::new(OrderBook::new()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server::serve(listener, book).await;
    });
    addr
}

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Sends one request line and reads one reply line.
    async fn request(&mut self, line: &str) -> serde_json::Value {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        let mut reply = String::new();
        self.reader.read_line(&mut reply).await.unwrap();
        serde_json::from_str(reply.trim()).unwrap()
    }
}

fn order_line(id: u64, order_type: &str, side: &str, price: i64, quantity: u64) -> String {
    format!(
        r#"{{"id": "{}", "type": "{}", "side": "{}", "price": {}, "quantity": {}}}"#,
        id, order_type, side, price, quantity
    )
}

#[tokio::test]
async fn order_is_acknowledged_with_its_id() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    let reply = client.request(&order_line(7, "GTC", "buy", 100, 5)).await;
    assert_eq!(reply["message"], "Order received: 7");
}

#[tokio::test]
async fn malformed_record_gets_an_error_reply() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    let reply = client.request(r#"{"id": 42}"#).await;
    let error = reply["error"].as_str().unwrap();
    assert!(error.contains("malformed command record"));
}

#[tokio::test]
async fn duplicate_id_gets_an_error_reply() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    client.request(&order_line(1, "GTC", "buy", 100, 5)).await;
    let reply = client.request(&order_line(1, "GTC", "buy", 100, 5)).await;
    assert_eq!(reply["error"], "duplicate order id 1");
}

#[tokio::test]
async fn zero_quantity_gets_an_error_reply() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    let reply = client.request(&order_line(1, "GTC", "buy", 100, 0)).await;
    assert_eq!(reply["error"], "order quantity must be positive");
}

#[tokio::test]
async fn summary_lists_bids_descending_and_asks_ascending() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    client.request(&order_line(1, "GTC", "buy", 98, 1)).await;
    client.request(&order_line(2, "GTC", "buy", 100, 4)).await;
    client.request(&order_line(3, "GTC", "buy", 100, 6)).await;
    client.request(&order_line(4, "GTC", "sell", 103, 2)).await;
    client.request(&order_line(5, "GTC", "sell", 101, 7)).await;

    let reply = client.request(r#"{"command": "summary"}"#).await;
    assert_eq!(
        reply["bids"],
        serde_json::json!([
            {"price": 100, "quantity": 10},
            {"price": 98, "quantity": 1},
        ])
    );
    assert_eq!(
        reply["asks"],
        serde_json::json!([
            {"price": 101, "quantity": 7},
            {"price": 103, "quantity": 2},
        ])
    );
}

#[tokio::test]
async fn crossing_orders_trade_and_the_summary_shrinks() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    client.request(&order_line(1, "GTC", "sell", 100, 2)).await;
    // IOC takes the 2 on offer and cancels its remainder
    client.request(&order_line(2, "IOC", "buy", 100, 5)).await;

    let reply = client.request(r#"{"command": "summary"}"#).await;
    assert_eq!(reply["bids"], serde_json::json!([]));
    assert_eq!(reply["asks"], serde_json::json!([]));
}

#[tokio::test]
async fn cancel_command_removes_a_resting_order() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    client.request(&order_line(1, "GTC", "buy", 100, 5)).await;
    let reply = client.request(r#"{"command": "cancel", "id": "1"}"#).await;
    assert_eq!(reply["message"], "Order canceled: 1");

    let reply = client.request(r#"{"command": "cancel", "id": "1"}"#).await;
    assert_eq!(reply["error"], "order 1 not found");

    let summary = client.request(r#"{"command": "summary"}"#).await;
    assert_eq!(summary["bids"], serde_json::json!([]));
}

#[tokio::test]
async fn modify_command_reprices_a_resting_order() {
    let addr = spawn_server().await;
    let mut client = Client::connect(addr).await;
    client.request(&order_line(1, "GTC", "buy", 100, 5)).await;
    let reply = client
        .request(r#"{"command": "modify", "id": "1", "price": 105, "quantity": 8}"#)
        .await;
    assert_eq!(reply["message"], "Order modified: 1");

    let summary = client.request(r#"{"command": "summary"}"#).await;
    assert_eq!(
        summary["bids"],
        serde_json::json!([{"price": 105, "quantity": 8}])
    );
}

#[tokio::test]
async fn sessions_share_one_book() {
    let addr = spawn_server().await;
    let mut first = Client::connect(addr).await;
    first.request(&order_line(1, "GTC", "sell", 100, 3)).await;

    let mut second = Client::connect(addr).await;
    let reply = second.request(&order_line(2, "GTC", "buy", 100, 3)).await;
    assert_eq!(reply["message"], "Order received: 2");

    let summary = second.request(r#"{"command": "summary"}"#).await;
    assert_eq!(summary["bids"], serde_json::json!([]));
    assert_eq!(summary["asks"], serde_json::json!([]));
}
