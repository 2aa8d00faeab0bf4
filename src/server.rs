//! TCP boundary: one listener, one book; a session per connection.
//!
//! Each connection reads newline-framed JSON requests and receives one
//! JSON reply line per request. Connections share the book behind a mutex;
//! the core itself stays single-threaded.

use crate::order_book::OrderBook;
use crate::protocol::{self, Reply, Request};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, warn};

/// Accepts connections on `listener` forever, spawning a session task per
/// connection.
pub async fn serve(listener: TcpListener, book: Arc<Mutex<OrderBook>>) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("connection from {}", peer);
        let book = Arc::clone(&book);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, book).await {
                warn!("connection {}: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    book: Arc<Mutex<OrderBook>>,
) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = handle_request(&line, &book);
        writer.write_all(protocol::encode_reply(&reply).as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    Ok(())
}

/// Decodes one request line and applies it to the book. Core errors come
/// back as `{"error": …}` replies; they never tear down the session.
fn handle_request(line: &str, book: &Mutex<OrderBook>) -> Reply {
    let request = match protocol::decode_request(line) {
        Ok(request) => request,
        Err(e) => return Reply::error(e),
    };
    let mut book = book.lock().expect("lock");
    match request {
        Request::Order {
            id,
            order_type,
            side,
            price,
            quantity,
        } => match book.add_order(id, order_type, side, price, quantity) {
            Ok(_) => Reply::message(format!("Order received: {}", id)),
            Err(e) => Reply::error(e),
        },
        Request::Summary => Reply::Summary {
            bids: book.get_bids(),
            asks: book.get_asks(),
        },
        Request::Cancel { id } => match book.cancel_order(id) {
            Ok(()) => Reply::message(format!("Order canceled: {}", id)),
            Err(e) => Reply::error(e),
        },
        Request::Modify {
            id,
            price,
            quantity,
        } => match book.modify_order(id, price, quantity) {
            Ok(()) => Reply::message(format!("Order modified: {}", id)),
            Err(e) => Reply::error(e),
        },
    }
}
