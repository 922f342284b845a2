//! Test utilities for Merkle client tests
//!
//! Provides an in-process authority that answers each connection with a
//! canned proof, framed the way a real authority frames it.

#![allow(dead_code)]

use merkle_client::core::hash::md5;
use merkle_client::transport::encode_frame;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Frame size used by the test authority
pub const FRAME_SIZE: usize = 256;

/// What the authority sends back for one request
#[derive(Debug, Clone)]
pub enum Reply {
    /// Sibling hashes, one per padded frame
    Proof(Vec<String>),
    /// Raw bytes written verbatim
    Raw(Vec<u8>),
    /// Close the connection without answering
    Close,
}

type Handler = dyn Fn(&str) -> Reply + Send + Sync;

/// Authority listening on a random local port
pub struct TestAuthority {
    port: u16,
    connections: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestAuthority {
    /// Serve fixed proofs; unknown records get an empty proof
    pub fn with_proofs(proofs: HashMap<String, Vec<String>>) -> Self {
        Self::with_handler(move |record| {
            Reply::Proof(proofs.get(record).cloned().unwrap_or_default())
        })
    }

    /// Serve replies computed per request
    pub fn with_handler(handler: impl Fn(&str) -> Reply + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test authority");
        let port = listener.local_addr().expect("local addr").port();
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let conn_count = Arc::clone(&connections);
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                conn_count.fetch_add(1, Ordering::SeqCst);
                let handler = Arc::clone(&handler);
                let seen = Arc::clone(&seen);
                thread::spawn(move || serve(stream, handler.as_ref(), &seen));
            }
        });

        Self {
            port,
            connections,
            requests,
        }
    }

    pub fn host(&self) -> &'static str {
        "127.0.0.1"
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Number of connections accepted so far
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Request payloads received so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn serve(mut stream: TcpStream, handler: &Handler, seen: &Mutex<Vec<String>>) {
    let mut request = Vec::new();
    if stream.read_to_end(&mut request).is_err() {
        return;
    }
    let record = String::from_utf8_lossy(&request).into_owned();
    seen.lock().expect("requests lock").push(record.clone());

    match handler(&record) {
        Reply::Proof(hashes) => {
            for hash in hashes {
                let frame = encode_frame(&hash, FRAME_SIZE).expect("hash fits frame");
                if stream.write_all(&frame).is_err() {
                    return;
                }
            }
        },
        Reply::Raw(bytes) => {
            let _ = stream.write_all(&bytes);
        },
        Reply::Close => {},
    }
}

/// Root reached from `record` through `siblings` with MD5 hex chaining
pub fn md5_root(record: &str, siblings: &[&str]) -> String {
    let mut acc = record.to_string();
    for sibling in siblings {
        acc = md5(format!("{}{}", acc, sibling).as_bytes()).into_string();
    }
    acc
}

/// Owned proof list from string slices
pub fn hashes(siblings: &[&str]) -> Vec<String> {
    siblings.iter().map(|s| s.to_string()).collect()
}
