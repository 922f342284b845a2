//! TCP proof transport
//!
//! One connection per record: connect, write the record, half-close,
//! read frames until the authority closes, drop the connection.

use crate::config::NetworkConfig;
use crate::core::{
    error::{ClientError, Result},
    types::{AuthorityAddress, SiblingProof},
};
use crate::transport::{frame::read_frames, ProofTransport};
use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};
use tracing::debug;

/// Fetches proofs over plain TCP
#[derive(Debug, Clone, Default)]
pub struct TcpTransport {
    network: NetworkConfig,
}

impl TcpTransport {
    pub fn new(network: NetworkConfig) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn connect(&self, address: &AuthorityAddress) -> Result<TcpStream> {
        let label = address.to_string();
        let candidates: Vec<SocketAddr> = (address.host.as_str(), address.port)
            .to_socket_addrs()
            .map_err(|_| ClientError::invalid_address(&label))?
            .collect();
        if candidates.is_empty() {
            return Err(ClientError::invalid_address(label));
        }

        let mut last_error = None;
        for candidate in &candidates {
            let attempt = match self.network.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(candidate, timeout),
                None => TcpStream::connect(candidate),
            };
            match attempt {
                Ok(stream) => {
                    debug!(authority = %label, peer = %candidate, "connected to authority");
                    return Ok(stream);
                },
                Err(e) => last_error = Some(e),
            }
        }

        let error = last_error
            .unwrap_or_else(|| io::Error::new(ErrorKind::NotFound, "no address to connect to"));
        Err(classify_io(&label, "connect", error))
    }
}

impl ProofTransport for TcpTransport {
    fn fetch_proof(&self, address: &AuthorityAddress, record: &str) -> Result<SiblingProof> {
        let label = address.to_string();
        let mut stream = self.connect(address)?;

        stream
            .set_read_timeout(self.network.read_timeout())
            .map_err(|e| classify_io(&label, "configure", e))?;
        stream
            .set_write_timeout(self.network.write_timeout())
            .map_err(|e| classify_io(&label, "configure", e))?;

        stream
            .write_all(record.as_bytes())
            .and_then(|_| stream.flush())
            .map_err(|e| classify_io(&label, "write", e))?;

        // Half-close so the authority sees where the request ends
        match stream.shutdown(Shutdown::Write) {
            Ok(()) => {},
            Err(e) if e.kind() == ErrorKind::NotConnected => {},
            Err(e) => return Err(classify_io(&label, "write", e)),
        }
        debug!(authority = %label, bytes = record.len(), "sent record");

        let mut reader = DeadlineReader::new(&stream, self.network.read_timeout());
        let proof = match read_frames(&mut reader, self.network.frame_size) {
            Err(ClientError::Io(e)) => return Err(classify_io(&label, "read", e)),
            other => other?,
        };
        debug!(authority = %label, siblings = proof.len(), "all sibling hashes received");

        Ok(proof)
    }
}

/// Reads from a stream under one deadline shared by every read.
///
/// The socket timeout is narrowed to the time left before each read, so an
/// authority that trickles bytes cannot stretch the round trip past the
/// configured read timeout.
struct DeadlineReader<'a> {
    stream: &'a TcpStream,
    deadline: Option<Instant>,
}

impl<'a> DeadlineReader<'a> {
    fn new(stream: &'a TcpStream, timeout: Option<Duration>) -> Self {
        Self {
            stream,
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }
}

impl Read for DeadlineReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(deadline) = self.deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(io::Error::new(ErrorKind::TimedOut, "read deadline elapsed"));
            }
            self.stream.set_read_timeout(Some(remaining))?;
        }
        let mut stream = self.stream;
        stream.read(buf)
    }
}

/// Map an I/O failure to a timeout or a connection failure
fn classify_io(address: &str, operation: &str, error: io::Error) -> ClientError {
    match error.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => ClientError::timeout(address, operation),
        _ => ClientError::connection_failed(address, error),
    }
}
