//! Proof framing
//!
//! The authority writes each sibling hash as text occupying one fixed-size
//! frame, padded with spaces or NUL bytes, and ends the proof by closing its
//! side of the stream. There is no length prefix and no terminator token.

use crate::core::{
    error::{ClientError, Result},
    types::{HashValue, SiblingProof},
};
use std::io::{ErrorKind, Read};
use tracing::debug;

/// Read fixed-size frames until end of stream and decode each into a hash.
///
/// A frame is complete once `frame_size` bytes have arrived, however many
/// reads that takes. Bytes left over when the stream ends form a final
/// partial frame; it is kept when it carries a hash and ignored when it is
/// only padding.
pub fn read_frames<R: Read>(reader: &mut R, frame_size: usize) -> Result<SiblingProof> {
    if frame_size == 0 {
        return Err(ClientError::configuration("frame size must be greater than zero"));
    }

    let mut proof = SiblingProof::new();
    let mut frame = vec![0u8; frame_size];
    let mut filled = 0;

    loop {
        let n = match reader.read(&mut frame[filled..]) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ClientError::Io(e)),
        };

        if n == 0 {
            if filled > 0 {
                if let Some(hash) = decode_frame(&frame[..filled], false)? {
                    debug!(hash = %hash, "received trailing sibling hash");
                    proof.push(hash);
                }
            }
            return Ok(proof);
        }

        filled += n;
        if filled == frame_size {
            if let Some(hash) = decode_frame(&frame, true)? {
                debug!(hash = %hash, "received sibling hash");
                proof.push(hash);
            }
            filled = 0;
        }
    }
}

/// Decode one frame into a hash, trimming padding.
///
/// Returns `Ok(None)` only for an all-padding trailing partial frame.
pub fn decode_frame(frame: &[u8], complete: bool) -> Result<Option<HashValue>> {
    let text = std::str::from_utf8(frame).map_err(|e| {
        ClientError::malformed_proof(format!("hash frame is not valid UTF-8: {}", e))
    })?;

    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return if complete {
            Err(ClientError::malformed_proof("hash frame contains only padding"))
        } else {
            Ok(None)
        };
    }

    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ClientError::malformed_proof(format!(
            "hash frame contains more than one token: {:?}",
            trimmed
        )));
    }

    Ok(Some(HashValue::new(trimmed)))
}

/// Encode a hash into one padded frame, as an authority would send it
pub fn encode_frame(hash: &str, frame_size: usize) -> Result<Vec<u8>> {
    if hash.len() > frame_size {
        return Err(ClientError::malformed_proof(format!(
            "hash of {} bytes does not fit a {}-byte frame",
            hash.len(),
            frame_size
        )));
    }
    let mut frame = vec![b' '; frame_size];
    frame[..hash.len()].copy_from_slice(hash.as_bytes());
    Ok(frame)
}
